//! Lava Run - a tile-based platform level simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (actors, obstacle grid, level state)
//! - `settings`: Parser configuration (symbol dictionary, seed)
//! - `levels`: Level packs (lists of text schemas)
//! - `error`: Contract and configuration errors

pub mod error;
pub mod levels;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, TypeKindError};
pub use levels::LevelPack;
pub use settings::Settings;

/// Simulation configuration constants
pub mod consts {
    use crate::sim::Vector;

    /// Fixed simulation timestep used by the headless runner (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Tick cap per level for the headless runner (two minutes)
    pub const MAX_TICKS: u32 = 60 * 120;

    /// Seconds a level keeps running after it is won or lost
    pub const FINISH_DELAY: f32 = 1.0;

    /// Player defaults
    pub const PLAYER_SIZE: Vector = Vector::new(0.8, 1.5);
    pub const PLAYER_SPAWN_OFFSET: Vector = Vector::new(0.0, -0.5);

    /// Coin defaults
    pub const COIN_SIZE: Vector = Vector::new(0.6, 0.6);
    pub const COIN_SPAWN_OFFSET: Vector = Vector::new(0.2, 0.1);
    /// Bobbing angular speed (radians/s)
    pub const COIN_SPRING_SPEED: f32 = 8.0;
    /// Bobbing amplitude (cells)
    pub const COIN_SPRING_DIST: f32 = 0.07;

    /// Fireball defaults
    pub const FIREBALL_SIZE: Vector = Vector::new(1.0, 1.0);
    pub const HORIZONTAL_FIREBALL_SPEED: Vector = Vector::new(2.0, 0.0);
    pub const VERTICAL_FIREBALL_SPEED: Vector = Vector::new(0.0, 2.0);
    pub const FIRE_RAIN_SPEED: Vector = Vector::new(0.0, 3.0);
}
