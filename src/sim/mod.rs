//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Caller-supplied timestep only
//! - Seeded RNG only
//! - Stable iteration order (schema scan order)
//! - No rendering or input dependencies

pub mod actor;
pub mod level;
pub mod parser;
pub mod tick;
pub mod vector;

pub use actor::{Actor, ActorId, ActorKind, Behavior, ObstacleResponse};
pub use level::{Grid, Level, LevelStatus, Obstacle, TouchKind};
pub use parser::{ActorTemplate, Dictionary, LevelParser, default_dictionary};
pub use tick::tick;
pub use vector::Vector;
