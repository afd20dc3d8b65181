//! Text schema to level builder
//!
//! A schema is a list of rows. `x` is wall, `!` is lava, characters found in
//! the dictionary spawn actors, and everything else is empty space.

use std::collections::BTreeMap;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorKind, Behavior};
use super::level::{Grid, Level, Obstacle};
use super::vector::Vector;
use crate::error::ConfigError;
use crate::settings::Settings;

/// Actor constructors a schema symbol can refer to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorTemplate {
    Actor,
    Player,
    Coin,
    HorizontalFireball,
    VerticalFireball,
    FireRain,
}

impl ActorTemplate {
    /// Build an actor for the cell at `pos`
    pub fn spawn<R: Rng + ?Sized>(self, pos: Vector, rng: &mut R) -> Actor {
        match self {
            // Unit size, no speed: always valid
            ActorTemplate::Actor => Actor::build(
                pos,
                Vector::ONE,
                Vector::ZERO,
                ActorKind::Actor,
                Behavior::Inert,
            ),
            ActorTemplate::Player => Actor::player(pos),
            ActorTemplate::Coin => Actor::coin(pos, rng),
            ActorTemplate::HorizontalFireball => Actor::horizontal_fireball(pos),
            ActorTemplate::VerticalFireball => Actor::vertical_fireball(pos),
            ActorTemplate::FireRain => Actor::fire_rain(pos),
        }
    }
}

/// Symbol registry used by the parser
pub type Dictionary = BTreeMap<char, ActorTemplate>;

/// Standard symbols: `@` player, `o` coin, `=` `|` `v` fireballs
pub fn default_dictionary() -> Dictionary {
    BTreeMap::from([
        ('@', ActorTemplate::Player),
        ('o', ActorTemplate::Coin),
        ('=', ActorTemplate::HorizontalFireball),
        ('|', ActorTemplate::VerticalFireball),
        ('v', ActorTemplate::FireRain),
    ])
}

/// Builds levels from text schemas
#[derive(Debug, Clone)]
pub struct LevelParser {
    dictionary: Dictionary,
    /// Seed for coin phases, so the same schema always parses the same way
    seed: u64,
}

impl Default for LevelParser {
    fn default() -> Self {
        Self::new(default_dictionary())
    }
}

impl LevelParser {
    pub fn new(dictionary: Dictionary) -> Self {
        Self {
            dictionary,
            seed: 0,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        Ok(Self::new(settings.symbols()?).with_seed(settings.seed))
    }

    pub fn actor_from_symbol(&self, symbol: char) -> Option<ActorTemplate> {
        self.dictionary.get(&symbol).copied()
    }

    pub fn obstacle_from_symbol(symbol: char) -> Option<Obstacle> {
        match symbol {
            'x' => Some(Obstacle::Wall),
            '!' => Some(Obstacle::Lava),
            _ => None,
        }
    }

    pub fn create_grid<S: AsRef<str>>(&self, rows: &[S]) -> Grid {
        rows.iter()
            .map(|row| row.as_ref().chars().map(Self::obstacle_from_symbol).collect())
            .collect()
    }

    /// Actors in scan order: rows top to bottom, columns left to right
    pub fn create_actors<S: AsRef<str>>(&self, rows: &[S]) -> Vec<Actor> {
        let mut rng = Pcg32::seed_from_u64(self.seed);
        let mut actors = Vec::new();

        for (y, row) in rows.iter().enumerate() {
            for (x, symbol) in row.as_ref().chars().enumerate() {
                let Some(template) = self.actor_from_symbol(symbol) else {
                    continue;
                };
                let pos = Vector::new(x as f32, y as f32);
                actors.push(template.spawn(pos, &mut rng));
            }
        }

        actors
    }

    pub fn parse<S: AsRef<str>>(&self, rows: &[S]) -> Level {
        let level = Level::new(self.create_grid(rows), self.create_actors(rows));
        log::debug!(
            "Parsed {} rows: {} coins, player {}",
            rows.len(),
            level
                .actors()
                .iter()
                .filter(|a| a.kind == ActorKind::Coin)
                .count(),
            if level.player().is_some() { "present" } else { "missing" }
        );
        level
    }
}
