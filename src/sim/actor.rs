//! Actors: axis-aligned boxes that move and collide
//!
//! Every actor carries an explicit `kind` tag set at construction and a
//! `behavior` describing what it does each tick. Identity is the `id`, never
//! value equality: two coins with the same position are still different actors.
//! Ids are minted here on construction; a clone keeps its original's id.

use std::f32::consts::TAU;
use std::sync::atomic::{AtomicU64, Ordering};

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::level::Level;
use super::vector::Vector;
use crate::consts::*;
use crate::error::TypeKindError;

/// Stable actor identity, unique per process
pub type ActorId = u64;

static NEXT_ACTOR_ID: AtomicU64 = AtomicU64::new(1);

fn next_actor_id() -> ActorId {
    NEXT_ACTOR_ID.fetch_add(1, Ordering::Relaxed)
}

/// Closed set of actor kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorKind {
    /// Generic actor with no behavior of its own
    Actor,
    Player,
    Coin,
    /// Any fireball variant (horizontal, vertical, rain)
    Fireball,
}

impl ActorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActorKind::Actor => "actor",
            ActorKind::Player => "player",
            ActorKind::Coin => "coin",
            ActorKind::Fireball => "fireball",
        }
    }
}

/// What a moving hazard does when its next step would hit an obstacle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleResponse {
    /// Flip velocity, stay put this tick
    Reverse,
    /// Jump back to the spawn position, keep velocity
    Respawn,
}

/// Per-tick behavior of an actor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Behavior {
    /// Never moves on its own (generic actors, the player)
    Inert,
    /// Vertical bobbing around a fixed anchor (coins)
    Bobbing {
        anchor: Vector,
        /// Current oscillation phase (radians)
        spring: f32,
        spring_speed: f32,
        spring_dist: f32,
    },
    /// Straight-line motion with an obstacle response (fireballs)
    Patrol {
        origin: Vector,
        response: ObstacleResponse,
    },
}

/// A positioned, sized, axis-aligned entity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Actor {
    id: ActorId,
    pub pos: Vector,
    pub size: Vector,
    pub speed: Vector,
    pub kind: ActorKind,
    pub behavior: Behavior,
}

impl Actor {
    /// Create a generic actor, validating its vectors
    pub fn new(
        pos: Vector,
        size: Vector,
        speed: Vector,
    ) -> Result<Self, TypeKindError> {
        check_finite("pos", pos)?;
        check_finite("size", size)?;
        check_finite("speed", speed)?;
        if size.x <= 0.0 || size.y <= 0.0 {
            return Err(TypeKindError::NonPositiveSize {
                x: size.x,
                y: size.y,
            });
        }
        Ok(Self::build(pos, size, speed, ActorKind::Actor, Behavior::Inert))
    }

    /// Generic actor with unit size and no speed
    pub fn at(pos: Vector) -> Result<Self, TypeKindError> {
        Self::new(pos, Vector::ONE, Vector::ZERO)
    }

    /// Unchecked construction for callers with known-good vectors
    pub(crate) fn build(
        pos: Vector,
        size: Vector,
        speed: Vector,
        kind: ActorKind,
        behavior: Behavior,
    ) -> Self {
        Self {
            id: next_actor_id(),
            pos,
            size,
            speed,
            kind,
            behavior,
        }
    }

    /// Player standing on the cell at `spawn`
    pub fn player(spawn: Vector) -> Self {
        Self::build(
            spawn + PLAYER_SPAWN_OFFSET,
            PLAYER_SIZE,
            Vector::ZERO,
            ActorKind::Player,
            Behavior::Inert,
        )
    }

    /// Coin in the cell at `spawn`, with a random starting phase
    pub fn coin<R: Rng + ?Sized>(spawn: Vector, rng: &mut R) -> Self {
        let anchor = spawn + COIN_SPAWN_OFFSET;
        Self::build(
            anchor,
            COIN_SIZE,
            Vector::ZERO,
            ActorKind::Coin,
            Behavior::Bobbing {
                anchor,
                spring: rng.random_range(0.0..TAU),
                spring_speed: COIN_SPRING_SPEED,
                spring_dist: COIN_SPRING_DIST,
            },
        )
    }

    /// Fireball with an arbitrary speed and obstacle response
    pub fn fireball(pos: Vector, speed: Vector, response: ObstacleResponse) -> Self {
        Self::build(
            pos,
            FIREBALL_SIZE,
            speed,
            ActorKind::Fireball,
            Behavior::Patrol {
                origin: pos,
                response,
            },
        )
    }

    pub fn horizontal_fireball(pos: Vector) -> Self {
        Self::fireball(pos, HORIZONTAL_FIREBALL_SPEED, ObstacleResponse::Reverse)
    }

    pub fn vertical_fireball(pos: Vector) -> Self {
        Self::fireball(pos, VERTICAL_FIREBALL_SPEED, ObstacleResponse::Reverse)
    }

    pub fn fire_rain(pos: Vector) -> Self {
        Self::fireball(pos, FIRE_RAIN_SPEED, ObstacleResponse::Respawn)
    }

    pub fn id(&self) -> ActorId {
        self.id
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Top-left and bottom-right corners
    fn corners(&self) -> (Vec2, Vec2) {
        let min = self.pos.as_vec2();
        (min, min + self.size.as_vec2())
    }

    /// Strict box overlap with another actor
    ///
    /// Boxes that only share an edge do not intersect, and an actor never
    /// intersects itself.
    pub fn is_intersect(&self, other: &Actor) -> bool {
        if self.id == other.id {
            return false;
        }
        let (min, max) = self.corners();
        let (other_min, other_max) = other.corners();
        min.cmplt(other_max).all() && max.cmpgt(other_min).all()
    }

    /// Current coin phase, if this actor bobs
    pub fn spring(&self) -> Option<f32> {
        match self.behavior {
            Behavior::Bobbing { spring, .. } => Some(spring),
            _ => None,
        }
    }

    /// Advance this actor by `time` seconds
    pub fn act(&mut self, time: f32, level: &Level) {
        match &mut self.behavior {
            Behavior::Inert => {}
            Behavior::Bobbing {
                anchor,
                spring,
                spring_speed,
                spring_dist,
            } => {
                *spring += *spring_speed * time;
                self.pos = *anchor + Vector::new(0.0, *spring_dist * spring.sin());
            }
            Behavior::Patrol { origin, response } => {
                let next = self.pos + self.speed * time;
                if level.obstacle_at(next, self.size).is_some() {
                    match response {
                        ObstacleResponse::Reverse => self.speed = -self.speed,
                        ObstacleResponse::Respawn => self.pos = *origin,
                    }
                } else {
                    self.pos = next;
                }
            }
        }
    }
}

fn check_finite(field: &'static str, v: Vector) -> Result<(), TypeKindError> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(TypeKindError::NonFiniteVector {
            field,
            x: v.x,
            y: v.y,
        })
    }
}
