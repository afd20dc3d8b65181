//! One simulation frame
//!
//! Advances every actor, resolves what the player touches, and counts down
//! the finish delay. Looping, timing and rendering belong to the caller.

use super::level::{Level, LevelStatus, Obstacle, TouchKind};

/// Advance the level by `dt` seconds and return its status
pub fn tick(level: &mut Level, dt: f32) -> LevelStatus {
    if level.is_finished() {
        return level.status();
    }

    level.act_all(dt);

    if !level.status().is_terminal() {
        // Copied out so the actor list is free to change while reporting
        if let Some(player) = level.player().cloned() {
            if level.obstacle_at(player.pos, player.size) == Some(Obstacle::Lava) {
                level.player_touched(TouchKind::Lava, None);
            }

            let touched = level.actor_at(&player).map(|a| (a.kind, a.id()));
            if let Some((kind, id)) = touched {
                level.player_touched(kind.into(), Some(id));
            }
        }
    }

    level.advance_finish(dt);
    level.status()
}
