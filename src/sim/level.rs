//! Level state: obstacle grid, actors and win/lose status
//!
//! The level exclusively owns its grid and actor list. Actors only see it
//! through `&Level` during `act`, for obstacle queries.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorId, ActorKind};
use super::parser::ActorTemplate;
use super::vector::Vector;
use crate::consts::FINISH_DELAY;
use crate::error::TypeKindError;

/// Static terrain stored in grid cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Obstacle {
    Wall,
    Lava,
}

/// Terrain rows; rows may differ in length, missing cells are empty
pub type Grid = Vec<Vec<Option<Obstacle>>>;

/// Outcome of the level so far
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LevelStatus {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl LevelStatus {
    /// Won and Lost are terminal; nothing leaves them
    pub fn is_terminal(&self) -> bool {
        !matches!(self, LevelStatus::InProgress)
    }
}

/// What the player touched, reported to `Level::player_touched`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchKind {
    Wall,
    Lava,
    Actor,
    Player,
    Coin,
    Fireball,
}

impl From<Obstacle> for TouchKind {
    fn from(obstacle: Obstacle) -> Self {
        match obstacle {
            Obstacle::Wall => TouchKind::Wall,
            Obstacle::Lava => TouchKind::Lava,
        }
    }
}

impl From<ActorKind> for TouchKind {
    fn from(kind: ActorKind) -> Self {
        match kind {
            ActorKind::Actor => TouchKind::Actor,
            ActorKind::Player => TouchKind::Player,
            ActorKind::Coin => TouchKind::Coin,
            ActorKind::Fireball => TouchKind::Fireball,
        }
    }
}

/// A playable level
#[derive(Debug, Clone, Serialize)]
pub struct Level {
    grid: Grid,
    /// Actors in schema scan order
    actors: Vec<Actor>,
    width: usize,
    height: usize,
    status: LevelStatus,
    finish_delay: f32,
}

impl Level {
    pub fn new(grid: Grid, actors: Vec<Actor>) -> Self {
        let width = grid.iter().map(Vec::len).max().unwrap_or(0);
        let height = grid.len();
        log::debug!(
            "Level {}x{} with {} actors",
            width,
            height,
            actors.len()
        );
        Self {
            grid,
            actors,
            width,
            height,
            status: LevelStatus::InProgress,
            finish_delay: FINISH_DELAY,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn status(&self) -> LevelStatus {
        self.status
    }

    pub fn finish_delay(&self) -> f32 {
        self.finish_delay
    }

    /// First player actor in collection order
    pub fn player(&self) -> Option<&Actor> {
        self.actors.iter().find(|a| a.kind == ActorKind::Player)
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.iter().find(|a| a.id() == id)
    }

    /// Terrain at a cell; out-of-row cells are empty
    pub fn cell(&self, x: usize, y: usize) -> Option<Obstacle> {
        self.grid.get(y).and_then(|row| row.get(x)).copied().flatten()
    }

    /// True once the outcome is decided and the finish delay has run out
    pub fn is_finished(&self) -> bool {
        self.status.is_terminal() && self.finish_delay < 0.0
    }

    /// First actor, in collection order, overlapping `actor` (never itself)
    pub fn actor_at(&self, actor: &Actor) -> Option<&Actor> {
        self.actors.iter().find(|other| actor.is_intersect(other))
    }

    /// Obstacle a box at `pos` of `size` would touch
    ///
    /// Leaving the level through the top or sides counts as a wall, falling
    /// out of the bottom counts as lava. Inside the level the covered cells
    /// are scanned row by row, top to bottom, and the first non-empty one wins.
    /// A box with non-finite coordinates is nowhere inside the level: wall.
    pub fn obstacle_at(&self, pos: Vector, size: Vector) -> Option<Obstacle> {
        if !pos.is_finite() || !size.is_finite() {
            return Some(Obstacle::Wall);
        }
        let min = pos.as_vec2().floor();
        let max = (pos.as_vec2() + size.as_vec2()).ceil();

        if min.x < 0.0 || min.y < 0.0 || max.x > self.width as f32 {
            return Some(Obstacle::Wall);
        }
        if max.y > self.height as f32 {
            return Some(Obstacle::Lava);
        }

        let (left, top) = (min.x as usize, min.y as usize);
        let (right, bottom) = (max.x as usize, max.y as usize);
        (top..bottom)
            .flat_map(|y| (left..right).map(move |x| (x, y)))
            .find_map(|(x, y)| self.cell(x, y))
    }

    /// Remove the actor with this identity, if present
    pub fn remove_actor(&mut self, id: ActorId) -> Option<Actor> {
        let index = self.actors.iter().position(|a| a.id() == id)?;
        Some(self.actors.remove(index))
    }

    /// True if no actor of `kind` is left
    pub fn no_more_actors(&self, kind: ActorKind) -> bool {
        !self.actors.iter().any(|a| a.kind == kind)
    }

    /// Report that the player touched something
    ///
    /// Lava and fireballs lose the level. A coin is collected and the level is
    /// won once the last coin is gone. Nothing changes after the outcome is
    /// decided.
    pub fn player_touched(&mut self, kind: TouchKind, actor: Option<ActorId>) {
        if self.status.is_terminal() {
            return;
        }

        match kind {
            TouchKind::Lava | TouchKind::Fireball => {
                log::debug!("Player touched {:?}", kind);
                self.finish(LevelStatus::Lost);
            }
            TouchKind::Coin => {
                let Some(id) = actor else { return };
                if let Some(coin) = self.remove_actor(id) {
                    log::debug!("Player collected {} {}", coin.kind.as_str(), id);
                }
                if self.no_more_actors(ActorKind::Coin) {
                    self.finish(LevelStatus::Won);
                }
            }
            _ => {}
        }
    }

    /// Move to a terminal status; refused once terminal
    fn finish(&mut self, outcome: LevelStatus) {
        if self.status.is_terminal() || !outcome.is_terminal() {
            return;
        }
        log::info!("Level {:?}", outcome);
        self.status = outcome;
    }

    /// Count down the finish delay once the outcome is decided
    pub fn advance_finish(&mut self, dt: f32) {
        if self.status.is_terminal() {
            self.finish_delay -= dt;
        }
    }

    /// Run every actor's `act` in collection order
    ///
    /// The list is moved out while actors run so each one can borrow the
    /// level for obstacle queries.
    pub fn act_all(&mut self, time: f32) {
        let mut actors = std::mem::take(&mut self.actors);
        for actor in &mut actors {
            actor.act(time, self);
        }
        self.actors = actors;
    }

    /// Add a new actor from a template at `pos`
    pub fn spawn<R: Rng + ?Sized>(
        &mut self,
        template: ActorTemplate,
        pos: Vector,
        rng: &mut R,
    ) -> Result<ActorId, TypeKindError> {
        if !pos.is_finite() {
            return Err(TypeKindError::NonFiniteVector {
                field: "pos",
                x: pos.x,
                y: pos.y,
            });
        }
        let actor = template.spawn(pos, rng);
        let id = actor.id();
        self.actors.push(actor);
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn coin(x: f32, y: f32) -> Actor {
        let mut rng = Pcg32::seed_from_u64(7);
        Actor::coin(Vector::new(x, y), &mut rng)
    }

    fn open_grid(width: usize, height: usize) -> Grid {
        vec![vec![None; width]; height]
    }

    #[test]
    fn test_dimensions_from_ragged_rows() {
        let grid = vec![
            vec![None; 3],
            vec![Some(Obstacle::Wall); 7],
            vec![None; 1],
        ];
        let level = Level::new(grid, Vec::new());
        assert_eq!(level.width(), 7);
        assert_eq!(level.height(), 3);
        assert_eq!(level.status(), LevelStatus::InProgress);
        assert_eq!(level.finish_delay(), 1.0);
        assert!(level.player().is_none());
        // Past the end of a short row
        assert_eq!(level.cell(5, 0), None);
        assert_eq!(level.cell(5, 1), Some(Obstacle::Wall));
        assert_eq!(level.cell(0, 9), None);
    }

    #[test]
    fn test_empty_level() {
        let level = Level::new(Vec::new(), Vec::new());
        assert_eq!(level.width(), 0);
        assert_eq!(level.height(), 0);
        assert_eq!(
            level.obstacle_at(Vector::ZERO, Vector::ONE),
            Some(Obstacle::Wall)
        );
    }

    #[test]
    fn test_player_is_first_player() {
        let first = Actor::player(Vector::new(1.0, 1.0));
        let first_id = first.id();
        let actors = vec![coin(0.0, 0.0), first, Actor::player(Vector::new(2.0, 1.0))];
        let level = Level::new(open_grid(3, 3), actors);
        assert_eq!(level.player().map(Actor::id), Some(first_id));
    }

    #[test]
    fn test_obstacle_at_boundaries() {
        let level = Level::new(open_grid(5, 5), Vec::new());
        let size = Vector::ONE;

        assert_eq!(level.obstacle_at(Vector::new(-0.5, 1.0), size), Some(Obstacle::Wall));
        assert_eq!(level.obstacle_at(Vector::new(1.0, -0.1), size), Some(Obstacle::Wall));
        assert_eq!(level.obstacle_at(Vector::new(4.5, 1.0), size), Some(Obstacle::Wall));
        assert_eq!(level.obstacle_at(Vector::new(1.0, 4.5), size), Some(Obstacle::Lava));
        // Flush against the right and bottom edges is still inside
        assert_eq!(level.obstacle_at(Vector::new(4.0, 4.0), size), None);
        assert_eq!(level.obstacle_at(Vector::new(2.2, 2.7), Vector::new(0.5, 0.5)), None);
    }

    #[test]
    fn test_obstacle_at_wall_beats_lava_below_edge() {
        // Off the side and off the bottom at once
        let level = Level::new(open_grid(3, 3), Vec::new());
        assert_eq!(
            level.obstacle_at(Vector::new(2.5, 2.5), Vector::ONE),
            Some(Obstacle::Wall)
        );
    }

    #[test]
    fn test_obstacle_at_non_finite_is_wall() {
        let level = Level::new(open_grid(5, 5), Vec::new());
        let nan = Vector::new(f32::NAN, f32::NAN);
        let inf = Vector::new(1.0, f32::INFINITY);

        assert_eq!(level.obstacle_at(nan, Vector::ONE), Some(Obstacle::Wall));
        assert_eq!(level.obstacle_at(Vector::new(1.0, f32::NAN), Vector::ONE), Some(Obstacle::Wall));
        assert_eq!(level.obstacle_at(inf, Vector::ONE), Some(Obstacle::Wall));
        assert_eq!(level.obstacle_at(Vector::ONE, nan), Some(Obstacle::Wall));
        assert_eq!(level.obstacle_at(Vector::ONE, inf), Some(Obstacle::Wall));
    }

    #[test]
    fn test_obstacle_at_reports_grid_cells() {
        let mut grid = open_grid(4, 4);
        grid[2][1] = Some(Obstacle::Lava);
        grid[1][2] = Some(Obstacle::Wall);
        let level = Level::new(grid, Vec::new());

        assert_eq!(level.obstacle_at(Vector::new(1.0, 2.0), Vector::ONE), Some(Obstacle::Lava));
        assert_eq!(level.obstacle_at(Vector::new(0.5, 2.0), Vector::ONE), Some(Obstacle::Lava));
        assert_eq!(level.obstacle_at(Vector::new(0.0, 0.0), Vector::ONE), None);
        // Covers both: the wall row is scanned first
        assert_eq!(
            level.obstacle_at(Vector::new(1.5, 1.5), Vector::ONE),
            Some(Obstacle::Wall)
        );
    }

    #[test]
    fn test_obstacle_at_same_row_leftmost_wins() {
        let mut grid = open_grid(4, 3);
        grid[1][1] = Some(Obstacle::Lava);
        grid[1][2] = Some(Obstacle::Wall);
        let level = Level::new(grid, Vec::new());

        // Covers columns 1..3 of row 1 only
        assert_eq!(
            level.obstacle_at(Vector::new(1.0, 1.0), Vector::new(2.0, 1.0)),
            Some(Obstacle::Lava)
        );
        assert_eq!(
            level.obstacle_at(Vector::new(1.5, 1.0), Vector::new(1.0, 1.0)),
            Some(Obstacle::Lava)
        );
    }

    #[test]
    fn test_obstacle_at_upper_row_beats_leftward_cell_below() {
        let mut grid = open_grid(4, 4);
        // Right end of the top covered row, left end of the bottom one
        grid[1][2] = Some(Obstacle::Lava);
        grid[2][1] = Some(Obstacle::Wall);
        let level = Level::new(grid, Vec::new());

        // Covers columns 1..3 and rows 1..3
        assert_eq!(
            level.obstacle_at(Vector::new(1.0, 1.5), Vector::new(2.0, 1.0)),
            Some(Obstacle::Lava)
        );
    }

    #[test]
    fn test_actor_at_first_match_excludes_self() {
        let player = Actor::player(Vector::new(1.0, 1.0));
        let overlapping = coin(1.0, 1.0);
        let overlapping_id = overlapping.id();
        let actors = vec![
            player.clone(),
            coin(5.0, 5.0),
            overlapping,
            Actor::horizontal_fireball(Vector::new(1.0, 1.0)),
        ];
        let level = Level::new(open_grid(8, 8), actors);

        assert_eq!(level.actor_at(&player).map(Actor::id), Some(overlapping_id));

        let far = Actor::at(Vector::new(7.0, 0.0)).unwrap();
        assert!(level.actor_at(&far).is_none());
    }

    #[test]
    fn test_identical_actors_keep_separate_identities() {
        let a = Actor::at(Vector::new(1.0, 1.0)).unwrap();
        let b = Actor::at(Vector::new(1.0, 1.0)).unwrap();
        let (a_id, b_id) = (a.id(), b.id());
        let mut level = Level::new(open_grid(4, 4), vec![a.clone(), b]);

        // Same box, different actor: still found
        assert_eq!(level.actor_at(&a).map(Actor::id), Some(b_id));

        assert_eq!(level.remove_actor(b_id).map(|r| r.id()), Some(b_id));
        assert_eq!(level.actors().len(), 1);
        assert_eq!(level.actors()[0].id(), a_id);
        assert!(level.actor_at(&a).is_none());
    }

    #[test]
    fn test_remove_actor_by_identity() {
        let (first, second) = (coin(0.0, 0.0), coin(0.0, 0.0));
        let (first_id, second_id) = (first.id(), second.id());
        let mut level = Level::new(open_grid(4, 4), vec![first, second]);

        let removed = level.remove_actor(second_id);
        assert_eq!(removed.map(|a| a.id()), Some(second_id));
        assert_eq!(level.actors().len(), 1);
        assert_eq!(level.actors()[0].id(), first_id);

        // Missing actor is a no-op
        assert!(level.remove_actor(second_id).is_none());
        assert_eq!(level.actors().len(), 1);
    }

    #[test]
    fn test_no_more_actors_by_kind() {
        let level = Level::new(open_grid(4, 4), vec![coin(0.0, 0.0)]);
        assert!(!level.no_more_actors(ActorKind::Coin));
        assert!(level.no_more_actors(ActorKind::Fireball));
        assert!(level.no_more_actors(ActorKind::Player));
    }

    #[test]
    fn test_win_after_last_coin() {
        let (first, second) = (coin(0.0, 0.0), coin(2.0, 2.0));
        let (first_id, second_id) = (first.id(), second.id());
        let mut level = Level::new(open_grid(4, 4), vec![first, second]);

        level.player_touched(TouchKind::Coin, Some(first_id));
        assert_eq!(level.status(), LevelStatus::InProgress);
        assert!(level.actor(first_id).is_none());

        level.player_touched(TouchKind::Coin, Some(second_id));
        assert_eq!(level.status(), LevelStatus::Won);
        assert!(level.actors().is_empty());
    }

    #[test]
    fn test_lost_is_sticky() {
        let c = coin(0.0, 0.0);
        let id = c.id();
        let mut level = Level::new(open_grid(4, 4), vec![c]);

        level.player_touched(TouchKind::Lava, None);
        assert_eq!(level.status(), LevelStatus::Lost);

        level.player_touched(TouchKind::Coin, Some(id));
        assert_eq!(level.status(), LevelStatus::Lost);
        assert!(level.actor(id).is_some());
    }

    #[test]
    fn test_won_is_sticky() {
        let c = coin(0.0, 0.0);
        let id = c.id();
        let mut level = Level::new(open_grid(4, 4), vec![c]);

        level.player_touched(TouchKind::Coin, Some(id));
        assert_eq!(level.status(), LevelStatus::Won);

        level.player_touched(TouchKind::Lava, None);
        level.player_touched(TouchKind::Fireball, None);
        assert_eq!(level.status(), LevelStatus::Won);
    }

    #[test]
    fn test_fireball_touch_loses() {
        let mut level = Level::new(open_grid(4, 4), Vec::new());
        level.player_touched(TouchKind::Fireball, None);
        assert_eq!(level.status(), LevelStatus::Lost);
    }

    #[test]
    fn test_other_touches_do_nothing() {
        let c = coin(0.0, 0.0);
        let id = c.id();
        let mut level = Level::new(open_grid(4, 4), vec![c]);
        level.player_touched(TouchKind::Wall, None);
        level.player_touched(TouchKind::Actor, Some(id));
        level.player_touched(TouchKind::Player, None);
        // Coin touch without an actor to collect
        level.player_touched(TouchKind::Coin, None);
        assert_eq!(level.status(), LevelStatus::InProgress);
        assert_eq!(level.actors().len(), 1);
    }

    #[test]
    fn test_finish_delay_counts_down_after_outcome() {
        let mut level = Level::new(open_grid(2, 2), Vec::new());
        level.advance_finish(5.0);
        assert_eq!(level.finish_delay(), 1.0);
        assert!(!level.is_finished());

        level.player_touched(TouchKind::Lava, None);
        assert!(!level.is_finished());
        level.advance_finish(0.6);
        assert!(!level.is_finished());
        level.advance_finish(0.6);
        assert!(level.is_finished());
    }

    #[test]
    fn test_spawn_allocates_fresh_ids() {
        let mut rng = Pcg32::seed_from_u64(3);
        let existing = coin(0.0, 0.0);
        let existing_id = existing.id();
        let mut level = Level::new(open_grid(4, 4), vec![existing]);

        let player = level
            .spawn(ActorTemplate::Player, Vector::new(1.0, 2.0), &mut rng)
            .unwrap();
        let other = level
            .spawn(ActorTemplate::Coin, Vector::new(2.0, 2.0), &mut rng)
            .unwrap();
        assert_ne!(player, existing_id);
        assert_ne!(other, existing_id);
        assert_ne!(player, other);
        assert_eq!(level.player().map(|p| p.pos), Some(Vector::new(1.0, 1.5)));
        assert_eq!(level.player().map(Actor::id), Some(player));

        let err = level.spawn(ActorTemplate::Coin, Vector::new(f32::NAN, 0.0), &mut rng);
        assert!(err.is_err());
        assert_eq!(level.actors().len(), 3);
    }

    #[test]
    fn test_act_all_moves_fireballs() {
        let horizontal = Actor::horizontal_fireball(Vector::new(0.0, 0.0));
        let vertical = Actor::vertical_fireball(Vector::new(3.0, 0.0));
        let (h_id, v_id) = (horizontal.id(), vertical.id());
        let mut level = Level::new(open_grid(4, 4), vec![horizontal, vertical]);
        level.act_all(0.5);
        assert_eq!(level.actor(h_id).map(|a| a.pos), Some(Vector::new(1.0, 0.0)));
        assert_eq!(level.actor(v_id).map(|a| a.pos), Some(Vector::new(3.0, 1.0)));
    }
}
