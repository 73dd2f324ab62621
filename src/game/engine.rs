use super::effects::{EffectManager, PowerUpKind};
use super::food::{FoodKind, FoodSet};
use super::grid::Grid;
use super::snake::Snake;
use super::spawner::Spawner;
use rand::Rng;
use std::time::Instant;
use tracing::{debug, info};

/// What a single tick did to the game
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum TickOutcome {
    /// The snake moved (or was frozen in place by invincibility) without
    /// eating anything
    Continued,

    /// The snake ate something worth this many points
    Scored(u32),

    /// The snake hit a wall or itself
    Ended,
}

/// The outcome of a tick plus the expiry the session needs to react to
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct TickReport {
    pub(crate) outcome: TickOutcome,

    /// The power-up that expired at the start of the tick, if any
    pub(crate) expired: Option<PowerUpKind>,
}

/// Everything on the grid: the snake, the food, the active power-up, and the
/// score
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct World<R> {
    pub(super) grid: Grid,
    pub(super) snake: Snake,
    pub(super) foods: FoodSet,
    pub(super) effects: EffectManager,
    pub(super) score: u32,
    spawner: Spawner<R>,
}

impl<R: Rng> World<R> {
    pub(crate) fn new(grid: Grid, rng: R) -> World<R> {
        let mut world = World {
            grid,
            snake: Snake::spawn(grid),
            foods: FoodSet::default(),
            effects: EffectManager::default(),
            score: 0,
            spawner: Spawner::new(rng),
        };
        world.refill();
        world
    }

    /// Put the snake, food, effects, and score back to their starting values
    pub(crate) fn reset(&mut self) {
        self.snake = Snake::spawn(self.grid);
        self.foods.clear();
        self.effects = EffectManager::default();
        self.score = 0;
        self.refill();
    }

    /// Advance the game by one step as of `now`.
    ///
    /// The active effect is expired before anything moves, so a tick that
    /// lands just after an Invincible effect ends is already vulnerable.  A
    /// collision while invincible leaves the snake and the food where they
    /// were; the flash still runs out on its own clock.
    pub(crate) fn advance(&mut self, now: Instant) -> TickReport {
        let expired = self.effects.expire_effect(now);
        if let Some(kind) = expired {
            info!(?kind, "power-up expired");
        }
        self.snake.commit_direction();
        let head = match self.snake.next_head(self.grid) {
            Some(pos) if !self.snake.occupies(pos) => pos,
            next => {
                let cause = if next.is_some() { "self" } else { "wall" };
                let outcome = if self.effects.is_invincible() {
                    debug!(cause, "collision absorbed by invincibility");
                    let _ = self.effects.expire_flash(now);
                    TickOutcome::Continued
                } else {
                    info!(cause, score = self.score, "snake collided");
                    TickOutcome::Ended
                };
                return TickReport { outcome, expired };
            }
        };
        self.snake.push_head(head);
        let tail = self.snake.drop_tail();
        let mut outcome = TickOutcome::Continued;
        if let Some(food) = self.foods.take(head) {
            let points = food.kind.points();
            self.score = self.score.saturating_add(points);
            match food.kind {
                FoodKind::Score(_) => self.snake.grow(tail, food.kind.extra_growth()),
                FoodKind::PowerUp(kind) => {
                    self.effects.activate(kind, now);
                    info!(?kind, "power-up activated");
                }
            }
            debug!(points, score = self.score, "food eaten");
            self.refill();
            outcome = TickOutcome::Scored(points);
        }
        let _ = self.effects.expire_flash(now);
        TickReport { outcome, expired }
    }

    fn refill(&mut self) {
        let _ = self
            .spawner
            .fill_to_capacity(self.grid, &self.snake, &mut self.foods);
    }
}

impl<R> World<R> {
    pub(crate) fn grid(&self) -> Grid {
        self.grid
    }

    pub(crate) fn snake(&self) -> &Snake {
        &self.snake
    }

    pub(crate) fn snake_mut(&mut self) -> &mut Snake {
        &mut self.snake
    }

    pub(crate) fn foods(&self) -> &FoodSet {
        &self.foods
    }

    pub(crate) fn effects(&self) -> &EffectManager {
        &self.effects
    }

    pub(crate) fn score(&self) -> u32 {
        self.score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts;
    use crate::game::direction::Direction;
    use crate::game::food::{Food, ScoreTier};
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use ratatui::layout::Position;
    use std::time::Duration;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn world() -> World<ChaCha12Rng> {
        World::new(Grid::default(), ChaCha12Rng::seed_from_u64(RNG_SEED))
    }

    /// A world with the standard starting snake and exactly one item of food
    fn world_with_food(food: Food) -> World<ChaCha12Rng> {
        let mut w = world();
        w.foods.clear();
        assert!(w.foods.insert(food));
        w
    }

    fn segments(w: &World<ChaCha12Rng>) -> Vec<Position> {
        w.snake.segments().collect()
    }

    #[test]
    fn new_world_is_stocked() {
        let w = world();
        assert_eq!(w.foods.len(), consts::MAX_FOODS);
        assert_eq!(w.score, 0);
        assert_eq!(w.snake.len(), 3);
    }

    #[test]
    fn eat_one_point_food() {
        let mut w = world_with_food(Food::score(Position::new(11, 10), ScoreTier::Red));
        let report = w.advance(Instant::now());
        assert_eq!(report.outcome, TickOutcome::Scored(1));
        assert_eq!(w.score, 1);
        assert_eq!(
            segments(&w),
            [
                Position::new(11, 10),
                Position::new(10, 10),
                Position::new(9, 10)
            ]
        );
    }

    #[test]
    fn eat_three_point_food() {
        let mut w = world_with_food(Food::score(Position::new(11, 10), ScoreTier::Green));
        let report = w.advance(Instant::now());
        assert_eq!(report.outcome, TickOutcome::Scored(3));
        assert_eq!(w.score, 3);
        assert_eq!(
            segments(&w),
            [
                Position::new(11, 10),
                Position::new(10, 10),
                Position::new(9, 10),
                Position::new(8, 10),
                Position::new(8, 10),
            ]
        );
    }

    #[test]
    fn eating_refills_food() {
        let mut w = world_with_food(Food::score(Position::new(11, 10), ScoreTier::Blue));
        let _ = w.advance(Instant::now());
        assert_eq!(w.foods.len(), consts::MAX_FOODS);
        assert!(w.foods.iter().all(|f| !w.snake.occupies(f.position)));
    }

    #[test]
    fn plain_move_keeps_length() {
        let mut w = world_with_food(Food::score(Position::new(0, 0), ScoreTier::Red));
        let report = w.advance(Instant::now());
        assert_eq!(report.outcome, TickOutcome::Continued);
        assert_eq!(w.snake.len(), 3);
        assert_eq!(w.snake.head(), Position::new(11, 10));
        assert_eq!(w.foods.len(), 1);
    }

    #[test]
    fn pending_direction_is_committed() {
        let mut w = world_with_food(Food::score(Position::new(0, 0), ScoreTier::Red));
        assert!(w.snake.turn(Direction::North));
        let _ = w.advance(Instant::now());
        assert_eq!(w.snake.direction(), Direction::North);
        assert_eq!(w.snake.head(), Position::new(10, 9));
    }

    fn at_west_wall(w: &mut World<ChaCha12Rng>) {
        w.snake = Snake::new(
            Position::new(0, 5),
            [Position::new(1, 5), Position::new(2, 5)],
            Direction::West,
        );
    }

    #[test]
    fn wall_collision_ends() {
        let mut w = world();
        at_west_wall(&mut w);
        let report = w.advance(Instant::now());
        assert_eq!(report.outcome, TickOutcome::Ended);
    }

    #[test]
    fn wall_collision_while_invincible_freezes() {
        let now = Instant::now();
        let mut w = world();
        at_west_wall(&mut w);
        w.effects.activate(PowerUpKind::Invincible, now);
        let before = w.snake.clone();
        let report = w.advance(now + Duration::from_millis(100));
        assert_eq!(report.outcome, TickOutcome::Continued);
        assert_eq!(w.snake, before);
    }

    #[test]
    fn flash_ends_while_frozen() {
        let now = Instant::now();
        let mut w = world();
        at_west_wall(&mut w);
        w.effects.activate(PowerUpKind::Invincible, now);
        let report = w.advance(now + Duration::from_millis(2000));
        assert_eq!(report.outcome, TickOutcome::Continued);
        assert!(!w.effects.flash().is_active());
        assert!(w.effects.is_invincible());
    }

    #[test]
    fn invincibility_expires_before_movement() {
        let now = Instant::now();
        let mut w = world();
        at_west_wall(&mut w);
        w.effects.activate(PowerUpKind::Invincible, now);
        let report = w.advance(now + Duration::from_millis(3001));
        assert_eq!(report.expired, Some(PowerUpKind::Invincible));
        assert_eq!(report.outcome, TickOutcome::Ended);
    }

    fn coiled() -> Snake {
        // Head at (5,5) facing north, about to bite (5,4)
        Snake::new(
            Position::new(5, 5),
            [
                Position::new(6, 5),
                Position::new(6, 4),
                Position::new(5, 4),
                Position::new(4, 4),
            ],
            Direction::North,
        )
    }

    #[test]
    fn self_collision_ends() {
        let mut w = world();
        w.snake = coiled();
        assert_eq!(w.advance(Instant::now()).outcome, TickOutcome::Ended);
    }

    #[test]
    fn self_collision_while_invincible_freezes() {
        let now = Instant::now();
        let mut w = world();
        w.snake = coiled();
        w.effects.activate(PowerUpKind::Invincible, now);
        let report = w.advance(now);
        assert_eq!(report.outcome, TickOutcome::Continued);
        assert_eq!(w.snake.head(), Position::new(5, 5));
    }

    #[test]
    fn moving_into_current_tail_collides() {
        let mut w = world();
        w.snake = Snake::new(
            Position::new(5, 5),
            [
                Position::new(6, 5),
                Position::new(6, 4),
                Position::new(5, 4),
            ],
            Direction::North,
        );
        assert_eq!(w.advance(Instant::now()).outcome, TickOutcome::Ended);
    }

    #[test]
    fn eat_power_up() {
        let now = Instant::now();
        let mut w = world_with_food(Food::power_up(Position::new(11, 10), PowerUpKind::Slow));
        let report = w.advance(now);
        assert_eq!(report.outcome, TickOutcome::Scored(5));
        assert_eq!(w.score, 5);
        assert_eq!(w.snake.len(), 3);
        assert_eq!(w.effects.active_kind(), Some(PowerUpKind::Slow));
        assert!(w.effects.flash().is_active());
    }

    #[test]
    fn new_power_up_replaces_old() {
        let now = Instant::now();
        let mut w = world_with_food(Food::power_up(Position::new(11, 10), PowerUpKind::Speed));
        w.effects.activate(PowerUpKind::Invincible, now);
        let _ = w.advance(now + Duration::from_millis(10));
        assert_eq!(w.effects.active_kind(), Some(PowerUpKind::Speed));
    }

    #[test]
    fn flash_expires_during_tick() {
        let now = Instant::now();
        let mut w = world_with_food(Food::score(Position::new(0, 0), ScoreTier::Red));
        w.effects.activate(PowerUpKind::Slow, now);
        let _ = w.advance(now + Duration::from_millis(1501));
        assert!(!w.effects.flash().is_active());
        assert_eq!(w.effects.active_kind(), Some(PowerUpKind::Slow));
    }

    #[test]
    fn reset_restores_start() {
        let mut w = world_with_food(Food::score(Position::new(11, 10), ScoreTier::Green));
        w.effects.activate(PowerUpKind::Speed, Instant::now());
        let _ = w.advance(Instant::now());
        w.reset();
        assert_eq!(w.score, 0);
        assert_eq!(w.snake, Snake::spawn(w.grid));
        assert_eq!(w.effects, EffectManager::default());
        assert_eq!(w.foods.len(), consts::MAX_FOODS);
    }

    /// Check that no two segments share a cell, other than the copies of the
    /// tail left behind by growth
    fn assert_distinct_but_tail(snake: &Snake) {
        let mut cells = segments_of(snake);
        let tail = snake.tail();
        while cells.len() > 1 && cells[cells.len() - 2] == tail {
            let _ = cells.pop();
        }
        for (i, a) in cells.iter().enumerate() {
            assert!(
                cells.iter().skip(i + 1).all(|b| b != a),
                "segment {a:?} repeated in {cells:?}"
            );
        }
    }

    fn segments_of(snake: &Snake) -> Vec<Position> {
        snake.segments().collect()
    }

    #[test]
    fn duplicate_tail_is_tolerated_only_at_the_end() {
        let mut w = world_with_food(Food::score(Position::new(11, 10), ScoreTier::Green));
        let _ = w.advance(Instant::now());
        assert_distinct_but_tail(&w.snake);
    }

    #[test]
    #[should_panic(expected = "repeated")]
    fn repeated_body_segment_is_caught() {
        let snake = Snake::new(
            Position::new(5, 5),
            [
                Position::new(5, 6),
                Position::new(5, 7),
                Position::new(5, 6),
                Position::new(5, 8),
            ],
            Direction::North,
        );
        assert_distinct_but_tail(&snake);
    }

    #[test]
    fn random_walk_invariants() {
        let mut w = world();
        let mut steer = ChaCha12Rng::seed_from_u64(42);
        let mut now = Instant::now();
        let directions = [
            Direction::North,
            Direction::East,
            Direction::South,
            Direction::West,
        ];
        for _ in 0..2000 {
            let _ = w.snake.turn(directions[steer.random_range(0..4)]);
            let before = w.snake.len();
            let eaten = w.foods.iter().find_map(|f| {
                let next = w.snake.pending().advance(w.snake.head(), w.grid)?;
                (next == f.position).then_some(f.kind)
            });
            now += Duration::from_millis(100);
            let report = w.advance(now);
            match report.outcome {
                TickOutcome::Ended => {
                    w.reset();
                    continue;
                }
                TickOutcome::Scored(points) => {
                    let kind = eaten.expect("scoring tick should have eaten the food ahead");
                    assert_eq!(points, kind.points());
                    assert_eq!(w.snake.len(), before + kind.extra_growth());
                }
                TickOutcome::Continued => assert_eq!(w.snake.len(), before),
            }
            assert!(!w.snake.body().contains(&w.snake.head()));
            assert_distinct_but_tail(&w.snake);
            assert!(w.foods.len() <= consts::MAX_FOODS);
            for (i, food) in w.foods.iter().enumerate() {
                assert!(!w.snake.occupies(food.position));
                assert!(w
                    .foods
                    .iter()
                    .skip(i + 1)
                    .all(|other| other.position != food.position));
            }
        }
    }
}
