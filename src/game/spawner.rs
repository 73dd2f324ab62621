use super::effects::PowerUpKind;
use super::food::{Food, FoodSet, ScoreTier};
use super::grid::Grid;
use super::snake::Snake;
use crate::consts;
use enum_map::Enum;
use rand::Rng;

/// Places food on the grid by rejection sampling, drawing from an injected
/// random number generator.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Spawner<R> {
    rng: R,
}

impl<R: Rng> Spawner<R> {
    pub(crate) fn new(rng: R) -> Spawner<R> {
        Spawner { rng }
    }

    /// Draw random candidate items until one lands on a cell occupied by
    /// neither the snake nor any item in `foods`.  Returns `None` if
    /// [`MAX_PLACEMENT_ATTEMPTS`][consts::MAX_PLACEMENT_ATTEMPTS] candidates
    /// are all rejected.
    pub(crate) fn place_item(&mut self, grid: Grid, snake: &Snake, foods: &FoodSet) -> Option<Food> {
        for _ in 0..consts::MAX_PLACEMENT_ATTEMPTS {
            let candidate = self.candidate(grid);
            if !snake.occupies(candidate.position) && !foods.occupies(candidate.position) {
                tracing::debug!(?candidate, "placed food");
                return Some(candidate);
            }
        }
        tracing::debug!(
            attempts = consts::MAX_PLACEMENT_ATTEMPTS,
            "no free cell found; skipping food placement"
        );
        None
    }

    /// Place items until `foods` is full or a placement is skipped.  Returns
    /// the number of items added.
    pub(crate) fn fill_to_capacity(
        &mut self,
        grid: Grid,
        snake: &Snake,
        foods: &mut FoodSet,
    ) -> usize {
        let mut placed = 0;
        while !foods.is_full() {
            let Some(food) = self.place_item(grid, snake, foods) else {
                break;
            };
            if foods.insert(food) {
                placed += 1;
            }
        }
        placed
    }

    fn candidate(&mut self, grid: Grid) -> Food {
        if self.rng.random_bool(consts::POWER_UP_PROBABILITY) {
            let kind = PowerUpKind::from_usize(self.rng.random_range(0..PowerUpKind::LENGTH));
            Food::power_up(grid.random_position(&mut self.rng), kind)
        } else {
            let tier = ScoreTier::from_usize(self.rng.random_range(0..ScoreTier::LENGTH));
            Food::score(grid.random_position(&mut self.rng), tier)
        }
    }
}
