use super::direction::Direction;
use crate::consts;
use rand::Rng;
use ratatui::layout::Position;

/// The square playing field.  Valid positions have both coordinates in
/// `0..size`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Grid {
    size: u16,
}

impl Grid {
    pub(crate) fn new(size: u16) -> Grid {
        Grid { size }
    }

    pub(crate) fn size(self) -> u16 {
        self.size
    }

    pub(crate) fn contains(self, pos: Position) -> bool {
        pos.x < self.size && pos.y < self.size
    }

    /// Draw a uniformly random cell of the grid
    pub(crate) fn random_position<R: Rng>(self, rng: &mut R) -> Position {
        Position::new(
            rng.random_range(0..self.size),
            rng.random_range(0..self.size),
        )
    }

    /// Return the segments of a freshly-spawned snake: head in the middle of
    /// the grid, body trailing off to the west, facing east.
    pub(crate) fn snake_start(self) -> (Vec<Position>, Direction) {
        let head = Position::new(self.size / 2, self.size / 2);
        let segments = (0..consts::INITIAL_SNAKE_LENGTH)
            .map(|i| Position::new(head.x.saturating_sub(i), head.y))
            .collect();
        (segments, Direction::East)
    }
}

impl Default for Grid {
    fn default() -> Grid {
        Grid::new(consts::DEFAULT_GRID_SIZE)
    }
}
