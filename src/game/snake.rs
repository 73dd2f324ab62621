use super::direction::Direction;
use super::grid::Grid;
use crate::consts;
use ratatui::layout::Position;
use std::collections::VecDeque;

/// The snake: a head plus a body trailing behind it.
///
/// The segments, read from [`Snake::segments()`], run from the head to the
/// tail.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    /// The position of the snake's head
    head: Position,

    /// The positions of the cells in the snake's body, starting with the cell
    /// right behind the head and ending with the tail
    body: VecDeque<Position>,

    /// The direction applied on the most recent tick
    direction: Direction,

    /// The direction that the next tick will apply
    pending: Direction,
}

impl Snake {
    /// Create a snake whose head is `head` followed by the cells of `body`,
    /// facing (and about to move) in `direction`.
    pub(crate) fn new<I>(head: Position, body: I, direction: Direction) -> Snake
    where
        I: IntoIterator<Item = Position>,
    {
        Snake {
            head,
            body: body.into_iter().collect(),
            direction,
            pending: direction,
        }
    }

    /// Create the snake for the start of a game on `grid`
    pub(crate) fn spawn(grid: Grid) -> Snake {
        let (segments, direction) = grid.snake_start();
        let mut segments = segments.into_iter();
        let head = segments.next().unwrap_or_default();
        Snake::new(head, segments, direction)
    }

    /// Return the position of the snake's head
    pub(crate) fn head(&self) -> Position {
        self.head
    }

    /// Return the position of the snake's last segment
    pub(crate) fn tail(&self) -> Position {
        self.body.back().copied().unwrap_or(self.head)
    }

    /// Return the glyph to use for drawing the snake's head
    pub(crate) fn head_symbol(&self) -> char {
        match self.direction {
            Direction::North => consts::SNAKE_HEAD_NORTH_SYMBOL,
            Direction::South => consts::SNAKE_HEAD_SOUTH_SYMBOL,
            Direction::East => consts::SNAKE_HEAD_EAST_SYMBOL,
            Direction::West => consts::SNAKE_HEAD_WEST_SYMBOL,
        }
    }

    /// Return the positions of the cells in the snake's body (everything but
    /// the head)
    pub(crate) fn body(&self) -> &VecDeque<Position> {
        &self.body
    }

    /// Iterate over all segments from head to tail
    pub(crate) fn segments(&self) -> impl Iterator<Item = Position> + '_ {
        std::iter::once(self.head).chain(self.body.iter().copied())
    }

    pub(crate) fn len(&self) -> usize {
        self.body.len() + 1
    }

    /// Does any segment of the snake occupy `pos`?
    pub(crate) fn occupies(&self, pos: Position) -> bool {
        self.segments().any(|p| p == pos)
    }

    pub(crate) fn direction(&self) -> Direction {
        self.direction
    }

    pub(crate) fn pending(&self) -> Direction {
        self.pending
    }

    /// Queue `direction` for the next tick.  Later calls before the next tick
    /// overwrite earlier ones.  A direction that exactly reverses the one
    /// applied on the last tick is ignored, and `false` is returned.
    pub(crate) fn turn(&mut self, direction: Direction) -> bool {
        if direction == self.direction.reverse() {
            return false;
        }
        self.pending = direction;
        true
    }

    /// Set both the current and the pending direction, bypassing the reversal
    /// check.  Used for the input that starts a game.
    pub(crate) fn face(&mut self, direction: Direction) {
        self.direction = direction;
        self.pending = direction;
    }

    /// Apply the pending direction
    pub(crate) fn commit_direction(&mut self) {
        self.direction = self.pending;
    }

    /// Return the cell the head would move into on this tick, or `None` if
    /// that cell is off the grid
    pub(crate) fn next_head(&self, grid: Grid) -> Option<Position> {
        self.direction.advance(self.head, grid)
    }

    /// Make `pos` the new head; the old head becomes the first body segment.
    pub(crate) fn push_head(&mut self, pos: Position) {
        self.body.push_front(self.head);
        self.head = pos;
    }

    /// Remove the last segment and return where it was.  The head is never
    /// removed.
    pub(crate) fn drop_tail(&mut self) -> Position {
        self.body.pop_back().unwrap_or(self.head)
    }

    /// Lengthen the snake by `extra` segments stacked on `cell`
    pub(crate) fn grow(&mut self, cell: Position, extra: usize) {
        self.body.extend(std::iter::repeat_n(cell, extra));
    }
}
