//! Body chain of the snake.
//!
//! Cells are stored tail first, head last. The chain never drops below two
//! cells, so a heading can always be derived from its last two entries.

use serde::{Deserialize, Serialize};
use snake_core::{Heading, Position};
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyChain {
    cells: VecDeque<Position>,
}

impl BodyChain {
    /// Build a chain from tail-first cells. Callers validate the layout first.
    pub fn new(cells: impl IntoIterator<Item = Position>) -> Self {
        let cells: VecDeque<Position> = cells.into_iter().collect();
        debug_assert!(cells.len() >= 2, "body chain needs at least 2 cells");
        Self { cells }
    }

    pub fn head(&self) -> Position {
        self.cells[self.cells.len() - 1]
    }

    pub fn tail(&self) -> Position {
        self.cells[0]
    }

    /// Vector from the second-to-last cell to the head
    pub fn heading(&self) -> Heading {
        let neck = self.cells[self.cells.len() - 2];
        self.head().delta_from(&neck)
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Append a new head
    pub fn push_head(&mut self, pos: Position) {
        self.cells.push_back(pos);
    }

    /// Remove and return the tail. Only called right after `push_head`.
    pub fn pop_tail(&mut self) -> Option<Position> {
        self.cells.pop_front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Position> + '_ {
        self.cells.iter()
    }

    pub fn to_vec(&self) -> Vec<Position> {
        self.cells.iter().copied().collect()
    }
}
