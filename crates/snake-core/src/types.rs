//! Core type definitions for the simulation.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cell coordinate on the grid. `row` is the first index, `col` the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Offset this position by a heading vector
    pub fn offset(&self, heading: Heading) -> Self {
        Self {
            row: self.row + heading.d_row,
            col: self.col + heading.d_col,
        }
    }

    /// Check if position lies inside an `size x size` grid
    pub fn in_bounds(&self, size: usize) -> bool {
        let size = size as i32;
        self.row >= 0 && self.row < size && self.col >= 0 && self.col < size
    }

    /// Euclidean distance to another position
    pub fn euclidean_distance(&self, other: &Position) -> f64 {
        let d_row = (self.row - other.row) as i64;
        let d_col = (self.col - other.col) as i64;
        ((d_row * d_row + d_col * d_col) as f64).sqrt()
    }

    /// Vector from `other` to `self`
    pub fn delta_from(&self, other: &Position) -> Heading {
        Heading::new(self.row - other.row, self.col - other.col)
    }

    /// True if the two positions are one axis-aligned step apart
    pub fn is_adjacent(&self, other: &Position) -> bool {
        (self.row - other.row).abs() + (self.col - other.col).abs() == 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Movement direction, derived from the last two body cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Heading {
    pub d_row: i32,
    pub d_col: i32,
}

impl Heading {
    pub fn new(d_row: i32, d_col: i32) -> Self {
        Self { d_row, d_col }
    }

    /// Rotate by -90 degrees: `(h.y, -h.x)`
    pub fn turn_right(&self) -> Self {
        Self::new(self.d_col, -self.d_row)
    }

    /// Rotate by +90 degrees: `(-h.y, h.x)`
    pub fn turn_left(&self) -> Self {
        Self::new(-self.d_col, self.d_row)
    }

    /// Heading after applying a relative action
    pub fn apply(&self, action: Action) -> Self {
        match action {
            Action::Left => self.turn_left(),
            Action::Straight => *self,
            Action::Right => self.turn_right(),
        }
    }

    pub fn is_unit(&self) -> bool {
        self.d_row.abs() + self.d_col.abs() == 1
    }
}

/// Content of one grid cell. The discriminants are the observation codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum CellState {
    Empty = 0,
    Body = 1,
    Wall = 2,
    Food = 3,
}

impl CellState {
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Relative steering action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Left,
    Straight,
    Right,
}

impl Action {
    pub const COUNT: usize = 3;

    /// Create action from a policy output index
    pub fn from_index(index: i64) -> Result<Self> {
        match index {
            0 => Ok(Action::Left),
            1 => Ok(Action::Straight),
            2 => Ok(Action::Right),
            other => Err(Error::InvalidAction(other)),
        }
    }

    pub fn index(self) -> i64 {
        match self {
            Action::Left => 0,
            Action::Straight => 1,
            Action::Right => 2,
        }
    }

    pub fn all() -> [Action; 3] {
        [Action::Left, Action::Straight, Action::Right]
    }
}

impl TryFrom<i64> for Action {
    type Error = Error;

    fn try_from(index: i64) -> Result<Self> {
        Action::from_index(index)
    }
}

/// Why an episode ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerminationCause {
    /// New head left the grid bounds
    BoundaryExit,
    /// New head hit the wall ring
    WallCollision,
    /// New head hit the body chain
    SelfCollision,
    /// Food was eaten and no empty cell remained for respawn
    GridFull,
    /// Too many ticks since the last food
    Starvation,
}

impl TerminationCause {
    pub fn as_str(&self) -> &'static str {
        match self {
            TerminationCause::BoundaryExit => "boundary_exit",
            TerminationCause::WallCollision => "wall_collision",
            TerminationCause::SelfCollision => "self_collision",
            TerminationCause::GridFull => "grid_full",
            TerminationCause::Starvation => "starvation",
        }
    }

    /// Causes that carry the wall-hit penalty
    pub fn is_collision(&self) -> bool {
        matches!(
            self,
            TerminationCause::BoundaryExit
                | TerminationCause::WallCollision
                | TerminationCause::SelfCollision
        )
    }
}

impl fmt::Display for TerminationCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation() {
        let east = Heading::new(0, 1);
        assert_eq!(east.turn_right(), Heading::new(1, 0));
        assert_eq!(east.turn_left(), Heading::new(-1, 0));
        assert_eq!(east.apply(Action::Straight), east);

        // four turns in either direction come back around
        let mut h = east;
        for _ in 0..4 {
            h = h.turn_left();
        }
        assert_eq!(h, east);
        assert_eq!(east.turn_left().turn_right(), east);
    }

    #[test]
    fn test_euclidean_distance() {
        let a = Position::new(0, 0);
        let b = Position::new(3, 4);
        assert_eq!(a.euclidean_distance(&b), 5.0);
        assert!((Position::new(4, 4).euclidean_distance(&Position::new(3, 3)) - 2f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_delta_and_adjacency() {
        let tail = Position::new(4, 3);
        let head = Position::new(4, 4);
        assert_eq!(head.delta_from(&tail), Heading::new(0, 1));
        assert!(head.is_adjacent(&tail));
        assert!(!head.is_adjacent(&Position::new(5, 5)));
        assert!(!head.is_adjacent(&head));
    }

    #[test]
    fn test_in_bounds() {
        assert!(Position::new(0, 0).in_bounds(5));
        assert!(Position::new(4, 4).in_bounds(5));
        assert!(!Position::new(5, 0).in_bounds(5));
        assert!(!Position::new(0, -1).in_bounds(5));
    }

    #[test]
    fn test_action_from_index() {
        assert_eq!(Action::from_index(0).unwrap(), Action::Left);
        assert_eq!(Action::from_index(1).unwrap(), Action::Straight);
        assert_eq!(Action::from_index(2).unwrap(), Action::Right);
        assert!(matches!(Action::from_index(3), Err(Error::InvalidAction(3))));
        assert!(matches!(Action::try_from(-1), Err(Error::InvalidAction(-1))));

        for action in Action::all() {
            assert_eq!(Action::from_index(action.index()).unwrap(), action);
        }
    }

    #[test]
    fn test_cell_codes() {
        assert_eq!(CellState::Empty.code(), 0);
        assert_eq!(CellState::Body.code(), 1);
        assert_eq!(CellState::Wall.code(), 2);
        assert_eq!(CellState::Food.code(), 3);
    }
}
