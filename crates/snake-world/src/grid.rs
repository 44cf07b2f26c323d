//! 2D bounded grid with a permanent wall ring.

use serde::{Deserialize, Serialize};
use snake_core::{CellState, Position};

/// A square grid of cell states, stored row-major
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    size: usize,
    cells: Vec<CellState>,
}

impl Grid {
    /// Create an empty grid whose outermost ring is `Wall`
    pub fn new(size: usize) -> Self {
        let mut grid = Self {
            size,
            cells: vec![CellState::Empty; size * size],
        };

        for i in 0..size as i32 {
            let last = size as i32 - 1;
            grid.set(Position::new(0, i), CellState::Wall);
            grid.set(Position::new(last, i), CellState::Wall);
            grid.set(Position::new(i, 0), CellState::Wall);
            grid.set(Position::new(i, last), CellState::Wall);
        }

        grid
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Get cell at position, `None` outside the grid
    pub fn get(&self, pos: Position) -> Option<CellState> {
        if pos.in_bounds(self.size) {
            Some(self.cells[self.pos_to_index(pos)])
        } else {
            None
        }
    }

    /// Set cell at position. The position must be inside the grid.
    pub fn set(&mut self, pos: Position, state: CellState) {
        debug_assert!(pos.in_bounds(self.size), "{} outside {}x{} grid", pos, self.size, self.size);
        let index = self.pos_to_index(pos);
        self.cells[index] = state;
    }

    /// True for cells on the outermost ring
    pub fn is_border(&self, pos: Position) -> bool {
        let last = self.size as i32 - 1;
        pos.in_bounds(self.size)
            && (pos.row == 0 || pos.col == 0 || pos.row == last || pos.col == last)
    }

    /// Number of cells in the given state
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&cell| cell == state).count()
    }

    /// All empty cells in row-major order
    pub fn empty_cells(&self) -> Vec<Position> {
        self.iter()
            .filter(|(_, cell)| *cell == CellState::Empty)
            .map(|(pos, _)| pos)
            .collect()
    }

    /// Flattened copy of the cell codes
    pub fn to_codes(&self) -> Vec<u8> {
        self.cells.iter().map(|cell| cell.code()).collect()
    }

    fn pos_to_index(&self, pos: Position) -> usize {
        pos.row as usize * self.size + pos.col as usize
    }

    /// Get position from index
    pub fn index_to_pos(&self, index: usize) -> Position {
        let row = (index / self.size) as i32;
        let col = (index % self.size) as i32;
        Position::new(row, col)
    }

    /// Iterator over all cells with positions
    pub fn iter(&self) -> impl Iterator<Item = (Position, CellState)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (self.index_to_pos(i), *cell))
    }
}
