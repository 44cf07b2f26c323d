//! Read-only views of a grid for display.

use crate::grid::Grid;
use snake_core::CellState;

/// RGB triple for a cell state
pub fn cell_color(state: CellState) -> [u8; 3] {
    match state {
        CellState::Empty => [255, 255, 255],
        CellState::Wall => [0, 0, 0],
        CellState::Body => [255, 196, 0],
        CellState::Food => [30, 47, 135],
    }
}

fn cell_glyph(state: CellState) -> char {
    match state {
        CellState::Empty => '.',
        CellState::Body => 'o',
        CellState::Wall => '#',
        CellState::Food => '*',
    }
}

/// `N x N x 3` row-major RGB bytes
pub fn render_rgb(grid: &Grid) -> Vec<u8> {
    let mut image = Vec::with_capacity(grid.size() * grid.size() * 3);
    for (_, cell) in grid.iter() {
        image.extend_from_slice(&cell_color(cell));
    }
    image
}

/// One line per row, one glyph per cell
pub fn render_text(grid: &Grid) -> String {
    let size = grid.size();
    let mut out = String::with_capacity(size * (size + 1));
    for (pos, cell) in grid.iter() {
        out.push(cell_glyph(cell));
        if pos.col as usize == size - 1 {
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use snake_core::Position;

    #[test]
    fn test_render_rgb() {
        let mut grid = Grid::new(4);
        grid.set(Position::new(1, 1), CellState::Body);
        grid.set(Position::new(2, 2), CellState::Food);

        let image = render_rgb(&grid);
        assert_eq!(image.len(), 4 * 4 * 3);

        let pixel = |row: usize, col: usize| {
            let i = (row * 4 + col) * 3;
            [image[i], image[i + 1], image[i + 2]]
        };
        assert_eq!(pixel(0, 0), [0, 0, 0]);
        assert_eq!(pixel(1, 1), [255, 196, 0]);
        assert_eq!(pixel(1, 2), [255, 255, 255]);
        assert_eq!(pixel(2, 2), [30, 47, 135]);
    }

    #[test]
    fn test_render_text() {
        let mut grid = Grid::new(4);
        grid.set(Position::new(1, 2), CellState::Body);
        grid.set(Position::new(2, 1), CellState::Food);

        assert_eq!(render_text(&grid), "####\n#.o#\n#*.#\n####\n");
    }
}
