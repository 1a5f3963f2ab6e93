//! Arrow-key selection on the grid.

use crate::types::CellIndex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Row/column of the selected cell. Moves stop at the grid edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridCursor {
    row: u8,
    col: u8,
}

impl GridCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row(&self) -> u8 {
        self.row
    }

    pub fn col(&self) -> u8 {
        self.col
    }

    pub fn move_by(&mut self, dir: Direction, grid_size: u8) {
        self.clamp(grid_size);
        let last = grid_size.saturating_sub(1);
        match dir {
            Direction::Up => self.row = self.row.saturating_sub(1),
            Direction::Down => self.row = (self.row + 1).min(last),
            Direction::Left => self.col = self.col.saturating_sub(1),
            Direction::Right => self.col = (self.col + 1).min(last),
        }
    }

    /// Pull the cursor back inside a (possibly shrunk) grid.
    pub fn clamp(&mut self, grid_size: u8) {
        let last = grid_size.saturating_sub(1);
        self.row = self.row.min(last);
        self.col = self.col.min(last);
    }

    pub fn cell(&self, grid_size: u8) -> CellIndex {
        let last = grid_size.saturating_sub(1);
        self.row.min(last) * grid_size + self.col.min(last)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
