//! Game board representation and line clearing
//!
//! The board is a flat, row-major sequence of `width * height` cells. Row 0 is
//! the top of the well. Indices outside the board are treated as occupied so
//! edge checks in movement code behave like walls.

use serde::Serialize;

/// Standard board dimensions
pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

/// A locked cell on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Cell {
    #[default]
    Empty,
    Filled,
}

impl Cell {
    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled)
    }
}

/// The game board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    /// Row-major cells, index = row * width + col
    cells: Vec<Cell>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BOARD_WIDTH, BOARD_HEIGHT)
    }
}

impl Board {
    /// Create a new empty board
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Flat index of (row, col)
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    fn slot(&self, index: i32) -> Option<usize> {
        usize::try_from(index).ok().filter(|&i| i < self.cells.len())
    }

    /// Whether a cell blocks movement. Out-of-range indices are walls.
    pub fn is_occupied(&self, index: i32) -> bool {
        self.slot(index).is_none_or(|i| self.cells[i].is_filled())
    }

    /// Fill a cell. Returns false if out of bounds
    pub fn set_filled(&mut self, index: i32) -> bool {
        match self.slot(index) {
            Some(i) => {
                self.cells[i] = Cell::Filled;
                true
            }
            None => false,
        }
    }

    /// Empty a cell. Returns false if out of bounds
    pub fn clear_cell(&mut self, index: i32) -> bool {
        match self.slot(index) {
            Some(i) => {
                self.cells[i] = Cell::Empty;
                true
            }
            None => false,
        }
    }

    fn row(&self, row: usize) -> &[Cell] {
        &self.cells[row * self.width..(row + 1) * self.width]
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        row < self.height && self.row(row).iter().all(|cell| cell.is_filled())
    }

    /// Empty every cell of a row
    pub fn clear_row(&mut self, row: usize) {
        if row >= self.height {
            return;
        }
        let start = row * self.width;
        self.cells[start..start + self.width].fill(Cell::Empty);
    }

    /// Shift every row above `row` down by one. The storage of `row` becomes
    /// the new top row and is emptied.
    pub fn collapse_above(&mut self, row: usize) {
        if row >= self.height {
            return;
        }
        let end = (row + 1) * self.width;
        self.cells[..end].rotate_right(self.width);
        self.cells[..self.width].fill(Cell::Empty);
    }

    /// Clear every full row and return how many were removed.
    ///
    /// The scan restarts from the top after each collapse, so stacked or
    /// separated full rows are all caught in a single call.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut cleared = 0;
        while let Some(row) = (0..self.height).find(|&row| self.is_row_full(row)) {
            self.clear_row(row);
            self.collapse_above(row);
            cleared += 1;
        }
        cleared
    }

    /// Check if the board is completely empty
    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        !self.cells.iter().any(Cell::is_filled)
    }
}
