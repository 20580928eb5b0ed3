//! Active falling piece: collision and movement
//!
//! Movement never touches the board. A move either commits a new anchor or
//! rotation on the piece and returns true, or leaves the piece unchanged and
//! returns false.

use crate::board::Board;
use crate::tetromino::{Rotation, TetrominoType};

/// Spawn anchor column on row 0
pub const SPAWN_COLUMN: i32 = 4;

/// An active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    /// The type of tetromino
    pub piece_type: TetrominoType,
    /// Current rotation state
    pub rotation: Rotation,
    /// Board index of the top-left corner of the shape's bounding box
    pub anchor: i32,
}

/// Check whether a shape placed at `anchor` lies on the board, does not wrap
/// across the left/right edge and does not overlap a filled cell
pub fn fits_at(board: &Board, anchor: i32, shape: &[(i32, i32); 4]) -> bool {
    let width = board.width() as i32;
    !wraps(width, anchor, shape)
        && shape
            .iter()
            .all(|&(row, col)| !board.is_occupied(anchor + row * width + col))
}

/// A placement wraps when a cell's board column no longer lines up with the
/// shape's own column layout, i.e. its index spilled into a neighbouring row.
pub fn wraps(width: i32, anchor: i32, shape: &[(i32, i32); 4]) -> bool {
    let column = |(row, col): (i32, i32)| (anchor + row * width + col).rem_euclid(width) - col;
    let first = column(shape[0]);
    shape[1..].iter().any(|&cell| column(cell) != first)
}

impl Piece {
    pub fn new(piece_type: TetrominoType, anchor: i32) -> Self {
        Self {
            piece_type,
            rotation: Rotation::North,
            anchor,
        }
    }

    /// Create a new piece at the spawn anchor (row 0, column 4)
    pub fn spawn(piece_type: TetrominoType) -> Self {
        Self::new(piece_type, SPAWN_COLUMN)
    }

    pub fn shape(&self) -> [(i32, i32); 4] {
        self.piece_type.shape(self.rotation)
    }

    /// Board indices of the 4 cells
    pub fn cells(&self, width: usize) -> [i32; 4] {
        let anchor = self.anchor;
        self.piece_type
            .offsets(self.rotation, width as i32)
            .map(|offset| anchor + offset)
    }

    /// Whether the piece sits on a legal, unoccupied placement
    pub fn fits(&self, board: &Board) -> bool {
        fits_at(board, self.anchor, &self.shape())
    }

    /// Try to move left, returns true if successful
    pub fn move_left(&mut self, board: &Board) -> bool {
        self.shift(board, -1, 0)
    }

    /// Try to move right, returns true if successful
    pub fn move_right(&mut self, board: &Board) -> bool {
        self.shift(board, 1, board.width() as i32 - 1)
    }

    /// A cell already in the `edge` column blocks the move outright: a single
    /// column shape would otherwise reappear on the far side one row off.
    fn shift(&mut self, board: &Board, delta: i32, edge: i32) -> bool {
        let width = board.width() as i32;
        let at_edge = self
            .cells(board.width())
            .iter()
            .any(|cell| cell.rem_euclid(width) == edge);
        if !at_edge && fits_at(board, self.anchor + delta, &self.shape()) {
            self.anchor += delta;
            true
        } else {
            false
        }
    }

    /// Try to move down one row, returns true if successful
    pub fn move_down(&mut self, board: &Board) -> bool {
        let below = self.anchor + board.width() as i32;
        if fits_at(board, below, &self.shape()) {
            self.anchor = below;
            true
        } else {
            false
        }
    }

    /// Lock condition: some cell has a filled cell or the floor directly below
    pub fn is_grounded(&self, board: &Board) -> bool {
        let width = board.width();
        self.cells(width)
            .iter()
            .any(|&cell| board.is_occupied(cell + width as i32))
    }

    /// Rotate clockwise.
    ///
    /// A rotation that spills over the left or right edge is pushed back
    /// toward the centre one column at a time, at most `width` times. If the
    /// result still wraps or overlaps the stack, the piece keeps its previous
    /// rotation and anchor.
    pub fn rotate(&mut self, board: &Board) -> bool {
        let width = board.width() as i32;
        let rotation = self.rotation.cw();
        let shape = self.piece_type.shape(rotation);
        let step = if self.leans_right(width) { -1 } else { 1 };

        let mut anchor = self.anchor;
        let mut attempts = 0;
        while wraps(width, anchor, &shape) {
            if attempts == width {
                return false;
            }
            anchor += step;
            attempts += 1;
        }

        if !fits_at(board, anchor, &shape) {
            return false;
        }

        self.rotation = rotation;
        self.anchor = anchor;
        true
    }

    /// Whether the piece's current columns sit right of the board's centre
    fn leans_right(&self, width: i32) -> bool {
        let columns = self.cells(width as usize).map(|cell| cell.rem_euclid(width));
        let low = columns.iter().min().copied().unwrap_or(0);
        let high = columns.iter().max().copied().unwrap_or(0);
        low + high >= width - 1
    }
}
