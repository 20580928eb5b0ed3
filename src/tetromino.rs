//! Tetromino definitions and rotation tables
//!
//! Every shape is four (row, col) cell offsets measured from the top-left
//! corner of the piece's bounding box, rows growing downward. The anchor of a
//! placed piece is the board index of that corner, so a cell lands on
//! `anchor + row * width + col`.

use serde::Serialize;

/// The 7 tetromino types, in selection order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TetrominoType {
    L,
    Z,
    T,
    O,
    I,
    S,
    J,
}

impl TetrominoType {
    /// All tetromino types, indexed by the piece selector
    pub fn all() -> [TetrominoType; 7] {
        [
            TetrominoType::L,
            TetrominoType::Z,
            TetrominoType::T,
            TetrominoType::O,
            TetrominoType::I,
            TetrominoType::S,
            TetrominoType::J,
        ]
    }

    /// Get the shape offsets for this tetromino at a given rotation
    /// Returns 4 (row, col) offsets, row increases downward
    pub fn shape(&self, rotation: Rotation) -> [(i32, i32); 4] {
        use Rotation::*;

        match self {
            // X.   XXX   XX   ..X
            // X.   X..   .X   XXX
            // XX         .X
            TetrominoType::L => match rotation {
                North => [(0, 0), (1, 0), (2, 0), (2, 1)],
                East => [(1, 0), (1, 1), (1, 2), (2, 0)],
                South => [(0, 0), (0, 1), (1, 1), (2, 1)],
                West => [(0, 2), (1, 0), (1, 1), (1, 2)],
            },
            // Z and S flip between two states; South/West repeat North/East
            TetrominoType::Z => match rotation {
                North | South => [(0, 0), (0, 1), (1, 1), (1, 2)],
                East | West => [(0, 2), (1, 1), (1, 2), (2, 1)],
            },
            TetrominoType::T => match rotation {
                North => [(0, 1), (1, 0), (1, 1), (1, 2)],
                East => [(0, 1), (1, 1), (1, 2), (2, 1)],
                South => [(1, 0), (1, 1), (1, 2), (2, 1)],
                West => [(0, 1), (1, 0), (1, 1), (2, 1)],
            },
            TetrominoType::O => [(0, 0), (0, 1), (1, 0), (1, 1)],
            TetrominoType::I => match rotation {
                North | South => [(0, 0), (1, 0), (2, 0), (3, 0)],
                East | West => [(1, 0), (1, 1), (1, 2), (1, 3)],
            },
            TetrominoType::S => match rotation {
                North | South => [(0, 1), (0, 2), (1, 0), (1, 1)],
                East | West => [(0, 0), (1, 0), (1, 1), (2, 1)],
            },
            // .X   X..   XX   XXX
            // .X   XXX   X.   ..X
            // XX         X.
            TetrominoType::J => match rotation {
                North => [(0, 1), (1, 1), (2, 0), (2, 1)],
                East => [(0, 0), (1, 0), (1, 1), (1, 2)],
                South => [(0, 0), (0, 1), (1, 0), (2, 0)],
                West => [(1, 0), (1, 1), (1, 2), (2, 2)],
            },
        }
    }

    /// Board-index offsets of the shape laid out against `width` columns
    pub fn offsets(&self, rotation: Rotation, width: i32) -> [i32; 4] {
        self.shape(rotation).map(|(row, col)| row * width + col)
    }

    pub fn name(&self) -> &'static str {
        match self {
            TetrominoType::L => "L",
            TetrominoType::Z => "Z",
            TetrominoType::T => "T",
            TetrominoType::O => "O",
            TetrominoType::I => "I",
            TetrominoType::S => "S",
            TetrominoType::J => "J",
        }
    }
}

/// Rotation states in clockwise order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Rotation {
    #[default]
    North, // Spawn state
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise: North → East → South → West → North
    pub fn cw(&self) -> Rotation {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }
}
