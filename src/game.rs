//! Core game state and logic
//!
//! `Game` owns the board, the falling piece and the score. Gravity ticks and
//! player actions are the only ways to change it; each call runs to
//! completion and reports what happened as an [`Outcome`].

use crate::board::Board;
use crate::piece::Piece;
use crate::score::Score;
use crate::selector::{PieceSelector, RandomSelector};
use crate::settings::GameConfig;
use crate::snapshot::{CellView, Snapshot};
use serde::Serialize;
use tracing::{debug, info};

/// Game state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameState {
    Running,
    GameOver,
}

/// Input actions the game can process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    SoftDrop,
    RotateCW,
}

/// What a lock did to the board and the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockReport {
    pub rows_cleared: usize,
    pub points: u64,
    /// The replacement piece spawned on top of the stack
    pub topped_out: bool,
}

/// Result of handling one tick or action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The game is over; nothing was touched
    Ignored,
    /// The move was blocked; nothing was touched
    Rejected,
    /// The piece moved or rotated
    Moved,
    /// The piece locked and a new one spawned
    Locked(LockReport),
}

/// The main game struct
pub struct Game<S = RandomSelector> {
    /// The game board
    pub board: Board,
    /// Current falling piece
    pub current_piece: Piece,
    /// Piece randomizer
    selector: S,
    /// Score tracking
    pub score: Score,
    /// Current game state
    pub state: GameState,
}

impl<S: PieceSelector> Game<S> {
    /// Create a new game and spawn its first piece
    pub fn new(config: &GameConfig, mut selector: S) -> Self {
        let board = Board::new(config.width, config.height);
        let current_piece = Piece::spawn(selector.next_piece());
        debug!(piece = current_piece.piece_type.name(), "first piece");

        Self {
            board,
            current_piece,
            selector,
            score: Score::new(config.score_per_row),
            state: GameState::Running,
        }
    }

    pub fn is_over(&self) -> bool {
        self.state == GameState::GameOver
    }

    /// Gravity: one downward step, then the lock check
    pub fn tick(&mut self) -> Outcome {
        if self.is_over() {
            return Outcome::Ignored;
        }
        self.move_down()
    }

    /// Process an action. Actions after game over are ignored
    pub fn process_action(&mut self, action: Action) -> Outcome {
        if self.is_over() {
            debug!(?action, "ignored after game over");
            return Outcome::Ignored;
        }

        let moved = match action {
            Action::SoftDrop => return self.move_down(),
            Action::MoveLeft => self.current_piece.move_left(&self.board),
            Action::MoveRight => self.current_piece.move_right(&self.board),
            Action::RotateCW => self.current_piece.rotate(&self.board),
        };

        if moved {
            Outcome::Moved
        } else {
            debug!(?action, "blocked");
            Outcome::Rejected
        }
    }

    /// Step down if the row below is free, then lock if the piece now rests
    /// on the stack or the floor. Both happen in the same event.
    fn move_down(&mut self) -> Outcome {
        self.current_piece.move_down(&self.board);
        if self.current_piece.is_grounded(&self.board) {
            Outcome::Locked(self.lock_piece())
        } else {
            Outcome::Moved
        }
    }

    /// Lock the current piece, clear rows and spawn the next piece
    fn lock_piece(&mut self) -> LockReport {
        debug_assert_eq!(self.state, GameState::Running, "lock after game over");

        let width = self.board.width();
        for cell in self.current_piece.cells(width) {
            self.board.set_filled(cell);
        }

        let rows_cleared = self.board.clear_full_rows();
        let points = self.score.add_rows(rows_cleared);
        debug!(
            piece = self.current_piece.piece_type.name(),
            anchor = self.current_piece.anchor,
            rows_cleared,
            points,
            "locked"
        );

        let next_piece = Piece::spawn(self.selector.next_piece());
        let topped_out = !next_piece.fits(&self.board);
        self.current_piece = next_piece;

        if topped_out {
            self.state = GameState::GameOver;
            info!(
                score = self.score.points,
                lines = self.score.lines,
                "game over"
            );
        } else {
            debug!(piece = next_piece.piece_type.name(), "spawned");
        }

        LockReport {
            rows_cleared,
            points,
            topped_out,
        }
    }

    /// Per-cell view with the falling piece overlaid on the locked stack
    pub fn snapshot(&self) -> Snapshot {
        let mut cells: Vec<CellView> = self
            .board
            .cells()
            .iter()
            .map(|&cell| CellView::from(cell))
            .collect();
        for cell in self.current_piece.cells(self.board.width()) {
            if let Ok(index) = usize::try_from(cell) {
                if let Some(view) = cells.get_mut(index) {
                    *view = CellView::Active;
                }
            }
        }

        Snapshot {
            width: self.board.width(),
            height: self.board.height(),
            cells,
            score: self.score.points,
            lines: self.score.lines,
            state: self.state,
        }
    }
}
