//! Event loop glue between the front ends and the engine
//!
//! Ticks and actions are handled strictly one at a time. Every handled event
//! yields a [`Frame`] describing what changed; once the game is over the tick
//! driver is cancelled and further events are dropped without a frame.

use crate::game::{Action, Game, Outcome};
use crate::selector::PieceSelector;
use crate::snapshot::{Frame, Snapshot};
use crate::ticker::Ticker;
use std::time::{Duration, Instant};
use tracing::trace;

/// One unit of work for the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Tick,
    Action(Action),
}

pub struct GameLoop<S> {
    game: Game<S>,
    ticker: Ticker,
    /// What the front end currently shows
    view: Snapshot,
}

impl<S: PieceSelector> GameLoop<S> {
    pub fn new(game: Game<S>, tick_interval: Duration, now: Instant) -> Self {
        let view = game.snapshot();
        Self {
            game,
            ticker: Ticker::new(tick_interval, now),
            view,
        }
    }

    pub fn game(&self) -> &Game<S> {
        &self.game
    }

    pub fn view(&self) -> &Snapshot {
        &self.view
    }

    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    /// How long a front end may block waiting for input. `None` means no
    /// tick is pending any more
    pub fn timeout(&self, now: Instant) -> Option<Duration> {
        self.ticker.remaining(now)
    }

    /// Handle the gravity tick if it is due at `now`
    pub fn poll_tick(&mut self, now: Instant) -> Option<Frame> {
        if self.ticker.fire(now) {
            self.handle(Event::Tick)
        } else {
            None
        }
    }

    /// Run one event to completion
    pub fn handle(&mut self, event: Event) -> Option<Frame> {
        if self.game.is_over() {
            return None;
        }

        let outcome = match event {
            Event::Tick => self.game.tick(),
            Event::Action(action) => self.game.process_action(action),
        };
        trace!(?event, ?outcome, "handled");

        // Nothing on the board moved
        if outcome == Outcome::Rejected {
            return Some(self.view.frame_since(&self.view));
        }

        let snapshot = self.game.snapshot();
        let frame = snapshot.frame_since(&self.view);
        self.view = snapshot;

        if self.game.is_over() {
            self.ticker.cancel();
        }
        Some(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::game::GameState;
    use crate::piece::Piece;
    use crate::selector::Sequence;
    use crate::settings::GameConfig;
    use crate::snapshot::{CellChange, CellView};
    use crate::tetromino::TetrominoType;

    const TICK: Duration = Duration::from_millis(500);

    fn new_loop(pieces: &[TetrominoType], start: Instant) -> GameLoop<Sequence> {
        let game = Game::new(&GameConfig::default(), Sequence::new(pieces));
        GameLoop::new(game, TICK, start)
    }

    #[test]
    fn test_tick_frame_moves_piece() {
        let start = Instant::now();
        let mut game_loop = new_loop(&[TetrominoType::O], start);

        assert!(game_loop.poll_tick(start).is_none());
        let frame = game_loop.poll_tick(start + TICK).unwrap();
        // Top row of the O vacates, a new row below it fills
        assert_eq!(
            frame.changes,
            vec![
                CellChange {
                    index: 4,
                    cell: CellView::Empty
                },
                CellChange {
                    index: 5,
                    cell: CellView::Empty
                },
                CellChange {
                    index: 24,
                    cell: CellView::Active
                },
                CellChange {
                    index: 25,
                    cell: CellView::Active
                },
            ]
        );
        assert_eq!(frame.game_over, None);
        assert_eq!(game_loop.view(), &game_loop.game().snapshot());
    }

    #[test]
    fn test_rejected_action_has_empty_frame() {
        let start = Instant::now();
        let mut game_loop = new_loop(&[TetrominoType::O], start);
        game_loop.game.current_piece = Piece::new(TetrominoType::O, 40);
        game_loop.view = game_loop.game.snapshot();

        let before = game_loop.game().current_piece;
        let frame = game_loop.handle(Event::Action(Action::MoveLeft)).unwrap();
        assert!(frame.changes.is_empty());
        assert_eq!(frame.game_over, None);
        assert_eq!(game_loop.game().current_piece, before);
    }

    #[test]
    fn test_game_over_cancels_ticker_and_drops_events() {
        let start = Instant::now();
        let mut game_loop = new_loop(&[TetrominoType::O, TetrominoType::O], start);
        let mut board = Board::default();
        for index in [4, 5, 14, 15] {
            board.set_filled(index);
        }
        game_loop.game.board = board;
        game_loop.game.current_piece = Piece::new(TetrominoType::O, 180);

        let frame = game_loop.handle(Event::Tick).unwrap();
        assert_eq!(frame.game_over, Some(0));
        assert_eq!(game_loop.game().state, GameState::GameOver);
        assert!(game_loop.ticker().is_cancelled());
        assert_eq!(game_loop.timeout(start), None);

        let view = game_loop.view().clone();
        for action in [
            Action::MoveLeft,
            Action::MoveRight,
            Action::SoftDrop,
            Action::RotateCW,
        ] {
            assert!(game_loop.handle(Event::Action(action)).is_none());
        }
        assert!(game_loop.poll_tick(start + 100 * TICK).is_none());
        assert_eq!(game_loop.view(), &view);
    }

    #[test]
    fn test_line_clear_frame_carries_score() {
        let start = Instant::now();
        let mut game_loop = new_loop(&[TetrominoType::I, TetrominoType::O], start);
        for col in 0..9 {
            game_loop.game.board.set_filled(190 + col);
        }
        game_loop.game.current_piece = Piece::new(TetrominoType::I, 159);
        game_loop.view = game_loop.game.snapshot();

        let frame = game_loop.handle(Event::Action(Action::SoftDrop)).unwrap();
        assert_eq!(frame.score, 10);
        assert_eq!(frame.lines, 1);
        assert_eq!(game_loop.view().score, 10);
    }
}
