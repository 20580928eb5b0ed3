//! blockfall - a falling-block puzzle engine
//!
//! The engine ([`game::Game`]) is driven one event at a time through
//! [`game_loop::GameLoop`]. Front ends live in [`ui`] (terminal) and
//! [`headless`] (JSON lines).

pub mod board;
pub mod game;
pub mod game_loop;
pub mod headless;
pub mod input;
pub mod piece;
pub mod score;
pub mod selector;
pub mod settings;
pub mod snapshot;
pub mod ticker;
pub mod tetromino;
pub mod ui;
