//! Line-oriented driver for scripts and bots
//!
//! Reads one command per line (`left`, `right`, `down`, `rotate`, `tick`) and
//! answers each handled command with one JSON frame. The first line written
//! is the full starting snapshot. Time does not pass on its own here: gravity
//! only runs on an explicit `tick`.

use crate::game::Action;
use crate::game_loop::{Event, GameLoop};
use crate::selector::PieceSelector;
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use tracing::{info, warn};

/// Parse one command line. Blank lines and unknown words yield `None`
pub fn parse_event(line: &str) -> Option<Event> {
    let event = match line.trim().to_ascii_lowercase().as_str() {
        "left" => Event::Action(Action::MoveLeft),
        "right" => Event::Action(Action::MoveRight),
        "down" => Event::Action(Action::SoftDrop),
        "rotate" => Event::Action(Action::RotateCW),
        "tick" => Event::Tick,
        _ => return None,
    };
    Some(event)
}

pub fn run<S, R, W>(game_loop: &mut GameLoop<S>, input: R, mut output: W) -> Result<()>
where
    S: PieceSelector,
    R: BufRead,
    W: Write,
{
    serde_json::to_writer(&mut output, game_loop.view()).context("writing snapshot")?;
    writeln!(output)?;
    output.flush()?;

    for line in input.lines() {
        let line = line.context("reading command")?;
        if line.trim().is_empty() {
            continue;
        }
        let Some(event) = parse_event(&line) else {
            warn!("unknown command {:?}", line.trim());
            continue;
        };
        let Some(frame) = game_loop.handle(event) else {
            continue;
        };

        serde_json::to_writer(&mut output, &frame).context("writing frame")?;
        writeln!(output)?;
        output.flush()?;

        if let Some(score) = frame.game_over {
            info!(score, "headless game finished");
        }
    }
    Ok(())
}
