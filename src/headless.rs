//! Scripted play without a terminal UI.
//!
//! Each requested column is played in order and its [`DropResult`] written as
//! one line of JSON, followed by a summary line with the final status.

use std::io::{self, Write};

use serde::Serialize;

use crate::game::{DropResult, GameState, GameStatus};

/// Final line of a headless run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    #[serde(flatten)]
    pub status: GameStatus,
    pub moves: usize,
}

/// Play `columns` against `state`, writing one JSON line per drop.
///
/// Requests after the game has ended are still played, so they show up as
/// `game_over` rejections.
pub fn run<W: Write>(state: &mut GameState, columns: &[usize], out: &mut W) -> io::Result<Summary> {
    for &column in columns {
        let result: DropResult = state.attempt_drop(column);
        serde_json::to_writer(&mut *out, &result)?;
        writeln!(out)?;
    }

    let summary = Summary {
        status: state.status(),
        moves: state.move_count(),
    };
    serde_json::to_writer(&mut *out, &summary)?;
    writeln!(out)?;
    out.flush()?;
    Ok(summary)
}
