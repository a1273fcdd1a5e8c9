//! Seam between the engine and whatever reads the live game.
//!
//! Recognition (screen capture, manual entry, fixtures) lives outside this
//! crate and reports through [`StateSource`]. It signals failure by
//! returning `None`; the entry points here turn a missing board into an
//! empty answer.

use log::info;
use serde::{Deserialize, Serialize};

use crate::capture::CaptureSolver;
use crate::core::{Actor, Board, Side, SwapPair};
use crate::error::Result;
use crate::versus::{versus_summaries, AveragedSummary, VersusOptions};

/// What recognition could read of a versus match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersusSnapshot {
    pub board: Option<Board>,
    pub player: Option<Actor>,
    pub opponent: Option<Actor>,
}

/// Supplies boards and actors read from the game.
pub trait StateSource {
    /// The board of a capture puzzle.
    fn capture_board(&mut self) -> Option<Board>;

    /// The board and both actors of a versus match.
    fn versus_snapshot(&mut self) -> VersusSnapshot;
}

/// A source that always reports the same values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedSource {
    pub capture: Option<Board>,
    pub versus: VersusSnapshot,
}

impl FixedSource {
    #[must_use]
    pub fn capture(board: Board) -> Self {
        Self {
            capture: Some(board),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn versus(board: Board, player: Option<Actor>, opponent: Option<Actor>) -> Self {
        Self {
            capture: None,
            versus: VersusSnapshot {
                board: Some(board),
                player,
                opponent,
            },
        }
    }
}

impl StateSource for FixedSource {
    fn capture_board(&mut self) -> Option<Board> {
        self.capture
    }

    fn versus_snapshot(&mut self) -> VersusSnapshot {
        self.versus
    }
}

/// Solve the capture puzzle `source` shows, if it shows one.
pub fn solve_capture<S: StateSource + ?Sized>(source: &mut S, solver: &mut CaptureSolver) -> Vec<SwapPair> {
    match source.capture_board() {
        Some(board) => solver.solve(&board),
        None => {
            info!("no capture board recognized");
            Vec::new()
        }
    }
}

/// Rank the moves of the versus match `source` shows.
///
/// Actors that could not be read are replaced by
/// [`Actor::generic_versus`].
pub fn summarize_versus<S: StateSource + ?Sized>(
    source: &mut S,
    options: &VersusOptions,
) -> Result<Vec<AveragedSummary>> {
    let snapshot = source.versus_snapshot();
    let Some(board) = snapshot.board else {
        info!("no versus board recognized");
        return Ok(Vec::new());
    };
    let player = snapshot
        .player
        .unwrap_or_else(|| Actor::generic_versus(Side::Player));
    let opponent = snapshot
        .opponent
        .unwrap_or_else(|| Actor::generic_versus(Side::Opponent));
    versus_summaries(board, player, opponent, options, |_, _| {})
}
