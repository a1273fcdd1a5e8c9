//! # tile-cascade
//!
//! A match-3 board engine with exhaustive move search.
//!
//! ## Design Principles
//!
//! 1. **Values, Not Objects**: boards and actors are small `Copy` values.
//!    Every board operation returns a new board, so simulated branches
//!    never share mutable state.
//!
//! 2. **Arena Trees**: simulated play is stored in a flat node arena with
//!    index handles. Parent links are plain ids, never owning references.
//!
//! 3. **Pull-Based Search**: the simulator runs off an explicit worklist.
//!    Callers pull ends of turn one at a time and may stop whenever they
//!    like, keeping a valid partial tree.
//!
//! ## Modules
//!
//! - `core`: tiles, positions, the board engine, actors, RNG
//! - `sim`: simulation tree and the turn simulator
//! - `capture`: solver for puzzles that must end on an empty board
//! - `versus`: move ranking against an opponent
//! - `helper`: seam for the code that reads the live game
//! - `error`: crate error type

pub mod capture;
pub mod core;
pub mod error;
pub mod helper;
pub mod sim;
pub mod versus;

#[cfg(feature = "python")]
mod python;

// Re-export commonly used types
pub use crate::core::{
    Actor, ActorBuilder, Board, Pool, Position, Resource, Side, SimRng, Spell, SwapPair, Tile,
    TileGroup, WildRank,
};

pub use crate::error::{Result, SimError};

pub use crate::sim::{
    EndsOfTurn, NodeId, SimConfig, SimStats, SimTree, State, StateFilter, Transition,
    TreeStats, TurnSimulator,
};

pub use crate::capture::{capture, CaptureConfig, CaptureSolver, PruneThresholds};

pub use crate::versus::{
    versus_summaries, Advisor, AdvisorConfig, AveragedSummary, ScoringWeights, Summary,
    VersusOptions,
};

pub use crate::helper::{solve_capture, summarize_versus, FixedSource, StateSource, VersusSnapshot};
