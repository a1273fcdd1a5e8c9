//! Capture puzzles: find swaps that empty the board.
//!
//! The solver follows every line of play turn after turn, with job order
//! shuffled, until some end of turn leaves an empty board. Two prunes keep
//! the search finite:
//!
//! - boards already seen anywhere in the search ([`DuplicateTrie`])
//! - boards where a tile type is too rare to ever match
//!   ([`is_impossible_by_count`])
//!
//! ```rust
//! use tile_cascade::capture::capture;
//! use tile_cascade::core::{Board, SwapPair};
//!
//! let board: Board = "
//!     ........
//!     ........
//!     ........
//!     ........
//!     .......x
//!     ....xx.r
//!     ....rr.r
//!     ..rryyry"
//!     .parse()
//!     .unwrap();
//! let last = SwapPair::new((7, 6), (7, 7));
//! assert_eq!(capture(&board), vec![last, last]);
//! ```

pub mod feasibility;
pub mod filter;
pub mod solver;
pub mod trie;

pub use feasibility::{is_impossible_by_count, PruneThresholds, TileCounts};
pub use filter::CaptureFilter;
pub use solver::{capture, CaptureConfig, CaptureSolver};
pub use trie::DuplicateTrie;
