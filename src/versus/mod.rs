//! Versus mode: rank the player's moves against an opponent.
//!
//! An [`Advisor`] grows a simulation tree one whole turn at a time from the
//! live position. After each turn every root swap is scored by the outcome
//! both actors would realistically steer towards, measured as the change in
//! the player's resource margin over the opponent.
//!
//! ```rust
//! use tile_cascade::core::{Actor, Board, Side, SwapPair};
//! use tile_cascade::sim::SimConfig;
//! use tile_cascade::versus::{Advisor, AdvisorConfig};
//!
//! let board: Board = "
//!     ........
//!     ........
//!     ........
//!     ........
//!     ........
//!     r.......
//!     r.......
//!     xr......"
//!     .parse()
//!     .unwrap();
//! let mut advisor = Advisor::new(AdvisorConfig::default().with_sim(SimConfig::default()));
//! advisor.reset(
//!     board,
//!     Actor::generic_versus(Side::Player),
//!     Actor::generic_versus(Side::Opponent),
//! );
//! advisor.simulate_next_turn().unwrap();
//!
//! let summaries = advisor.sorted_current_summaries();
//! assert_eq!(summaries.len(), 1);
//! assert_eq!(summaries[0].action, SwapPair::new((7, 0), (7, 1)));
//! // The cleared board leaves no move, so the turn ends in a mana drain.
//! assert_eq!(summaries[0].mana_drain_leaves, 1);
//! ```

pub mod advisor;
pub mod averaging;
pub mod scoring;
pub mod summary;

pub use advisor::{Advisor, AdvisorConfig};
pub use averaging::{versus_summaries, AveragedSummary, VersusOptions};
pub use scoring::ScoringWeights;
pub use summary::{summarize_action, Summary};
