//! Simulation tree and the turn simulator that grows it.
//!
//! ## Overview
//!
//! A [`SimTree`] records every simulated line of play from one root
//! [`State`]. States alternate with [`Transition`]s: a swap, a chain
//! reaction, an end of turn (possibly a mana drain) or a pruning marker.
//! The [`TurnSimulator`] expands states into transitions one whole game
//! turn at a time.
//!
//! ## Usage
//!
//! ```rust
//! use tile_cascade::core::{Actor, Board, Side};
//! use tile_cascade::sim::{SimConfig, SimTree, State, TurnSimulator};
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
//! let root = State::new(
//!     board,
//!     Actor::generic_versus(Side::Player),
//!     Actor::generic_versus(Side::Opponent),
//! );
//! let mut tree = SimTree::new(root);
//! let mut simulator = TurnSimulator::new(SimConfig::default());
//!
//! let root = tree.root();
//! let ends = simulator.ends_of_one_turn(&mut tree, root).unwrap();
//! assert_eq!(ends.len(), 1);
//! assert_eq!(tree.swaps_to(ends[0]).len(), 1);
//! ```
//!
//! ## Pruning
//!
//! A [`StateFilter`] sees every settled state before it is queued and may
//! reject it, leaving a `Filtered` leaf:
//!
//! ```rust,ignore
//! let simulator = TurnSimulator::new(config)
//!     .with_filter(|state: &State| state.board.is_empty());
//! ```

pub mod config;
pub mod filter;
pub mod node;
pub mod simulator;
pub mod stats;
pub mod tree;

pub use config::SimConfig;
pub use filter::{AcceptAll, StateFilter};
pub use node::{NodeId, NodeKind, SimNode, State, Transition};
pub use simulator::{has_productive_swap, EndsOfTurn, TurnSimulator, BONUS_GROUP_LEN};
pub use stats::SimStats;
pub use tree::{SimTree, TreeStats};
