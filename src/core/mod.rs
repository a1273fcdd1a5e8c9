//! Core value types: tiles, positions, the board engine, actors, RNG.
//!
//! Everything here is a plain `Copy` (or cheaply cloned) value. Operations
//! return new values, so simulated branches never share mutable state.

pub mod actor;
pub mod board;
pub mod position;
pub mod rng;
pub mod tile;

pub use actor::{Actor, ActorBuilder, Pool, Resource, Side, SKULLBOMB_ATTACK, SKULL_ATTACK};
pub use board::{Board, PositionGroup, Spell, TileGroup, SIZE};
pub use position::{Position, SwapPair};
pub use rng::SimRng;
pub use tile::{Tile, WildRank};
