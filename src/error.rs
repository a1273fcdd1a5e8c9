//! Error type shared by the board engine, actors and simulators.

use thiserror::Error;

use crate::core::{Position, Resource};
use crate::sim::NodeId;

/// Errors produced by fallible operations in this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// A character that is not a tile type code.
    #[error("tile type code {found:?} is not one of the allowed types {allowed:?}")]
    InvalidTile { found: char, allowed: &'static str },

    /// Board text did not contain exactly 8 rows.
    #[error("board text must have 8 rows, found {rows}")]
    BoardShape { rows: usize },

    /// A board row did not contain exactly 8 tiles.
    #[error("board row {row} must have 8 tiles, found {len}")]
    RowLength { row: usize, len: usize },

    /// A coordinate outside the 8x8 board.
    #[error("position ({row}, {col}) is outside the board")]
    OutOfBounds { row: usize, col: usize },

    /// Swap positions that are not orthogonal neighbors.
    #[error("swap positions {first} and {second} must be adjacent but are {distance} apart")]
    NotAdjacent {
        first: Position,
        second: Position,
        distance: usize,
    },

    /// A pool constructed with more than its maximum.
    #[error("{resource} starts at {current}, above its maximum of {max}")]
    ResourceOverMax {
        resource: Resource,
        current: u32,
        max: u32,
    },

    /// An actor name other than `player` or `opponent`.
    #[error("unknown actor name {0:?}, expected \"player\" or \"opponent\"")]
    UnknownSide(String),

    /// A node id that does not belong to the tree it was used with.
    #[error("{0} is not a node of this tree")]
    UnknownNode(NodeId),

    /// A one-turn expansion seeded from a state that has a parent.
    #[error("{0} is not a root state")]
    NotRoot(NodeId),

    /// A one-turn expansion seeded from a transition other than end of turn.
    #[error("{0} is not an end of turn transition")]
    NotEndOfTurn(NodeId),
}

/// Result alias for this crate.
pub type Result<T> = std::result::Result<T, SimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_tile_message_names_code_and_allowed_set() {
        let err = SimError::InvalidTile {
            found: 'q',
            allowed: "rgby",
        };
        let message = err.to_string();
        assert!(message.contains("'q'"));
        assert!(message.contains("rgby"));
    }

    #[test]
    fn test_not_adjacent_reports_distance() {
        let err = SimError::NotAdjacent {
            first: Position::new(0, 0),
            second: Position::new(2, 1),
            distance: 3,
        };
        assert!(err.to_string().contains("3 apart"));
    }
}
