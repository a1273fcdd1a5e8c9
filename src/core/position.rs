//! Board coordinates and swap pairs.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::board::SIZE;
use crate::error::{Result, SimError};

/// A cell coordinate, `row` 0 at the top and `col` 0 at the left.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    /// Create a position without bounds checking.
    #[inline]
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Create a position, failing outside the board.
    pub fn checked(row: usize, col: usize) -> Result<Self> {
        if row < SIZE && col < SIZE {
            Ok(Self { row, col })
        } else {
            Err(SimError::OutOfBounds { row, col })
        }
    }

    #[inline]
    #[must_use]
    pub const fn in_bounds(self) -> bool {
        self.row < SIZE && self.col < SIZE
    }

    /// Manhattan distance.
    #[must_use]
    pub fn distance(self, other: Position) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// In-bounds orthogonal neighbors (up, down, left, right).
    pub fn neighbors(self) -> impl Iterator<Item = Position> {
        let Position { row, col } = self;
        [
            row.checked_sub(1).map(|r| Position::new(r, col)),
            Some(Position::new(row + 1, col)),
            col.checked_sub(1).map(|c| Position::new(row, c)),
            Some(Position::new(row, col + 1)),
        ]
        .into_iter()
        .flatten()
        .filter(|p| p.in_bounds())
    }

    /// The 3x3 block centered here, clipped to the board, row-major.
    pub fn surrounding(self) -> impl Iterator<Item = Position> {
        let rows = self.row.saturating_sub(1)..=(self.row + 1).min(SIZE - 1);
        let cols = self.col.saturating_sub(1)..=(self.col + 1).min(SIZE - 1);
        rows.flat_map(move |r| cols.clone().map(move |c| Position::new(r, c)))
    }

    /// Every board position in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..SIZE).flat_map(|r| (0..SIZE).map(move |c| Position::new(r, c)))
    }

    /// The same cell with rows and columns exchanged.
    #[inline]
    #[must_use]
    pub const fn transposed(self) -> Self {
        Self {
            row: self.col,
            col: self.row,
        }
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Two positions exchanged by one move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SwapPair {
    pub first: Position,
    pub second: Position,
}

impl SwapPair {
    #[must_use]
    pub fn new(first: impl Into<Position>, second: impl Into<Position>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
        }
    }

    /// Fails unless the two positions are orthogonal neighbors on the board.
    pub fn validate(self) -> Result<Self> {
        for p in [self.first, self.second] {
            if !p.in_bounds() {
                return Err(SimError::OutOfBounds {
                    row: p.row,
                    col: p.col,
                });
            }
        }
        let distance = self.first.distance(self.second);
        if distance != 1 {
            return Err(SimError::NotAdjacent {
                first: self.first,
                second: self.second,
                distance,
            });
        }
        Ok(self)
    }

    /// The pair as `((row, col), (row, col))` tuples.
    #[must_use]
    pub fn as_tuples(self) -> ((usize, usize), (usize, usize)) {
        (
            (self.first.row, self.first.col),
            (self.second.row, self.second.col),
        )
    }
}

impl fmt::Display for SwapPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.first, self.second)
    }
}
