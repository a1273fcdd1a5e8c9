//! Tile values and their matching rules.
//!
//! A tile is a plain `Copy` value compared by type. Matching is directed:
//! `a.matches(b)` asks whether `b` may extend a run whose anchor is `a`.
//!
//! | code      | tile        | matches                     |
//! |-----------|-------------|-----------------------------|
//! | `.`       | blank       | nothing                     |
//! | `r g b y` | colors      | itself, any wildcard        |
//! | `2`-`9`   | wildcards   | any color, any wildcard     |
//! | `s *`     | skulls      | skull, skullbomb            |
//! | `x m`     | experience, money | itself only           |

use std::fmt;

use serde::{Deserialize, Serialize};

use super::rng::SimRng;
use crate::error::{Result, SimError};

/// Rank of a wildcard tile, always in `2..=9`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WildRank(u8);

impl WildRank {
    /// Lowest wildcard rank.
    pub const MIN: u8 = 2;
    /// Highest wildcard rank.
    pub const MAX: u8 = 9;

    /// Create a rank, `None` outside `2..=9`.
    #[must_use]
    pub const fn new(rank: u8) -> Option<Self> {
        if rank >= Self::MIN && rank <= Self::MAX {
            Some(Self(rank))
        } else {
            None
        }
    }

    /// The multiplier this rank applies when consumed.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

/// One cell of the board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tile {
    #[default]
    Blank,
    Red,
    Green,
    Blue,
    Yellow,
    Skull,
    Skullbomb,
    Experience,
    Money,
    Wildcard(WildRank),
}

/// Relative weights for randomly generated tiles.
const RANDOM_TILES: [(Tile, f32); 6] = [
    (Tile::Red, 1.0),
    (Tile::Green, 1.0),
    (Tile::Blue, 1.0),
    (Tile::Yellow, 1.0),
    (Tile::Skull, 1.0),
    (Tile::Skullbomb, 0.5),
];

impl Tile {
    /// Every valid type code.
    pub const ALLOWED: &'static str = "rgbys*xm.23456789";

    /// The four mana colors.
    pub const COLORS: [Tile; 4] = [Tile::Red, Tile::Green, Tile::Blue, Tile::Yellow];

    /// Parse a single type code.
    pub fn from_char(code: char) -> Result<Self> {
        let tile = match code {
            '.' => Tile::Blank,
            'r' => Tile::Red,
            'g' => Tile::Green,
            'b' => Tile::Blue,
            'y' => Tile::Yellow,
            's' => Tile::Skull,
            '*' => Tile::Skullbomb,
            'x' => Tile::Experience,
            'm' => Tile::Money,
            _ => {
                return code
                    .to_digit(10)
                    .and_then(|d| WildRank::new(d as u8))
                    .map(Tile::Wildcard)
                    .ok_or(SimError::InvalidTile {
                        found: code,
                        allowed: Self::ALLOWED,
                    })
            }
        };
        Ok(tile)
    }

    /// The type code of this tile.
    #[must_use]
    pub const fn to_char(self) -> char {
        match self {
            Tile::Blank => '.',
            Tile::Red => 'r',
            Tile::Green => 'g',
            Tile::Blue => 'b',
            Tile::Yellow => 'y',
            Tile::Skull => 's',
            Tile::Skullbomb => '*',
            Tile::Experience => 'x',
            Tile::Money => 'm',
            Tile::Wildcard(rank) => (b'0' + rank.get()) as char,
        }
    }

    /// A wildcard of the given rank, `None` outside `2..=9`.
    #[must_use]
    pub fn wildcard(rank: u8) -> Option<Self> {
        WildRank::new(rank).map(Tile::Wildcard)
    }

    /// Draw a tile from the random refill distribution.
    ///
    /// Colors and plain skulls share one weight, skullbombs half of it.
    /// Wildcards, experience and money never appear.
    pub fn random(rng: &mut SimRng) -> Self {
        let weights = RANDOM_TILES.map(|(_, w)| w);
        let index = rng.choose_weighted(&weights).unwrap_or(0);
        RANDOM_TILES[index].0
    }

    #[inline]
    #[must_use]
    pub const fn is_blank(self) -> bool {
        matches!(self, Tile::Blank)
    }

    #[inline]
    #[must_use]
    pub const fn is_color(self) -> bool {
        matches!(self, Tile::Red | Tile::Green | Tile::Blue | Tile::Yellow)
    }

    #[inline]
    #[must_use]
    pub const fn is_wildcard(self) -> bool {
        matches!(self, Tile::Wildcard(_))
    }

    /// Plain skull or skullbomb.
    #[inline]
    #[must_use]
    pub const fn is_skull(self) -> bool {
        matches!(self, Tile::Skull | Tile::Skullbomb)
    }

    #[inline]
    #[must_use]
    pub const fn is_skullbomb(self) -> bool {
        matches!(self, Tile::Skullbomb)
    }

    #[inline]
    #[must_use]
    pub const fn is_experience(self) -> bool {
        matches!(self, Tile::Experience)
    }

    #[inline]
    #[must_use]
    pub const fn is_money(self) -> bool {
        matches!(self, Tile::Money)
    }

    /// Rank of a wildcard, `None` for every other tile.
    #[must_use]
    pub const fn wildcard_rank(self) -> Option<u8> {
        match self {
            Tile::Wildcard(rank) => Some(rank.get()),
            _ => None,
        }
    }

    /// Whether `other` can continue a run anchored on `self`.
    #[must_use]
    pub fn matches(self, other: Tile) -> bool {
        match self {
            Tile::Blank => false,
            Tile::Red | Tile::Green | Tile::Blue | Tile::Yellow => {
                self == other || other.is_wildcard()
            }
            Tile::Wildcard(_) => other.is_color() || other.is_wildcard(),
            Tile::Skull | Tile::Skullbomb => other.is_skull(),
            Tile::Experience | Tile::Money => self == other,
        }
    }
}

impl TryFrom<char> for Tile {
    type Error = SimError;

    fn try_from(code: char) -> Result<Self> {
        Tile::from_char(code)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}
