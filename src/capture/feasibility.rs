//! Tile-count test for boards that can no longer be cleared.
//!
//! A board is hopeless when some tile type is present but too rare to ever
//! form a group, unless a skullbomb or a wildcard could still help. The test
//! is a necessary condition only: a board that passes may still be stuck.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{Board, Tile};

/// Tile types that only leave the board by matching.
const PLAIN_TYPES: [Tile; 7] = [
    Tile::Red,
    Tile::Green,
    Tile::Blue,
    Tile::Yellow,
    Tile::Experience,
    Tile::Money,
    Tile::Skull,
];

/// Counts used by [`is_impossible_by_count`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PruneThresholds {
    /// Skulls plus skullbombs that keep a board with a skullbomb alive.
    pub skullbomb_trigger: usize,
    /// Wildcards plus one color that keep a board with a wildcard alive.
    pub wildcard_trigger: usize,
    /// Smallest group that can be matched.
    pub min_group: usize,
}

impl Default for PruneThresholds {
    fn default() -> Self {
        Self {
            skullbomb_trigger: 3,
            wildcard_trigger: 3,
            min_group: 3,
        }
    }
}

/// Non-blank tiles on a board by type, every wildcard rank in one bucket.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TileCounts {
    counts: FxHashMap<Tile, usize>,
    wildcards: usize,
}

impl TileCounts {
    #[must_use]
    pub fn of(board: &Board) -> Self {
        let mut counts = Self::default();
        for (_, tile) in board.positions_with_tile() {
            if tile.is_wildcard() {
                counts.wildcards += 1;
            } else if !tile.is_blank() {
                *counts.counts.entry(tile).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Count of a non-wildcard tile type.
    #[must_use]
    pub fn get(&self, tile: Tile) -> usize {
        if tile.is_wildcard() {
            self.wildcards
        } else {
            self.counts.get(&tile).copied().unwrap_or(0)
        }
    }

    /// Wildcards of any rank.
    #[must_use]
    pub fn wildcards(&self) -> usize {
        self.wildcards
    }
}

/// Whether `board` can be ruled out by counting tiles.
#[must_use]
pub fn is_impossible_by_count(board: &Board, thresholds: &PruneThresholds) -> bool {
    let counts = TileCounts::of(board);

    let skullbombs = counts.get(Tile::Skullbomb);
    if skullbombs > 0 && skullbombs + counts.get(Tile::Skull) >= thresholds.skullbomb_trigger {
        return false;
    }

    let wildcards = counts.wildcards();
    if wildcards > 0
        && Tile::COLORS
            .iter()
            .any(|&color| wildcards + counts.get(color) >= thresholds.wildcard_trigger)
    {
        return false;
    }

    PLAIN_TYPES.iter().any(|&tile| {
        let n = counts.get(tile);
        n > 0 && n < thresholds.min_group
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Money in column 7 of rows 3, 5 and 6 plus the given bottom row.
    fn board(bottom: &str) -> Board {
        format!("........\n........\n........\n.......m\n........\n.......m\n.......m\n{bottom}")
            .parse()
            .unwrap()
    }

    #[test]
    fn test_counts_collapse_wildcards() {
        let counts = TileCounts::of(&board("rr2.4..m"));
        assert_eq!(counts.get(Tile::Red), 2);
        assert_eq!(counts.get(Tile::Money), 4);
        assert_eq!(counts.wildcards(), 2);
        assert_eq!(counts.get(Tile::Blank), 0);
    }

    #[test]
    fn test_skullbomb_with_enough_skulls_allowed() {
        assert!(!is_impossible_by_count(&board("ss..*..m"), &PruneThresholds::default()));
    }

    #[test]
    fn test_wildcard_with_enough_of_a_color_allowed() {
        assert!(!is_impossible_by_count(&board("rr..4..m"), &PruneThresholds::default()));
    }

    #[test]
    fn test_too_few_of_a_type_is_impossible() {
        let thresholds = PruneThresholds::default();
        for bottom in ["xx.....m", "ss.....m", "rr.....m"] {
            assert!(is_impossible_by_count(&board(bottom), &thresholds), "{bottom}");
        }
        let experience: Board = "........\n........\n........\n.......x\n........\n.......x\n.......x\nmm.....x"
            .parse()
            .unwrap();
        assert!(is_impossible_by_count(&experience, &thresholds));
    }

    #[test]
    fn test_empty_and_plentiful_boards_allowed() {
        let thresholds = PruneThresholds::default();
        assert!(!is_impossible_by_count(&Board::empty(), &thresholds));
        assert!(!is_impossible_by_count(&board("rrr....m"), &thresholds));
    }

    #[test]
    fn test_thresholds_are_configurable() {
        let strict = PruneThresholds {
            min_group: 5,
            ..PruneThresholds::default()
        };
        assert!(is_impossible_by_count(&board("rrr....m"), &strict));
    }
}
