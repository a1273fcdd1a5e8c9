//! Pruning used by the capture solver.

use log::trace;

use super::feasibility::{is_impossible_by_count, PruneThresholds};
use super::trie::DuplicateTrie;
use crate::sim::{State, StateFilter};

/// Rejects boards already explored elsewhere in the search and boards that
/// can no longer be emptied.
///
/// Every board offered is recorded, so the filter belongs to a single solve.
#[derive(Clone, Debug, Default)]
pub struct CaptureFilter {
    trie: DuplicateTrie,
    thresholds: PruneThresholds,
}

impl CaptureFilter {
    #[must_use]
    pub fn new(thresholds: PruneThresholds) -> Self {
        Self {
            trie: DuplicateTrie::new(),
            thresholds,
        }
    }

    #[must_use]
    pub fn trie(&self) -> &DuplicateTrie {
        &self.trie
    }

    /// Forget every recorded board.
    pub fn clear(&mut self) {
        self.trie.clear();
    }
}

impl StateFilter for CaptureFilter {
    fn reject(&mut self, state: &State) -> bool {
        if self.trie.find_or_graft(&state.board) {
            trace!("duplicate board at turn {}", state.turn);
            return true;
        }
        if is_impossible_by_count(&state.board, &self.thresholds) {
            trace!("board at turn {} cannot be cleared", state.turn);
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Actor, Board, Side};

    fn state(bottom: &str) -> State {
        let board: Board = format!("{}{bottom}", "........\n".repeat(7)).parse().unwrap();
        State::new(
            board,
            Actor::builder(Side::Player).build().unwrap(),
            Actor::builder(Side::Opponent).build().unwrap(),
        )
    }

    #[test]
    fn test_rejects_duplicate() {
        let mut filter = CaptureFilter::default();
        let s = state("sss.....");
        assert!(!filter.reject(&s));
        assert!(filter.reject(&s));
    }

    #[test]
    fn test_rejects_impossible_first_time() {
        let mut filter = CaptureFilter::default();
        assert!(filter.reject(&state("ss......")));
        assert_eq!(filter.trie().len(), 1);
    }

    #[test]
    fn test_clear_allows_board_again() {
        let mut filter = CaptureFilter::default();
        let s = state("rrr.....");
        assert!(!filter.reject(&s));
        filter.clear();
        assert!(!filter.reject(&s));
    }
}
