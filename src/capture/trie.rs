//! Trie of every board seen during one capture solve.
//!
//! Keyed by the 64 cells in row-major order. Each level holds the tiles seen
//! at that cell so far, so two boards share a path for as long as their
//! cells agree.

use smallvec::SmallVec;

use crate::core::{Board, Tile};

#[derive(Clone, Debug, Default)]
struct TrieNode {
    children: SmallVec<[(Tile, u32); 4]>,
}

/// Records boards and answers whether a board was already recorded.
#[derive(Clone, Debug)]
pub struct DuplicateTrie {
    nodes: Vec<TrieNode>,
    boards: usize,
}

impl Default for DuplicateTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl DuplicateTrie {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
            boards: 0,
        }
    }

    /// Walk the path for `board`, grafting whatever is missing.
    ///
    /// Returns `true` if the whole path already existed.
    pub fn find_or_graft(&mut self, board: &Board) -> bool {
        let mut at = 0usize;
        let mut seen = true;
        for (_, tile) in board.positions_with_tile() {
            let existing = self.nodes[at]
                .children
                .iter()
                .find(|(t, _)| *t == tile)
                .map(|&(_, child)| child as usize);
            at = match existing {
                Some(child) => child,
                None => {
                    seen = false;
                    let child = self.nodes.len();
                    self.nodes.push(TrieNode::default());
                    self.nodes[at].children.push((tile, child as u32));
                    child
                }
            };
        }
        if !seen {
            self.boards += 1;
        }
        seen
    }

    /// Forget every board.
    pub fn clear(&mut self) {
        self.nodes.truncate(1);
        self.nodes[0].children.clear();
        self.boards = 0;
    }

    /// Distinct boards recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.boards
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boards == 0
    }

    /// Trie nodes allocated, root included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(bottom: &str) -> Board {
        let mut text = "........\n".repeat(7);
        text.push_str(bottom);
        text.parse().unwrap()
    }

    #[test]
    fn test_second_sighting_is_duplicate() {
        let mut trie = DuplicateTrie::new();
        assert!(!trie.find_or_graft(&board("ss......")));
        assert!(trie.find_or_graft(&board("ss......")));
        assert_eq!(trie.len(), 1);
    }

    #[test]
    fn test_boards_share_prefix() {
        let mut trie = DuplicateTrie::new();
        trie.find_or_graft(&board("ss......"));
        let after_first = trie.node_count();
        assert_eq!(after_first, 65);

        // Differs only in the last cell, so one new node.
        assert!(!trie.find_or_graft(&board("ss.....r")));
        assert_eq!(trie.node_count(), after_first + 1);
        assert_eq!(trie.len(), 2);
    }

    #[test]
    fn test_clear_forgets_boards() {
        let mut trie = DuplicateTrie::new();
        trie.find_or_graft(&board("rgb....."));
        trie.clear();
        assert!(trie.is_empty());
        assert_eq!(trie.node_count(), 1);
        assert!(!trie.find_or_graft(&board("rgb.....")));
    }
}
