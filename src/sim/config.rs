//! Turn simulator configuration.

use serde::{Deserialize, Serialize};

/// Turn simulator configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Refill blanks with random tiles after every pass.
    /// Off for puzzles that must end on an empty board.
    pub random_fill: bool,

    /// Actions granted at the start of each new turn.
    /// A bonus action can push the count above this within a turn.
    pub actions_per_turn: i32,

    /// Visit the states produced by one expansion in random order.
    /// Avoids always diving down the top-left swaps first.
    pub shuffle_jobs: bool,

    /// Random seed for refills and job shuffling.
    /// Same seed produces the same tree.
    pub seed: u64,

    /// Stop expanding once the tree holds this many nodes (0 = unlimited).
    /// The tree stays a valid partial result when the budget is hit.
    pub max_nodes: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            random_fill: false,
            actions_per_turn: 1,
            shuffle_jobs: false,
            seed: 42,
            max_nodes: 0,
        }
    }
}

impl SimConfig {
    /// Set whether blanks are refilled with random tiles.
    pub fn with_random_fill(mut self, random_fill: bool) -> Self {
        self.random_fill = random_fill;
        self
    }

    /// Set the actions granted per turn.
    pub fn with_actions_per_turn(mut self, actions: i32) -> Self {
        self.actions_per_turn = actions;
        self
    }

    /// Set whether sibling states are visited in random order.
    pub fn with_shuffle_jobs(mut self, shuffle: bool) -> Self {
        self.shuffle_jobs = shuffle;
        self
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the node budget.
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SimConfig::default();
        assert!(!config.random_fill);
        assert!(!config.shuffle_jobs);
        assert_eq!(config.actions_per_turn, 1);
        assert_eq!(config.seed, 42);
        assert_eq!(config.max_nodes, 0);
    }

    #[test]
    fn test_builder_pattern() {
        let config = SimConfig::default()
            .with_random_fill(true)
            .with_actions_per_turn(2)
            .with_shuffle_jobs(true)
            .with_seed(7)
            .with_max_nodes(500);
        assert!(config.random_fill);
        assert!(config.shuffle_jobs);
        assert_eq!(config.actions_per_turn, 2);
        assert_eq!(config.seed, 7);
        assert_eq!(config.max_nodes, 500);
    }

    #[test]
    fn test_serialization() {
        let config = SimConfig::default().with_seed(99);
        let json = serde_json::to_string(&config).unwrap();
        let back: SimConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
