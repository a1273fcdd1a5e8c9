//! Search for a sequence of swaps that empties the board.

use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::feasibility::PruneThresholds;
use super::filter::CaptureFilter;
use crate::core::{Actor, Board, Side, SwapPair};
use crate::sim::{SimConfig, SimStats, SimTree, State, TurnSimulator};

/// Capture solver configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Seed for the job ordering.
    pub seed: u64,

    /// Give up once the tree holds this many nodes (0 = unlimited).
    pub max_nodes: usize,

    pub thresholds: PruneThresholds,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            max_nodes: 0,
            thresholds: PruneThresholds::default(),
        }
    }
}

impl CaptureConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    pub fn with_thresholds(mut self, thresholds: PruneThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    fn sim_config(&self) -> SimConfig {
        SimConfig::default()
            .with_random_fill(false)
            .with_shuffle_jobs(true)
            .with_seed(self.seed)
            .with_max_nodes(self.max_nodes)
    }
}

/// Solves capture puzzles.
///
/// Every call to [`CaptureSolver::solve`] is an independent session with
/// its own tree and duplicate index. Counters from the last session stay
/// readable afterwards.
#[derive(Clone, Debug, Default)]
pub struct CaptureSolver {
    config: CaptureConfig,
    stats: SimStats,
    nodes: usize,
}

impl CaptureSolver {
    #[must_use]
    pub fn new(config: CaptureConfig) -> Self {
        Self {
            config,
            stats: SimStats::default(),
            nodes: 0,
        }
    }

    #[must_use]
    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    /// Counters from the last solve.
    #[must_use]
    pub fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Tree size reached by the last solve.
    #[must_use]
    pub fn nodes_explored(&self) -> usize {
        self.nodes
    }

    /// Swaps, in order, that leave `board` empty. Empty if none was found.
    pub fn solve(&mut self, board: &Board) -> Vec<SwapPair> {
        let root = State::new(*board, Actor::empty(Side::Player), Actor::empty(Side::Opponent));
        let mut tree = SimTree::new(root);
        let root = tree.root();
        let mut simulator = TurnSimulator::new(self.config.sim_config())
            .with_filter(CaptureFilter::new(self.config.thresholds));

        let mut solution = None;
        match simulator.all_ends_of_turn(&mut tree, root) {
            Ok(mut ends) => {
                while let Some(end) = ends.next() {
                    let cleared = ends
                        .tree()
                        .source_state(end)
                        .is_some_and(|state| state.board.is_empty());
                    if cleared {
                        solution = Some(ends.tree().swaps_to(end));
                        break;
                    }
                }
            }
            Err(err) => warn!("capture search could not start: {err}"),
        }

        self.stats = simulator.stats().clone();
        self.nodes = tree.len();
        match solution {
            Some(swaps) => {
                info!(
                    "capture solved in {} swaps after {} nodes",
                    swaps.len(),
                    self.nodes
                );
                swaps
            }
            None => {
                info!("capture search exhausted after {} nodes", self.nodes);
                Vec::new()
            }
        }
    }
}

/// Solve `board` with the default configuration.
#[must_use]
pub fn capture(board: &Board) -> Vec<SwapPair> {
    CaptureSolver::default().solve(board)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builders() {
        let config = CaptureConfig::default().with_seed(7).with_max_nodes(100);
        assert_eq!(config.seed, 7);
        assert_eq!(config.max_nodes, 100);
        let sim = config.sim_config();
        assert!(sim.shuffle_jobs);
        assert!(!sim.random_fill);
        assert_eq!(sim.seed, 7);
        assert_eq!(sim.max_nodes, 100);
    }

    #[test]
    fn test_empty_board_needs_no_swaps() {
        let mut solver = CaptureSolver::default();
        assert!(solver.solve(&Board::empty()).is_empty());
        assert_eq!(solver.stats().mana_drains, 1);
    }

    #[test]
    fn test_one_swap_capture() {
        let board: Board = "........\n........\n........\n........\n........\n........\n........\nrr.r...."
            .parse()
            .unwrap();
        assert_eq!(capture(&board), vec![SwapPair::new((7, 2), (7, 3))]);
    }

    #[test]
    fn test_unsolvable_board() {
        let board: Board = "........\n........\n........\n........\n........\n........\n........\nrg......"
            .parse()
            .unwrap();
        let mut solver = CaptureSolver::default();
        assert!(solver.solve(&board).is_empty());
        assert!(solver.nodes_explored() >= 2);
    }
}
