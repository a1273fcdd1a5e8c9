//! Turn-by-turn advice for a versus match.

use log::info;
use serde::{Deserialize, Serialize};

use super::scoring::ScoringWeights;
use super::summary::{summarize_action, Summary};
use crate::core::{Actor, Board};
use crate::error::Result;
use crate::sim::{SimConfig, SimTree, State, TurnSimulator};

/// Advisor configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AdvisorConfig {
    /// Simulation settings. Random refill is on, as in a real match.
    pub sim: SimConfig,
    pub weights: ScoringWeights,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            sim: SimConfig::default().with_random_fill(true),
            weights: ScoringWeights::default(),
        }
    }
}

impl AdvisorConfig {
    pub fn with_sim(mut self, sim: SimConfig) -> Self {
        self.sim = sim;
        self
    }

    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }
}

/// Simulates a live position one whole turn at a time and ranks the
/// player's moves.
pub struct Advisor {
    config: AdvisorConfig,
    simulator: TurnSimulator,
    tree: Option<SimTree>,
    completed_turn: u32,
}

impl Default for Advisor {
    fn default() -> Self {
        Self::new(AdvisorConfig::default())
    }
}

impl Advisor {
    #[must_use]
    pub fn new(config: AdvisorConfig) -> Self {
        let simulator = TurnSimulator::new(config.sim.clone());
        Self {
            config,
            simulator,
            tree: None,
            completed_turn: 0,
        }
    }

    #[must_use]
    pub fn config(&self) -> &AdvisorConfig {
        &self.config
    }

    /// Start over from a new position with one action for the player.
    pub fn reset(&mut self, board: Board, player: Actor, opponent: Actor) {
        self.reset_with_extra_actions(board, player, opponent, 0);
    }

    /// Start over from a new position where the player already earned
    /// `extra_actions` bonus actions.
    pub fn reset_with_extra_actions(
        &mut self,
        board: Board,
        player: Actor,
        opponent: Actor,
        extra_actions: i32,
    ) {
        let root = State::new(board, player, opponent).with_actions(1 + extra_actions);
        self.simulator = TurnSimulator::new(self.config.sim.clone());
        self.tree = Some(SimTree::new(root));
        self.completed_turn = 0;
    }

    /// Simulate one more whole turn.
    ///
    /// Returns whether the turn produced any end of turn. Without a reset
    /// there is nothing to simulate.
    pub fn simulate_next_turn(&mut self) -> Result<bool> {
        let Some(tree) = self.tree.as_mut() else {
            return Ok(false);
        };
        let root = tree.root();
        let ends = self.simulator.ends_of_next_whole_turn(tree, root)?;
        if ends.is_empty() {
            return Ok(false);
        }
        self.completed_turn += 1;
        info!(
            "turn {} simulated: {} ends of turn, {} nodes",
            self.completed_turn,
            ends.len(),
            tree.len()
        );
        Ok(true)
    }

    /// Turns simulated since the last reset.
    #[must_use]
    pub fn current_completed_turn(&self) -> u32 {
        self.completed_turn
    }

    /// One summary per root swap, best for the player first.
    #[must_use]
    pub fn sorted_current_summaries(&self) -> Vec<Summary> {
        let Some(tree) = &self.tree else {
            return Vec::new();
        };
        let mut summaries: Vec<Summary> = tree
            .children(tree.root())
            .iter()
            .filter_map(|&action| summarize_action(tree, action, &self.config.weights))
            .collect();
        summaries.sort_by(|a, b| b.score.total_cmp(&a.score));
        summaries
    }

    /// The tree grown so far, if reset.
    #[must_use]
    pub fn tree(&self) -> Option<&SimTree> {
        self.tree.as_ref()
    }
}
