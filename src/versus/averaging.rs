//! Averaging several independent versus simulations.
//!
//! Random refills make any single simulation noisy. `versus_summaries` runs
//! one [`Advisor`] per simulation, each on its own forked seed, and merges
//! their rankings after every turn.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::advisor::{Advisor, AdvisorConfig};
use super::summary::Summary;
use crate::core::{Actor, Board, SimRng, SwapPair};
use crate::error::Result;

/// Options for [`versus_summaries`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VersusOptions {
    /// Whole turns to simulate.
    pub turns: u32,
    /// Independent simulations to average.
    pub simulations: usize,
    /// Seed the per-simulation seeds are forked from.
    pub seed: u64,
    pub advisor: AdvisorConfig,
}

impl Default for VersusOptions {
    fn default() -> Self {
        Self {
            turns: 2,
            simulations: 2,
            seed: 42,
            advisor: AdvisorConfig::default(),
        }
    }
}

impl VersusOptions {
    pub fn with_turns(mut self, turns: u32) -> Self {
        self.turns = turns;
        self
    }

    pub fn with_simulations(mut self, simulations: usize) -> Self {
        self.simulations = simulations;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_advisor(mut self, advisor: AdvisorConfig) -> Self {
        self.advisor = advisor;
        self
    }
}

/// A root action's summary averaged over simulations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AveragedSummary {
    pub board: Board,
    pub action: SwapPair,
    pub score: f64,
    pub mana_drain_leaves: f64,
    pub total_leaves: f64,
    /// Simulations that reported this action.
    pub simulations: usize,
}

impl AveragedSummary {
    fn average(summaries: &[Summary]) -> Option<Self> {
        let first = summaries.first()?;
        let n = summaries.len() as f64;
        let mean = |f: fn(&Summary) -> f64| summaries.iter().map(f).sum::<f64>() / n;
        Some(Self {
            board: first.board,
            action: first.action,
            score: mean(|s| s.score),
            mana_drain_leaves: mean(|s| s.mana_drain_leaves as f64),
            total_leaves: mean(|s| s.total_leaves as f64),
            simulations: summaries.len(),
        })
    }

    /// Share of leaves that end in a mana drain.
    #[must_use]
    pub fn mana_drain_ratio(&self) -> f64 {
        if self.total_leaves > 0.0 {
            self.mana_drain_leaves / self.total_leaves
        } else {
            0.0
        }
    }
}

/// Rank the player's moves on `board`, averaged over several simulations.
///
/// `on_turn` receives the turn number and the ranking after every simulated
/// turn. The ranking after the last turn is returned.
pub fn versus_summaries<F>(
    board: Board,
    player: Actor,
    opponent: Actor,
    options: &VersusOptions,
    mut on_turn: F,
) -> Result<Vec<AveragedSummary>>
where
    F: FnMut(u32, &[AveragedSummary]),
{
    let mut seeds = SimRng::new(options.seed);
    let mut advisors: Vec<Advisor> = (0..options.simulations)
        .map(|_| {
            let sim = options.advisor.sim.clone().with_seed(seeds.fork().seed());
            let mut advisor = Advisor::new(options.advisor.clone().with_sim(sim));
            advisor.reset(board, player, opponent);
            advisor
        })
        .collect();

    let mut ranking = Vec::new();
    for turn in 1..=options.turns {
        let mut order: Vec<SwapPair> = Vec::new();
        let mut by_action: FxHashMap<SwapPair, Vec<Summary>> = FxHashMap::default();
        for advisor in &mut advisors {
            advisor.simulate_next_turn()?;
            for summary in advisor.sorted_current_summaries() {
                let entry = by_action.entry(summary.action).or_insert_with(|| {
                    order.push(summary.action);
                    Vec::new()
                });
                entry.push(summary);
            }
        }

        ranking = order
            .iter()
            .filter_map(|action| by_action.get(action))
            .filter_map(|summaries| AveragedSummary::average(summaries))
            .collect();
        ranking.sort_by(|a, b| b.score.total_cmp(&a.score));
        on_turn(turn, &ranking);
    }
    Ok(ranking)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Side;

    fn summary(score: f64, drains: usize, leaves: usize) -> Summary {
        Summary {
            board: Board::empty(),
            action: SwapPair::new((7, 0), (7, 1)),
            score,
            mana_drain_leaves: drains,
            total_leaves: leaves,
        }
    }

    #[test]
    fn test_average() {
        let avg = AveragedSummary::average(&[summary(4.0, 1, 4), summary(2.0, 0, 2)]).unwrap();
        assert_eq!(avg.score, 3.0);
        assert_eq!(avg.mana_drain_leaves, 0.5);
        assert_eq!(avg.total_leaves, 3.0);
        assert_eq!(avg.simulations, 2);
        assert!((avg.mana_drain_ratio() - 1.0 / 6.0).abs() < 1e-9);
        assert_eq!(AveragedSummary::average(&[]), None);
    }

    #[test]
    fn test_blank_board_reports_every_turn() {
        let mut turns = Vec::new();
        let ranking = versus_summaries(
            Board::empty(),
            Actor::generic_versus(Side::Player),
            Actor::generic_versus(Side::Opponent),
            &VersusOptions::default().with_turns(3),
            |turn, ranking| turns.push((turn, ranking.len())),
        )
        .unwrap();
        assert!(ranking.is_empty());
        assert_eq!(turns, vec![(1, 0), (2, 0), (3, 0)]);
    }
}
