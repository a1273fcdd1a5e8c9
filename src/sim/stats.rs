//! Counters collected while expanding simulation trees.

use serde::{Deserialize, Serialize};

/// Statistics collected by a [`TurnSimulator`](super::TurnSimulator).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimStats {
    /// States taken off the job stack.
    pub jobs_processed: u64,

    /// Candidate swaps executed.
    pub swaps_tried: u64,

    /// Swaps that destroyed at least one group.
    pub productive_swaps: u64,

    /// Cascades that destroyed more groups after a swap settled.
    pub chain_reactions: u64,

    /// End of turn transitions attached, mana drains included.
    pub ends_of_turn: u64,

    /// Turns ended because no swap could destroy anything.
    pub mana_drains: u64,

    /// States rejected by the state filter.
    pub filtered: u64,

    /// Total time spent expanding (microseconds).
    pub time_us: u64,
}

impl SimStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all statistics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Share of candidate swaps that destroyed something.
    #[must_use]
    pub fn productive_ratio(&self) -> f64 {
        if self.swaps_tried == 0 {
            0.0
        } else {
            self.productive_swaps as f64 / self.swaps_tried as f64
        }
    }

    #[must_use]
    pub fn jobs_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.jobs_processed as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_default() {
        let stats = SimStats::new();
        assert_eq!(stats.jobs_processed, 0);
        assert_eq!(stats.productive_ratio(), 0.0);
        assert_eq!(stats.jobs_per_second(), 0.0);
    }

    #[test]
    fn test_rates() {
        let stats = SimStats {
            jobs_processed: 500,
            swaps_tried: 40,
            productive_swaps: 10,
            time_us: 250_000,
            ..SimStats::default()
        };
        assert!((stats.productive_ratio() - 0.25).abs() < 1e-9);
        assert!((stats.jobs_per_second() - 2000.0).abs() < 1e-6);
    }

    #[test]
    fn test_reset() {
        let mut stats = SimStats {
            filtered: 3,
            ..SimStats::default()
        };
        stats.reset();
        assert_eq!(stats, SimStats::default());
    }
}
