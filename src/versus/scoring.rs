//! How an actor values a state.

use serde::{Deserialize, Serialize};

use crate::core::{Actor, Resource, Side};
use crate::sim::State;

/// Worth of one point of each resource.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub health: f64,
    /// Applied to each of the four mana colors.
    pub mana: f64,
    pub experience: f64,
    pub money: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            health: 2.0,
            mana: 1.0,
            experience: 0.5,
            money: 0.5,
        }
    }
}

impl ScoringWeights {
    /// Weighted sum of an actor's current resources.
    #[must_use]
    pub fn evaluate(&self, actor: &Actor) -> f64 {
        let value = |resource| f64::from(actor.current(resource));
        let mana: f64 = Resource::MANA.into_iter().map(value).sum();
        self.health * value(Resource::Health)
            + self.mana * mana
            + self.experience * value(Resource::Experience)
            + self.money * value(Resource::Money)
    }

    /// How much better `end` is than `start` for `side` compared with its
    /// rival. Positive favors `side`.
    #[must_use]
    pub fn relative_score(&self, start: &State, end: &State, side: Side) -> f64 {
        let margin = |state: &State| {
            self.evaluate(state.actor(side)) - self.evaluate(state.actor(side.other()))
        };
        margin(end) - margin(start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Board;

    fn actor(side: Side) -> Actor {
        Resource::ALL
            .into_iter()
            .fold(Actor::builder(side), |b, r| b.pool(r, 50, 100))
            .build()
            .unwrap()
    }

    fn state() -> State {
        State::new(Board::empty(), actor(Side::Player), actor(Side::Opponent))
    }

    #[test]
    fn test_evaluate() {
        // 50 * 2 + 4 * 50 + 0.5 * 50 * 2
        assert_eq!(ScoringWeights::default().evaluate(&actor(Side::Player)), 350.0);
    }

    #[test]
    fn test_evaluate_generic_actor() {
        // 50 * 2 + 4 * 20
        let weights = ScoringWeights::default();
        assert_eq!(weights.evaluate(&Actor::generic_versus(Side::Player)), 180.0);
    }

    #[test]
    fn test_relative_score_is_antisymmetric() {
        let weights = ScoringWeights::default();
        let start = state();
        let mut end = start;
        end.opponent.add(Resource::Health, -3);
        end.player.add(Resource::Experience, 3);

        assert_eq!(weights.relative_score(&start, &end, Side::Player), 7.5);
        assert_eq!(weights.relative_score(&start, &end, Side::Opponent), -7.5);
        assert_eq!(weights.relative_score(&start, &start, Side::Player), 0.0);
    }
}
