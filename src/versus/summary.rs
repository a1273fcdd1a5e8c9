//! Ranking one root action by its most realistic outcome.
//!
//! ## Backward pass
//!
//! Walks the action's subtree children first, visiting only the action
//! itself and end of turn nodes ("targets"). Each target receives the best
//! outcomes already chosen by the targets below it and keeps the one best
//! for the actor choosing at that point:
//!
//! - at an end of turn, the actor whose turn comes next
//! - at the root action, the actor making it
//!
//! An end of turn with nothing below it is its own outcome. The pass keeps
//! its partial results in a side map keyed by node, so it never recurses.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::scoring::ScoringWeights;
use crate::core::{Board, Side, SwapPair};
use crate::sim::{NodeId, SimTree, State, Transition};

/// Outcome of one root action.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Board the action is made on.
    pub board: Board,
    pub action: SwapPair,
    /// Relative score for the player. Higher is better.
    pub score: f64,
    /// Leaves under the action that are mana drains.
    pub mana_drain_leaves: usize,
    pub total_leaves: usize,
}

/// Summarize the root action `action` of `tree`.
///
/// `None` if `action` is not a swap hanging off a state, or not a node of
/// `tree` at all.
#[must_use]
pub fn summarize_action(tree: &SimTree, action: NodeId, weights: &ScoringWeights) -> Option<Summary> {
    let pair = tree.try_get(action)?.transition()?.swap_pair()?;
    let root = *tree.source_state(action)?;
    let is_target = |id: NodeId| id == action || tree.transition(id).is_some_and(Transition::is_end_of_turn);

    let mut outcomes: FxHashMap<NodeId, Vec<NodeId>> = FxHashMap::default();
    let mut best_for_action = action;
    for id in tree.post_order(action) {
        if !is_target(id) {
            continue;
        }
        let Some(start) = tree.source_state(id) else {
            continue;
        };
        let chooser = if id == action {
            start.active_side()
        } else {
            start.passive_side()
        };
        let candidates = outcomes.remove(&id).unwrap_or_else(|| vec![id]);
        let best = pick_best(tree, weights, start, &candidates, chooser).unwrap_or(id);

        if id == action {
            best_for_action = best;
            break;
        }
        if let Some(target) = tree.ancestors(id).find(|&a| is_target(a)) {
            outcomes.entry(target).or_default().push(best);
        }
    }

    let end = tree.source_state(best_for_action).copied().unwrap_or(root);
    let leaves = tree.leaves(action);
    let mana_drain_leaves = leaves
        .iter()
        .filter(|&&leaf| tree.transition(leaf).is_some_and(Transition::is_mana_drain))
        .count();

    Some(Summary {
        board: root.board,
        action: pair,
        score: weights.relative_score(&root, &end, Side::Player),
        mana_drain_leaves,
        total_leaves: leaves.len(),
    })
}

/// The candidate outcome scoring highest for `chooser`, first one on ties.
fn pick_best(
    tree: &SimTree,
    weights: &ScoringWeights,
    start: &State,
    candidates: &[NodeId],
    chooser: Side,
) -> Option<NodeId> {
    let mut best: Option<(NodeId, f64)> = None;
    for &candidate in candidates {
        let Some(end) = tree.source_state(candidate) else {
            continue;
        };
        let score = weights.relative_score(start, end, chooser);
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((candidate, score));
        }
    }
    best.map(|(id, _)| id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Actor, Resource};

    fn root() -> State {
        State::new(
            Board::empty(),
            Actor::generic_versus(Side::Player),
            Actor::generic_versus(Side::Opponent),
        )
    }

    /// One player swap, then two opponent replies: one costs the player 5
    /// health, the other only 1. The opponent picks the harsher reply.
    #[test]
    fn test_opponent_picks_its_best_reply() {
        let mut tree = SimTree::new(root());
        let r = tree.root();
        let swap = tree.attach(r, Transition::Swap(SwapPair::new((7, 0), (7, 1))));
        let mut after = root().with_actions(0);
        after.player.add(Resource::Red, 3);
        let s1 = tree.attach(swap, after);
        let eot = tree.attach(s1, Transition::EndOfTurn { mana_drain: false });

        let next = after.with_turn(2).with_actions(1);
        let s2 = tree.attach(eot, next);
        for damage in [5, 1] {
            let reply = tree.attach(s2, Transition::Swap(SwapPair::new((0, 0), (0, 1))));
            let mut hit = next.with_actions(0);
            hit.player.add(Resource::Health, -damage);
            let s = tree.attach(reply, hit);
            tree.attach(s, Transition::EndOfTurn { mana_drain: damage == 1 });
        }

        let summary = summarize_action(&tree, swap, &ScoringWeights::default()).unwrap();
        assert_eq!(summary.action, SwapPair::new((7, 0), (7, 1)));
        // +3 red, -5 health * 2
        assert_eq!(summary.score, -7.0);
        assert_eq!(summary.total_leaves, 2);
        assert_eq!(summary.mana_drain_leaves, 1);
        assert_eq!(summary.board, Board::empty());
    }

    #[test]
    fn test_single_turn_uses_end_of_turn() {
        let mut tree = SimTree::new(root());
        let r = tree.root();
        let swap = tree.attach(r, Transition::Swap(SwapPair::new((7, 0), (7, 1))));
        let mut after = root().with_actions(0);
        after.opponent.add(Resource::Health, -4);
        let s1 = tree.attach(swap, after);
        tree.attach(s1, Transition::EndOfTurn { mana_drain: false });

        let summary = summarize_action(&tree, swap, &ScoringWeights::default()).unwrap();
        assert_eq!(summary.score, 8.0);
    }

    #[test]
    fn test_non_swap_is_not_summarized() {
        let mut tree = SimTree::new(root());
        let r = tree.root();
        let eot = tree.attach(r, Transition::EndOfTurn { mana_drain: true });
        assert_eq!(summarize_action(&tree, eot, &ScoringWeights::default()), None);
    }

    #[test]
    fn test_unknown_node_is_not_summarized() {
        let tree = SimTree::new(root());
        let weights = ScoringWeights::default();
        assert_eq!(summarize_action(&tree, NodeId::NONE, &weights), None);
        assert_eq!(summarize_action(&tree, NodeId::new(99), &weights), None);
    }
}
