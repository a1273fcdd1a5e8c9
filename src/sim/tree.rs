//! Arena-based simulation tree.
//!
//! Nodes are stored in a flat `Vec<SimNode>` and refer to each other by
//! [`NodeId`]. Children are owned lists of ids, the parent link is a plain
//! id, so the tree has no reference cycles and serializes as-is.

use serde::{Deserialize, Serialize};

use super::node::{NodeId, NodeKind, SimNode, State, Transition};
use crate::core::SwapPair;
use crate::error::{Result, SimError};

/// Arena holding every simulated possibility from one root state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimTree {
    nodes: Vec<SimNode>,
    root: NodeId,
}

impl SimTree {
    /// Create a tree holding only `root`.
    #[must_use]
    pub fn new(root: State) -> Self {
        Self::with_capacity(root, 1024)
    }

    #[must_use]
    pub fn with_capacity(root: State, capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity);
        nodes.push(SimNode::new(NodeId::NONE, NodeKind::State(root)));
        Self {
            nodes,
            root: NodeId::new(0),
        }
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a node by ID.
    ///
    /// # Panics
    ///
    /// Panics if `id` did not come from this tree.
    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> &SimNode {
        &self.nodes[id.index()]
    }

    /// Get a node by ID, `None` for [`NodeId::NONE`] or an id past the end.
    #[inline]
    #[must_use]
    pub fn try_get(&self, id: NodeId) -> Option<&SimNode> {
        if id.is_none() {
            return None;
        }
        self.nodes.get(id.index())
    }

    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.try_get(id).is_some()
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut SimNode {
        &mut self.nodes[id.index()]
    }

    /// Add a child under `parent` and return its id.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is not in this tree. The arena is left untouched.
    pub fn attach(&mut self, parent: NodeId, kind: impl Into<NodeKind>) -> NodeId {
        match self.try_attach(parent, kind) {
            Ok(id) => id,
            Err(err) => panic!("{err}"),
        }
    }

    /// Add a child under `parent`, or fail without touching the arena.
    pub fn try_attach(&mut self, parent: NodeId, kind: impl Into<NodeKind>) -> Result<NodeId> {
        if !self.contains(parent) {
            return Err(SimError::UnknownNode(parent));
        }
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(SimNode::new(parent, kind.into()));
        self.nodes[parent.index()].children.push(id);
        Ok(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree has at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn state(&self, id: NodeId) -> Option<&State> {
        self.get(id).state()
    }

    pub fn state_mut(&mut self, id: NodeId) -> Option<&mut State> {
        match &mut self.get_mut(id).kind {
            NodeKind::State(state) => Some(state),
            NodeKind::Transition(_) => None,
        }
    }

    #[must_use]
    pub fn transition(&self, id: NodeId) -> Option<Transition> {
        self.get(id).transition()
    }

    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.get(id).parent;
        (!parent.is_none()).then_some(parent)
    }

    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.get(id).children
    }

    /// The state a transition leaves from.
    #[must_use]
    pub fn source_state(&self, transition: NodeId) -> Option<&State> {
        self.parent(transition).and_then(|p| self.state(p))
    }

    /// Ancestors of `id`, nearest first, excluding `id` itself.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&n| self.parent(n))
    }

    /// Leaves under `from` (including `from` if it has no children), in
    /// depth-first order.
    #[must_use]
    pub fn leaves(&self, from: NodeId) -> Vec<NodeId> {
        let mut leaves = Vec::new();
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            let children = self.children(id);
            if children.is_empty() {
                leaves.push(id);
            } else {
                stack.extend(children.iter().rev());
            }
        }
        leaves
    }

    /// Every node under `from` with children before their parent.
    #[must_use]
    pub fn post_order(&self, from: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![(from, false)];
        while let Some((id, children_done)) = stack.pop() {
            if children_done {
                order.push(id);
                continue;
            }
            stack.push((id, true));
            stack.extend(self.children(id).iter().rev().map(|&c| (c, false)));
        }
        order
    }

    /// Swaps on the path from the root to `id`, in execution order.
    #[must_use]
    pub fn swaps_to(&self, id: NodeId) -> Vec<SwapPair> {
        let mut swaps: Vec<SwapPair> = std::iter::once(id)
            .chain(self.ancestors(id))
            .filter_map(|n| self.transition(n).and_then(Transition::swap_pair))
            .collect();
        swaps.reverse();
        swaps
    }

    #[must_use]
    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats {
            node_count: self.nodes.len(),
            ..TreeStats::default()
        };
        for node in &self.nodes {
            match node.kind {
                NodeKind::State(state) => {
                    stats.state_count += 1;
                    stats.max_turn = stats.max_turn.max(state.turn);
                }
                NodeKind::Transition(Transition::EndOfTurn { mana_drain }) => {
                    stats.end_of_turn_count += 1;
                    stats.mana_drain_count += usize::from(mana_drain);
                }
                NodeKind::Transition(Transition::Filtered) => stats.filtered_count += 1,
                NodeKind::Transition(_) => {}
            }
        }
        stats
    }
}

/// Counts describing a simulation tree.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeStats {
    /// Total nodes in the arena, states and transitions.
    pub node_count: usize,
    /// State nodes, the root included.
    pub state_count: usize,
    /// End of turn transitions, mana drains included.
    pub end_of_turn_count: usize,
    /// End of turn transitions caused by running out of swaps.
    pub mana_drain_count: usize,
    /// States cut off by the pruning filter.
    pub filtered_count: usize,
    /// Highest turn number of any state.
    pub max_turn: u32,
}

impl TreeStats {
    /// Transitions per state.
    #[must_use]
    pub fn branching_factor(&self) -> f64 {
        if self.state_count == 0 {
            0.0
        } else {
            (self.node_count - self.state_count) as f64 / self.state_count as f64
        }
    }
}
