//! Simulation tree nodes.
//!
//! A tree alternates between two kinds of node:
//!
//! - **State**: a board and both actors at one moment, plus the turn number
//!   and the actions the active actor has left.
//! - **Transition**: the edge out of a state (a swap, a chain reaction, an
//!   end of turn, or a pruning marker). A transition owns at most one
//!   state child.
//!
//! Nodes live in the [`SimTree`](super::SimTree) arena and refer to each
//! other by [`NodeId`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{Actor, Board, Side, SwapPair, TileGroup};

/// Index into the [`SimTree`](super::SimTree) node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel value representing no node.
    pub const NONE: NodeId = NodeId(u32::MAX);

    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Check if this is the NONE sentinel.
    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            write!(f, "NodeId(NONE)")
        } else {
            write!(f, "NodeId({})", self.0)
        }
    }
}

/// Snapshot of the game between moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub board: Board,
    pub player: Actor,
    pub opponent: Actor,
    /// 1-based. Odd turns belong to the player, even turns to the opponent.
    pub turn: u32,
    /// Moves the active actor may still make this turn.
    pub actions_remaining: i32,
}

impl State {
    /// Turn 1 with a single action.
    #[must_use]
    pub fn new(board: Board, player: Actor, opponent: Actor) -> Self {
        Self {
            board,
            player,
            opponent,
            turn: 1,
            actions_remaining: 1,
        }
    }

    #[must_use]
    pub fn with_turn(mut self, turn: u32) -> Self {
        self.turn = turn;
        self
    }

    #[must_use]
    pub fn with_actions(mut self, actions: i32) -> Self {
        self.actions_remaining = actions;
        self
    }

    /// Side moving this turn.
    #[inline]
    #[must_use]
    pub const fn active_side(&self) -> Side {
        if self.turn % 2 == 1 {
            Side::Player
        } else {
            Side::Opponent
        }
    }

    #[inline]
    #[must_use]
    pub const fn passive_side(&self) -> Side {
        self.active_side().other()
    }

    #[must_use]
    pub fn actor(&self, side: Side) -> &Actor {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }

    pub fn actor_mut(&mut self, side: Side) -> &mut Actor {
        match side {
            Side::Player => &mut self.player,
            Side::Opponent => &mut self.opponent,
        }
    }

    #[must_use]
    pub fn active(&self) -> &Actor {
        self.actor(self.active_side())
    }

    #[must_use]
    pub fn passive(&self) -> &Actor {
        self.actor(self.passive_side())
    }

    /// Credit destroyed groups to the active actor and hit the passive one.
    pub fn apply_destroyed(&mut self, groups: &[TileGroup]) {
        let active = self.active_side();
        let attack = self.actor_mut(active).apply_tile_groups(groups);
        self.actor_mut(active.other()).apply_attack(attack);
    }

    /// Empty both actors' mana and end the turn's actions.
    pub fn apply_mana_drain(&mut self) {
        self.player.apply_mana_drain();
        self.opponent.apply_mana_drain();
        self.actions_remaining = 0;
    }

    /// The state after a pass that produced `board` and destroyed `groups`.
    #[must_use]
    pub fn successor(&self, board: Board, actions_remaining: i32, groups: &[TileGroup]) -> Self {
        let mut next = Self {
            board,
            actions_remaining,
            ..*self
        };
        next.apply_destroyed(groups);
        next
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.board)?;
        writeln!(f, "{}", self.player)?;
        writeln!(f, "{}", self.opponent)?;
        write!(
            f,
            "turn {} ({} active), actions remaining {}",
            self.turn,
            self.active_side(),
            self.actions_remaining
        )
    }
}

/// Edge out of a state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transition {
    /// The active actor swapped two tiles.
    Swap(SwapPair),
    /// Tiles that fell into place matched on their own.
    ChainReaction,
    /// The turn is over. A mana drain means no move was available.
    EndOfTurn { mana_drain: bool },
    /// The state was pruned and is not expanded further.
    Filtered,
}

impl Transition {
    #[inline]
    #[must_use]
    pub const fn is_end_of_turn(self) -> bool {
        matches!(self, Transition::EndOfTurn { .. })
    }

    #[inline]
    #[must_use]
    pub const fn is_mana_drain(self) -> bool {
        matches!(self, Transition::EndOfTurn { mana_drain: true })
    }

    #[must_use]
    pub const fn swap_pair(self) -> Option<SwapPair> {
        match self {
            Transition::Swap(pair) => Some(pair),
            _ => None,
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transition::Swap(pair) => write!(f, "swap {pair}"),
            Transition::ChainReaction => write!(f, "chain reaction"),
            Transition::EndOfTurn { mana_drain: false } => write!(f, "end of turn"),
            Transition::EndOfTurn { mana_drain: true } => write!(f, "end of turn (mana drain)"),
            Transition::Filtered => write!(f, "filtered"),
        }
    }
}

/// Payload of a tree node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    State(State),
    Transition(Transition),
}

impl From<State> for NodeKind {
    fn from(state: State) -> Self {
        NodeKind::State(state)
    }
}

impl From<Transition> for NodeKind {
    fn from(transition: Transition) -> Self {
        NodeKind::Transition(transition)
    }
}

/// A node in the simulation tree.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimNode {
    /// Parent node (NONE for root).
    pub parent: NodeId,

    /// Children in the order they were attached.
    pub children: Vec<NodeId>,

    pub kind: NodeKind,
}

impl SimNode {
    #[must_use]
    pub fn new(parent: NodeId, kind: NodeKind) -> Self {
        Self {
            parent,
            children: Vec::new(),
            kind,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    #[inline]
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    #[must_use]
    pub fn state(&self) -> Option<&State> {
        match &self.kind {
            NodeKind::State(state) => Some(state),
            NodeKind::Transition(_) => None,
        }
    }

    #[must_use]
    pub fn transition(&self) -> Option<Transition> {
        match self.kind {
            NodeKind::Transition(transition) => Some(transition),
            NodeKind::State(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Resource, Tile};
    use smallvec::smallvec;

    fn state() -> State {
        State::new(
            Board::empty(),
            Actor::generic_versus(Side::Player),
            Actor::generic_versus(Side::Opponent),
        )
    }

    #[test]
    fn test_node_id_none() {
        assert!(NodeId::NONE.is_none());
        assert!(!NodeId::new(0).is_none());
        assert_eq!(NodeId::new(5).to_string(), "NodeId(5)");
        assert_eq!(NodeId::NONE.to_string(), "NodeId(NONE)");
    }

    #[test]
    fn test_odd_turn_player_is_active() {
        let s = state();
        assert_eq!(s.active_side(), Side::Player);
        assert_eq!(s.active().side(), Side::Player);
        assert_eq!(s.passive().side(), Side::Opponent);
    }

    #[test]
    fn test_even_turn_opponent_is_active() {
        let s = state().with_turn(2);
        assert_eq!(s.active_side(), Side::Opponent);
        assert_eq!(s.passive_side(), Side::Player);
    }

    #[test]
    fn test_apply_destroyed_credits_active_and_attacks_passive() {
        let mut s = state().with_turn(2);
        let groups: Vec<TileGroup> = vec![
            smallvec![Tile::Red, Tile::Red, Tile::Red],
            smallvec![Tile::Skull, Tile::Skull, Tile::Skull],
        ];
        s.apply_destroyed(&groups);
        assert_eq!(s.opponent.current(Resource::Red), 23);
        assert_eq!(s.player.current(Resource::Health), 47);
        assert_eq!(s.player.current(Resource::Red), 20);
    }

    #[test]
    fn test_successor_keeps_turn() {
        let s = state().with_turn(3).with_actions(2);
        let next = s.successor(Board::empty(), 1, &[]);
        assert_eq!(next.turn, 3);
        assert_eq!(next.actions_remaining, 1);
        assert_eq!(next.player, s.player);
    }

    #[test]
    fn test_mana_drain_hits_both_actors() {
        let mut s = state();
        s.apply_mana_drain();
        assert_eq!(s.actions_remaining, 0);
        for mana in Resource::MANA {
            assert_eq!(s.player.current(mana), 0);
            assert_eq!(s.opponent.current(mana), 0);
        }
        assert_eq!(s.player.current(Resource::Health), 50);
    }

    #[test]
    fn test_transition_predicates() {
        assert!(Transition::EndOfTurn { mana_drain: false }.is_end_of_turn());
        assert!(!Transition::EndOfTurn { mana_drain: false }.is_mana_drain());
        assert!(Transition::EndOfTurn { mana_drain: true }.is_mana_drain());
        assert!(!Transition::Filtered.is_end_of_turn());
        let pair = SwapPair::new((0, 0), (0, 1));
        assert_eq!(Transition::Swap(pair).swap_pair(), Some(pair));
        assert_eq!(Transition::ChainReaction.swap_pair(), None);
    }

    #[test]
    fn test_serde_roundtrip() {
        let node = SimNode::new(NodeId::NONE, NodeKind::State(state()));
        let json = serde_json::to_string(&node).unwrap();
        let back: SimNode = serde_json::from_str(&json).unwrap();
        assert_eq!(back.kind, node.kind);
        assert!(back.is_root());
    }
}
