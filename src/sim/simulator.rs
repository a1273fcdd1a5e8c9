//! Turn-by-turn expansion of a simulation tree.
//!
//! ## Expanding one state
//!
//! 1. A state with no actions left ends the turn. The end is a mana drain
//!    if no swap on its board would destroy anything.
//! 2. Otherwise every productive swap gets a `Swap` transition and a result
//!    state with one action spent (plus one back if any destroyed group had
//!    four or more tiles).
//! 3. The result settles through `ChainReaction` transitions until a pass
//!    destroys nothing. The bonus action is granted at most once per swap.
//! 4. The settled state is either pruned by the [`StateFilter`] or pushed
//!    onto the job stack.
//! 5. A state with actions left but no productive swap is a mana drain.
//!
//! ## Entry points
//!
//! - [`TurnSimulator::ends_of_one_turn`]: finish one turn from a root or an
//!   end of turn.
//! - [`TurnSimulator::ends_of_next_whole_turn`]: finish the next turn for
//!   every open end under a root.
//! - [`TurnSimulator::all_ends_of_turn`]: follow every line of play turn
//!   after turn, yielding ends as they are found.
//!
//! The job stack is an explicit worklist, so a caller may stop pulling
//! ends at any point and keep a valid partial tree.

use std::collections::VecDeque;
use std::time::Instant;

use log::{debug, trace, warn};

use super::config::SimConfig;
use super::filter::{AcceptAll, StateFilter};
use super::node::{NodeId, State, Transition};
use super::stats::SimStats;
use super::tree::SimTree;
use crate::core::{Board, SimRng, TileGroup};
use crate::error::{Result, SimError};

/// Destroyed groups of this length or longer grant an extra action.
pub const BONUS_GROUP_LEN: usize = 4;

/// Pending work for one traversal.
#[derive(Debug, Default)]
struct Worklist {
    /// States waiting to be expanded, last in first out.
    jobs: Vec<NodeId>,
    /// Ends of turn found but not yet handed to the caller.
    ends: VecDeque<NodeId>,
}

impl Worklist {
    fn starting_at(job: Option<NodeId>) -> Self {
        Self {
            jobs: job.into_iter().collect(),
            ends: VecDeque::new(),
        }
    }
}

/// Drives expansion of [`SimTree`]s.
///
/// Owns the refill generator and the pruning hook; trees are passed in so
/// one simulator can serve several trees.
pub struct TurnSimulator {
    config: SimConfig,
    rng: SimRng,
    filter: Box<dyn StateFilter>,
    stats: SimStats,
}

impl TurnSimulator {
    #[must_use]
    pub fn new(config: SimConfig) -> Self {
        let rng = SimRng::new(config.seed);
        Self {
            config,
            rng,
            filter: Box::new(AcceptAll),
            stats: SimStats::default(),
        }
    }

    /// Set the pruning hook.
    #[must_use]
    pub fn with_filter<F: StateFilter + 'static>(mut self, filter: F) -> Self {
        self.filter = Box::new(filter);
        self
    }

    #[must_use]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    #[must_use]
    pub fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Expand exactly one turn from `seed`, returning the new ends of turn.
    ///
    /// `seed` must be the root state or an end of turn. An end of turn first
    /// gets the next turn's state. A seed that already has children yields
    /// nothing.
    pub fn ends_of_one_turn(&mut self, tree: &mut SimTree, seed: NodeId) -> Result<Vec<NodeId>> {
        let start = self.seed_state(tree, seed)?;
        let mut work = Worklist::starting_at(start);
        let mut ends = Vec::new();
        while let Some(end) = self.step(tree, &mut work, false) {
            ends.push(end);
        }
        debug!(
            "turn from {seed}: {} ends of turn, {} nodes in tree",
            ends.len(),
            tree.len()
        );
        Ok(ends)
    }

    /// Expand the next whole turn under `root`.
    ///
    /// An unexpanded root is expanded directly. Otherwise every end of turn
    /// leaf that is not a mana drain is expanded by one turn.
    pub fn ends_of_next_whole_turn(&mut self, tree: &mut SimTree, root: NodeId) -> Result<Vec<NodeId>> {
        ensure_root(tree, root)?;
        if tree.get(root).is_leaf() {
            return self.ends_of_one_turn(tree, root);
        }
        let open: Vec<NodeId> = tree
            .leaves(root)
            .into_iter()
            .filter(|&leaf| tree.transition(leaf) == Some(Transition::EndOfTurn { mana_drain: false }))
            .collect();
        let mut ends = Vec::new();
        for seed in open {
            ends.extend(self.ends_of_one_turn(tree, seed)?);
        }
        Ok(ends)
    }

    /// Follow every line of play from `root`, turn after turn.
    ///
    /// Ends of turn are yielded as they are found. Each one that is not a
    /// mana drain opens the next turn, which is explored before older
    /// pending work. The search only stops when every line is exhausted,
    /// pruned, or the node budget is spent.
    pub fn all_ends_of_turn<'a>(
        &'a mut self,
        tree: &'a mut SimTree,
        root: NodeId,
    ) -> Result<EndsOfTurn<'a>> {
        ensure_root(tree, root)?;
        let start = tree.get(root).is_leaf().then_some(root);
        Ok(EndsOfTurn {
            simulator: self,
            tree,
            work: Worklist::starting_at(start),
        })
    }

    /// The state to start a one-turn expansion from, if any.
    fn seed_state(&self, tree: &mut SimTree, seed: NodeId) -> Result<Option<NodeId>> {
        let node = tree.try_get(seed).ok_or(SimError::UnknownNode(seed))?;
        let (is_root, is_leaf) = (node.is_root(), node.is_leaf());
        match node.transition() {
            None if !is_root => Err(SimError::NotRoot(seed)),
            None => Ok(is_leaf.then_some(seed)),
            Some(Transition::EndOfTurn { .. }) if is_leaf => Ok(self.open_next_turn(tree, seed)),
            Some(Transition::EndOfTurn { .. }) => Ok(None),
            Some(_) => Err(SimError::NotEndOfTurn(seed)),
        }
    }

    /// Attach the first state of the turn following `end`.
    fn open_next_turn(&self, tree: &mut SimTree, end: NodeId) -> Option<NodeId> {
        let ended = *tree.source_state(end)?;
        let next = State {
            turn: ended.turn + 1,
            actions_remaining: self.config.actions_per_turn,
            ..ended
        };
        tree.try_attach(end, next).ok()
    }

    /// Run jobs until an end of turn is available.
    fn step(&mut self, tree: &mut SimTree, work: &mut Worklist, continuous: bool) -> Option<NodeId> {
        let started = Instant::now();
        let found = loop {
            if let Some(end) = work.ends.pop_front() {
                if continuous && tree.transition(end) == Some(Transition::EndOfTurn { mana_drain: false }) {
                    work.jobs.extend(self.open_next_turn(tree, end));
                }
                break Some(end);
            }
            if !work.jobs.is_empty() && self.budget_spent(tree) {
                warn!(
                    "node budget of {} reached, abandoning {} pending states",
                    self.config.max_nodes,
                    work.jobs.len()
                );
                work.jobs.clear();
            }
            let Some(job) = work.jobs.pop() else {
                break None;
            };
            self.expand(tree, job, work);
        };
        self.stats.time_us += started.elapsed().as_micros() as u64;
        found
    }

    fn budget_spent(&self, tree: &SimTree) -> bool {
        self.config.max_nodes > 0 && tree.len() >= self.config.max_nodes
    }

    fn fill(&mut self) -> Option<&mut SimRng> {
        if self.config.random_fill {
            Some(&mut self.rng)
        } else {
            None
        }
    }

    /// Expand one state: either end its turn or try every swap.
    fn expand(&mut self, tree: &mut SimTree, job: NodeId, work: &mut Worklist) {
        let Some(&state) = tree.state(job) else {
            return;
        };
        self.stats.jobs_processed += 1;

        if state.actions_remaining <= 0 {
            let drain = !has_productive_swap(&state.board);
            work.ends.push_back(self.end_turn(tree, job, drain));
            return;
        }

        let mut settled = Vec::new();
        let mut productive = false;
        for pair in state.board.potential_swaps() {
            self.stats.swaps_tried += 1;
            let (board, destroyed) = state.board.resolve(Some(pair), None, self.fill());
            if destroyed.is_empty() {
                continue;
            }
            self.stats.productive_swaps += 1;
            productive = true;

            let mut bonus = grants_bonus(&destroyed);
            let mut result = state.successor(
                board,
                state.actions_remaining - 1 + i32::from(bonus),
                &destroyed,
            );
            let swap = tree.attach(job, Transition::Swap(pair));
            let mut at = tree.attach(swap, result);

            loop {
                let (board, destroyed) = result.board.resolve(None, None, self.fill());
                if destroyed.is_empty() {
                    break;
                }
                self.stats.chain_reactions += 1;
                let extra = !bonus && grants_bonus(&destroyed);
                bonus |= extra;
                result = result.successor(
                    board,
                    result.actions_remaining + i32::from(extra),
                    &destroyed,
                );
                let chain = tree.attach(at, Transition::ChainReaction);
                at = tree.attach(chain, result);
            }

            if self.filter.reject(&result) {
                trace!("pruned {at} after {pair}");
                tree.attach(at, Transition::Filtered);
                self.stats.filtered += 1;
            } else {
                settled.push(at);
            }
        }

        if !productive {
            work.ends.push_back(self.end_turn(tree, job, true));
        }

        if self.config.shuffle_jobs {
            self.rng.shuffle(&mut settled);
        }
        // Reversed so the first settled state is expanded first.
        work.jobs.extend(settled.into_iter().rev());
    }

    /// Attach an end of turn under `id`, draining mana if required.
    fn end_turn(&mut self, tree: &mut SimTree, id: NodeId, mana_drain: bool) -> NodeId {
        if mana_drain {
            let fresh = self
                .config
                .random_fill
                .then(|| Board::random_start(&mut self.rng));
            if let Some(state) = tree.state_mut(id) {
                state.apply_mana_drain();
                if let Some(board) = fresh {
                    state.board = board;
                }
            }
            self.stats.mana_drains += 1;
        }
        self.stats.ends_of_turn += 1;
        tree.attach(id, Transition::EndOfTurn { mana_drain })
    }
}

/// Iterator over ends of turn produced by [`TurnSimulator::all_ends_of_turn`].
///
/// Borrows the tree for the duration of the search; [`EndsOfTurn::tree`]
/// gives read access between items.
pub struct EndsOfTurn<'a> {
    simulator: &'a mut TurnSimulator,
    tree: &'a mut SimTree,
    work: Worklist,
}

impl EndsOfTurn<'_> {
    #[must_use]
    pub fn tree(&self) -> &SimTree {
        self.tree
    }

    #[must_use]
    pub fn stats(&self) -> &SimStats {
        self.simulator.stats()
    }

    /// States still waiting to be expanded.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.work.jobs.len()
    }
}

impl Iterator for EndsOfTurn<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        self.simulator.step(self.tree, &mut self.work, true)
    }
}

fn ensure_root(tree: &SimTree, id: NodeId) -> Result<()> {
    let node = tree.try_get(id).ok_or(SimError::UnknownNode(id))?;
    if node.is_root() && node.state().is_some() {
        Ok(())
    } else {
        Err(SimError::NotRoot(id))
    }
}

fn grants_bonus(destroyed: &[TileGroup]) -> bool {
    destroyed.iter().any(|group| group.len() >= BONUS_GROUP_LEN)
}

/// Whether any swap on `board` would destroy something.
#[must_use]
pub fn has_productive_swap(board: &Board) -> bool {
    board
        .potential_swaps()
        .into_iter()
        .any(|pair| !board.resolve(Some(pair), None, None).1.is_empty())
}
