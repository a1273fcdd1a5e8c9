//! Pruning hook consulted before a settled state is queued for expansion.

use super::node::State;

/// Decides whether a freshly settled state should be pruned.
///
/// Rejected states get a `Filtered` transition and are never expanded.
pub trait StateFilter {
    /// `true` to prune `state`.
    fn reject(&mut self, state: &State) -> bool;
}

/// Never prunes.
#[derive(Clone, Copy, Debug, Default)]
pub struct AcceptAll;

impl StateFilter for AcceptAll {
    fn reject(&mut self, _state: &State) -> bool {
        false
    }
}

impl<F> StateFilter for F
where
    F: FnMut(&State) -> bool,
{
    fn reject(&mut self, state: &State) -> bool {
        self(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Actor, Board, Side};

    fn state() -> State {
        State::new(
            Board::empty(),
            Actor::generic_versus(Side::Player),
            Actor::generic_versus(Side::Opponent),
        )
    }

    #[test]
    fn test_accept_all() {
        assert!(!AcceptAll.reject(&state()));
    }

    #[test]
    fn test_closure_filter_keeps_its_state() {
        let mut seen = 0;
        let mut every_other = |_: &State| {
            seen += 1;
            seen % 2 == 0
        };
        assert!(!every_other.reject(&state()));
        assert!(every_other.reject(&state()));
    }
}
