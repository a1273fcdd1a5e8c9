//! Capture solver and versus advisor bindings for Python.

use pyo3::prelude::*;

use crate::capture::CaptureSolver;
use crate::sim::SimConfig;
use crate::versus::{self, Advisor, AdvisorConfig, AveragedSummary, Summary, VersusOptions};

use super::py_core::{PyActor, PyBoard};

type PyPair = ((usize, usize), (usize, usize));

/// One ranked root action.
#[pyclass(name = "Summary")]
#[derive(Clone, Debug)]
pub struct PySummary {
    #[pyo3(get)]
    board: String,
    #[pyo3(get)]
    action: PyPair,
    #[pyo3(get)]
    score: f64,
    #[pyo3(get)]
    mana_drain_leaves: f64,
    #[pyo3(get)]
    total_leaves: f64,
}

#[pymethods]
impl PySummary {
    fn __repr__(&self) -> String {
        format!(
            "Summary(action={:?}, score={}, mana_drains={}/{})",
            self.action, self.score, self.mana_drain_leaves, self.total_leaves
        )
    }
}

impl From<Summary> for PySummary {
    fn from(summary: Summary) -> Self {
        Self {
            board: summary.board.to_string(),
            action: summary.action.as_tuples(),
            score: summary.score,
            mana_drain_leaves: summary.mana_drain_leaves as f64,
            total_leaves: summary.total_leaves as f64,
        }
    }
}

impl From<AveragedSummary> for PySummary {
    fn from(summary: AveragedSummary) -> Self {
        Self {
            board: summary.board.to_string(),
            action: summary.action.as_tuples(),
            score: summary.score,
            mana_drain_leaves: summary.mana_drain_leaves,
            total_leaves: summary.total_leaves,
        }
    }
}

/// Python wrapper for Advisor.
#[pyclass(name = "Advisor", unsendable)]
pub struct PyAdvisor(Advisor);

#[pymethods]
impl PyAdvisor {
    #[new]
    #[pyo3(signature = (random_fill = true, seed = 42))]
    fn new(random_fill: bool, seed: u64) -> Self {
        let sim = SimConfig::default()
            .with_random_fill(random_fill)
            .with_seed(seed);
        Self(Advisor::new(AdvisorConfig::default().with_sim(sim)))
    }

    #[pyo3(signature = (board, player, opponent, extra_actions = 0))]
    fn reset(&mut self, board: &PyBoard, player: &PyActor, opponent: &PyActor, extra_actions: i32) {
        self.0
            .reset_with_extra_actions(board.0, player.0, opponent.0, extra_actions);
    }

    fn simulate_next_turn(&mut self) -> PyResult<bool> {
        Ok(self.0.simulate_next_turn()?)
    }

    #[getter]
    fn current_completed_turn(&self) -> u32 {
        self.0.current_completed_turn()
    }

    fn sorted_current_summaries(&self) -> Vec<PySummary> {
        self.0
            .sorted_current_summaries()
            .into_iter()
            .map(PySummary::from)
            .collect()
    }
}

/// Swaps, in order, that empty the board. Empty if none was found.
#[pyfunction]
#[pyo3(signature = (board, seed = 42))]
pub fn capture(py: Python<'_>, board: &PyBoard, seed: u64) -> Vec<PyPair> {
    let board = board.0;
    py.allow_threads(|| {
        let config = crate::capture::CaptureConfig::default().with_seed(seed);
        CaptureSolver::new(config)
            .solve(&board)
            .into_iter()
            .map(|pair| pair.as_tuples())
            .collect()
    })
}

/// Averaged ranking of the player's moves after `turns` whole turns.
#[pyfunction]
#[pyo3(signature = (board, player, opponent, turns = 2, simulations = 2, seed = 42))]
pub fn versus_summaries(
    py: Python<'_>,
    board: &PyBoard,
    player: &PyActor,
    opponent: &PyActor,
    turns: u32,
    simulations: usize,
    seed: u64,
) -> PyResult<Vec<PySummary>> {
    let options = VersusOptions::default()
        .with_turns(turns)
        .with_simulations(simulations)
        .with_seed(seed);
    let (board, player, opponent) = (board.0, player.0, opponent.0);
    let ranking = py.allow_threads(|| {
        versus::versus_summaries(board, player, opponent, &options, |_, _| {})
    })?;
    Ok(ranking.into_iter().map(PySummary::from).collect())
}
