//! Python bindings for the tile-cascade engine.
//!
//! Lets the Python side (screen recognition, overlay UI) hand boards and
//! actors to the solvers.
//!
//! # Quick Start
//!
//! ```python
//! import tile_cascade as tc
//!
//! board = tc.Board(text)
//! for first, second in tc.capture(board):
//!     print(first, second)
//!
//! advisor = tc.Advisor()
//! advisor.reset(board, tc.Actor.generic("player"), tc.Actor.generic("opponent"))
//! advisor.simulate_next_turn()
//! best = advisor.sorted_current_summaries()[0]
//! ```

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::error::SimError;

mod py_core;
mod py_solvers;

pub use py_core::*;
pub use py_solvers::*;

impl From<SimError> for PyErr {
    fn from(err: SimError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

/// tile_cascade: match-3 board simulation and move advice.
#[pymodule]
fn tile_cascade(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Core types
    m.add_class::<PyBoard>()?;
    m.add_class::<PyActor>()?;

    // Solvers
    m.add_class::<PySummary>()?;
    m.add_class::<PyAdvisor>()?;
    m.add_function(wrap_pyfunction!(capture, m)?)?;
    m.add_function(wrap_pyfunction!(versus_summaries, m)?)?;

    Ok(())
}
