//! Board and actor bindings for Python.

use pyo3::prelude::*;

use crate::core::{Actor, Board, Resource, Side, SwapPair};

type PyPosition = (usize, usize);

/// Python wrapper for Board.
#[pyclass(name = "Board")]
#[derive(Clone, Debug)]
pub struct PyBoard(pub Board);

#[pymethods]
impl PyBoard {
    /// Parse 8 lines of 8 tile codes.
    #[new]
    fn new(text: &str) -> PyResult<Self> {
        Ok(Self(text.parse()?))
    }

    /// An all-blank board.
    #[staticmethod]
    fn empty() -> Self {
        Self(Board::empty())
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Swap two adjacent cells, returning the new board.
    fn swap(&self, first: PyPosition, second: PyPosition) -> PyResult<Self> {
        Ok(Self(self.0.swap(SwapPair::new(first, second))?))
    }

    /// Adjacent pairs worth trying, as `((row, col), (row, col))`.
    fn potential_swaps(&self) -> Vec<(PyPosition, PyPosition)> {
        self.0
            .potential_swaps()
            .into_iter()
            .map(|pair| pair.as_tuples())
            .collect()
    }

    fn __str__(&self) -> String {
        self.0.to_string()
    }

    fn __repr__(&self) -> String {
        format!("Board({:?})", self.0.to_string())
    }

    fn __eq__(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

/// Python wrapper for Actor.
#[pyclass(name = "Actor")]
#[derive(Clone, Debug)]
pub struct PyActor(pub Actor);

#[pymethods]
impl PyActor {
    /// Build an actor from `(current, max)` pairs.
    ///
    /// Omitted resources are `(0, 0)`. Fails if any current exceeds its max.
    #[new]
    #[pyo3(signature = (
        name,
        health = (0, 0),
        r = (0, 0),
        g = (0, 0),
        b = (0, 0),
        y = (0, 0),
        x = (0, 0),
        m = (0, 0)
    ))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        name: &str,
        health: (u32, u32),
        r: (u32, u32),
        g: (u32, u32),
        b: (u32, u32),
        y: (u32, u32),
        x: (u32, u32),
        m: (u32, u32),
    ) -> PyResult<Self> {
        let side: Side = name.parse()?;
        let pools = [
            (Resource::Health, health),
            (Resource::Red, r),
            (Resource::Green, g),
            (Resource::Blue, b),
            (Resource::Yellow, y),
            (Resource::Experience, x),
            (Resource::Money, m),
        ];
        let actor = pools
            .into_iter()
            .fold(Actor::builder(side), |builder, (resource, (current, max))| {
                builder.pool(resource, current, max)
            })
            .build()?;
        Ok(Self(actor))
    }

    /// The stand-in actor used when real values are unknown.
    #[staticmethod]
    fn generic(name: &str) -> PyResult<Self> {
        Ok(Self(Actor::generic_versus(name.parse()?)))
    }

    #[getter]
    fn name(&self) -> &'static str {
        self.0.side().name()
    }

    /// `(current, max)` of a resource by name.
    fn pool(&self, resource: &str) -> PyResult<(u32, u32)> {
        let resource = Resource::ALL
            .into_iter()
            .find(|r| r.name() == resource)
            .ok_or_else(|| pyo3::exceptions::PyKeyError::new_err(resource.to_string()))?;
        let pool = self.0.pool(resource);
        Ok((pool.current(), pool.max()))
    }

    fn __repr__(&self) -> String {
        format!("Actor({})", self.0)
    }
}
