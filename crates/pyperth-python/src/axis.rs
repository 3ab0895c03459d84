//! Bindings for the coordinate axis.

use numpy::PyReadonlyArray1;
use pyo3::prelude::*;
use pyperth_core::Axis;

use crate::convert::to_py_err;

/// An evenly spaced coordinate axis, optionally periodic over 360 degrees.
#[pyclass(module = "pyperth._core", name = "Axis", frozen)]
#[derive(Debug, Clone)]
pub struct PyAxis {
    pub(crate) inner: Axis,
}

#[pymethods]
impl PyAxis {
    /// Build an axis from explicit, evenly spaced points.
    #[new]
    #[pyo3(signature = (points, epsilon = 1e-6, is_periodic = false))]
    fn new(points: PyReadonlyArray1<'_, f64>, epsilon: f64, is_periodic: bool) -> PyResult<Self> {
        let points = points.as_array().to_vec();
        Axis::from_points(&points, epsilon, is_periodic)
            .map(|inner| Self { inner })
            .map_err(to_py_err)
    }

    /// Build an axis from start, end and step values.
    #[staticmethod]
    #[pyo3(signature = (start, end, step, epsilon = 1e-6, is_periodic = false))]
    fn with_bounds(
        start: f64,
        end: f64,
        step: f64,
        epsilon: f64,
        is_periodic: bool,
    ) -> PyResult<Self> {
        Axis::with_bounds(start, end, step, epsilon, is_periodic)
            .map(|inner| Self { inner })
            .map_err(to_py_err)
    }

    #[getter]
    fn start(&self) -> f64 {
        self.inner.start()
    }

    #[getter]
    fn end(&self) -> f64 {
        self.inner.end()
    }

    #[getter]
    fn step(&self) -> f64 {
        self.inner.step()
    }

    #[getter]
    fn size(&self) -> i64 {
        self.inner.size()
    }

    #[getter]
    fn is_periodic(&self) -> bool {
        self.inner.is_periodic()
    }

    fn __len__(&self) -> usize {
        self.inner.size() as usize
    }

    fn __repr__(&self) -> String {
        format!(
            "Axis(start: {}, end: {}, size: {}, is_periodic: {})",
            self.inner.start(),
            self.inner.end(),
            self.inner.size(),
            if self.inner.is_periodic() {
                "True"
            } else {
                "False"
            }
        )
    }
}

pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyAxis>()
}
