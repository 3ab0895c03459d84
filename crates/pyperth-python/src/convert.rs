//! Error conversion between the core crate and Python exceptions.

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::PyErr;
use pyperth_core::PerthError;

/// Map a core error onto the Python exception hierarchy.
pub fn to_py_err(error: PerthError) -> PyErr {
    match error {
        PerthError::TimeOutOfRange { .. }
        | PerthError::InvalidShape { .. }
        | PerthError::InvalidAxis(_)
        | PerthError::UnknownConstituent(_)
        | PerthError::SizeMismatch { .. } => PyValueError::new_err(error.to_string()),
        PerthError::ThreadPool(_) => PyRuntimeError::new_err(error.to_string()),
    }
}
