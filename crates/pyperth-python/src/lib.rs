//! PyO3 bindings for the pyperth tide prediction core.

#[macro_use]
mod macros;
mod convert;

mod axis;
mod constituent;
mod model;
mod tide;

use pyo3::prelude::*;

#[pyfunction]
fn rust_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(rust_version, m)?)?;

    axis::register(m)?;
    constituent::register(m)?;
    model::register(m)?;
    tide::register(m)?;

    // Convenience aliases for the interpolation selectors.
    m.add(
        "LINEAR_ADMITTANCE",
        tide::PyInterpolationType::LinearAdmittance,
    )?;
    m.add(
        "FOURIER_ADMITTANCE",
        tide::PyInterpolationType::FourierAdmittance,
    )?;

    Ok(())
}
