//! Bindings for the gridded tidal model.

use pyo3::prelude::*;

bind_tidal_model!(
    /// Tidal model with float32 grid storage.
    PyTidalModelFloat32,
    f32,
    "TidalModelFloat32"
);
bind_tidal_model!(
    /// Tidal model with float64 grid storage.
    PyTidalModelFloat64,
    f64,
    "TidalModelFloat64"
);

pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyTidalModelFloat32>()?;
    m.add_class::<PyTidalModelFloat64>()?;
    Ok(())
}
