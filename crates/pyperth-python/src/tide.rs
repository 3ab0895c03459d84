//! Bindings for the evaluator and its enums.

use pyo3::prelude::*;
use pyperth_core::{InterpolationType, Quality};

use crate::model::{PyTidalModelFloat32, PyTidalModelFloat64};

/// Quality of an interpolated value.
#[pyclass(module = "pyperth._core", name = "Quality", eq, eq_int, frozen)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PyQuality {
    #[pyo3(name = "UNDEFINED")]
    Undefined = 0,
    #[pyo3(name = "EXTRAPOLATED_1")]
    Extrapolated1 = 1,
    #[pyo3(name = "EXTRAPOLATED_2")]
    Extrapolated2 = 2,
    #[pyo3(name = "EXTRAPOLATED_3")]
    Extrapolated3 = 3,
    #[pyo3(name = "INTERPOLATED")]
    Interpolated = 4,
}

impl From<Quality> for PyQuality {
    fn from(quality: Quality) -> Self {
        match quality {
            Quality::Undefined => PyQuality::Undefined,
            Quality::Extrapolated1 => PyQuality::Extrapolated1,
            Quality::Extrapolated2 => PyQuality::Extrapolated2,
            Quality::Extrapolated3 => PyQuality::Extrapolated3,
            Quality::Interpolated => PyQuality::Interpolated,
        }
    }
}

/// Admittance interpolation method used by the inference stage.
#[pyclass(
    module = "pyperth._core",
    name = "InterpolationType",
    eq,
    eq_int,
    frozen
)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PyInterpolationType {
    #[pyo3(name = "LINEAR_ADMITTANCE")]
    LinearAdmittance = 0,
    #[pyo3(name = "FOURIER_ADMITTANCE")]
    FourierAdmittance = 1,
}

impl From<PyInterpolationType> for InterpolationType {
    fn from(interpolation: PyInterpolationType) -> Self {
        match interpolation {
            PyInterpolationType::LinearAdmittance => InterpolationType::LinearAdmittance,
            PyInterpolationType::FourierAdmittance => InterpolationType::FourierAdmittance,
        }
    }
}

bind_perth!(
    /// Evaluator over a float32 tidal model.
    PyPerthFloat32,
    PyTidalModelFloat32,
    f32,
    "PerthFloat32"
);
bind_perth!(
    /// Evaluator over a float64 tidal model.
    PyPerthFloat64,
    PyTidalModelFloat64,
    f64,
    "PerthFloat64"
);

pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyQuality>()?;
    m.add_class::<PyInterpolationType>()?;
    m.add_class::<PyPerthFloat32>()?;
    m.add_class::<PyPerthFloat64>()?;
    Ok(())
}
