//! Bindings for the constituent catalogue.

use pyo3::prelude::*;
use pyperth_core::{Constituent, ConstituentType};

use crate::convert::to_py_err;

/// Possible type of tidal wave.
#[pyclass(module = "pyperth._core", name = "ConstituentType", eq, eq_int, frozen)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PyConstituentType {
    #[pyo3(name = "LONG_PERIOD")]
    LongPeriod = 0,
    #[pyo3(name = "SHORT_PERIOD")]
    ShortPeriod = 1,
}

impl From<ConstituentType> for PyConstituentType {
    fn from(kind: ConstituentType) -> Self {
        match kind {
            ConstituentType::LongPeriod => PyConstituentType::LongPeriod,
            ConstituentType::ShortPeriod => PyConstituentType::ShortPeriod,
        }
    }
}

/// A tidal constituent from the catalogue.
#[pyclass(module = "pyperth._core", name = "Constituent", frozen, eq, hash)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PyConstituent {
    pub(crate) inner: Constituent,
}

macro_rules! constituent_attributes {
    ($($variant:ident),+ $(,)?) => {
        #[pymethods]
        impl PyConstituent {
            $(
                #[classattr]
                #[allow(non_upper_case_globals)]
                const $variant: PyConstituent = PyConstituent {
                    inner: Constituent::$variant,
                };
            )+

            /// Canonical, case-sensitive name.
            #[getter]
            fn name(&self) -> &'static str {
                self.inner.name()
            }

            /// The 7-component Doodson number.
            #[getter]
            fn doodson_number(&self) -> [i8; 7] {
                self.inner.doodson_number()
            }

            /// Long-period or short-period.
            #[getter]
            fn r#type(&self) -> PyConstituentType {
                self.inner.kind().into()
            }

            /// Look a constituent up by its canonical name.
            #[staticmethod]
            fn from_name(name: &str) -> PyResult<Self> {
                Constituent::from_name(name)
                    .map(|inner| Self { inner })
                    .map_err(to_py_err)
            }

            /// Every catalogue entry, in ordinal order.
            #[staticmethod]
            fn all() -> Vec<PyConstituent> {
                Constituent::ALL.map(|inner| PyConstituent { inner }).to_vec()
            }

            fn __repr__(&self) -> String {
                format!("Constituent.{}", self.inner.name())
            }

            fn __int__(&self) -> usize {
                self.inner.index()
            }
        }
    };
}

constituent_attributes!(
    _2MK3, _2MK6, _2MN2, _2MN6, _2MS2, _2MS6, _2N2, _2Q1, _2SM2, _2SM6, Alp2, Bet2, Beta1,
    Chi1, Del2, Eps2, Eta2, Gam2, J1, K1, K2, L2, Lambda2, M1, M13, M2, M3, M4, M6, M8, Mf,
    MK3, MK4, MKS2, Mm, MN4, MO3, Mq, MS4, MSf, MSK6, MSm, MSN2, MSN6, MSqm, MSt, Mtm, Mu2,
    N2, N4, Node, Nu2, O1, OO1, P1, Phi1, Pi1, Psi1, Q1, R2, R4, Rho1, S1, S2, S4, S6, Sa,
    Sa1, Sigma1, SK4, SN4, SO1, Ssa, Sta, T2, Tau1, Theta1, Ups1,
);

/// Frequency of a tide with the given 6-component Doodson number, in degrees
/// per hour.
#[pyfunction]
pub fn tidal_frequency(doodson_number: [i8; 6]) -> f64 {
    pyperth_core::doodson::tidal_frequency(&doodson_number)
}

/// Canonical name of a constituent.
#[pyfunction]
pub fn constituent_to_name(constituent: PyConstituent) -> &'static str {
    constituent.inner.name()
}

pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyConstituentType>()?;
    m.add_class::<PyConstituent>()?;
    m.add_function(wrap_pyfunction!(tidal_frequency, m)?)?;
    m.add_function(wrap_pyfunction!(constituent_to_name, m)?)?;
    Ok(())
}
