//! Macros generating the float32/float64 model and evaluator bindings.

/// Generate a `#[pyclass]` wrapper around `TidalModel<$t>`.
///
/// The model is held behind an `Arc`; once an evaluator shares it,
/// `add_constituent` refuses further mutation, which enforces the
/// read-only-after-construction contract.
macro_rules! bind_tidal_model {
    (
        $(#[$meta:meta])*
        $wrapper:ident, $t:ty, $pyname:literal
    ) => {
        $(#[$meta])*
        #[pyclass(module = "pyperth._core", name = $pyname)]
        pub struct $wrapper {
            pub(crate) inner: std::sync::Arc<pyperth_core::TidalModel<$t>>,
        }

        #[pymethods]
        impl $wrapper {
            /// Initialize a tidal model with longitude and latitude axes.
            #[new]
            #[pyo3(signature = (lon, lat, row_major = true))]
            fn new(lon: &crate::axis::PyAxis, lat: &crate::axis::PyAxis, row_major: bool) -> Self {
                Self {
                    inner: std::sync::Arc::new(pyperth_core::TidalModel::new(
                        lon.inner.clone(),
                        lat.inner.clone(),
                        row_major,
                    )),
                }
            }

            /// Add a tidal constituent with its complex wave grid.
            fn add_constituent(
                &mut self,
                constituent: crate::constituent::PyConstituent,
                wave: numpy::PyReadonlyArray2<'_, num_complex::Complex<$t>>,
            ) -> PyResult<()> {
                let model = std::sync::Arc::get_mut(&mut self.inner).ok_or_else(|| {
                    pyo3::exceptions::PyRuntimeError::new_err(
                        "the tidal model is shared by an evaluator and can no longer be modified",
                    )
                })?;
                let view = wave.as_array();
                let shape = view.dim();
                model
                    .add_constituent(constituent.inner, view.iter().copied().collect(), shape)
                    .map_err(crate::convert::to_py_err)
            }

            /// Check if the model contains any constituents.
            fn empty(&self) -> bool {
                self.inner.is_empty()
            }

            /// Number of tidal constituents in the model.
            fn size(&self) -> usize {
                self.inner.size()
            }

            /// Constituent identifiers handled by the model.
            fn identifiers(&self) -> Vec<crate::constituent::PyConstituent> {
                self.inner
                    .identifiers()
                    .into_iter()
                    .map(|inner| crate::constituent::PyConstituent { inner })
                    .collect()
            }
        }
    };
}

/// Generate a `#[pyclass]` wrapper around `Perth<$t>`.
macro_rules! bind_perth {
    (
        $(#[$meta:meta])*
        $wrapper:ident, $model:ident, $t:ty, $pyname:literal
    ) => {
        $(#[$meta])*
        #[pyclass(module = "pyperth._core", name = $pyname)]
        pub struct $wrapper {
            inner: pyperth_core::Perth<$t>,
        }

        #[pymethods]
        impl $wrapper {
            /// Initialize the evaluator with a tidal model and optional group
            /// modulations.
            #[new]
            #[pyo3(signature = (model, group_modulations = false))]
            fn new(model: &$model, group_modulations: bool) -> Self {
                Self {
                    inner: pyperth_core::Perth::new(model.inner.clone(), group_modulations),
                }
            }

            /// Evaluate tidal heights at the given positions and times.
            ///
            /// `time` is int64 microseconds since 1970-01-01 UTC. Returns the
            /// `(tide, tide_lp, quality)` arrays in meters, meters and
            /// quality codes.
            #[pyo3(signature = (
                lon,
                lat,
                time,
                time_tolerance = 0.0,
                interpolation_type = None,
                num_threads = 0
            ))]
            fn evaluate<'py>(
                &self,
                py: pyo3::Python<'py>,
                lon: numpy::PyReadonlyArray1<'_, f64>,
                lat: numpy::PyReadonlyArray1<'_, f64>,
                time: numpy::PyReadonlyArray1<'_, i64>,
                time_tolerance: f64,
                interpolation_type: Option<crate::tide::PyInterpolationType>,
                num_threads: usize,
            ) -> PyResult<(
                pyo3::Bound<'py, numpy::PyArray1<f64>>,
                pyo3::Bound<'py, numpy::PyArray1<f64>>,
                pyo3::Bound<'py, numpy::PyArray1<i8>>,
            )> {
                let lon = lon.as_array().to_vec();
                let lat = lat.as_array().to_vec();
                let time = time.as_array().to_vec();
                let settings = pyperth_core::EvaluationSettings {
                    time_tolerance,
                    interpolation: interpolation_type.map(Into::into),
                    num_threads,
                };

                let evaluator = &self.inner;
                let result = py
                    .allow_threads(move || evaluator.evaluate(&lon, &lat, &time, &settings))
                    .map_err(crate::convert::to_py_err)?;

                let quality: Vec<i8> =
                    result.quality.into_iter().map(|q| q as i8).collect();
                Ok((
                    numpy::PyArray1::from_vec(py, result.tide),
                    numpy::PyArray1::from_vec(py, result.tide_lp),
                    numpy::PyArray1::from_vec(py, quality),
                ))
            }

            /// The tidal model associated with this evaluator.
            #[getter]
            fn tidal_model(&self) -> $model {
                $model {
                    inner: self.inner.model().clone(),
                }
            }
        }
    };
}
