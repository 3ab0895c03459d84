//! The tide evaluator.
//!
//! [`Perth`] orchestrates the per-point pipeline: grid interpolation,
//! optional admittance inference, astronomical argument update, and the
//! final harmonic sum split into short-period and long-period heights. The
//! batch driver fans a point series out over worker threads; each worker owns
//! its own [`TideTable`] and [`Accelerator`] and walks its points in input
//! order so the spatial and temporal caches hit on nearby queries.

use std::sync::Arc;

use rayon::prelude::*;

use crate::constituents::{ConstituentType, TideTable};
use crate::datetime::epoch_to_modified_julian_date;
use crate::error::{PerthError, Result};
use crate::inference::{Inference, InputType, InterpolationType};
use crate::math::radians;
use crate::tidal_model::{Accelerator, GridElement, Quality, TidalModel};

/// Scalar knobs of a batch evaluation.
#[derive(Debug, Clone, Copy)]
pub struct EvaluationSettings {
    /// Seconds within which a worker reuses its astronomical state.
    pub time_tolerance: f64,
    /// Admittance interpolation used to infer minor constituents; `None`
    /// disables inference.
    pub interpolation: Option<InterpolationType>,
    /// Worker threads for the batch driver; 0 uses the global pool.
    pub num_threads: usize,
}

impl Default for EvaluationSettings {
    fn default() -> Self {
        Self {
            time_tolerance: 0.0,
            interpolation: None,
            num_threads: 0,
        }
    }
}

/// Outputs of a batch evaluation, indexed by input position.
#[derive(Debug, Clone)]
pub struct EvaluationResult {
    /// Short-period tide, in meters.
    pub tide: Vec<f64>,
    /// Long-period tide, in meters.
    pub tide_lp: Vec<f64>,
    /// Interpolation quality codes.
    pub quality: Vec<Quality>,
}

/// Ocean-tide evaluator bound to a shared, read-only tidal model.
#[derive(Debug, Clone)]
pub struct Perth<T: GridElement> {
    model: Arc<TidalModel<T>>,
    group_modulations: bool,
}

impl<T: GridElement> Perth<T> {
    pub fn new(model: Arc<TidalModel<T>>, group_modulations: bool) -> Self {
        Self {
            model,
            group_modulations,
        }
    }

    /// The tidal model backing this evaluator.
    pub fn model(&self) -> &Arc<TidalModel<T>> {
        &self.model
    }

    /// Evaluate one point given its time as a Modified Julian Date (UT).
    fn evaluate_point(
        &self,
        lon: f64,
        lat: f64,
        time: f64,
        table: &mut TideTable,
        inference: Option<&Inference>,
        acc: &mut Accelerator,
    ) -> Result<(f64, f64, Quality)> {
        let quality = self.model.interpolate(lon, lat, table, acc);
        if quality == Quality::Undefined {
            return Ok((f64::NAN, f64::NAN, quality));
        }

        if let Some(inference) = inference {
            inference.apply(table, lat);
        }

        acc.update_args(time, self.group_modulations, table)?;

        let mut tide = 0.0;
        let mut tide_lp = 0.0;
        for (index, (_, component)) in table.iter().enumerate() {
            let correction = acc.nodal_corrections()[index];
            let x = radians(component.tidal_argument + correction.u);
            let height =
                correction.f * (component.tide.re * x.cos() - component.tide.im * x.sin());
            match component.kind {
                ConstituentType::LongPeriod => tide_lp += height,
                ConstituentType::ShortPeriod => tide += height,
            }
        }
        Ok((tide, tide_lp, quality))
    }

    /// Evaluate one contiguous slice of the batch with thread-local scratch.
    fn evaluate_chunk(
        &self,
        lon: &[f64],
        lat: &[f64],
        time: &[i64],
        inference: Option<&Inference>,
        time_tolerance: f64,
    ) -> Result<(Vec<f64>, Vec<f64>, Vec<Quality>)> {
        let mut table = TideTable::new(&self.model.identifiers());
        let mut acc = self.model.accelerator(time_tolerance);

        let mut tide = Vec::with_capacity(lon.len());
        let mut tide_lp = Vec::with_capacity(lon.len());
        let mut quality = Vec::with_capacity(lon.len());
        for ((&x, &y), &t) in lon.iter().zip(lat).zip(time) {
            let mjd = epoch_to_modified_julian_date(t);
            let (h, h_lp, q) = self.evaluate_point(x, y, mjd, &mut table, inference, &mut acc)?;
            tide.push(h);
            tide_lp.push(h_lp);
            quality.push(q);
        }
        Ok((tide, tide_lp, quality))
    }

    /// Evaluate a batch of points.
    ///
    /// `time` values are microseconds since 1970-01-01 UTC. The three input
    /// slices must have the same length; outputs are indexed by input
    /// position. Points outside the model grid yield NaN heights and an
    /// `Undefined` quality, while dates outside the Delta-T validity range
    /// abort the batch with an error.
    pub fn evaluate(
        &self,
        lon: &[f64],
        lat: &[f64],
        time: &[i64],
        settings: &EvaluationSettings,
    ) -> Result<EvaluationResult> {
        if lon.len() != lat.len() || lon.len() != time.len() {
            return Err(PerthError::SizeMismatch {
                lon: lon.len(),
                lat: lat.len(),
                time: time.len(),
            });
        }

        let inference = settings
            .interpolation
            .map(|interpolation| Inference::new(interpolation, InputType::Harmonic));
        let inference = inference.as_ref();

        let n = lon.len();
        if n == 0 {
            return Ok(EvaluationResult {
                tide: Vec::new(),
                tide_lp: Vec::new(),
                quality: Vec::new(),
            });
        }

        let run = || -> Result<EvaluationResult> {
            let workers = rayon::current_num_threads().max(1);
            let chunk_size = n.div_ceil(workers);
            log::debug!("evaluating {n} points on {workers} workers");

            let chunks: Result<Vec<_>> = lon
                .par_chunks(chunk_size)
                .zip(lat.par_chunks(chunk_size))
                .zip(time.par_chunks(chunk_size))
                .map(|((lon, lat), time)| {
                    self.evaluate_chunk(lon, lat, time, inference, settings.time_tolerance)
                })
                .collect();

            let mut result = EvaluationResult {
                tide: Vec::with_capacity(n),
                tide_lp: Vec::with_capacity(n),
                quality: Vec::with_capacity(n),
            };
            for (tide, tide_lp, quality) in chunks? {
                result.tide.extend(tide);
                result.tide_lp.extend(tide_lp);
                result.quality.extend(quality);
            }
            Ok(result)
        };

        if settings.num_threads == 0 {
            run()
        } else {
            rayon::ThreadPoolBuilder::new()
                .num_threads(settings.num_threads)
                .build()?
                .install(run)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::{Axis, DEFAULT_EPSILON};
    use crate::constituents::Constituent;
    use crate::datetime::{MICROSECONDS_PER_DAY, UNIX_EPOCH_MJD};
    use approx::assert_relative_eq;
    use num_complex::Complex64;

    /// Epoch microseconds of an integral Modified Julian Day.
    fn mjd_to_epoch(mjd: i64) -> i64 {
        (mjd - UNIX_EPOCH_MJD) * MICROSECONDS_PER_DAY
    }

    fn global_axes() -> (Axis, Axis) {
        (
            Axis::with_bounds(-180.0, 178.0, 2.0, DEFAULT_EPSILON, true).unwrap(),
            Axis::with_bounds(-90.0, 90.0, 2.0, DEFAULT_EPSILON, false).unwrap(),
        )
    }

    fn constant_model(entries: &[(Constituent, Complex64)]) -> Arc<TidalModel<f64>> {
        let (lon, lat) = global_axes();
        let shape = (lon.size() as usize, lat.size() as usize);
        let mut model = TidalModel::new(lon, lat, true);
        for &(constituent, value) in entries {
            model
                .add_constituent(constituent, vec![value; shape.0 * shape.1], shape)
                .unwrap();
        }
        Arc::new(model)
    }

    #[test]
    fn m2_only_model_matches_harmonic_form() {
        let model = constant_model(&[(Constituent::M2, Complex64::new(1.0, 0.0))]);
        let perth = Perth::new(model.clone(), false);

        let result = perth
            .evaluate(
                &[0.0],
                &[0.0],
                &[mjd_to_epoch(45_335)],
                &EvaluationSettings::default(),
            )
            .unwrap();

        // The long-period output carries nothing.
        assert_eq!(result.tide_lp[0], 0.0);
        assert_eq!(result.quality[0], Quality::Interpolated);

        // Expected height from the argument and nodal correction of M2.
        let mut table = TideTable::new(&model.identifiers());
        let mut acc = model.accelerator(0.0);
        acc.update_args(45_335.0, false, &mut table).unwrap();
        let correction = acc.nodal_corrections()[Constituent::M2.index()];
        let expected =
            correction.f * radians(table[Constituent::M2].tidal_argument + correction.u).cos();
        assert_relative_eq!(result.tide[0], expected, epsilon = 1e-10);
    }

    #[test]
    fn long_period_constituents_feed_tide_lp_only() {
        let model = constant_model(&[(Constituent::Mf, Complex64::new(0.05, 0.01))]);
        let perth = Perth::new(model, false);

        let result = perth
            .evaluate(
                &[12.3],
                &[45.6],
                &[mjd_to_epoch(51_544)],
                &EvaluationSettings::default(),
            )
            .unwrap();

        assert_eq!(result.tide[0], 0.0);
        assert!(result.tide_lp[0] != 0.0);
        assert!(result.tide_lp[0].abs() < 0.1);
    }

    #[test]
    fn point_outside_grid_yields_nan_and_undefined() {
        let model = constant_model(&[(Constituent::M2, Complex64::new(1.0, 0.0))]);
        let perth = Perth::new(model, false);

        let result = perth
            .evaluate(
                &[0.0, 10.0],
                &[95.0, 0.0],
                &[mjd_to_epoch(45_335); 2],
                &EvaluationSettings::default(),
            )
            .unwrap();

        assert!(result.tide[0].is_nan());
        assert!(result.tide_lp[0].is_nan());
        assert_eq!(result.quality[0], Quality::Undefined);
        // The in-grid point is unaffected.
        assert!(result.tide[1].is_finite());
        assert_eq!(result.quality[1], Quality::Interpolated);
    }

    #[test]
    fn mismatched_input_lengths_fail() {
        let model = constant_model(&[(Constituent::M2, Complex64::new(1.0, 0.0))]);
        let perth = Perth::new(model, false);
        let err = perth
            .evaluate(&[0.0, 1.0], &[0.0], &[0], &EvaluationSettings::default())
            .unwrap_err();
        assert!(matches!(err, PerthError::SizeMismatch { .. }));
    }

    #[test]
    fn out_of_range_date_aborts_batch() {
        let model = constant_model(&[(Constituent::M2, Complex64::new(1.0, 0.0))]);
        let perth = Perth::new(model, false);
        // Year 1600 is before the Delta-T table.
        let err = perth
            .evaluate(
                &[0.0],
                &[0.0],
                &[mjd_to_epoch(-109_513)],
                &EvaluationSettings::default(),
            )
            .unwrap_err();
        assert!(matches!(err, PerthError::TimeOutOfRange { .. }));
    }

    #[test]
    fn evaluation_is_deterministic() {
        let model = constant_model(&[
            (Constituent::M2, Complex64::new(0.8, -0.3)),
            (Constituent::K1, Complex64::new(0.2, 0.1)),
            (Constituent::Mf, Complex64::new(0.03, 0.01)),
        ]);
        let perth = Perth::new(model, false);

        let lon: Vec<f64> = (0..200).map(|i| -179.0 + 1.7 * i as f64 % 358.0).collect();
        let lat: Vec<f64> = (0..200).map(|i| -85.0 + 0.85 * i as f64 % 170.0).collect();
        let time: Vec<i64> = (0..200)
            .map(|i| mjd_to_epoch(45_335) + i * 3_600_000_000)
            .collect();

        let settings = EvaluationSettings::default();
        let first = perth.evaluate(&lon, &lat, &time, &settings).unwrap();
        let second = perth.evaluate(&lon, &lat, &time, &settings).unwrap();

        for i in 0..lon.len() {
            assert_eq!(first.tide[i].to_bits(), second.tide[i].to_bits(), "at {i}");
            assert_eq!(
                first.tide_lp[i].to_bits(),
                second.tide_lp[i].to_bits(),
                "at {i}"
            );
            assert_eq!(first.quality[i], second.quality[i]);
        }
    }

    #[test]
    fn explicit_thread_count_matches_global_pool() {
        let model = constant_model(&[
            (Constituent::M2, Complex64::new(0.8, -0.3)),
            (Constituent::S2, Complex64::new(0.4, 0.2)),
        ]);
        let perth = Perth::new(model, false);

        let lon: Vec<f64> = (0..97).map(|i| -170.0 + 3.4 * i as f64).collect();
        let lat: Vec<f64> = (0..97).map(|i| -80.0 + 1.6 * i as f64).collect();
        let time: Vec<i64> = (0..97).map(|i| mjd_to_epoch(50_000) + i * 60_000_000).collect();

        let sequential = perth
            .evaluate(
                &lon,
                &lat,
                &time,
                &EvaluationSettings {
                    num_threads: 1,
                    ..Default::default()
                },
            )
            .unwrap();
        let parallel = perth
            .evaluate(
                &lon,
                &lat,
                &time,
                &EvaluationSettings {
                    num_threads: 4,
                    ..Default::default()
                },
            )
            .unwrap();

        for i in 0..lon.len() {
            assert_eq!(sequential.tide[i].to_bits(), parallel.tide[i].to_bits());
            assert_eq!(
                sequential.tide_lp[i].to_bits(),
                parallel.tide_lp[i].to_bits()
            );
        }
    }

    #[test]
    fn inference_adds_minor_constituents() {
        let anchors = [
            (Constituent::Q1, Complex64::new(0.02, -0.02)),
            (Constituent::O1, Complex64::new(0.08, 0.01)),
            (Constituent::K1, Complex64::new(-0.08, 0.05)),
            (Constituent::N2, Complex64::new(-0.19, 0.03)),
            (Constituent::M2, Complex64::new(-0.90, -0.20)),
            (Constituent::S2, Complex64::new(-0.25, -0.26)),
        ];
        let model = constant_model(&anchors);
        let perth = Perth::new(model, false);

        let position = (&[-7.688][..], &[59.195][..], &[mjd_to_epoch(45_335)][..]);

        let plain = perth
            .evaluate(
                position.0,
                position.1,
                position.2,
                &EvaluationSettings::default(),
            )
            .unwrap();
        let inferred = perth
            .evaluate(
                position.0,
                position.1,
                position.2,
                &EvaluationSettings {
                    interpolation: Some(InterpolationType::LinearAdmittance),
                    ..Default::default()
                },
            )
            .unwrap();

        assert!(plain.tide[0].is_finite());
        assert!(inferred.tide[0].is_finite());
        // Minor constituents shift the short-period sum, and the equilibrium
        // long-period band appears.
        assert_ne!(plain.tide[0], inferred.tide[0]);
        assert_eq!(plain.tide_lp[0], 0.0);
        assert!(inferred.tide_lp[0] != 0.0);
    }

    #[test]
    fn group_modulations_change_the_sum() {
        let model = constant_model(&[
            (Constituent::M2, Complex64::new(0.8, -0.3)),
            (Constituent::Mf, Complex64::new(0.05, 0.02)),
        ]);
        let standard = Perth::new(model.clone(), false);
        let grouped = Perth::new(model, true);

        let settings = EvaluationSettings::default();
        let args = (&[5.0][..], &[-30.0][..], &[mjd_to_epoch(45_335)][..]);
        let a = standard.evaluate(args.0, args.1, args.2, &settings).unwrap();
        let b = grouped.evaluate(args.0, args.1, args.2, &settings).unwrap();

        assert_ne!(a.tide[0], b.tide[0]);
        assert_ne!(a.tide_lp[0], b.tide_lp[0]);
    }

    #[test]
    fn empty_batch() {
        let model = constant_model(&[(Constituent::M2, Complex64::new(1.0, 0.0))]);
        let perth = Perth::new(model, false);
        let result = perth
            .evaluate(&[], &[], &[], &EvaluationSettings::default())
            .unwrap();
        assert!(result.tide.is_empty());
        assert!(result.tide_lp.is_empty());
        assert!(result.quality.is_empty());
    }
}
