//! The gridded tidal model and its per-evaluation accelerator.
//!
//! A [`TidalModel`] owns one flat complex grid per provided constituent on a
//! shared longitude/latitude axis pair. It is immutable once evaluation
//! starts and is shared read-only across worker threads. The
//! [`Accelerator`] is the opposite: a mutable, thread-local scratchpad that
//! caches the last grid cell, the per-constituent values interpolated there,
//! and the time-dependent astronomical state.

use num_complex::{Complex, Complex64};

use crate::axis::Axis;
use crate::constituents::{Constituent, TideTable, NUM_CONSTITUENTS};
use crate::datetime::{MJD_TO_JD, SECONDS_PER_DAY};
use crate::delta_t::calculate_delta_time;
use crate::doodson::calculate_celestial_vector;
use crate::error::{PerthError, Result};
use crate::math::{bilinear_interpolation, bilinear_weights, normalize_angle, normalize_angle_180};
use crate::nodal_corrections::{group_modulation, nodal_correction, NodalCorrections};

/// Quality of an interpolation: how many of the four grid corners
/// contributed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i8)]
pub enum Quality {
    /// Value undefined (outside the grid, or all corners masked).
    Undefined = 0,
    /// Value extrapolated from one data point.
    Extrapolated1 = 1,
    /// Value extrapolated from two data points.
    Extrapolated2 = 2,
    /// Value extrapolated from three data points.
    Extrapolated3 = 3,
    /// Value correctly interpolated from all four corners.
    Interpolated = 4,
}

impl Quality {
    fn from_count(n: i64) -> Self {
        match n {
            4 => Quality::Interpolated,
            3 => Quality::Extrapolated3,
            2 => Quality::Extrapolated2,
            1 => Quality::Extrapolated1,
            _ => Quality::Undefined,
        }
    }
}

/// Grid element precision handled by the model: `f32` or `f64`.
pub trait GridElement: Copy + Send + Sync + 'static {
    fn to_f64(self) -> f64;
}

impl GridElement for f32 {
    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl GridElement for f64 {
    #[inline]
    fn to_f64(self) -> f64 {
        self
    }
}

/// Per-evaluation cache of grid-cell values and astronomical state.
///
/// One accelerator belongs to exactly one evaluation thread; it is created
/// from the model it accelerates and mutated on every query.
#[derive(Debug, Clone)]
pub struct Accelerator {
    /// Seconds within which the astronomical state is reused.
    time_tolerance: f64,
    /// Time of the cached astronomical state (MJD, UT).
    time: f64,
    /// Delta-T at the cached time, in seconds.
    delta: f64,
    /// Interpolated per-constituent values at the cached cell.
    values: Vec<(Constituent, Complex64)>,
    /// Quality of the cached interpolation.
    quality: Quality,
    /// Nodal corrections, in catalogue order.
    nodal_corrections: [NodalCorrections; NUM_CONSTITUENTS],
    x1: f64,
    x2: f64,
    y1: f64,
    y2: f64,
}

impl Accelerator {
    pub fn new(time_tolerance: f64, n_constituents: usize) -> Self {
        Self {
            time_tolerance,
            time: f64::MAX,
            delta: f64::MAX,
            values: Vec::with_capacity(n_constituents),
            quality: Quality::Undefined,
            nodal_corrections: [NodalCorrections::default(); NUM_CONSTITUENTS],
            x1: f64::MAX,
            x2: f64::MAX,
            y1: f64::MAX,
            y2: f64::MAX,
        }
    }

    #[inline]
    pub fn x1(&self) -> f64 {
        self.x1
    }

    #[inline]
    pub fn x2(&self) -> f64 {
        self.x2
    }

    #[inline]
    pub fn y1(&self) -> f64 {
        self.y1
    }

    #[inline]
    pub fn y2(&self) -> f64 {
        self.y2
    }

    #[inline]
    pub fn time_tolerance(&self) -> f64 {
        self.time_tolerance
    }

    /// Delta-T of the last astronomical update, in seconds.
    #[inline]
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Tidal constituent values interpolated at the last query point.
    #[inline]
    pub fn values(&self) -> &[(Constituent, Complex64)] {
        &self.values
    }

    /// Nodal corrections of the last astronomical update, in catalogue
    /// order.
    #[inline]
    pub fn nodal_corrections(&self) -> &[NodalCorrections; NUM_CONSTITUENTS] {
        &self.nodal_corrections
    }

    /// Drop the cached interpolated values.
    pub fn clear(&mut self) {
        self.values.clear();
        self.x1 = f64::MAX;
        self.x2 = f64::MAX;
        self.y1 = f64::MAX;
        self.y2 = f64::MAX;
        self.quality = Quality::Undefined;
    }

    fn cell_matches(&self, x1: f64, x2: f64, y1: f64, y2: f64) -> bool {
        self.x1 == x1 && self.x2 == x2 && self.y1 == y1 && self.y2 == y2
    }

    fn store_cell(&mut self, x1: f64, x2: f64, y1: f64, y2: f64, quality: Quality) {
        self.x1 = x1;
        self.x2 = x2;
        self.y1 = y1;
        self.y2 = y2;
        self.quality = quality;
    }

    /// Refresh the astronomical state for `time` (MJD, UT).
    ///
    /// A no-op while `time` stays within `time_tolerance` seconds of the
    /// cached state. Otherwise recomputes Delta-T, the celestial vector, the
    /// nodal corrections (standard or group-modulated) and every
    /// constituent's Doodson argument, in catalogue order.
    pub fn update_args(
        &mut self,
        time: f64,
        group_modulations: bool,
        table: &mut TideTable,
    ) -> Result<()> {
        if (time - self.time).abs() * SECONDS_PER_DAY <= self.time_tolerance {
            return Ok(());
        }

        let delta = calculate_delta_time(time + MJD_TO_JD)?;
        self.time = time;
        self.delta = delta;

        let args = calculate_celestial_vector(time, delta);
        let perigee = args[3];
        let omega = -args[4];

        if group_modulations {
            let hsolar = args[2];
            let psolar = args[5];
            for (correction, constituent) in
                self.nodal_corrections.iter_mut().zip(Constituent::ALL)
            {
                *correction = group_modulation(psolar, omega, perigee, hsolar, constituent);
            }
        } else {
            for (correction, constituent) in
                self.nodal_corrections.iter_mut().zip(Constituent::ALL)
            {
                *correction = nodal_correction(omega, perigee, constituent);
            }
        }

        for constituent in Constituent::ALL {
            let component = &mut table[constituent];
            let doodson = &component.doodson_number;
            let mut argument = doodson[6] as f64 * 90.0;
            for (d, beta) in doodson[..6].iter().zip(args) {
                argument += *d as f64 * beta;
            }
            component.tidal_argument = normalize_angle_180(argument);
        }
        Ok(())
    }
}

/// Shared, read-only gridded harmonic tide model.
#[derive(Debug, Clone)]
pub struct TidalModel<T: GridElement> {
    /// Complex grids, in insertion order.
    data: Vec<(Constituent, Vec<Complex<T>>)>,
    lon: Axis,
    lat: Axis,
    /// True when rows are the longitude dimension.
    row_major: bool,
}

impl<T: GridElement> TidalModel<T> {
    pub fn new(lon: Axis, lat: Axis, row_major: bool) -> Self {
        Self {
            data: Vec::new(),
            lon,
            lat,
            row_major,
        }
    }

    #[inline]
    pub fn lon(&self) -> &Axis {
        &self.lon
    }

    #[inline]
    pub fn lat(&self) -> &Axis {
        &self.lat
    }

    #[inline]
    pub fn row_major(&self) -> bool {
        self.row_major
    }

    /// True if no tidal constituent is handled by the model.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of tidal constituents handled by the model.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Constituent identifiers handled by the model, in insertion order.
    pub fn identifiers(&self) -> Vec<Constituent> {
        self.data.iter().map(|(c, _)| *c).collect()
    }

    /// Create an accelerator sized for this model.
    pub fn accelerator(&self, time_tolerance: f64) -> Accelerator {
        Accelerator::new(time_tolerance, self.data.len())
    }

    /// Add the complex wave grid of a constituent.
    ///
    /// `shape` is `(rows, cols)` of the flattened row-major `wave` buffer;
    /// rows must span longitude when the model was declared `row_major`,
    /// latitude otherwise. Re-adding a constituent replaces its grid.
    pub fn add_constituent(
        &mut self,
        constituent: Constituent,
        wave: Vec<Complex<T>>,
        shape: (usize, usize),
    ) -> Result<()> {
        let expected = if self.row_major {
            (self.lon.size() as usize, self.lat.size() as usize)
        } else {
            (self.lat.size() as usize, self.lon.size() as usize)
        };
        if shape != expected || wave.len() != shape.0 * shape.1 {
            return Err(PerthError::InvalidShape {
                expected_rows: expected.0,
                expected_cols: expected.1,
                rows: shape.0,
                cols: shape.1,
            });
        }
        log::debug!(
            "adding constituent {} ({}x{} grid)",
            constituent.name(),
            shape.0,
            shape.1
        );
        if let Some(entry) = self.data.iter_mut().find(|(c, _)| *c == constituent) {
            entry.1 = wave;
        } else {
            self.data.push((constituent, wave));
        }
        Ok(())
    }

    #[inline]
    fn sample(&self, grid: &[Complex<T>], i: i64, j: i64) -> Complex64 {
        let index = if self.row_major {
            i as usize * self.lat.size() as usize + j as usize
        } else {
            j as usize * self.lon.size() as usize + i as usize
        };
        let value = grid[index];
        Complex64::new(value.re.to_f64(), value.im.to_f64())
    }

    /// Interpolate every constituent of the model at `(lon, lat)` into
    /// `table`, refreshing the accelerator's cell cache as needed.
    pub fn interpolate(
        &self,
        lon: f64,
        lat: f64,
        table: &mut TideTable,
        acc: &mut Accelerator,
    ) -> Quality {
        let quality = self.update_cell(lon, lat, acc);
        for (constituent, value) in acc.values() {
            table[*constituent].tide = *value;
        }
        quality
    }

    fn update_cell(&self, lon: f64, lat: f64, acc: &mut Accelerator) -> Quality {
        let undefined = Complex64::new(f64::NAN, f64::NAN);

        let indices = match (self.lon.find_indices(lon), self.lat.find_indices(lat)) {
            (Some(lon_index), Some(lat_index)) => Some((lon_index, lat_index)),
            _ => None,
        };
        let Some(((i1, i2), (j1, j2))) = indices else {
            // The point lies outside the grid.
            acc.clear();
            for (constituent, _) in &self.data {
                acc.values.push((*constituent, undefined));
            }
            return Quality::Undefined;
        };

        let x1 = self.lon.value(i1);
        let x2 = self.lon.value(i2);
        let y1 = self.lat.value(j1);
        let y2 = self.lat.value(j2);

        if acc.cell_matches(x1, x2, y1, y2) {
            return acc.quality;
        }
        acc.values.clear();

        let (wx1, wx2, wy1, wy2) = bilinear_weights(
            normalize_angle(lon, x1, 360.0),
            lat,
            x1,
            y1,
            normalize_angle(x2, x1, 360.0),
            y2,
        );

        let mut n = 0i64;
        for (constituent, grid) in &self.data {
            let value = bilinear_interpolation(
                wx1,
                wx2,
                wy1,
                wy2,
                self.sample(grid, i1, j1),
                self.sample(grid, i1, j2),
                self.sample(grid, i2, j1),
                self.sample(grid, i2, j2),
                &mut n,
            );
            // Inside the grid but masked at every corner: the whole point is
            // undefined.
            if value.re.is_nan() || value.im.is_nan() {
                acc.values.clear();
                for (constituent, _) in &self.data {
                    acc.values.push((*constituent, undefined));
                }
                acc.store_cell(x1, x2, y1, y2, Quality::Undefined);
                return Quality::Undefined;
            }
            acc.values.push((*constituent, value));
        }

        let quality = Quality::from_count(n);
        acc.store_cell(x1, x2, y1, y2, quality);
        quality
    }
}
