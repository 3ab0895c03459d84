//! Evenly spaced 1-D coordinate axis.
//!
//! An axis maps integer positions to physical coordinates through an
//! arithmetic progression `start + i * step`. The periodic variant models
//! longitude: lookups wrap around the 360-degree circle, and construction
//! accepts point lists that cross the +/-180 seam.

use crate::error::{PerthError, Result};
use crate::math::{is_same, normalize_angle};

/// Default tolerance used to validate even spacing.
pub const DEFAULT_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    is_periodic: bool,
    is_ascending: bool,
    size: i64,
    start: f64,
    step: f64,
}

impl Axis {
    /// Build an axis from explicit points.
    ///
    /// Points must be evenly spaced to within `epsilon`. A periodic axis
    /// additionally requires the points to span a full circle; point lists
    /// that wrap across the +/-180 seam are unwrapped first.
    pub fn from_points(points: &[f64], epsilon: f64, is_periodic: bool) -> Result<Self> {
        if points.len() < 2 {
            return Err(PerthError::InvalidAxis(
                "the axis must contain at least 2 points".to_string(),
            ));
        }
        if is_periodic {
            if let Some(unwrapped) = unwrap_longitude(points) {
                return Self::initialize(&unwrapped, epsilon, true);
            }
        }
        Self::initialize(points, epsilon, is_periodic)
    }

    /// Build an axis from `start`, `end` and `step`.
    ///
    /// The number of points is `(end - start) / step + 1`, truncated, and the
    /// effective step is recomputed so that the last point is exactly `end`.
    pub fn with_bounds(
        start: f64,
        end: f64,
        step: f64,
        epsilon: f64,
        is_periodic: bool,
    ) -> Result<Self> {
        let count = ((end - start) / step) as i64 + 1;
        if count < 2 {
            return Err(PerthError::InvalidAxis(
                "the axis must contain at least 2 points".to_string(),
            ));
        }
        let points: Vec<f64> = (0..count)
            .map(|i| start + (end - start) * i as f64 / (count - 1) as f64)
            .collect();
        Self::from_points(&points, epsilon, is_periodic)
    }

    fn initialize(points: &[f64], epsilon: f64, is_periodic: bool) -> Result<Self> {
        evenly_spaced_increment(points, epsilon).ok_or_else(|| {
            PerthError::InvalidAxis("the axis points must be evenly spaced".to_string())
        })?;
        let size = points.len() as i64;
        let start = points[0];
        let stop = points[points.len() - 1];
        let step = (stop - start) / (size - 1) as f64;
        Ok(Self {
            is_periodic: is_periodic && is_same((step * size as f64).abs(), 360.0, epsilon),
            is_ascending: step > 0.0,
            size,
            start,
            step,
        })
    }

    /// Number of points on the axis.
    #[inline]
    pub fn size(&self) -> i64 {
        self.size
    }

    /// First value of the axis.
    #[inline]
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Last value of the axis.
    #[inline]
    pub fn end(&self) -> f64 {
        self.value(self.size - 1)
    }

    /// Spacing between two consecutive points.
    #[inline]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Smallest coordinate on the axis.
    #[inline]
    pub fn min_value(&self) -> f64 {
        if self.is_ascending {
            self.start()
        } else {
            self.end()
        }
    }

    /// Largest coordinate on the axis.
    #[inline]
    pub fn max_value(&self) -> f64 {
        if self.is_ascending {
            self.end()
        } else {
            self.start()
        }
    }

    #[inline]
    pub fn is_ascending(&self) -> bool {
        self.is_ascending
    }

    #[inline]
    pub fn is_periodic(&self) -> bool {
        self.is_periodic
    }

    /// Coordinate at `index`.
    ///
    /// # Panics
    /// Panics if `index` is outside `[0, size)`.
    #[inline]
    pub fn value(&self, index: i64) -> f64 {
        assert!(
            (0..self.size).contains(&index),
            "axis index {index} out of range [0, {})",
            self.size
        );
        self.start + index as f64 * self.step
    }

    /// Index of the axis point closest to `coordinate`.
    ///
    /// When `bounded` is true, out-of-range coordinates clamp to the first or
    /// last index; otherwise they yield `None`.
    pub fn find_index(&self, coordinate: f64, bounded: bool) -> Option<i64> {
        let index = ((self.normalize_coordinate(coordinate) - self.start) / self.step).round();
        let index = index as i64;
        if index < 0 {
            return bounded.then_some(0);
        }
        if index >= self.size {
            return bounded.then_some(self.size - 1);
        }
        Some(index)
    }

    /// Pair of indices framing `coordinate` so that
    /// `value(i0) <= coordinate < value(i1)` after normalization.
    ///
    /// A coordinate exactly on a node pairs with the next node (with the
    /// previous node at the upper end of a non-periodic axis). On a periodic
    /// axis a coordinate beyond the last node wraps to `(size - 1, 0)`;
    /// outside a non-periodic axis the result is `None`.
    pub fn find_indices(&self, coordinate: f64) -> Option<(i64, i64)> {
        let coordinate = self.normalize_coordinate(coordinate);
        let length = self.size;

        let Some(mut i0) = self.find_index(coordinate, false) else {
            return self.is_periodic.then_some((length - 1, 0));
        };

        let delta = coordinate - self.value(i0);
        let mut i1 = i0;
        if delta == 0.0 {
            if i1 == length - 1 {
                i0 -= 1;
            } else {
                i1 += 1;
            }
        } else if delta < 0.0 {
            if self.is_ascending {
                i0 -= 1;
            } else {
                i0 += 1;
            }
            if self.is_periodic {
                i0 = i0.rem_euclid(length);
            }
        } else {
            if self.is_ascending {
                i1 += 1;
            } else {
                i1 -= 1;
            }
            if self.is_periodic {
                i1 = i1.rem_euclid(length);
            }
        }
        ((0..length).contains(&i0) && (0..length).contains(&i1)).then_some((i0, i1))
    }

    /// Like [`Axis::find_indices`], but clamps out-of-domain coordinates to
    /// the nearest edge cell instead of returning `None`.
    pub fn find_bounded_indices(&self, coordinate: f64) -> (i64, i64) {
        if let Some(indices) = self.find_indices(coordinate) {
            return indices;
        }
        let i0 = self.find_index(coordinate, true).unwrap_or(0);
        if i0 == 0 {
            (0, 1)
        } else {
            (i0 - 1, i0)
        }
    }

    /// Map a coordinate into `[min_value, min_value + 360)` when periodic.
    #[inline]
    pub fn normalize_coordinate(&self, coordinate: f64) -> f64 {
        if self.is_periodic
            && (coordinate >= self.min_value() + 360.0 || coordinate < self.min_value())
        {
            normalize_angle(coordinate, self.min_value(), 360.0)
        } else {
            coordinate
        }
    }
}

/// Check that points form an arithmetic progression; return the increment.
fn evenly_spaced_increment(points: &[f64], epsilon: f64) -> Option<f64> {
    let n = points.len();
    if n < 2 {
        return None;
    }
    let increment = (points[n - 1] - points[0]) / (n - 1) as f64;
    if increment.abs() <= epsilon {
        return None;
    }
    for ix in 1..n {
        if !is_same(points[ix] - points[ix - 1], increment, epsilon) {
            return None;
        }
    }
    Some(increment)
}

/// Unwrap a longitude point list that crosses the +/-180 seam once.
///
/// Returns `None` when the list is already monotonic.
fn unwrap_longitude(points: &[f64]) -> Option<Vec<f64>> {
    let ascending = points.len() < 2 || points[0] < points[1];
    let monotonic = points
        .windows(2)
        .all(|w| if ascending { w[0] < w[1] } else { w[0] > w[1] });
    if monotonic {
        return None;
    }
    let mut result = points.to_vec();
    let mut cross = false;
    for ix in 1..result.len() {
        if !cross {
            cross = if ascending {
                result[ix - 1] > result[ix]
            } else {
                result[ix - 1] < result[ix]
            };
        }
        if cross {
            result[ix] += if ascending { 360.0 } else { -360.0 };
        }
    }
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn global_half_degree() -> Axis {
        Axis::with_bounds(-180.0, 179.5, 0.5, DEFAULT_EPSILON, true).unwrap()
    }

    // -- construction --

    #[test]
    fn linspaced_roundtrip() {
        let axis = Axis::with_bounds(-90.0, 90.0, 2.0, DEFAULT_EPSILON, false).unwrap();
        assert_eq!(axis.size(), 91);
        for i in 0..axis.size() {
            assert_relative_eq!(axis.value(i), -90.0 + 2.0 * i as f64, epsilon = 180.0 * 1e-12);
        }
    }

    #[test]
    fn rejects_single_point() {
        assert!(Axis::from_points(&[1.0], DEFAULT_EPSILON, false).is_err());
    }

    #[test]
    fn rejects_uneven_spacing() {
        assert!(Axis::from_points(&[0.0, 1.0, 2.5], DEFAULT_EPSILON, false).is_err());
    }

    #[test]
    fn rejects_constant_points() {
        assert!(Axis::from_points(&[1.0, 1.0, 1.0], DEFAULT_EPSILON, false).is_err());
    }

    #[test]
    fn periodicity_requires_full_circle() {
        // 0..90 in 1-degree steps does not close the circle.
        let axis = Axis::with_bounds(0.0, 90.0, 1.0, DEFAULT_EPSILON, true).unwrap();
        assert!(!axis.is_periodic());

        let axis = global_half_degree();
        assert!(axis.is_periodic());
    }

    #[test]
    fn unwraps_seam_crossing_points() {
        // 178, 179, -180, -179 is a wrapped ascending longitude sequence.
        let axis = Axis::from_points(&[178.0, 179.0, -180.0, -179.0], DEFAULT_EPSILON, true)
            .unwrap();
        assert_eq!(axis.size(), 4);
        assert_relative_eq!(axis.start(), 178.0);
        assert_relative_eq!(axis.step(), 1.0);
    }

    #[test]
    fn descending_axis() {
        let axis = Axis::with_bounds(90.0, -90.0, -2.0, DEFAULT_EPSILON, false).unwrap();
        assert!(!axis.is_ascending());
        assert_relative_eq!(axis.min_value(), -90.0);
        assert_relative_eq!(axis.max_value(), 90.0);
    }

    // -- lookup --

    #[test]
    fn find_index_clamps_when_bounded() {
        let axis = Axis::with_bounds(0.0, 10.0, 1.0, DEFAULT_EPSILON, false).unwrap();
        assert_eq!(axis.find_index(-5.0, true), Some(0));
        assert_eq!(axis.find_index(15.0, true), Some(10));
        assert_eq!(axis.find_index(-5.0, false), None);
        assert_eq!(axis.find_index(15.0, false), None);
    }

    #[test]
    fn find_indices_wraps_periodic_axis() {
        let axis = global_half_degree();
        assert_eq!(axis.find_indices(-180.25), Some((719, 0)));
        assert_eq!(axis.find_indices(179.9), Some((719, 0)));
    }

    #[test]
    fn find_indices_on_node_pairs_with_next() {
        let axis = global_half_degree();
        assert_eq!(axis.find_indices(0.0), Some((360, 361)));
        assert_relative_eq!(axis.value(360), 0.0);
    }

    #[test]
    fn find_indices_total_on_periodic_axis() {
        let axis = global_half_degree();
        for x in [-1000.0, -180.0, -179.9, 0.25, 179.5, 179.99, 180.0, 720.0] {
            assert!(axis.find_indices(x).is_some(), "no indices for {x}");
        }
    }

    #[test]
    fn find_indices_outside_non_periodic_axis() {
        let axis = Axis::with_bounds(-90.0, 90.0, 2.0, DEFAULT_EPSILON, false).unwrap();
        assert_eq!(axis.find_indices(90.5), None);
        assert_eq!(axis.find_indices(-90.5), None);
    }

    #[test]
    fn find_indices_frames_coordinate() {
        let axis = Axis::with_bounds(-90.0, 90.0, 2.0, DEFAULT_EPSILON, false).unwrap();
        let (i0, i1) = axis.find_indices(1.3).unwrap();
        assert!(axis.value(i0) <= 1.3 && 1.3 < axis.value(i1));
    }

    #[test]
    fn find_indices_last_node_non_periodic() {
        let axis = Axis::with_bounds(-90.0, 90.0, 2.0, DEFAULT_EPSILON, false).unwrap();
        assert_eq!(axis.find_indices(90.0), Some((89, 90)));
    }

    #[test]
    fn find_bounded_indices_clamps() {
        let axis = Axis::with_bounds(-90.0, 90.0, 2.0, DEFAULT_EPSILON, false).unwrap();
        assert_eq!(axis.find_bounded_indices(-95.0), (0, 1));
        assert_eq!(axis.find_bounded_indices(95.0), (89, 90));
    }
}
