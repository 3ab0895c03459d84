//! Delta-T: the difference between Terrestrial (Ephemeris) Time and
//! Universal Time.
//!
//! Piecewise polynomial approximation from the tables of Espenak and Meeus,
//! valid for years 1700 through 2150. The fit is based on observed data only
//! through roughly 2010 and drifts slowly after that.

use crate::error::{PerthError, Result};

/// Compute ET - UT in seconds for the given Julian date.
///
/// Returns [`PerthError::TimeOutOfRange`] when the date falls outside
/// 1700-2150.
pub fn calculate_delta_time(julian_date: f64) -> Result<f64> {
    let y = ((julian_date - 2_415_020.0) / 365.25).round() + 1900.0;

    if !(1700.0..=2150.0).contains(&y) {
        return Err(PerthError::TimeOutOfRange { year: y });
    }

    if y >= 2050.0 {
        let u = (y - 1820.0) / 100.0;
        return Ok(-20.0 + 32.0 * u * u - 0.5628 * (2150.0 - y));
    }

    if y >= 2005.0 {
        let t = y - 2000.0;
        return Ok(62.92 + 0.32217 * t + 5.5589e-3 * t * t);
    }

    if y >= 1986.0 {
        let t = y - 2000.0;
        return Ok(
            ((((2.373599e-5 * t + 6.51814e-4) * t + 1.7275e-3) * t - 6.0374e-2) * t + 0.3345)
                * t
                + 63.86,
        );
    }

    if y >= 1961.0 {
        let t = y - 1975.0;
        return Ok(45.45 + 1.067 * t - t * t / 260.0 - t.powi(3) / 718.0);
    }

    if y >= 1941.0 {
        let t = y - 1950.0;
        return Ok(29.07 + 0.407 * t - t * t / 233.0 + t.powi(3) / 2547.0);
    }

    if y >= 1920.0 {
        let t = y - 1920.0;
        return Ok(21.20 + 0.84493 * t - 0.0761 * t.powi(2) + 2.0936e-3 * t.powi(3));
    }

    if y >= 1900.0 {
        let t = y - 1900.0;
        return Ok(
            -2.79 + 1.494119 * t - 5.98939e-2 * t.powi(2) + 6.1966e-3 * t.powi(3)
                - 1.97e-4 * t.powi(4),
        );
    }

    if y >= 1860.0 {
        let t = y - 1860.0;
        return Ok(
            ((((4.28864e-6 * t - 4.473624e-4) * t + 1.680668e-2) * t - 2.51754e-1) * t
                + 0.5737)
                * t
                + 7.62,
        );
    }

    if y >= 1800.0 {
        let t = y - 1800.0;
        return Ok(((((((8.75e-10 * t - 1.699e-7) * t + 1.21272e-5) * t - 3.7436e-4) * t
            + 4.1116e-3)
            * t
            + 6.861e-3)
            * t
            - 0.332447)
            * t
            + 13.72);
    }

    let t = y - 1700.0;
    Ok(8.83 + 1.603e-1 * t - 5.9285e-3 * t.powi(2) + 1.3336e-4 * t.powi(3)
        - 8.518e-7 * t.powi(4))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Julian date at noon of January 1 of the given year.
    fn jd_of_year(year: f64) -> f64 {
        2_415_020.0 + (year - 1900.0) * 365.25
    }

    #[test]
    fn century_anchors() {
        assert_relative_eq!(
            calculate_delta_time(jd_of_year(1700.0)).unwrap(),
            8.83,
            epsilon = 1e-10
        );
        assert_relative_eq!(
            calculate_delta_time(jd_of_year(1800.0)).unwrap(),
            13.72,
            epsilon = 1e-10
        );
        assert_relative_eq!(
            calculate_delta_time(jd_of_year(1900.0)).unwrap(),
            -2.79,
            epsilon = 1e-10
        );
        assert_relative_eq!(
            calculate_delta_time(jd_of_year(2000.0)).unwrap(),
            63.86,
            epsilon = 1e-10
        );
    }

    #[test]
    fn recent_and_future_years() {
        assert_relative_eq!(
            calculate_delta_time(jd_of_year(2010.0)).unwrap(),
            66.69759,
            epsilon = 1e-5
        );
        assert_relative_eq!(
            calculate_delta_time(jd_of_year(2100.0)).unwrap(),
            202.74,
            epsilon = 1e-10
        );
    }

    #[test]
    fn out_of_range_years() {
        assert!(matches!(
            calculate_delta_time(jd_of_year(1699.0)),
            Err(PerthError::TimeOutOfRange { .. })
        ));
        assert!(matches!(
            calculate_delta_time(jd_of_year(2151.0)),
            Err(PerthError::TimeOutOfRange { .. })
        ));
    }

    #[test]
    fn boundary_years_are_valid() {
        assert!(calculate_delta_time(jd_of_year(1700.001)).unwrap().is_finite());
        assert!(calculate_delta_time(jd_of_year(2150.0)).unwrap().is_finite());
    }

    #[test]
    fn continuous_across_segment_joints() {
        // The published piecewise fit is continuous to within a fraction of a
        // second at each segment boundary.
        for year in [1800.0, 1860.0, 1900.0, 1920.0, 1941.0, 1961.0, 1986.0, 2005.0, 2050.0] {
            let before = calculate_delta_time(jd_of_year(year - 1.0)).unwrap();
            let at = calculate_delta_time(jd_of_year(year)).unwrap();
            assert!((at - before).abs() < 2.0, "jump at {year}: {before} -> {at}");
        }
    }
}
