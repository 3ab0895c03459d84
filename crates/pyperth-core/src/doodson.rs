//! Doodson's celestial variables, tidal arguments and frequencies.

use crate::datetime::{DAYS_PER_CENTURY, J2000_JULIAN_DAY, MJD_TO_JD, SECONDS_PER_DAY};
use crate::fundarg::fundarg;
use crate::math::{degrees, normalize_angle_180};

/// Evaluate Doodson's six astronomical variables
/// `[tau, s, h, p, N', p_s]` in degrees, each normalized to `[-180, 180)`.
///
/// `time` is Universal Time in decimal Modified Julian Days and `delta` is
/// Delta-T in seconds.
pub fn calculate_celestial_vector(time: f64, delta: f64) -> [f64; 6] {
    // Terrestrial Time.
    let time_tt = time + delta / SECONDS_PER_DAY;

    // TT since J2000, in Julian centuries.
    let tjd = time_tt + MJD_TO_JD;
    let tx = (tjd - J2000_JULIAN_DAY) / DAYS_PER_CENTURY;

    let args = fundarg(tx);

    // Mean longitude of the Moon.
    let s = args.f + args.om;

    // Mean longitude of the Sun.
    let h = args.f + args.om - args.d;

    // Longitude of lunar perigee.
    let p = args.f + args.om - args.l;

    // Negative longitude of lunar node.
    let fn_ = -args.om;

    // Longitude of solar perigee.
    let ps = -args.lp + args.f - args.d + args.om;

    // Solar time, in radians.
    let tsolar = (time - time.trunc()) * std::f64::consts::TAU;

    // Doodson's tau variable.
    let tau = tsolar - s + h;

    [tau, s, h, p, fn_, ps].map(|x| normalize_angle_180(degrees(x)))
}

/// Evaluate Doodson's tidal argument, in degrees normalized to `[-180, 180)`.
///
/// The seventh component of the Doodson number is a phase-offset multiplier
/// of 90 degrees.
pub fn calculate_doodson_argument(time: f64, delta: f64, doodson_number: &[i8; 7]) -> f64 {
    let beta = calculate_celestial_vector(time, delta);
    let mut arg = doodson_number[6] as f64 * 90.0;
    for (d, b) in doodson_number[..6].iter().zip(beta) {
        arg += *d as f64 * b;
    }
    normalize_angle_180(arg)
}

/// Frequency of a tide with the given Doodson number (without the phase
/// component), in degrees per hour.
///
/// Obtained by finite-differencing the celestial vector around J2000.
pub fn tidal_frequency(doodson_number: &[i8; 6]) -> f64 {
    // Time interval in days.
    const DEL: f64 = 0.05;

    // Modified Julian Day at J2000.
    const T1: f64 = 51_545.0;
    const T2: f64 = T1 + DEL;

    let beta1 = calculate_celestial_vector(T1, 0.0);
    let beta2 = calculate_celestial_vector(T2, 0.0);

    doodson_number
        .iter()
        .zip(beta1.iter().zip(beta2))
        .map(|(d, (b1, b2))| *d as f64 * (b2 - b1) / (24.0 * DEL))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const TIME: f64 = 45_335.0;
    const DELTA: f64 = 53.026754231840584;

    #[test]
    fn celestial_vector_reference_epoch() {
        let vec = calculate_celestial_vector(TIME, DELTA);
        let expected = [
            160.59900704910373,
            119.4907876655474,
            280.08979471465113 - 360.0,
            111.5928443590156,
            266.13901453365702 - 360.0,
            282.64503464175243 - 360.0,
        ];
        for (v, e) in vec.iter().zip(expected) {
            assert_relative_eq!(*v, e, epsilon = 1e-10);
        }
    }

    #[test]
    fn celestial_vector_stays_normalized() {
        // Sweep the supported 1700-2150 date range in ~9-year strides.
        let mut time = -58_028.0; // 1700-01-01
        while time < 106_333.0 {
            let vec = calculate_celestial_vector(time, 32.0);
            for (i, v) in vec.iter().enumerate() {
                assert!((-180.0..180.0).contains(v), "component {i} at {time}: {v}");
            }
            time += 3_333.25;
        }
    }

    #[test]
    fn node_doodson_argument() {
        let arg = calculate_doodson_argument(TIME, DELTA, &[0, 0, 0, 0, 1, 0, 2]);
        assert_relative_eq!(arg, 86.139014533657019, epsilon = 1e-10);
    }

    #[test]
    fn m2_frequency() {
        // M2 completes two cycles per lunar day: 28.984 degrees per hour.
        let freq = tidal_frequency(&[2, 0, 0, 0, 0, 0]);
        assert_relative_eq!(freq, 28.984104, epsilon = 1e-4);
    }

    #[test]
    fn k1_and_o1_frequencies() {
        assert_relative_eq!(tidal_frequency(&[1, 1, 0, 0, 0, 0]), 15.041069, epsilon = 1e-4);
        assert_relative_eq!(tidal_frequency(&[1, -1, 0, 0, 0, 0]), 13.943036, epsilon = 1e-4);
    }
}
