//! Lunisolar fundamental arguments.
//!
//! Model from Simon et al. (1994), as recommended by the IERS Conventions
//! (2010), chapter 5. Each argument is a degree-4 polynomial in Julian
//! centuries since J2000, with coefficients in arcseconds, reduced modulo a
//! full circle before conversion to radians.

use crate::math::{arcseconds_to_radians, horner, ieee_remainder};

/// Arcseconds in a full circle.
const ARCSECONDS_IN_CIRCLE: f64 = 1_296_000.0;

/// The five lunisolar angles, in radians.
#[derive(Debug, Clone, Copy)]
pub struct Arguments {
    /// Mean anomaly of the Moon.
    pub l: f64,
    /// Mean anomaly of the Sun.
    pub lp: f64,
    /// Mean longitude of the Moon minus the longitude of its ascending node.
    pub f: f64,
    /// Mean elongation of the Moon from the Sun.
    pub d: f64,
    /// Mean longitude of the ascending node of the Moon.
    pub om: f64,
}

/// Compute the lunisolar fundamental arguments.
///
/// `time` is Universal Time expressed in Julian centuries since J2000,
/// `(JD - 2451545.0) / 36525`. Though the argument is strictly TDB, using TT
/// makes no significant difference.
pub fn fundarg(time: f64) -> Arguments {
    let reduce = |arcseconds: f64| {
        arcseconds_to_radians(ieee_remainder(arcseconds, ARCSECONDS_IN_CIRCLE))
    };

    // Mean anomaly of the Moon.
    let l = reduce(horner(
        time,
        &[485_868.249036, 1_717_915_923.2178, 31.8792, 0.051635, -0.00024470],
    ));

    // Mean anomaly of the Sun.
    let lp = reduce(horner(
        time,
        &[1_287_104.79305, 129_596_581.0481, -0.5532, 0.000136, -0.00001149],
    ));

    // L - OM.
    let f = reduce(horner(
        time,
        &[335_779.526232, 1_739_527_262.8478, -12.7512, -0.001037, 0.00000417],
    ));

    // Mean elongation of the Moon from the Sun.
    let d = reduce(horner(
        time,
        &[1_072_260.70369, 1_602_961_601.2090, -6.3706, 0.006593, -0.00003169],
    ));

    // Mean longitude of the ascending node of the Moon.
    let om = reduce(horner(
        time,
        &[450_160.398036, -6_962_890.5431, 7.4722, 0.007702, -0.00005939],
    ));

    Arguments { l, lp, f, d, om }
}
