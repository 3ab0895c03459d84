//! Nodal corrections: the slow modulation of each constituent's amplitude
//! (factor `f`) and phase (offset `u`, degrees) driven by the 18.6-year lunar
//! node cycle and the lunar perigee.
//!
//! Two flavors are provided. The standard rules follow the
//! Doodson/Cartwright/Schureman tradition and need only the lunar node and
//! perigee longitudes. The group-modulated rules expand a constituent into
//! its Doodson group using the solar longitude and perihelion as well; they
//! fall back to the standard rules for constituents without a group formula.
//! Coefficients follow Richard Ray's PERTH programs.

use crate::constituents::Constituent;
use crate::math::{degrees, radians};

/// Modulation factor and phase correction for one constituent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodalCorrections {
    /// Amplitude modulation factor.
    pub f: f64,
    /// Phase correction, in degrees.
    pub u: f64,
}

impl Default for NodalCorrections {
    fn default() -> Self {
        Self { f: 1.0, u: 0.0 }
    }
}

/// Standard nodal corrections for a single constituent.
///
/// `omega` is the mean longitude of the lunar node and `p` the mean longitude
/// of the lunar perigee, both in degrees. Constituents without a tabulated
/// rule yield `{f: 1, u: 0}`.
pub fn nodal_correction(omega: f64, p: f64, constituent: Constituent) -> NodalCorrections {
    use Constituent::*;

    let sinn = radians(omega).sin();
    let cosn = radians(omega).cos();
    let sin2n = (2.0 * radians(omega)).sin();
    let cos2n = (2.0 * radians(omega)).cos();
    let sin2p = (2.0 * radians(p)).sin();
    let cos2p = (2.0 * radians(p)).cos();

    let (term1, term2) = match constituent {
        Mm | MSm => (
            -0.0534 * sin2p - 0.0219 * radians(2.0 * p - omega).sin(),
            1.0 - 0.1308 * cosn - 0.0534 * cos2p - 0.0219 * radians(2.0 * p - omega).cos(),
        ),
        Mf | MSqm | Mq => (
            -0.04324 * sin2p - 0.41465 * sinn - 0.03873 * sin2n,
            1.0 + 0.04324 * cos2p + 0.41465 * cosn + 0.03873 * cos2n,
        ),
        // Linear tide, not compound.
        MSf => (0.137 * sinn, 1.0),
        Mtm => (
            -0.018 * sin2p - 0.4145 * sinn - 0.040 * sin2n,
            1.0 + 0.018 * cos2p + 0.4145 * cosn + 0.040 * cos2n,
        ),
        MSt => (
            -0.380 * sin2p - 0.413 * sinn - 0.037 * sin2n,
            1.0 + 0.380 * cos2p + 0.413 * cosn + 0.037 * cos2n,
        ),
        O1 => (
            0.1886 * sinn - 0.0058 * sin2n - 0.0065 * sin2p,
            1.0 + 0.1886 * cosn - 0.0058 * cos2n - 0.0065 * cos2p,
        ),
        _2Q1 | Q1 | Rho1 | Sigma1 => (0.1886 * sinn, 1.0 + 0.1886 * cosn),
        Tau1 => (0.219 * sinn, 1.0 - 0.219 * cosn),
        Beta1 => (0.226 * sinn, 1.0 + 0.226 * cosn),
        // M1 argument is assumed to include the perigee longitude.
        M1 => (
            -0.2294 * sinn - 0.3594 * sin2p - 0.0664 * radians(2.0 * p - omega).sin(),
            1.0 + 0.1722 * cosn + 0.3594 * cos2p + 0.0664 * radians(2.0 * p - omega).cos(),
        ),
        Chi1 => (-0.250 * sinn, 1.0 + 0.193 * cosn),
        P1 => (-0.0112 * sinn, 1.0 - 0.0112 * cosn),
        K1 => (
            -0.1554 * sinn + 0.0031 * sin2n,
            1.0 + 0.1158 * cosn - 0.0028 * cos2n,
        ),
        J1 | Theta1 => (-0.227 * sinn, 1.0 + 0.169 * cosn),
        OO1 | Ups1 => (
            -0.640 * sinn - 0.134 * sin2n - 0.150 * sin2p,
            1.0 + 0.640 * cosn + 0.134 * cos2n + 0.150 * cos2p,
        ),
        M2 | _2N2 | Mu2 | N2 | Nu2 | Lambda2 | MS4 | Eps2 | SN4 | _2SM6 => (
            -0.03731 * sinn + 0.00052 * sin2n,
            1.0 - 0.03731 * cosn + 0.00052 * cos2n,
        ),
        L2 => (
            -0.250 * sin2p - 0.110 * radians(2.0 * p - omega).sin() - 0.037 * sinn,
            1.0 - 0.250 * cos2p - 0.110 * radians(2.0 * p - omega).cos() - 0.037 * cosn,
        ),
        K2 | SK4 => (
            -0.3108 * sinn - 0.0324 * sin2n,
            1.0 + 0.2853 * cosn + 0.0324 * cos2n,
        ),
        Gam2 => (
            0.147 * radians(2.0 * (omega - p)).sin(),
            1.0 + 0.147 * radians(2.0 * (omega - p)).cos(),
        ),
        Del2 => (
            0.505 * sin2p + 0.505 * sinn - 0.165 * sin2n,
            1.0 - 0.505 * cos2p - 0.505 * cosn + 0.165 * cos2n,
        ),
        Eta2 => (-0.436 * sinn, 1.0 + 0.436 * cosn),
        S2 => (0.00225 * sinn, 1.0 + 0.00225 * cosn),
        // Linear 3rd-degree terms.
        M3 => (-0.05644 * sinn, 1.0 - 0.05644 * cosn),
        M13 => (-0.01815 * sinn, 1.0 - 0.27837 * cosn),
        _ => (0.0, 1.0),
    };

    let mut correction = NodalCorrections {
        f: (term1 * term1 + term2 * term2).sqrt(),
        u: degrees(term1.atan2(term2)),
    };

    // Compound tides are assembled from the corrections of their components.
    if term1 == 0.0 {
        match constituent {
            SO1 => {
                let o1 = nodal_correction(omega, p, O1);
                correction.f = o1.f;
                correction.u = -o1.u;
            }
            M4 | MN4 | N4 | _2MS2 | MSN6 | _2MS6 => {
                let m2 = nodal_correction(omega, p, M2);
                correction.f = m2.f * m2.f;
                correction.u = 2.0 * m2.u;
            }
            MSN2 => {
                let m2 = nodal_correction(omega, p, M2);
                correction.f = m2.f * m2.f;
                correction.u = 0.0;
            }
            _2MN2 => {
                let m2 = nodal_correction(omega, p, M2);
                correction.f = m2.f.powi(3);
                correction.u = m2.u;
            }
            _2SM2 => {
                let m2 = nodal_correction(omega, p, M2);
                correction.f = m2.f;
                correction.u = -m2.u;
            }
            M6 | _2MN6 => {
                let m2 = nodal_correction(omega, p, M2);
                correction.f = m2.f.powi(3);
                correction.u = 3.0 * m2.u;
            }
            M8 => {
                let m2 = nodal_correction(omega, p, M2);
                correction.f = m2.f.powi(4);
                correction.u = 4.0 * m2.u;
            }
            MK4 | MKS2 => {
                let m2 = nodal_correction(omega, p, M2);
                let k2 = nodal_correction(omega, p, K2);
                correction.f = m2.f * k2.f;
                correction.u = m2.u + k2.u;
            }
            MSK6 => {
                let m2 = nodal_correction(omega, p, M2);
                let k2 = nodal_correction(omega, p, K2);
                correction.f = m2.f * k2.f;
                correction.u = m2.u - k2.u;
            }
            _2MK6 => {
                let m2 = nodal_correction(omega, p, M2);
                let k2 = nodal_correction(omega, p, K2);
                correction.f = m2.f * m2.f * k2.f;
                correction.u = 2.0 * m2.u + k2.u;
            }
            MO3 => {
                let m2 = nodal_correction(omega, p, M2);
                let o1 = nodal_correction(omega, p, O1);
                correction.f = m2.f * o1.f;
                correction.u = m2.u + o1.u;
            }
            MK3 => {
                let m2 = nodal_correction(omega, p, M2);
                let k1 = nodal_correction(omega, p, K1);
                correction.f = m2.f * k1.f;
                correction.u = m2.u + k1.u;
            }
            _2MK3 => {
                let m2 = nodal_correction(omega, p, M2);
                let k1 = nodal_correction(omega, p, K1);
                correction.f = m2.f * m2.f * k1.f;
                correction.u = 2.0 * m2.u - k1.u;
            }
            _ => {}
        }
    }
    correction
}

/// Group-modulated corrections for a single constituent.
///
/// Rather than accounting for sidelines within a constituent, as the standard
/// rules do, these account for sidelines within the constituent's tidal
/// group. `perihelion` is the mean longitude of the Sun's perihelion (about
/// 282 degrees near J2000), `omega` the lunar node, `perigee` the lunar
/// perigee, and `hsolar` the mean solar longitude, all in degrees. Groups
/// without a tabulated formula use the standard rules.
pub fn group_modulation(
    perihelion: f64,
    omega: f64,
    perigee: f64,
    hsolar: f64,
    constituent: Constituent,
) -> NodalCorrections {
    use Constituent::*;

    let h = radians(hsolar);
    let p = radians(perigee);
    let o = -radians(omega);
    let pp = radians(perihelion);

    let (term1, term2): (f64, f64) = match constituent {
        Mm => (
            -0.0137 * (-2.0 * h + 2.0 * p - o).sin() + 0.1912 * (-2.0 * h + 2.0 * p).sin()
                - 0.0125 * (-2.0 * h + 2.0 * p + o).sin()
                - 0.0657 * (-o).sin()
                - 0.0653 * o.sin()
                - 0.0534 * (2.0 * p).sin()
                - 0.0219 * (2.0 * p + o).sin()
                - 0.0139 * (2.0 * h).sin(),
            1.0 + 0.0137 * (2.0 * h - 2.0 * p - o).cos() + 0.1912 * (-2.0 * h + 2.0 * p).cos()
                - 0.0125 * (-2.0 * h + 2.0 * p + o).cos()
                - 0.1309 * o.cos()
                - 0.0534 * (2.0 * p).cos()
                - 0.0219 * (2.0 * p + o).cos()
                - 0.0139 * (2.0 * h).cos(),
        ),
        Mf => (
            0.0875 * (-2.0 * h).sin() + 0.0432 * (-2.0 * p).sin() + 0.4145 * o.sin()
                + 0.0387 * (2.0 * o).sin(),
            1.0 + 0.0875 * (2.0 * h).cos()
                + 0.0432 * (2.0 * p).cos()
                + 0.4145 * o.cos()
                + 0.0387 * (2.0 * o).cos(),
        ),
        Mtm => (
            0.0721 * (-2.0 * h).sin()
                + 0.1897 * (-2.0 * h + 2.0 * p).sin()
                + 0.0784 * (-2.0 * h + 2.0 * p + o).sin()
                + 0.4146 * o.sin(),
            1.0 + 0.0721 * (2.0 * h).cos()
                + 0.1897 * (-2.0 * h + 2.0 * p).cos()
                + 0.0784 * (-2.0 * h + 2.0 * p + o).cos()
                + 0.4146 * o.cos(),
        ),
        Mq => (
            1.207 * (-2.0 * h + 2.0 * p).sin()
                + 0.497 * (-2.0 * h + 2.0 * p + o).sin()
                + 0.414 * o.sin(),
            1.0 + 1.207 * (-2.0 * h + 2.0 * p).cos()
                + 0.497 * (-2.0 * h + 2.0 * p + o).cos()
                + 0.414 * o.cos(),
        ),
        _2Q1 => (
            0.1886 * (-o).sin()
                + 0.2274 * (2.0 * h - 2.0 * p - o).sin()
                + 1.2086 * (2.0 * h - 2.0 * p).sin(),
            1.0 + 0.1886 * o.cos()
                + 0.2274 * (2.0 * h - 2.0 * p - o).cos()
                + 1.2086 * (2.0 * h - 2.0 * p).cos(),
        ),
        Sigma1 => (
            0.1561 * (-2.0 * h + 2.0 * p - o).sin() - 0.1882 * o.sin()
                + 0.7979 * (-2.0 * h + 2.0 * p).sin()
                + 0.0815 * (h - pp).sin(),
            1.0 + 0.1561 * (-2.0 * h + 2.0 * p - o).cos()
                + 0.1882 * o.cos()
                + 0.8569 * (-2.0 * h + 2.0 * p).cos()
                + 0.0538 * (h - pp).cos(),
        ),
        Q1 => (
            0.1886 * (-o).sin()
                + 0.0359 * (2.0 * h - 2.0 * p - o).sin()
                + 0.1901 * (2.0 * h - 2.0 * p).sin(),
            1.0 + 0.1886 * o.cos()
                + 0.0359 * (2.0 * h - 2.0 * p - o).cos()
                + 0.1901 * (2.0 * h - 2.0 * p).cos(),
        ),
        O1 => (
            -0.0058 * (-2.0 * o).sin() + 0.1886 * (-o).sin() - 0.0065 * (2.0 * p).sin()
                - 0.0131 * (2.0 * h).sin(),
            1.0 - 0.0058 * (2.0 * o).cos() + 0.1886 * o.cos() - 0.0065 * (2.0 * p).cos()
                - 0.0131 * (2.0 * h).cos(),
        ),
        // The central line is 155.655.
        M1 => (
            0.0941 * (-2.0 * h).sin()
                + 0.0664 * (-2.0 * p - o).sin()
                + 0.3594 * (-2.0 * p).sin()
                + 0.2008 * o.sin()
                + 0.1910 * (2.0 * h - 2.0 * p).sin()
                + 0.0422 * (2.0 * h - 2.0 * p + o).sin(),
            1.0 + 0.0941 * (2.0 * h).cos()
                + 0.0664 * (2.0 * p + o).cos()
                + 0.3594 * (2.0 * p).cos()
                + 0.2008 * o.cos()
                + 0.1910 * (2.0 * h - 2.0 * p).cos()
                + 0.0422 * (2.0 * h - 2.0 * p + o).cos(),
        ),
        K1 => (
            -0.0184 * (-3.0 * h + pp).sin() + 0.0036 * (-2.0 * h - o).sin()
                + 0.3166 * (2.0 * h).sin()
                - 0.0026 * (h + pp).sin()
                + 0.0075 * (-h + pp).sin()
                + 0.1558 * o.sin()
                - 0.0030 * (2.0 * o).sin()
                + 0.0049 * (h - pp).sin()
                + 0.0128 * (2.0 * h).sin(),
            1.0 - 0.0184 * (-3.0 * h + pp).cos() + 0.0036 * (2.0 * h + o).cos()
                - 0.3166 * (2.0 * h).cos()
                + 0.0026 * (h + pp).cos()
                + 0.0075 * (h - pp).cos()
                + 0.1164 * o.cos()
                - 0.0030 * (2.0 * o).cos()
                + 0.0049 * (h - pp).cos()
                + 0.0128 * (2.0 * h).cos(),
        ),
        J1 => (
            0.1922 * (-2.0 * h + 2.0 * p).sin()
                + 0.0378 * (-2.0 * h + 2.0 * p + o).sin()
                + 0.2268 * o.sin()
                - 0.0155 * (2.0 * p).sin(),
            1.0 + 0.1922 * (-2.0 * h + 2.0 * p).cos()
                + 0.0378 * (-2.0 * h + 2.0 * p + o).cos()
                + 0.1701 * o.cos()
                - 0.0155 * (2.0 * p).cos(),
        ),
        OO1 => (
            0.3029 * (-2.0 * h).sin()
                + 0.0593 * (-2.0 * h + o).sin()
                + 0.1497 * (-2.0 * p).sin()
                + 0.6404 * o.sin()
                + 0.1337 * (2.0 * o).sin(),
            1.0 + 0.3029 * (-2.0 * h).cos()
                + 0.0593 * (-2.0 * h + o).cos()
                + 0.1497 * (-2.0 * p).cos()
                + 0.6404 * o.cos()
                + 0.1337 * (2.0 * o).cos(),
        ),
        Eps2 => (
            0.385 * (-2.0 * h + 2.0 * p).sin(),
            1.0 + 0.385 * (-2.0 * h + 2.0 * p).cos(),
        ),
        // Better is Mu2 unless 2MS2 is active.
        _2N2 => (
            0.0374 * o.sin() + 1.2064 * (2.0 * h - 2.0 * p).sin()
                - 0.0139 * (-h + pp).sin()
                - 0.0170 * (h - 2.0 * p + pp).sin()
                - 0.0104 * (h - p).sin()
                + 0.0156 * (h - pp).sin()
                - 0.0448 * (2.0 * h - 2.0 * p - o).sin()
                + 0.0808 * (3.0 * h - 2.0 * p - 4.939).sin()
                + 0.0369 * (4.0 * h - 4.0 * p).sin(),
            1.0 - 0.0374 * o.cos() + 1.2064 * (2.0 * h - 2.0 * p).cos()
                - 0.0139 * (-h + pp).cos()
                - 0.0170 * (h - 2.0 * p + pp).cos()
                - 0.0104 * (h - p).cos()
                + 0.0156 * (h - pp).cos()
                - 0.0448 * (2.0 * h - 2.0 * p - o).cos()
                + 0.0808 * (3.0 * h - 2.0 * p - 4.939).cos()
                + 0.0369 * (4.0 * h - 4.0 * p).cos(),
        ),
        Mu2 => (
            -0.0115 * (-3.0 * h + 2.0 * p + pp).sin() - 0.0310 * (-2.0 * h + 2.0 * p - o).sin()
                + 0.8289 * (-2.0 * h + 2.0 * p).sin()
                - 0.0140 * (-h + pp).sin()
                - 0.0086 * (-h + p).sin()
                + 0.0130 * (-h + 2.0 * p - pp).sin()
                + 0.0371 * o.sin()
                + 0.0670 * (h - pp).sin()
                + 0.0306 * (2.0 * h - 2.0 * p).sin(),
            1.0 - 0.0115 * (-3.0 * h + 2.0 * p + pp).cos()
                - 0.0310 * (-2.0 * h + 2.0 * p - o).cos()
                + 0.8289 * (-2.0 * h + 2.0 * p).cos()
                - 0.0140 * (-h + pp).cos()
                - 0.0086 * (-h + p).cos()
                + 0.0130 * (-h + 2.0 * p - pp).cos()
                - 0.0371 * o.cos()
                + 0.0670 * (h - pp).cos()
                + 0.0306 * (2.0 * h - 2.0 * p).cos(),
        ),
        N2 => (
            -0.0084 * (-h + pp).sin() - 0.0373 * (-o).sin()
                + 0.0093 * (h - pp).sin()
                + 0.1899 * (2.0 * h - 2.0 * p).sin()
                - 0.0071 * (2.0 * h - 2.0 * p - o).sin(),
            1.0 - 0.0084 * (-h + pp).cos() - 0.0373 * o.cos()
                + 0.0093 * (h - pp).cos()
                + 0.1899 * (2.0 * h - 2.0 * p).cos()
                - 0.0071 * (2.0 * h - 2.0 * p - o).cos(),
        ),
        M2 => (
            -0.0030 * (-2.0 * h + 2.0 * p).sin() - 0.0373 * (-o).sin()
                + 0.0065 * (h - pp).sin()
                + 0.0011 * (2.0 * h).sin(),
            1.0 - 0.0030 * (-2.0 * h + 2.0 * p).cos() - 0.0373 * o.cos()
                - 0.0004 * (h - pp).cos()
                + 0.0011 * (2.0 * h).cos(),
        ),
        L2 => (
            0.2609 * (-2.0 * h + 2.0 * p).sin()
                - 0.0370 * (-o).sin()
                - 0.2503 * (2.0 * p).sin()
                - 0.1103 * (2.0 * p + o).sin()
                - 0.0491 * (2.0 * h).sin()
                - 0.0230 * (2.0 * h + o).sin(),
            1.0 + 0.2609 * (-2.0 * h + 2.0 * p).cos()
                - 0.0370 * o.cos()
                - 0.2503 * (2.0 * p).cos()
                - 0.1103 * (2.0 * p + o).cos()
                - 0.0491 * (2.0 * h).cos()
                - 0.0230 * (2.0 * h + o).cos(),
        ),
        S2 => (
            0.0585 * (-h + pp).sin() - 0.0084 * (h - pp).sin()
                + 0.2720 * (2.0 * h).sin()
                + 0.0811 * (2.0 * h + o).sin()
                + 0.0088 * (2.0 * h + 2.0 * o).sin(),
            1.0 + 0.0585 * (-h + pp).cos() - 0.0084 * (h - pp).cos()
                + 0.2720 * (2.0 * h).cos()
                + 0.0811 * (2.0 * h + o).cos()
                + 0.0088 * (2.0 * h + 2.0 * o).cos(),
        ),
        _ => (0.0, 0.0),
    };

    if term2 == 0.0 {
        nodal_correction(omega, perigee, constituent)
    } else {
        NodalCorrections {
            f: (term1 * term1 + term2 * term2).sqrt(),
            u: degrees(term1.atan2(term2)),
        }
    }
}
