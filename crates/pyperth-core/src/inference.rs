//! Admittance inference of minor constituents.
//!
//! Given model-provided harmonic constants for a small set of primary
//! constituents, the admittance (the ratio of the observed constant to the
//! equilibrium amplitude) is interpolated across frequency within each
//! species and used to estimate every constituent flagged as inferred.
//!
//! Three species are handled independently, each anchored on three primaries:
//! diurnal (Q1, O1, K1), semidiurnal (N2, M2, S2) and long-period
//! (Node, Mm, Mf). Diurnal admittances are scaled by the frequency-dependent
//! Love-number combination `1 + k2 - h2`; the long-period band substitutes a
//! latitude-dependent equilibrium value for the Node tide when the model does
//! not provide it.

use num_complex::Complex64;
use smallvec::SmallVec;

use crate::constituents::{Constituent, ConstituentType, TideComponent, TideTable};
use crate::doodson::tidal_frequency;
use crate::love_numbers::love_pmm95b;
use crate::math::{degrees, radians};

/// How admittances are interpolated between the three anchor frequencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpolationType {
    /// Piecewise linear interpolation of admittances.
    LinearAdmittance,
    /// Munk-Cartwright low-order Fourier series interpolation.
    FourierAdmittance,
}

/// Format of the harmonic constants handed to the inference stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputType {
    /// In-phase/quadrature components.
    Harmonic,
    /// Amplitudes and phase lags in degrees.
    Amplitude,
}

/// Equilibrium amplitudes of the inferrable diurnal constituents, in meters.
const DIURNAL_AMPLITUDES: [(Constituent, f64); 19] = [
    (Constituent::_2Q1, 0.006638),
    (Constituent::Sigma1, 0.008023),
    (Constituent::Q1, 0.050184),
    (Constituent::Rho1, 0.009540),
    (Constituent::O1, 0.262163),
    (Constituent::Tau1, 0.003430),
    (Constituent::Beta1, 0.001941),
    (Constituent::M1, 0.020604),
    (Constituent::Chi1, 0.003925),
    (Constituent::Pi1, 0.007125),
    (Constituent::P1, 0.122008),
    (Constituent::K1, 0.368731),
    (Constituent::Psi1, 0.002929),
    (Constituent::Phi1, 0.005247),
    (Constituent::Theta1, 0.003966),
    (Constituent::J1, 0.020618),
    (Constituent::SO1, 0.003417),
    (Constituent::OO1, 0.011293),
    (Constituent::Ups1, 0.002157),
];

/// Equilibrium amplitudes of the inferrable semidiurnal constituents.
const SEMIDIURNAL_AMPLITUDES: [(Constituent, f64); 17] = [
    (Constituent::Eps2, 0.004669),
    (Constituent::_2N2, 0.016011),
    (Constituent::Mu2, 0.019316),
    (Constituent::N2, 0.121006),
    (Constituent::Nu2, 0.022983),
    (Constituent::Gam2, 0.001902),
    (Constituent::Alp2, 0.002178),
    (Constituent::M2, 0.631931),
    (Constituent::Bet2, 0.001921),
    (Constituent::Del2, 0.000714),
    (Constituent::Lambda2, 0.004662),
    (Constituent::L2, 0.017862),
    (Constituent::T2, 0.017180),
    (Constituent::S2, 0.294019),
    (Constituent::R2, 0.002463),
    (Constituent::K2, 0.079924),
    (Constituent::Eta2, 0.004467),
];

/// Equilibrium amplitudes of the inferrable long-period constituents.
///
/// The Sa entry uses the gravitational argument, not the conventional Sa.
const LONG_PERIOD_AMPLITUDES: [(Constituent, f64); 12] = [
    (Constituent::Node, 0.027929),
    (Constituent::Sa, 0.004922),
    (Constituent::Ssa, 0.030988),
    (Constituent::Sta, 0.001809),
    (Constituent::MSm, 0.006728),
    (Constituent::Mm, 0.035184),
    (Constituent::MSf, 0.005837),
    (Constituent::Mf, 0.066607),
    (Constituent::MSt, 0.002422),
    (Constituent::Mtm, 0.012753),
    (Constituent::MSqm, 0.002037),
    (Constituent::Mq, 0.001687),
];

/// Amplitude of the equilibrium node tide, in meters.
const NODE_AMPLITUDE: f64 = 0.0279;

/// Elastic factor applied to the equilibrium node tide.
const NODE_GAMMA2: f64 = 0.682;

/// An inferrable constituent with its frequency and equilibrium amplitude.
#[derive(Debug, Clone, Copy)]
struct Secondary {
    constituent: Constituent,
    frequency: f64,
    amplitude: f64,
}

type Band = SmallVec<[Secondary; 19]>;

fn band(amplitudes: &[(Constituent, f64)]) -> Band {
    let mut entries: Band = amplitudes
        .iter()
        .map(|&(constituent, amplitude)| {
            let doodson = constituent.doodson_number();
            let mut six = [0i8; 6];
            six.copy_from_slice(&doodson[..6]);
            Secondary {
                constituent,
                frequency: tidal_frequency(&six),
                amplitude,
            }
        })
        .collect();
    entries.sort_by(|a, b| a.frequency.total_cmp(&b.frequency));
    entries
}

fn frequency_of(band: &Band, constituent: Constituent) -> f64 {
    band.iter()
        .find(|s| s.constituent == constituent)
        .map(|s| s.frequency)
        .unwrap_or(f64::NAN)
}

fn amplitude_of(band: &Band, constituent: Constituent) -> f64 {
    band.iter()
        .find(|s| s.constituent == constituent)
        .map(|s| s.amplitude)
        .unwrap_or(f64::NAN)
}

/// Piecewise-linear admittance interpolation through three anchors.
fn linear_interpolation(
    x1: f64,
    y1: Complex64,
    x2: f64,
    y2: Complex64,
    x3: f64,
    y3: Complex64,
    x: f64,
) -> Complex64 {
    if x <= x2 {
        let slope = (y2 - y1) / (x2 - x1);
        y1 + slope * (x - x1)
    } else {
        let slope = (y3 - y2) / (x3 - x2);
        y2 + slope * (x - x2)
    }
}

/// Munk-Cartwright Fourier-series admittance interpolation.
///
/// `SPECIES` selects the precomputed inverse matrix: 1 for the diurnal
/// anchors (Q1, O1, K1), 2 for the semidiurnal anchors (N2, M2, S2).
fn fourier_interpolation<const SPECIES: u8>(
    z1: Complex64,
    z2: Complex64,
    z3: Complex64,
    x: f64,
) -> Complex64 {
    const AINV1: [[f64; 3]; 3] = [
        [3.1214, -3.8494, 1.7280],
        [-3.1727, 3.9559, -0.7832],
        [1.4380, -3.0297, 1.5917],
    ];
    const AINV2: [[f64; 3]; 3] = [
        [3.3133, -4.2538, 1.9405],
        [-3.3133, 4.2538, -0.9405],
        [1.5018, -3.2579, 1.7561],
    ];

    let ainv = match SPECIES {
        1 => &AINV1,
        _ => &AINV2,
    };

    let f = x * radians(48.0);
    let coeff = ainv.map(|row| z1 * row[0] + z2 * row[1] + z3 * row[2]);
    coeff[0] + coeff[1] * f.cos() + coeff[2] * f.sin()
}

/// Equilibrium node tide, substituted when the model does not provide Node.
///
/// `P20(sin phi)` is the second-degree Legendre polynomial evaluated at the
/// sine of the latitude.
fn evaluate_node_tide(component: &TideComponent, lat: f64) -> Complex64 {
    if component.is_inferred {
        let p20 = 0.5 - 1.5 * radians(lat).sin().powi(2);
        let xi = NODE_GAMMA2 * p20 * (1.25 / std::f64::consts::PI).sqrt();
        Complex64::new(xi * NODE_AMPLITUDE, 0.0)
    } else {
        component.tide
    }
}

/// Convert an `(amplitude, phase degrees)` pair into in-phase/quadrature
/// components.
fn amplitude_to_harmonic(tide: Complex64) -> Complex64 {
    let phase = radians(tide.im);
    tide.re * Complex64::new(phase.cos(), -phase.sin())
}

/// Inverse of [`amplitude_to_harmonic`].
fn harmonic_to_amplitude(tide: Complex64) -> Complex64 {
    Complex64::new(tide.norm(), degrees((-tide.im).atan2(tide.re)))
}

/// The admittance inference stage.
///
/// Construction precomputes the frequency-sorted secondary lists and the
/// scaled anchor amplitudes; the instance is immutable afterwards and safe to
/// share across evaluation threads.
#[derive(Debug, Clone)]
pub struct Inference {
    interpolation: InterpolationType,
    input_type: InputType,
    diurnal: Band,
    semidiurnal: Band,
    long_period: Band,
    /// Anchor frequencies: Q1, O1, K1, N2, M2, S2, Node, Mm, Mf.
    x: [f64; 9],
    /// Anchor amplitudes, Love-scaled in the diurnal band.
    amp: [f64; 9],
}

impl Inference {
    pub fn new(interpolation: InterpolationType, input_type: InputType) -> Self {
        let diurnal = band(&DIURNAL_AMPLITUDES);
        let semidiurnal = band(&SEMIDIURNAL_AMPLITUDES);
        let long_period = band(&LONG_PERIOD_AMPLITUDES);

        let x = [
            frequency_of(&diurnal, Constituent::Q1),
            frequency_of(&diurnal, Constituent::O1),
            frequency_of(&diurnal, Constituent::K1),
            frequency_of(&semidiurnal, Constituent::N2),
            frequency_of(&semidiurnal, Constituent::M2),
            frequency_of(&semidiurnal, Constituent::S2),
            frequency_of(&long_period, Constituent::Node),
            frequency_of(&long_period, Constituent::Mm),
            frequency_of(&long_period, Constituent::Mf),
        ];

        let love_scale = |frequency: f64| {
            let (k2, h2, _) = love_pmm95b(frequency);
            1.0 + k2 - h2
        };

        let amp = [
            amplitude_of(&diurnal, Constituent::Q1) * love_scale(x[0]),
            amplitude_of(&diurnal, Constituent::O1) * love_scale(x[1]),
            amplitude_of(&diurnal, Constituent::K1) * love_scale(x[2]),
            amplitude_of(&semidiurnal, Constituent::N2),
            amplitude_of(&semidiurnal, Constituent::M2),
            amplitude_of(&semidiurnal, Constituent::S2),
            amplitude_of(&long_period, Constituent::Node),
            amplitude_of(&long_period, Constituent::Mm),
            amplitude_of(&long_period, Constituent::Mf),
        ];

        Self {
            interpolation,
            input_type,
            diurnal,
            semidiurnal,
            long_period,
            x,
            amp,
        }
    }

    /// Anchor constituents, in the order of the internal frequency arrays.
    const ANCHORS: [Constituent; 9] = [
        Constituent::Q1,
        Constituent::O1,
        Constituent::K1,
        Constituent::N2,
        Constituent::M2,
        Constituent::S2,
        Constituent::Node,
        Constituent::Mm,
        Constituent::Mf,
    ];

    fn interpolate_diurnal(
        &self,
        y1: Complex64,
        y2: Complex64,
        y3: Complex64,
        x: f64,
    ) -> Complex64 {
        match self.interpolation {
            InterpolationType::LinearAdmittance => {
                linear_interpolation(self.x[0], y1, self.x[1], y2, self.x[2], y3, x)
            }
            InterpolationType::FourierAdmittance => fourier_interpolation::<1>(y1, y2, y3, x),
        }
    }

    fn interpolate_semidiurnal(
        &self,
        y4: Complex64,
        y5: Complex64,
        y6: Complex64,
        x: f64,
    ) -> Complex64 {
        match self.interpolation {
            InterpolationType::LinearAdmittance => {
                linear_interpolation(self.x[3], y4, self.x[4], y5, self.x[5], y6, x)
            }
            InterpolationType::FourierAdmittance => fourier_interpolation::<2>(y4, y5, y6, x),
        }
    }

    /// Fill every inferred constituent of `hc` from the admittances of the
    /// provided primaries. `lat` is the query latitude in degrees, used by
    /// the equilibrium node tide.
    pub fn apply(&self, hc: &mut TideTable, lat: f64) {
        if self.input_type == InputType::Amplitude {
            for anchor in Self::ANCHORS {
                hc[anchor].tide = amplitude_to_harmonic(hc[anchor].tide);
            }
        }

        let y1 = hc[Constituent::Q1].tide / self.amp[0];
        let y2 = hc[Constituent::O1].tide / self.amp[1];
        let y3 = hc[Constituent::K1].tide / self.amp[2];
        let y4 = hc[Constituent::N2].tide / self.amp[3];
        let y5 = hc[Constituent::M2].tide / self.amp[4];
        let y6 = hc[Constituent::S2].tide / self.amp[5];
        let y7 = evaluate_node_tide(&hc[Constituent::Node], lat) / self.amp[6];
        let y8 = hc[Constituent::Mm].tide / self.amp[7];
        let y9 = hc[Constituent::Mf].tide / self.amp[8];

        for secondary in &self.diurnal {
            let component = &mut hc[secondary.constituent];
            if !component.is_inferred || component.kind != ConstituentType::ShortPeriod {
                continue;
            }
            let y = self.interpolate_diurnal(y1, y2, y3, secondary.frequency);
            let (k2, h2, _) = love_pmm95b(secondary.frequency);
            component.tide = y * (1.0 + k2 - h2) * secondary.amplitude;
        }

        for secondary in &self.semidiurnal {
            let component = &mut hc[secondary.constituent];
            if !component.is_inferred || component.kind != ConstituentType::ShortPeriod {
                continue;
            }
            let y = self.interpolate_semidiurnal(y4, y5, y6, secondary.frequency);
            component.tide = y * secondary.amplitude;
        }

        for secondary in &self.long_period {
            let component = &mut hc[secondary.constituent];
            if !component.is_inferred || component.kind != ConstituentType::LongPeriod {
                continue;
            }
            // The long-period band is always interpolated linearly.
            let y = linear_interpolation(
                self.x[6],
                y7,
                self.x[7],
                y8,
                self.x[8],
                y9,
                secondary.frequency,
            );
            component.tide = y * secondary.amplitude;
        }

        if self.input_type == InputType::Amplitude {
            for anchor in Self::ANCHORS {
                hc[anchor].tide = harmonic_to_amplitude(hc[anchor].tide);
            }
            for secondary in self
                .diurnal
                .iter()
                .chain(&self.semidiurnal)
                .chain(&self.long_period)
            {
                // Anchors were converted above, even when inferred.
                if Self::ANCHORS.contains(&secondary.constituent) {
                    continue;
                }
                let component = &mut hc[secondary.constituent];
                if component.is_inferred {
                    component.tide = harmonic_to_amplitude(component.tide);
                }
            }
        }
    }
}
