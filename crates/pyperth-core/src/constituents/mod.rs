//! Tidal constituent registry.
//!
//! The catalogue is a closed, process-wide list of named tidal waves; each
//! entry carries a 7-component Doodson number and a long-period/short-period
//! type. [`TideTable`] is the dense per-evaluation companion: one
//! [`TideComponent`] per catalogue entry, in ordinal order, holding the
//! harmonic constant and tidal argument at the current query point.

mod catalogue;

pub use catalogue::{Constituent, NUM_CONSTITUENTS};

use num_complex::Complex64;

/// Possible type of tidal wave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstituentType {
    /// Long-period tidal waves (Doodson species 0).
    LongPeriod,
    /// Short-period tidal waves (Doodson species >= 1).
    ShortPeriod,
}

/// Per-constituent state carried through an evaluation.
#[derive(Debug, Clone, Copy)]
pub struct TideComponent {
    /// Doodson number of the constituent.
    pub doodson_number: [i8; 7],
    /// Harmonic constant at the current location, in meters.
    pub tide: Complex64,
    /// Doodson argument at the current time, in degrees.
    pub tidal_argument: f64,
    /// Type of tidal wave.
    pub kind: ConstituentType,
    /// True when the constituent is not provided by the gridded model and
    /// must be filled by inference.
    pub is_inferred: bool,
}

/// Dense, ordinal-indexed table mapping every known constituent to a
/// [`TideComponent`].
#[derive(Debug, Clone)]
pub struct TideTable {
    items: [TideComponent; NUM_CONSTITUENTS],
}

impl TideTable {
    /// Build a table whose entries are zeroed harmonic constants.
    ///
    /// Constituents listed in `provided` are the ones a gridded model will
    /// fill in; every other entry is flagged for inference.
    pub fn new(provided: &[Constituent]) -> Self {
        let items = Constituent::ALL.map(|constituent| TideComponent {
            doodson_number: constituent.doodson_number(),
            tide: Complex64::new(0.0, 0.0),
            tidal_argument: 0.0,
            kind: constituent.kind(),
            is_inferred: !provided.contains(&constituent),
        });
        Self { items }
    }

    /// Number of entries (always the catalogue size).
    #[inline]
    pub fn len(&self) -> usize {
        NUM_CONSTITUENTS
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterate entries in catalogue order.
    pub fn iter(&self) -> impl Iterator<Item = (Constituent, &TideComponent)> {
        Constituent::ALL.iter().copied().zip(self.items.iter())
    }
}

impl Default for TideTable {
    fn default() -> Self {
        Self::new(&[])
    }
}

impl std::ops::Index<Constituent> for TideTable {
    type Output = TideComponent;

    #[inline]
    fn index(&self, constituent: Constituent) -> &Self::Output {
        &self.items[constituent.index()]
    }
}

impl std::ops::IndexMut<Constituent> for TideTable {
    #[inline]
    fn index_mut(&mut self, constituent: Constituent) -> &mut Self::Output {
        &mut self.items[constituent.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogue_size() {
        assert_eq!(NUM_CONSTITUENTS, 78);
        assert_eq!(Constituent::ALL.len(), NUM_CONSTITUENTS);
    }

    #[test]
    fn name_roundtrip() {
        for constituent in Constituent::ALL {
            assert_eq!(
                Constituent::from_name(constituent.name()).unwrap(),
                constituent
            );
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert!(Constituent::from_name("Z9").is_err());
        assert!(Constituent::from_name("m2").is_err());
    }

    #[test]
    fn index_roundtrip() {
        for (i, constituent) in Constituent::ALL.iter().enumerate() {
            assert_eq!(constituent.index(), i);
            assert_eq!(Constituent::from_index(i), Some(*constituent));
        }
        assert_eq!(Constituent::from_index(NUM_CONSTITUENTS), None);
    }

    #[test]
    fn species_matches_kind() {
        for constituent in Constituent::ALL {
            let species = constituent.doodson_number()[0];
            match constituent.kind() {
                ConstituentType::LongPeriod => assert_eq!(species, 0, "{constituent:?}"),
                ConstituentType::ShortPeriod => assert!(species >= 1, "{constituent:?}"),
            }
        }
    }

    #[test]
    fn phase_codes_are_quarter_turns() {
        for constituent in Constituent::ALL {
            let k = constituent.doodson_number()[6];
            assert!((0..=3).contains(&k), "{constituent:?} phase code {k}");
        }
    }

    #[test]
    fn known_doodson_numbers() {
        assert_eq!(Constituent::M2.doodson_number(), [2, 0, 0, 0, 0, 0, 0]);
        assert_eq!(Constituent::K1.doodson_number(), [1, 1, 0, 0, 0, 0, 1]);
        assert_eq!(Constituent::O1.doodson_number(), [1, -1, 0, 0, 0, 0, 3]);
        assert_eq!(Constituent::Node.doodson_number(), [0, 0, 0, 0, 1, 0, 2]);
        assert_eq!(Constituent::Mf.doodson_number(), [0, 2, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn compound_numbers_sum_components() {
        let add = |a: [i8; 7], b: [i8; 7]| {
            let mut out = [0i8; 7];
            for i in 0..6 {
                out[i] = a[i] + b[i];
            }
            out[6] = (a[6] + b[6]).rem_euclid(4);
            out
        };
        let m2 = Constituent::M2.doodson_number();
        let s2 = Constituent::S2.doodson_number();
        let n2 = Constituent::N2.doodson_number();
        let k1 = Constituent::K1.doodson_number();
        assert_eq!(Constituent::MS4.doodson_number(), add(m2, s2));
        assert_eq!(Constituent::MN4.doodson_number(), add(m2, n2));
        assert_eq!(Constituent::MK3.doodson_number(), add(m2, k1));
        assert_eq!(Constituent::M4.doodson_number(), add(m2, m2));
    }

    #[test]
    fn frequencies_are_bounded() {
        // Even the eighth-diurnal overtide stays well under 200 deg/h.
        for constituent in Constituent::ALL {
            let doodson = constituent.doodson_number();
            let mut six = [0i8; 6];
            six.copy_from_slice(&doodson[..6]);
            let frequency = crate::doodson::tidal_frequency(&six);
            assert!(
                frequency.abs() < 200.0,
                "{constituent:?}: {frequency} deg/h"
            );
            match constituent.kind() {
                ConstituentType::LongPeriod => {
                    assert!(frequency.abs() < 3.0, "{constituent:?}: {frequency}")
                }
                ConstituentType::ShortPeriod => {
                    assert!(frequency > 10.0, "{constituent:?}: {frequency}")
                }
            }
        }
    }

    #[test]
    fn tide_table_marks_missing_constituents_inferred() {
        let provided = [Constituent::M2, Constituent::S2, Constituent::K1];
        let table = TideTable::new(&provided);
        for (constituent, component) in table.iter() {
            assert_eq!(
                component.is_inferred,
                !provided.contains(&constituent),
                "{constituent:?}"
            );
            assert_eq!(component.tide, Complex64::new(0.0, 0.0));
            assert_eq!(component.doodson_number, constituent.doodson_number());
            assert_eq!(component.kind, constituent.kind());
        }
    }

    #[test]
    fn tide_table_is_mutable_by_constituent() {
        let mut table = TideTable::default();
        table[Constituent::M2].tide = Complex64::new(1.5, 2.3);
        table[Constituent::S2].tide = Complex64::new(-0.7, 1.2);
        assert_eq!(table[Constituent::M2].tide, Complex64::new(1.5, 2.3));
        assert_eq!(table[Constituent::S2].tide, Complex64::new(-0.7, 1.2));
    }
}
