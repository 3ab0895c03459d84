//! The constituent catalogue.
//!
//! One entry per tidal wave handled by the engine: canonical name, Doodson
//! number and phase code. The first six integers multiply Doodson's celestial
//! variables `[tau, s, h, p, N', p_s]`; the seventh is a phase offset in
//! units of 90 degrees. Compound tides (M4, 2MS6, MK3, ...) carry the sum of
//! their components' Doodson numbers.
//!
//! Values follow the Doodson/Cartwright tables as used in Richard Ray's
//! PERTH programs.

use crate::error::PerthError;

use super::ConstituentType;

macro_rules! declare_constituents {
    (
        $( $variant:ident => $name:literal, [$t:literal, $s:literal, $h:literal,
           $p:literal, $n:literal, $ps:literal, $k:literal] ;)+
    ) => {
        /// A named tidal constituent from the closed catalogue.
        #[repr(u8)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[allow(non_camel_case_types)]
        pub enum Constituent {
            $($variant),+
        }

        /// Number of catalogue entries.
        pub const NUM_CONSTITUENTS: usize = Constituent::ALL.len();

        impl Constituent {
            /// Every catalogue entry, in ordinal order.
            pub const ALL: [Constituent; 78] = [$(Constituent::$variant),+];

            /// Canonical, case-sensitive name.
            pub fn name(self) -> &'static str {
                match self {
                    $(Constituent::$variant => $name),+
                }
            }

            /// Reverse lookup of [`Constituent::name`].
            pub fn from_name(name: &str) -> Result<Self, PerthError> {
                match name {
                    $($name => Ok(Constituent::$variant),)+
                    _ => Err(PerthError::UnknownConstituent(name.to_string())),
                }
            }

            /// The 7-component Doodson number.
            pub fn doodson_number(self) -> [i8; 7] {
                match self {
                    $(Constituent::$variant => [$t, $s, $h, $p, $n, $ps, $k]),+
                }
            }

            /// Long-period (species 0) or short-period (species >= 1).
            pub fn kind(self) -> ConstituentType {
                if self.doodson_number()[0] == 0 {
                    ConstituentType::LongPeriod
                } else {
                    ConstituentType::ShortPeriod
                }
            }

            /// Ordinal position in the catalogue.
            #[inline]
            pub fn index(self) -> usize {
                self as usize
            }

            /// Catalogue entry at the given ordinal.
            pub fn from_index(index: usize) -> Option<Self> {
                Self::ALL.get(index).copied()
            }
        }
    };
}

declare_constituents! {
    _2MK3   => "2MK3",    [3, -1, 0, 0, 0, 0, 3];
    _2MK6   => "2MK6",    [6, 2, 0, 0, 0, 0, 0];
    _2MN2   => "2MN2",    [2, 1, 0, -1, 0, 0, 0];
    _2MN6   => "2MN6",    [6, -1, 0, 1, 0, 0, 0];
    _2MS2   => "2MS2",    [2, -2, 2, 0, 0, 0, 0];
    _2MS6   => "2MS6",    [6, 2, -2, 0, 0, 0, 0];
    _2N2    => "2N2",     [2, -2, 0, 2, 0, 0, 0];
    _2Q1    => "2Q1",     [1, -3, 0, 2, 0, 0, 3];
    _2SM2   => "2SM2",    [2, 4, -4, 0, 0, 0, 0];
    _2SM6   => "2SM6",    [6, 4, -4, 0, 0, 0, 0];
    Alp2    => "Alp2",    [2, 0, -1, 0, 0, 1, 2];
    Bet2    => "Bet2",    [2, 0, 1, 0, 0, -1, 0];
    Beta1   => "Beta1",   [1, 0, -2, 1, 0, 0, 1];
    Chi1    => "Chi1",    [1, 0, 2, -1, 0, 0, 1];
    Del2    => "Del2",    [2, 0, 2, 0, 0, 0, 0];
    Eps2    => "Eps2",    [2, -3, 2, 1, 0, 0, 0];
    Eta2    => "Eta2",    [2, 3, 0, -1, 0, 0, 0];
    Gam2    => "Gam2",    [2, 0, -2, 2, 0, 0, 2];
    J1      => "J1",      [1, 2, 0, -1, 0, 0, 1];
    K1      => "K1",      [1, 1, 0, 0, 0, 0, 1];
    K2      => "K2",      [2, 2, 0, 0, 0, 0, 0];
    L2      => "L2",      [2, 1, 0, -1, 0, 0, 2];
    Lambda2 => "Lambda2", [2, 1, -2, 1, 0, 0, 2];
    M1      => "M1",      [1, 0, 0, 1, 0, 0, 1];
    M13     => "M13",     [1, 0, 0, 0, 0, 0, 1];
    M2      => "M2",      [2, 0, 0, 0, 0, 0, 0];
    M3      => "M3",      [3, 0, 0, 0, 0, 0, 2];
    M4      => "M4",      [4, 0, 0, 0, 0, 0, 0];
    M6      => "M6",      [6, 0, 0, 0, 0, 0, 0];
    M8      => "M8",      [8, 0, 0, 0, 0, 0, 0];
    Mf      => "Mf",      [0, 2, 0, 0, 0, 0, 0];
    MK3     => "MK3",     [3, 1, 0, 0, 0, 0, 1];
    MK4     => "MK4",     [4, 2, 0, 0, 0, 0, 0];
    MKS2    => "MKS2",    [2, 0, 2, 0, 0, 0, 0];
    Mm      => "Mm",      [0, 1, 0, -1, 0, 0, 0];
    MN4     => "MN4",     [4, -1, 0, 1, 0, 0, 0];
    MO3     => "MO3",     [3, -1, 0, 0, 0, 0, 3];
    Mq      => "Mq",      [0, 4, 0, -2, 0, 0, 0];
    MS4     => "MS4",     [4, 2, -2, 0, 0, 0, 0];
    MSf     => "MSf",     [0, 2, -2, 0, 0, 0, 0];
    MSK6    => "MSK6",    [6, 4, -2, 0, 0, 0, 0];
    MSm     => "MSm",     [0, 1, -2, 1, 0, 0, 0];
    MSN2    => "MSN2",    [2, 3, -2, -1, 0, 0, 0];
    MSN6    => "MSN6",    [6, 1, -2, 1, 0, 0, 0];
    MSqm    => "MSqm",    [0, 4, -2, 0, 0, 0, 0];
    MSt     => "MSt",     [0, 3, -2, 1, 0, 0, 0];
    Mtm     => "Mtm",     [0, 3, 0, -1, 0, 0, 0];
    Mu2     => "Mu2",     [2, -2, 2, 0, 0, 0, 0];
    N2      => "N2",      [2, -1, 0, 1, 0, 0, 0];
    N4      => "N4",      [4, -2, 0, 2, 0, 0, 0];
    Node    => "Node",    [0, 0, 0, 0, 1, 0, 2];
    Nu2     => "Nu2",     [2, -1, 2, -1, 0, 0, 0];
    O1      => "O1",      [1, -1, 0, 0, 0, 0, 3];
    OO1     => "OO1",     [1, 3, 0, 0, 0, 0, 1];
    P1      => "P1",      [1, 1, -2, 0, 0, 0, 3];
    Phi1    => "Phi1",    [1, 1, 2, 0, 0, 0, 1];
    Pi1     => "Pi1",     [1, 1, -3, 0, 0, 1, 3];
    Psi1    => "Psi1",    [1, 1, 1, 0, 0, -1, 1];
    Q1      => "Q1",      [1, -2, 0, 1, 0, 0, 3];
    R2      => "R2",      [2, 2, -1, 0, 0, -1, 2];
    R4      => "R4",      [4, 4, -2, 0, 0, -2, 0];
    Rho1    => "Rho1",    [1, -2, 2, -1, 0, 0, 3];
    S1      => "S1",      [1, 1, -1, 0, 0, 0, 2];
    S2      => "S2",      [2, 2, -2, 0, 0, 0, 0];
    S4      => "S4",      [4, 4, -4, 0, 0, 0, 0];
    S6      => "S6",      [6, 6, -6, 0, 0, 0, 0];
    Sa      => "Sa",      [0, 0, 1, 0, 0, -1, 0];
    Sa1     => "Sa1",     [0, 0, 1, 0, 0, 0, 0];
    Sigma1  => "Sigma1",  [1, -3, 2, 0, 0, 0, 3];
    SK4     => "SK4",     [4, 4, -2, 0, 0, 0, 0];
    SN4     => "SN4",     [4, 1, -2, 1, 0, 0, 0];
    SO1     => "SO1",     [1, 3, -2, 0, 0, 0, 1];
    Ssa     => "Ssa",     [0, 0, 2, 0, 0, 0, 0];
    Sta     => "Sta",     [0, 0, 3, 0, 0, 0, 0];
    T2      => "T2",      [2, 2, -3, 0, 0, 1, 0];
    Tau1    => "Tau1",    [1, -1, 2, 0, 0, 0, 1];
    Theta1  => "Theta1",  [1, 2, -2, 1, 0, 0, 1];
    Ups1    => "Ups1",    [1, 4, 0, -1, 0, 0, 1];
}
