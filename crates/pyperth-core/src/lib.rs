//! Computational core of the pyperth ocean-tide prediction engine.
//!
//! Given a gridded harmonic tide model (complex amplitudes of a set of tidal
//! constituents on a longitude x latitude grid) and a sequence of
//! `(lon, lat, time)` query points, the engine predicts short-period and
//! long-period tidal heights at each point. It is built for bulk
//! altimetry-style workloads: millions of space-time queries against a
//! shared, read-only model, fanned out over worker threads that each own a
//! small mutable scratchpad.

pub mod axis;
pub mod constituents;
pub mod datetime;
pub mod delta_t;
pub mod doodson;
pub mod error;
pub mod fundarg;
pub mod inference;
pub mod love_numbers;
pub mod math;
pub mod nodal_corrections;
pub mod tidal_model;
pub mod tide;

pub use axis::Axis;
pub use constituents::{Constituent, ConstituentType, TideComponent, TideTable};
pub use error::{PerthError, Result};
pub use inference::{Inference, InputType, InterpolationType};
pub use nodal_corrections::NodalCorrections;
pub use tidal_model::{Accelerator, GridElement, Quality, TidalModel};
pub use tide::{EvaluationResult, EvaluationSettings, Perth};
