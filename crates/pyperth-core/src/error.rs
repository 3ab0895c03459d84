//! Error types shared across the crate.
//!
//! Structural problems (bad axes, mismatched shapes, out-of-range dates) fail
//! fast with a [`PerthError`]. Data conditions such as a query point falling
//! outside the grid are not errors; they are reported through
//! [`crate::tidal_model::Quality`].

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PerthError {
    /// The requested date falls outside the 1700-2150 validity range of the
    /// Delta-T polynomials.
    #[error("time out of range in Delta-T routine; revise for year {year}")]
    TimeOutOfRange { year: f64 },

    /// A wave grid was added whose shape or orientation does not match the
    /// model axes.
    #[error("invalid wave shape: expected {expected_rows}x{expected_cols}, got {rows}x{cols}")]
    InvalidShape {
        expected_rows: usize,
        expected_cols: usize,
        rows: usize,
        cols: usize,
    },

    /// Axis points are not evenly spaced, or there are fewer than two of them.
    #[error("invalid axis: {0}")]
    InvalidAxis(String),

    /// A constituent name that is not part of the catalogue.
    #[error("unknown constituent: {0:?}")]
    UnknownConstituent(String),

    /// Batch input arrays of differing lengths.
    #[error("input arrays must have the same length: lon={lon}, lat={lat}, time={time}")]
    SizeMismatch { lon: usize, lat: usize, time: usize },

    /// The evaluation thread pool could not be built.
    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, PerthError>;
