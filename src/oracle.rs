//! Position oracle: where a companion sits relative to its star.
//!
//! The planner only needs a point estimate of (ΔRA, ΔDec) per companion
//! at the observation time. Implementations:
//!
//! - [`FixedPositions`]: a name → offset table.
//! - [`OrbitCatalog`]: predictions from posterior draws of fitted orbits,
//!   stored one JSON file per companion.

mod fixed;
mod kepler;
mod orbit;

use std::io;

use jiff::Timestamp;

use crate::model::Offset;

pub use fixed::FixedPositions;
pub use orbit::{Estimate, OrbitCatalog, Prediction};

/// Errors that can occur when predicting a companion position.
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    #[error("unknown companion '{0}'")]
    UnknownCompanion(String),

    #[error("posterior for '{0}' has no samples")]
    EmptyPosterior(String),

    #[error("posterior for '{companion}' has a malformed sample at row {row}: expected 8 elements, found {len}")]
    MalformedSample {
        companion: String,
        row: usize,
        len: usize,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = core::result::Result<T, OracleError>;

/// Maps a companion and a time to its offset from the star, in mas.
pub trait PositionOracle {
    fn predict(&self, companion: &str, at: Timestamp) -> Result<Offset>;
}
