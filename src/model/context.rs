//! Observation context: the fixed facts about one observing block.

use serde::{Deserialize, Serialize};

use super::Exposure;

/// Everything about the star and the instrument setup that stays fixed
/// for a planning run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ObservationContext {
    /// Observing run identifier, e.g. `"1104.C-0651(A)"`.
    pub run_id: String,

    /// Star name. Also names the observing block and its output file.
    pub star: String,

    /// Right ascension, as the instrument expects it (usually sexagesimal).
    pub ra: String,

    /// Declination, as the instrument expects it.
    pub dec: String,

    /// Proper motion in RA, mas/yr.
    pub pm_ra: f64,

    /// Proper motion in Dec, mas/yr.
    pub pm_dec: f64,

    pub k_mag: f64,
    pub h_mag: f64,

    /// Guide star magnitude.
    pub gs_mag: f64,

    /// Spectral resolution mode, e.g. `"MEDIUM"`.
    pub resolution: String,

    /// Beam-splitter configuration, e.g. `"SPLIT"`.
    pub wollaston: String,

    /// How many times each sequence block repeats.
    pub repeat: u32,

    /// Star DIT for the closing star observation, seconds.
    pub star_dit: f64,

    /// Star NDIT for the closing star observation.
    pub star_ndit: u32,

    /// Block-level axis mode. When set it must agree with the sequence.
    #[serde(default)]
    pub axis: Option<String>,
}

impl ObservationContext {
    /// The block-level star exposure.
    pub fn star_exposure(&self) -> Exposure {
        Exposure::new(self.star_dit, self.star_ndit)
    }
}
