//! Sequence request and its validated form.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Integration parameters for one observation template.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Exposure {
    /// Single-exposure integration time, seconds.
    pub dit: f64,

    /// Number of exposures.
    pub ndit: u32,
}

impl Exposure {
    pub fn new(dit: f64, ndit: u32) -> Self {
        Self { dit, ndit }
    }

    /// Raw integration time in minutes, without overheads.
    pub fn minutes(self) -> f64 {
        self.dit * f64::from(self.ndit) / 60.0
    }
}

/// Whether the star stays centered or the pointing moves onto each target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisMode {
    On,
    Off,
}

impl FromStr for AxisMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on" => Ok(Self::On),
            "off" => Ok(Self::Off),
            other => Err(format!("invalid axis mode '{other}' (must be on or off)")),
        }
    }
}

impl fmt::Display for AxisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::On => f.write_str("on"),
            Self::Off => f.write_str("off"),
        }
    }
}

/// A sequence as written in the observing block file.
///
/// Unchecked: the companion lists are parallel and may disagree in length.
/// Turn it into a [`SequenceSpec`] with [`crate::validate::validate`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SequenceRequest {
    pub axis: String,

    #[serde(default)]
    pub swap: bool,

    /// Companion names. The first one is the primary.
    pub planets: Vec<String>,

    pub planet_dits: Vec<f64>,
    pub planet_ndits: Vec<u32>,

    pub star_dit: f64,
    pub star_ndit: u32,

    /// Overrides the block-level repeat count.
    #[serde(default)]
    pub repeat: Option<u32>,
}

/// A companion to observe, with its own exposure.
#[derive(Debug, Clone, PartialEq)]
pub struct Companion {
    pub name: String,
    pub exposure: Exposure,
}

/// A validated sequence, ready for planning.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceSpec {
    pub axis: AxisMode,
    pub swap: bool,

    /// Never empty. The first entry is the primary companion.
    pub companions: Vec<Companion>,

    pub star_exposure: Exposure,
    pub repeat: Option<u32>,
}

impl SequenceSpec {
    /// The companion used for acquisition centering.
    pub fn primary(&self) -> &Companion {
        &self.companions[0]
    }

    /// Number of passes through the sequence block: two around a swap, else one.
    pub fn passes(&self) -> u32 {
        if self.swap { 2 } else { 1 }
    }

    /// Repeat count, falling back to the block-level value.
    pub fn repeat_or(&self, context_repeat: u32) -> u32 {
        self.repeat.unwrap_or(context_repeat)
    }
}
