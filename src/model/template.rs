//! Templates: the instrument commands a plan is made of.

use jiff::Timestamp;
use serde::Serialize;

use super::Offset;

/// One instrument command.
///
/// Serialized flat, tagged by `"type"`, with the field names the
/// instrument tooling reads.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Template {
    Header(Header),
    Acquisition(Acquisition),
    Observation(Observation),
    Dither(Dither),

    /// Half-wave-plate / pupil swap. No payload.
    Swap,
}

impl Template {
    /// The `"type"` tag, for display and logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Header(_) => "header",
            Self::Acquisition(_) => "acquisition",
            Self::Observation(_) => "observation",
            Self::Dither(_) => "dither",
            Self::Swap => "swap",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Header {
    #[serde(rename = "run ID")]
    pub run_id: String,

    #[serde(rename = "OB name")]
    pub ob_name: String,

    #[serde(rename = "Obs time")]
    pub obs_time: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Acquisition {
    #[serde(rename = "target name")]
    pub target: String,

    #[serde(rename = "RA")]
    pub ra: String,

    #[serde(rename = "DEC")]
    pub dec: String,

    #[serde(rename = "pmRA")]
    pub pm_ra: f64,

    #[serde(rename = "pmDEC")]
    pub pm_dec: f64,

    #[serde(rename = "K mag")]
    pub k_mag: f64,

    #[serde(rename = "H mag")]
    pub h_mag: f64,

    pub resolution: String,
    pub wollaston: String,

    #[serde(rename = "GS mag")]
    pub gs_mag: f64,

    /// Centering offset applied at acquisition.
    #[serde(flatten)]
    pub offset: Offset,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    #[serde(rename = "name science")]
    pub target: String,

    /// Offset from the acquisition center.
    #[serde(flatten)]
    pub offset: Offset,

    #[serde(rename = "DIT")]
    pub dit: f64,

    #[serde(rename = "NDIT")]
    pub ndit: u32,

    /// Exposure pattern: `"O"` for object only, `"O S"` for object then sky.
    pub sequence: String,

    /// Companion position, only on the post-swap pass.
    #[serde(flatten)]
    pub companion: Option<CompanionPosition>,
}

impl Observation {
    /// Number of sub-exposures the pattern asks for.
    pub fn sub_exposures(&self) -> usize {
        self.sequence.chars().filter(|c| !c.is_whitespace()).count()
    }
}

/// Companion position annotation on a post-swap observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CompanionPosition {
    #[serde(rename = "RA_planet")]
    pub ra: f64,

    #[serde(rename = "DEC_planet")]
    pub dec: f64,
}

impl From<Offset> for CompanionPosition {
    fn from(offset: Offset) -> Self {
        Self {
            ra: offset.ra,
            dec: offset.dec,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dither {
    #[serde(rename = "name science")]
    pub target: String,

    /// Reference magnitude for the new pointing.
    #[serde(rename = "mag science")]
    pub mag: f64,

    #[serde(flatten)]
    pub offset: Offset,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observation(sequence: &str) -> Observation {
        Observation {
            target: "hr8799e".into(),
            offset: Offset::new(12.0, -3.5),
            dit: 30.0,
            ndit: 4,
            sequence: sequence.into(),
            companion: None,
        }
    }

    #[test]
    fn sub_exposures_skip_spaces() {
        assert_eq!(observation("O").sub_exposures(), 1);
        assert_eq!(observation("O S").sub_exposures(), 2);
    }

    #[test]
    fn swap_serializes_as_bare_type() {
        let json = serde_json::to_value(Template::Swap).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "swap" }));
    }

    #[test]
    fn observation_serializes_flat() {
        let json = serde_json::to_value(Template::Observation(observation("O"))).unwrap();
        assert_eq!(json["type"], "observation");
        assert_eq!(json["name science"], "hr8799e");
        assert_eq!(json["RA offset"], 12.0);
        assert_eq!(json["DEC offset"], -3.5);
        assert_eq!(json["DIT"], 30.0);
        assert_eq!(json["NDIT"], 4);
        assert_eq!(json["sequence"], "O");
        assert!(json.get("RA_planet").is_none());
    }

    #[test]
    fn companion_annotation_serializes_flat() {
        let mut obs = observation("O");
        obs.companion = Some(Offset::new(100.0, 200.0).into());
        let json = serde_json::to_value(Template::Observation(obs)).unwrap();
        assert_eq!(json["RA_planet"], 100.0);
        assert_eq!(json["DEC_planet"], 200.0);
    }
}
