//! Sequence validation: structural checks before planning starts.
//!
//! A [`SequenceRequest`] is what the observing block file says.
//! A [`SequenceSpec`] is what the planner accepts. The only way from
//! one to the other is [`validate`].

use crate::model::{
    AxisMode, Companion, Exposure, ObservationContext, SequenceRequest, SequenceSpec,
};

/// Why a sequence was rejected.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error(
        "mismatched companion/exposure lists: {planets} companions, {dits} DITs, {ndits} NDITs"
    )]
    MismatchedLists {
        planets: usize,
        dits: usize,
        ndits: usize,
    },

    #[error("invalid axis mode '{0}' (must be on or off)")]
    InvalidAxis(String),

    #[error("swap requires exactly one companion (here {0})")]
    SwapRequiresSingleCompanion(usize),

    #[error("sequence has no companions")]
    NoCompanions,

    #[error("repeat count must be at least 1")]
    InvalidRepeat,

    #[error("star name '{0}' cannot be used as a file name")]
    InvalidStarName(String),

    #[error("block axis '{context}' disagrees with sequence axis '{sequence}'")]
    AxisDisagreement {
        context: AxisMode,
        sequence: AxisMode,
    },
}

/// Check a sequence request and turn it into a plannable spec.
pub fn validate(request: &SequenceRequest) -> Result<SequenceSpec, ValidationError> {
    let planets = request.planets.len();
    if planets != request.planet_dits.len() || planets != request.planet_ndits.len() {
        return Err(ValidationError::MismatchedLists {
            planets,
            dits: request.planet_dits.len(),
            ndits: request.planet_ndits.len(),
        });
    }

    let axis = parse_axis(&request.axis)?;

    if request.swap && planets != 1 {
        return Err(ValidationError::SwapRequiresSingleCompanion(planets));
    }
    if planets == 0 {
        return Err(ValidationError::NoCompanions);
    }
    if request.repeat == Some(0) {
        return Err(ValidationError::InvalidRepeat);
    }

    let companions = request
        .planets
        .iter()
        .zip(&request.planet_dits)
        .zip(&request.planet_ndits)
        .map(|((name, &dit), &ndit)| Companion {
            name: name.clone(),
            exposure: Exposure::new(dit, ndit),
        })
        .collect();

    Ok(SequenceSpec {
        axis,
        swap: request.swap,
        companions,
        star_exposure: Exposure::new(request.star_dit, request.star_ndit),
        repeat: request.repeat,
    })
}

/// Check that the block-level settings are consistent with a validated sequence.
///
/// The block may carry its own axis mode; when it does, it must match the
/// sequence. A mismatch is logged and rejected rather than planned.
pub fn check_context(
    context: &ObservationContext,
    spec: &SequenceSpec,
) -> Result<(), ValidationError> {
    if spec.repeat_or(context.repeat) == 0 {
        return Err(ValidationError::InvalidRepeat);
    }
    if !is_plain_name(&context.star) {
        return Err(ValidationError::InvalidStarName(context.star.clone()));
    }

    let Some(raw) = context.axis.as_deref() else {
        return Ok(());
    };
    let context_axis = parse_axis(raw)?;
    if context_axis != spec.axis {
        tracing::warn!(
            star = %context.star,
            context = %context_axis,
            sequence = %spec.axis,
            "axis mode disagreement between block and sequence",
        );
        return Err(ValidationError::AxisDisagreement {
            context: context_axis,
            sequence: spec.axis,
        });
    }
    Ok(())
}

/// Whether `name` can stand alone as a file stem inside a directory.
pub fn is_plain_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

fn parse_axis(raw: &str) -> Result<AxisMode, ValidationError> {
    raw.parse()
        .map_err(|_| ValidationError::InvalidAxis(raw.to_string()))
}
