//! Planning entry point: validate, build, estimate.

use jiff::Timestamp;

use crate::{
    builder,
    estimate::estimate,
    model::{ObservationContext, SequencePlan, SequenceRequest},
    oracle::{OracleError, PositionOracle},
    validate::{ValidationError, check_context, validate},
};

/// Why a plan could not be made.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("invalid sequence: {0}")]
    Invalid(#[from] ValidationError),

    #[error("position lookup failed: {0}")]
    Oracle(#[from] OracleError),
}

/// Plan one observing block.
///
/// Validation runs before any oracle call. Either the whole plan comes
/// back or an error does.
pub fn plan<O: PositionOracle + ?Sized>(
    context: &ObservationContext,
    request: &SequenceRequest,
    oracle: &O,
    at: Timestamp,
) -> Result<SequencePlan, PlanError> {
    let spec = validate(request)?;
    check_context(context, &spec)?;

    let templates = builder::build(context, &spec, oracle, at)?;
    let estimate = estimate(&templates);

    tracing::info!(
        star = %context.star,
        axis = %spec.axis,
        swap = spec.swap,
        templates = templates.len(),
        minutes = estimate.minutes,
        "planned sequence",
    );

    Ok(SequencePlan {
        star: context.star.clone(),
        templates,
        estimate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::Cell;

    use crate::{
        model::{Offset, Template},
        oracle::{self, FixedPositions},
    };

    fn context() -> ObservationContext {
        toml::from_str(
            r#"
            run-id = "1104.C-0651(A)"
            star = "HD206893"
            ra = "21:45:21.9"
            dec = "-12:47:00.1"
            pm-ra = 94.0
            pm-dec = 0.0
            k-mag = 4.5
            h-mag = 4.6
            gs-mag = 5.8
            resolution = "MEDIUM"
            wollaston = "SPLIT"
            repeat = 1
            star-dit = 1.0
            star-ndit = 60
            "#,
        )
        .unwrap()
    }

    fn request(planets: &[&str]) -> SequenceRequest {
        SequenceRequest {
            axis: "on".into(),
            swap: false,
            planets: planets.iter().map(|p| (*p).to_string()).collect(),
            planet_dits: vec![1.0; planets.len()],
            planet_ndits: vec![60; planets.len()],
            star_dit: 1.0,
            star_ndit: 60,
            repeat: None,
        }
    }

    fn oracle() -> FixedPositions {
        FixedPositions::new()
            .with("HD206893b", Offset::new(124.0, 200.0))
            .with("HD206893c", Offset::new(-80.0, 50.0))
    }

    /// Knows no companions; counts how often it was asked.
    struct Untouchable {
        calls: Cell<usize>,
    }

    impl PositionOracle for Untouchable {
        fn predict(&self, companion: &str, _at: Timestamp) -> oracle::Result<Offset> {
            self.calls.set(self.calls.get() + 1);
            Err(OracleError::UnknownCompanion(companion.to_string()))
        }
    }

    #[test]
    fn plans_and_estimates() {
        let plan = plan(
            &context(),
            &request(&["HD206893b"]),
            &oracle(),
            Timestamp::UNIX_EPOCH,
        )
        .unwrap();

        assert_eq!(plan.star, "HD206893");
        assert_eq!(plan.templates.len(), 5);
        // Acquisition + three one-minute observations with overhead.
        assert!((plan.estimate.minutes - (10.0 + 3.0 * 1.1)).abs() < 1e-9);
    }

    #[test]
    fn two_companions_estimate() {
        let plan = plan(
            &context(),
            &request(&["HD206893b", "HD206893c"]),
            &oracle(),
            Timestamp::UNIX_EPOCH,
        )
        .unwrap();

        let planets: f64 = plan
            .templates
            .iter()
            .filter(|t| matches!(t, Template::Observation(obs) if obs.target != "HD206893"))
            .map(crate::estimate::template_minutes)
            .sum();
        assert!((planets - 2.2).abs() < 1e-9);
    }

    #[test]
    fn malformed_lists_never_reach_the_oracle() {
        let mut req = request(&["HD206893b", "HD206893c"]);
        req.planet_ndits.pop();
        let untouchable = Untouchable {
            calls: Cell::new(0),
        };

        let err = plan(&context(), &req, &untouchable, Timestamp::UNIX_EPOCH).unwrap_err();
        assert!(matches!(
            err,
            PlanError::Invalid(ValidationError::MismatchedLists { .. })
        ));
        assert_eq!(untouchable.calls.get(), 0);
    }

    #[test]
    fn axis_disagreement_is_rejected() {
        let mut ctx = context();
        ctx.axis = Some("off".into());
        let err = plan(
            &ctx,
            &request(&["HD206893b"]),
            &oracle(),
            Timestamp::UNIX_EPOCH,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            PlanError::Invalid(ValidationError::AxisDisagreement { .. })
        ));
    }

    #[test]
    fn oracle_failure_surfaces_as_plan_error() {
        let err = plan(
            &context(),
            &request(&["HD206893z"]),
            &oracle(),
            Timestamp::UNIX_EPOCH,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            PlanError::Oracle(OracleError::UnknownCompanion(_))
        ));
    }
}
