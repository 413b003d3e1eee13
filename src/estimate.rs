//! Time estimator: how long a plan takes to execute.

use crate::model::{Exposure, Template, TimeEstimate};

/// Fixed cost of an acquisition, minutes.
pub const ACQUISITION_MINUTES: f64 = 10.0;

/// Fixed cost of a dither, minutes.
pub const DITHER_MINUTES: f64 = 1.0;

/// Per-exposure overhead on top of integration time.
pub const OVERHEAD_FACTOR: f64 = 1.1;

/// Total estimated time of a template list.
///
/// A plain sum over templates, so estimates of concatenated lists add up.
pub fn estimate(templates: &[Template]) -> TimeEstimate {
    TimeEstimate {
        minutes: templates.iter().map(template_minutes).sum(),
    }
}

/// Estimated time of a single template, minutes.
#[allow(clippy::cast_precision_loss)]
pub fn template_minutes(template: &Template) -> f64 {
    match template {
        Template::Acquisition(_) => ACQUISITION_MINUTES,
        Template::Dither(_) => DITHER_MINUTES,
        Template::Observation(obs) => {
            Exposure::new(obs.dit, obs.ndit).minutes() * OVERHEAD_FACTOR * obs.sub_exposures() as f64
        }
        Template::Header(_) | Template::Swap => 0.0,
    }
}
