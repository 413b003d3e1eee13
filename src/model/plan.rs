//! Sequence plan: the ordered templates plus their time budget.

use std::fmt;

use super::Template;

/// Estimated execution time of a plan.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TimeEstimate {
    /// Total, in minutes.
    pub minutes: f64,
}

impl TimeEstimate {
    /// Whole hours.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn hours(self) -> u64 {
        (self.minutes / 60.0).floor() as u64
    }

    /// Whole minutes past the last full hour.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn remainder_minutes(self) -> u64 {
        (self.minutes % 60.0).floor() as u64
    }
}

impl fmt::Display for TimeEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} hours, {} min",
            self.hours(),
            self.remainder_minutes()
        )
    }
}

/// A finished plan: templates in emission order and the time they take.
///
/// Order is the literal command order sent to the instrument.
#[derive(Debug, Clone, PartialEq)]
pub struct SequencePlan {
    /// Star name, used to name the persisted file.
    pub star: String,
    pub templates: Vec<Template>,
    pub estimate: TimeEstimate,
}
