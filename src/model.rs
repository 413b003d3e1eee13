//! Core data model.
//!
//! The inputs to a planning run (observation context, sequence request)
//! and what comes out of it (templates, plan, time estimate).

mod context;
mod offset;
mod plan;
mod sequence;
mod template;

pub use context::ObservationContext;
pub use offset::Offset;
pub use plan::{SequencePlan, TimeEstimate};
pub use sequence::{AxisMode, Companion, Exposure, SequenceRequest, SequenceSpec};
pub use template::{Acquisition, CompanionPosition, Dither, Header, Observation, Template};
