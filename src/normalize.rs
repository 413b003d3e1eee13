//! Acquisition centering offset.
//!
//! On-axis sequences without a swap acquire with the star centered,
//! nudged only slightly toward the primary companion. Everything else
//! acquires directly on the companion offset.

use crate::model::{AxisMode, Offset};

/// Instrument travel limit for the centering offset, mas.
pub const TRAVEL_LIMIT_MAS: f64 = 999.0;

/// Attenuation applied when the companion is within travel range.
pub const NUDGE_RATIO: f64 = 1.0 / 100.0;

/// Compute the acquisition centering offset from the primary companion's raw offset.
pub fn normalize(primary: Offset, axis: AxisMode, swap: bool) -> Offset {
    if axis != AxisMode::On || swap {
        return primary;
    }
    primary.scale(attenuation(primary.max_abs()))
}

/// Scale factor for a companion whose largest component is `max_abs` mas.
///
/// Beyond the travel limit the offset keeps only its excess over the limit,
/// and never less than the nudge ratio.
fn attenuation(max_abs: f64) -> f64 {
    if max_abs > TRAVEL_LIMIT_MAS {
        NUDGE_RATIO.max((max_abs - TRAVEL_LIMIT_MAS) / max_abs)
    } else {
        NUDGE_RATIO
    }
}
