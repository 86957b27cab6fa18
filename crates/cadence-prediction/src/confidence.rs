//! Prediction confidence from evidence volume, pattern consistency, and
//! schedule knowledge.

use cadence_core::constants::{
    CONFIDENCE_CEILING, CONFIDENCE_FLOOR, CONSISTENCY_CONTRIBUTION, HISTORY_CONTRIBUTION_CAP,
    HISTORY_SATURATION, SCHEDULE_CONTRIBUTION,
};

/// Confidence in [0, 0.95].
pub fn estimate(history_len: usize, consistency: f64, has_schedule: bool) -> f64 {
    let history = (history_len as f64 / HISTORY_SATURATION).min(HISTORY_CONTRIBUTION_CAP);
    let consistency = if consistency.is_finite() {
        consistency.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let schedule = if has_schedule { 1.0 } else { 0.0 };

    (CONFIDENCE_FLOOR
        + history
        + consistency * CONSISTENCY_CONTRIBUTION
        + schedule * SCHEDULE_CONTRIBUTION)
        .clamp(0.0, CONFIDENCE_CEILING)
}
