use cadence_core::constants::{
    ALTERNATIVE_DECAY_PER_HOUR, ALTERNATIVE_OFFSETS, MAX_ALTERNATIVES, NEXT_DAY_ALTERNATIVE_PENALTY,
};
use cadence_core::models::TimeWindow;
use cadence_core::time::{at_hour, next_business_day};
use chrono::{Datelike, Duration, NaiveDateTime, Timelike};

use super::{Candidate, ScoringInputs};

/// Up to three one-hour windows near the optimal slot, best first.
///
/// Offsets of one and two hours decay from the optimal score; the next
/// business day at the same hour is offered unless urgency is high.
pub fn alternatives(
    optimal: &Candidate,
    inputs: &ScoringInputs<'_>,
    time_zone: &str,
) -> Vec<TimeWindow> {
    let config = inputs.config;
    let mut offered: Vec<(NaiveDateTime, f64)> = ALTERNATIVE_OFFSETS
        .iter()
        .map(|offset| {
            (
                optimal.time + Duration::hours(*offset),
                optimal.score - ALTERNATIVE_DECAY_PER_HOUR * offset.unsigned_abs() as f64,
            )
        })
        .filter(|(time, _)| config.is_business_hour(time.hour()))
        .collect();

    if !inputs.urgency.is_high() {
        let next_day = at_hour(next_business_day(optimal.time.date()), optimal.time.hour());
        offered.push((next_day, optimal.score - NEXT_DAY_ALTERNATIVE_PENALTY));
    }

    offered.retain(|(time, _)| *time > inputs.now && *time != optimal.time);
    // Stable sort keeps chronological order among equal scores.
    offered.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    offered.dedup_by_key(|(time, _)| *time);

    offered
        .into_iter()
        .take(MAX_ALTERNATIVES)
        .map(|(start, score)| TimeWindow {
            start,
            end: start + Duration::hours(1),
            score: score.max(0.0),
            day_of_week: start.weekday(),
            time_zone: time_zone.to_string(),
        })
        .collect()
}
