use cadence_core::config::EngineConfig;
use cadence_core::models::Urgency;
use cadence_core::time::{at_hour, floor_hour, shift_off_weekend};
use chrono::{Duration, NaiveDateTime, Timelike};

use super::candidates::{best, enumerate, score_at};
use super::{Candidate, ScoringInputs, Selection};

/// Choose the recommended slot.
///
/// Falls back to [`default_time`] when no candidate survives scoring, and for
/// high urgency when neither a personal pattern nor a schedule is known.
pub fn select(inputs: &ScoringInputs<'_>) -> Selection {
    let candidates = enumerate(inputs);
    let no_evidence = !inputs.pattern.has_pattern && !inputs.schedule.has_schedule;

    let chosen = if inputs.urgency.is_high() && no_evidence {
        None
    } else {
        best(&candidates)
    };

    match chosen {
        Some(optimal) => Selection {
            optimal,
            used_default: false,
            candidates_considered: candidates.len(),
        },
        None => {
            let time = default_time(inputs.now, inputs.urgency, inputs.config);
            Selection {
                optimal: Candidate {
                    time,
                    score: score_at(time, inputs),
                },
                used_default: true,
                candidates_considered: candidates.len(),
            }
        }
    }
}

/// Fallback slot when scoring gives no usable answer.
///
/// High urgency takes the next whole hour, moved into business hours; medium
/// waits until 10:00 tomorrow; low until 14:00 in three days. Weekend results
/// move to Monday.
pub fn default_time(now: NaiveDateTime, urgency: Urgency, config: &EngineConfig) -> NaiveDateTime {
    let time = match urgency {
        Urgency::High => {
            let next = floor_hour(now) + Duration::hours(1);
            if next.hour() < config.business_start_hour && next.date() == now.date() {
                at_hour(next.date(), config.business_start_hour)
            } else if !config.is_business_hour(next.hour()) {
                at_hour(now.date() + Duration::days(1), config.business_start_hour)
            } else {
                next
            }
        }
        Urgency::Medium => at_hour(now.date() + Duration::days(1), 10),
        Urgency::Low => at_hour(now.date() + Duration::days(3), 14),
    };
    shift_off_weekend(time)
}
