use cadence_core::constants::{
    BASE_SCORE, BUSY_PERIOD_PENALTY, NORM_AVOID_TIME_PENALTY, NORM_BEST_DAY_BONUS,
    NORM_BEST_TIME_BONUS, ORG_WINDOW_BONUS, PEAK_MATCH_WEIGHT, PEAK_SCORE_NORMALIZER,
    URGENCY_HORIZON_HOURS,
};
use cadence_core::models::minute_of_day;
use cadence_core::time::{at_hour, hours_between, is_weekend};
use chrono::{Datelike, Duration, NaiveDateTime, Timelike};

use super::{Candidate, ScoringInputs};

/// Score one slot from the analyses alone, clamped to [0, 1].
pub fn score_candidate(time: NaiveDateTime, inputs: &ScoringInputs<'_>) -> f64 {
    let day = time.weekday();
    let minute = minute_of_day(time.time());
    let mut score = BASE_SCORE;

    if let Some(peak) = inputs.pattern.peak_at(day, time.hour()) {
        score += PEAK_MATCH_WEIGHT * (peak.score / PEAK_SCORE_NORMALIZER);
    }

    if inputs.schedule.window_score_at(day, minute).is_some() {
        score += ORG_WINDOW_BONUS;
    }
    if inputs.schedule.in_avoid_period(day, minute) {
        score -= BUSY_PERIOD_PENALTY;
    }

    if inputs.norms.is_best_day(day) {
        score += NORM_BEST_DAY_BONUS;
    }
    if inputs.norms.in_best_time(minute) {
        score += NORM_BEST_TIME_BONUS;
    }
    if inputs.norms.in_avoid_time(minute) {
        score -= NORM_AVOID_TIME_PENALTY;
    }

    score.clamp(0.0, 1.0)
}

/// Sooner slots gain under high urgency; slots past the horizon lose.
pub fn urgency_multiplier(time: NaiveDateTime, now: NaiveDateTime) -> f64 {
    1.0 + (URGENCY_HORIZON_HOURS - hours_between(now, time)) / URGENCY_HORIZON_HOURS
}

/// Final score of a slot, urgency adjustment included.
pub fn score_at(time: NaiveDateTime, inputs: &ScoringInputs<'_>) -> f64 {
    let score = score_candidate(time, inputs);
    if inputs.urgency.is_high() {
        (score * urgency_multiplier(time, inputs.now)).clamp(0.0, 1.0)
    } else {
        score
    }
}

/// Hourly slots over the lookahead horizon, in chronological order.
///
/// Only slots strictly after the request time and inside business hours are
/// produced; weekends are skipped unless urgency is high. Slots scoring zero
/// are dropped.
pub fn enumerate(inputs: &ScoringInputs<'_>) -> Vec<Candidate> {
    let config = inputs.config;
    let skip_weekends = !inputs.urgency.is_high();
    let today = inputs.now.date();

    (0..config.lookahead_days)
        .map(|offset| today + Duration::days(i64::from(offset)))
        .filter(|date| !(skip_weekends && is_weekend(date.weekday())))
        .flat_map(|date| {
            (config.business_start_hour..=config.business_end_hour).map(move |h| at_hour(date, h))
        })
        .filter(|time| *time > inputs.now)
        .filter_map(|time| {
            let score = score_at(time, inputs);
            (score > 0.0).then_some(Candidate { time, score })
        })
        .collect()
}

/// Highest score wins; the earliest slot wins ties.
pub(crate) fn best(candidates: &[Candidate]) -> Option<Candidate> {
    candidates.iter().fold(None, |best: Option<Candidate>, c| match best {
        Some(b) if b.score > c.score || (b.score == c.score && b.time <= c.time) => Some(b),
        _ => Some(*c),
    })
}
