//! Human-readable factors explaining a recommendation.

use cadence_core::constants::{
    CHANNEL_FACTOR_WEIGHT, CHANNEL_RATE_THRESHOLD, NORMS_FACTOR_WEIGHT,
    PATTERN_CONSISTENCY_THRESHOLD, PATTERN_FACTOR_WEIGHT, SCHEDULE_FACTOR_WEIGHT,
};
use cadence_core::models::{ChannelPreference, Impact, ReasoningFactor};
use cadence_core::time::day_name;

use crate::analysis::{IndividualPattern, NormLookup, ScheduleAnalysis};

/// One factor per contributing analysis, heaviest first.
///
/// Domain norms always contribute. The pattern contributes only when it is
/// consistent, and the top channel only when it engages well.
pub fn compose(
    pattern: &IndividualPattern,
    schedule: &ScheduleAnalysis,
    norms: &NormLookup<'_>,
    requested_category: &str,
    channels: &[ChannelPreference],
) -> Vec<ReasoningFactor> {
    let mut factors = Vec::with_capacity(4);

    if pattern.has_pattern && pattern.consistency > PATTERN_CONSISTENCY_THRESHOLD {
        let peak = pattern
            .top_peak()
            .map(|p| format!(", peaking {} at {:02}:00", day_name(p.day), p.hour))
            .unwrap_or_default();
        factors.push(ReasoningFactor {
            factor: "Historical Engagement".into(),
            impact: Impact::Positive,
            weight: PATTERN_FACTOR_WEIGHT,
            description: format!(
                "Contact engages during identified peak times with {:.0}% consistency over {} interactions{}",
                pattern.consistency * 100.0,
                pattern.total_engagements,
                peak
            ),
        });
    }

    if schedule.has_schedule {
        factors.push(ReasoningFactor {
            factor: "Organization Schedule".into(),
            impact: Impact::Positive,
            weight: SCHEDULE_FACTOR_WEIGHT,
            description: format!(
                "Timing aligns with {} administrative windows across {} open days and avoids {} busy periods",
                schedule.available_windows.len(),
                schedule.open_day_count(),
                schedule.avoid_periods.len()
            ),
        });
    }

    let best_days: Vec<&str> = norms.norm.best_days.iter().map(|d| day_name(*d)).collect();
    let mut description = format!(
        "Based on engagement norms for {} professionals: best days {}",
        norms.category,
        best_days.join(", ")
    );
    if let Some(time) = norms.headline_time() {
        description.push_str(&format!(", from {}", time.format("%H:%M")));
    }
    if norms.fell_back {
        description.push_str(&format!(" (no norms for `{requested_category}`)"));
    }
    factors.push(ReasoningFactor {
        factor: "Industry Best Practices".into(),
        impact: Impact::Positive,
        weight: NORMS_FACTOR_WEIGHT,
        description,
    });

    if let Some(top) = channels.first().filter(|c| c.engagement_rate > CHANNEL_RATE_THRESHOLD) {
        factors.push(ReasoningFactor {
            factor: "Channel Preference".into(),
            impact: Impact::Positive,
            weight: CHANNEL_FACTOR_WEIGHT,
            description: format!(
                "{} shows highest engagement rate at {:.0}% over {} interactions",
                top.channel,
                top.engagement_rate * 100.0,
                top.interactions
            ),
        });
    }

    factors.sort_by(|a, b| b.weight.partial_cmp(&a.weight).unwrap_or(std::cmp::Ordering::Equal));
    factors
}
