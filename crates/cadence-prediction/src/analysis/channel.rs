//! Per-channel engagement analysis.

use std::collections::BTreeMap;

use cadence_core::constants::{CHANNEL_BLOCK_HOURS, MAX_CHANNEL_WINDOWS};
use cadence_core::models::{Channel, ChannelPreference, EngagementEvent, TimeWindow};
use cadence_core::time::{at_hour, next_occurrence};
use chrono::{Duration, NaiveDateTime, Weekday};

/// One entry per channel with at least one event, ranked by engagement rate.
/// The requested channel wins ties.
pub fn analyze_channels(
    history: &[EngagementEvent],
    requested: Channel,
    now: NaiveDateTime,
    time_zone: &str,
) -> Vec<ChannelPreference> {
    let mut by_channel: BTreeMap<Channel, Vec<&EngagementEvent>> = BTreeMap::new();
    for event in history {
        by_channel.entry(event.channel).or_default().push(event);
    }

    let mut preferences: Vec<ChannelPreference> = by_channel
        .into_iter()
        .map(|(channel, events)| ChannelPreference {
            channel,
            best_times: best_blocks(&events, now, time_zone),
            engagement_rate: mean(events.iter().map(|e| e.engagement_score)),
            response_time_avg_minutes: mean(
                events.iter().filter_map(|e| e.response_latency_minutes),
            ),
            interactions: events.len(),
        })
        .collect();

    preferences.sort_by(|a, b| {
        b.engagement_rate
            .partial_cmp(&a.engagement_rate)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| (b.channel == requested).cmp(&(a.channel == requested)))
    });
    preferences
}

/// Positively scored events grouped into 2-hour weekday blocks, best first,
/// each projected onto its next occurrence after `now`.
fn best_blocks(
    events: &[&EngagementEvent],
    now: NaiveDateTime,
    time_zone: &str,
) -> Vec<TimeWindow> {
    let mut blocks: BTreeMap<(u32, u32), (Weekday, Vec<f64>)> = BTreeMap::new();
    for event in events.iter().filter(|e| e.engagement_score > 0.0) {
        let day = event.day_of_week();
        let start_hour = event.hour_of_day() / CHANNEL_BLOCK_HOURS * CHANNEL_BLOCK_HOURS;
        blocks
            .entry((day.num_days_from_monday(), start_hour))
            .or_insert_with(|| (day, Vec::new()))
            .1
            .push(event.engagement_score);
    }

    let mut ranked: Vec<(Weekday, u32, f64)> = blocks
        .into_iter()
        .map(|((_, hour), (day, scores))| (day, hour, mean(scores.into_iter())))
        .collect();
    ranked.sort_by(|a, b| b.2.partial_cmp(&a.2).unwrap_or(std::cmp::Ordering::Equal));

    ranked
        .into_iter()
        .take(MAX_CHANNEL_WINDOWS)
        .map(|(day, hour, score)| {
            let mut start = at_hour(next_occurrence(now.date(), day), hour);
            if start <= now {
                start += Duration::days(7);
            }
            TimeWindow {
                start,
                end: start + Duration::hours(i64::from(CHANNEL_BLOCK_HOURS)),
                score,
                day_of_week: day,
                time_zone: time_zone.to_string(),
            }
        })
        .collect()
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
