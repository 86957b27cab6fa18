//! Organization-level timing report built from aggregate engagement.

use std::collections::BTreeMap;

use cadence_core::constants::{INSIGHT_LOW_SUCCESS_RATE, INSIGHT_RECENT_DAYS, INSIGHT_TOP_HOURS};
use cadence_core::models::{
    Channel, ChannelPerformance, DayEngagementStat, EngagementEvent, HourEngagementStat, Outcome,
    PracticeInsights,
};
use cadence_core::traits::EventStore;
use cadence_observability::events;
use chrono::{Duration, NaiveDateTime, Weekday};

use crate::engine::TimingEngine;

pub const NO_PATTERN_DATA: &str = "No pattern data available";

#[derive(Default)]
struct Tally {
    total: usize,
    positive: usize,
    latencies: Vec<f64>,
}

impl Tally {
    fn add(&mut self, event: &EngagementEvent) {
        self.total += 1;
        if event.outcome == Outcome::Positive {
            self.positive += 1;
        }
        if let Some(latency) = event.response_latency_minutes {
            self.latencies.push(latency);
        }
    }

    fn rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.positive as f64 / self.total as f64
        }
    }
}

impl<S: EventStore> TimingEngine<S> {
    /// Timing report for an organization. Organizations without a recorded
    /// profile get an unavailable report.
    pub fn practice_timing_insights(&self, organization_id: &str) -> PracticeInsights {
        let span = cadence_observability::insights_span!(organization_id);
        let _guard = span.enter();

        if self.profile_for(organization_id).is_none() {
            return PracticeInsights::unavailable(organization_id, NO_PATTERN_DATA);
        }

        let engagements = match self
            .store()
            .organization_engagements(organization_id, self.config().engine.insights_limit)
        {
            Ok(found) => found,
            Err(err) => {
                events::store_degraded(
                    "organization_engagements",
                    organization_id,
                    &err.to_string(),
                    "empty report",
                );
                Vec::new()
            }
        };

        build_insights(organization_id, &engagements, self.now())
    }
}

/// Aggregate `engagements` into a report as of `now`.
pub fn build_insights(
    organization_id: &str,
    engagements: &[EngagementEvent],
    now: NaiveDateTime,
) -> PracticeInsights {
    let best_days = best_days(engagements);
    let best_times = best_times(engagements);
    let channel_performance = channel_performance(engagements);
    let recommendations = recommendations(engagements, &best_times, &channel_performance, now);

    PracticeInsights {
        organization_id: organization_id.to_string(),
        status: None,
        best_days,
        best_times,
        channel_performance,
        recommendations,
    }
}

fn best_days(engagements: &[EngagementEvent]) -> Vec<DayEngagementStat> {
    let mut days: BTreeMap<u32, (Weekday, Tally)> = BTreeMap::new();
    for event in engagements {
        let day = event.day_of_week();
        days.entry(day.num_days_from_monday())
            .or_insert_with(|| (day, Tally::default()))
            .1
            .add(event);
    }

    let mut stats: Vec<DayEngagementStat> = days
        .into_values()
        .map(|(day, tally)| DayEngagementStat {
            day,
            engagement_rate: tally.rate(),
            total_engagements: tally.total,
        })
        .collect();
    stats.sort_by(|a, b| {
        b.engagement_rate
            .partial_cmp(&a.engagement_rate)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    stats
}

fn best_times(engagements: &[EngagementEvent]) -> Vec<HourEngagementStat> {
    let mut hours: BTreeMap<u32, Tally> = BTreeMap::new();
    for event in engagements {
        hours.entry(event.hour_of_day()).or_default().add(event);
    }

    let mut stats: Vec<HourEngagementStat> = hours
        .into_iter()
        .map(|(hour, tally)| HourEngagementStat {
            hour,
            engagement_rate: tally.rate(),
            total_engagements: tally.total,
        })
        .collect();
    stats.sort_by(|a, b| {
        b.engagement_rate
            .partial_cmp(&a.engagement_rate)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    stats.truncate(INSIGHT_TOP_HOURS);
    stats
}

fn channel_performance(engagements: &[EngagementEvent]) -> BTreeMap<Channel, ChannelPerformance> {
    let mut channels: BTreeMap<Channel, Tally> = BTreeMap::new();
    for event in engagements {
        channels.entry(event.channel).or_default().add(event);
    }

    channels
        .into_iter()
        .map(|(channel, tally)| {
            let avg_response_time = (!tally.latencies.is_empty())
                .then(|| tally.latencies.iter().sum::<f64>() / tally.latencies.len() as f64);
            let performance = ChannelPerformance {
                engagement_rate: tally.rate(),
                avg_response_time,
                total_interactions: tally.total,
            };
            (channel, performance)
        })
        .collect()
}

fn recommendations(
    engagements: &[EngagementEvent],
    best_times: &[HourEngagementStat],
    channels: &BTreeMap<Channel, ChannelPerformance>,
    now: NaiveDateTime,
) -> Vec<String> {
    let mut out = Vec::new();

    let cutoff = now - Duration::days(INSIGHT_RECENT_DAYS);
    let mut recent = Tally::default();
    engagements
        .iter()
        .filter(|e| e.timestamp >= cutoff)
        .for_each(|e| recent.add(e));
    if recent.total > 0 && recent.rate() < INSIGHT_LOW_SUCCESS_RATE {
        out.push(format!(
            "Consider adjusting communication timing: the last {INSIGHT_RECENT_DAYS} days succeeded {:.0}% of the time",
            recent.rate() * 100.0
        ));
    }

    if !best_times.is_empty() {
        let hours: Vec<String> = best_times
            .iter()
            .take(3)
            .map(|t| format!("{:02}:00", t.hour))
            .collect();
        out.push(format!(
            "Focus communications during peak engagement hours: {}",
            hours.join(", ")
        ));
    }

    // First channel wins ties, so the result is stable.
    let best_channel = channels
        .iter()
        .fold(None, |best: Option<(&Channel, &ChannelPerformance)>, (channel, perf)| match best {
            Some((_, b)) if b.engagement_rate >= perf.engagement_rate => best,
            _ => Some((channel, perf)),
        });
    if let Some((channel, perf)) = best_channel {
        out.push(format!(
            "{channel} shows highest engagement rate at {:.0}%",
            perf.engagement_rate * 100.0
        ));
    }

    out
}
