//! Individual pattern analysis: mines a contact's history into peak
//! (weekday, hour) buckets and a consistency score.

use std::collections::BTreeMap;

use cadence_core::constants::PEAK_BUCKETS;
use cadence_core::models::EngagementEvent;
use chrono::Weekday;
use serde::Serialize;

/// A (weekday, hour) bucket and the mean engagement observed in it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeakTime {
    pub day: Weekday,
    pub hour: u32,
    pub score: f64,
    pub count: usize,
}

/// Behavioral signal mined from one contact's history.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IndividualPattern {
    pub has_pattern: bool,
    /// Top buckets, descending by score.
    pub peak_times: Vec<PeakTime>,
    /// In [0, 1]. Higher means the top buckets perform alike.
    pub consistency: f64,
    pub total_engagements: usize,
}

struct Bucket {
    day: Weekday,
    hour: u32,
    scores: Vec<f64>,
}

impl Bucket {
    fn mean(&self) -> f64 {
        mean(&self.scores)
    }
}

impl IndividualPattern {
    pub fn analyze(history: &[EngagementEvent]) -> Self {
        if history.is_empty() {
            return Self::default();
        }

        // Keyed by (days from Monday, hour) so iteration order is stable.
        let mut buckets: BTreeMap<(u32, u32), Bucket> = BTreeMap::new();
        for event in history {
            let day = event.day_of_week();
            let hour = event.hour_of_day();
            buckets
                .entry((day.num_days_from_monday(), hour))
                .or_insert_with(|| Bucket {
                    day,
                    hour,
                    scores: Vec::new(),
                })
                .scores
                .push(event.engagement_score);
        }

        let mut ranked: Vec<Bucket> = buckets.into_values().collect();
        // Stable sort keeps calendar order among equal scores.
        ranked.sort_by(|a, b| {
            b.mean()
                .partial_cmp(&a.mean())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked.truncate(PEAK_BUCKETS);

        let consistency = consistency(&ranked);
        let peak_times = ranked
            .iter()
            .map(|b| PeakTime {
                day: b.day,
                hour: b.hour,
                score: b.mean(),
                count: b.scores.len(),
            })
            .collect();

        Self {
            has_pattern: true,
            peak_times,
            consistency,
            total_engagements: history.len(),
        }
    }

    /// The peak bucket matching a candidate's weekday and hour, if any.
    pub fn peak_at(&self, day: Weekday, hour: u32) -> Option<&PeakTime> {
        self.peak_times
            .iter()
            .find(|p| p.day == day && p.hour == hour)
    }

    pub fn top_peak(&self) -> Option<&PeakTime> {
        self.peak_times.first()
    }
}

/// `1 - variance / mean` over the top bucket scores, clamped to [0, 1].
///
/// With several buckets the bucket means are compared. A lone bucket is
/// judged by the spread of its own observations, and a lone observation
/// carries no consistency at all.
fn consistency(top: &[Bucket]) -> f64 {
    let samples: Vec<f64> = match top {
        [] => return 0.0,
        [only] if only.scores.len() < 2 => return 0.0,
        [only] => only.scores.clone(),
        many => many.iter().map(Bucket::mean).collect(),
    };

    let mean = mean(&samples);
    if !mean.is_finite() || mean <= 0.0 {
        return 0.0;
    }
    let variance =
        samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / samples.len() as f64;
    (1.0 - variance / mean).clamp(0.0, 1.0)
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_core::models::{Channel, EngagementAction};
    use chrono::NaiveDate;

    fn event_at(day: u32, hour: u32, action: EngagementAction) -> EngagementEvent {
        // June 2024: the 3rd is a Monday.
        let ts = NaiveDate::from_ymd_opt(2024, 6, day)
            .unwrap()
            .and_hms_opt(hour, 15, 0)
            .unwrap();
        EngagementEvent::from_action("c1", Channel::Email, action, ts)
    }

    #[test]
    fn empty_history_has_no_pattern() {
        let pattern = IndividualPattern::analyze(&[]);
        assert!(!pattern.has_pattern);
        assert_eq!(pattern.consistency, 0.0);
        assert_eq!(pattern.total_engagements, 0);
        assert!(pattern.peak_times.is_empty());
    }

    #[test]
    fn single_event_has_zero_consistency() {
        let pattern = IndividualPattern::analyze(&[event_at(4, 10, EngagementAction::Replied)]);
        assert!(pattern.has_pattern);
        assert_eq!(pattern.consistency, 0.0);
        assert_eq!(pattern.peak_times.len(), 1);
    }

    #[test]
    fn buckets_average_member_scores() {
        let history = vec![
            event_at(4, 10, EngagementAction::Replied),
            event_at(4, 10, EngagementAction::Opened),
            event_at(5, 14, EngagementAction::Clicked),
        ];
        let pattern = IndividualPattern::analyze(&history);
        let tue = pattern.peak_at(Weekday::Tue, 10).unwrap();
        assert_eq!(tue.score, 2.0);
        assert_eq!(tue.count, 2);
        assert_eq!(pattern.total_engagements, 3);
    }

    #[test]
    fn peaks_sorted_descending_and_capped() {
        let history: Vec<_> = (8..16)
            .map(|h| {
                let action = if h == 12 {
                    EngagementAction::Purchase
                } else {
                    EngagementAction::Opened
                };
                event_at(5, h, action)
            })
            .collect();
        let pattern = IndividualPattern::analyze(&history);
        assert_eq!(pattern.peak_times.len(), PEAK_BUCKETS);
        assert_eq!(pattern.top_peak().unwrap().hour, 12);
        assert!(pattern
            .peak_times
            .windows(2)
            .all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn uniform_buckets_are_fully_consistent() {
        let history = vec![
            event_at(4, 10, EngagementAction::Replied),
            event_at(5, 11, EngagementAction::Replied),
            event_at(6, 9, EngagementAction::Replied),
        ];
        assert_eq!(IndividualPattern::analyze(&history).consistency, 1.0);
    }

    #[test]
    fn negative_history_never_goes_below_zero() {
        let history = vec![
            event_at(4, 10, EngagementAction::MarkedSpam),
            event_at(5, 11, EngagementAction::Unsubscribed),
        ];
        let pattern = IndividualPattern::analyze(&history);
        assert_eq!(pattern.consistency, 0.0);
    }
}
