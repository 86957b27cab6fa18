use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Channel;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayEngagementStat {
    pub day: Weekday,
    /// Share of events with a positive outcome.
    pub engagement_rate: f64,
    pub total_engagements: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourEngagementStat {
    pub hour: u32,
    pub engagement_rate: f64,
    pub total_engagements: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelPerformance {
    pub engagement_rate: f64,
    /// Mean response latency in minutes, absent when no event reported one.
    pub avg_response_time: Option<f64>,
    pub total_interactions: usize,
}

/// Aggregate, read-only timing report for one organization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PracticeInsights {
    pub organization_id: String,
    /// Set when no report could be produced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub best_days: Vec<DayEngagementStat>,
    pub best_times: Vec<HourEngagementStat>,
    pub channel_performance: BTreeMap<Channel, ChannelPerformance>,
    pub recommendations: Vec<String>,
}

impl PracticeInsights {
    pub fn unavailable(organization_id: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            organization_id: organization_id.into(),
            status: Some(status.into()),
            ..Default::default()
        }
    }

    pub fn is_available(&self) -> bool {
        self.status.is_none()
    }
}
