use chrono::{NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Channel;
use crate::errors::ConfigError;

/// How soon the outreach needs to happen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Low,
    #[default]
    Medium,
    High,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn is_high(&self) -> bool {
        matches!(self, Self::High)
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Urgency {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(ConfigError::InvalidValue {
                field: "urgency".into(),
                reason: format!("unknown urgency `{other}`"),
            }),
        }
    }
}

/// Campaign-wide parameters for a batch prediction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CampaignOptions {
    #[serde(default)]
    pub urgency: Urgency,
    #[serde(default)]
    pub content_type: String,
}

/// Direction in which a reasoning factor moved the recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Impact {
    Positive,
    Negative,
    Neutral,
}

/// One auditable contribution to a recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReasoningFactor {
    pub factor: String,
    pub impact: Impact,
    pub weight: f64,
    pub description: String,
}

/// A scored contact window in local time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub score: f64,
    pub day_of_week: Weekday,
    pub time_zone: String,
}

/// Observed performance of one channel for a contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelPreference {
    pub channel: Channel,
    pub best_times: Vec<TimeWindow>,
    /// Mean engagement score of the channel's events.
    pub engagement_rate: f64,
    /// Mean response latency in minutes; 0 when no event reported one.
    pub response_time_avg_minutes: f64,
    /// Number of events observed on the channel.
    pub interactions: usize,
}

/// The engine's recommendation for one contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingPrediction {
    pub contact_id: String,
    pub optimal_time: NaiveDateTime,
    /// In [0, 0.95].
    pub confidence: f64,
    pub reasoning: Vec<ReasoningFactor>,
    pub alternative_windows: Vec<TimeWindow>,
    pub channel_preferences: Vec<ChannelPreference>,
    /// Professional category whose norms were applied.
    pub category: String,
    pub urgency: Urgency,
    /// True when no scored candidate was usable and a default slot was chosen.
    pub used_default: bool,
}
