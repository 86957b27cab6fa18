use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants;
use crate::errors::ConfigError;

/// Communication channel an interaction happened on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Email,
    Sms,
    Call,
    InPerson,
}

impl Channel {
    pub const ALL: [Channel; 4] = [Channel::Email, Channel::Sms, Channel::Call, Channel::InPerson];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Sms => "sms",
            Self::Call => "call",
            Self::InPerson => "in_person",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Channel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Channel::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "channel".into(),
                reason: format!("unknown channel `{s}`"),
            })
    }
}

/// Observable engagement actions and their fixed scoring weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementAction {
    Opened,
    Clicked,
    Replied,
    MeetingScheduled,
    Purchase,
    Unsubscribed,
    MarkedSpam,
}

impl EngagementAction {
    pub fn weight(&self) -> f64 {
        match self {
            Self::Opened => constants::WEIGHT_OPENED,
            Self::Clicked => constants::WEIGHT_CLICKED,
            Self::Replied => constants::WEIGHT_REPLIED,
            Self::MeetingScheduled => constants::WEIGHT_MEETING_SCHEDULED,
            Self::Purchase => constants::WEIGHT_PURCHASE,
            Self::Unsubscribed => constants::WEIGHT_UNSUBSCRIBED,
            Self::MarkedSpam => constants::WEIGHT_MARKED_SPAM,
        }
    }
}

/// Categorical result of an interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Positive,
    Neutral,
    Negative,
}

impl Outcome {
    pub fn from_score(score: f64) -> Self {
        if score > 0.0 {
            Self::Positive
        } else if score < 0.0 {
            Self::Negative
        } else {
            Self::Neutral
        }
    }
}

/// One observed interaction with a contact. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementEvent {
    pub contact_id: String,
    /// Organization the contact belonged to when the event was recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
    pub channel: Channel,
    /// Local wall-clock time of the interaction.
    pub timestamp: NaiveDateTime,
    /// Minutes until the contact responded, when they did.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_latency_minutes: Option<f64>,
    pub engagement_score: f64,
    pub outcome: Outcome,
}

impl EngagementEvent {
    /// Record an event with an explicit score. The outcome follows the score's sign.
    pub fn new(
        contact_id: impl Into<String>,
        channel: Channel,
        timestamp: NaiveDateTime,
        engagement_score: f64,
    ) -> Self {
        Self {
            contact_id: contact_id.into(),
            organization_id: None,
            channel,
            timestamp,
            response_latency_minutes: None,
            engagement_score,
            outcome: Outcome::from_score(engagement_score),
        }
    }

    /// Record an event scored by its action weight.
    pub fn from_action(
        contact_id: impl Into<String>,
        channel: Channel,
        action: EngagementAction,
        timestamp: NaiveDateTime,
    ) -> Self {
        Self::new(contact_id, channel, timestamp, action.weight())
    }

    pub fn with_latency(mut self, minutes: f64) -> Self {
        self.response_latency_minutes = Some(minutes);
        self
    }

    pub fn with_organization(mut self, organization_id: impl Into<String>) -> Self {
        self.organization_id = Some(organization_id.into());
        self
    }

    pub fn with_outcome(mut self, outcome: Outcome) -> Self {
        self.outcome = outcome;
        self
    }

    pub fn day_of_week(&self) -> Weekday {
        self.timestamp.weekday()
    }

    pub fn hour_of_day(&self) -> u32 {
        self.timestamp.hour()
    }
}
