use chrono::Weekday;
use serde::{Deserialize, Serialize};

use super::TimeRange;

/// Opening hours for one weekday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub day: Weekday,
    pub hours: TimeRange,
    pub is_open: bool,
}

/// A recurring interval during which the organization is occupied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusyPeriod {
    pub name: String,
    pub days: Vec<Weekday>,
    pub times: TimeRange,
    #[serde(default)]
    pub reason: String,
    pub avoid_contact: bool,
}

impl BusyPeriod {
    pub fn applies_on(&self, day: Weekday) -> bool {
        self.days.contains(&day)
    }
}

/// Where a communication preference came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferenceSource {
    Stated,
    Observed,
    Inferred,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunicationPreference {
    pub kind: String,
    pub value: serde_json::Value,
    pub source: PreferenceSource,
    /// Confidence in [0, 1].
    pub confidence: f64,
}

impl CommunicationPreference {
    /// Raise confidence by `increment`, never past 1.0. Returns the new value.
    pub fn reinforce(&mut self, increment: f64) -> f64 {
        self.confidence = (self.confidence + increment.max(0.0)).clamp(0.0, 1.0);
        self.confidence
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalAdjustment {
    pub season: String,
    pub months: Vec<u32>,
    pub impact: String,
    pub adjustment_factor: f64,
}

/// Declared schedule and contact constraints for one organization.
///
/// Produced by an external profile pipeline; read-only to the engine apart
/// from in-process preference reinforcement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizationScheduleProfile {
    pub organization_id: String,
    pub category: String,
    #[serde(default)]
    pub office_hours: Vec<DaySchedule>,
    pub lunch_break: TimeRange,
    /// Hours the organization spends serving its own customers or patients.
    pub customer_hours: TimeRange,
    /// Administrative slots the organization prefers to be reached in.
    #[serde(default)]
    pub admin_times: Vec<TimeRange>,
    #[serde(default)]
    pub busy_periods: Vec<BusyPeriod>,
    #[serde(default)]
    pub communication_preferences: Vec<CommunicationPreference>,
    #[serde(default)]
    pub seasonal_adjustments: Vec<SeasonalAdjustment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

impl OrganizationScheduleProfile {
    pub fn preference_mut(&mut self, kind: &str) -> Option<&mut CommunicationPreference> {
        self.communication_preferences
            .iter_mut()
            .find(|p| p.kind == kind)
    }

    pub fn preference(&self, kind: &str) -> Option<&CommunicationPreference> {
        self.communication_preferences.iter().find(|p| p.kind == kind)
    }
}
