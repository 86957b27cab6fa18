use serde::{Deserialize, Serialize};

use super::defaults;

/// Candidate generation and lookup configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Calendar days scanned for candidates, today included.
    pub lookahead_days: u32,
    /// First candidate hour of a business day.
    pub business_start_hour: u32,
    /// Last candidate hour of a business day (inclusive).
    pub business_end_hour: u32,
    /// Contacts predicted concurrently per batch group.
    pub batch_size: usize,
    /// Most recent events fetched per contact.
    pub history_limit: usize,
    /// Most recent events fetched per organization for insights.
    pub insights_limit: usize,
    /// Time-zone label attached to windows when a profile has none.
    pub time_zone: String,
    /// Category used when a contact's category has no norms entry.
    pub default_category: String,
    /// Optional TOML file replacing the built-in domain norms table.
    pub norms_path: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            lookahead_days: defaults::DEFAULT_LOOKAHEAD_DAYS,
            business_start_hour: defaults::DEFAULT_BUSINESS_START_HOUR,
            business_end_hour: defaults::DEFAULT_BUSINESS_END_HOUR,
            batch_size: defaults::DEFAULT_BATCH_SIZE,
            history_limit: defaults::DEFAULT_HISTORY_LIMIT,
            insights_limit: defaults::DEFAULT_INSIGHTS_LIMIT,
            time_zone: defaults::DEFAULT_TIME_ZONE.to_string(),
            default_category: defaults::DEFAULT_CATEGORY.to_string(),
            norms_path: None,
        }
    }
}

impl EngineConfig {
    /// Whether `hour` lies inside the configured business day.
    pub fn is_business_hour(&self, hour: u32) -> bool {
        (self.business_start_hour..=self.business_end_hour).contains(&hour)
    }
}
