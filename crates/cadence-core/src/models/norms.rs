use chrono::{Duration, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use super::TimeRange;
use crate::errors::{ConfigError, TimingResult};

/// Version of the built-in norms table.
pub const BUILTIN_NORMS_VERSION: u32 = 1;

/// A time range with the static score attached to it by the norms table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredRange {
    pub range: TimeRange,
    pub score: f64,
}

impl ScoredRange {
    pub const fn new(range: TimeRange, score: f64) -> Self {
        Self { range, score }
    }
}

/// Typical best/avoid contact times for one professional category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainNorm {
    pub best_days: Vec<Weekday>,
    pub best_times: Vec<ScoredRange>,
    pub avoid_times: Vec<ScoredRange>,
    /// Hours a contact in this category usually takes to respond.
    pub response_window_hours: u32,
}

impl DomainNorm {
    pub fn response_window(&self) -> Duration {
        Duration::hours(i64::from(self.response_window_hours))
    }

    fn build(best_days: [Weekday; 3], best: &[TimeRange], avoid: &[TimeRange], hours: u32) -> Self {
        Self {
            best_days: best_days.to_vec(),
            best_times: best.iter().map(|r| ScoredRange::new(*r, 1.0)).collect(),
            avoid_times: avoid.iter().map(|r| ScoredRange::new(*r, 0.0)).collect(),
            response_window_hours: hours,
        }
    }

    fn dental() -> Self {
        Self::build(
            [Weekday::Tue, Weekday::Wed, Weekday::Thu],
            &[TimeRange::hm(10, 0, 11, 30), TimeRange::hm(14, 0, 15, 30)],
            &[
                TimeRange::hm(8, 0, 9, 0),
                TimeRange::hm(12, 0, 13, 0),
                TimeRange::hm(16, 30, 18, 0),
            ],
            48,
        )
    }

    fn medical() -> Self {
        Self::build(
            [Weekday::Tue, Weekday::Wed, Weekday::Thu],
            &[TimeRange::hm(11, 0, 12, 0), TimeRange::hm(15, 0, 16, 0)],
            &[
                TimeRange::hm(7, 0, 9, 0),
                TimeRange::hm(12, 0, 13, 30),
                TimeRange::hm(17, 0, 19, 0),
            ],
            72,
        )
    }

    fn aesthetic() -> Self {
        Self::build(
            [Weekday::Mon, Weekday::Tue, Weekday::Thu],
            &[TimeRange::hm(10, 30, 11, 30), TimeRange::hm(14, 30, 16, 0)],
            &[
                TimeRange::hm(9, 0, 10, 0),
                TimeRange::hm(12, 0, 13, 0),
                TimeRange::hm(17, 0, 18, 0),
            ],
            96,
        )
    }
}

/// Static, versioned table of domain norms keyed by professional category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainNormTable {
    pub version: u32,
    pub categories: BTreeMap<String, DomainNorm>,
}

impl DomainNormTable {
    /// The table compiled into the engine.
    pub fn builtin() -> Self {
        let categories = BTreeMap::from([
            ("aesthetic".to_string(), DomainNorm::aesthetic()),
            ("dental".to_string(), DomainNorm::dental()),
            ("medical".to_string(), DomainNorm::medical()),
        ]);
        Self {
            version: BUILTIN_NORMS_VERSION,
            categories,
        }
    }

    /// Built-in `medical` norms, the last-resort fallback.
    pub fn builtin_fallback() -> DomainNorm {
        DomainNorm::medical()
    }

    pub fn from_toml(toml_str: &str) -> TimingResult<Self> {
        let table: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseFailed {
            reason: e.to_string(),
        })?;
        if table.categories.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "categories".into(),
                reason: "norms table defines no categories".into(),
            }
            .into());
        }
        Ok(table)
    }

    pub fn from_path(path: impl AsRef<Path>) -> TimingResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml(&raw)
    }

    pub fn get(&self, category: &str) -> Option<&DomainNorm> {
        self.categories.get(category)
    }
}

impl Default for DomainNormTable {
    fn default() -> Self {
        Self::builtin()
    }
}
