//! Domain norm lookup with category fallback.

use cadence_core::models::{DomainNorm, DomainNormTable};
use chrono::{NaiveTime, Weekday};

/// Resolves a professional category to its norms, falling back to the
/// configured default category and finally to the built-in table.
#[derive(Debug, Clone)]
pub struct DomainNormProvider {
    table: DomainNormTable,
    default_category: String,
    fallback: DomainNorm,
}

/// The norms applied to one prediction.
#[derive(Debug, Clone, Copy)]
pub struct NormLookup<'a> {
    /// Category whose norms were applied.
    pub category: &'a str,
    pub norm: &'a DomainNorm,
    pub fell_back: bool,
}

impl DomainNormProvider {
    pub fn new(table: DomainNormTable, default_category: impl Into<String>) -> Self {
        let default_category = default_category.into();
        let fallback = table
            .get(&default_category)
            .cloned()
            .unwrap_or_else(DomainNormTable::builtin_fallback);
        Self {
            table,
            default_category,
            fallback,
        }
    }

    pub fn table(&self) -> &DomainNormTable {
        &self.table
    }

    pub fn lookup<'a>(&'a self, category: &'a str) -> NormLookup<'a> {
        match self.table.get(category) {
            Some(norm) => NormLookup {
                category,
                norm,
                fell_back: false,
            },
            None => NormLookup {
                category: &self.default_category,
                norm: &self.fallback,
                fell_back: true,
            },
        }
    }
}

impl Default for DomainNormProvider {
    fn default() -> Self {
        Self::new(
            DomainNormTable::builtin(),
            cadence_core::config::defaults::DEFAULT_CATEGORY,
        )
    }
}

impl NormLookup<'_> {
    pub fn is_best_day(&self, day: Weekday) -> bool {
        self.norm.best_days.contains(&day)
    }

    pub fn in_best_time(&self, minute: u16) -> bool {
        self.norm
            .best_times
            .iter()
            .any(|r| r.range.contains_minute(minute))
    }

    pub fn in_avoid_time(&self, minute: u16) -> bool {
        self.norm
            .avoid_times
            .iter()
            .any(|r| r.range.contains_minute(minute))
    }

    /// First best-time range start, used when describing the norms.
    pub fn headline_time(&self) -> Option<NaiveTime> {
        self.norm.best_times.first().and_then(|r| {
            let minute = r.range.start_minutes();
            NaiveTime::from_hms_opt(u32::from(minute / 60), u32::from(minute % 60), 0)
        })
    }
}
