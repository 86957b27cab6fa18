use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ConfigError;

const MINUTES_PER_DAY: u16 = 24 * 60;

/// A same-day interval in local wall-clock time, stored as minutes from midnight.
///
/// Serialized as `"HH:MM-HH:MM"`. The start is always strictly before the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeRange {
    start: u16,
    end: u16,
}

impl TimeRange {
    /// Build a range from minutes past midnight.
    pub fn new(start: u16, end: u16) -> Result<Self, ConfigError> {
        if start >= end || end > MINUTES_PER_DAY {
            return Err(ConfigError::InvalidTimeRange {
                value: format!("{}-{}", format_minutes(start), format_minutes(end)),
            });
        }
        Ok(Self { start, end })
    }

    /// Build a range from hour/minute pairs. Intended for static tables where
    /// the bounds are known to be ordered.
    pub const fn hm(start_hour: u16, start_minute: u16, end_hour: u16, end_minute: u16) -> Self {
        Self {
            start: start_hour * 60 + start_minute,
            end: end_hour * 60 + end_minute,
        }
    }

    pub fn start_minutes(&self) -> u16 {
        self.start
    }

    pub fn end_minutes(&self) -> u16 {
        self.end
    }

    pub fn duration_minutes(&self) -> i64 {
        i64::from(self.end) - i64::from(self.start)
    }

    /// Inclusive on both ends: a range ending at 12:00 contains 12:00.
    pub fn contains_minute(&self, minute: u16) -> bool {
        minute >= self.start && minute <= self.end
    }

    pub fn contains(&self, time: NaiveTime) -> bool {
        self.contains_minute(minute_of_day(time))
    }

    /// Strict overlap: ranges that only touch do not overlap.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Shrink by `minutes` on each side. `None` if nothing remains.
    pub fn trimmed(&self, minutes: u16) -> Option<TimeRange> {
        let start = self.start.checked_add(minutes)?;
        let end = self.end.checked_sub(minutes)?;
        TimeRange::new(start, end).ok()
    }
}

/// Minutes elapsed since midnight.
pub fn minute_of_day(time: NaiveTime) -> u16 {
    // hour <= 23 and minute <= 59, so this always fits.
    (time.hour() * 60 + time.minute()) as u16
}

fn format_minutes(minutes: u16) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// `HH:MM`, plus `24:00` as the end of the day.
fn parse_clock(raw: &str) -> Option<u16> {
    let raw = raw.trim();
    if raw == "24:00" {
        return Some(MINUTES_PER_DAY);
    }
    NaiveTime::parse_from_str(raw, "%H:%M")
        .ok()
        .map(minute_of_day)
}

impl FromStr for TimeRange {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidTimeRange {
            value: s.to_string(),
        };
        let (start, end) = s.split_once('-').ok_or_else(invalid)?;
        let start = parse_clock(start).ok_or_else(invalid)?;
        let end = parse_clock(end).ok_or_else(invalid)?;
        TimeRange::new(start, end).map_err(|_| invalid())
    }
}

impl TryFrom<String> for TimeRange {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeRange> for String {
    fn from(range: TimeRange) -> Self {
        range.to_string()
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            format_minutes(self.start),
            format_minutes(self.end)
        )
    }
}
