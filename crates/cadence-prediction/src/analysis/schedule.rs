//! Organization schedule analysis: converts declared office hours, breaks,
//! and do-not-contact periods into scored contact windows.

use cadence_core::constants::{
    AFTER_HOURS_SCORE, BEFORE_HOURS_SCORE, LUNCH_TRIM_MINUTES, LUNCH_WINDOW_SCORE,
    MIN_LUNCH_WINDOW_MINUTES,
};
use cadence_core::models::{BusyPeriod, DaySchedule, OrganizationScheduleProfile, TimeRange};
use chrono::Weekday;
use serde::Serialize;

/// An open window in which the organization can be contacted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AvailableWindow {
    pub day: Weekday,
    pub range: TimeRange,
    pub score: f64,
    pub reason: &'static str,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScheduleAnalysis {
    pub has_schedule: bool,
    pub available_windows: Vec<AvailableWindow>,
    /// Administrative slots the organization asked to be reached in.
    pub preferred_times: Vec<TimeRange>,
    /// Busy periods flagged `avoid_contact`.
    pub avoid_periods: Vec<BusyPeriod>,
    pub time_zone: Option<String>,
}

impl ScheduleAnalysis {
    pub fn analyze(profile: Option<&OrganizationScheduleProfile>) -> Self {
        let Some(profile) = profile else {
            return Self::default();
        };

        let avoid_periods: Vec<BusyPeriod> = profile
            .busy_periods
            .iter()
            .filter(|b| b.avoid_contact)
            .cloned()
            .collect();

        let available_windows = profile
            .office_hours
            .iter()
            .filter(|d| d.is_open)
            .flat_map(|d| day_windows(d, profile))
            .filter(|w| !blocked(w, &avoid_periods))
            .collect();

        Self {
            has_schedule: true,
            available_windows,
            preferred_times: profile.admin_times.clone(),
            avoid_periods,
            time_zone: profile.time_zone.clone(),
        }
    }

    /// The best available window score covering `minute` on `day`.
    pub fn window_score_at(&self, day: Weekday, minute: u16) -> Option<f64> {
        self.available_windows
            .iter()
            .filter(|w| w.day == day && w.range.contains_minute(minute))
            .map(|w| w.score)
            .reduce(f64::max)
    }

    /// Whether `minute` on `day` falls in a do-not-contact period.
    pub fn in_avoid_period(&self, day: Weekday, minute: u16) -> bool {
        self.avoid_periods
            .iter()
            .any(|b| b.applies_on(day) && b.times.contains_minute(minute))
    }

    pub fn open_day_count(&self) -> usize {
        let mut days: Vec<Weekday> = self.available_windows.iter().map(|w| w.day).collect();
        days.dedup();
        days.len()
    }
}

/// Up to three windows for one open day: before customer hours, an extended
/// lunch, and after customer hours.
fn day_windows(day: &DaySchedule, profile: &OrganizationScheduleProfile) -> Vec<AvailableWindow> {
    let open = day.hours.start_minutes();
    let close = day.hours.end_minutes();
    let customers = profile.customer_hours;
    let mut windows = Vec::with_capacity(3);

    if open < customers.start_minutes() {
        if let Ok(range) = TimeRange::new(open, customers.start_minutes().min(close)) {
            windows.push(AvailableWindow {
                day: day.day,
                range,
                score: BEFORE_HOURS_SCORE,
                reason: "before hours",
            });
        }
    }

    let lunch = profile.lunch_break;
    if lunch.duration_minutes() > MIN_LUNCH_WINDOW_MINUTES {
        if let Some(range) = lunch.trimmed(LUNCH_TRIM_MINUTES as u16) {
            windows.push(AvailableWindow {
                day: day.day,
                range,
                score: LUNCH_WINDOW_SCORE,
                reason: "extended lunch",
            });
        }
    }

    if customers.end_minutes() < close {
        if let Ok(range) = TimeRange::new(customers.end_minutes().max(open), close) {
            windows.push(AvailableWindow {
                day: day.day,
                range,
                score: AFTER_HOURS_SCORE,
                reason: "after hours",
            });
        }
    }

    windows
}

fn blocked(window: &AvailableWindow, avoid: &[BusyPeriod]) -> bool {
    avoid
        .iter()
        .any(|b| b.applies_on(window.day) && b.times.overlaps(&window.range))
}
