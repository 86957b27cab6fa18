//! Calendar helpers for local wall-clock arithmetic.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};

/// Full English name of a weekday.
pub fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

pub fn is_weekend(day: Weekday) -> bool {
    matches!(day, Weekday::Sat | Weekday::Sun)
}

/// `date` at `hour:00:00`. Hours past 23 roll into the following days.
pub fn at_hour(date: NaiveDate, hour: u32) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN) + Duration::hours(i64::from(hour))
}

/// Truncate to the start of the hour.
pub fn floor_hour(at: NaiveDateTime) -> NaiveDateTime {
    at_hour(at.date(), at.hour())
}

/// Move Saturday and Sunday forward to the following Monday, keeping the time of day.
pub fn shift_off_weekend(at: NaiveDateTime) -> NaiveDateTime {
    match at.weekday() {
        Weekday::Sat => at + Duration::days(2),
        Weekday::Sun => at + Duration::days(1),
        _ => at,
    }
}

/// The first weekday strictly after `date`.
pub fn next_business_day(date: NaiveDate) -> NaiveDate {
    let mut next = date + Duration::days(1);
    while is_weekend(next.weekday()) {
        next += Duration::days(1);
    }
    next
}

/// The first date on or after `from` falling on `day`.
pub fn next_occurrence(from: NaiveDate, day: Weekday) -> NaiveDate {
    let target = i64::from(day.num_days_from_monday());
    let current = i64::from(from.weekday().num_days_from_monday());
    let ahead = (7 + target - current) % 7;
    from + Duration::days(ahead)
}

/// Fractional hours from `from` to `to`; negative when `to` is earlier.
pub fn hours_between(from: NaiveDateTime, to: NaiveDateTime) -> f64 {
    (to - from).num_seconds() as f64 / 3600.0
}
