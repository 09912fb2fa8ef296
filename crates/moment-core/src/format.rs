//! Human-readable date labels.
//!
//! These strings are for display only and are never parsed back.

use std::fmt::Display;

use chrono::{DateTime, TimeZone};

/// Short US-style date, e.g. `Jan 1, 2025`, in the instant's own time zone.
pub fn format_date<Tz>(instant: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    instant.format("%b %-d, %Y").to_string()
}

/// Date range label, e.g. `Jan 1, 2025 → Feb 3, 2025`.
pub fn format_date_range<Tz>(start: &DateTime<Tz>, end: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!("{} → {}", format_date(start), format_date(end))
}

/// Countdown label for a day offset as returned by `days_until`.
pub fn format_days_until(days: i64) -> String {
    match days {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        -1 => "Yesterday".to_string(),
        d if d > 0 => format!("{d} days left"),
        d => format!("{} days ago", d.unsigned_abs()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{FixedOffset, Utc};

    #[test]
    fn formats_short_month_day_year() {
        let date = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(format_date(&date), "Jan 1, 2025");

        let date = Utc.with_ymd_and_hms(1990, 12, 25, 18, 0, 0).unwrap();
        assert_eq!(format_date(&date), "Dec 25, 1990");
    }

    #[test]
    fn formats_in_instant_time_zone() {
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        let date = Utc
            .with_ymd_and_hms(2025, 3, 31, 20, 0, 0)
            .unwrap()
            .with_timezone(&tokyo);
        assert_eq!(format_date(&date), "Apr 1, 2025");
    }

    #[test]
    fn formats_range_with_arrow() {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 2, 3, 0, 0, 0).unwrap();
        assert_eq!(format_date_range(&start, &end), "Jan 1, 2025 → Feb 3, 2025");
    }

    #[test]
    fn countdown_labels() {
        assert_eq!(format_days_until(0), "Today");
        assert_eq!(format_days_until(1), "Tomorrow");
        assert_eq!(format_days_until(-1), "Yesterday");
        assert_eq!(format_days_until(12), "12 days left");
        assert_eq!(format_days_until(-40), "40 days ago");
    }
}
