//! Shared utilities for CLI commands.

use std::sync::LazyLock;

use anyhow::Context;
use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use regex::Regex;

/// Pre-compiled regex for relative date parsing.
static RELATIVE_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:in\s+(\d+)\s+(day|week|year)s?|(\d+)\s+(day|week|year)s?\s+ago)$").unwrap()
});

/// Conservative bound for relative dates (~1000 years in days).
const MAX_RELATIVE_DAYS: i64 = 1000 * 366;

/// Parse a date argument relative to `now`.
///
/// Supports:
/// - Calendar date: "2026-01-15" (midnight in `now`'s time zone)
/// - RFC 3339: "2026-01-15T10:30:00Z"
/// - Named days: "today", "tomorrow", "yesterday"
/// - Relative: "in 10 days", "3 weeks ago", "30 years ago"
pub fn parse_date<Tz: TimeZone>(s: &str, now: &DateTime<Tz>) -> anyhow::Result<DateTime<Utc>> {
    let s = s.trim();
    let tz = now.timezone();

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(local_midnight_to_utc(date, &tz));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    let today = now.date_naive();
    match s.to_ascii_lowercase().as_str() {
        "today" => return Ok(local_midnight_to_utc(today, &tz)),
        "tomorrow" => return Ok(local_midnight_to_utc(today + Duration::days(1), &tz)),
        "yesterday" => return Ok(local_midnight_to_utc(today - Duration::days(1), &tz)),
        _ => {}
    }

    let Some(caps) = RELATIVE_DATE_RE.captures(s) else {
        anyhow::bail!(
            "Invalid date: {s}. Use YYYY-MM-DD (e.g., 2026-01-15), RFC 3339, or relative (e.g., 'in 10 days', '2 weeks ago')"
        );
    };

    let (future, count, unit) = match (caps.get(1), caps.get(3)) {
        (Some(count), _) => (true, count.as_str(), &caps[2]),
        (None, Some(count)) => (false, count.as_str(), &caps[4]),
        (None, None) => anyhow::bail!("Invalid relative date: {s}"),
    };

    let n: i64 = count
        .parse()
        .context("failed to parse number in relative date")?;

    let days_per_unit = match unit {
        "day" => 1,
        "week" => 7,
        "year" => 365,
        unit => anyhow::bail!("Unknown date unit: {unit}"),
    };

    if n > MAX_RELATIVE_DAYS / days_per_unit {
        anyhow::bail!("Relative date too far away: {n} {unit}");
    }

    // Safe to create Duration now that we've validated the range
    let offset = Duration::days(n * days_per_unit);
    let now = now.with_timezone(&Utc);
    Ok(if future { now + offset } else { now - offset })
}

/// Converts a local date at midnight to UTC.
/// Handles DST ambiguity by picking the earlier time.
fn local_midnight_to_utc<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    match tz.from_local_datetime(&midnight) {
        // Single or ambiguous (DST fall-back): use the earlier time
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.with_timezone(&Utc),
        LocalResult::None => {
            // DST spring-forward gap at midnight: the day starts an hour later
            let one_am = midnight + Duration::hours(1);
            tz.from_local_datetime(&one_am)
                .earliest()
                .map_or_else(|| midnight.and_utc(), |dt| dt.with_timezone(&Utc))
        }
    }
}

/// Generates a 10-character progress bar for a percentage.
/// Values below 5% but above zero get a single block for visibility.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn progress_bar(percentage: f64) -> String {
    let ratio = (percentage / 100.0).clamp(0.0, 1.0);
    let filled = if ratio < 0.05 && ratio > 0.0 {
        1
    } else {
        (ratio * 10.0).round() as usize
    };

    let empty = 10 - filled;
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}
