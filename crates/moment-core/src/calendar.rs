//! Calendar primitives: leap years, day-of-year and day differences.
//!
//! Every function here works on calendar dates. Time of day is discarded
//! before any arithmetic so that daylight-saving shifts (23 or 25 hour days)
//! can never produce an off-by-one count.

use chrono::{DateTime, Datelike, TimeZone};

/// Days in a week.
pub const DAYS_PER_WEEK: i64 = 7;

/// Milliseconds in a (nominal, 24 hour) day.
pub const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Milliseconds in a (nominal) week.
pub const MS_PER_WEEK: i64 = MS_PER_DAY * DAYS_PER_WEEK;

/// Gregorian leap year rule.
pub const fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in the given year (365 or 366).
pub const fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) { 366 } else { 365 }
}

/// 1-based ordinal day of the instant's calendar year.
///
/// The instant is decomposed in its own time zone; the time of day is ignored.
pub fn day_of_year<Tz: TimeZone>(instant: &DateTime<Tz>) -> u32 {
    instant.ordinal()
}

/// Signed number of calendar days from `from` to `to`.
///
/// Both instants are normalized to midnight of their local calendar date
/// first, so comparing at noon or at midnight yields the same count.
/// Antisymmetric: `days_between(a, b) == -days_between(b, a)`.
pub fn days_between<Tz: TimeZone>(from: &DateTime<Tz>, to: &DateTime<Tz>) -> i64 {
    to.date_naive()
        .signed_duration_since(from.date_naive())
        .num_days()
}

/// Days from `now` until `target`: positive in the future, negative in the
/// past, zero for today.
pub fn days_until<Tz: TimeZone>(target: &DateTime<Tz>, now: &DateTime<Tz>) -> i64 {
    days_between(now, target)
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{Duration, FixedOffset, Utc};

    fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn offset(hours: i32, y: i32, m: u32, d: u32, h: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(hours * 3600)
            .unwrap()
            .with_ymd_and_hms(y, m, d, h, 0, 0)
            .unwrap()
    }

    #[test]
    fn leap_years_follow_gregorian_rule() {
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
        assert!(!is_leap_year(2100));
    }

    #[test]
    fn days_in_year_matches_leap_rule() {
        assert_eq!(days_in_year(2024), 366);
        assert_eq!(days_in_year(2023), 365);
        assert_eq!(days_in_year(2000), 366);
        assert_eq!(days_in_year(1900), 365);
    }

    #[test]
    fn week_constant_is_seven_days() {
        assert_eq!(MS_PER_WEEK, 604_800_000);
    }

    // ========== day_of_year ==========

    #[test]
    fn first_of_january_is_day_one() {
        for year in [1900, 1999, 2000, 2023, 2024] {
            assert_eq!(day_of_year(&utc(year, 1, 1, 0)), 1);
            assert_eq!(day_of_year(&utc(year, 1, 1, 23)), 1);
        }
    }

    #[test]
    fn last_day_of_year_matches_year_length() {
        assert_eq!(day_of_year(&utc(2024, 12, 31, 12)), 366);
        assert_eq!(day_of_year(&utc(2023, 12, 31, 12)), 365);
    }

    #[test]
    fn day_of_year_counts_leap_day() {
        assert_eq!(day_of_year(&utc(2024, 3, 1, 0)), 61);
        assert_eq!(day_of_year(&utc(2023, 3, 1, 0)), 60);
    }

    #[test]
    fn day_of_year_uses_local_calendar_date() {
        // 23:00 on Dec 31 at UTC-5 is already Jan 1 in UTC.
        let late = offset(-5, 2024, 12, 31, 23);
        assert_eq!(day_of_year(&late), 366);
        assert_eq!(day_of_year(&late.with_timezone(&Utc)), 1);
    }

    #[test]
    fn day_of_year_unaffected_by_dst_offset_change() {
        // Same calendar date observed before and after a spring-forward shift.
        let before = offset(-5, 2024, 3, 10, 1);
        let after = offset(-4, 2024, 3, 10, 3);
        assert_eq!(day_of_year(&before), day_of_year(&after));
        assert_eq!(day_of_year(&after), 70);
    }

    // ========== days_between ==========

    #[test]
    fn days_between_is_antisymmetric() {
        let dates = [
            utc(2020, 2, 29, 0),
            utc(2023, 1, 1, 13),
            utc(2024, 6, 15, 23),
            utc(2024, 12, 31, 6),
        ];
        for a in &dates {
            for b in &dates {
                assert_eq!(days_between(a, b), -days_between(b, a));
            }
        }
    }

    #[test]
    fn days_between_ignores_time_of_day() {
        let midnight = days_between(&utc(2024, 1, 1, 0), &utc(2024, 1, 11, 0));
        let noon = days_between(&utc(2024, 1, 1, 12), &utc(2024, 1, 11, 12));
        let mixed = days_between(&utc(2024, 1, 1, 23), &utc(2024, 1, 11, 1));
        assert_eq!(midnight, 10);
        assert_eq!(noon, 10);
        assert_eq!(mixed, 10);
    }

    #[test]
    fn days_between_across_short_dst_day() {
        // Midnight to midnight across a 23 hour day is still one day.
        let a = offset(-5, 2024, 3, 10, 0);
        let b = offset(-4, 2024, 3, 11, 0);
        assert_eq!((b - a).num_hours(), 23);
        assert_eq!(days_between(&a, &b), 1);
        assert_eq!(days_between(&b, &a), -1);
    }

    #[test]
    fn days_between_across_long_dst_day() {
        // Midnight to midnight across a 25 hour day is still one day.
        let a = offset(-4, 2024, 11, 3, 0);
        let b = offset(-5, 2024, 11, 4, 0);
        assert_eq!((b - a).num_hours(), 25);
        assert_eq!(days_between(&a, &b), 1);
    }

    #[test]
    fn days_between_spans_leap_day() {
        assert_eq!(days_between(&utc(2024, 2, 28, 0), &utc(2024, 3, 1, 0)), 2);
        assert_eq!(days_between(&utc(2023, 2, 28, 0), &utc(2023, 3, 1, 0)), 1);
    }

    // ========== days_until ==========

    #[test]
    fn days_until_today_tomorrow_yesterday() {
        let now = utc(2025, 5, 20, 15);
        assert_eq!(days_until(&now, &now), 0);
        assert_eq!(days_until(&(now + Duration::days(1)), &now), 1);
        assert_eq!(days_until(&(now - Duration::days(1)), &now), -1);
    }

    #[test]
    fn days_until_later_today_is_zero() {
        let now = utc(2025, 5, 20, 1);
        assert_eq!(days_until(&utc(2025, 5, 20, 23), &now), 0);
    }
}
