//! Progress through a lifespan, on two different unit bases.
//!
//! Weeks are elapsed real time: milliseconds since birth divided by a
//! 7-day week, against a total of `years * 52.1775` weeks. Months are
//! calendar fields: the difference in year and month numbers, ignoring the
//! day of month, against a total of `years * 12`. The two bases can
//! disagree slightly about how much of a life has passed; both are kept as
//! they are because the grids built on them are expected to match.

use std::fmt;

use chrono::{DateTime, Datelike, TimeZone};
use serde::{Deserialize, Serialize};

use crate::calendar::MS_PER_WEEK;

/// Mean Gregorian weeks per year (365.2425 / 7, rounded).
pub const WEEKS_PER_YEAR: f64 = 52.1775;

/// Calendar months per year.
pub const MONTHS_PER_YEAR: i64 = 12;

/// Life expectancy used when the user has not customized it.
pub const DEFAULT_LIFE_EXPECTANCY_YEARS: u32 = 90;

/// Assumed total lifespan, in whole years.
///
/// Zero is representable. Every computation on a zero expectancy is
/// clamped rather than dividing by zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LifeExpectancy(u32);

impl LifeExpectancy {
    /// Creates a life expectancy of `years`.
    pub const fn new(years: u32) -> Self {
        Self(years)
    }

    /// Returns the expectancy in years.
    pub const fn years(self) -> u32 {
        self.0
    }
}

impl Default for LifeExpectancy {
    fn default() -> Self {
        Self(DEFAULT_LIFE_EXPECTANCY_YEARS)
    }
}

impl fmt::Display for LifeExpectancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} years", self.0)
    }
}

impl From<u32> for LifeExpectancy {
    fn from(years: u32) -> Self {
        Self(years)
    }
}

/// Total weeks in a life of the given expectancy.
#[allow(clippy::cast_possible_truncation)]
pub fn total_weeks_in_life(expectancy: LifeExpectancy) -> i64 {
    (f64::from(expectancy.years()) * WEEKS_PER_YEAR).floor() as i64
}

/// Total calendar months in a life of the given expectancy.
pub fn total_months_in_life(expectancy: LifeExpectancy) -> i64 {
    i64::from(expectancy.years()) * MONTHS_PER_YEAR
}

/// Whole weeks of elapsed time between `birthdate` and `now`.
///
/// Negative when the birthdate lies in the future.
pub fn weeks_lived<Tz: TimeZone>(birthdate: &DateTime<Tz>, now: &DateTime<Tz>) -> i64 {
    let elapsed_ms = now.timestamp_millis() - birthdate.timestamp_millis();
    elapsed_ms.div_euclid(MS_PER_WEEK)
}

/// Weeks left until the expectancy is reached, never negative.
pub fn weeks_remaining<Tz: TimeZone>(
    birthdate: &DateTime<Tz>,
    expectancy: LifeExpectancy,
    now: &DateTime<Tz>,
) -> i64 {
    (total_weeks_in_life(expectancy) - weeks_lived(birthdate, now)).max(0)
}

/// Percentage of life lived on the weeks basis, in \[0, 100\].
pub fn life_percentage<Tz: TimeZone>(
    birthdate: &DateTime<Tz>,
    expectancy: LifeExpectancy,
    now: &DateTime<Tz>,
) -> f64 {
    clamped_percentage(weeks_lived(birthdate, now), total_weeks_in_life(expectancy))
}

/// Months lived by calendar fields: `(years * 12) + month difference`.
///
/// The day of month is ignored, so the count ticks over on the first of
/// each month rather than on the monthly birthday. Both instants should be
/// in the same time zone.
pub fn months_lived<Tz: TimeZone>(birthdate: &DateTime<Tz>, now: &DateTime<Tz>) -> i64 {
    let years = i64::from(now.year() - birthdate.year());
    let months = i64::from(now.month0()) - i64::from(birthdate.month0());
    years * MONTHS_PER_YEAR + months
}

/// Months left until the expectancy is reached, never negative.
pub fn months_remaining<Tz: TimeZone>(
    birthdate: &DateTime<Tz>,
    expectancy: LifeExpectancy,
    now: &DateTime<Tz>,
) -> i64 {
    (total_months_in_life(expectancy) - months_lived(birthdate, now)).max(0)
}

/// Percentage of life lived on the months basis, in \[0, 100\].
pub fn life_percentage_months<Tz: TimeZone>(
    birthdate: &DateTime<Tz>,
    expectancy: LifeExpectancy,
    now: &DateTime<Tz>,
) -> f64 {
    clamped_percentage(months_lived(birthdate, now), total_months_in_life(expectancy))
}

/// `100 * lived / total` clamped to \[0, 100\]. A zero total counts as complete.
#[allow(clippy::cast_precision_loss)]
fn clamped_percentage(lived: i64, total: i64) -> f64 {
    if total <= 0 {
        return 100.0;
    }
    (100.0 * lived as f64 / total as f64).clamp(0.0, 100.0)
}

/// Lived/remaining figures for one unit basis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UnitProgress {
    pub total: i64,
    pub lived: i64,
    pub remaining: i64,
    pub percentage: f64,
}

/// Life progress on both the weeks and months bases.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LifeProgress {
    pub expectancy: LifeExpectancy,
    pub weeks: UnitProgress,
    pub months: UnitProgress,
}

/// Computes every life-progress figure from a single `now`.
pub fn calculate_life_progress<Tz: TimeZone>(
    birthdate: &DateTime<Tz>,
    expectancy: LifeExpectancy,
    now: &DateTime<Tz>,
) -> LifeProgress {
    LifeProgress {
        expectancy,
        weeks: UnitProgress {
            total: total_weeks_in_life(expectancy),
            lived: weeks_lived(birthdate, now),
            remaining: weeks_remaining(birthdate, expectancy, now),
            percentage: life_percentage(birthdate, expectancy, now),
        },
        months: UnitProgress {
            total: total_months_in_life(expectancy),
            lived: months_lived(birthdate, now),
            remaining: months_remaining(birthdate, expectancy, now),
            percentage: life_percentage_months(birthdate, expectancy, now),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{Duration, Utc};

    use crate::calendar::MS_PER_DAY;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn totals_use_mean_gregorian_weeks() {
        assert_eq!(total_weeks_in_life(LifeExpectancy::default()), 4695);
        assert_eq!(total_weeks_in_life(LifeExpectancy::new(1)), 52);
        assert_eq!(total_weeks_in_life(LifeExpectancy::new(0)), 0);
        assert_eq!(total_months_in_life(LifeExpectancy::default()), 1080);
        assert_eq!(total_months_in_life(LifeExpectancy::new(0)), 0);
    }

    #[test]
    fn default_expectancy_is_ninety_years() {
        assert_eq!(LifeExpectancy::default().years(), 90);
        assert_eq!(LifeExpectancy::default().to_string(), "90 years");
    }

    #[test]
    fn weeks_lived_uses_elapsed_time() {
        let now = at(2025, 3, 1);
        // 365.25 days is 52.18 weeks.
        let birthdate = now - Duration::milliseconds(36_525 * MS_PER_DAY / 100);
        assert_eq!(weeks_lived(&birthdate, &now), 52);
        assert_eq!(weeks_lived(&now, &now), 0);
        assert_eq!(weeks_lived(&(now - Duration::days(6)), &now), 0);
        assert_eq!(weeks_lived(&(now - Duration::days(7)), &now), 1);
    }

    #[test]
    fn weeks_lived_is_negative_for_future_birthdate() {
        let now = at(2025, 3, 1);
        assert_eq!(weeks_lived(&(now + Duration::days(1)), &now), -1);
    }

    #[test]
    #[expect(clippy::float_cmp, reason = "clamped values are exact")]
    fn life_percentage_is_clamped_to_hundred() {
        let now = at(2025, 3, 1);
        let birthdate = at(1900, 1, 1);
        assert!(weeks_lived(&birthdate, &now) > total_weeks_in_life(LifeExpectancy::default()));
        assert_eq!(life_percentage(&birthdate, LifeExpectancy::default(), &now), 100.0);
        assert_eq!(
            life_percentage_months(&birthdate, LifeExpectancy::default(), &now),
            100.0
        );
        assert_eq!(weeks_remaining(&birthdate, LifeExpectancy::default(), &now), 0);
        assert_eq!(months_remaining(&birthdate, LifeExpectancy::default(), &now), 0);
    }

    #[test]
    #[expect(clippy::float_cmp, reason = "clamped values are exact")]
    fn future_birthdate_reports_zero_percent() {
        let now = at(2025, 3, 1);
        let birthdate = at(2026, 3, 1);
        assert_eq!(life_percentage(&birthdate, LifeExpectancy::default(), &now), 0.0);
    }

    #[test]
    #[expect(clippy::float_cmp, reason = "clamped values are exact")]
    fn zero_expectancy_never_divides_by_zero() {
        let now = at(2025, 3, 1);
        let birthdate = at(2000, 1, 1);
        let zero = LifeExpectancy::new(0);
        assert_eq!(life_percentage(&birthdate, zero, &now), 100.0);
        assert_eq!(life_percentage_months(&birthdate, zero, &now), 100.0);
        assert_eq!(weeks_remaining(&birthdate, zero, &now), 0);
    }

    #[test]
    fn months_lived_ignores_day_of_month() {
        let birthdate = at(2000, 6, 15);
        let day_before = months_lived(&birthdate, &at(2025, 6, 14));
        let day_after = months_lived(&birthdate, &at(2025, 6, 16));
        assert_eq!(day_before, 300);
        assert_eq!(day_before, day_after);
    }

    #[test]
    fn months_lived_crosses_year_boundary() {
        let birthdate = at(2000, 11, 30);
        assert_eq!(months_lived(&birthdate, &at(2001, 1, 1)), 2);
        assert_eq!(months_lived(&birthdate, &at(2000, 11, 30)), 0);
    }

    #[test]
    fn ninety_years_and_a_day_is_a_complete_life() {
        let now = at(2025, 3, 1);
        let birthdate = at(1935, 3, 1) - Duration::days(1);
        let progress = calculate_life_progress(&birthdate, LifeExpectancy::default(), &now);
        assert_eq!(progress.weeks.remaining, 0);
        assert!((progress.weeks.percentage - 100.0).abs() < f64::EPSILON);
        assert_eq!(progress.months.remaining, 0);
    }

    #[test]
    fn life_progress_combines_both_bases() {
        let now = at(2025, 3, 1);
        let birthdate = at(1990, 1, 1);
        let progress = calculate_life_progress(&birthdate, LifeExpectancy::default(), &now);

        assert_eq!(progress.weeks.total, 4695);
        assert_eq!(progress.weeks.lived, weeks_lived(&birthdate, &now));
        assert_eq!(progress.weeks.lived + progress.weeks.remaining, 4695);
        assert_eq!(progress.months.lived, 35 * 12 + 2);
        assert_eq!(progress.months.remaining, 1080 - 422);
        assert!(progress.weeks.percentage > 38.0 && progress.weeks.percentage < 40.0);
    }
}
