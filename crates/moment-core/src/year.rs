//! Progress through a calendar year.
//!
//! Only the current year has progress. Any other year, past or future,
//! reports zero days passed: the year grid only ever shows "so far this year".

use chrono::{DateTime, Datelike, TimeZone};
use serde::Serialize;

use crate::calendar::{day_of_year, days_in_year};

fn target_year<Tz: TimeZone>(year: Option<i32>, now: &DateTime<Tz>) -> i32 {
    year.unwrap_or_else(|| now.year())
}

/// Days passed in `year` (defaults to the current year) as of `now`.
pub fn days_passed_in_year<Tz: TimeZone>(year: Option<i32>, now: &DateTime<Tz>) -> u32 {
    if target_year(year, now) == now.year() {
        day_of_year(now)
    } else {
        0
    }
}

/// Days left in `year` as of `now`, never negative.
pub fn days_remaining_in_year<Tz: TimeZone>(year: Option<i32>, now: &DateTime<Tz>) -> u32 {
    let total = days_in_year(target_year(year, now));
    total.saturating_sub(days_passed_in_year(year, now))
}

/// Percentage of `year` elapsed as of `now`.
pub fn year_progress_percentage<Tz: TimeZone>(year: Option<i32>, now: &DateTime<Tz>) -> f64 {
    let total = days_in_year(target_year(year, now));
    100.0 * f64::from(days_passed_in_year(year, now)) / f64::from(total)
}

/// Every year-progress figure for one year, from a single `now`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearProgress {
    pub year: i32,
    pub days_in_year: u32,
    pub days_passed: u32,
    pub days_remaining: u32,
    pub percentage: f64,
}

/// Computes the progress of `year` (defaults to the current year).
pub fn calculate_year_progress<Tz: TimeZone>(year: Option<i32>, now: &DateTime<Tz>) -> YearProgress {
    YearProgress {
        year: target_year(year, now),
        days_in_year: days_in_year(target_year(year, now)),
        days_passed: days_passed_in_year(year, now),
        days_remaining: days_remaining_in_year(year, now),
        percentage: year_progress_percentage(year, now),
    }
}
