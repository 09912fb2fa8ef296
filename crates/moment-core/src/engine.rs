//! A single "now" shared by a batch of related computations.
//!
//! Sampling the clock separately for each figure on a screen can straddle a
//! day or week boundary and show numbers that disagree ("days passed" from
//! one today, "days remaining" from the next). [`TimeEngine`] takes one
//! sample and answers every question against it. Instants from other time
//! zones are converted into the engine's zone before they are decomposed
//! into calendar fields.

use std::fmt::Display;

use chrono::{DateTime, Datelike, Local, TimeZone};

use crate::calendar;
use crate::event::Event;
use crate::format;
use crate::life::{self, LifeExpectancy, LifeProgress};
use crate::progress;
use crate::year::{self, YearProgress};

/// Date arithmetic against a fixed reference instant.
#[derive(Debug, Clone)]
pub struct TimeEngine<Tz: TimeZone> {
    now: DateTime<Tz>,
}

impl TimeEngine<Local> {
    /// Samples the system clock once, in the local time zone.
    pub fn local() -> Self {
        Self::at(Local::now())
    }
}

impl<Tz: TimeZone> TimeEngine<Tz> {
    /// Creates an engine whose "now" is `now`.
    pub const fn at(now: DateTime<Tz>) -> Self {
        Self { now }
    }

    /// The reference instant.
    pub const fn now(&self) -> &DateTime<Tz> {
        &self.now
    }

    /// The calendar year containing "now".
    pub fn current_year(&self) -> i32 {
        self.now.year()
    }

    fn localize<Tz2: TimeZone>(&self, instant: &DateTime<Tz2>) -> DateTime<Tz> {
        instant.with_timezone(&self.now.timezone())
    }

    // ========== Calendar ==========

    pub fn day_of_year<Tz2: TimeZone>(&self, instant: &DateTime<Tz2>) -> u32 {
        calendar::day_of_year(&self.localize(instant))
    }

    pub fn days_between<Tz2: TimeZone>(&self, from: &DateTime<Tz2>, to: &DateTime<Tz2>) -> i64 {
        calendar::days_between(&self.localize(from), &self.localize(to))
    }

    pub fn days_until<Tz2: TimeZone>(&self, target: &DateTime<Tz2>) -> i64 {
        calendar::days_until(&self.localize(target), &self.now)
    }

    // ========== Year ==========

    pub fn days_passed_in_year(&self, year: Option<i32>) -> u32 {
        year::days_passed_in_year(year, &self.now)
    }

    pub fn days_remaining_in_year(&self, year: Option<i32>) -> u32 {
        year::days_remaining_in_year(year, &self.now)
    }

    pub fn year_progress_percentage(&self, year: Option<i32>) -> f64 {
        year::year_progress_percentage(year, &self.now)
    }

    pub fn year_progress(&self, year: Option<i32>) -> YearProgress {
        year::calculate_year_progress(year, &self.now)
    }

    // ========== Life ==========

    pub fn weeks_lived<Tz2: TimeZone>(&self, birthdate: &DateTime<Tz2>) -> i64 {
        life::weeks_lived(&self.localize(birthdate), &self.now)
    }

    pub fn weeks_remaining<Tz2: TimeZone>(
        &self,
        birthdate: &DateTime<Tz2>,
        expectancy: LifeExpectancy,
    ) -> i64 {
        life::weeks_remaining(&self.localize(birthdate), expectancy, &self.now)
    }

    pub fn life_percentage<Tz2: TimeZone>(
        &self,
        birthdate: &DateTime<Tz2>,
        expectancy: LifeExpectancy,
    ) -> f64 {
        life::life_percentage(&self.localize(birthdate), expectancy, &self.now)
    }

    pub fn months_lived<Tz2: TimeZone>(&self, birthdate: &DateTime<Tz2>) -> i64 {
        life::months_lived(&self.localize(birthdate), &self.now)
    }

    pub fn months_remaining<Tz2: TimeZone>(
        &self,
        birthdate: &DateTime<Tz2>,
        expectancy: LifeExpectancy,
    ) -> i64 {
        life::months_remaining(&self.localize(birthdate), expectancy, &self.now)
    }

    pub fn life_percentage_months<Tz2: TimeZone>(
        &self,
        birthdate: &DateTime<Tz2>,
        expectancy: LifeExpectancy,
    ) -> f64 {
        life::life_percentage_months(&self.localize(birthdate), expectancy, &self.now)
    }

    pub fn life_progress<Tz2: TimeZone>(
        &self,
        birthdate: &DateTime<Tz2>,
        expectancy: LifeExpectancy,
    ) -> LifeProgress {
        life::calculate_life_progress(&self.localize(birthdate), expectancy, &self.now)
    }

    // ========== Events ==========

    pub fn event_progress<Tz2: TimeZone>(&self, start: &DateTime<Tz2>, end: &DateTime<Tz2>) -> f64 {
        progress::event_progress(&self.localize(start), &self.localize(end), &self.now)
    }

    /// Countdown and progress for one event.
    pub fn event_status(&self, event: &Event) -> EventStatus {
        EventStatus {
            days_until: event.days_until(&self.now),
            progress: event.progress(&self.now),
        }
    }
}

impl<Tz> TimeEngine<Tz>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    /// Formats `instant` as a short date in the engine's time zone.
    pub fn format_date<Tz2: TimeZone>(&self, instant: &DateTime<Tz2>) -> String {
        format::format_date(&self.localize(instant))
    }
}

/// Derived countdown figures for a single event.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct EventStatus {
    pub days_until: i64,
    pub progress: f64,
}
