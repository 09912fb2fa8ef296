//! User-defined dated milestones.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar;
use crate::progress;
use crate::types::EventId;

/// A dated milestone tracked with a countdown and a progress bar.
///
/// `event_date` may lie in the past; such events show as "N days ago" with
/// full progress. `created_at` is when the event was registered and is the
/// start of its progress range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub event_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Calendar days from `now` until the event, in `now`'s time zone.
    pub fn days_until<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> i64 {
        let event_date = self.event_date.with_timezone(&now.timezone());
        calendar::days_until(&event_date, now)
    }

    /// Progress from registration to the event date, in \[0, 100\].
    pub fn progress<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> f64 {
        progress::event_progress(&self.created_at, &self.event_date, &now.with_timezone(&Utc))
    }

    /// Whether the event date has already passed as of `now`.
    pub fn is_past<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> bool {
        self.days_until(now) < 0
    }
}

/// The user-supplied fields of an event about to be added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub title: String,
    pub event_date: DateTime<Utc>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

/// A partial update to an existing event; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventPatch {
    pub title: Option<String>,
    pub event_date: Option<DateTime<Utc>>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

impl EventPatch {
    /// Returns true when the patch would change nothing.
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.event_date.is_none()
            && self.color.is_none()
            && self.icon.is_none()
    }

    /// Applies the patch in place.
    pub fn apply(self, event: &mut Event) {
        if let Some(title) = self.title {
            event.title = title;
        }
        if let Some(event_date) = self.event_date {
            event.event_date = event_date;
        }
        if let Some(color) = self.color {
            event.color = Some(color);
        }
        if let Some(icon) = self.icon {
            event.icon = Some(icon);
        }
    }
}
