//! Application state: the user profile, events and onboarding flag.
//!
//! Transitions here are pure; persisting the result is the caller's job.
//!
//! # Persisted Format
//!
//! State is stored as one camelCase JSON document with ISO 8601 dates.
//! Decoding is lenient: an unreadable birthdate becomes "not set", an event
//! with an unreadable `eventDate` or `createdAt` (or an empty id) is dropped,
//! and any other missing or mistyped field falls back to its default.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::event::{Event, EventPatch, NewEvent};
use crate::gate;
use crate::types::{EventId, Theme};

/// Key under which the serialized state is stored.
pub const STORAGE_KEY_APP_STATE: &str = "@moment_app_state";

/// Errors decoding a persisted state document.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The document is not JSON.
    #[error("state is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The document is JSON but not an object.
    #[error("state must be a JSON object")]
    NotAnObject,
}

/// The user's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthdate: Option<DateTime<Utc>>,
    pub theme: Theme,
    pub is_guest: bool,
    pub is_premium: bool,
}

impl Default for User {
    fn default() -> Self {
        Self {
            id: None,
            birthdate: None,
            theme: Theme::default(),
            is_guest: true,
            is_premium: false,
        }
    }
}

/// Everything the app persists.
///
/// `events` is kept sorted by `event_date`, earliest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub user: User,
    pub events: Vec<Event>,
    pub has_completed_onboarding: bool,
}

impl AppState {
    pub fn set_birthdate(&mut self, birthdate: DateTime<Utc>) {
        tracing::debug!(%birthdate, "setting birthdate");
        self.user.birthdate = Some(birthdate);
    }

    pub fn set_theme(&mut self, theme: Theme) {
        tracing::debug!(%theme, "setting theme");
        self.user.theme = theme;
    }

    pub fn set_premium(&mut self, is_premium: bool) {
        tracing::debug!(is_premium, "setting premium flag");
        self.user.is_premium = is_premium;
    }

    pub fn complete_onboarding(&mut self) {
        self.has_completed_onboarding = true;
    }

    /// Restores the default state.
    pub fn reset(&mut self) {
        tracing::debug!("resetting state");
        *self = Self::default();
    }

    /// Whether the feature gate allows adding another event.
    pub fn can_add_event(&self) -> bool {
        gate::can_create_more_events(self.events.len(), self.user.is_premium)
    }

    /// Registers a new event created at `now` and returns its ID.
    ///
    /// The feature gate is not consulted; check [`Self::can_add_event`] first.
    pub fn add_event(&mut self, new_event: NewEvent, now: DateTime<Utc>) -> EventId {
        let id = EventId::generate();
        tracing::debug!(%id, title = %new_event.title, "adding event");
        self.events.push(Event {
            id: id.clone(),
            title: new_event.title,
            event_date: new_event.event_date,
            color: new_event.color,
            icon: new_event.icon,
            created_at: now,
        });
        self.sort_events();
        id
    }

    /// Removes an event. Returns false if no event has that ID.
    pub fn delete_event(&mut self, id: &EventId) -> bool {
        let before = self.events.len();
        self.events.retain(|event| &event.id != id);
        let removed = self.events.len() != before;
        tracing::debug!(%id, removed, "deleting event");
        removed
    }

    /// Applies `patch` to an event. Returns false if no event has that ID.
    pub fn update_event(&mut self, id: &EventId, patch: EventPatch) -> bool {
        let Some(event) = self.events.iter_mut().find(|event| &event.id == id) else {
            return false;
        };
        let date_changed = patch.event_date.is_some();
        patch.apply(event);
        if date_changed {
            self.sort_events();
        }
        tracing::debug!(%id, "updated event");
        true
    }

    /// Looks up an event by ID.
    pub fn event(&self, id: &EventId) -> Option<&Event> {
        self.events.iter().find(|event| &event.id == id)
    }

    fn sort_events(&mut self) {
        self.events.sort_by_key(|event| event.event_date);
    }

    /// Serializes the state in the persisted format.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Decodes a persisted state document, sanitizing bad records.
    pub fn from_json(json: &str) -> Result<Self, DecodeError> {
        let value: Value = serde_json::from_str(json)?;
        let root = value.as_object().ok_or(DecodeError::NotAnObject)?;

        let user = root
            .get("user")
            .and_then(Value::as_object)
            .map(decode_user)
            .unwrap_or_default();

        let mut events: Vec<Event> = match root.get("events") {
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .filter_map(|(index, item)| {
                    let event = item.as_object().and_then(decode_event);
                    if event.is_none() {
                        tracing::warn!(index, "dropping persisted event with invalid fields");
                    }
                    event
                })
                .collect(),
            _ => Vec::new(),
        };
        events.sort_by_key(|event| event.event_date);

        let has_completed_onboarding = root
            .get("hasCompletedOnboarding")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        Ok(Self {
            user,
            events,
            has_completed_onboarding,
        })
    }
}

fn decode_user(user: &Map<String, Value>) -> User {
    let defaults = User::default();
    let birthdate = match user.get("birthdate") {
        None | Some(Value::Null) => None,
        Some(value) => {
            let parsed = value.as_str().and_then(parse_persisted_instant);
            if parsed.is_none() {
                tracing::warn!("discarding unreadable persisted birthdate");
            }
            parsed
        }
    };
    User {
        id: user.get("id").and_then(Value::as_str).map(str::to_string),
        birthdate,
        theme: user
            .get("theme")
            .and_then(Value::as_str)
            .and_then(|theme| theme.parse().ok())
            .unwrap_or(defaults.theme),
        is_guest: user
            .get("isGuest")
            .and_then(Value::as_bool)
            .unwrap_or(defaults.is_guest),
        is_premium: user
            .get("isPremium")
            .and_then(Value::as_bool)
            .unwrap_or(defaults.is_premium),
    }
}

fn decode_event(event: &Map<String, Value>) -> Option<Event> {
    let id = match event.get("id")? {
        Value::String(id) => id.clone(),
        Value::Number(id) => id.to_string(),
        _ => return None,
    };
    let optional_string = |key: &str| event.get(key).and_then(Value::as_str).map(str::to_string);

    Some(Event {
        id: EventId::new(id).ok()?,
        title: optional_string("title").unwrap_or_default(),
        event_date: event
            .get("eventDate")
            .and_then(Value::as_str)
            .and_then(parse_persisted_instant)?,
        color: optional_string("color"),
        icon: optional_string("icon"),
        created_at: event
            .get("createdAt")
            .and_then(Value::as_str)
            .and_then(parse_persisted_instant)?,
    })
}

/// Parses an ISO 8601 instant as stored in persisted state.
///
/// Accepts RFC 3339 with any offset, a date-time without offset, or a bare
/// `YYYY-MM-DD`; the last two are read as UTC.
pub fn parse_persisted_instant(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
