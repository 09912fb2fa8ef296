//! Events commands: list, add, update and delete dated milestones.

use std::fmt::Display;
use std::io::Write;

use anyhow::{Context, Result};
use chrono::{TimeZone, Utc};
use moment_core::format::format_days_until;
use moment_core::gate::{self, Feature, FREE_EVENT_LIMIT};
use moment_core::{AppState, Event, EventId, EventPatch, NewEvent, TimeEngine};
use moment_db::Database;
use serde::Serialize;

use super::util::{parse_date, progress_bar};

/// An event with its countdown figures, for JSON output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EventView<'a> {
    #[serde(flatten)]
    event: &'a Event,
    days_until: i64,
    progress: f64,
}

/// Lists events, earliest first.
pub fn list<W, Tz>(writer: &mut W, db: &Database, engine: &TimeEngine<Tz>, json: bool) -> Result<()>
where
    W: Write,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let state = db.load_state_or_default()?;
    if json {
        let views: Vec<_> = state
            .events
            .iter()
            .map(|event| {
                let status = engine.event_status(event);
                EventView {
                    event,
                    days_until: status.days_until,
                    progress: status.progress,
                }
            })
            .collect();
        writeln!(writer, "{}", serde_json::to_string_pretty(&views)?)?;
        return Ok(());
    }
    write_events(writer, &state, engine)
}

/// Writes the human-readable events block.
pub fn write_events<W, Tz>(writer: &mut W, state: &AppState, engine: &TimeEngine<Tz>) -> Result<()>
where
    W: Write,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if state.user.is_premium {
        writeln!(writer, "Events ({})", state.events.len())?;
    } else {
        writeln!(
            writer,
            "Events ({}/{FREE_EVENT_LIMIT} free)",
            state.events.len()
        )?;
    }

    if state.events.is_empty() {
        writeln!(writer, "  No events yet.")?;
        return Ok(());
    }

    for event in &state.events {
        let status = engine.event_status(event);
        writeln!(
            writer,
            "  {} - {} - {}",
            event.title,
            engine.format_date(&event.event_date),
            format_days_until(status.days_until)
        )?;
        writeln!(
            writer,
            "    {} {:.1}%  id: {}",
            progress_bar(status.progress),
            status.progress,
            event.id
        )?;
    }
    Ok(())
}

/// Adds an event, enforcing the free event limit.
pub fn add<W: Write, Tz: TimeZone>(
    writer: &mut W,
    db: &mut Database,
    engine: &TimeEngine<Tz>,
    new_event: NewEventArgs,
) -> Result<()> {
    let mut state = db.load_state_or_default()?;
    if !state.can_add_event() {
        anyhow::bail!(Feature::Events.gate_message());
    }

    let now = engine.now();
    let event_date = parse_date(&new_event.date, now)?;
    let id = state.add_event(
        NewEvent {
            title: new_event.title,
            event_date,
            color: new_event.color,
            icon: new_event.icon,
        },
        now.with_timezone(&Utc),
    );
    db.save_state(&state).context("failed to save event")?;

    writeln!(writer, "Added event {id}")?;
    if let Some(remaining) =
        gate::remaining_free_events(state.events.len(), state.user.is_premium)
    {
        writeln!(writer, "{remaining} free event(s) left")?;
    }
    Ok(())
}

/// Raw `events add` arguments.
#[derive(Debug, Clone)]
pub struct NewEventArgs {
    pub title: String,
    pub date: String,
    pub icon: Option<String>,
    pub color: Option<String>,
}

/// Raw `events update` arguments.
#[derive(Debug, Clone, Default)]
pub struct EventPatchArgs {
    pub title: Option<String>,
    pub date: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
}

/// Updates fields of an existing event.
pub fn update<W: Write, Tz: TimeZone>(
    writer: &mut W,
    db: &mut Database,
    engine: &TimeEngine<Tz>,
    id: &str,
    patch: EventPatchArgs,
) -> Result<()> {
    let id = EventId::new(id)?;
    let event_date = patch
        .date
        .as_deref()
        .map(|date| parse_date(date, engine.now()))
        .transpose()?;
    let patch = EventPatch {
        title: patch.title,
        event_date,
        color: patch.color,
        icon: patch.icon,
    };
    if patch.is_empty() {
        anyhow::bail!("Nothing to update. Pass --title, --date, --icon or --color.");
    }

    let mut state = db.load_state_or_default()?;
    if !state.update_event(&id, patch) {
        anyhow::bail!("No event with ID {id}");
    }
    db.save_state(&state).context("failed to save event")?;
    writeln!(writer, "Updated event {id}")?;
    Ok(())
}

/// Deletes an event.
pub fn delete<W: Write>(writer: &mut W, db: &mut Database, id: &str) -> Result<()> {
    let id = EventId::new(id)?;
    let mut state = db.load_state_or_default()?;
    if !state.delete_event(&id) {
        anyhow::bail!("No event with ID {id}");
    }
    db.save_state(&state).context("failed to save state")?;
    writeln!(writer, "Deleted event {id}")?;
    Ok(())
}
