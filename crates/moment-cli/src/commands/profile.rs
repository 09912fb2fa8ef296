//! Profile commands: birthdate, theme, premium flag and reset.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::TimeZone;
use moment_core::gate::{self, Feature};
use moment_core::{Theme, TimeEngine};
use moment_db::Database;

use super::util::parse_date;

/// Sets the birthdate and marks onboarding complete.
pub fn set_birthdate<W: Write, Tz: TimeZone>(
    writer: &mut W,
    db: &mut Database,
    engine: &TimeEngine<Tz>,
    date: &str,
) -> Result<()> {
    let birthdate = parse_date(date, engine.now())?;
    if engine.days_until(&birthdate) > 0 {
        anyhow::bail!("Birthdate cannot be in the future: {date}");
    }

    let mut state = db.load_state_or_default()?;
    state.set_birthdate(birthdate);
    state.complete_onboarding();
    db.save_state(&state).context("failed to save birthdate")?;

    writeln!(writer, "Birthdate set to {}", birthdate.format("%Y-%m-%d"))?;
    Ok(())
}

/// Selects a color theme, enforcing the premium gate.
pub fn set_theme<W: Write>(writer: &mut W, db: &mut Database, name: &str) -> Result<()> {
    let theme: Theme = name.parse().with_context(|| {
        let names: Vec<_> = Theme::ALL.iter().map(Theme::as_str).collect();
        format!("available themes: {}", names.join(", "))
    })?;

    let mut state = db.load_state_or_default()?;
    if !gate::can_access_theme(theme, state.user.is_premium) {
        anyhow::bail!(Feature::Themes.gate_message());
    }
    state.set_theme(theme);
    db.save_state(&state).context("failed to save theme")?;

    writeln!(writer, "Theme set to {theme}")?;
    Ok(())
}

/// Records whether premium is unlocked.
pub fn set_premium<W: Write>(writer: &mut W, db: &mut Database, is_premium: bool) -> Result<()> {
    let mut state = db.load_state_or_default()?;
    state.set_premium(is_premium);
    db.save_state(&state).context("failed to save premium flag")?;

    if is_premium {
        writeln!(writer, "Premium unlocked")?;
    } else {
        writeln!(writer, "Premium disabled")?;
    }
    Ok(())
}

/// Deletes all stored state.
pub fn reset<W: Write>(writer: &mut W, db: &mut Database) -> Result<()> {
    if db.clear_state()? {
        writeln!(writer, "All data cleared")?;
    } else {
        writeln!(writer, "Nothing to clear")?;
    }
    Ok(())
}
