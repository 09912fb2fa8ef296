//! Life command: life progress in weeks and months.

use std::io::Write;

use anyhow::Result;
use chrono::TimeZone;
use moment_core::gate::{self, Feature};
use moment_core::{LifeExpectancy, LifeProgress, TimeEngine, UnitProgress};
use moment_db::Database;

use super::util::progress_bar;

pub fn run<W: Write, Tz: TimeZone>(
    writer: &mut W,
    db: &Database,
    engine: &TimeEngine<Tz>,
    expectancy: LifeExpectancy,
    json: bool,
) -> Result<()> {
    let state = db.load_state_or_default()?;
    if expectancy != LifeExpectancy::default()
        && !gate::can_customize_life_expectancy(state.user.is_premium)
    {
        anyhow::bail!(Feature::Lifespan.gate_message());
    }
    let Some(birthdate) = state.user.birthdate else {
        anyhow::bail!("No birthdate set. Run `moment birthdate YYYY-MM-DD` first.");
    };

    let progress = engine.life_progress(&birthdate, expectancy);
    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&progress)?)?;
        return Ok(());
    }
    write_life(writer, &progress)
}

/// Writes the human-readable life block.
pub fn write_life<W: Write>(writer: &mut W, progress: &LifeProgress) -> Result<()> {
    writeln!(writer, "Life ({})", progress.expectancy)?;
    write_unit(writer, "Weeks", &progress.weeks)?;
    write_unit(writer, "Months", &progress.months)?;
    Ok(())
}

fn write_unit<W: Write>(writer: &mut W, label: &str, unit: &UnitProgress) -> Result<()> {
    writeln!(
        writer,
        "  {label:<7} {} {:.1}%  {} lived, {} remaining of {}",
        progress_bar(unit.percentage),
        unit.percentage,
        unit.lived,
        unit.remaining,
        unit.total
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Utc;
    use insta::assert_snapshot;
    use moment_core::AppState;

    fn engine() -> TimeEngine<Utc> {
        TimeEngine::at(Utc.with_ymd_and_hms(2025, 6, 14, 10, 0, 0).unwrap())
    }

    fn db_with_birthdate() -> Database {
        let mut db = Database::open_in_memory().unwrap();
        let mut state = AppState::default();
        state.set_birthdate(Utc.with_ymd_and_hms(1990, 1, 1, 0, 0, 0).unwrap());
        db.save_state(&state).unwrap();
        db
    }

    #[test]
    fn life_command_outputs_both_bases() {
        let db = db_with_birthdate();
        let mut output = Vec::new();
        run(&mut output, &db, &engine(), LifeExpectancy::default(), false).unwrap();
        assert_snapshot!(String::from_utf8(output).unwrap());
    }

    #[test]
    fn life_command_json_uses_custom_expectancy() {
        let db = db_with_birthdate();
        let mut output = Vec::new();
        run(&mut output, &db, &engine(), LifeExpectancy::new(80), true).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value["expectancy"], 80);
        assert_eq!(value["weeks"]["total"], 4174);
        assert_eq!(value["months"]["total"], 960);
        assert_eq!(value["months"]["lived"], 425);
    }

    #[test]
    fn life_command_requires_birthdate() {
        let db = Database::open_in_memory().unwrap();
        let mut output = Vec::new();
        let err = run(&mut output, &db, &engine(), LifeExpectancy::default(), false).unwrap_err();
        assert!(err.to_string().contains("No birthdate set"));
    }
}
