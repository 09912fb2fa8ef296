//! Status command: the whole dashboard at once.

use std::fmt::Display;
use std::io::Write;

use anyhow::Result;
use chrono::TimeZone;
use moment_core::{LifeExpectancy, TimeEngine};
use moment_db::Database;

use super::events::write_events;
use super::life::write_life;
use super::year::write_year;

pub fn run<W, Tz>(
    writer: &mut W,
    db: &Database,
    engine: &TimeEngine<Tz>,
    expectancy: LifeExpectancy,
) -> Result<()>
where
    W: Write,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let state = db.load_state_or_default()?;

    writeln!(writer, "Today: {}", engine.format_date(engine.now()))?;
    writeln!(writer)?;
    write_year(writer, &engine.year_progress(None))?;
    writeln!(writer)?;

    match state.user.birthdate {
        Some(birthdate) => write_life(writer, &engine.life_progress(&birthdate, expectancy))?,
        None => writeln!(writer, "Life: no birthdate set. Run `moment birthdate YYYY-MM-DD`.")?,
    }
    writeln!(writer)?;

    write_events(writer, &state, engine)
}
