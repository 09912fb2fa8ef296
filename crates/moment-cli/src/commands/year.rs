//! Year command: progress through a calendar year.

use std::io::Write;

use anyhow::Result;
use chrono::TimeZone;
use moment_core::{TimeEngine, YearProgress};

use super::util::progress_bar;

pub fn run<W: Write, Tz: TimeZone>(
    writer: &mut W,
    engine: &TimeEngine<Tz>,
    year: Option<i32>,
    json: bool,
) -> Result<()> {
    let progress = engine.year_progress(year);
    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&progress)?)?;
        return Ok(());
    }
    write_year(writer, &progress)
}

/// Writes the human-readable year block.
pub fn write_year<W: Write>(writer: &mut W, progress: &YearProgress) -> Result<()> {
    writeln!(writer, "Year {}", progress.year)?;
    writeln!(
        writer,
        "  {} {:.1}%",
        progress_bar(progress.percentage),
        progress.percentage
    )?;
    writeln!(
        writer,
        "  {} of {} days passed, {} remaining",
        progress.days_passed, progress.days_in_year, progress.days_remaining
    )?;
    Ok(())
}
