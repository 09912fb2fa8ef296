//! Progress of `now` through a dated range.

use chrono::{DateTime, TimeZone};

/// Linear progress of `now` from `start` to `end`, in \[0, 100\].
///
/// Reaching `end` always reports 100, so a zero-length range is complete
/// once `now` reaches it and 0 before. Nothing divides by zero.
#[allow(clippy::cast_precision_loss)]
pub fn event_progress<Tz: TimeZone>(
    start: &DateTime<Tz>,
    end: &DateTime<Tz>,
    now: &DateTime<Tz>,
) -> f64 {
    let start = start.timestamp_millis();
    let end = end.timestamp_millis();
    let current = now.timestamp_millis();

    if current >= end {
        return 100.0;
    }
    if current <= start {
        return 0.0;
    }
    // start < current < end here, so the span is positive.
    ((current - start) as f64 / (end - start) as f64) * 100.0
}
