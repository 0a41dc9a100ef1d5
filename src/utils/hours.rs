//! Working hours derived from wall-clock check-in/check-out times.

use chrono::{NaiveTime, Timelike};

/// Parses `HH:MM` or `HH:MM:SS`. Seconds are accepted and ignored by the
/// hour arithmetic below.
pub fn parse_clock(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .ok()
}

/// Hours between two clock readings on a local wall clock.
///
/// A negative hour difference is read as one midnight crossing (+24h). No
/// timezone handling, and shifts spanning more than one midnight are not
/// representable.
pub fn working_hours_between(check_in: NaiveTime, check_out: NaiveTime) -> f64 {
    let mut hours = check_out.hour() as i32 - check_in.hour() as i32;
    let minutes = check_out.minute() as i32 - check_in.minute() as i32;

    if hours < 0 {
        hours += 24;
    }

    hours as f64 + minutes as f64 / 60.0
}
