use chrono::NaiveTime;
use std::time::{SystemTime, UNIX_EPOCH};

pub fn current_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

/// Parse a wall-clock time as sent by the backend (`HH:MM:SS` or `HH:MM`)
pub fn parse_clock(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .ok()
}

/// The `HH:MM` prefix of a fixed-width time string.
/// Strings shorter than five characters are returned unchanged.
pub fn hour_minute(value: &str) -> &str {
    value.get(..5).unwrap_or(value)
}
