//! Due-time arithmetic for the medication list
//!
//! All comparisons happen on local wall-clock time. The server stores
//! `LocalDateTime` values without an offset, so a zone-less timestamp is
//! taken at face value; one carrying an offset is converted to local time
//! first.

use chrono::{DateTime, Local, NaiveDateTime};
use std::fmt;

/// Format used when sending a timestamp back to the server
pub const WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Marker shown instead of a countdown once a dose is due
pub const DUE_NOW_MARKER: &str = "DUE NOW";

/// Marker for medications without a usable next-due time
pub const UNSCHEDULED_MARKER: &str = "not scheduled";

const LOCAL_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// Parse a next-due timestamp as served by the API
pub fn parse_due_time(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Some(with_offset.with_timezone(&Local).naive_local());
    }
    LOCAL_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
}

/// A dose is due once its scheduled instant is at or before `now`
pub fn is_due(due_at: NaiveDateTime, now: NaiveDateTime) -> bool {
    due_at <= now
}

/// Countdown text: hours only when non-zero, minutes whenever hours are
/// shown or non-zero, seconds always.
pub fn format_remaining(total_seconds: i64) -> String {
    let total_seconds = total_seconds.max(0);
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

/// Display state of one medication at a given instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueStatus {
    Due,
    Upcoming { remaining_seconds: i64 },
    Unscheduled,
}

impl DueStatus {
    pub fn evaluate(due_at: Option<NaiveDateTime>, now: NaiveDateTime) -> Self {
        match due_at {
            None => DueStatus::Unscheduled,
            Some(due_at) if is_due(due_at, now) => DueStatus::Due,
            // Partial seconds round up so the countdown never reads 0s early
            Some(due_at) => DueStatus::Upcoming {
                remaining_seconds: ((due_at - now).num_milliseconds() + 999) / 1000,
            },
        }
    }

    pub fn is_due(&self) -> bool {
        matches!(self, DueStatus::Due)
    }
}

impl fmt::Display for DueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DueStatus::Due => f.write_str(DUE_NOW_MARKER),
            DueStatus::Upcoming { remaining_seconds } => f.write_str(&format_remaining(*remaining_seconds)),
            DueStatus::Unscheduled => f.write_str(UNSCHEDULED_MARKER),
        }
    }
}
