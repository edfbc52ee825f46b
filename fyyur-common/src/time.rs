//! Show time utilities
//!
//! Show start times are naive local wall-clock values, the same clock the
//! past/upcoming split is evaluated against.

use chrono::{DateTime, Local, NaiveDateTime};

use crate::{Error, Result};

/// Formats accepted from the show form, tried in order.
///
/// `datetime-local` inputs submit the `T`-separated variants.
const INPUT_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Get current local wall-clock time
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Display styles for show times
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateFormat {
    /// `Tue 05, 21, 2019 9:30PM`
    #[default]
    Medium,
    /// `Tuesday May, 21, 2019 at 9:30PM`
    Full,
}

impl DateFormat {
    fn pattern(self) -> &'static str {
        match self {
            DateFormat::Medium => "%a %m, %d, %Y %-I:%M%p",
            DateFormat::Full => "%A %B, %-d, %Y at %-I:%M%p",
        }
    }
}

/// Render a show time for display
pub fn format_datetime(value: NaiveDateTime, format: DateFormat) -> String {
    value.format(format.pattern()).to_string()
}

/// Parse a submitted show start time
///
/// Accepts `YYYY-MM-DD HH:MM[:SS]`, the `T`-separated form and RFC 3339.
/// RFC 3339 values carry an offset and are converted to local time.
pub fn parse_start_time(input: &str) -> Result<NaiveDateTime> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput("start time is empty".to_string()));
    }

    for format in INPUT_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(parsed);
        }
    }

    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.with_timezone(&Local).naive_local())
        .map_err(|_| Error::InvalidInput(format!("unrecognized start time: {}", trimmed)))
}

/// A show is past once the clock has moved beyond its start time.
///
/// A show starting exactly `now` still counts as upcoming.
pub fn is_past(start_time: NaiveDateTime, now: NaiveDateTime) -> bool {
    now > start_time
}
