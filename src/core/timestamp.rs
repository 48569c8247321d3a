//! Timestamp formatting utilities
//!
//! Log timestamps are rendered from a `DateTime<FixedOffset>` so injected
//! clocks can carry any offset. Custom formats use strftime specifiers and are
//! validated before use; chrono panics on unknown specifiers when formatting
//! with `to_string`, so an invalid format surfaces as an error instead.

use super::error::{LoggerError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Format of the `Time` render field
///
/// # Examples
///
/// ```
/// use loggo::TimestampFormat;
/// use chrono::{TimeZone, Utc};
///
/// let at = Utc.with_ymd_and_hms(2022, 1, 25, 0, 0, 0).unwrap().fixed_offset();
/// assert_eq!(TimestampFormat::Standard.format(&at).unwrap(), "2022-01-25 00:00:00");
///
/// let custom = TimestampFormat::Custom("%d/%m/%y".to_string());
/// assert_eq!(custom.format(&at).unwrap(), "25/01/22");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// `2022-01-25 00:00:00`, no offset, no fractional seconds
    #[default]
    Standard,

    /// ISO 8601 with milliseconds and offset: `2022-01-25T00:00:00.000+00:00`
    Iso8601,

    /// RFC 3339: `2022-01-25T00:00:00+00:00`
    Rfc3339,

    /// Unix timestamp in seconds
    Unix,

    /// Unix timestamp in milliseconds
    UnixMillis,

    /// Any strftime-compatible format string
    Custom(String),
}

impl TimestampFormat {
    pub const STANDARD_PATTERN: &'static str = "%Y-%m-%d %H:%M:%S";
    const ISO8601_PATTERN: &'static str = "%Y-%m-%dT%H:%M:%S%.3f%:z";

    /// Format `datetime` according to this format
    pub fn format(&self, datetime: &DateTime<FixedOffset>) -> Result<String> {
        match self {
            TimestampFormat::Standard => format_pattern(datetime, Self::STANDARD_PATTERN),
            TimestampFormat::Iso8601 => format_pattern(datetime, Self::ISO8601_PATTERN),
            TimestampFormat::Rfc3339 => Ok(datetime.to_rfc3339()),
            TimestampFormat::Unix => Ok(datetime.timestamp().to_string()),
            TimestampFormat::UnixMillis => Ok(datetime.timestamp_millis().to_string()),
            TimestampFormat::Custom(pattern) => format_pattern(datetime, pattern),
        }
    }

    /// Check that this format can be rendered
    pub fn validate(&self) -> Result<()> {
        match self {
            TimestampFormat::Custom(pattern) => parse_pattern(pattern).map(|_| ()),
            _ => Ok(()),
        }
    }
}

impl From<&str> for TimestampFormat {
    fn from(pattern: &str) -> Self {
        TimestampFormat::Custom(pattern.to_string())
    }
}

impl From<String> for TimestampFormat {
    fn from(pattern: String) -> Self {
        TimestampFormat::Custom(pattern)
    }
}

fn parse_pattern(pattern: &str) -> Result<Vec<Item<'_>>> {
    let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(LoggerError::time_format(pattern));
    }
    Ok(items)
}

fn format_pattern(datetime: &DateTime<FixedOffset>, pattern: &str) -> Result<String> {
    let items = parse_pattern(pattern)?;
    let mut out = String::with_capacity(pattern.len() + 8);
    write!(out, "{}", datetime.format_with_items(items.iter()))
        .map_err(|_| LoggerError::time_format(pattern))?;
    Ok(out)
}
