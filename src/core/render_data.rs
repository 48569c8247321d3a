//! Per-event data exposed to the template

use super::error::Result;
use super::level::Level;
use super::provider::CallerInfo;
use super::timestamp::TimestampFormat;
use chrono::{DateTime, FixedOffset};

/// Rendered in place of `{Caller}` when the call site cannot be resolved
pub const UNKNOWN_CALLER: &str = "unknown";

/// The fixed-shape record a template is executed against
///
/// Field names visible to templates: `Level`, `Time`, `Message`, `Caller`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderData {
    pub level: &'static str,
    pub time: String,
    pub message: String,
    pub caller: String,
}

impl RenderData {
    /// Build render data for a single event
    ///
    /// `message` is truncated to `max_size` characters and a missing caller
    /// becomes [`UNKNOWN_CALLER`].
    pub fn assemble(
        level: Level,
        message: &str,
        now: &DateTime<FixedOffset>,
        time_format: &TimestampFormat,
        max_size: usize,
        caller: Option<CallerInfo>,
    ) -> Result<Self> {
        Ok(Self {
            level: level.to_str(),
            time: time_format.format(now)?,
            message: truncate(message, max_size).to_string(),
            caller: caller_string(caller),
        })
    }

    /// Look up a field by its template name
    pub fn field(&self, name: &str) -> Option<&str> {
        match name {
            "Level" => Some(self.level),
            "Time" => Some(&self.time),
            "Message" => Some(&self.message),
            "Caller" => Some(&self.caller),
            _ => None,
        }
    }
}

/// Cut `input` to at most `max_chars` characters.
///
/// Counts Unicode scalar values, so a multi-byte character is never split.
/// No ellipsis or marker is appended.
pub fn truncate(input: &str, max_chars: usize) -> &str {
    match input.char_indices().nth(max_chars) {
        Some((end, _)) => &input[..end],
        None => input,
    }
}

fn caller_string(caller: Option<CallerInfo>) -> String {
    match caller {
        Some(info) => info.to_string(),
        None => UNKNOWN_CALLER.to_string(),
    }
}
