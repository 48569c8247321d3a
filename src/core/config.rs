//! Serializable logger configuration
//!
//! Covers the plain-data part of a logger (threshold, template, time format,
//! message limit). Sinks, providers and hooks are code and are attached on
//! the builder returned by [`LoggerConfig::into_builder`].

use super::error::{LoggerError, Result};
use super::level::Level;
use super::logger::LoggerBuilder;
use super::template::Template;
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_TEMPLATE: &str = "{Time} [{Level:>5}]: {Message}";
pub const DEFAULT_MAX_SIZE: usize = 1000;

/// # Example
///
/// ```
/// use loggo::{Level, LoggerConfig};
///
/// let config = LoggerConfig::from_json(r#"{"threshold": "WARN", "max_size": 80}"#).unwrap();
/// assert_eq!(config.threshold, Level::Warn);
/// assert_eq!(config.max_size, 80);
/// assert_eq!(config.template, loggo::DEFAULT_TEMPLATE);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggerConfig {
    /// Minimum level written; no default, it must be chosen
    pub threshold: Level,

    #[serde(default = "default_template")]
    pub template: String,

    #[serde(default)]
    pub time_format: TimestampFormat,

    /// Maximum message length in characters
    #[serde(default = "default_max_size")]
    pub max_size: usize,
}

fn default_template() -> String {
    DEFAULT_TEMPLATE.to_string()
}

fn default_max_size() -> usize {
    DEFAULT_MAX_SIZE
}

impl LoggerConfig {
    /// Configuration with every default except the threshold
    pub fn new(threshold: Level) -> Self {
        Self {
            threshold,
            template: default_template(),
            time_format: TimestampFormat::default(),
            max_size: DEFAULT_MAX_SIZE,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that the template compiles and the time format is renderable
    ///
    /// A logger built from an invalid configuration still works; it returns
    /// the same error from every call. Validating up front turns that into a
    /// single startup error.
    pub fn validate(&self) -> Result<()> {
        Template::compile(&self.template)
            .map_err(|e| LoggerError::config("template", e.to_string()))?;
        self.time_format
            .validate()
            .map_err(|e| LoggerError::config("time_format", e.to_string()))?;
        Ok(())
    }

    pub fn into_builder(self) -> LoggerBuilder {
        LoggerBuilder::from_config(self)
    }
}
