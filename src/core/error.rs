//! Error types for the logger

use super::template::TemplateError;

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Template source could not be compiled
    #[error("error parsing template: {0}")]
    TemplateParse(TemplateError),

    /// Compiled template could not be executed against the render data
    #[error("error executing template: {0}")]
    TemplateExec(TemplateError),

    /// Time format string contains an unsupported specifier
    #[error("error formatting time: invalid format string '{format}'")]
    TimeFormat { format: String },

    /// Writing the rendered entry to the sink failed
    #[error("error writing log entry: {source}")]
    Write {
        #[source]
        source: std::io::Error,
    },

    /// Unrecognised level name
    #[error("Invalid log level: '{value}'")]
    InvalidLevel { value: String },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Configuration document could not be decoded
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),

    /// Generic IO error (configuration files, sink setup)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LoggerError {
    /// Create a sink write error
    pub fn write(source: std::io::Error) -> Self {
        LoggerError::Write { source }
    }

    /// Create a time format error
    pub fn time_format(format: impl Into<String>) -> Self {
        LoggerError::TimeFormat {
            format: format.into(),
        }
    }

    /// Create an invalid level error
    pub fn invalid_level(value: impl Into<String>) -> Self {
        LoggerError::InvalidLevel {
            value: value.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// True for the two template failure kinds
    pub fn is_template_error(&self) -> bool {
        matches!(
            self,
            LoggerError::TemplateParse(_) | LoggerError::TemplateExec(_)
        )
    }
}
