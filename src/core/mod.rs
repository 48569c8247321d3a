//! Core logger types and traits

pub mod config;
pub mod error;
pub mod hook;
pub mod level;
pub mod logger;
pub mod metrics;
pub mod provider;
pub mod render_data;
pub mod template;
pub mod timestamp;

pub use config::{LoggerConfig, DEFAULT_MAX_SIZE, DEFAULT_TEMPLATE};
pub use error::{LoggerError, Result};
pub use hook::{Hook, PrefixHook};
pub use level::Level;
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use provider::{
    CallerInfo, CallerProvider, FixedCaller, FixedClock, SystemClock, TimeProvider, TrackedCaller,
    UnknownCaller,
};
pub use render_data::{truncate, RenderData, UNKNOWN_CALLER};
pub use template::{Template, TemplateError};
pub use timestamp::TimestampFormat;
