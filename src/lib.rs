//! # loggo
//!
//! A small, synchronous logger that renders every entry through a
//! user-supplied template.
//!
//! ## Features
//!
//! - **Templates**: `{Time} [{Level:>5}]: {Message}` by default, with `Caller`
//!   available and padding directives on any field
//! - **Hooks**: ordered pre-hooks rewrite messages, post-hooks observe them
//! - **Pluggable providers**: inject the clock and the call-site resolver
//! - **Thread Safe**: concurrent callers never interleave partial lines
//! - **Strict or best-effort**: `try_*` calls return errors, plain calls swallow them
//!
//! ```
//! use loggo::{Level, Logger, SharedBuffer};
//!
//! let buffer = SharedBuffer::new();
//! let logger = Logger::builder(Level::Info)
//!     .output(buffer.clone())
//!     .template("{Level}: {Message}")
//!     .build();
//!
//! loggo::info!(logger, "listening on port {}", 8080);
//! assert_eq!(buffer.contents(), "INFO: listening on port 8080\n");
//! ```

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        CallerInfo, CallerProvider, FixedCaller, FixedClock, Hook, Level, Logger, LoggerBuilder,
        LoggerConfig, LoggerError, LoggerMetrics, Result, TimeProvider, TimestampFormat,
        TrackedCaller, UnknownCaller,
    };
    pub use crate::sinks::{FileSink, SharedBuffer};
}

pub use crate::core::{
    truncate, CallerInfo, CallerProvider, FixedCaller, FixedClock, Hook, Level, Logger,
    LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, PrefixHook, RenderData, Result,
    SystemClock, Template, TemplateError, TimeProvider, TimestampFormat, TrackedCaller,
    UnknownCaller, DEFAULT_MAX_SIZE, DEFAULT_TEMPLATE, UNKNOWN_CALLER,
};
pub use sinks::{FileSink, SharedBuffer};
