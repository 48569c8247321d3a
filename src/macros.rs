//! Logging macros for ergonomic log message formatting.
//!
//! These macros forward `format!`-style arguments to the `*f` methods of
//! [`Logger`](crate::Logger). The call site recorded for `{Caller}` is the
//! macro invocation.
//!
//! # Examples
//!
//! ```
//! use loggo::prelude::*;
//! use loggo::{info, try_log};
//!
//! let buffer = SharedBuffer::new();
//! let logger = Logger::builder(Level::Info)
//!     .output(buffer.clone())
//!     .template("{Level}: {Message}")
//!     .build();
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! try_log!(logger, Level::Warn, "{} retries left", 2).unwrap();
//!
//! assert_eq!(buffer.lines(), ["INFO: Server listening on port 8080", "WARN: 2 retries left"]);
//! ```

/// Log a formatted message at the given level, ignoring failures.
///
/// ```
/// # use loggo::prelude::*;
/// # let logger = Logger::builder(Level::Info).output(std::io::sink()).build();
/// use loggo::log;
/// log!(logger, Level::Info, "Simple message");
/// log!(logger, Level::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.logf($level, format_args!($($arg)+))
    };
}

/// Log a formatted message at the given level and return the `Result`.
///
/// ```
/// # use loggo::prelude::*;
/// # let logger = Logger::builder(Level::Info).output(std::io::sink()).build();
/// use loggo::try_log;
/// try_log!(logger, Level::Info, "Checked: {}", true)?;
/// # Ok::<(), LoggerError>(())
/// ```
#[macro_export]
macro_rules! try_log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.try_logf($level, format_args!($($arg)+))
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Error, $($arg)+)
    };
}

/// Log a fatal-level message. The process keeps running.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Fatal, $($arg)+)
    };
}
