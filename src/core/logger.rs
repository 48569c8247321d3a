//! Main logger implementation

use super::{
    config::{LoggerConfig, DEFAULT_MAX_SIZE, DEFAULT_TEMPLATE},
    error::{LoggerError, Result},
    hook::{Hook, HookChain},
    level::Level,
    metrics::LoggerMetrics,
    provider::{CallerProvider, SystemClock, TimeProvider, TrackedCaller},
    render_data::RenderData,
    template::{Template, TemplateError},
    timestamp::TimestampFormat,
};
use parking_lot::Mutex;
use std::any::Any;
use std::fmt;
use std::io::{self, Write};
use std::panic::Location;
use std::sync::Arc;

/// A synchronous, template-driven logger
///
/// Every call runs entirely in the calling thread:
///
/// 1. pre-hooks rewrite the message (even if it is about to be dropped)
/// 2. events below the threshold are dropped
/// 3. level, time, truncated message and caller are rendered through the template
/// 4. the line is written to the sink under an exclusive lock
/// 5. post-hooks observe the message, still holding the sink lock
///
/// Post-hooks run while the lock is held, so entries reach them in sink
/// order. A post-hook must not log through the same logger: the lock is not
/// re-entrant and the call would deadlock. Pre-hooks run before the lock is
/// taken.
///
/// The logger is `Send + Sync`; share it with `Arc`. Configuration is fixed
/// once built, except [`Logger::set_threshold`] which needs `&mut self`.
///
/// # Example
///
/// ```
/// use loggo::{Level, Logger, SharedBuffer};
/// use chrono::{TimeZone, Utc};
///
/// let buffer = SharedBuffer::new();
/// let logger = Logger::builder(Level::Info)
///     .output(buffer.clone())
///     .time_provider(|| Utc.with_ymd_and_hms(2022, 1, 25, 0, 0, 0).unwrap().fixed_offset())
///     .build();
///
/// logger.info("hello");
/// logger.debug("below the threshold");
/// assert_eq!(buffer.contents(), "2022-01-25 00:00:00 [ INFO]: hello\n");
/// ```
pub struct Logger {
    threshold: Level,
    /// Opaque handle for hooks and callers; never inspected here
    context: Option<Arc<dyn Any + Send + Sync>>,
    output: Mutex<Box<dyn Write + Send>>,
    template_source: String,
    /// Compiled once; a parse failure is replayed on every call
    template: std::result::Result<Template, TemplateError>,
    time_provider: Box<dyn TimeProvider>,
    time_format: TimestampFormat,
    max_size: usize,
    caller_provider: Box<dyn CallerProvider>,
    pre_hooks: HookChain,
    post_hooks: HookChain,
    metrics: LoggerMetrics,
}

impl Logger {
    /// Logger writing to stdout with the default template
    #[must_use]
    pub fn new(threshold: Level) -> Self {
        LoggerBuilder::new(threshold).build()
    }

    /// Start a [`LoggerBuilder`] with the given threshold
    #[must_use]
    pub fn builder(threshold: Level) -> LoggerBuilder {
        LoggerBuilder::new(threshold)
    }

    /// Minimum level written
    pub fn threshold(&self) -> Level {
        self.threshold
    }

    /// Change the minimum level written
    pub fn set_threshold(&mut self, level: Level) {
        self.threshold = level;
    }

    /// Whether an event at `level` would be written
    #[inline]
    pub fn is_enabled(&self, level: Level) -> bool {
        level >= self.threshold
    }

    /// Template source as configured, even if it failed to compile
    pub fn template_source(&self) -> &str {
        &self.template_source
    }

    /// Format used for the `Time` field
    pub fn time_format(&self) -> &TimestampFormat {
        &self.time_format
    }

    /// Maximum message length in characters
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// The context handle, if one of type `T` was attached
    pub fn context<T: Any>(&self) -> Option<&T> {
        self.context.as_deref()?.downcast_ref::<T>()
    }

    /// Counters for emitted, filtered and failed calls
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Log `message` at `level`, ignoring any failure
    ///
    /// Failures still show up in [`LoggerMetrics::failed`].
    #[track_caller]
    pub fn log(&self, level: Level, message: impl Into<String>) {
        let _ = self.try_log(level, message);
    }

    /// Log `message` at `level`
    ///
    /// Returns `Ok(())` without writing when `level` is below the threshold.
    ///
    /// # Errors
    ///
    /// [`LoggerError::TemplateParse`] or [`LoggerError::TemplateExec`] when
    /// the template cannot be rendered, [`LoggerError::TimeFormat`] for an
    /// invalid time format, [`LoggerError::Write`] when the sink fails.
    /// Nothing is written and post-hooks do not run in any of these cases.
    #[track_caller]
    pub fn try_log(&self, level: Level, message: impl Into<String>) -> Result<()> {
        self.dispatch(level, message.into(), Location::caller())
    }

    /// Log preformatted arguments at `level`, ignoring any failure
    ///
    /// Usually called through the [`log!`](crate::log) family of macros.
    #[track_caller]
    pub fn logf(&self, level: Level, args: fmt::Arguments<'_>) {
        let _ = self.try_logf(level, args);
    }

    /// Log preformatted arguments at `level`, see [`Logger::try_log`]
    #[track_caller]
    pub fn try_logf(&self, level: Level, args: fmt::Arguments<'_>) -> Result<()> {
        self.dispatch(level, fmt::format(args), Location::caller())
    }

    fn dispatch(
        &self,
        level: Level,
        mut message: String,
        site: &'static Location<'static>,
    ) -> Result<()> {
        self.pre_hooks.run(self, &mut message);

        if !self.is_enabled(level) {
            self.metrics.record_filtered();
            return Ok(());
        }

        let line = match self.render(level, &message, site) {
            Ok(line) => line,
            Err(e) => {
                self.metrics.record_failed();
                return Err(e);
            }
        };

        // Held through the post-hooks so they observe entries in sink order
        let mut output = self.output.lock();
        if let Err(e) = write_line(&mut **output, &line) {
            self.metrics.record_failed();
            return Err(e);
        }
        self.metrics.record_emitted();

        self.post_hooks.run(self, &mut message);
        Ok(())
    }

    fn render(&self, level: Level, message: &str, site: &'static Location<'static>) -> Result<String> {
        let template = self
            .template
            .as_ref()
            .map_err(|e| LoggerError::TemplateParse(e.clone()))?;

        let data = RenderData::assemble(
            level,
            message,
            &self.time_provider.now(),
            &self.time_format,
            self.max_size,
            self.caller_provider.resolve(site),
        )?;

        let mut line = template.execute(&data).map_err(LoggerError::TemplateExec)?;
        line.push('\n');
        Ok(line)
    }

    #[inline]
    #[track_caller]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(Level::Debug, message);
    }

    #[inline]
    #[track_caller]
    pub fn info(&self, message: impl Into<String>) {
        self.log(Level::Info, message);
    }

    #[inline]
    #[track_caller]
    pub fn warn(&self, message: impl Into<String>) {
        self.log(Level::Warn, message);
    }

    #[inline]
    #[track_caller]
    pub fn error(&self, message: impl Into<String>) {
        self.log(Level::Error, message);
    }

    /// Log at [`Level::Fatal`]. Does not exit or panic.
    #[inline]
    #[track_caller]
    pub fn fatal(&self, message: impl Into<String>) {
        self.log(Level::Fatal, message);
    }

    #[inline]
    #[track_caller]
    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        self.logf(Level::Debug, args);
    }

    #[inline]
    #[track_caller]
    pub fn infof(&self, args: fmt::Arguments<'_>) {
        self.logf(Level::Info, args);
    }

    #[inline]
    #[track_caller]
    pub fn warnf(&self, args: fmt::Arguments<'_>) {
        self.logf(Level::Warn, args);
    }

    #[inline]
    #[track_caller]
    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        self.logf(Level::Error, args);
    }

    #[inline]
    #[track_caller]
    pub fn fatalf(&self, args: fmt::Arguments<'_>) {
        self.logf(Level::Fatal, args);
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("threshold", &self.threshold)
            .field("template", &self.template_source)
            .field("time_format", &self.time_format)
            .field("max_size", &self.max_size)
            .field("pre_hooks", &self.pre_hooks.len())
            .field("post_hooks", &self.post_hooks.len())
            .field("has_context", &self.context.is_some())
            .finish_non_exhaustive()
    }
}

fn write_line(output: &mut dyn Write, line: &str) -> Result<()> {
    output.write_all(line.as_bytes()).map_err(LoggerError::write)?;
    output.flush().map_err(LoggerError::write)
}

/// Builder for constructing Logger with a fluent API
///
/// Options may be given in any order. Hooks run in the order they were
/// added.
///
/// # Example
/// ```
/// use loggo::{FixedCaller, Level, Logger, SharedBuffer};
///
/// let buffer = SharedBuffer::new();
/// let logger = Logger::builder(Level::Debug)
///     .output(buffer.clone())
///     .template("{Caller} {Level}: {Message}")
///     .caller_provider(FixedCaller::new("main.rs", 10))
///     .max_size(12)
///     .pre_hook(|_, message| message.make_ascii_uppercase())
///     .build();
///
/// logger.debug("connection established");
/// assert_eq!(buffer.contents(), "main.rs:10 DEBUG: CONNECTION E\n");
/// ```
pub struct LoggerBuilder {
    threshold: Level,
    context: Option<Arc<dyn Any + Send + Sync>>,
    output: Box<dyn Write + Send>,
    template: String,
    time_provider: Box<dyn TimeProvider>,
    time_format: TimestampFormat,
    max_size: usize,
    caller_provider: Box<dyn CallerProvider>,
    pre_hooks: HookChain,
    post_hooks: HookChain,
}

impl LoggerBuilder {
    /// Builder with default options: stdout, default template, local clock,
    /// `%Y-%m-%d %H:%M:%S`, 1000 characters, tracked call site, no hooks
    pub fn new(threshold: Level) -> Self {
        Self {
            threshold,
            context: None,
            output: Box::new(io::stdout()),
            template: DEFAULT_TEMPLATE.to_string(),
            time_provider: Box::new(SystemClock),
            time_format: TimestampFormat::default(),
            max_size: DEFAULT_MAX_SIZE,
            caller_provider: Box::new(TrackedCaller),
            pre_hooks: HookChain::default(),
            post_hooks: HookChain::default(),
        }
    }

    /// Builder seeded from a configuration document
    pub fn from_config(config: LoggerConfig) -> Self {
        Self::new(config.threshold)
            .template(config.template)
            .timestamp_format(config.time_format)
            .max_size(config.max_size)
    }

    #[must_use = "builder methods return a new value"]
    pub fn threshold(mut self, level: Level) -> Self {
        self.threshold = level;
        self
    }

    /// Set the sink entries are written to
    ///
    /// The logger only calls `write_all` and `flush` on it.
    #[must_use = "builder methods return a new value"]
    pub fn output<W: Write + Send + 'static>(mut self, output: W) -> Self {
        self.output = Box::new(output);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn time_provider<P: TimeProvider + 'static>(mut self, provider: P) -> Self {
        self.time_provider = Box::new(provider);
        self
    }

    /// Set a strftime-style time format, e.g. `"%d/%m/%y %H:%M"`
    #[must_use = "builder methods return a new value"]
    pub fn time_format(mut self, format: impl Into<String>) -> Self {
        self.time_format = TimestampFormat::Custom(format.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.time_format = format;
        self
    }

    /// Maximum message length in characters
    #[must_use = "builder methods return a new value"]
    pub fn max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn caller_provider<P: CallerProvider + 'static>(mut self, provider: P) -> Self {
        self.caller_provider = Box::new(provider);
        self
    }

    /// Attach an opaque value, retrievable with [`Logger::context`]
    #[must_use = "builder methods return a new value"]
    pub fn context<T: Any + Send + Sync>(mut self, context: T) -> Self {
        self.context = Some(Arc::new(context));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn pre_hook<F>(self, hook: F) -> Self
    where
        F: Fn(&Logger, &mut String) + Send + Sync + 'static,
    {
        self.pre_hook_boxed(Box::new(hook))
    }

    #[must_use = "builder methods return a new value"]
    pub fn pre_hook_boxed(mut self, hook: Box<dyn Hook>) -> Self {
        self.pre_hooks.push(hook);
        self
    }

    /// Append a post-hook; it runs with the sink locked and must not log
    /// through the same logger
    #[must_use = "builder methods return a new value"]
    pub fn post_hook<F>(self, hook: F) -> Self
    where
        F: Fn(&Logger, &mut String) + Send + Sync + 'static,
    {
        self.post_hook_boxed(Box::new(hook))
    }

    #[must_use = "builder methods return a new value"]
    pub fn post_hook_boxed(mut self, hook: Box<dyn Hook>) -> Self {
        self.post_hooks.push(hook);
        self
    }

    /// Build the Logger
    ///
    /// Never fails: an invalid template or time format is reported by each
    /// log call instead. Use [`LoggerConfig::validate`] to check up front.
    pub fn build(self) -> Logger {
        Logger {
            threshold: self.threshold,
            context: self.context,
            output: Mutex::new(self.output),
            template: Template::compile(&self.template),
            template_source: self.template,
            time_provider: self.time_provider,
            time_format: self.time_format,
            max_size: self.max_size,
            caller_provider: self.caller_provider,
            pre_hooks: self.pre_hooks,
            post_hooks: self.post_hooks,
            metrics: LoggerMetrics::new(),
        }
    }
}
