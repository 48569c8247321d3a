//! Pluggable clock and call-site providers
//!
//! Both are single-method capabilities injected through the builder. Plain
//! closures implement them, so tests can pin the clock or fake a call site
//! without defining a type.

use chrono::{DateTime, FixedOffset, Local};
use std::fmt;
use std::panic::Location;

/// Source of the timestamp rendered into each entry
pub trait TimeProvider: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}

impl<F> TimeProvider for F
where
    F: Fn() -> DateTime<FixedOffset> + Send + Sync,
{
    fn now(&self) -> DateTime<FixedOffset> {
        self()
    }
}

/// Local wall-clock time (the default provider)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl TimeProvider for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().into()
    }
}

/// Always returns the same instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl TimeProvider for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

/// A resolved source location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerInfo {
    pub file: String,
    pub line: u32,
}

impl CallerInfo {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

impl From<&Location<'_>> for CallerInfo {
    fn from(location: &Location<'_>) -> Self {
        Self::new(location.file(), location.line())
    }
}

impl fmt::Display for CallerInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Resolves the `{Caller}` field of an entry
///
/// `site` is the location of the call into the public logging API. All
/// entry points are `#[track_caller]`, so `site` already skips every frame
/// inside this crate. Returning `None` renders `unknown`.
pub trait CallerProvider: Send + Sync {
    fn resolve(&self, site: &'static Location<'static>) -> Option<CallerInfo>;
}

impl<F> CallerProvider for F
where
    F: Fn(&'static Location<'static>) -> Option<CallerInfo> + Send + Sync,
{
    fn resolve(&self, site: &'static Location<'static>) -> Option<CallerInfo> {
        self(site)
    }
}

/// Reports the tracked call site (the default provider)
#[derive(Debug, Clone, Copy, Default)]
pub struct TrackedCaller;

impl CallerProvider for TrackedCaller {
    fn resolve(&self, site: &'static Location<'static>) -> Option<CallerInfo> {
        Some(CallerInfo::from(site))
    }
}

/// Reports the same file and line for every entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedCaller(pub CallerInfo);

impl FixedCaller {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self(CallerInfo::new(file, line))
    }
}

impl CallerProvider for FixedCaller {
    fn resolve(&self, _site: &'static Location<'static>) -> Option<CallerInfo> {
        Some(self.0.clone())
    }
}

/// Never resolves a call site
#[derive(Debug, Clone, Copy, Default)]
pub struct UnknownCaller;

impl CallerProvider for UnknownCaller {
    fn resolve(&self, _site: &'static Location<'static>) -> Option<CallerInfo> {
        None
    }
}
