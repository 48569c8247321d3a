//! Logger metrics for observability
//!
//! Counters describing what happened to each log call: written, dropped by
//! the level threshold, or failed (template, time format or sink error).
//! Failures of the fire-and-forget API are otherwise invisible, so the
//! `failed` counter is the way to notice a broken template or sink.

use std::sync::atomic::{AtomicU64, Ordering};

/// # Example
///
/// ```
/// use loggo::{Level, Logger, SharedBuffer};
///
/// let logger = Logger::builder(Level::Warn)
///     .output(SharedBuffer::new())
///     .build();
///
/// logger.info("dropped by threshold");
/// logger.error("written");
///
/// let metrics = logger.metrics();
/// assert_eq!(metrics.filtered(), 1);
/// assert_eq!(metrics.emitted(), 1);
/// assert_eq!(metrics.failed(), 0);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Entries written to the sink
    emitted: AtomicU64,

    /// Calls below the threshold
    filtered: AtomicU64,

    /// Calls that returned an error
    failed: AtomicU64,
}

impl LoggerMetrics {
    pub const fn new() -> Self {
        Self {
            emitted: AtomicU64::new(0),
            filtered: AtomicU64::new(0),
            failed: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn emitted(&self) -> u64 {
        self.emitted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered(&self) -> u64 {
        self.filtered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    /// Every call seen, whatever its outcome
    pub fn total(&self) -> u64 {
        self.emitted() + self.filtered() + self.failed()
    }

    #[inline]
    pub(crate) fn record_emitted(&self) -> u64 {
        self.emitted.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub(crate) fn record_filtered(&self) -> u64 {
        self.filtered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub(crate) fn record_failed(&self) -> u64 {
        self.failed.fetch_add(1, Ordering::Relaxed)
    }

    /// Failed calls as a percentage (0.0 - 100.0) of calls that passed the threshold
    ///
    /// Returns 0.0 if nothing passed the threshold yet.
    pub fn failure_rate(&self) -> f64 {
        let failed = self.failed() as f64;
        let attempted = self.emitted() as f64 + failed;
        if attempted == 0.0 {
            0.0
        } else {
            (failed / attempted) * 100.0
        }
    }

    /// Reset all counters to zero
    pub fn reset(&self) {
        self.emitted.store(0, Ordering::Relaxed);
        self.filtered.store(0, Ordering::Relaxed);
        self.failed.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Snapshot of the current values
    fn clone(&self) -> Self {
        Self {
            emitted: AtomicU64::new(self.emitted()),
            filtered: AtomicU64::new(self.filtered()),
            failed: AtomicU64::new(self.failed()),
        }
    }
}
