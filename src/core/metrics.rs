//! Logger metrics for observability
//!
//! Counters describing what a logger instance did with the entries that
//! passed its severity filter. Filtered calls are not counted: the fast
//! rejection path has no side effects.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use node_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_emitted();
/// metrics.record_published();
///
/// assert_eq!(metrics.total_emitted(), 1);
/// assert_eq!(metrics.published_count(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Entries built and dispatched (one per sequence number)
    total_emitted: AtomicU64,

    /// Entries handed to the remote publish callback
    published_count: AtomicU64,

    /// Local sink writes that returned an error
    sink_failures: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            total_emitted: AtomicU64::new(0),
            published_count: AtomicU64::new(0),
            sink_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn total_emitted(&self) -> u64 {
        self.total_emitted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn published_count(&self) -> u64 {
        self.published_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn sink_failures(&self) -> u64 {
        self.sink_failures.load(Ordering::Relaxed)
    }

    /// Record an emitted entry, returning the previous count
    #[inline]
    pub fn record_emitted(&self) -> u64 {
        self.total_emitted.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_published(&self) -> u64 {
        self.published_count.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_sink_failure(&self) -> u64 {
        self.sink_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Share of emitted entries whose local write failed, as a percentage
    ///
    /// Returns 0.0 if nothing has been emitted.
    pub fn sink_failure_rate(&self) -> f64 {
        let emitted = self.total_emitted() as f64;
        if emitted == 0.0 {
            0.0
        } else {
            (self.sink_failures() as f64 / emitted) * 100.0
        }
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.total_emitted.store(0, Ordering::Relaxed);
        self.published_count.store(0, Ordering::Relaxed);
        self.sink_failures.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            total_emitted: AtomicU64::new(self.total_emitted()),
            published_count: AtomicU64::new(self.published_count()),
            sink_failures: AtomicU64::new(self.sink_failures()),
        }
    }
}
