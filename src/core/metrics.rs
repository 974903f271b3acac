//! Logger metrics for observability
//!
//! Counts records that reached the output stage and output failures the
//! logger swallowed. Calls rejected by the level filter are not counted.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use client_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
/// metrics.record_logged();
/// metrics.record_write_failure();
///
/// assert_eq!(metrics.total_logged(), 1);
/// assert_eq!(metrics.write_failures(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Records that passed the filter
    total_logged: AtomicU64,

    /// Appender errors or panics, and persistence hook panics
    write_failures: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            total_logged: AtomicU64::new(0),
            write_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn total_logged(&self) -> u64 {
        self.total_logged.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn write_failures(&self) -> u64 {
        self.write_failures.load(Ordering::Relaxed)
    }

    /// Record an emitted entry, returning the previous count
    #[inline]
    pub fn record_logged(&self) -> u64 {
        self.total_logged.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a swallowed output failure, returning the previous count
    #[inline]
    pub fn record_write_failure(&self) -> u64 {
        self.write_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.total_logged.store(0, Ordering::Relaxed);
        self.write_failures.store(0, Ordering::Relaxed);
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
            total_logged: AtomicU64::new(self.total_logged()),
            write_failures: AtomicU64::new(self.write_failures()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.total_logged(), 0);
        assert_eq!(metrics.write_failures(), 0);
    }

    #[test]
    fn test_record_returns_previous() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.record_logged(), 0);
        assert_eq!(metrics.record_logged(), 1);
        assert_eq!(metrics.total_logged(), 2);
    }

    #[test]
    fn test_metrics_reset() {
        let metrics = LoggerMetrics::new();
        metrics.record_logged();
        metrics.record_write_failure();

        metrics.reset();

        assert_eq!(metrics.total_logged(), 0);
        assert_eq!(metrics.write_failures(), 0);
    }

    #[test]
    fn test_metrics_clone_is_snapshot() {
        let metrics = LoggerMetrics::new();
        metrics.record_logged();

        let snapshot = metrics.clone();
        metrics.record_logged();

        assert_eq!(snapshot.total_logged(), 1);
        assert_eq!(metrics.total_logged(), 2);
    }
}
