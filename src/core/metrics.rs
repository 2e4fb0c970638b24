//! Logger metrics for observability
//!
//! Counters describing what happened to leveled calls: how many were
//! dispatched, how many the level filter discarded, and how many failed in a
//! handler or telemetry backend.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use rust_context_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_dispatched();
/// metrics.record_handler_failure();
///
/// assert_eq!(metrics.dispatched(), 1);
/// assert_eq!(metrics.handler_failures(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Entries finalized and handed to the handler
    dispatched: AtomicU64,

    /// Calls discarded by the level filter
    filtered: AtomicU64,

    /// Handler invocations that reported an error
    handler_failures: AtomicU64,

    /// Telemetry increments that reported an error
    telemetry_failures: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            dispatched: AtomicU64::new(0),
            filtered: AtomicU64::new(0),
            handler_failures: AtomicU64::new(0),
            telemetry_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn dispatched(&self) -> u64 {
        self.dispatched.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered(&self) -> u64 {
        self.filtered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn handler_failures(&self) -> u64 {
        self.handler_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn telemetry_failures(&self) -> u64 {
        self.telemetry_failures.load(Ordering::Relaxed)
    }

    /// Record a dispatched entry
    #[inline]
    pub fn record_dispatched(&self) -> u64 {
        self.dispatched.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a call below the minimum level
    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.filtered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_handler_failure(&self) -> u64 {
        self.handler_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_telemetry_failure(&self) -> u64 {
        self.telemetry_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Share of dispatched entries whose handler failed, as a percentage
    ///
    /// Returns 0.0 if nothing has been dispatched.
    pub fn failure_rate(&self) -> f64 {
        let dispatched = self.dispatched() as f64;
        if dispatched == 0.0 {
            0.0
        } else {
            (self.handler_failures() as f64 / dispatched) * 100.0
        }
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.dispatched.store(0, Ordering::Relaxed);
        self.filtered.store(0, Ordering::Relaxed);
        self.handler_failures.store(0, Ordering::Relaxed);
        self.telemetry_failures.store(0, Ordering::Relaxed);
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
            dispatched: AtomicU64::new(self.dispatched()),
            filtered: AtomicU64::new(self.filtered()),
            handler_failures: AtomicU64::new(self.handler_failures()),
            telemetry_failures: AtomicU64::new(self.telemetry_failures()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.dispatched(), 0);
        assert_eq!(metrics.filtered(), 0);
        assert_eq!(metrics.handler_failures(), 0);
        assert_eq!(metrics.telemetry_failures(), 0);
    }

    #[test]
    fn test_record_returns_previous() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.record_filtered(), 0);
        assert_eq!(metrics.record_filtered(), 1);
        assert_eq!(metrics.filtered(), 2);
    }

    #[test]
    fn test_failure_rate() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.failure_rate(), 0.0);

        for _ in 0..10 {
            metrics.record_dispatched();
        }
        metrics.record_handler_failure();

        let rate = metrics.failure_rate();
        assert!(rate > 9.9 && rate < 10.1, "Failure rate was {}", rate);
    }

    #[test]
    fn test_reset_and_snapshot() {
        let metrics = LoggerMetrics::new();
        metrics.record_dispatched();
        metrics.record_telemetry_failure();

        let snapshot = metrics.clone();
        metrics.reset();

        assert_eq!(metrics.dispatched(), 0);
        assert_eq!(metrics.telemetry_failures(), 0);
        assert_eq!(snapshot.dispatched(), 1);
        assert_eq!(snapshot.telemetry_failures(), 1);
    }
}
