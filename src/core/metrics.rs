//! Logger metrics for observability
//!
//! Counters for entries enqueued, executed, and failed, plus the number of
//! drain passes the worker has made.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use deferred_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_enqueued();
/// metrics.record_enqueued();
/// metrics.record_executed();
///
/// assert_eq!(metrics.enqueued(), 2);
/// assert_eq!(metrics.pending(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Entries handed to the queue
    enqueued: AtomicU64,

    /// Entries the worker ran to completion
    executed: AtomicU64,

    /// Entries that panicked while running
    panicked: AtomicU64,

    /// Completed drain passes
    drain_passes: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            enqueued: AtomicU64::new(0),
            executed: AtomicU64::new(0),
            panicked: AtomicU64::new(0),
            drain_passes: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn enqueued(&self) -> u64 {
        self.enqueued.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn executed(&self) -> u64 {
        self.executed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn panicked(&self) -> u64 {
        self.panicked.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn drain_passes(&self) -> u64 {
        self.drain_passes.load(Ordering::Relaxed)
    }

    /// Entries enqueued but not yet finished (successfully or not)
    pub fn pending(&self) -> u64 {
        self.enqueued()
            .saturating_sub(self.executed())
            .saturating_sub(self.panicked())
    }

    #[inline]
    pub fn record_enqueued(&self) -> u64 {
        self.enqueued.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_executed(&self) -> u64 {
        self.executed.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_panicked(&self) -> u64 {
        self.panicked.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_drain_pass(&self) -> u64 {
        self.drain_passes.fetch_add(1, Ordering::Relaxed)
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.enqueued.store(0, Ordering::Relaxed);
        self.executed.store(0, Ordering::Relaxed);
        self.panicked.store(0, Ordering::Relaxed);
        self.drain_passes.store(0, Ordering::Relaxed);
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
            enqueued: AtomicU64::new(self.enqueued()),
            executed: AtomicU64::new(self.executed()),
            panicked: AtomicU64::new(self.panicked()),
            drain_passes: AtomicU64::new(self.drain_passes()),
        }
    }
}
