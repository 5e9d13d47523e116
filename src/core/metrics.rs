//! Event bus metrics for observability
//!
//! Counters for monitoring bus health: how many events were published,
//! how many subscriber deliveries succeeded, and how many were dropped
//! because a subscriber fell behind.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for event bus observability
///
/// A single publish with N matching subscribers counts once in `published`
/// and up to N times across `delivered` and `dropped`.
///
/// # Example
///
/// ```
/// use rust_event_logger::BusMetrics;
///
/// let metrics = BusMetrics::new();
///
/// metrics.record_published();
/// metrics.record_delivered();
///
/// assert_eq!(metrics.published(), 1);
/// assert_eq!(metrics.delivered(), 1);
/// ```
#[derive(Debug)]
pub struct BusMetrics {
    /// Events handed to the bus
    published: AtomicU64,

    /// Events placed on a subscriber queue
    delivered: AtomicU64,

    /// Subscriber deliveries dropped on a full queue
    dropped: AtomicU64,

    /// Number of times a subscriber queue was found full
    queue_full_events: AtomicU64,

    /// Number of times the publisher blocked waiting for queue space
    block_events: AtomicU64,
}

impl BusMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            published: AtomicU64::new(0),
            delivered: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
            queue_full_events: AtomicU64::new(0),
            block_events: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn published(&self) -> u64 {
        self.published.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn delivered(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn queue_full_events(&self) -> u64 {
        self.queue_full_events.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn block_events(&self) -> u64 {
        self.block_events.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_published(&self) -> u64 {
        self.published.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_delivered(&self) -> u64 {
        self.delivered.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a dropped delivery, returning the previous total
    #[inline]
    pub fn record_dropped(&self) -> u64 {
        self.dropped.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_queue_full(&self) -> u64 {
        self.queue_full_events.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_block(&self) -> u64 {
        self.block_events.fetch_add(1, Ordering::Relaxed)
    }

    /// Get drop rate as a percentage (0.0 - 100.0)
    ///
    /// Returns 0.0 if nothing has been delivered or dropped.
    pub fn drop_rate(&self) -> f64 {
        let dropped = self.dropped() as f64;
        let total = self.delivered() as f64 + dropped;
        if total == 0.0 {
            0.0
        } else {
            (dropped / total) * 100.0
        }
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.published.store(0, Ordering::Relaxed);
        self.delivered.store(0, Ordering::Relaxed);
        self.dropped.store(0, Ordering::Relaxed);
        self.queue_full_events.store(0, Ordering::Relaxed);
        self.block_events.store(0, Ordering::Relaxed);
    }
}

impl Default for BusMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for BusMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            published: AtomicU64::new(self.published()),
            delivered: AtomicU64::new(self.delivered()),
            dropped: AtomicU64::new(self.dropped()),
            queue_full_events: AtomicU64::new(self.queue_full_events()),
            block_events: AtomicU64::new(self.block_events()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = BusMetrics::new();
        assert_eq!(metrics.published(), 0);
        assert_eq!(metrics.delivered(), 0);
        assert_eq!(metrics.dropped(), 0);
        assert_eq!(metrics.queue_full_events(), 0);
        assert_eq!(metrics.block_events(), 0);
    }

    #[test]
    fn test_metrics_record_dropped() {
        let metrics = BusMetrics::new();
        assert_eq!(metrics.record_dropped(), 0); // Returns previous value
        assert_eq!(metrics.dropped(), 1);
    }

    #[test]
    fn test_metrics_drop_rate() {
        let metrics = BusMetrics::new();
        assert_eq!(metrics.drop_rate(), 0.0);

        for _ in 0..90 {
            metrics.record_delivered();
        }
        for _ in 0..10 {
            metrics.record_dropped();
        }

        let rate = metrics.drop_rate();
        assert!((9.9..=10.1).contains(&rate), "Drop rate was {}", rate);
    }

    #[test]
    fn test_metrics_reset() {
        let metrics = BusMetrics::new();
        metrics.record_published();
        metrics.record_dropped();
        metrics.record_block();

        metrics.reset();

        assert_eq!(metrics.published(), 0);
        assert_eq!(metrics.dropped(), 0);
        assert_eq!(metrics.block_events(), 0);
    }

    #[test]
    fn test_metrics_clone_is_snapshot() {
        let metrics = BusMetrics::new();
        metrics.record_delivered();

        let snapshot = metrics.clone();
        metrics.record_delivered();

        assert_eq!(metrics.delivered(), 2);
        assert_eq!(snapshot.delivered(), 1);
    }
}
