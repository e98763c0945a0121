//! Observability for the scoreboard feed
//!
//! Tracks recompute latency, broadcast volume, and viewer connections.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Rolling latency samples with a bounded window.
pub struct LatencyTracker {
    samples: VecDeque<u64>,
    capacity: usize,
}

impl LatencyTracker {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn record(&mut self, value: u64) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(value);
    }

    pub fn count(&self) -> usize {
        self.samples.len()
    }

    pub fn mean(&self) -> u64 {
        if self.samples.is_empty() {
            return 0;
        }
        self.samples.iter().sum::<u64>() / self.samples.len() as u64
    }

    pub fn max(&self) -> u64 {
        self.samples.iter().copied().max().unwrap_or(0)
    }
}

/// Core metrics for the feed service.
pub struct FeedMetrics {
    // Publishing
    pub pushes_published: AtomicU64,
    pub pushes_without_subscribers: AtomicU64,
    pub recompute_ns: Mutex<LatencyTracker>,

    // Viewers
    pub connected_clients: AtomicU64,
    pub lagged_disconnects: AtomicU64,
}

impl FeedMetrics {
    pub fn new() -> Self {
        Self {
            pushes_published: AtomicU64::new(0),
            pushes_without_subscribers: AtomicU64::new(0),
            recompute_ns: Mutex::new(LatencyTracker::new(1000)),
            connected_clients: AtomicU64::new(0),
            lagged_disconnects: AtomicU64::new(0),
        }
    }

    /// Record a delta published to a contest topic.
    pub fn record_push(&self, delivered: usize) {
        self.pushes_published.fetch_add(1, Ordering::Relaxed);
        if delivered == 0 {
            self.pushes_without_subscribers
                .fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record one score recompute.
    pub fn record_recompute(&self, latency_ns: u64) {
        if let Ok(mut tracker) = self.recompute_ns.lock() {
            tracker.record(latency_ns);
        }
    }

    pub fn client_connected(&self) {
        self.connected_clients.fetch_add(1, Ordering::Relaxed);
    }

    pub fn client_disconnected(&self) {
        self.connected_clients.fetch_sub(1, Ordering::Relaxed);
    }

    /// Record a viewer cut off for lagging behind its buffer.
    pub fn record_lagged_disconnect(&self) {
        self.lagged_disconnects.fetch_add(1, Ordering::Relaxed);
    }
}

impl Default for FeedMetrics {
    fn default() -> Self {
        Self::new()
    }
}
