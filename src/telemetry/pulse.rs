// Wheel sensor pulse counter
//
// The producer side runs in interrupt context (or whatever thread the
// platform delivers edge callbacks on), so `record_edge` is a single relaxed
// fetch_add and nothing else. The consumer drains with an atomic swap, so a
// pulse landing mid-sample is counted in this cycle or the next, never lost
// and never counted twice.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// Consumer side, owned by the kinematics estimator
#[derive(Debug, Default)]
pub struct PulseCounter {
    count: Arc<AtomicU32>,
}

/// Producer side, attached as the rising-edge callback
#[derive(Debug, Clone)]
pub struct PulseHandle {
    count: Arc<AtomicU32>,
}

impl PulseCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for the edge interrupt to increment
    pub fn handle(&self) -> PulseHandle {
        PulseHandle {
            count: Arc::clone(&self.count),
        }
    }

    /// Drain the accumulated count, resetting it to zero atomically
    pub fn take(&self) -> u32 {
        self.count.swap(0, Ordering::Relaxed)
    }

    /// Current count without resetting
    pub fn peek(&self) -> u32 {
        self.count.load(Ordering::Relaxed)
    }
}

impl PulseHandle {
    /// Called once per rising edge. Wrapping on overflow is fine; the
    /// counter is drained every control cycle.
    pub fn record_edge(&self) {
        self.count.fetch_add(1, Ordering::Relaxed);
    }
}
