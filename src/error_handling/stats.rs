//! Flush statistics tracking.
//!
//! This module provides thread-safe counters aggregated across flush cycles,
//! read by the status endpoint and the shutdown summary.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::FlushCounter;

/// Thread-safe flush statistics tracker.
///
/// Every `FlushCounter` is initialized to zero on creation, so lookups never
/// miss. Shared between the scheduler task and the HTTP front end via `Arc`.
pub struct FlushStats {
    counters: HashMap<FlushCounter, AtomicUsize>,
}

impl FlushStats {
    /// All counters at zero.
    pub fn new() -> Self {
        let mut counters = HashMap::new();
        for counter in FlushCounter::iter() {
            counters.insert(counter, AtomicUsize::new(0));
        }

        FlushStats { counters }
    }

    /// Adds `n` to a counter.
    pub fn add(&self, counter: FlushCounter, n: usize) {
        if let Some(c) = self.counters.get(&counter) {
            c.fetch_add(n, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment counter {:?} which is not in the map. \
                 This indicates a bug in FlushStats initialization.",
                counter
            );
        }
    }

    /// Increments a counter by one.
    pub fn increment(&self, counter: FlushCounter) {
        self.add(counter, 1);
    }

    /// Current value of a counter.
    pub fn get(&self, counter: FlushCounter) -> usize {
        self.counters
            .get(&counter)
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }
}

impl Default for FlushStats {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FlushStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = f.debug_struct("FlushStats");
        for counter in FlushCounter::iter() {
            s.field(counter.as_str(), &self.get(counter));
        }
        s.finish()
    }
}
