//! A single lock-guarded buffer of pending records.

use std::sync::{PoisonError, RwLock};

/// Append-only buffer drained as a whole by the flush scheduler.
///
/// A shard cannot fail: a poisoned lock only means another thread panicked
/// mid-push, and the vector is still structurally valid, so it is recovered.
#[derive(Debug)]
pub struct Shard<R> {
    records: RwLock<Vec<R>>,
}

impl<R> Shard<R> {
    /// Empty shard.
    pub fn new() -> Self {
        Shard {
            records: RwLock::new(Vec::new()),
        }
    }

    /// Appends a record to the tail of the buffer.
    pub fn push(&self, record: R) {
        self.records
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record);
    }

    /// Appends a record only if `admit` returns `true` while the write lock is
    /// held. Returns whether the record was appended.
    pub fn push_if(&self, record: R, admit: impl FnOnce() -> bool) -> bool {
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        if !admit() {
            return false;
        }
        records.push(record);
        true
    }

    /// Removes and returns every record pending at the time of the call, in
    /// push order.
    ///
    /// The length is sampled under the read lock and at most that many records
    /// are removed under the write lock. Records pushed in between stay in the
    /// shard for the next drain. A concurrent drain may have taken some of the
    /// sampled records already, so the count is clamped to what is left.
    pub fn drain(&self) -> Vec<R> {
        let pending = self.len();
        if pending == 0 {
            return Vec::new();
        }

        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        let take = pending.min(records.len());
        records.drain(..take).collect()
    }

    /// Number of records waiting for the next drain.
    pub fn len(&self) -> usize {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// True if nothing is buffered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<R> Default for Shard<R> {
    fn default() -> Self {
        Self::new()
    }
}
