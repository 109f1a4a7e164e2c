//! Sharded buffering engine.

use std::sync::atomic::{AtomicBool, Ordering};

use super::distributor::Distributor;
use super::shard::Shard;
use crate::error_handling::{ConfigError, EngineError};

/// Fixed set of shards plus the distributor and the enabled flag.
///
/// `push` is safe from any number of concurrent callers and only takes the
/// lock of the shard it lands on. Once `disable` has been called every later
/// push fails with `EngineError::Disabled`; there is no way back.
#[derive(Debug)]
pub struct BufferEngine<R> {
    shards: Box<[Shard<R>]>,
    distributor: Distributor,
    enabled: AtomicBool,
}

impl<R> BufferEngine<R> {
    /// Creates an enabled engine with `shard_count` empty shards.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidShardCount` unless `shard_count` is a
    /// non-zero power of two.
    pub fn new(shard_count: usize) -> Result<Self, ConfigError> {
        let distributor = Distributor::new(shard_count)?;
        let shards = (0..shard_count).map(|_| Shard::new()).collect();
        Ok(BufferEngine {
            shards,
            distributor,
            enabled: AtomicBool::new(true),
        })
    }

    /// Buffers a record on the next shard in round-robin order.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Disabled` once shutdown has begun. The record is
    /// not routed to any shard in that case.
    pub fn push(&self, record: R) -> Result<(), EngineError> {
        if !self.is_enabled() {
            return Err(EngineError::Disabled);
        }
        // Re-checked under the shard lock: a drain that starts after `disable`
        // returns sees every record this admits.
        let shard = &self.shards[self.distributor.next_shard()];
        if shard.push_if(record, || self.is_enabled()) {
            Ok(())
        } else {
            Err(EngineError::Disabled)
        }
    }

    /// Permanently rejects further pushes.
    ///
    /// Returns `true` for the call that actually flipped the flag.
    pub fn disable(&self) -> bool {
        self.enabled.swap(false, Ordering::AcqRel)
    }

    /// Whether pushes are still accepted.
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Number of shards.
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// The shards, in index order.
    pub fn shards(&self) -> &[Shard<R>] {
        &self.shards
    }

    /// Records waiting across all shards.
    pub fn pending(&self) -> usize {
        self.shards.iter().map(Shard::len).sum()
    }
}
