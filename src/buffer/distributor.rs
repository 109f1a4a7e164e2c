//! Round-robin shard selection.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error_handling::ConfigError;

/// Assigns incoming records to shards with a wrapping atomic counter.
///
/// The shard count is a power of two, so `counter & mask` replaces a modulo.
/// Overflow of the counter only shifts which shard comes next.
#[derive(Debug)]
pub struct Distributor {
    counter: AtomicUsize,
    mask: usize,
}

impl Distributor {
    /// Creates a distributor over `shard_count` shards.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidShardCount` unless `shard_count` is a
    /// non-zero power of two.
    pub fn new(shard_count: usize) -> Result<Self, ConfigError> {
        if !shard_count.is_power_of_two() {
            return Err(ConfigError::InvalidShardCount(shard_count));
        }
        Ok(Distributor {
            counter: AtomicUsize::new(0),
            mask: shard_count - 1,
        })
    }

    /// Index of the shard the next record goes to.
    #[inline]
    pub fn next_shard(&self) -> usize {
        self.counter.fetch_add(1, Ordering::Relaxed).wrapping_add(1) & self.mask
    }

    /// Number of shards indices are spread over.
    pub fn shard_count(&self) -> usize {
        self.mask + 1
    }

    #[cfg(test)]
    fn starting_at(shard_count: usize, counter: usize) -> Self {
        Distributor {
            counter: AtomicUsize::new(counter),
            mask: shard_count - 1,
        }
    }
}
