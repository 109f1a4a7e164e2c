//! Error handling and flush statistics.
//!
//! This module provides:
//! - Error type definitions for the engine, storage, bootstrap and configuration
//! - Flush statistics tracking (records flushed, dropped, failed chunks)
//!
//! Storage errors never reach producers: the batch writer logs them and drops
//! the affected chunk. Only `EngineError` is caller-visible.

mod stats;
mod types;

// Re-export public API
pub use stats::FlushStats;
pub use types::{
    ConfigError, DatabaseError, EngineError, FlushCounter, InitializationError, StorageError,
};

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_flush_stats_initialization() {
        let stats = FlushStats::new();
        for counter in FlushCounter::iter() {
            assert_eq!(stats.get(counter), 0);
        }
    }

    #[test]
    fn test_flush_stats_increment() {
        let stats = FlushStats::new();
        stats.increment(FlushCounter::Flushes);
        stats.increment(FlushCounter::Flushes);
        stats.add(FlushCounter::RecordsFlushed, 1500);
        stats.add(FlushCounter::RecordsDropped, 1000);
        stats.increment(FlushCounter::ChunksFailed);

        assert_eq!(stats.get(FlushCounter::Flushes), 2);
        assert_eq!(stats.get(FlushCounter::RecordsFlushed), 1500);
        assert_eq!(stats.get(FlushCounter::RecordsDropped), 1000);
        assert_eq!(stats.get(FlushCounter::ChunksFailed), 1);
    }

    #[test]
    fn test_flush_stats_concurrent_increments() {
        let stats = std::sync::Arc::new(FlushStats::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let stats = std::sync::Arc::clone(&stats);
                std::thread::spawn(move || {
                    for _ in 0..1000 {
                        stats.increment(FlushCounter::RecordsFlushed);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("thread panicked");
        }
        assert_eq!(stats.get(FlushCounter::RecordsFlushed), 8000);
    }

    #[test]
    fn test_flush_stats_debug_lists_counters() {
        let stats = FlushStats::new();
        stats.increment(FlushCounter::ChunksFailed);
        let debug = format!("{:?}", stats);
        assert!(debug.contains("chunks_failed: 1"));
        assert!(debug.contains("records_flushed: 0"));
    }
}
