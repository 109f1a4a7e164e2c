//! Chunked hand-off of drained batches to a storage backend.

use std::sync::Arc;

use crate::error_handling::{FlushCounter, FlushStats};
use crate::storage::{SaveContext, StorageBackend};

use super::types::FlushResult;

/// Splits drained batches into bounded chunks and saves them one by one.
pub struct BatchWriter<B> {
    backend: Arc<B>,
    chunk_size: usize,
    stats: Arc<FlushStats>,
}

impl<B> BatchWriter<B> {
    /// Creates a writer that saves at most `chunk_size` records per call.
    /// A chunk size of zero is treated as one.
    pub fn new(backend: Arc<B>, chunk_size: usize) -> Self {
        BatchWriter {
            backend,
            chunk_size: chunk_size.max(1),
            stats: Arc::new(FlushStats::new()),
        }
    }

    /// Shares an existing statistics tracker instead of a private one.
    pub fn with_stats(mut self, stats: Arc<FlushStats>) -> Self {
        self.stats = stats;
        self
    }

    /// Counters updated by every write.
    pub fn stats(&self) -> &Arc<FlushStats> {
        &self.stats
    }

    /// Maximum records per save call.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Saves `records` in contiguous chunks, sequentially, in order.
    ///
    /// A failed chunk is logged and dropped; the remaining chunks are still
    /// attempted. Nothing is retried or re-queued. Empty input issues no
    /// save calls.
    pub async fn write<R>(&self, ctx: &SaveContext, records: Vec<R>) -> FlushResult
    where
        B: StorageBackend<R>,
        R: Send + Sync,
    {
        let mut result = FlushResult {
            total: records.len(),
            ..Default::default()
        };
        if records.is_empty() {
            return result;
        }

        for (index, chunk) in records.chunks(self.chunk_size).enumerate() {
            result.chunks += 1;
            match self.backend.save(ctx, chunk).await {
                Ok(()) => {
                    result.successful += chunk.len();
                }
                Err(e) => {
                    log::error!(
                        "Failed to save chunk {} ({} records), dropping it: {}",
                        index,
                        chunk.len(),
                        e
                    );
                    result.failed += chunk.len();
                    result.failed_chunks += 1;
                }
            }
        }

        self.stats
            .add(FlushCounter::RecordsFlushed, result.successful);
        self.stats.add(FlushCounter::RecordsDropped, result.failed);
        self.stats
            .add(FlushCounter::ChunksFailed, result.failed_chunks);

        if result.failed > 0 {
            log::warn!(
                "Batch write completed: {} successful, {} dropped out of {} total",
                result.successful,
                result.failed,
                result.total
            );
        } else {
            log::debug!(
                "Saved {} records in {} chunks",
                result.successful,
                result.chunks
            );
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryBackend;

    fn numbered(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[tokio::test]
    async fn test_chunk_count_is_ceiling() {
        for (m, expected_calls) in [(1, 1), (999, 1), (1000, 1), (1001, 2), (2500, 3), (3000, 3)] {
            let backend: Arc<InMemoryBackend<usize>> = Arc::new(InMemoryBackend::new());
            let writer = BatchWriter::new(Arc::clone(&backend), 1000);

            let result = writer.write(&SaveContext::new(), numbered(m)).await;

            let sizes = backend.call_sizes();
            assert_eq!(sizes.len(), expected_calls, "m = {}", m);
            assert!(sizes.iter().all(|&s| s <= 1000));
            assert_eq!(sizes.iter().sum::<usize>(), m);
            assert_eq!(result.chunks, expected_calls);
            assert_eq!(result.successful, m);
        }
    }

    #[tokio::test]
    async fn test_chunks_cover_input_in_order() {
        let backend: Arc<InMemoryBackend<usize>> = Arc::new(InMemoryBackend::new());
        let writer = BatchWriter::new(Arc::clone(&backend), 7);

        writer.write(&SaveContext::new(), numbered(50)).await;

        assert_eq!(backend.records(), numbered(50));
        assert_eq!(backend.call_sizes(), vec![7, 7, 7, 7, 7, 7, 7, 1]);
    }

    #[tokio::test]
    async fn test_empty_input_makes_no_calls() {
        let backend: Arc<InMemoryBackend<usize>> = Arc::new(InMemoryBackend::new());
        let writer = BatchWriter::new(Arc::clone(&backend), 1000);

        let result = writer.write(&SaveContext::new(), Vec::new()).await;

        assert!(result.is_empty());
        assert_eq!(result.chunks, 0);
        assert!(backend.call_sizes().is_empty());
    }

    #[tokio::test]
    async fn test_failed_chunk_is_dropped_and_rest_continue() {
        let backend: Arc<InMemoryBackend<usize>> = Arc::new(InMemoryBackend::new().failing_on([1]));
        let writer = BatchWriter::new(Arc::clone(&backend), 10);

        let result = writer.write(&SaveContext::new(), numbered(30)).await;

        assert_eq!(backend.call_sizes(), vec![10, 10, 10]);
        let expected: Vec<usize> = (0..10).chain(20..30).collect();
        assert_eq!(backend.records(), expected);
        assert_eq!(result.successful, 20);
        assert_eq!(result.failed, 10);
        assert_eq!(result.failed_chunks, 1);

        let stats = writer.stats();
        assert_eq!(stats.get(FlushCounter::RecordsFlushed), 20);
        assert_eq!(stats.get(FlushCounter::RecordsDropped), 10);
        assert_eq!(stats.get(FlushCounter::ChunksFailed), 1);
    }

    #[tokio::test]
    async fn test_zero_chunk_size_is_clamped() {
        let backend: Arc<InMemoryBackend<usize>> = Arc::new(InMemoryBackend::new());
        let writer = BatchWriter::new(Arc::clone(&backend), 0);
        assert_eq!(writer.chunk_size(), 1);

        writer.write(&SaveContext::new(), numbered(3)).await;
        assert_eq!(backend.call_sizes(), vec![1, 1, 1]);
    }
}
