//! Flush result summary.

/// Outcome of writing one or more drained batches.
///
/// `successful + failed == total` always holds; failed records are dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushResult {
    /// Records handed to the batch writer.
    pub total: usize,
    /// Save calls issued.
    pub chunks: usize,
    /// Records in chunks the backend accepted.
    pub successful: usize,
    /// Records in chunks the backend rejected.
    pub failed: usize,
    /// Save calls that returned an error.
    pub failed_chunks: usize,
}

impl FlushResult {
    /// Adds another result's counts into this one.
    pub fn merge(&mut self, other: FlushResult) {
        self.total += other.total;
        self.chunks += other.chunks;
        self.successful += other.successful;
        self.failed += other.failed;
        self.failed_chunks += other.failed_chunks;
    }

    /// True if the flush found nothing to write.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
