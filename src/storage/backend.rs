//! Storage backend contract.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error_handling::StorageError;

/// Cancellable execution context passed to every save call.
///
/// This is deliberately a different token from the shutdown signal: the
/// scheduler cancels it only after the final flush has finished, so shutting
/// down never aborts the saves that shutdown itself triggers.
#[derive(Debug, Clone, Default)]
pub struct SaveContext {
    token: CancellationToken,
}

impl SaveContext {
    /// Context with a fresh, uncancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing token, e.g. a child of an application-wide one.
    pub fn from_token(token: CancellationToken) -> Self {
        SaveContext { token }
    }

    /// Cancels in-flight and future saves.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Whether `cancel` has been called.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves once the context is cancelled.
    pub async fn cancelled(&self) {
        self.token.cancelled().await
    }
}

/// Persists bounded lists of records.
///
/// Calling `save` with an empty slice must be a no-op. The scheduler runs
/// flushes one after another, but `BatchWriter` can also be driven directly,
/// so implementations should tolerate concurrent calls.
#[async_trait]
pub trait StorageBackend<R>: Send + Sync
where
    R: Send + Sync,
{
    /// Saves one chunk of records.
    ///
    /// # Errors
    ///
    /// Any `StorageError`; the caller logs it and drops the chunk.
    async fn save(&self, ctx: &SaveContext, records: &[R]) -> Result<(), StorageError>;
}
