//! In-memory storage backend.
//!
//! Keeps every saved record and the size of every save call. Used by the test
//! suites and handy for dry runs without a database.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use super::backend::{SaveContext, StorageBackend};
use crate::error_handling::StorageError;

/// Capturing backend with optional injected failures and latency.
#[derive(Debug)]
pub struct InMemoryBackend<R> {
    saved: Mutex<Vec<R>>,
    calls: Mutex<Vec<usize>>,
    failing_calls: HashSet<usize>,
    delay: Option<Duration>,
}

impl<R> InMemoryBackend<R> {
    /// Backend that accepts every save.
    pub fn new() -> Self {
        InMemoryBackend {
            saved: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
            failing_calls: HashSet::new(),
            delay: None,
        }
    }

    /// Makes the save calls with the given zero-based indices fail.
    pub fn failing_on(mut self, calls: impl IntoIterator<Item = usize>) -> Self {
        self.failing_calls.extend(calls);
        self
    }

    /// Sleeps for `delay` inside every save call before storing.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of records stored so far.
    pub fn count(&self) -> usize {
        self.saved
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Record count of every save call, in call order, failed calls included.
    pub fn call_sizes(&self) -> Vec<usize> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl<R: Clone> InMemoryBackend<R> {
    /// Every stored record, in save order.
    pub fn records(&self) -> Vec<R> {
        self.saved
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl<R> Default for InMemoryBackend<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R> StorageBackend<R> for InMemoryBackend<R>
where
    R: Clone + Send + Sync,
{
    async fn save(&self, ctx: &SaveContext, records: &[R]) -> Result<(), StorageError> {
        if records.is_empty() {
            return Ok(());
        }

        let call = {
            let mut calls = self.calls.lock().unwrap_or_else(PoisonError::into_inner);
            calls.push(records.len());
            calls.len() - 1
        };

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if ctx.is_cancelled() {
            return Err(StorageError::Cancelled);
        }
        if self.failing_calls.contains(&call) {
            return Err(StorageError::Backend(format!("injected failure on call {}", call)));
        }

        self.saved
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(records);
        Ok(())
    }
}
