//! Periodic and shutdown-triggered flushing.
//!
//! The scheduler has two states. While running, every tick of a fixed
//! interval drains all shards and writes the batches. When the shutdown token
//! is cancelled it disables the engine, runs exactly one final flush, cancels
//! the save context and reports completion. It never returns to running.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info};
use tokio::sync::oneshot;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::buffer::BufferEngine;
use crate::error_handling::{FlushCounter, FlushStats};
use crate::storage::{SaveContext, StorageBackend};

use super::handle::FlushHandle;
use super::types::FlushResult;
use super::writer::BatchWriter;

/// Drains a `BufferEngine` into a `BatchWriter`.
pub struct FlushScheduler<R, B> {
    engine: Arc<BufferEngine<R>>,
    writer: BatchWriter<B>,
    interval: Duration,
    ctx: SaveContext,
}

impl<R, B> FlushScheduler<R, B>
where
    R: Send + Sync + 'static,
    B: StorageBackend<R> + 'static,
{
    /// Scheduler over `engine`, flushing through `writer` every `interval`.
    pub fn new(engine: Arc<BufferEngine<R>>, writer: BatchWriter<B>, interval: Duration) -> Self {
        FlushScheduler {
            engine,
            writer,
            interval,
            ctx: SaveContext::new(),
        }
    }

    /// Uses `ctx` for save calls instead of a private context.
    pub fn with_context(mut self, ctx: SaveContext) -> Self {
        self.ctx = ctx;
        self
    }

    /// The engine being flushed.
    pub fn engine(&self) -> &Arc<BufferEngine<R>> {
        &self.engine
    }

    /// Counters shared with the writer.
    pub fn stats(&self) -> &Arc<FlushStats> {
        self.writer.stats()
    }

    /// Drains every shard in order and writes each non-empty batch.
    pub async fn flush(&self) -> FlushResult {
        let mut result = FlushResult::default();
        for (index, shard) in self.engine.shards().iter().enumerate() {
            let batch = shard.drain();
            if batch.is_empty() {
                continue;
            }
            debug!("Draining {} records from shard {}", batch.len(), index);
            result.merge(self.writer.write(&self.ctx, batch).await);
        }

        self.stats().increment(FlushCounter::Flushes);
        if !result.is_empty() {
            info!(
                "Flushed {} records ({} chunks, {} dropped)",
                result.total, result.chunks, result.failed
            );
        }
        result
    }

    /// Runs until `shutdown` is cancelled, then performs the final flush.
    pub async fn run(self, shutdown: CancellationToken) -> FlushResult {
        info!(
            "Started flush scheduler ({} shards, every {:?})",
            self.engine.shard_count(),
            self.interval
        );

        let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                _ = ticker.tick() => {
                    self.flush().await;
                }
            }
        }

        self.engine.disable();
        info!("Shutdown requested, running final flush");
        let result = self.flush().await;
        self.ctx.cancel();

        info!(
            "Exiting flush scheduler: final flush saved {} of {} records",
            result.successful, result.total
        );
        result
    }

    /// Spawns `run` on the tokio runtime.
    pub fn spawn(self, shutdown: CancellationToken) -> FlushHandle {
        let (done_tx, done_rx) = oneshot::channel();
        let completed = CancellationToken::new();
        let completed_signal = completed.clone();
        let shutdown_for_task = shutdown.clone();

        let exit_guard = ExitGuard {
            engine: Arc::clone(&self.engine),
            completed: completed_signal,
        };
        let task = tokio::spawn(async move {
            let result = self.run(shutdown_for_task).await;
            drop(exit_guard);
            let _ = done_tx.send(result);
        });

        FlushHandle {
            shutdown,
            completed,
            done: done_rx,
            task,
        }
    }
}

/// Releases completion waiters when the scheduler task ends. On panic it also
/// disables the engine, since nothing will drain the shards again.
struct ExitGuard<R> {
    engine: Arc<BufferEngine<R>>,
    completed: CancellationToken,
}

impl<R> Drop for ExitGuard<R> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            let stranded = self.engine.pending();
            self.engine.disable();
            log::error!(
                "Flush scheduler panicked; engine disabled with {} records unflushed",
                stranded
            );
        }
        self.completed.cancel();
    }
}
