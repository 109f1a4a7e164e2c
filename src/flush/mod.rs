//! Flushing buffered records to storage.
//!
//! - `BatchWriter` splits a drained batch into bounded chunks and saves them.
//! - `FlushScheduler` drives full flushes on a timer and once more on shutdown.
//! - `FlushHandle` lets the caller trigger shutdown and wait for the final flush.

mod handle;
mod scheduler;
mod types;
mod writer;

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::buffer::BufferEngine;
use crate::config::Config;
use crate::error_handling::FlushStats;
use crate::storage::StorageBackend;

pub use handle::FlushHandle;
pub use scheduler::FlushScheduler;
pub use types::FlushResult;
pub use writer::BatchWriter;

/// Starts the flush scheduler task for `engine`.
///
/// Flushes every `config.flush_interval()` in chunks of `config.chunk_size`,
/// recording into `stats`. Cancelling `shutdown` disables the engine and
/// triggers the final flush; await `FlushHandle::done` for its completion.
pub fn start_flush_scheduler<R, B>(
    engine: Arc<BufferEngine<R>>,
    backend: Arc<B>,
    stats: Arc<FlushStats>,
    config: &Config,
    shutdown: CancellationToken,
) -> FlushHandle
where
    R: Send + Sync + 'static,
    B: StorageBackend<R> + 'static,
{
    let writer = BatchWriter::new(backend, config.chunk_size).with_stats(stats);
    FlushScheduler::new(engine, writer, config.flush_interval()).spawn(shutdown)
}
