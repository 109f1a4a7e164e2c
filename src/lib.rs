//! record_batcher library: buffered, batched record persistence
//!
//! Incoming records are accepted synchronously into a sharded in-memory
//! buffer and written to storage in bounded chunks, on a fixed interval and
//! once more when the service shuts down. Records accepted but not yet
//! flushed are lost if the process crashes.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use record_batcher::{BatchWriter, BufferEngine, FlushScheduler, InMemoryBackend, Record};
//! use tokio_util::sync::CancellationToken;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = Arc::new(BufferEngine::new(16)?);
//! let backend = Arc::new(InMemoryBackend::new());
//! let writer = BatchWriter::new(Arc::clone(&backend), 1000);
//! let handle = FlushScheduler::new(Arc::clone(&engine), writer, Duration::from_secs(1))
//!     .spawn(CancellationToken::new());
//!
//! engine.push(Record::new("a"))?;
//!
//! let final_flush = handle.shutdown().await;
//! println!("final flush: {:?}", final_flush);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

mod app;
mod buffer;
pub mod config;
mod error_handling;
mod flush;
pub mod initialization;
mod server;
mod storage;

// Re-export public API
pub use app::{shutdown_gracefully, spawn_signal_listener, wait_for_shutdown_signal};
pub use buffer::{BufferEngine, Distributor, Shard};
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::{
    ConfigError, DatabaseError, EngineError, FlushCounter, FlushStats, InitializationError,
    StorageError,
};
pub use flush::{start_flush_scheduler, BatchWriter, FlushHandle, FlushResult, FlushScheduler};
pub use run::{run_server, run_server_with, RunReport};
pub use server::{router, serve, start_server, AppState};
pub use storage::{
    init_db_pool, run_migrations, InMemoryBackend, Record, SaveContext, SqliteBackend,
    StorageBackend,
};

// Internal run module (wires the service together)
mod run {
    use anyhow::{Context, Result};
    use std::sync::Arc;

    use log::{info, warn};
    use tokio::net::TcpListener;
    use tokio_util::sync::CancellationToken;

    use crate::app::{log_flush_summary, shutdown_gracefully, spawn_signal_listener};
    use crate::buffer::BufferEngine;
    use crate::config::Config;
    use crate::error_handling::{FlushCounter, FlushStats};
    use crate::flush::{start_flush_scheduler, FlushResult};
    use crate::server::{self, AppState};
    use crate::storage::{init_db_pool, run_migrations, SqliteBackend};

    /// Results of a service run, reported after shutdown.
    #[derive(Debug, Clone)]
    pub struct RunReport {
        /// Result of the final flush, if the scheduler reported one
        pub final_flush: Option<FlushResult>,
        /// Flush cycles performed, the final one included
        pub flushes: usize,
        /// Records the backend accepted over the whole run
        pub records_flushed: usize,
        /// Records dropped because their chunk failed to save
        pub records_dropped: usize,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    /// Runs the service until Ctrl-C or SIGTERM.
    ///
    /// Binds `config.listen_addr`, then behaves like [`run_server_with`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the database cannot
    /// be opened or migrated, or the listen address cannot be bound.
    pub async fn run_server(config: Config) -> Result<RunReport> {
        config.validate().context("Invalid configuration")?;

        let listener = TcpListener::bind(&config.listen_addr)
            .await
            .with_context(|| format!("Failed to bind {}", config.listen_addr))?;

        let shutdown = CancellationToken::new();
        let signals = spawn_signal_listener(shutdown.clone());
        let report = run_server_with(config, listener, shutdown).await;
        signals.abort();
        report
    }

    /// Runs the service on `listener` until `shutdown` is cancelled.
    ///
    /// On shutdown the HTTP server stops accepting requests, the engine is
    /// disabled, one final flush is written and the pool is closed.
    ///
    /// # Errors
    ///
    /// Returns an error if startup fails, or if the HTTP server stops on its
    /// own (the final flush still runs first).
    pub async fn run_server_with(
        config: Config,
        listener: TcpListener,
        shutdown: CancellationToken,
    ) -> Result<RunReport> {
        config.validate().context("Invalid configuration")?;

        let pool = init_db_pool(&config.database_url, config.max_connections)
            .await
            .context("Failed to initialize database pool")?;
        run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;

        let engine = Arc::new(
            BufferEngine::new(config.shard_count).context("Failed to create buffer engine")?,
        );
        let stats = Arc::new(FlushStats::new());
        let backend = Arc::new(SqliteBackend::new(Arc::clone(&pool)));

        let start_time = std::time::Instant::now();
        let flush = start_flush_scheduler(
            Arc::clone(&engine),
            backend,
            Arc::clone(&stats),
            &config,
            shutdown.clone(),
        );

        let state = AppState::new(Arc::clone(&engine), Arc::clone(&stats));
        let mut server_task = tokio::spawn(server::serve(listener, state, shutdown.clone()));

        let server_exit = tokio::select! {
            _ = shutdown.cancelled() => None,
            result = &mut server_task => Some(result),
        };

        let server_error = match server_exit {
            None => {
                info!("Shutting down");
                None
            }
            Some(Ok(Ok(()))) => Some(anyhow::anyhow!("Server stopped unexpectedly")),
            Some(Ok(Err(e))) => Some(e),
            Some(Err(join_error)) => Some(anyhow::anyhow!("Server task panicked: {}", join_error)),
        };
        let server_task = if server_error.is_some() {
            warn!("Server exited before shutdown was requested; flushing buffered records");
            None
        } else {
            Some(server_task)
        };

        let final_flush = shutdown_gracefully(shutdown, server_task, flush).await;
        pool.close().await;
        log_flush_summary(start_time, &stats);

        if let Some(e) = server_error {
            return Err(e);
        }

        Ok(RunReport {
            final_flush,
            flushes: stats.get(FlushCounter::Flushes),
            records_flushed: stats.get(FlushCounter::RecordsFlushed),
            records_dropped: stats.get(FlushCounter::RecordsDropped),
            elapsed_seconds: start_time.elapsed().as_secs_f64(),
        })
    }
}
