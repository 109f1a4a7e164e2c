//! Error type definitions.
//!
//! This module defines all error types used throughout the application, plus
//! the counters tracked by `FlushStats`.

use log::SetLoggerError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error returned by the buffering engine to producers.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// Shutdown has begun; the record was not accepted.
    #[error("engine disabled")]
    Disabled,
}

/// Error returned by a storage backend for one save call.
///
/// The batch writer treats every variant the same way: the chunk is logged
/// and dropped.
#[derive(Error, Debug)]
pub enum StorageError {
    /// SQL execution error.
    #[error("SQL error: {0}")]
    Database(#[from] sqlx::Error),

    /// The save context was cancelled before the save completed.
    #[error("save cancelled")]
    Cancelled,

    /// Any other backend failure.
    #[error("backend error: {0}")]
    Backend(String),
}

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Error types for database bootstrap.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error creating the database file.
    #[error("Database file creation error: {0}")]
    FileCreationError(String),

    /// SQL execution error.
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),
}

/// Invalid configuration values.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Shard count must be a non-zero power of two.
    #[error("shard count must be a power of two, got {0}")]
    InvalidShardCount(usize),

    /// Chunk size must be at least one record.
    #[error("chunk size must be greater than zero")]
    InvalidChunkSize,

    /// Chunk size exceeds what one SQLite statement can bind.
    #[error("chunk size {0} exceeds the SQLite limit of 32766 records per insert")]
    ChunkSizeTooLarge(usize),

    /// Flush interval must be non-zero.
    #[error("flush interval must be greater than zero")]
    InvalidFlushInterval,
}

/// Counters tracked across flush cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum FlushCounter {
    /// Completed flush cycles (periodic, manual and final).
    Flushes,
    /// Records the backend accepted.
    RecordsFlushed,
    /// Records dropped because their chunk failed to save.
    RecordsDropped,
    /// Save calls that returned an error.
    ChunksFailed,
}

impl std::fmt::Display for FlushCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FlushCounter {
    /// Label used in logs and in `/status`.
    pub fn as_str(&self) -> &'static str {
        match self {
            FlushCounter::Flushes => "flushes",
            FlushCounter::RecordsFlushed => "records_flushed",
            FlushCounter::RecordsDropped => "records_dropped",
            FlushCounter::ChunksFailed => "chunks_failed",
        }
    }
}
