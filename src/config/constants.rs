//! Configuration constants.
//!
//! This module defines the constants used as defaults throughout the application:
//! shard layout, flush cadence, chunk sizing and storage connection limits.

use std::time::Duration;

/// Default number of buffer shards.
/// Must be a power of two so the distributor can mask instead of dividing.
pub const DEFAULT_SHARD_COUNT: usize = 16;

/// Default interval between periodic flushes.
pub const DEFAULT_FLUSH_INTERVAL: Duration = Duration::from_secs(1);

/// Default maximum number of records handed to the backend in one save call.
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Bound parameters SQLite accepts in one statement.
pub const SQLITE_MAX_VARIABLES: usize = 32_766;

/// Bound parameters the records `INSERT` uses per row.
pub const PARAMETERS_PER_RECORD: usize = 1;

/// Largest chunk a single multi-row `INSERT` can carry.
pub const MAX_CHUNK_SIZE: usize = SQLITE_MAX_VARIABLES / PARAMETERS_PER_RECORD;

/// Default database URL when neither `--database-url` nor `DATABASE_URL` is set.
pub const DEFAULT_DATABASE_URL: &str = "sqlite:./records.db";

/// Default address the HTTP front end listens on.
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";

/// Maximum open connections in the database pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 50;

/// Name of the table records are persisted into.
pub const RECORDS_TABLE: &str = "records";
