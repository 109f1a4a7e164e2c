//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_CHUNK_SIZE, DEFAULT_DATABASE_URL, DEFAULT_FLUSH_INTERVAL, DEFAULT_LISTEN_ADDR,
    DEFAULT_MAX_CONNECTIONS, DEFAULT_SHARD_COUNT, MAX_CHUNK_SIZE,
};
use crate::error_handling::ConfigError;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Service configuration.
///
/// Parsed from the command line (with environment fallbacks) by the binary, or
/// constructed programmatically by library users.
///
/// # Examples
///
/// ```no_run
/// use record_batcher::Config;
///
/// let config = Config {
///     shard_count: 8,
///     chunk_size: 500,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Parser)]
#[command(name = "record_batcher", version, about)]
pub struct Config {
    /// Database URL records are flushed to
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    pub database_url: String,

    /// Address the HTTP front end listens on
    #[arg(long = "listen", env = "LISTEN_ADDR", default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: String,

    /// Number of buffer shards (power of two)
    #[arg(long = "shards", default_value_t = DEFAULT_SHARD_COUNT)]
    pub shard_count: usize,

    /// Milliseconds between periodic flushes
    #[arg(long, default_value_t = DEFAULT_FLUSH_INTERVAL.as_millis() as u64)]
    pub flush_interval_ms: u64,

    /// Maximum records per backend save call
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    /// Maximum open database connections
    #[arg(long, default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain")]
    pub log_format: LogFormat,
}

impl Config {
    /// Checks the values the engine relies on.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the shard count is zero or not a power of two,
    /// if the chunk size is zero or larger than one `INSERT` can bind, or if
    /// the flush interval is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.shard_count.is_power_of_two() {
            return Err(ConfigError::InvalidShardCount(self.shard_count));
        }
        if self.chunk_size == 0 {
            return Err(ConfigError::InvalidChunkSize);
        }
        if self.chunk_size > MAX_CHUNK_SIZE {
            return Err(ConfigError::ChunkSizeTooLarge(self.chunk_size));
        }
        if self.flush_interval_ms == 0 {
            return Err(ConfigError::InvalidFlushInterval);
        }
        Ok(())
    }

    /// Interval between periodic flushes.
    pub fn flush_interval(&self) -> Duration {
        Duration::from_millis(self.flush_interval_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            shard_count: DEFAULT_SHARD_COUNT,
            flush_interval_ms: DEFAULT_FLUSH_INTERVAL.as_millis() as u64,
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}
