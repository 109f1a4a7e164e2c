//! HTTP front end data structures.

use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

use crate::buffer::BufferEngine;
use crate::error_handling::FlushStats;
use crate::storage::Record;

/// Shared state for the HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Buffer the handlers push into
    pub engine: Arc<BufferEngine<Record>>,
    /// Counters reported by `/status`
    pub stats: Arc<FlushStats>,
    /// When the front end was created
    pub start_time: Arc<Instant>,
}

impl AppState {
    /// State over `engine`, with the uptime clock starting now.
    pub fn new(engine: Arc<BufferEngine<Record>>, stats: Arc<FlushStats>) -> Self {
        AppState {
            engine,
            stats,
            start_time: Arc::new(Instant::now()),
        }
    }
}

/// JSON response for an accepted record
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// JSON response for a rejected record
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// JSON response for `/status` endpoint
#[derive(Serialize)]
pub struct StatusResponse {
    pub enabled: bool,
    pub shard_count: usize,
    pub pending_records: usize,
    pub uptime_seconds: f64,
    pub flushes: FlushCounts,
}

#[derive(Serialize)]
pub struct FlushCounts {
    pub flushes: usize,
    pub records_flushed: usize,
    pub records_dropped: usize,
    pub chunks_failed: usize,
}
