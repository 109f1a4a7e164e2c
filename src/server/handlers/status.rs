//! JSON status handler.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};

use super::super::types::{AppState, FlushCounts, StatusResponse};
use crate::error_handling::FlushCounter;

/// JSON status endpoint with buffer and flush counters
pub async fn status_handler(State(state): State<AppState>) -> Response {
    let response = StatusResponse {
        enabled: state.engine.is_enabled(),
        shard_count: state.engine.shard_count(),
        pending_records: state.engine.pending(),
        uptime_seconds: state.start_time.elapsed().as_secs_f64(),
        flushes: FlushCounts {
            flushes: state.stats.get(FlushCounter::Flushes),
            records_flushed: state.stats.get(FlushCounter::RecordsFlushed),
            records_dropped: state.stats.get(FlushCounter::RecordsDropped),
            chunks_failed: state.stats.get(FlushCounter::ChunksFailed),
        },
    };

    Json(response).into_response()
}
