//! Record submission handler.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::super::types::{AppState, ErrorResponse, MessageResponse};
use crate::storage::Record;

/// Accepts one `{"name": ...}` record and buffers it.
///
/// Malformed bodies are answered with 400 before reaching the engine. Once
/// shutdown has begun the engine rejects the record and the client gets 503.
pub async fn ping_handler(
    State(state): State<AppState>,
    payload: Result<Json<Record>, JsonRejection>,
) -> Response {
    let Json(record) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            log::debug!("Rejected malformed payload: {}", rejection.body_text());
            return StatusCode::BAD_REQUEST.into_response();
        }
    };

    match state.engine.push(record) {
        Ok(()) => (StatusCode::OK, Json(MessageResponse { message: "pong" })).into_response(),
        Err(e) => {
            log::debug!("Rejected record: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}
