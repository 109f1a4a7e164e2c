//! HTTP front end.
//!
//! Provides two endpoints:
//! - `POST /ping` - submit one record for buffered persistence
//! - `GET /status` - JSON view of the buffer and flush counters
//!
//! Handlers only push into the engine; they never wait on storage.

mod handlers;
mod types;

use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use handlers::{ping_handler, status_handler};
pub use types::AppState;

/// Builds the router for the front end.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ping", post(ping_handler))
        .route("/status", get(status_handler))
        .with_state(state)
}

/// Binds `addr` and serves until `shutdown` is cancelled.
pub async fn start_server(
    addr: &str,
    state: AppState,
    shutdown: CancellationToken,
) -> Result<(), anyhow::Error> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind server to {}: {}", addr, e))?;
    serve(listener, state, shutdown).await
}

/// Serves on an already bound listener until `shutdown` is cancelled.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown: CancellationToken,
) -> Result<(), anyhow::Error> {
    if let Ok(addr) = listener.local_addr() {
        log::info!("Server listening on http://{}/", addr);
        log::info!("  - Submit: POST http://{}/ping", addr);
        log::info!("  - Status: GET http://{}/status", addr);
    }

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    log::info!("Server stopped accepting requests");
    Ok(())
}
