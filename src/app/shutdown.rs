//! Graceful shutdown handling.

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::flush::{FlushHandle, FlushResult};

/// Resolves on Ctrl-C, or on SIGTERM on unix.
pub async fn wait_for_shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                log::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => log::info!("Received Ctrl-C"),
        _ = terminate => log::info!("Received SIGTERM"),
    }
}

/// Cancels `token` when a shutdown signal arrives.
pub fn spawn_signal_listener(token: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            _ = wait_for_shutdown_signal() => token.cancel(),
            _ = token.cancelled() => {}
        }
    })
}

/// Shuts down all background tasks gracefully.
///
/// Cancels `cancel` (a no-op if a signal already did), waits for the HTTP
/// server to stop accepting requests, then waits for the flush scheduler's
/// final flush.
pub async fn shutdown_gracefully(
    cancel: CancellationToken,
    server_task: Option<JoinHandle<Result<(), anyhow::Error>>>,
    flush: FlushHandle,
) -> Option<FlushResult> {
    cancel.cancel();

    if let Some(server_task) = server_task {
        match server_task.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => log::warn!("Server exited with error: {}", e),
            Err(join_error) => log::warn!("Server task panicked: {:?}", join_error),
        }
    }

    flush.done().await
}
