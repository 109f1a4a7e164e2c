//! Completion handle for a spawned flush scheduler.

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::types::FlushResult;

/// Owned by whoever orchestrates shutdown.
///
/// Cancelling the shutdown token moves the scheduler into its terminal state;
/// `done` resolves once the final flush has been written.
pub struct FlushHandle {
    pub(super) shutdown: CancellationToken,
    pub(super) completed: CancellationToken,
    pub(super) done: oneshot::Receiver<FlushResult>,
    pub(super) task: JoinHandle<()>,
}

impl FlushHandle {
    /// Token that triggers shutdown when cancelled.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Token cancelled after the final flush completes. Clones can be handed
    /// to any number of waiters.
    pub fn completion_token(&self) -> CancellationToken {
        self.completed.clone()
    }

    /// True once the scheduler task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Waits for the scheduler to exit and returns the final flush result.
    ///
    /// Returns `None` if the scheduler task ended without reporting, which
    /// only happens if it panicked or was aborted. A panicked scheduler leaves
    /// the engine disabled.
    pub async fn done(self) -> Option<FlushResult> {
        match self.done.await {
            Ok(result) => {
                let _ = self.task.await;
                Some(result)
            }
            Err(_) => {
                if let Err(join_error) = self.task.await {
                    log::error!("Flush scheduler task failed: {:?}", join_error);
                }
                None
            }
        }
    }

    /// Triggers shutdown and waits for the final flush.
    pub async fn shutdown(self) -> Option<FlushResult> {
        self.shutdown.cancel();
        self.done().await
    }
}
