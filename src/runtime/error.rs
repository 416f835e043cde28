//! Runtime error types.

use thiserror::Error;

/// Errors returned by a [`TimerHandle`](super::TimerHandle).
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The timer task has finished; the machine is done or was shut down
    #[error("Timer task is no longer running")]
    Closed,

    /// The timer task panicked or was cancelled
    #[error("Timer task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
