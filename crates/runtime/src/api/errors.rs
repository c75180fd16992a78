//! Unified error types surfaced by the runtime API.
//!
//! Wraps rule violations from the engine together with worker coordination
//! and snapshot failures so clients can bubble them up with consistent
//! context.
use thiserror::Error;
use tokio::sync::oneshot;

use combat_core::{CombatError, InvariantViolation};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Combat(#[from] CombatError),

    #[error("encounter worker command channel closed")]
    CommandChannelClosed,

    #[error("encounter worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("encounter worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("encounter state is inconsistent")]
    InvalidState(#[from] InvariantViolation),

    #[error("failed to encode or decode encounter snapshot")]
    Snapshot(#[from] serde_json::Error),
}

impl RuntimeError {
    /// The engine's rejection, if this error is one.
    pub fn as_combat(&self) -> Option<&CombatError> {
        match self {
            RuntimeError::Combat(error) => Some(error),
            _ => None,
        }
    }

    /// Stable code for logging and client display.
    pub fn error_code(&self) -> &'static str {
        match self {
            RuntimeError::Combat(error) => error.error_code(),
            RuntimeError::CommandChannelClosed => "RUNTIME_COMMAND_CHANNEL_CLOSED",
            RuntimeError::ReplyChannelClosed(_) => "RUNTIME_REPLY_CHANNEL_CLOSED",
            RuntimeError::WorkerJoin(_) => "RUNTIME_WORKER_JOIN",
            RuntimeError::InvalidState(_) => "RUNTIME_INVALID_STATE",
            RuntimeError::Snapshot(_) => "RUNTIME_SNAPSHOT",
        }
    }
}
