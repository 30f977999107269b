//! Unified error types surfaced by the runtime API.
//!
//! Rule rejections are not errors at this level: they are replied to the
//! offending client and the call succeeds. What remains are infrastructure
//! failures that the caller has to act on.

use thiserror::Error;
use tokio::sync::oneshot;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("room worker command channel closed")]
    CommandChannelClosed,

    #[error("room worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("room {room} failed its invariant check after {command}: {source}")]
    CorruptState {
        room: String,
        command: String,
        #[source]
        source: uno_core::InvariantViolation,
    },
}
