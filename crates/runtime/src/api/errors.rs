//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, renderer adapters and dialog
//! input so clients can bubble them up with consistent context.
use std::time::Duration;

use thiserror::Error;
use tokio::sync::oneshot;

use game_core::{AnimationClip, Position};

use super::prompts::Prompt;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("session worker command channel closed")]
    CommandChannelClosed,

    #[error("session worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("session worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("runtime requires a dungeon before building")]
    MissingDungeon,

    #[error("runtime requires a visual factory before building")]
    MissingVisualFactory,

    #[error("runtime requires an acknowledger before building")]
    MissingAcknowledger,

    #[error(transparent)]
    Animation(#[from] AnimationError),

    #[error(transparent)]
    Acknowledgement(#[from] AckError),

    #[error("walk stalled at {position} after {waited:?} without progress")]
    Stalled { position: Position, waited: Duration },
}

/// Failure reported by a renderer adapter.
#[derive(Debug, Clone, Error)]
pub enum AnimationError {
    #[error("{entity} failed to play {clip}: {reason}")]
    Playback {
        entity: String,
        clip: AnimationClip,
        reason: String,
    },

    #[error("failed to load asset `{asset}`: {reason}")]
    AssetLoad { asset: String, reason: String },

    #[error("{entity} visual was disposed")]
    Disposed { entity: String },
}

/// Failure while waiting for a dialog acknowledgement.
#[derive(Debug, Error)]
pub enum AckError {
    #[error("acknowledgement source closed while showing {0}")]
    Closed(Prompt),

    #[error("failed to read acknowledgement")]
    Io(#[from] std::io::Error),
}
