//! Error types used across the relay.
//!
//! Failures intrinsic to a single message (payload parse, delivery) never
//! surface here; they are resolved by the retry/dead-letter state machine.
//! These types cover the infrastructure seams: the durable store, the
//! submission gateway, and process startup.

use thiserror::Error;

/// Failures talking to the durable queue store.
#[derive(Debug, Error)]
pub enum QueueError {
    /// The underlying store rejected the operation or is unavailable.
    #[error("queue store error: {0}")]
    Store(#[from] sled::Error),

    /// A message could not be encoded for storage.
    #[error("failed to encode message: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Rejections produced by the submission gateway.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Submissions must name the event they carry.
    #[error("event name must not be empty")]
    EmptyEvent,

    #[error(transparent)]
    Queue(#[from] QueueError),
}

/// Fatal startup failures, surfaced before the relay loop begins.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    #[error(transparent)]
    Queue(#[from] QueueError),
}
