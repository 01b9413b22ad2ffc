//! The submission gateway: the single entry point producers go through.
//!
//! Validates an inbound submission, stamps it with a zero retry counter and
//! the submission timestamp, and appends it to the primary queue.
//! Everything past this point belongs to the relay consumer.

use tracing::debug;

use crate::queue::QueueStore;
use crate::relay::message::Message;
use crate::utils::error::{QueueError, SubmitError};

/// Validates, stamps, and enqueues one raw submission. Returns the stamped
/// message on success.
pub fn submit<S: QueueStore>(
    store: &S,
    queue: &str,
    event: &str,
    payload: &str,
) -> Result<Message, SubmitError> {
    if event.trim().is_empty() {
        return Err(SubmitError::EmptyEvent);
    }

    let msg = Message::new(event, payload);
    let raw = msg.to_bytes().map_err(QueueError::from)?;
    store.push(queue, &raw)?;
    debug!("enqueued '{}' onto '{queue}'", msg.event);
    Ok(msg)
}
