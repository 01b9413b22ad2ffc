use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A queued event as it travels through the relay.
///
/// The wire representation is self-describing JSON so producers and the
/// relay can evolve independently as long as field names are preserved.
/// The payload travels under the wire name `data` for compatibility with
/// existing producers.
///
/// # Fields
///
/// - `event` - Short string identifying the message type/topic.
/// - `payload` - Opaque, application-defined content.
/// - `retry` - Number of prior redelivery attempts; 0 on first submission.
/// - `timestamp` - Unix timestamp (seconds) set once, at submission time.
///
/// # Example
///
/// ```rust
/// use relayq::relay::Message;
///
/// let msg = Message::new("order.created", "42");
/// assert_eq!(msg.retry, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub event: String,
    #[serde(rename = "data")]
    pub payload: String,
    #[serde(default)]
    pub retry: u32,
    pub timestamp: i64,
}

impl Message {
    /// Creates a freshly submitted message with a zero retry counter and
    /// the submission timestamp.
    pub fn new(event: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            payload: payload.into(),
            retry: 0,
            timestamp: Utc::now().timestamp(),
        }
    }

    /// Decodes a queue entry.
    pub fn from_bytes(raw: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(raw)
    }

    /// Encodes the message for storage.
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}
