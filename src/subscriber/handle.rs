use tokio::sync::mpsc::UnboundedSender;
use tungstenite::protocol::Message as WsMessage;
use uuid::Uuid;

pub type SubscriberId = String;

/// A live delivery endpoint registered with the registry.
///
/// Each subscriber is identified by a unique `id` and reached through
/// `sender`, the outbound channel drained by its connection's writer task.
/// The underlying socket lifecycle is owned by the connection handler that
/// accepted it, not by the registry.
#[derive(Debug)]
pub struct Subscriber {
    /// Unique identifier for the subscriber connection.
    pub id: SubscriberId,

    /// Channel to send WebSocket messages to the subscriber.
    pub sender: UnboundedSender<WsMessage>,
}

impl Subscriber {
    pub fn new(sender: UnboundedSender<WsMessage>) -> Self {
        Self {
            id: format!("subscriber-{}", Uuid::new_v4()),
            sender,
        }
    }
}
