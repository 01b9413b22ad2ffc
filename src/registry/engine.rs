use std::collections::HashMap;

use tracing::warn;
use tungstenite::protocol::Message as WsMessage;

use crate::relay::message::Message;
use crate::subscriber::{Subscriber, SubscriberId};

/// The live set of delivery endpoints.
///
/// The registry maintains every currently connected subscriber and provides
/// the broadcast primitive the relay uses for fan-out. Callers share one
/// instance behind a mutex, so all three operations serialize on a single
/// mutual-exclusion domain and no caller can observe a half-evicted set.
#[derive(Debug, Default)]
pub struct Registry {
    subscribers: HashMap<SubscriberId, Subscriber>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            subscribers: HashMap::new(),
        }
    }

    /// Inserts a subscriber. Re-adding an already present handle leaves the
    /// set unchanged.
    pub fn add(&mut self, subscriber: Subscriber) {
        self.subscribers
            .entry(subscriber.id.clone())
            .or_insert(subscriber);
    }

    /// Deletes a subscriber. Removing an absent handle is a no-op.
    pub fn remove(&mut self, id: &SubscriberId) {
        self.subscribers.remove(id);
    }

    /// Delivers `msg` to every current subscriber and returns the number of
    /// successful deliveries.
    ///
    /// A subscriber whose channel is gone is evicted in the same critical
    /// section; per-member failures never abort delivery to the others.
    /// Delivery is a non-blocking handoff to the subscriber's writer task,
    /// so one stalled connection cannot stall the broadcast or block
    /// concurrent connects and disconnects.
    pub fn broadcast(&mut self, msg: &Message) -> usize {
        let text = match serde_json::to_string(msg) {
            Ok(json) => json,
            Err(e) => {
                warn!("failed to serialize message for broadcast: {e}");
                return 0;
            }
        };
        let ws_msg = WsMessage::text(text);

        let mut delivered = 0;
        let mut dead = Vec::new();
        for (id, subscriber) in &self.subscribers {
            if subscriber.sender.send(ws_msg.clone()).is_ok() {
                delivered += 1;
            } else {
                dead.push(id.clone());
            }
        }
        for id in dead {
            warn!("evicting unreachable subscriber {id}");
            self.subscribers.remove(&id);
        }
        delivered
    }

    pub fn contains(&self, id: &SubscriberId) -> bool {
        self.subscribers.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}
