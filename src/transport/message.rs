use serde::{Deserialize, Serialize};

/// Messages clients send to the server.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    /// Submit an event for relaying. The server stamps the retry counter
    /// and timestamp; producers only name the event and carry the payload.
    #[serde(rename = "publish")]
    Publish {
        event: String,
        #[serde(rename = "data", alias = "payload")]
        payload: String,
    },
}

/// Replies the server sends back to a publishing client.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    /// The submission was accepted and enqueued.
    #[serde(rename = "published")]
    Published { event: String },

    /// The submission was rejected.
    #[serde(rename = "error")]
    Error { reason: String },
}
