use std::sync::{Arc, Mutex};

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio_tungstenite::accept_async;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tungstenite::protocol::Message as WsMessage;

use super::message::{ClientMessage, ServerMessage};
use crate::gateway;
use crate::queue::{QueueNames, QueueStore};
use crate::registry::Registry;
use crate::subscriber::Subscriber;
use crate::utils::error::RelayError;

/// Accepts WebSocket connections until the token is cancelled.
///
/// Every accepted connection is registered as a live subscriber and
/// receives all broadcasts for as long as it stays connected. Text frames
/// sent by the client are parsed as [`ClientMessage`]; publishes go through
/// the submission gateway onto the primary queue. A bind failure is fatal
/// and surfaces immediately.
pub async fn start_websocket_server<S: QueueStore>(
    addr: &str,
    registry: Arc<Mutex<Registry>>,
    store: Arc<S>,
    queues: QueueNames,
    token: CancellationToken,
) -> Result<(), RelayError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| RelayError::Bind {
            addr: addr.to_string(),
            source,
        })?;

    info!("websocket server listening on ws://{addr}");

    loop {
        let (stream, peer) = tokio::select! {
            accepted = listener.accept() => match accepted {
                Ok(pair) => pair,
                Err(e) => {
                    warn!("failed to accept connection: {e}");
                    continue;
                }
            },
            _ = token.cancelled() => {
                info!("websocket server shutting down");
                return Ok(());
            }
        };

        let registry = registry.clone();
        let store = store.clone();
        let queues = queues.clone();

        tokio::spawn(async move {
            let ws_stream = match accept_async(stream).await {
                Ok(ws) => ws,
                Err(e) => {
                    warn!("websocket handshake with {peer} failed: {e}");
                    return;
                }
            };

            let (mut ws_sender, mut ws_receiver) = ws_stream.split();

            // Outbound channel drained by this connection's writer task.
            // Broadcasts hand frames to the channel without blocking; only
            // this task ever touches the socket's write half.
            let (tx, mut rx) = mpsc::unbounded_channel::<WsMessage>();
            let subscriber = Subscriber::new(tx.clone());
            let subscriber_id = subscriber.id.clone();

            // Register before reading anything so no broadcast is missed.
            registry.lock().unwrap().add(subscriber);
            info!("{subscriber_id} connected from {peer}");

            let writer_id = subscriber_id.clone();
            let writer = tokio::spawn(async move {
                while let Some(msg) = rx.recv().await {
                    if let Err(e) = ws_sender.send(msg).await {
                        warn!("write to {writer_id} failed: {e}");
                        break;
                    }
                }
            });

            // Read until the client goes away; a failed read means the
            // connection is gone. All exit paths fall through to the
            // deregistration below.
            while let Some(Ok(msg)) = ws_receiver.next().await {
                if !msg.is_text() {
                    continue;
                }
                let Ok(text) = msg.to_text() else { continue };
                let reply = match serde_json::from_str::<ClientMessage>(text) {
                    Ok(ClientMessage::Publish { event, payload }) => {
                        match gateway::submit(store.as_ref(), queues.primary(), &event, &payload) {
                            Ok(msg) => ServerMessage::Published { event: msg.event },
                            Err(e) => {
                                warn!("rejected publish from {subscriber_id}: {e}");
                                ServerMessage::Error {
                                    reason: e.to_string(),
                                }
                            }
                        }
                    }
                    Err(e) => {
                        warn!("invalid client message from {subscriber_id}: {e}");
                        ServerMessage::Error {
                            reason: "invalid message".to_string(),
                        }
                    }
                };
                if let Ok(json) = serde_json::to_string(&reply) {
                    let _ = tx.send(WsMessage::text(json));
                }
            }

            registry.lock().unwrap().remove(&subscriber_id);
            writer.abort();
            info!("{subscriber_id} disconnected");
        });
    }
}
