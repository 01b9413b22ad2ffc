//! The `transport` module handles network communication with clients over
//! WebSockets.
//!
//! It defines the wire protocol between clients and the server, and
//! implements the WebSocket server itself: accepting connections,
//! registering each as a subscriber, and forwarding publishes to the
//! submission gateway.

pub mod message;
pub mod websocket;
