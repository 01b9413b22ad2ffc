//! The `relay` module drives the pipeline: popping from the durable queues,
//! deciding each message's fate, and fanning successes out to subscribers.
//!
//! `consumer` holds the control loop, `fate` the retry/dead-letter state
//! machine, `message` the wire record, and `backoff` the delay policy for
//! transient store failures.

pub mod backoff;
pub mod consumer;
pub mod fate;
pub mod message;

pub use backoff::Backoff;
pub use consumer::Relay;
pub use fate::{Fate, Outcome, RetryPolicy};
pub use message::Message;
