//! The `registry` module maintains the live set of subscribers and provides
//! the race-free broadcast primitive.
//!
//! Connection handlers add and remove subscribers; the relay consumer
//! broadcasts processed messages. All access serializes through one mutex
//! around the `Registry`, and endpoints that fail during a broadcast are
//! evicted in the same critical section.

pub mod engine;

pub use engine::Registry;
