//! The `queue` module provides the durable FIFO store the relay pops from
//! and pushes to.
//!
//! Entries survive restarts; the store is the single source of truth for
//! message state. Currently backed by `sled`, an embedded key-value store.

pub mod sled_store;
pub mod store;

pub use sled_store::SledQueue;
pub use store::{QueueNames, QueueStore};

#[cfg(test)]
mod tests;
