use std::time::Duration;

use async_trait::async_trait;

use crate::utils::error::QueueError;

/// Derived names for the three logical lists backing one relay queue.
///
/// A queue is identified by a base name; the retry and dead-letter lists
/// live under `<base>_retry` and `<base>_dlq`.
#[derive(Debug, Clone)]
pub struct QueueNames {
    base: String,
    retry: String,
    dlq: String,
}

impl QueueNames {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.to_string(),
            retry: format!("{base}_retry"),
            dlq: format!("{base}_dlq"),
        }
    }

    /// Newly submitted, not-yet-attempted messages.
    pub fn primary(&self) -> &str {
        &self.base
    }

    /// Messages that failed processing but still have retry budget.
    pub fn retry(&self) -> &str {
        &self.retry
    }

    /// Terminal list for messages that exhausted their retries.
    pub fn dead_letter(&self) -> &str {
        &self.dlq
    }
}

/// Minimal interface the relay needs from a durable FIFO store.
///
/// The store is the single source of truth for message state and may be
/// written by any number of producers while the relay consumes. Pops must
/// be atomic; the relay relies on that guarantee rather than re-implementing
/// it.
#[async_trait]
pub trait QueueStore: Send + Sync + 'static {
    /// Appends an entry to the tail of `queue`.
    fn push(&self, queue: &str, raw: &[u8]) -> Result<(), QueueError>;

    /// Atomically removes and returns the head of `queue`, if any.
    fn try_pop(&self, queue: &str) -> Result<Option<Vec<u8>>, QueueError>;

    /// Like [`QueueStore::try_pop`], but waits up to `timeout` for an entry
    /// to arrive. `None` after the timeout means "nothing to do", not an
    /// error.
    async fn pop_wait(
        &self,
        queue: &str,
        timeout: Duration,
    ) -> Result<Option<Vec<u8>>, QueueError>;

    /// Number of entries currently parked in `queue`.
    fn len(&self, queue: &str) -> Result<usize, QueueError>;
}
