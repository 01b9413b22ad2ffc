use std::sync::{Arc, Mutex};
use std::time::Duration;

use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::backoff::Backoff;
use super::fate::{Fate, Outcome, RetryPolicy};
use super::message::Message;
use crate::queue::{QueueNames, QueueStore};
use crate::registry::Registry;
use crate::utils::error::QueueError;

/// Why a single processing attempt failed.
#[derive(Debug, Error)]
enum ProcessError {
    #[error("payload did not parse: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("no subscribers received the message")]
    NoSubscribers,
}

/// The consumer side of the relay.
///
/// Pops messages from the durable queues, runs each through one processing
/// attempt, and routes failures through the retry/dead-letter state
/// machine. Successes are fanned out to the registry and discarded.
pub struct Relay<S: QueueStore> {
    store: Arc<S>,
    registry: Arc<Mutex<Registry>>,
    queues: QueueNames,
    policy: RetryPolicy,
    pop_timeout: Duration,
    backoff: Backoff,
    require_json_payload: bool,
    token: CancellationToken,
}

impl<S: QueueStore> Relay<S> {
    pub fn new(
        store: Arc<S>,
        registry: Arc<Mutex<Registry>>,
        queues: QueueNames,
        policy: RetryPolicy,
        token: CancellationToken,
    ) -> Self {
        Self {
            store,
            registry,
            queues,
            policy,
            pop_timeout: Duration::from_secs(5),
            backoff: Backoff::default(),
            require_json_payload: false,
            token,
        }
    }

    /// Bounds the blocking pop on the primary queue. The timeout doubles as
    /// the shutdown-check heartbeat.
    pub fn pop_timeout(mut self, timeout: Duration) -> Self {
        self.pop_timeout = timeout;
        self
    }

    /// Requires payloads to parse as JSON; a parse failure is a processing
    /// failure and enters the retry ladder.
    pub fn require_json_payload(mut self, require: bool) -> Self {
        self.require_json_payload = require;
        self
    }

    /// Overrides the backoff applied to transient store failures.
    pub fn backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    /// Runs until the cancellation token fires.
    ///
    /// Each iteration performs at most one unit of work (pop, process,
    /// route). Cancellation is honored only between units, so a popped
    /// message is never abandoned mid-flight. Transient store failures are
    /// logged and retried with backoff; they never terminate the loop.
    pub async fn run(self) {
        info!("relay consumer started on queue '{}'", self.queues.primary());
        let mut failures: u32 = 0;
        while !self.token.is_cancelled() {
            match self.next_unit().await {
                Ok(_) => failures = 0,
                Err(e) => {
                    failures += 1;
                    let delay = self.backoff.delay(failures);
                    warn!("queue store error (attempt {failures}): {e}; retrying in {delay:?}");
                    tokio::select! {
                        _ = tokio::time::sleep(delay) => {}
                        _ = self.token.cancelled() => {}
                    }
                }
            }
        }
        info!("relay consumer stopped");
    }

    /// Performs one unit of work. `Ok(None)` means the bounded pop timed
    /// out with nothing to do, which is a heartbeat rather than an error.
    ///
    /// Retry-due entries are drained ahead of fresh submissions; the ladder
    /// is bounded by `max_retries`, so retries cannot starve the primary
    /// queue indefinitely.
    pub(crate) async fn next_unit(&self) -> Result<Option<Outcome>, QueueError> {
        let raw = match self.store.try_pop(self.queues.retry())? {
            Some(raw) => raw,
            None => {
                match self
                    .store
                    .pop_wait(self.queues.primary(), self.pop_timeout)
                    .await?
                {
                    Some(raw) => raw,
                    None => return Ok(None),
                }
            }
        };
        Ok(Some(self.dispatch(raw).await))
    }

    /// Decodes and processes one popped entry, then routes it. Always runs
    /// to completion: the entry is already consumed from its source queue,
    /// so pushes that hit a transient store error are retried until they
    /// stick rather than dropping the message.
    async fn dispatch(&self, raw: Vec<u8>) -> Outcome {
        let msg = match Message::from_bytes(&raw) {
            Ok(msg) => msg,
            Err(e) => {
                // An entry without a decodable envelope carries no usable
                // retry counter, so the bounded ladder cannot apply. Park
                // it for inspection instead of dropping it.
                warn!("undecodable queue entry ({e}); moving to dead-letter queue");
                self.push_until_ok(self.queues.dead_letter(), &raw).await;
                return Outcome::DeadLettered { retry: 0 };
            }
        };

        match self.process(&msg) {
            Ok(delivered) => {
                debug!("delivered '{}' to {delivered} subscriber(s)", msg.event);
                Outcome::Delivered { delivered }
            }
            Err(reason) => {
                warn!(
                    "processing '{}' failed at retry {}: {reason}",
                    msg.event, msg.retry
                );
                match self.policy.after_failure(msg) {
                    Fate::Requeue(msg) => {
                        let retry = msg.retry;
                        self.push_message(self.queues.retry(), &msg).await;
                        Outcome::Retrying { retry }
                    }
                    Fate::DeadLetter(msg) => {
                        let retry = msg.retry;
                        error!("dead-lettering '{}' with retry count {retry}", msg.event);
                        self.push_message(self.queues.dead_letter(), &msg).await;
                        Outcome::DeadLettered { retry }
                    }
                }
            }
        }
    }

    /// One processing attempt: validate the payload, then broadcast.
    fn process(&self, msg: &Message) -> Result<usize, ProcessError> {
        if self.require_json_payload {
            serde_json::from_str::<serde_json::Value>(&msg.payload)?;
        }
        let delivered = self.registry.lock().unwrap().broadcast(msg);
        if delivered == 0 && self.policy.retry_on_no_subscribers {
            return Err(ProcessError::NoSubscribers);
        }
        Ok(delivered)
    }

    async fn push_message(&self, queue: &str, msg: &Message) {
        match msg.to_bytes() {
            Ok(raw) => self.push_until_ok(queue, &raw).await,
            Err(e) => error!("failed to re-encode message for '{queue}': {e}"),
        }
    }

    async fn push_until_ok(&self, queue: &str, raw: &[u8]) {
        let mut attempt: u32 = 0;
        loop {
            match self.store.push(queue, raw) {
                Ok(()) => return,
                Err(e) => {
                    attempt += 1;
                    let delay = self.backoff.delay(attempt);
                    warn!("push to '{queue}' failed (attempt {attempt}): {e}; retrying in {delay:?}");
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}
