use super::message::Message;

/// Where a message goes after a failed processing attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fate {
    /// Re-enqueue onto the retry queue, counter already incremented.
    Requeue(Message),
    /// Retry budget exhausted; park on the dead-letter queue.
    DeadLetter(Message),
}

/// Terminal disposition of one processing attempt, for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Broadcast to `delivered` subscribers and discarded.
    Delivered { delivered: usize },
    /// Requeued carrying the given counter value.
    Retrying { retry: u32 },
    /// Parked on the dead-letter queue carrying the given counter value.
    DeadLettered { retry: u32 },
}

/// Bounded-retry policy: how many redeliveries a message is granted before
/// it is dead-lettered.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Inclusive upper bound on [`Message::retry`]. A message dead-letters
    /// carrying exactly this value and never re-enters the primary or
    /// retry queue.
    pub max_retries: u32,

    /// Treat a broadcast that reached zero subscribers as a processing
    /// failure. Off by default: with nobody connected a message counts as
    /// delivered, not retried.
    pub retry_on_no_subscribers: bool,
}

impl RetryPolicy {
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            retry_on_no_subscribers: false,
        }
    }

    /// Decides the fate of `msg` after a failed attempt.
    ///
    /// The counter is incremented exactly once per failure. While it stays
    /// below `max_retries` the message is requeued; once it reaches the
    /// bound it dead-letters.
    pub fn after_failure(&self, mut msg: Message) -> Fate {
        msg.retry = (msg.retry + 1).min(self.max_retries);
        if msg.retry < self.max_retries {
            Fate::Requeue(msg)
        } else {
            Fate::DeadLetter(msg)
        }
    }
}
