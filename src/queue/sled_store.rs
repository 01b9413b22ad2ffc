use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use sled::Db;
use tokio::sync::Notify;
use tokio::time::Instant;

use super::store::QueueStore;
use crate::utils::error::QueueError;

/// Durable FIFO queues on top of a sled database.
///
/// One sled tree per queue name. Entries are keyed by a database-wide
/// monotonic id in big-endian form, so tree order is insertion order and
/// `pop_min` removes the head atomically. Waiting pops park on a per-queue
/// [`Notify`] that `push` signals, bounded by the caller's timeout.
#[derive(Clone)]
pub struct SledQueue {
    db: Db,
    wakers: Arc<Mutex<HashMap<String, Arc<Notify>>>>,
}

impl SledQueue {
    /// Opens (or creates) the database at `path`.
    pub fn open(path: &str) -> Result<Self, QueueError> {
        let db = sled::open(path)?;
        Ok(Self {
            db,
            wakers: Arc::new(Mutex::new(HashMap::new())),
        })
    }

    fn waker(&self, queue: &str) -> Arc<Notify> {
        let mut wakers = self.wakers.lock().unwrap();
        wakers.entry(queue.to_string()).or_default().clone()
    }
}

#[async_trait]
impl QueueStore for SledQueue {
    fn push(&self, queue: &str, raw: &[u8]) -> Result<(), QueueError> {
        let tree = self.db.open_tree(queue)?;
        let id = self.db.generate_id()?;
        tree.insert(id.to_be_bytes(), raw)?;
        self.waker(queue).notify_one();
        Ok(())
    }

    fn try_pop(&self, queue: &str) -> Result<Option<Vec<u8>>, QueueError> {
        let tree = self.db.open_tree(queue)?;
        Ok(tree.pop_min()?.map(|(_, value)| value.to_vec()))
    }

    async fn pop_wait(
        &self,
        queue: &str,
        timeout: Duration,
    ) -> Result<Option<Vec<u8>>, QueueError> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(raw) = self.try_pop(queue)? {
                return Ok(Some(raw));
            }
            if Instant::now() >= deadline {
                return Ok(None);
            }
            // A push between try_pop and notified() leaves a stored permit,
            // so the wakeup cannot be lost.
            let waker = self.waker(queue);
            tokio::select! {
                _ = waker.notified() => {}
                _ = tokio::time::sleep_until(deadline) => return self.try_pop(queue),
            }
        }
    }

    fn len(&self, queue: &str) -> Result<usize, QueueError> {
        Ok(self.db.open_tree(queue)?.len())
    }
}

impl std::fmt::Debug for SledQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SledQueue").field("db", &"sled::Db").finish()
    }
}
