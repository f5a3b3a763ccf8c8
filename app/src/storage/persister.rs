//! Ordered persistence of store snapshots
//!
//! Stores hand full-record writes to the [`Persister`] while they still hold
//! their write guard. In background mode a single worker task applies the
//! writes in submission order; callers do not wait for them.

use super::{KeyValueStore, StorageKey};
use crate::config::PersistMode;
use fitbuddy_shared::{StorageError, StorageResult};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

/// A full-record write
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Write {
    Set { key: StorageKey, value: String },
    Remove { key: StorageKey },
}

impl Write {
    pub fn set(key: StorageKey, value: impl Into<String>) -> Self {
        Write::Set {
            key,
            value: value.into(),
        }
    }

    /// Encode `value` as the JSON record for `key`
    pub fn json<T: Serialize + ?Sized>(key: StorageKey, value: &T) -> StorageResult<Self> {
        let value = serde_json::to_string(value).map_err(|e| StorageError::Encode {
            key: key.as_str().to_string(),
            message: e.to_string(),
        })?;
        Ok(Write::Set { key, value })
    }

    pub fn remove(key: StorageKey) -> Self {
        Write::Remove { key }
    }

    pub fn key(&self) -> StorageKey {
        match self {
            Write::Set { key, .. } | Write::Remove { key } => *key,
        }
    }
}

enum Job {
    Write(Write),
    Flush(oneshot::Sender<()>),
}

/// Persistence step shared by every store
#[derive(Clone)]
pub struct Persister {
    storage: Arc<dyn KeyValueStore>,
    queue: Option<mpsc::UnboundedSender<Job>>,
}

impl Persister {
    /// Create a persister; background mode spawns the worker on the current runtime
    pub fn new(storage: Arc<dyn KeyValueStore>, mode: PersistMode) -> Self {
        let queue = match mode {
            PersistMode::Inline => None,
            PersistMode::Background => {
                let (tx, rx) = mpsc::unbounded_channel();
                tokio::spawn(run_worker(storage.clone(), rx));
                Some(tx)
            }
        };
        Self { storage, queue }
    }

    pub fn storage(&self) -> &Arc<dyn KeyValueStore> {
        &self.storage
    }

    /// Fire-and-forget write; failures are logged and dropped
    pub async fn submit(&self, write: Write) {
        match &self.queue {
            Some(queue) => {
                if let Err(mpsc::error::SendError(job)) = queue.send(Job::Write(write)) {
                    // Worker is gone (runtime shutting down); write directly.
                    if let Job::Write(write) = job {
                        log_failure(apply(self.storage.as_ref(), &write).await, &write);
                    }
                }
            }
            None => log_failure(apply(self.storage.as_ref(), &write).await, &write),
        }
    }

    /// Encode and submit; an encode failure is logged
    pub async fn submit_json<T: Serialize + ?Sized>(&self, key: StorageKey, value: &T) {
        match Write::json(key, value) {
            Ok(write) => self.submit(write).await,
            Err(e) => warn!(key = %key, error = %e, "Failed to encode record"),
        }
    }

    /// Drain the queue, then apply `write` and report its outcome
    pub async fn commit(&self, write: Write) -> StorageResult<()> {
        self.flush().await;
        apply(self.storage.as_ref(), &write).await
    }

    pub async fn commit_json<T: Serialize + ?Sized>(&self, key: StorageKey, value: &T) -> StorageResult<()> {
        self.commit(Write::json(key, value)?).await
    }

    /// Wait until every queued write has been applied
    pub async fn flush(&self) {
        let Some(queue) = &self.queue else {
            return;
        };
        let (tx, rx) = oneshot::channel();
        if queue.send(Job::Flush(tx)).is_ok() {
            let _ = rx.await;
        }
    }

    /// Drain the queue and delete every record
    pub async fn clear_all(&self) -> StorageResult<()> {
        self.flush().await;
        self.storage.clear().await
    }
}

async fn run_worker(storage: Arc<dyn KeyValueStore>, mut rx: mpsc::UnboundedReceiver<Job>) {
    debug!("Persistence worker started");
    while let Some(job) = rx.recv().await {
        match job {
            Job::Write(write) => log_failure(apply(storage.as_ref(), &write).await, &write),
            Job::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
    debug!("Persistence worker stopped");
}

async fn apply(storage: &dyn KeyValueStore, write: &Write) -> StorageResult<()> {
    match write {
        Write::Set { key, value } => storage.set(key.as_str(), value).await,
        Write::Remove { key } => storage.remove(key.as_str()).await,
    }
}

fn log_failure(result: StorageResult<()>, write: &Write) {
    if let Err(e) = result {
        warn!(key = %write.key(), error = %e, "Failed to persist record");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryKeyValueStore;

    #[tokio::test]
    async fn test_background_writes_apply_in_order() {
        let storage = Arc::new(MemoryKeyValueStore::new());
        let persister = Persister::new(storage.clone(), PersistMode::Background);

        for i in 0..100 {
            persister.submit(Write::set(StorageKey::WaterGoal, i.to_string())).await;
        }
        persister.submit(Write::remove(StorageKey::Theme)).await;
        persister.flush().await;

        assert_eq!(
            storage.get(StorageKey::WaterGoal.as_str()).await.unwrap(),
            Some("99".to_string())
        );
    }

    #[tokio::test]
    async fn test_submit_swallows_failures() {
        let storage = Arc::new(MemoryKeyValueStore::new());
        storage.set_failing(true);
        let persister = Persister::new(storage.clone(), PersistMode::Inline);
        persister.submit(Write::set(StorageKey::Theme, "dark")).await;

        assert_eq!(
            persister.commit(Write::set(StorageKey::Theme, "dark")).await,
            Err(StorageError::Unavailable)
        );
    }

    #[tokio::test]
    async fn test_commit_lands_after_queued_writes() {
        let storage = Arc::new(MemoryKeyValueStore::new());
        let persister = Persister::new(storage.clone(), PersistMode::Background);

        persister.submit(Write::set(StorageKey::Theme, "light")).await;
        persister.commit(Write::set(StorageKey::Theme, "dark")).await.unwrap();

        assert_eq!(
            storage.get(StorageKey::Theme.as_str()).await.unwrap(),
            Some("dark".to_string())
        );
    }

    #[tokio::test]
    async fn test_json_write() {
        let write = Write::json(StorageKey::Favorites, &vec!["Plank"]).unwrap();
        assert_eq!(write, Write::set(StorageKey::Favorites, r#"["Plank"]"#));
    }
}
