//! Notification center

use crate::clock::Clock;
use crate::storage::{read_json, Persister, StorageKey, Write};
use fitbuddy_shared::state::NotificationList;
use fitbuddy_shared::{NewNotification, Notification, NotificationsSnapshot, StoreResult};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

pub struct NotificationStore {
    state: RwLock<NotificationList>,
    persister: Persister,
    clock: Arc<dyn Clock>,
    cap: usize,
}

impl NotificationStore {
    pub fn new(persister: Persister, clock: Arc<dyn Clock>, cap: usize) -> Self {
        Self {
            state: RwLock::new(NotificationList::with_cap(cap)),
            persister,
            clock,
            cap,
        }
    }

    #[instrument(skip(self))]
    pub async fn load(&self) -> StoreResult<()> {
        let list: Vec<Notification> =
            read_json(self.persister.storage().as_ref(), StorageKey::Notifications)
                .await?
                .unwrap_or_default();
        self.hydrate(list).await;
        Ok(())
    }

    /// Replace the list; the unread count is derived from the read flags
    pub async fn hydrate(&self, list: Vec<Notification>) {
        let mut state = self.state.write().await;
        state.hydrate(list);
        debug!(count = state.len(), unread = state.unread_count(), "Notifications hydrated");
    }

    #[instrument(skip(self, new), fields(kind = ?new.kind))]
    pub async fn add(&self, new: NewNotification) -> Notification {
        let mut state = self.state.write().await;
        let notification = state.add(new, self.clock.now());
        self.persist(&state).await;
        notification
    }

    pub async fn mark_read(&self, id: &str) -> bool {
        let mut state = self.state.write().await;
        let changed = state.mark_read(id);
        if changed {
            self.persist(&state).await;
        }
        changed
    }

    pub async fn mark_all_read(&self) -> bool {
        let mut state = self.state.write().await;
        let changed = state.mark_all_read();
        if changed {
            self.persist(&state).await;
        }
        changed
    }

    pub async fn delete(&self, id: &str) -> bool {
        let mut state = self.state.write().await;
        let changed = state.delete(id);
        if changed {
            self.persist(&state).await;
        }
        changed
    }

    pub async fn clear_all(&self) {
        let mut state = self.state.write().await;
        state.clear();
        self.persister
            .submit(Write::remove(StorageKey::Notifications))
            .await;
    }

    pub async fn unread_count(&self) -> usize {
        self.state.read().await.unread_count()
    }

    pub async fn snapshot(&self) -> NotificationsSnapshot {
        let state = self.state.read().await;
        NotificationsSnapshot {
            notifications: state.as_slice().to_vec(),
            unread_count: state.unread_count(),
        }
    }

    pub(crate) async fn reset(&self) {
        *self.state.write().await = NotificationList::with_cap(self.cap);
    }

    async fn persist(&self, state: &NotificationList) {
        self.persister
            .submit_json(StorageKey::Notifications, state.as_slice())
            .await;
    }
}
