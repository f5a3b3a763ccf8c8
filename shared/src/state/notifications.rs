//! Bounded, newest-first notification list

use crate::models::Notification;
use crate::types::NewNotification;
use chrono::{DateTime, Utc};

pub const DEFAULT_MAX_NOTIFICATIONS: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct NotificationList {
    items: Vec<Notification>,
    unread: usize,
    cap: usize,
    last_id: u64,
}

impl Default for NotificationList {
    fn default() -> Self {
        Self::with_cap(DEFAULT_MAX_NOTIFICATIONS)
    }
}

impl NotificationList {
    pub fn with_cap(cap: usize) -> Self {
        Self {
            items: Vec::new(),
            unread: 0,
            cap: cap.max(1),
            last_id: 0,
        }
    }

    /// Replace the list with persisted entries.
    ///
    /// The unread count is always derived from the read flags.
    pub fn hydrate(&mut self, mut list: Vec<Notification>) {
        list.truncate(self.cap);
        self.last_id = list
            .iter()
            .filter_map(|n| n.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0)
            .max(self.last_id);
        self.items = list;
        self.recount();
    }

    /// Prepend a new unread notification and enforce the cap
    pub fn add(&mut self, new: NewNotification, now: DateTime<Utc>) -> Notification {
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let id = millis.max(self.last_id + 1);
        self.last_id = id;

        let notification = Notification {
            id: id.to_string(),
            kind: new.kind,
            title: new.title,
            message: new.message,
            timestamp: now,
            read: false,
            exercise_name: new.exercise_name,
        };
        self.items.insert(0, notification.clone());
        self.items.truncate(self.cap);
        self.recount();
        notification
    }

    /// Returns true if the notification was unread
    pub fn mark_read(&mut self, id: &str) -> bool {
        let Some(n) = self.items.iter_mut().find(|n| n.id == id && !n.read) else {
            return false;
        };
        n.read = true;
        self.recount();
        true
    }

    /// Returns true if anything changed
    pub fn mark_all_read(&mut self) -> bool {
        let changed = self.unread > 0;
        for n in &mut self.items {
            n.read = true;
        }
        self.unread = 0;
        changed
    }

    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        let changed = self.items.len() != before;
        if changed {
            self.recount();
        }
        changed
    }

    pub fn clear(&mut self) -> bool {
        let changed = !self.items.is_empty();
        self.items.clear();
        self.unread = 0;
        changed
    }

    pub fn unread_count(&self) -> usize {
        self.unread
    }

    pub fn as_slice(&self) -> &[Notification] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    fn recount(&mut self) {
        self.unread = self.items.iter().filter(|n| !n.read).count();
    }
}
