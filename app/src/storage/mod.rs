//! Durable key-value storage
//!
//! Every store persists full JSON snapshots under a fixed [`StorageKey`].
//! The in-memory store state is the source of truth; storage failures are
//! logged by callers and only surface for explicit saves.

pub mod memory;
pub mod persister;
pub mod sqlite;

pub use memory::MemoryKeyValueStore;
pub use persister::{Persister, Write};
pub use sqlite::SqliteKeyValueStore;

use async_trait::async_trait;
use fitbuddy_shared::StorageResult;
use serde::de::DeserializeOwned;
use std::fmt;
use tracing::warn;

/// Async string key-value store
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> StorageResult<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    async fn remove(&self, key: &str) -> StorageResult<()>;

    /// Delete every record
    async fn clear(&self) -> StorageResult<()>;
}

/// Record keys owned by the stores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    UserToken,
    UserData,
    RegisteredUsers,
    Favorites,
    Theme,
    WaterGoal,
    WaterIntake,
    Workouts,
    SavedWorkouts,
    Notifications,
}

impl StorageKey {
    pub const ALL: [StorageKey; 10] = [
        StorageKey::UserToken,
        StorageKey::UserData,
        StorageKey::RegisteredUsers,
        StorageKey::Favorites,
        StorageKey::Theme,
        StorageKey::WaterGoal,
        StorageKey::WaterIntake,
        StorageKey::Workouts,
        StorageKey::SavedWorkouts,
        StorageKey::Notifications,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::UserToken => "fitbuddy.user-token",
            StorageKey::UserData => "fitbuddy.user-data",
            StorageKey::RegisteredUsers => "fitbuddy.registered-users",
            StorageKey::Favorites => "fitbuddy.favorites",
            StorageKey::Theme => "fitbuddy.theme",
            StorageKey::WaterGoal => "fitbuddy.water-goal",
            StorageKey::WaterIntake => "fitbuddy.water-intake",
            StorageKey::Workouts => "fitbuddy.workouts",
            StorageKey::SavedWorkouts => "fitbuddy.saved-workouts",
            StorageKey::Notifications => "fitbuddy.notifications",
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read and decode a JSON record.
///
/// A record that fails to decode is logged and treated as absent.
pub async fn read_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: StorageKey,
) -> StorageResult<Option<T>> {
    let Some(raw) = store.get(key.as_str()).await? else {
        return Ok(None);
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            warn!(key = %key, error = %e, "Discarding corrupt record");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_keys_are_unique_and_namespaced() {
        let keys: HashSet<&str> = StorageKey::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(keys.len(), StorageKey::ALL.len());
        assert!(keys.iter().all(|k| k.starts_with("fitbuddy.")));
    }

    #[tokio::test]
    async fn test_read_json_treats_corrupt_as_absent() {
        let store = MemoryKeyValueStore::new();
        store.set(StorageKey::Favorites.as_str(), "{not json").await.unwrap();
        let value: Option<Vec<String>> = read_json(&store, StorageKey::Favorites).await.unwrap();
        assert!(value.is_none());

        store.set(StorageKey::Favorites.as_str(), r#"["a"]"#).await.unwrap();
        let value: Option<Vec<String>> = read_json(&store, StorageKey::Favorites).await.unwrap();
        assert_eq!(value, Some(vec!["a".to_string()]));
    }
}
