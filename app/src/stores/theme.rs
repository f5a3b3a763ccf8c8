//! Light/dark theme preference

use crate::storage::{Persister, StorageKey, Write};
use fitbuddy_shared::{StoreResult, ThemeMode, ThemeSnapshot};
use tokio::sync::RwLock;
use tracing::debug;

pub struct ThemeStore {
    state: RwLock<ThemeMode>,
    persister: Persister,
}

impl ThemeStore {
    pub fn new(persister: Persister) -> Self {
        Self {
            state: RwLock::new(ThemeMode::default()),
            persister,
        }
    }

    /// Anything but a stored `"dark"` reads as light
    pub async fn load(&self) -> StoreResult<()> {
        let stored = self
            .persister
            .storage()
            .get(StorageKey::Theme.as_str())
            .await?;
        let mode = stored
            .as_deref()
            .map(ThemeMode::from_stored)
            .unwrap_or_default();
        *self.state.write().await = mode;
        Ok(())
    }

    /// Flip the mode and persist it; returns the new `is_dark`
    pub async fn toggle(&self) -> bool {
        let mut state = self.state.write().await;
        *state = ThemeMode::from_dark(!state.is_dark());
        self.persister
            .submit(Write::set(StorageKey::Theme, state.as_str()))
            .await;
        debug!(mode = state.as_str(), "Theme toggled");
        state.is_dark()
    }

    /// Set the mode; the write is awaited and errors surface
    pub async fn save(&self, is_dark: bool) -> StoreResult<ThemeSnapshot> {
        let mut state = self.state.write().await;
        let mode = ThemeMode::from_dark(is_dark);
        self.persister
            .commit(Write::set(StorageKey::Theme, mode.as_str()))
            .await?;
        *state = mode;
        Ok(ThemeSnapshot { is_dark })
    }

    pub async fn snapshot(&self) -> ThemeSnapshot {
        ThemeSnapshot {
            is_dark: self.state.read().await.is_dark(),
        }
    }

    pub(crate) async fn reset(&self) {
        *self.state.write().await = ThemeMode::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PersistMode;
    use crate::storage::{KeyValueStore, MemoryKeyValueStore};
    use std::sync::Arc;

    fn store() -> (Arc<MemoryKeyValueStore>, ThemeStore) {
        let storage = Arc::new(MemoryKeyValueStore::new());
        let store = ThemeStore::new(Persister::new(storage.clone(), PersistMode::Inline));
        (storage, store)
    }

    #[tokio::test]
    async fn test_toggle_persists() {
        let (storage, store) = store();
        assert!(store.toggle().await);
        assert_eq!(
            storage.get(StorageKey::Theme.as_str()).await.unwrap(),
            Some("dark".to_string())
        );
        assert!(!store.toggle().await);
        assert_eq!(
            storage.get(StorageKey::Theme.as_str()).await.unwrap(),
            Some("light".to_string())
        );
    }

    #[tokio::test]
    async fn test_unknown_value_loads_light() {
        let (storage, store) = store();
        storage.set(StorageKey::Theme.as_str(), "solarized").await.unwrap();
        store.load().await.unwrap();
        assert!(!store.snapshot().await.is_dark);

        storage.set(StorageKey::Theme.as_str(), "dark").await.unwrap();
        store.load().await.unwrap();
        assert!(store.snapshot().await.is_dark);
    }

    #[tokio::test]
    async fn test_save_surfaces_errors() {
        let (storage, store) = store();
        storage.set_failing(true);
        assert!(store.save(true).await.is_err());
        assert!(!store.snapshot().await.is_dark);
    }
}
