//! Favorite exercises

use crate::storage::{read_json, Persister, StorageKey};
use fitbuddy_shared::state::FavoriteSet;
use fitbuddy_shared::{Exercise, FavoritesSnapshot, StoreResult};
use tokio::sync::RwLock;
use tracing::{debug, instrument};

pub struct FavoritesStore {
    state: RwLock<FavoriteSet>,
    persister: Persister,
}

impl FavoritesStore {
    pub fn new(persister: Persister) -> Self {
        Self {
            state: RwLock::new(FavoriteSet::default()),
            persister,
        }
    }

    #[instrument(skip(self))]
    pub async fn load(&self) -> StoreResult<()> {
        let list: Vec<Exercise> = read_json(self.persister.storage().as_ref(), StorageKey::Favorites)
            .await?
            .unwrap_or_default();
        let set = FavoriteSet::from_vec(list);
        debug!(count = set.len(), "Favorites loaded");
        *self.state.write().await = set;
        Ok(())
    }

    /// Returns true when the exercise is a favorite afterwards
    #[instrument(skip(self, exercise), fields(name = %exercise.name))]
    pub async fn toggle(&self, exercise: Exercise) -> bool {
        let mut state = self.state.write().await;
        let added = state.toggle(exercise);
        self.persist(&state).await;
        debug!(added, count = state.len(), "Favorite toggled");
        added
    }

    pub async fn add(&self, exercise: Exercise) -> bool {
        let mut state = self.state.write().await;
        let changed = state.add(exercise);
        if changed {
            self.persist(&state).await;
        }
        changed
    }

    pub async fn remove(&self, name: &str) -> bool {
        let mut state = self.state.write().await;
        let changed = state.remove(name);
        if changed {
            self.persist(&state).await;
        }
        changed
    }

    pub async fn is_favorite(&self, name: &str) -> bool {
        self.state.read().await.contains(name)
    }

    pub async fn snapshot(&self) -> FavoritesSnapshot {
        FavoritesSnapshot {
            favorites: self.state.read().await.to_vec(),
        }
    }

    pub(crate) async fn reset(&self) {
        self.state.write().await.clear();
    }

    async fn persist(&self, set: &FavoriteSet) {
        self.persister
            .submit_json(StorageKey::Favorites, set.as_slice())
            .await;
    }
}
