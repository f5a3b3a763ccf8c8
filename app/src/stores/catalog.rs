//! Exercise catalog store
//!
//! Not persisted; the catalog is fetched again on every start.

use crate::sources::ExerciseSource;
use fitbuddy_shared::state::CatalogState;
use fitbuddy_shared::{
    CatalogSnapshot, Exercise, ExerciseQuery, FetchOutcome, FilterUpdate, StoreError, StoreResult,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

pub struct CatalogStore {
    state: RwLock<CatalogState>,
    source: Arc<dyn ExerciseSource>,
}

impl CatalogStore {
    pub fn new(source: Arc<dyn ExerciseSource>) -> Self {
        Self {
            state: RwLock::new(CatalogState::default()),
            source,
        }
    }

    /// Replace the catalog from the source.
    ///
    /// A fetch overtaken by a newer one reports `Superseded` and changes nothing.
    #[instrument(skip(self))]
    pub async fn fetch(&self, query: ExerciseQuery) -> StoreResult<FetchOutcome> {
        let ticket = self.state.write().await.begin_fetch();
        let result = self.source.get_exercises(&query).await;

        let mut state = self.state.write().await;
        match result {
            Ok(exercises) => {
                let outcome = state.finish_fetch(ticket, exercises);
                debug!(?outcome, "Catalog fetch finished");
                Ok(outcome)
            }
            Err(e) => {
                let error = StoreError::FetchFailed(e.to_string());
                match state.fail_fetch(ticket, error.to_string()) {
                    FetchOutcome::Superseded => Ok(FetchOutcome::Superseded),
                    FetchOutcome::Applied { .. } => {
                        warn!(error = %e, "Catalog fetch failed");
                        Err(error)
                    }
                }
            }
        }
    }

    pub async fn set_filter(&self, update: FilterUpdate) -> CatalogSnapshot {
        let mut state = self.state.write().await;
        state.set_filter(update);
        debug!(filter = ?state.filter(), matches = state.filtered().len(), "Filter updated");
        state.snapshot()
    }

    pub async fn clear_filters(&self) -> CatalogSnapshot {
        let mut state = self.state.write().await;
        state.clear_filters();
        state.snapshot()
    }

    /// Narrow the filtered view without storing the query
    pub async fn search(&self, query: &str) -> Vec<Exercise> {
        self.state.read().await.search(query)
    }

    pub async fn search_remote(&self, term: &str) -> Vec<Exercise> {
        self.source.search_exercises(term).await
    }

    pub async fn snapshot(&self) -> CatalogSnapshot {
        self.state.read().await.snapshot()
    }

    pub(crate) async fn reset(&self) {
        *self.state.write().await = CatalogState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::{BundledCatalog, SourceError, SourceResult};
    use async_trait::async_trait;
    use tokio::sync::Notify;

    /// Holds chest requests until released; other muscles answer at once
    #[derive(Default)]
    struct Gated {
        started: Notify,
        release: Notify,
    }

    #[async_trait]
    impl ExerciseSource for Gated {
        async fn get_exercises(&self, query: &ExerciseQuery) -> SourceResult<Vec<Exercise>> {
            if query.muscle_constraint() == Some("chest") {
                self.started.notify_one();
                self.release.notified().await;
            }
            BundledCatalog::new().get_exercises(query).await
        }
    }

    struct Down;

    #[async_trait]
    impl ExerciseSource for Down {
        async fn get_exercises(&self, _query: &ExerciseQuery) -> SourceResult<Vec<Exercise>> {
            Err(SourceError::Http("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn test_fetch_filter_clear() {
        let store = CatalogStore::new(Arc::new(BundledCatalog::new()));
        let outcome = store.fetch(ExerciseQuery::default()).await.unwrap();
        assert_eq!(outcome, FetchOutcome::Applied { count: 38 });

        let snapshot = store.set_filter(FilterUpdate::muscle("chest")).await;
        assert_eq!(snapshot.filtered_exercises.len(), 4);
        assert_eq!(store.search("fly").await.len(), 1);

        let snapshot = store.clear_filters().await;
        assert_eq!(snapshot.filtered_exercises.len(), 38);
    }

    #[tokio::test]
    async fn test_superseded_fetch_does_not_overwrite() {
        let source = Arc::new(Gated::default());
        let store = Arc::new(CatalogStore::new(source.clone()));
        let slow = {
            let store = store.clone();
            tokio::spawn(async move { store.fetch(ExerciseQuery::muscle("chest")).await })
        };
        source.started.notified().await;
        let fast = store.fetch(ExerciseQuery::muscle("lats")).await.unwrap();
        assert_eq!(fast, FetchOutcome::Applied { count: 2 });

        source.release.notify_one();
        assert_eq!(slow.await.unwrap().unwrap(), FetchOutcome::Superseded);
        let snapshot = store.snapshot().await;
        assert!(snapshot.exercises.iter().all(|e| e.muscle == "lats"));
        assert!(!snapshot.is_loading);
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_previous() {
        let store = CatalogStore::new(Arc::new(Down));
        let err = store.fetch(ExerciseQuery::default()).await.unwrap_err();
        assert!(matches!(err, StoreError::FetchFailed(_)));
        let snapshot = store.snapshot().await;
        assert!(snapshot.exercises.is_empty());
        assert!(snapshot.error.unwrap().contains("connection refused"));
        assert!(store.search_remote("plank").await.is_empty());
    }
}
