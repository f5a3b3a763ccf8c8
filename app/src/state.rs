//! Application state
//!
//! `AppState` is built once at startup and owns every store. It is cheap to
//! clone (all fields are `Arc`) and is shared with the HTTP handlers through
//! Axum's state extraction.

use crate::auth::SessionTokens;
use crate::clock::{Clock, SystemClock};
use crate::config::{AppConfig, PersistMode};
use crate::sources::{AuthSource, CatalogSource, DisabledAuthSource, DummyJsonAuth, ExerciseSource};
use crate::storage::{KeyValueStore, Persister};
use crate::stores::{
    AuthStore, CatalogStore, FavoritesStore, NotificationStore, ThemeStore, WaterStore,
    WorkoutStore,
};
use anyhow::Result;
use fitbuddy_shared::{Exercise, NewNotification, StoreResult};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Collaborators injected at construction
pub struct Dependencies {
    pub storage: Arc<dyn KeyValueStore>,
    pub exercise_source: Arc<dyn ExerciseSource>,
    pub auth_source: Arc<dyn AuthSource>,
    pub clock: Arc<dyn Clock>,
    pub persist_mode: PersistMode,
}

impl Dependencies {
    /// Production wiring from configuration
    pub fn from_config(config: &AppConfig, storage: Arc<dyn KeyValueStore>) -> Result<Self> {
        let exercise_source: Arc<dyn ExerciseSource> =
            Arc::new(CatalogSource::from_config(&config.exercise_api)?);
        let auth_source: Arc<dyn AuthSource> = if config.auth_api.enabled {
            Arc::new(DummyJsonAuth::new(&config.auth_api)?)
        } else {
            Arc::new(DisabledAuthSource)
        };
        Ok(Self {
            storage,
            exercise_source,
            auth_source,
            clock: Arc::new(SystemClock),
            persist_mode: config.storage.persist_mode,
        })
    }
}

/// Per-store failures from `load_all`
#[derive(Debug, Default, Clone, Serialize)]
pub struct LoadReport {
    pub failures: Vec<LoadFailure>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoadFailure {
    pub store: &'static str,
    pub error: String,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, store: &'static str, result: StoreResult<()>) {
        if let Err(e) = result {
            warn!(store, error = %e, "Store failed to load");
            self.failures.push(LoadFailure {
                store,
                error: e.to_string(),
            });
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub persister: Persister,
    pub auth: Arc<AuthStore>,
    pub catalog: Arc<CatalogStore>,
    pub favorites: Arc<FavoritesStore>,
    pub water: Arc<WaterStore>,
    pub workouts: Arc<WorkoutStore>,
    pub notifications: Arc<NotificationStore>,
    pub theme: Arc<ThemeStore>,
}

impl AppState {
    /// Build every store. Background persistence spawns its worker, so this
    /// must run inside a Tokio runtime.
    pub fn new(config: AppConfig, deps: Dependencies) -> Self {
        let persister = Persister::new(deps.storage, deps.persist_mode);
        let tokens = SessionTokens::new(&config.session.secret, config.session.token_expiry_secs);

        Self {
            auth: Arc::new(AuthStore::new(
                persister.clone(),
                deps.auth_source,
                tokens,
                deps.clock.clone(),
            )),
            catalog: Arc::new(CatalogStore::new(deps.exercise_source)),
            favorites: Arc::new(FavoritesStore::new(persister.clone())),
            water: Arc::new(WaterStore::new(
                persister.clone(),
                deps.clock.clone(),
                config.water.default_goal_ml,
            )),
            workouts: Arc::new(WorkoutStore::new(persister.clone(), deps.clock.clone())),
            notifications: Arc::new(NotificationStore::new(
                persister.clone(),
                deps.clock,
                config.notifications.max_entries,
            )),
            theme: Arc::new(ThemeStore::new(persister.clone())),
            persister,
            config: Arc::new(config),
        }
    }

    /// Hydrate every store concurrently; one failure never blocks the rest
    pub async fn load_all(&self) -> LoadReport {
        let (auth, favorites, water, workouts, notifications, theme) = tokio::join!(
            self.auth.load(),
            self.favorites.load(),
            self.water.load(),
            self.workouts.load(),
            self.notifications.load(),
            self.theme.load(),
        );

        let mut report = LoadReport::default();
        report.record("auth", auth);
        report.record("favorites", favorites);
        report.record("water", water);
        report.record("workouts", workouts);
        report.record("notifications", notifications);
        report.record("theme", theme);
        info!(failures = report.failures.len(), "Stores loaded");
        report
    }

    /// Toggle a favorite and announce additions.
    ///
    /// Returns true when the exercise is a favorite afterwards.
    pub async fn toggle_favorite(&self, exercise: Exercise) -> bool {
        let notice = NewNotification::favorite_added(&exercise);
        let added = self.favorites.toggle(exercise).await;
        if added {
            self.notifications.add(notice).await;
        }
        added
    }

    /// Wipe all persisted data and return every store to its defaults
    pub async fn reset_all(&self) -> StoreResult<()> {
        self.persister.clear_all().await?;
        tokio::join!(
            self.auth.reset(),
            self.catalog.reset(),
            self.favorites.reset(),
            self.water.reset(),
            self.workouts.reset(),
            self.notifications.reset(),
            self.theme.reset(),
        );
        warn!("All app data reset");
        Ok(())
    }

    /// Wait for queued writes to land
    pub async fn flush(&self) {
        self.persister.flush().await;
    }

    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}
