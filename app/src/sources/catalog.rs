//! Deployment-mode wrapper around the exercise API

use super::{ApiNinjasSource, BundledCatalog, ExerciseSource, SourceError, SourceResult};
use crate::config::{CatalogMode, ExerciseApiConfig};
use async_trait::async_trait;
use fitbuddy_shared::{Exercise, ExerciseQuery};
use tracing::{info, warn};

/// Chooses between the remote API and the bundled catalog
pub struct CatalogSource {
    remote: Option<Box<dyn ExerciseSource>>,
    bundled: BundledCatalog,
    mode: CatalogMode,
}

impl CatalogSource {
    pub fn new(remote: Option<Box<dyn ExerciseSource>>, mode: CatalogMode) -> Self {
        Self {
            remote,
            bundled: BundledCatalog::new(),
            mode,
        }
    }

    /// Build from configuration; a missing key leaves the remote unset
    pub fn from_config(config: &ExerciseApiConfig) -> SourceResult<Self> {
        let remote = match config.api_key.as_deref().filter(|k| !k.is_empty()) {
            Some(key) => {
                info!("Exercise API key configured");
                Some(Box::new(ApiNinjasSource::new(config, key.to_string())?) as Box<dyn ExerciseSource>)
            }
            None => {
                warn!(mode = ?config.mode, "Exercise API key not configured");
                None
            }
        };
        Ok(Self::new(remote, config.mode))
    }
}

#[async_trait]
impl ExerciseSource for CatalogSource {
    async fn get_exercises(&self, query: &ExerciseQuery) -> SourceResult<Vec<Exercise>> {
        let Some(remote) = &self.remote else {
            return match self.mode {
                CatalogMode::Strict => Err(SourceError::NotConfigured),
                CatalogMode::Fallback => Ok(self.bundled.exercises(query)),
            };
        };

        match remote.get_exercises(query).await {
            Ok(exercises) => Ok(exercises),
            Err(e) if self.mode == CatalogMode::Fallback => {
                warn!(error = %e, "Exercise API failed, serving bundled catalog");
                Ok(self.bundled.exercises(query))
            }
            Err(e) => Err(e),
        }
    }
}
