//! External data sources
//!
//! Stores depend only on these traits; the HTTP clients and the bundled
//! catalog are chosen at startup from configuration.

pub mod api_ninjas;
pub mod bundled;
pub mod catalog;
pub mod dummyjson;

pub use api_ninjas::ApiNinjasSource;
pub use bundled::BundledCatalog;
pub use catalog::CatalogSource;
pub use dummyjson::{DisabledAuthSource, DummyJsonAuth};

use async_trait::async_trait;
use fitbuddy_shared::{Exercise, ExerciseQuery, User};
use tracing::warn;

/// Failures of a remote data source
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("API key not configured")]
    NotConfigured,
    #[error("HTTP request failed: {0}")]
    Http(String),
    #[error("Unexpected status: {0}")]
    Status(u16),
    #[error("Failed to decode response: {0}")]
    Decode(String),
    #[error("Credentials rejected")]
    Rejected,
}

impl From<reqwest::Error> for SourceError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            SourceError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            SourceError::Status(status.as_u16())
        } else {
            SourceError::Http(e.to_string())
        }
    }
}

pub type SourceResult<T> = Result<T, SourceError>;

/// Read-only exercise provider
#[async_trait]
pub trait ExerciseSource: Send + Sync {
    async fn get_exercises(&self, query: &ExerciseQuery) -> SourceResult<Vec<Exercise>>;

    /// Case-insensitive name, muscle, or type match over the unfiltered
    /// catalog. Failures yield an empty list.
    async fn search_exercises(&self, term: &str) -> Vec<Exercise> {
        let needle = term.to_lowercase();
        match self.get_exercises(&ExerciseQuery::default()).await {
            Ok(all) => all
                .into_iter()
                .filter(|e| {
                    e.name.to_lowercase().contains(&needle)
                        || e.muscle.to_lowercase().contains(&needle)
                        || e.exercise_type.to_lowercase().contains(&needle)
                })
                .collect(),
            Err(e) => {
                warn!(error = %e, "Exercise search failed");
                Vec::new()
            }
        }
    }
}

/// Remote credential check for accounts not registered on the device
#[async_trait]
pub trait AuthSource: Send + Sync {
    async fn login(&self, username: &str, password: &str) -> SourceResult<User>;
}
