//! Configuration management for the FitBuddy engine
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: FITBUDDY__)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

/// Development-only session secret; rejected in production
pub const DEV_SESSION_SECRET: &str = "development-secret-change-in-production";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub exercise_api: ExerciseApiConfig,
    pub auth_api: AuthApiConfig,
    pub session: SessionConfig,
    pub water: WaterConfig,
    pub notifications: NotificationsConfig,
}

/// Local bridge listener
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// How store snapshots reach the key-value store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersistMode {
    /// Ordered fire-and-forget queue drained by a worker task
    #[default]
    Background,
    /// Each write is awaited by the caller
    Inline,
}

/// Key-value storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub database_url: String,
    #[serde(default)]
    pub persist_mode: PersistMode,
}

/// Exercise source selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogMode {
    /// Use the bundled catalog when the API is unconfigured or failing
    #[default]
    Fallback,
    /// Require the remote API
    Strict,
}

/// Public exercise API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseApiConfig {
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    pub timeout_secs: u64,
    #[serde(default)]
    pub mode: CatalogMode,
    pub per_group_limit: usize,
    pub muscle_groups: Vec<String>,
}

/// Demo authentication API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthApiConfig {
    pub enabled: bool,
    pub base_url: String,
    pub timeout_secs: u64,
}

/// Local session token settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub secret: String,
    pub token_expiry_secs: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaterConfig {
    pub default_goal_ml: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    pub max_entries: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            storage: StorageConfig {
                database_url: "sqlite://fitbuddy.db?mode=rwc".to_string(),
                persist_mode: PersistMode::Background,
            },
            exercise_api: ExerciseApiConfig {
                base_url: "https://api.api-ninjas.com/v1".to_string(),
                api_key: None,
                timeout_secs: 10,
                mode: CatalogMode::Fallback,
                per_group_limit: 5,
                muscle_groups: [
                    "chest",
                    "biceps",
                    "triceps",
                    "shoulders",
                    "quadriceps",
                    "abdominals",
                    "lats",
                ]
                .iter()
                .map(|m| m.to_string())
                .collect(),
            },
            auth_api: AuthApiConfig {
                enabled: true,
                base_url: "https://dummyjson.com".to_string(),
                timeout_secs: 10,
            },
            session: SessionConfig {
                secret: DEV_SESSION_SECRET.to_string(),
                token_expiry_secs: 2_592_000, // 30 days
            },
            water: WaterConfig {
                default_goal_ml: 2000,
            },
            notifications: NotificationsConfig { max_entries: 50 },
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with FITBUDDY__ prefix
    pub fn load() -> Result<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);

        let config = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default())?)
            .add_source(config::File::with_name(&config_file).required(false))
            // e.g., FITBUDDY__SERVER__PORT=9000 sets server.port
            .add_source(config::Environment::with_prefix("FITBUDDY").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }

    /// Reject settings that must never ship to production
    pub fn validate_for_production(&self) -> Result<()> {
        if self.session.secret == DEV_SESSION_SECRET {
            anyhow::bail!(
                "session.secret is the development default; set FITBUDDY__SESSION__SECRET"
            );
        }
        if self.session.secret.len() < 32 {
            anyhow::bail!("session.secret must be at least 32 characters in production");
        }
        if self.exercise_api.mode == CatalogMode::Strict && self.exercise_api.api_key.is_none() {
            anyhow::bail!("exercise_api.mode is strict but no api_key is configured");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.water.default_goal_ml, 2000);
        assert_eq!(config.notifications.max_entries, 50);
        assert_eq!(config.exercise_api.muscle_groups.len(), 7);
        assert_eq!(config.exercise_api.mode, CatalogMode::Fallback);
    }

    #[test]
    fn test_is_production() {
        // Default should be false (development)
        assert!(!AppConfig::is_production());
    }

    #[test]
    fn test_dev_secret_rejected_for_production() {
        let mut config = AppConfig::default();
        assert!(config.validate_for_production().is_err());

        config.session.secret = "x".repeat(48);
        assert!(config.validate_for_production().is_ok());

        config.exercise_api.mode = CatalogMode::Strict;
        assert!(config.validate_for_production().is_err());
    }

    #[test]
    fn test_modes_deserialize_lowercase() {
        let mode: PersistMode = serde_json::from_str("\"inline\"").unwrap();
        assert_eq!(mode, PersistMode::Inline);
        let mode: CatalogMode = serde_json::from_str("\"strict\"").unwrap();
        assert_eq!(mode, CatalogMode::Strict);
    }
}
