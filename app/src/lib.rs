//! FitBuddy client state engine
//!
//! Stores for auth, the exercise catalog, favorites, water intake, workouts,
//! notifications and theme, persisted to a key-value store and exposed over
//! an HTTP bridge.

pub mod auth;
pub mod clock;
pub mod config;
pub mod error;
pub mod routes;
pub mod sources;
pub mod state;
pub mod storage;
pub mod stores;
