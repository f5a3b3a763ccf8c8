//! Application stores
//!
//! Each store owns its state behind an async `RwLock`, applies a pure
//! transition from `fitbuddy_shared::state`, and hands the resulting
//! snapshot to the [`Persister`](crate::storage::Persister) before releasing
//! the lock.

pub mod auth;
pub mod catalog;
pub mod favorites;
pub mod notifications;
pub mod theme;
pub mod water;
pub mod workouts;

pub use auth::AuthStore;
pub use catalog::CatalogStore;
pub use favorites::FavoritesStore;
pub use notifications::NotificationStore;
pub use theme::ThemeStore;
pub use water::WaterStore;
pub use workouts::WorkoutStore;
