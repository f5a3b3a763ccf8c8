//! Pure state transitions for each store
//!
//! Nothing in this module touches storage or the clock. Callers pass the
//! current time in and persist the resulting snapshot themselves.

pub mod catalog;
pub mod favorites;
pub mod notifications;
pub mod water;
pub mod workouts;

pub use catalog::CatalogState;
pub use favorites::FavoriteSet;
pub use notifications::NotificationList;
pub use water::WaterState;
pub use workouts::WorkoutState;
