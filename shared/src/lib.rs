//! FitBuddy Shared Library
//!
//! Domain models, the error taxonomy, input validation, and the pure state
//! transitions used by the app stores and the WASM helpers.

pub mod errors;
pub mod models;
pub mod state;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use models::*;
pub use types::*;

pub use state::catalog::{matches_search, FetchOutcome};
pub use state::water::water_percentage;
