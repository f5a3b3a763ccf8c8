//! Error types for the FitBuddy state engine

use thiserror::Error;

/// Failures of the durable key-value store
///
/// Persistence is best-effort: callers keep their in-memory state and log
/// these unless the operation is an explicit save.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Storage quota exceeded")]
    QuotaExceeded,

    #[error("Storage unavailable")]
    Unavailable,

    #[error("Failed to encode record {key}: {message}")]
    Encode { key: String, message: String },
}

/// Store-level error types surfaced to the presentation layer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Invalid username or password. Please check your credentials or sign up for a new account.")]
    InvalidCredentials,

    #[error("Username already taken. Please choose a different username.")]
    DuplicateUsername,

    #[error("Email already registered. Please use a different email or login.")]
    DuplicateEmail,

    #[error("Failed to fetch exercises: {0}")]
    FetchFailed(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl StoreError {
    /// Stable machine-readable code for the error
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::Storage(_) => "STORAGE_ERROR",
            StoreError::InvalidCredentials => "INVALID_CREDENTIALS",
            StoreError::DuplicateUsername => "DUPLICATE_USERNAME",
            StoreError::DuplicateEmail => "DUPLICATE_EMAIL",
            StoreError::FetchFailed(_) => "FETCH_FAILED",
            StoreError::Validation(_) => "VALIDATION_ERROR",
            StoreError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

/// Result alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Result alias for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
