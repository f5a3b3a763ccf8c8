//! Password hashing using argon2
//!
//! Registered accounts store only the PHC hash string. Hashing and
//! verification are CPU-bound and run on the blocking pool from async code.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use fitbuddy_shared::{StoreError, StoreResult};

/// Argon2id password hashing
pub struct PasswordService;

impl PasswordService {
    /// Hash a password (blocking)
    pub fn hash(password: &str) -> StoreResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| StoreError::Internal(format!("Failed to hash password: {}", e)))
    }

    /// Verify a password against a stored hash (blocking).
    ///
    /// A malformed stored hash never verifies.
    pub fn verify(password: &str, hash: &str) -> bool {
        match PasswordHash::new(hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }

    pub async fn hash_async(password: String) -> StoreResult<String> {
        tokio::task::spawn_blocking(move || Self::hash(&password))
            .await
            .map_err(|e| StoreError::Internal(format!("Task join error: {}", e)))?
    }

    pub async fn verify_async(password: String, hash: String) -> bool {
        tokio::task::spawn_blocking(move || Self::verify(&password, &hash))
            .await
            .unwrap_or(false)
    }
}
