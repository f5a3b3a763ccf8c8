//! Locally issued session tokens
//!
//! Accounts registered on the device get an HS256 JWT. Tokens that came
//! from the demo auth API are opaque to us and reported as foreign.

use chrono::{DateTime, Duration, Utc};
use fitbuddy_shared::{StoreError, StoreResult};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const ISSUER: &str = "fitbuddy";

/// Session token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id)
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
    pub iss: String,
}

/// What a stored token turned out to be
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenStatus {
    Valid { user_id: u64 },
    Expired,
    /// Not issued by this device
    Foreign,
}

/// Issues and inspects session tokens with pre-computed keys
#[derive(Clone)]
pub struct SessionTokens {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
    expiry_secs: i64,
}

impl SessionTokens {
    pub fn new(secret: &str, expiry_secs: i64) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
            expiry_secs,
        }
    }

    pub fn issue(&self, user_id: u64, now: DateTime<Utc>) -> StoreResult<String> {
        let claims = Claims {
            sub: user_id.to_string(),
            exp: (now + Duration::seconds(self.expiry_secs)).timestamp(),
            iat: now.timestamp(),
            iss: ISSUER.to_string(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| StoreError::Internal(format!("Failed to issue session token: {}", e)))
    }

    /// Classify a token against `now`
    pub fn inspect(&self, token: &str, now: DateTime<Utc>) -> TokenStatus {
        // Expiry is checked against the injected clock below.
        let mut validation = Validation::default();
        validation.validate_exp = false;
        validation.set_issuer(&[ISSUER]);

        let claims = match decode::<Claims>(token, &self.decoding, &validation) {
            Ok(data) => data.claims,
            Err(e) => {
                return match e.kind() {
                    ErrorKind::ExpiredSignature => TokenStatus::Expired,
                    _ => TokenStatus::Foreign,
                }
            }
        };
        if claims.exp <= now.timestamp() {
            return TokenStatus::Expired;
        }
        match claims.sub.parse() {
            Ok(user_id) => TokenStatus::Valid { user_id },
            Err(_) => TokenStatus::Foreign,
        }
    }
}
