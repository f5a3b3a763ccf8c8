//! DummyJSON demo login

use super::{AuthSource, SourceError, SourceResult};
use crate::config::AuthApiConfig;
use async_trait::async_trait;
use fitbuddy_shared::User;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[derive(Serialize)]
struct LoginBody<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    id: u64,
    username: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    token: Option<String>,
}

/// `POST {base_url}/auth/login`
pub struct DummyJsonAuth {
    client: reqwest::Client,
    base_url: String,
}

impl DummyJsonAuth {
    pub fn new(config: &AuthApiConfig) -> SourceResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SourceError::Http(e.to_string()))?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl AuthSource for DummyJsonAuth {
    async fn login(&self, username: &str, password: &str) -> SourceResult<User> {
        let response = self
            .client
            .post(format!("{}/auth/login", self.base_url))
            .json(&LoginBody { username, password })
            .send()
            .await?;

        let status = response.status();
        if status.is_client_error() {
            debug!(status = %status, "Demo login rejected");
            return Err(SourceError::Rejected);
        }
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }

        let body: LoginResponse = response
            .json()
            .await
            .map_err(|e| SourceError::Decode(e.to_string()))?;
        let token = body
            .access_token
            .or(body.token)
            .ok_or_else(|| SourceError::Decode("response carried no token".to_string()))?;

        Ok(User {
            id: body.id,
            username: body.username,
            email: body.email,
            first_name: body.first_name,
            last_name: body.last_name,
            token,
            phone: None,
            age: None,
            weight: None,
            height: None,
        })
    }
}

/// Rejects every login; used when the demo API is turned off
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledAuthSource;

#[async_trait]
impl AuthSource for DisabledAuthSource {
    async fn login(&self, _username: &str, _password: &str) -> SourceResult<User> {
        Err(SourceError::Rejected)
    }
}
