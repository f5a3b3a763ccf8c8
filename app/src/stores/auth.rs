//! Authentication store
//!
//! Holds the current session and the table of accounts registered on this
//! device. Local accounts verify against argon2 hashes; anything else is
//! tried against the demo auth API.

use crate::auth::{PasswordService, SessionTokens, TokenStatus};
use crate::clock::Clock;
use crate::sources::AuthSource;
use crate::storage::{read_json, Persister, StorageKey, Write};
use fitbuddy_shared::validation::{validate_profile_patch, validate_registration};
use fitbuddy_shared::{
    AuthSnapshot, ProfilePatch, RegisterRequest, RegisteredUser, RegisteredUserSummary,
    StoreError, StoreResult, User,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

/// Ids below this are reserved for demo API accounts
const FIRST_LOCAL_ID: u64 = 1000;

#[derive(Debug, Default)]
struct AuthState {
    user: Option<User>,
    error: Option<String>,
    accounts: Vec<RegisteredUser>,
}

pub struct AuthStore {
    state: RwLock<AuthState>,
    persister: Persister,
    source: Arc<dyn AuthSource>,
    tokens: SessionTokens,
    clock: Arc<dyn Clock>,
}

fn same_name(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

impl AuthStore {
    pub fn new(
        persister: Persister,
        source: Arc<dyn AuthSource>,
        tokens: SessionTokens,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            state: RwLock::new(AuthState::default()),
            persister,
            source,
            tokens,
            clock,
        }
    }

    /// Hydrate the account table and any persisted session.
    ///
    /// An expired locally issued token clears the session.
    #[instrument(skip(self))]
    pub async fn load(&self) -> StoreResult<()> {
        let storage = self.persister.storage().as_ref();
        let accounts: Vec<RegisteredUser> =
            read_json(storage, StorageKey::RegisteredUsers).await?.unwrap_or_default();
        let user: Option<User> = read_json(storage, StorageKey::UserData).await?;
        let token = storage.get(StorageKey::UserToken.as_str()).await?;

        let mut state = self.state.write().await;
        state.accounts = accounts;
        state.error = None;
        state.user = None;

        let Some(mut user) = user else {
            debug!(accounts = state.accounts.len(), "No persisted session");
            return Ok(());
        };
        if let Some(token) = token {
            user.token = token;
        }

        match self.tokens.inspect(&user.token, self.clock.now()) {
            TokenStatus::Expired => {
                info!(user_id = user.id, "Persisted session expired");
                self.persister.submit(Write::remove(StorageKey::UserToken)).await;
                self.persister.submit(Write::remove(StorageKey::UserData)).await;
            }
            TokenStatus::Valid { .. } | TokenStatus::Foreign => {
                debug!(user_id = user.id, "Session restored");
                state.user = Some(user);
            }
        }
        Ok(())
    }

    /// Local account first, then the demo API
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> StoreResult<User> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return self
                .fail(StoreError::Validation(
                    "Please enter both username and password".to_string(),
                ))
                .await;
        }

        let account = {
            let state = self.state.read().await;
            state
                .accounts
                .iter()
                .find(|a| same_name(&a.username, username))
                .cloned()
        };

        let mut user = None;
        if let Some(account) = account {
            if PasswordService::verify_async(password.to_string(), account.password_hash.clone()).await {
                let token = self.tokens.issue(account.id, self.clock.now())?;
                user = Some(account.to_user(token));
            }
        }

        let user = match user {
            Some(user) => {
                info!(username = %user.username, "Login with local account");
                user
            }
            None => match self.source.login(username, password).await {
                Ok(user) => {
                    info!(username = %user.username, "Login with demo account");
                    user
                }
                Err(e) => {
                    debug!(error = %e, "Demo login failed");
                    return self.fail(StoreError::InvalidCredentials).await;
                }
            },
        };

        let mut state = self.state.write().await;
        if let Err(e) = self.commit_session(&user).await {
            state.error = Some(e.to_string());
            return Err(e);
        }
        state.user = Some(user.clone());
        state.error = None;
        Ok(user)
    }

    /// Create a local account and sign it in
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn register(&self, request: RegisterRequest) -> StoreResult<User> {
        if let Err(message) = validate_registration(&request) {
            return self.fail(StoreError::Validation(message)).await;
        }
        let duplicate = {
            let state = self.state.read().await;
            self.check_duplicates(&state.accounts, &request)
        };
        if let Err(e) = duplicate {
            return self.fail(e).await;
        }

        let password_hash = PasswordService::hash_async(request.password.clone()).await?;

        let mut state = self.state.write().await;
        // Another registration may have landed while hashing.
        if let Err(e) = self.check_duplicates(&state.accounts, &request) {
            state.error = Some(e.to_string());
            return Err(e);
        }

        let id = state
            .accounts
            .iter()
            .map(|a| a.id)
            .max()
            .unwrap_or(0)
            .max(FIRST_LOCAL_ID - 1)
            + 1;
        let account = RegisteredUser {
            id,
            username: request.username.trim().to_string(),
            email: request.email.trim().to_string(),
            first_name: request.first_name.trim().to_string(),
            last_name: request.last_name.trim().to_string(),
            phone: None,
            age: None,
            weight: None,
            height: None,
            password_hash,
            created_at: self.clock.now(),
        };

        let mut accounts = state.accounts.clone();
        accounts.push(account.clone());
        if let Err(e) = self
            .persister
            .commit_json(StorageKey::RegisteredUsers, &accounts)
            .await
        {
            let e = StoreError::from(e);
            state.error = Some(e.to_string());
            return Err(e);
        }
        state.accounts = accounts;
        info!(user_id = id, "Account registered");

        let token = self.tokens.issue(id, self.clock.now())?;
        let user = account.to_user(token);
        if let Err(e) = self.commit_session(&user).await {
            state.error = Some(e.to_string());
            return Err(e);
        }
        state.user = Some(user.clone());
        state.error = None;
        Ok(user)
    }

    /// Merge profile fields into the current user. No-op when signed out.
    #[instrument(skip(self, patch))]
    pub async fn update_user(&self, patch: ProfilePatch) -> StoreResult<Option<User>> {
        validate_profile_patch(&patch).map_err(StoreError::Validation)?;

        let mut state = self.state.write().await;
        let Some(current_id) = state.user.as_ref().map(|u| u.id) else {
            return Ok(None);
        };
        if let Some(email) = patch.email.as_deref() {
            let taken = state
                .accounts
                .iter()
                .any(|a| a.id != current_id && same_name(&a.email, email.trim()));
            if taken {
                let e = StoreError::DuplicateEmail;
                state.error = Some(e.to_string());
                return Err(e);
            }
        }
        let Some(user) = state.user.as_mut() else {
            return Ok(None);
        };
        patch.apply(user);
        let user = user.clone();
        self.persister.submit_json(StorageKey::UserData, &user).await;

        if let Some(account) = state
            .accounts
            .iter_mut()
            .find(|a| a.id == user.id && same_name(&a.username, &user.username))
        {
            account.sync_profile(&user);
            self.persister
                .submit_json(StorageKey::RegisteredUsers, &state.accounts)
                .await;
        }
        debug!(user_id = user.id, "Profile updated");
        Ok(Some(user))
    }

    pub async fn logout(&self) {
        let mut state = self.state.write().await;
        if let Some(user) = state.user.take() {
            info!(user_id = user.id, "Logged out");
        }
        state.error = None;
        self.persister.submit(Write::remove(StorageKey::UserToken)).await;
        self.persister.submit(Write::remove(StorageKey::UserData)).await;
    }

    pub async fn clear_error(&self) {
        self.state.write().await.error = None;
    }

    pub async fn snapshot(&self) -> AuthSnapshot {
        let state = self.state.read().await;
        AuthSnapshot {
            user: state.user.clone(),
            is_authenticated: state.user.is_some(),
            error: state.error.clone(),
        }
    }

    pub async fn current_user(&self) -> Option<User> {
        self.state.read().await.user.clone()
    }

    /// Registered accounts without credentials
    pub async fn registered_users(&self) -> Vec<RegisteredUserSummary> {
        self.state
            .read()
            .await
            .accounts
            .iter()
            .map(RegisteredUserSummary::from)
            .collect()
    }

    pub async fn user_exists(&self, username: &str) -> bool {
        self.state
            .read()
            .await
            .accounts
            .iter()
            .any(|a| same_name(&a.username, username))
    }

    pub async fn user_count(&self) -> usize {
        self.state.read().await.accounts.len()
    }

    /// Delete every local account. The current session is kept.
    pub async fn clear_registered_users(&self) -> StoreResult<()> {
        let mut state = self.state.write().await;
        self.persister
            .commit(Write::remove(StorageKey::RegisteredUsers))
            .await?;
        warn!(count = state.accounts.len(), "Registered accounts cleared");
        state.accounts.clear();
        Ok(())
    }

    /// Drop all in-memory state
    pub(crate) async fn reset(&self) {
        *self.state.write().await = AuthState::default();
    }

    fn check_duplicates(&self, accounts: &[RegisteredUser], request: &RegisterRequest) -> StoreResult<()> {
        if accounts.iter().any(|a| same_name(&a.username, request.username.trim())) {
            return Err(StoreError::DuplicateUsername);
        }
        if accounts.iter().any(|a| same_name(&a.email, request.email.trim())) {
            return Err(StoreError::DuplicateEmail);
        }
        Ok(())
    }

    async fn commit_session(&self, user: &User) -> StoreResult<()> {
        self.persister
            .commit(Write::set(StorageKey::UserToken, user.token.clone()))
            .await?;
        self.persister.commit_json(StorageKey::UserData, user).await?;
        Ok(())
    }

    async fn fail<T>(&self, error: StoreError) -> StoreResult<T> {
        warn!(error = %error, "Auth operation failed");
        self.state.write().await.error = Some(error.to_string());
        Err(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::config::PersistMode;
    use crate::sources::{DisabledAuthSource, SourceError, SourceResult};
    use crate::storage::{KeyValueStore, MemoryKeyValueStore};
    use async_trait::async_trait;
    use chrono::{Duration, TimeZone, Utc};

    struct DemoSource;

    #[async_trait]
    impl AuthSource for DemoSource {
        async fn login(&self, username: &str, password: &str) -> SourceResult<User> {
            if username == "emilys" && password == "emilyspass" {
                Ok(User {
                    id: 1,
                    username: "emilys".to_string(),
                    email: "emily@example.com".to_string(),
                    first_name: "Emily".to_string(),
                    last_name: "Johnson".to_string(),
                    token: "remote-token".to_string(),
                    phone: None,
                    age: None,
                    weight: None,
                    height: None,
                })
            } else {
                Err(SourceError::Rejected)
            }
        }
    }

    struct Fixture {
        storage: Arc<MemoryKeyValueStore>,
        clock: FixedClock,
        store: AuthStore,
    }

    fn fixture_with(source: Arc<dyn AuthSource>) -> Fixture {
        let storage = Arc::new(MemoryKeyValueStore::new());
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap());
        let store = AuthStore::new(
            Persister::new(storage.clone(), PersistMode::Inline),
            source,
            SessionTokens::new("test-secret", 3600),
            Arc::new(clock.clone()),
        );
        Fixture { storage, clock, store }
    }

    fn fixture() -> Fixture {
        fixture_with(Arc::new(DisabledAuthSource))
    }

    fn request(username: &str, email: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: "secret123".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Doe".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_signs_in_and_hashes_password() {
        let f = fixture();
        let user = f.store.register(request("alice", "alice@example.com")).await.unwrap();
        assert_eq!(user.id, 1000);
        assert!(f.store.snapshot().await.is_authenticated);

        let raw = f.storage.get(StorageKey::RegisteredUsers.as_str()).await.unwrap().unwrap();
        assert!(!raw.contains("secret123"));
        assert!(raw.contains("passwordHash"));
        assert_eq!(
            f.storage.get(StorageKey::UserToken.as_str()).await.unwrap(),
            Some(user.token.clone())
        );
    }

    #[tokio::test]
    async fn test_duplicate_username_then_email() {
        let f = fixture();
        f.store.register(request("alice", "alice@example.com")).await.unwrap();

        let err = f.store.register(request("ALICE", "other@example.com")).await.unwrap_err();
        assert_eq!(err, StoreError::DuplicateUsername);
        let err = f.store.register(request("bob", "Alice@Example.com")).await.unwrap_err();
        assert_eq!(err, StoreError::DuplicateEmail);
        assert_eq!(f.store.user_count().await, 1);
        assert!(f.store.snapshot().await.error.is_some());
    }

    #[tokio::test]
    async fn test_ids_increase_from_max() {
        let f = fixture();
        f.store.register(request("alice", "a@example.com")).await.unwrap();
        let bob = f.store.register(request("bob", "b@example.com")).await.unwrap();
        assert_eq!(bob.id, 1001);
    }

    #[tokio::test]
    async fn test_login_local_case_insensitive() {
        let f = fixture();
        f.store.register(request("alice", "a@example.com")).await.unwrap();
        f.store.logout().await;

        let user = f.store.login("Alice", "secret123").await.unwrap();
        assert_eq!(user.username, "alice");
        assert!(f.store.login("alice", "wrong-pass").await.is_err());
    }

    #[tokio::test]
    async fn test_login_falls_back_to_demo_source() {
        let f = fixture_with(Arc::new(DemoSource));
        let user = f.store.login("emilys", "emilyspass").await.unwrap();
        assert_eq!(user.token, "remote-token");

        f.store.logout().await;
        let err = f.store.login("ghost", "nope").await.unwrap_err();
        assert_eq!(err, StoreError::InvalidCredentials);
        assert_eq!(f.store.snapshot().await.error, Some(err.to_string()));

        f.store.clear_error().await;
        assert!(f.store.snapshot().await.error.is_none());
    }

    #[tokio::test]
    async fn test_empty_credentials_rejected() {
        let f = fixture();
        assert!(matches!(
            f.store.login("", "pw").await,
            Err(StoreError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_load_restores_and_expires_sessions() {
        let f = fixture();
        f.store.register(request("alice", "a@example.com")).await.unwrap();

        f.store.load().await.unwrap();
        assert!(f.store.snapshot().await.is_authenticated);

        f.clock.advance(Duration::hours(2));
        f.store.load().await.unwrap();
        assert!(!f.store.snapshot().await.is_authenticated);
        assert_eq!(f.storage.get(StorageKey::UserData.as_str()).await.unwrap(), None);
        assert_eq!(f.store.user_count().await, 1);
    }

    #[tokio::test]
    async fn test_foreign_token_survives_load() {
        let f = fixture_with(Arc::new(DemoSource));
        f.store.login("emilys", "emilyspass").await.unwrap();
        f.clock.advance(Duration::days(365));
        f.store.load().await.unwrap();
        assert!(f.store.snapshot().await.is_authenticated);
    }

    #[tokio::test]
    async fn test_update_user_syncs_account_row() {
        let f = fixture();
        assert_eq!(f.store.update_user(ProfilePatch::default()).await.unwrap(), None);

        f.store.register(request("alice", "a@example.com")).await.unwrap();
        let patch = ProfilePatch {
            age: Some(31),
            ..Default::default()
        };
        let user = f.store.update_user(patch).await.unwrap().unwrap();
        assert_eq!(user.age, Some(31));

        let raw = f.storage.get(StorageKey::RegisteredUsers.as_str()).await.unwrap().unwrap();
        let rows: Vec<RegisteredUser> = serde_json::from_str(&raw).unwrap();
        assert_eq!(rows[0].age, Some(31));
    }

    #[tokio::test]
    async fn test_update_user_rejects_email_of_another_account() {
        let f = fixture();
        f.store.register(request("alice", "alice@example.com")).await.unwrap();
        f.store.register(request("bob", "bob@example.com")).await.unwrap();

        let patch = ProfilePatch {
            email: Some("ALICE@example.com".to_string()),
            ..Default::default()
        };
        let err = f.store.update_user(patch).await.unwrap_err();
        assert_eq!(err, StoreError::DuplicateEmail);
        assert!(f.store.snapshot().await.error.is_some());

        let raw = f.storage.get(StorageKey::RegisteredUsers.as_str()).await.unwrap().unwrap();
        let rows: Vec<RegisteredUser> = serde_json::from_str(&raw).unwrap();
        let emails: Vec<&str> = rows.iter().map(|r| r.email.as_str()).collect();
        assert_eq!(emails, vec!["alice@example.com", "bob@example.com"]);

        let own_email = ProfilePatch {
            email: Some("Bob@Example.com".to_string()),
            ..Default::default()
        };
        let user = f.store.update_user(own_email).await.unwrap().unwrap();
        assert_eq!(user.email, "Bob@Example.com");
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let f = fixture();
        f.store.register(request("alice", "a@example.com")).await.unwrap();
        f.store.logout().await;
        f.store.logout().await;
        assert!(!f.store.snapshot().await.is_authenticated);
        assert_eq!(f.storage.get(StorageKey::UserToken.as_str()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_account_helpers() {
        let f = fixture();
        f.store.register(request("alice", "a@example.com")).await.unwrap();
        assert!(f.store.user_exists("ALICE").await);
        assert!(!f.store.user_exists("bob").await);
        assert_eq!(f.store.registered_users().await[0].username, "alice");

        f.store.clear_registered_users().await.unwrap();
        assert_eq!(f.store.user_count().await, 0);
        assert!(f.store.snapshot().await.is_authenticated);
    }

    #[tokio::test]
    async fn test_failed_session_commit_stays_signed_out() {
        let f = fixture_with(Arc::new(DemoSource));
        f.storage.set_failing(true);
        let err = f.store.login("emilys", "emilyspass").await.unwrap_err();
        assert!(matches!(err, StoreError::Storage(_)));
        assert!(!f.store.snapshot().await.is_authenticated);
    }
}
