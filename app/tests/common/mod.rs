//! Common test utilities for integration tests
//!
//! Every `TestApp` runs against an in-memory key-value store, the bundled
//! exercise catalog and a fixed clock, with inline persistence so storage
//! can be inspected right after a request returns.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{DateTime, TimeZone, Utc};
use fitbuddy_app::{
    clock::FixedClock,
    config::{AppConfig, PersistMode},
    routes,
    sources::{BundledCatalog, DisabledAuthSource},
    state::{AppState, Dependencies},
    storage::MemoryKeyValueStore,
};
use std::sync::Arc;
use tower::ServiceExt;

/// Test application wrapper
pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    pub storage: Arc<MemoryKeyValueStore>,
    pub clock: FixedClock,
}

pub fn morning() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap()
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_storage(Arc::new(MemoryKeyValueStore::new()), FixedClock::new(morning())).await
    }

    /// Boot against existing storage, as a relaunch would
    pub async fn with_storage(storage: Arc<MemoryKeyValueStore>, clock: FixedClock) -> Self {
        let deps = Dependencies {
            storage: storage.clone(),
            exercise_source: Arc::new(BundledCatalog::new()),
            auth_source: Arc::new(DisabledAuthSource),
            clock: Arc::new(clock.clone()),
            persist_mode: PersistMode::Inline,
        };
        let state = AppState::new(AppConfig::default(), deps);
        let report = state.load_all().await;
        assert!(report.is_clean(), "load failures: {:?}", report.failures);

        let app = routes::create_router(state.clone());
        Self {
            app,
            state,
            storage,
            clock,
        }
    }

    /// Send a request and return the status plus the raw body
    pub async fn request(&self, method: &str, path: &str, body: Option<&str>) -> (StatusCode, String) {
        let builder = Request::builder().method(method).uri(path);
        let request = match body {
            Some(body) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    pub async fn get(&self, path: &str) -> (StatusCode, String) {
        self.request("GET", path, None).await
    }

    pub async fn post(&self, path: &str, body: &str) -> (StatusCode, String) {
        self.request("POST", path, Some(body)).await
    }

    pub async fn put(&self, path: &str, body: &str) -> (StatusCode, String) {
        self.request("PUT", path, Some(body)).await
    }

    pub async fn patch(&self, path: &str, body: &str) -> (StatusCode, String) {
        self.request("PATCH", path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> (StatusCode, String) {
        self.request("DELETE", path, None).await
    }
}

/// Parse a response body as JSON
pub fn json(body: &str) -> serde_json::Value {
    serde_json::from_str(body).unwrap()
}
