//! HTTP bridge for the FitBuddy stores
//!
//! Every store operation is exposed under `/api/v1`. Handlers are thin: they
//! call the store and return its snapshot.

use crate::error::ApiResult;
use crate::state::AppState;
use axum::{
    extract::State,
    http::{header, Method, StatusCode},
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod auth;
mod exercise;
mod favorites;
mod health;
mod hydration;
mod notifications;
mod theme;
mod workouts;

pub use auth::auth_routes;
pub use exercise::exercise_routes;
pub use favorites::favorites_routes;
pub use hydration::water_routes;
pub use notifications::notification_routes;
pub use theme::theme_routes;
pub use workouts::workout_routes;

/// Create the main application router with all middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        .nest("/api/v1", api_routes())
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                ])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API v1 routes
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { "FitBuddy API v1" }))
        .route("/reset", post(reset_all))
        .nest("/auth", auth_routes())
        .nest("/exercises", exercise_routes())
        .nest("/favorites", favorites_routes())
        .nest("/water", water_routes())
        .nest("/workouts", workout_routes())
        .nest("/notifications", notification_routes())
        .nest("/theme", theme_routes())
}

/// POST /api/v1/reset
///
/// Clears every persisted key and returns all stores to defaults.
async fn reset_all(State(state): State<AppState>) -> ApiResult<StatusCode> {
    state.reset_all().await?;
    Ok(StatusCode::NO_CONTENT)
}
