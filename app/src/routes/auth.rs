//! Authentication routes
//!
//! Session lifecycle plus the local account helpers.

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use fitbuddy_shared::{AuthSnapshot, LoginRequest, ProfilePatch, RegisterRequest, RegisteredUserSummary, User};

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
        .route("/logout", post(logout))
        .route("/session", get(session))
        .route("/profile", put(update_profile))
        .route("/error", delete(clear_error))
        .route("/accounts", get(list_accounts).delete(clear_accounts))
}

/// POST /api/v1/auth/login
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<AuthSnapshot>> {
    state.auth.login(&req.username, &req.password).await?;
    Ok(Json(state.auth.snapshot().await))
}

/// POST /api/v1/auth/register
async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AuthSnapshot>)> {
    state.auth.register(req).await?;
    Ok((StatusCode::CREATED, Json(state.auth.snapshot().await)))
}

/// POST /api/v1/auth/logout
async fn logout(State(state): State<AppState>) -> Json<AuthSnapshot> {
    state.auth.logout().await;
    Json(state.auth.snapshot().await)
}

/// GET /api/v1/auth/session
async fn session(State(state): State<AppState>) -> Json<AuthSnapshot> {
    Json(state.auth.snapshot().await)
}

/// PUT /api/v1/auth/profile
async fn update_profile(
    State(state): State<AppState>,
    Json(patch): Json<ProfilePatch>,
) -> ApiResult<Json<User>> {
    state
        .auth
        .update_user(patch)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::Unauthorized("No user is signed in".to_string()))
}

/// DELETE /api/v1/auth/error
async fn clear_error(State(state): State<AppState>) -> Json<AuthSnapshot> {
    state.auth.clear_error().await;
    Json(state.auth.snapshot().await)
}

/// GET /api/v1/auth/accounts
async fn list_accounts(State(state): State<AppState>) -> Json<Vec<RegisteredUserSummary>> {
    Json(state.auth.registered_users().await)
}

/// DELETE /api/v1/auth/accounts
async fn clear_accounts(State(state): State<AppState>) -> ApiResult<StatusCode> {
    state.auth.clear_registered_users().await?;
    Ok(StatusCode::NO_CONTENT)
}
