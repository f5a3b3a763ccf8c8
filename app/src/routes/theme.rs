//! Theme routes

use crate::error::ApiResult;
use crate::state::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use fitbuddy_shared::ThemeSnapshot;

pub fn theme_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(current).put(save))
        .route("/toggle", post(toggle))
}

async fn current(State(state): State<AppState>) -> Json<ThemeSnapshot> {
    Json(state.theme.snapshot().await)
}

/// POST /api/v1/theme/toggle
async fn toggle(State(state): State<AppState>) -> Json<ThemeSnapshot> {
    let is_dark = state.theme.toggle().await;
    Json(ThemeSnapshot { is_dark })
}

/// PUT /api/v1/theme
///
/// Explicit save; storage failures are reported.
async fn save(
    State(state): State<AppState>,
    Json(req): Json<ThemeSnapshot>,
) -> ApiResult<Json<ThemeSnapshot>> {
    Ok(Json(state.theme.save(req.is_dark).await?))
}
