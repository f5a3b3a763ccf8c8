//! Favorites routes

use crate::state::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use fitbuddy_shared::{Exercise, FavoritesSnapshot};
use serde::Serialize;

pub fn favorites_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list))
        .route("/toggle", post(toggle))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ToggleResponse {
    is_favorite: bool,
    #[serde(flatten)]
    favorites: FavoritesSnapshot,
}

async fn list(State(state): State<AppState>) -> Json<FavoritesSnapshot> {
    Json(state.favorites.snapshot().await)
}

/// POST /api/v1/favorites/toggle
///
/// Adding a favorite also posts a notification.
async fn toggle(State(state): State<AppState>, Json(exercise): Json<Exercise>) -> Json<ToggleResponse> {
    let is_favorite = state.toggle_favorite(exercise).await;
    Json(ToggleResponse {
        is_favorite,
        favorites: state.favorites.snapshot().await,
    })
}
