//! Exercise catalog routes

use crate::error::ApiResult;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    routing::{get, post, put},
    Json, Router,
};
use fitbuddy_shared::{CatalogSnapshot, Exercise, ExerciseQuery, FetchOutcome, FilterUpdate};
use serde::{Deserialize, Serialize};

pub fn exercise_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_catalog))
        .route("/fetch", post(fetch))
        .route("/filter", put(set_filter).delete(clear_filters))
        .route("/search", get(search_remote))
}

#[derive(Debug, Deserialize)]
struct CatalogParams {
    q: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    #[serde(default)]
    term: String,
}

#[derive(Debug, Serialize)]
struct FetchResponse {
    outcome: FetchOutcome,
    catalog: CatalogSnapshot,
}

/// GET /api/v1/exercises?q=
///
/// With `q`, `filteredExercises` is further narrowed by name or muscle.
async fn get_catalog(
    State(state): State<AppState>,
    Query(params): Query<CatalogParams>,
) -> Json<CatalogSnapshot> {
    let mut snapshot = state.catalog.snapshot().await;
    if let Some(q) = params.q.as_deref() {
        snapshot.filtered_exercises = state.catalog.search(q).await;
    }
    Json(snapshot)
}

/// POST /api/v1/exercises/fetch
async fn fetch(
    State(state): State<AppState>,
    Json(query): Json<ExerciseQuery>,
) -> ApiResult<Json<FetchResponse>> {
    let outcome = state.catalog.fetch(query).await?;
    Ok(Json(FetchResponse {
        outcome,
        catalog: state.catalog.snapshot().await,
    }))
}

/// PUT /api/v1/exercises/filter
async fn set_filter(
    State(state): State<AppState>,
    Json(update): Json<FilterUpdate>,
) -> Json<CatalogSnapshot> {
    Json(state.catalog.set_filter(update).await)
}

/// DELETE /api/v1/exercises/filter
async fn clear_filters(State(state): State<AppState>) -> Json<CatalogSnapshot> {
    Json(state.catalog.clear_filters().await)
}

/// GET /api/v1/exercises/search?term=
async fn search_remote(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<Exercise>> {
    Json(state.catalog.search_remote(&params.term).await)
}
