//! Water intake routes

use crate::error::ApiResult;
use crate::state::AppState;
use axum::{
    extract::State,
    routing::{get, post, put},
    Json, Router,
};
use fitbuddy_shared::{AddIntakeRequest, SetGoalRequest, WaterEntry, WaterSnapshot};
use serde::Serialize;

pub fn water_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(today))
        .route("/intake", post(add_intake))
        .route("/undo", post(undo))
        .route("/goal", put(set_goal))
        .route("/reset", post(reset_today))
}

#[derive(Debug, Serialize)]
struct UndoResponse {
    undone: Option<WaterEntry>,
    water: WaterSnapshot,
}

/// GET /api/v1/water
async fn today(State(state): State<AppState>) -> Json<WaterSnapshot> {
    Json(state.water.snapshot().await)
}

/// POST /api/v1/water/intake
async fn add_intake(
    State(state): State<AppState>,
    Json(req): Json<AddIntakeRequest>,
) -> ApiResult<Json<WaterSnapshot>> {
    Ok(Json(state.water.add_intake(req.amount_ml).await?))
}

/// POST /api/v1/water/undo
async fn undo(State(state): State<AppState>) -> Json<UndoResponse> {
    let undone = state.water.undo_last().await;
    Json(UndoResponse {
        undone,
        water: state.water.snapshot().await,
    })
}

/// PUT /api/v1/water/goal
async fn set_goal(
    State(state): State<AppState>,
    Json(req): Json<SetGoalRequest>,
) -> ApiResult<Json<WaterSnapshot>> {
    Ok(Json(state.water.set_goal(req.goal_ml).await?))
}

/// POST /api/v1/water/reset
async fn reset_today(State(state): State<AppState>) -> Json<WaterSnapshot> {
    Json(state.water.reset_today().await)
}
