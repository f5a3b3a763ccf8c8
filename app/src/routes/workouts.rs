//! Workout builder routes

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
    Json, Router,
};
use fitbuddy_shared::{Exercise, SaveWorkoutRequest, SavedWorkout, WorkoutExercisePatch, WorkoutSnapshot};
use serde::Serialize;

pub fn workout_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(current))
        .route("/exercises", post(add_exercise))
        .route("/exercises/:name", patch(update_exercise).delete(remove_exercise))
        .route("/save", post(save_workout))
        .route("/current", delete(clear_current))
}

#[derive(Debug, Serialize)]
struct ChangeResponse {
    changed: bool,
    workout: WorkoutSnapshot,
}

#[derive(Debug, Serialize)]
struct SaveResponse {
    saved: SavedWorkout,
    workout: WorkoutSnapshot,
}

async fn current(State(state): State<AppState>) -> Json<WorkoutSnapshot> {
    Json(state.workouts.snapshot().await)
}

/// POST /api/v1/workouts/exercises
async fn add_exercise(State(state): State<AppState>, Json(exercise): Json<Exercise>) -> Json<ChangeResponse> {
    let changed = state.workouts.add_exercise(exercise).await;
    Json(ChangeResponse {
        changed,
        workout: state.workouts.snapshot().await,
    })
}

/// PATCH /api/v1/workouts/exercises/:name
async fn update_exercise(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(patch): Json<WorkoutExercisePatch>,
) -> ApiResult<Json<ChangeResponse>> {
    let snapshot = state.workouts.snapshot().await;
    if !snapshot.current_workout.iter().any(|e| e.name() == name) {
        return Err(ApiError::NotFound(format!("{} is not in the current workout", name)));
    }
    let changed = state.workouts.update_exercise(&name, patch).await?;
    Ok(Json(ChangeResponse {
        changed,
        workout: state.workouts.snapshot().await,
    }))
}

/// DELETE /api/v1/workouts/exercises/:name
async fn remove_exercise(State(state): State<AppState>, Path(name): Path<String>) -> Json<ChangeResponse> {
    let changed = state.workouts.remove_exercise(&name).await;
    Json(ChangeResponse {
        changed,
        workout: state.workouts.snapshot().await,
    })
}

/// POST /api/v1/workouts/save
///
/// 201 with the saved workout, or 204 when the current workout is empty.
async fn save_workout(
    State(state): State<AppState>,
    Json(req): Json<SaveWorkoutRequest>,
) -> ApiResult<Response> {
    let Some(saved) = state.workouts.save_workout(&req.name).await? else {
        return Ok(StatusCode::NO_CONTENT.into_response());
    };
    let body = SaveResponse {
        saved,
        workout: state.workouts.snapshot().await,
    };
    Ok((StatusCode::CREATED, Json(body)).into_response())
}

/// DELETE /api/v1/workouts/current
async fn clear_current(State(state): State<AppState>) -> Json<WorkoutSnapshot> {
    state.workouts.clear().await;
    Json(state.workouts.snapshot().await)
}
