//! Notification center routes

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use fitbuddy_shared::{NewNotification, Notification, NotificationsSnapshot};

pub fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(add).delete(clear_all))
        .route("/read-all", post(mark_all_read))
        .route("/:id/read", post(mark_read))
        .route("/:id", delete(remove))
}

/// GET /api/v1/notifications
async fn list(State(state): State<AppState>) -> Json<NotificationsSnapshot> {
    Json(state.notifications.snapshot().await)
}

/// POST /api/v1/notifications
async fn add(
    State(state): State<AppState>,
    Json(new): Json<NewNotification>,
) -> (StatusCode, Json<Notification>) {
    (StatusCode::CREATED, Json(state.notifications.add(new).await))
}

/// POST /api/v1/notifications/:id/read
async fn mark_read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<NotificationsSnapshot>> {
    state.notifications.mark_read(&id).await;
    let snapshot = state.notifications.snapshot().await;
    if !snapshot.notifications.iter().any(|n| n.id == id) {
        return Err(ApiError::NotFound(format!("Notification {} not found", id)));
    }
    Ok(Json(snapshot))
}

/// POST /api/v1/notifications/read-all
async fn mark_all_read(State(state): State<AppState>) -> Json<NotificationsSnapshot> {
    state.notifications.mark_all_read().await;
    Json(state.notifications.snapshot().await)
}

/// DELETE /api/v1/notifications/:id
async fn remove(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    if !state.notifications.delete(&id).await {
        return Err(ApiError::NotFound(format!("Notification {} not found", id)));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/notifications
async fn clear_all(State(state): State<AppState>) -> StatusCode {
    state.notifications.clear_all().await;
    StatusCode::NO_CONTENT
}
