//! HTTP error handling for the local bridge
//!
//! Store errors become `{error: {code, message}}` bodies with a status code
//! chosen per error kind.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use fitbuddy_shared::{ErrorDetail, ErrorResponse, StoreError};
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Store(e) => match e {
                StoreError::Validation(_) => StatusCode::BAD_REQUEST,
                StoreError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                StoreError::DuplicateUsername | StoreError::DuplicateEmail => StatusCode::CONFLICT,
                StoreError::FetchFailed(_) => StatusCode::BAD_GATEWAY,
                StoreError::Storage(_) | StoreError::Internal(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::Store(e) => e.code(),
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Store(StoreError::Internal(detail)) => {
                error!("Internal error: {}", detail);
                "An internal error occurred".to_string()
            }
            ApiError::Store(StoreError::Storage(e)) => {
                error!("Storage error: {}", e);
                self.to_string()
            }
            _ => self.to_string(),
        };

        let body = Json(ErrorResponse {
            error: ErrorDetail {
                code: self.code().to_string(),
                message,
            },
        });
        (status, body).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
