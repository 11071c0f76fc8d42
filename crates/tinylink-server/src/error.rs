use crate::model::ErrorResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tinylink_core::StorageError;
use tracing::error;

pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors rendered at the HTTP edge.
///
/// Conflict and absence are distinguishable outcomes for the client;
/// any other storage failure renders generically, with the detail kept
/// in the log only.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid URL")]
    InvalidUrl,
    #[error("code must match [A-Za-z0-9]{{6,8}}")]
    InvalidCode,
    #[error("code already exists: {0}")]
    Conflict(String),
    #[error("not found")]
    NotFound,
    #[error("storage error: {0}")]
    Storage(StorageError),
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Conflict(code) => ApiError::Conflict(code),
            other => ApiError::Storage(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::InvalidUrl | ApiError::InvalidCode => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            ApiError::Conflict(_) => (StatusCode::CONFLICT, "code already exists".to_owned()),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "not found".to_owned()),
            ApiError::Storage(err) => {
                error!(error = %err, "storage operation failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_owned())
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
