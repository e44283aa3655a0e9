use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::StoreError;
use thiserror::Error;
use tracing::warn;

/// Failure payload; the message never carries internal error text.
pub fn failure_body(message: &str) -> serde_json::Value {
    serde_json::json!({ "success": false, "message": message })
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request body: {0}")]
    BadRequest(#[from] JsonRejection),
    #[error("store failure: {0}")]
    Store(#[from] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(rejection) => {
                let status = rejection.status();
                warn!(status = %status, error = %rejection.body_text(), "rejected save request body");
                (status, Json(failure_body("Request body must be a JSON array of questions."))).into_response()
            }
            // Already logged by the store with backend and cause
            ApiError::Store(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(failure_body("Failed to save data to server.")),
            )
                .into_response(),
        }
    }
}
