//! Error responses for the HTTP API.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::debug;

use crate::domain::ValidationError;
use crate::error::StoreError;

/// An error already mapped to an HTTP status, rendered as `{"error": message}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// A body that could not be parsed as the expected JSON.
    ///
    /// Syntax errors, wrong field types and a missing content type are all
    /// reported as 400.
    pub fn invalid_json(rejection: &JsonRejection) -> Self {
        debug!(status = %rejection.status(), "Rejected request body: {}", rejection);
        Self::bad_request(rejection.body_text())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(e) => e.into(),
            StoreError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, "Contact not found."),
            // Internal details stay in the server log.
            _ => Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error."),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
