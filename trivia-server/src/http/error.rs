//! API error type with IntoResponse
//!
//! Every error kind maps to exactly one status through [`ApiError::status`].
//! Bodies are always `{"error": <status>, "message": <text>, "success": false}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::StoreError;
use crate::models::ValidationError;
use crate::quiz::QuizError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Malformed request body or parameters (400)
    BadRequest { reason: String },

    /// Resource or candidate pool empty (404)
    NotFound { resource: &'static str, id: String },

    /// Route exists but not for this method (405)
    MethodNotAllowed,

    /// Well-formed request that can't be processed (422)
    Unprocessable { reason: String },

    /// Store operation failed (422, logged)
    Store(StoreError),

    /// Internal error (500, logged)
    Internal { message: String },
}

impl ApiError {
    pub fn bad_request(reason: impl Into<String>) -> Self {
        Self::BadRequest {
            reason: reason.into(),
        }
    }

    pub fn unprocessable(reason: impl Into<String>) -> Self {
        Self::Unprocessable {
            reason: reason.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Unprocessable { .. } | Self::Store(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message for the status.
    pub fn message(&self) -> &'static str {
        match self {
            Self::BadRequest { .. } => "bad request",
            Self::NotFound { .. } => "resource not found",
            Self::MethodNotAllowed => "method not allowed",
            Self::Unprocessable { .. } | Self::Store(_) => "unprocessable",
            Self::Internal { .. } => "internal server error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            Self::BadRequest { reason } => tracing::debug!(%reason, "Bad request"),
            Self::NotFound { resource, id } => tracing::debug!(resource, %id, "Not found"),
            Self::MethodNotAllowed => {}
            Self::Unprocessable { reason } => tracing::debug!(%reason, "Unprocessable request"),
            Self::Store(e) => tracing::error!("Store error: {}", e),
            Self::Internal { message } => tracing::error!("Internal error: {}", message),
        }

        let body = json!({
            "error": status.as_u16(),
            "message": self.message(),
            "success": false
        });

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::unprocessable(e.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { resource, id } => Self::NotFound { resource, id },
            _ => Self::Store(e),
        }
    }
}

impl From<QuizError> for ApiError {
    fn from(e: QuizError) -> Self {
        match e {
            QuizError::Exhausted => Self::NotFound {
                resource: "unseen question",
                id: "quiz".to_owned(),
            },
            QuizError::Store(e) => e.into(),
        }
    }
}
