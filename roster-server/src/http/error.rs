//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses with appropriate status codes.

use axum::extract::rejection::FormRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::repos::DbError;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// A form field failed its rule; nothing was written (400)
    Validation(ValidationError),

    /// Resource not found, or a path that names no resource (404)
    NotFound { resource: &'static str, id: String },

    /// Write refused by a uniqueness or reference constraint (409)
    Conflict { resource: &'static str, message: String },

    /// Route exists but not for this method (405)
    MethodNotAllowed,

    /// Body is not a readable urlencoded form (status from the rejection)
    Form(FormRejection),

    /// Database error (500, logged)
    Database(DbError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Validation(e) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "validation_error",
                    "field": e.field(),
                    "message": e.to_string()
                }),
            ),
            Self::NotFound { resource, id } => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": "not_found",
                    "message": format!("{} '{}' not found", resource, id)
                }),
            ),
            Self::Conflict { resource, message } => {
                tracing::warn!(resource = *resource, "Write refused: {}", message);
                (
                    StatusCode::CONFLICT,
                    json!({
                        "error": "conflict",
                        "message": message
                    }),
                )
            }
            Self::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                json!({
                    "error": "method_not_allowed",
                    "message": "method not allowed for this path"
                }),
            ),
            Self::Form(rejection) => (
                rejection.status(),
                json!({
                    "error": "invalid_form",
                    "message": rejection.body_text()
                }),
            ),
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "internal_error",
                        "message": "an internal error occurred"
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        Self::Form(rejection)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            DbError::Conflict { resource, message } => Self::Conflict { resource, message },
            _ => Self::Database(e),
        }
    }
}
