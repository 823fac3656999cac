//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses with appropriate status codes.
//! Server-side failures are logged here and answered with a generic body.

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use luxehome_core::ValidationError;

use crate::baas::BaasError;
use crate::db::repos::DbError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// Malformed request outside form validation (400)
    BadRequest { message: String },

    /// No or invalid session, wrong secret (401)
    Unauthorized { reason: String },

    /// Authenticated but not the owner (403)
    Forbidden { reason: String },

    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// Database error (500, logged)
    Database(DbError),

    /// Storage or auth backend failure (500, logged)
    Backend(BaasError),

    /// Deployment is missing a setting; message is safe to show (500)
    NotConfigured { message: String },

    /// Request could not be processed at all (500, logged)
    Internal { message: String },
}

impl ApiError {
    pub fn unauthorized(reason: impl Into<String>) -> Self {
        Self::Unauthorized {
            reason: reason.into(),
        }
    }

    pub fn forbidden(reason: impl Into<String>) -> Self {
        Self::Forbidden {
            reason: reason.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }
}

fn internal() -> serde_json::Value {
    json!({
        "error": "internal_error",
        "message": "an internal error occurred"
    })
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Validation(e) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "validation_error",
                    "message": e.to_string()
                }),
            ),
            Self::BadRequest { message } => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "bad_request",
                    "message": message
                }),
            ),
            Self::Unauthorized { reason } => (
                StatusCode::UNAUTHORIZED,
                json!({
                    "error": "unauthorized",
                    "message": reason
                }),
            ),
            Self::Forbidden { reason } => (
                StatusCode::FORBIDDEN,
                json!({
                    "error": "forbidden",
                    "message": reason
                }),
            ),
            Self::NotFound { resource, id } => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": "not_found",
                    "message": format!("{} '{}' not found", resource, id)
                }),
            ),
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!("Database error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, internal())
            }
            Self::Backend(e) => {
                tracing::error!("Backend error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, internal())
            }
            Self::NotConfigured { message } => {
                tracing::warn!("Not configured: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "not_configured",
                        "message": message
                    }),
                )
            }
            Self::Internal { message } => {
                tracing::error!("Internal error: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "internal_error",
                        "message": "Internal server error"
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

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            _ => Self::Database(e),
        }
    }
}

impl From<BaasError> for ApiError {
    fn from(e: BaasError) -> Self {
        match e {
            BaasError::Unauthorized => Self::unauthorized("invalid or expired session"),
            _ => Self::Backend(e),
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(e: MultipartError) -> Self {
        Self::bad_request(format!("invalid form data: {}", e.body_text()))
    }
}
