//! REST API error types
//!
//! Every error renders as `{"error": {"code", "message", "field"?}}` with a
//! matching HTTP status code.

use wit_core::CoreError;
use wit_db::DbError;

use std::panic::Location;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use serde::Serialize;
use thiserror::Error;

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code (e.g., "NOT_FOUND", "VALIDATION_ERROR")
    pub code: String,
    pub message: String,
    /// Offending field or query parameter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// API errors with associated HTTP status codes
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("Resource not found: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    /// Validation error (400)
    #[error("Validation failed: {message} {location}")]
    Validation {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    /// Version conflict for optimistic locking (409)
    #[error("Conflict: resource was modified (current version: {current_version}) {location}")]
    Conflict {
        message: String,
        current_version: i32,
        location: ErrorLocation,
    },

    /// Internal server error (500)
    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },

    /// Bad request (400)
    #[error("Bad request: {message} {location}")]
    BadRequest {
        message: String,
        location: ErrorLocation,
    },
}

impl ApiError {
    #[track_caller]
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        ApiError::NotFound {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn validation<S: Into<String>>(message: S, field: &str) -> Self {
        ApiError::Validation {
            message: message.into(),
            field: Some(field.to_string()),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Machine-readable code of this error
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::NotFound { .. } => "NOT_FOUND",
            ApiError::Validation { .. } => "VALIDATION_ERROR",
            ApiError::Conflict { .. } => "CONFLICT",
            ApiError::Internal { .. } => "INTERNAL_ERROR",
            ApiError::BadRequest { .. } => "BAD_REQUEST",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        log::error!("{}", self);

        let code = self.code().to_string();
        let (status, message, field) = match self {
            ApiError::NotFound { message, .. } => (StatusCode::NOT_FOUND, message, None),
            ApiError::Validation { message, field, .. } => {
                (StatusCode::BAD_REQUEST, message, field)
            }
            ApiError::Conflict {
                message,
                current_version,
                ..
            } => (
                StatusCode::CONFLICT,
                format!("{} (current version: {})", message, current_version),
                None,
            ),
            ApiError::Internal { message, .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, message, None)
            }
            ApiError::BadRequest { message, .. } => (StatusCode::BAD_REQUEST, message, None),
        };

        let body = ApiErrorBody {
            code,
            message,
            field,
        };
        (status, Json(ApiErrorResponse { error: body })).into_response()
    }
}

/// Convert UUID parse errors to API errors
impl From<uuid::Error> for ApiError {
    #[track_caller]
    fn from(e: uuid::Error) -> Self {
        ApiError::Validation {
            message: format!("Invalid UUID format: {}", e),
            field: None,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Convert listing core errors to API errors
impl From<CoreError> for ApiError {
    #[track_caller]
    fn from(e: CoreError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        match e {
            CoreError::BadInput {
                message,
                parameter: Some(field),
                ..
            } => ApiError::Validation {
                message,
                field: Some(field),
                location,
            },
            CoreError::BadInput { message, .. } => ApiError::BadRequest { message, location },
            CoreError::NotFound { entity, id, .. } => ApiError::NotFound {
                message: format!("{} {} not found", entity, id),
                location,
            },
            CoreError::Conflict {
                entity,
                id,
                current_version,
                ..
            } => ApiError::Conflict {
                message: format!("{} {} was modified", entity, id),
                current_version,
                location,
            },
            CoreError::Storage { message, .. } => {
                // Don't expose storage details to clients
                log::error!("Storage error: {}", message);
                ApiError::Internal {
                    message: "Database operation failed".to_string(),
                    location,
                }
            }
        }
    }
}

/// Convert database errors to API errors
impl From<DbError> for ApiError {
    #[track_caller]
    fn from(e: DbError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        match e {
            DbError::NotFound { entity, id, .. } => ApiError::NotFound {
                message: format!("{} {} not found", entity, id),
                location,
            },
            DbError::VersionConflict {
                entity,
                id,
                current_version,
                ..
            } => ApiError::Conflict {
                message: format!("{} {} was modified", entity, id),
                current_version,
                location,
            },
            DbError::Invalid { message, .. } => ApiError::BadRequest { message, location },
            DbError::Sqlx {
                source: sqlx::Error::RowNotFound,
                ..
            } => ApiError::NotFound {
                message: "Resource not found".to_string(),
                location,
            },
            other => {
                log::error!("Database error: {}", other);
                ApiError::Internal {
                    message: "Database operation failed".to_string(),
                    location,
                }
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
