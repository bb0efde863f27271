//! Application error type shared by every layer.
//!
//! Each variant carries the user-facing message plus structured JSON details.
//! Messages are part of the public contract: callers may match on them, so
//! they are reproduced verbatim in HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::utils::db_error::is_unique_violation_on_slug;

/// Message returned when a slug is already registered.
pub const SLUG_EXISTS_MESSAGE: &str = "Slug already exists";

/// Message returned when a slug is missing or empty.
pub const SLUG_REQUIRED_MESSAGE: &str = "Please enter a slug!";

/// Message returned when a slug does not resolve to any record.
pub const SLUG_NOT_FOUND_MESSAGE: &str = "Slug not found";

/// Message returned for storage faults. Intentionally generic.
pub const STORAGE_UNAVAILABLE_MESSAGE: &str = "Something went wrong, please try again later";

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serializable error payload.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed or missing input. Never reaches the store.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// The slug is already taken.
    #[error("{message}")]
    Conflict { message: String, details: Value },

    /// Resolution of an unknown slug.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// The persistence layer is unreachable or failing.
    #[error("{message}")]
    StorageUnavailable { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn storage_unavailable(details: Value) -> Self {
        Self::StorageUnavailable {
            message: STORAGE_UNAVAILABLE_MESSAGE.to_string(),
            details,
        }
    }

    /// Conflict for a slug that is already registered.
    pub fn slug_exists(slug: &str) -> Self {
        Self::conflict(SLUG_EXISTS_MESSAGE, json!({ "slug": slug }))
    }

    /// Machine-readable error code used in JSON bodies.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "validation_error",
            AppError::Conflict { .. } => "conflict",
            AppError::NotFound { .. } => "not_found",
            AppError::StorageUnavailable { .. } => "storage_unavailable",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::StorageUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let (message, details) = match self {
            AppError::Validation { message, details }
            | AppError::Conflict { message, details }
            | AppError::NotFound { message, details }
            | AppError::StorageUnavailable { message, details } => (message, details),
        };

        ErrorInfo {
            code: self.code(),
            message: message.clone(),
            details: details.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if is_unique_violation_on_slug(&e) {
            return AppError::conflict(SLUG_EXISTS_MESSAGE, json!({}));
        }

        tracing::error!(error = %e, "Storage operation failed");
        AppError::storage_unavailable(json!({ "reason": "database error" }))
    }
}
