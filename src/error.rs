//! Application error type and HTTP mapping.
//!
//! Error kinds mirror the conditions the core distinguishes:
//!
//! - [`AppError::NotFound`] - no row matched; expected and recoverable
//! - [`AppError::InvalidArgument`] - bad input, e.g. an empty filter on a
//!   filtered read
//! - [`AppError::Unauthorized`] - missing or invalid bearer token
//! - [`AppError::Store`] - connectivity, transaction, or query failure with
//!   the opaque cause preserved in the details
//!
//! Cache failures are a separate, non-fatal type:
//! [`crate::infrastructure::cache::CacheError`].

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// JSON error payload: `{"code", "message", "details"}`.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug)]
pub enum AppError {
    NotFound { message: String, details: Value },
    InvalidArgument { message: String, details: Value },
    Unauthorized { message: String, details: Value },
    Store { message: String, details: Value },
}

impl AppError {
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn invalid_argument(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidArgument {
            message: message.into(),
            details,
        }
    }

    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }

    pub fn store(message: impl Into<String>, details: Value) -> Self {
        Self::Store {
            message: message.into(),
            details,
        }
    }

    /// Returns true for the not-found kind. Used by call sites that treat
    /// not-found as a normal outcome.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { message, .. } => write!(f, "not found: {message}"),
            Self::InvalidArgument { message, .. } => write!(f, "invalid argument: {message}"),
            Self::Unauthorized { message, .. } => write!(f, "unauthorized: {message}"),
            Self::Store { message, .. } => write!(f, "store error: {message}"),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            AppError::NotFound { message, details } => {
                (StatusCode::NOT_FOUND, "not_found", message, details)
            }
            AppError::InvalidArgument { message, details } => (
                StatusCode::BAD_REQUEST,
                "invalid_argument",
                message,
                details,
            ),
            AppError::Unauthorized { message, details } => {
                (StatusCode::UNAUTHORIZED, "unauthorized", message, details)
            }
            AppError::Store { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "store_error",
                message,
                details,
            ),
        };

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    /// Translates driver errors into the core's kinds: `RowNotFound` maps
    /// to [`AppError::NotFound`], everything else stays an opaque
    /// [`AppError::Store`] with the cause preserved.
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => {
                AppError::not_found("Item not found", json!({}))
            }
            other => AppError::store("Database error", json!({ "cause": other.to_string() })),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::invalid_argument(
            "Validation failed",
            serde_json::to_value(&e).unwrap_or_else(|_| json!({})),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err = AppError::from(sqlx::Error::RowNotFound);
        assert!(err.is_not_found());
    }

    #[test]
    fn test_other_sqlx_errors_map_to_store() {
        let err = AppError::from(sqlx::Error::PoolClosed);
        assert!(matches!(err, AppError::Store { .. }));
        assert!(!err.is_not_found());
    }
}
