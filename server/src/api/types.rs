//! Shared API types
//!
//! Common error envelope used across all endpoints. Every error body is
//! `{error, code, message}` so clients handle one shape.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::data::sqlite::SqliteError;

/// Standard API error response
#[derive(Debug)]
pub enum ApiError {
    BadRequest { code: String, message: String },
    NotFound { code: String, message: String },
    Conflict { code: String, message: String },
    Internal { message: String },
}

impl ApiError {
    pub fn bad_request(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn not_found(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NotFound {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Map a data-layer error to its API status
    ///
    /// Reference failures (unknown edition, team, fixture) are client
    /// errors, not storage failures; only genuine database errors
    /// become opaque 500s.
    pub fn from_sqlite(e: SqliteError) -> Self {
        match e {
            SqliteError::NotFound { entity, id } => Self::NotFound {
                code: "NOT_FOUND".to_string(),
                message: format!("{} {} not found", entity, id),
            },
            SqliteError::Validation(message) => Self::BadRequest {
                code: "VALIDATION_ERROR".to_string(),
                message,
            },
            SqliteError::Conflict(message) => Self::Conflict {
                code: "CONFLICT".to_string(),
                message,
            },
            e => {
                tracing::error!(error = %e, "SQLite error");
                Self::Internal {
                    message: "Database operation failed".to_string(),
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, code, message) = match self {
            Self::BadRequest { code, message } => {
                (StatusCode::BAD_REQUEST, "bad_request", code, message)
            }
            Self::NotFound { code, message } => (StatusCode::NOT_FOUND, "not_found", code, message),
            Self::Conflict { code, message } => (StatusCode::CONFLICT, "conflict", code, message),
            Self::Internal { message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "INTERNAL".to_string(),
                message,
            ),
        };
        (
            status,
            Json(serde_json::json!({
                "error": error_type,
                "code": code,
                "message": message
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let api = ApiError::from_sqlite(SqliteError::not_found("fixture", 7));
        assert!(matches!(api, ApiError::NotFound { .. }));
    }

    #[test]
    fn test_validation_maps_to_400() {
        let api = ApiError::from_sqlite(SqliteError::validation("bad"));
        assert!(matches!(api, ApiError::BadRequest { .. }));
    }

    #[test]
    fn test_conflict_maps_to_409() {
        let api = ApiError::from_sqlite(SqliteError::conflict("dup"));
        assert!(matches!(api, ApiError::Conflict { .. }));
    }

    #[test]
    fn test_database_error_is_opaque_500() {
        let api = ApiError::from_sqlite(SqliteError::Database(sqlx::Error::PoolClosed));
        match api {
            ApiError::Internal { message } => assert_eq!(message, "Database operation failed"),
            other => panic!("expected internal error, got {:?}", other),
        }
    }
}
