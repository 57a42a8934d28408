//! Application error type shared by every layer.
//!
//! Repositories, the lifecycle service, and HTTP handlers all return
//! [`AppError`]. The HTTP layer renders it as:
//!
//! ```json
//! { "error": { "code": "not_found", "message": "Link not found", "details": { "id": "42" } } }
//! ```

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;
use utoipa::ToSchema;

/// Body of every error response.
#[derive(Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorInfo,
}

/// Serializable error payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorInfo {
    #[schema(value_type = String, example = "not_found")]
    pub code: &'static str,
    pub message: String,
    #[schema(value_type = Object)]
    pub details: Value,
}

#[derive(Debug, Error)]
pub enum AppError {
    /// Structurally invalid input, such as an update without an id.
    #[error("validation error: {message}")]
    Validation { message: String, details: Value },

    /// The link does not exist, or the id is not well-formed for the store.
    #[error("not found: {message}")]
    NotFound { message: String, details: Value },

    /// Missing or empty bearer token.
    #[error("unauthorized: {message}")]
    Unauthorized { message: String, details: Value },

    /// The backing store failed the operation.
    #[error("storage error: {message}")]
    Storage { message: String, details: Value },

    /// The caller cancelled the operation or its deadline passed.
    #[error("cancelled: {message}")]
    Cancelled { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
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

    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }

    pub fn storage(message: impl Into<String>, details: Value) -> Self {
        Self::Storage {
            message: message.into(),
            details,
        }
    }

    pub fn cancelled(message: impl Into<String>, details: Value) -> Self {
        Self::Cancelled {
            message: message.into(),
            details,
        }
    }

    /// Machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "validation_error",
            AppError::NotFound { .. } => "not_found",
            AppError::Unauthorized { .. } => "unauthorized",
            AppError::Storage { .. } => "storage_error",
            AppError::Cancelled { .. } => "cancelled",
        }
    }

    /// HTTP status the delivery layer maps this error to.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Cancelled { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Converts the error into its serializable payload.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (message, details) = match self {
            AppError::Validation { message, details }
            | AppError::NotFound { message, details }
            | AppError::Unauthorized { message, details }
            | AppError::Storage { message, details }
            | AppError::Cancelled { message, details } => (message.clone(), details.clone()),
        };

        ErrorInfo {
            code: self.code(),
            message,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let unauthorized = matches!(self, AppError::Unauthorized { .. });

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        let mut response = (status, Json(body)).into_response();

        // RFC 6750
        if unauthorized {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }

        response
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        map_sqlx_error(e)
    }
}

/// Maps a database error onto the application taxonomy.
///
/// `RowNotFound` becomes [`AppError::NotFound`]; everything else is a
/// storage failure. Driver messages stay in the logs, not in the response.
pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    match e {
        sqlx::Error::RowNotFound => AppError::not_found("Link not found", json!({})),
        other => {
            tracing::error!(error = %other, "Database error");
            AppError::storage("Database error", json!({}))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::bad_request("x", json!({})).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::not_found("x", json!({})).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::unauthorized("x", json!({})).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::storage("x", json!({})).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::cancelled("x", json!({})).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err = map_sqlx_error(sqlx::Error::RowNotFound);
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[test]
    fn test_pool_timeout_maps_to_storage() {
        let err: AppError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, AppError::Storage { .. }));
        assert_eq!(err.code(), "storage_error");
    }

    #[test]
    fn test_unauthorized_response_has_challenge_header() {
        let response = AppError::unauthorized("Unauthorized", json!({})).into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }

    #[test]
    fn test_error_info_carries_details() {
        let info = AppError::not_found("Link not found", json!({ "id": "7" })).to_error_info();

        assert_eq!(info.code, "not_found");
        assert_eq!(info.message, "Link not found");
        assert_eq!(info.details["id"], "7");
    }
}
