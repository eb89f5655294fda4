//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in MTC Sales                              │
//! │                                                                         │
//! │  Handler                                                                │
//! │  Result<Json<T>, ApiError>                                              │
//! │         │                                                               │
//! │         ├── DbError::UniqueViolation ──────► 409 CONFLICT               │
//! │         ├── DbError::NotFound ─────────────► 404 NOT_FOUND              │
//! │         ├── ValidationError ───────────────► 400 VALIDATION_ERROR       │
//! │         ├── PriceCodeError ────────────────► 400 INVALID_CODE           │
//! │         └── DbError::QueryFailed ──────────► 500 DATABASE_ERROR         │
//! │                                              (details only in logs)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Response Body
//! ```json
//! { "code": "NOT_FOUND", "message": "Product not found: TS-001" }
//! ```

use axum::extract::multipart::MultipartError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use mtc_core::{PriceCodeError, ValidationError};
use mtc_db::DbError;

/// Error returned from HTTP handlers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Malformed price code (400)
    InvalidCode,

    /// Malformed request body or upload (400)
    BadRequest,

    /// Missing or rejected credentials (401)
    Unauthorized,

    /// Unique key already taken (409)
    Conflict,

    /// Body over the configured limit (413)
    PayloadTooLarge,

    /// Database operation failed (500)
    DatabaseError,

    /// Internal server error (500)
    Internal,
}

impl ErrorCode {
    pub fn status(&self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError | ErrorCode::InvalidCode | ErrorCode::BadRequest => {
                StatusCode::BAD_REQUEST
            }
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ErrorCode::DatabaseError | ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::BadRequest, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Unauthorized, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code.status(), Json(self)).into_response()
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            DbError::UniqueViolation { field, value } => ApiError::new(
                ErrorCode::Conflict,
                format!("{} '{}' already exists", field, value),
            ),
            DbError::ForeignKeyViolation { message } => {
                tracing::warn!("Foreign key violation: {}", message);
                ApiError::validation("Invalid reference")
            }
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Database migration failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database query failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::PasswordHash(e) => {
                tracing::error!("Password hashing failed: {}", e);
                ApiError::internal("Internal error")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<PriceCodeError> for ApiError {
    fn from(err: PriceCodeError) -> Self {
        ApiError::new(ErrorCode::InvalidCode, err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::new(ErrorCode::PayloadTooLarge, "Upload is too large")
        } else {
            ApiError::bad_request(err.body_text())
        }
    }
}

/// Result type alias for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_maps_to_409() {
        let res = ApiError::from(DbError::duplicate("code", "TS-001")).into_response();
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let err = ApiError::from(DbError::not_found("Cart", "abc"));
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Cart not found: abc");
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_price_code_error_maps_to_invalid_code() {
        let err = ApiError::from(PriceCodeError::InvalidCharacter {
            character: 'X',
            position: 1,
        });
        assert_eq!(err.code, ErrorCode::InvalidCode);
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_query_failure_hides_details() {
        let err = ApiError::from(DbError::QueryFailed("no such table: secrets".to_string()));
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(!err.message.contains("secrets"));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_error_maps_to_400() {
        let err = ApiError::from(ValidationError::Required {
            field: "code".to_string(),
        });
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "code is required");
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_error_code_serialization() {
        let json = serde_json::to_string(&ApiError::unauthorized("Missing token")).unwrap();
        assert_eq!(json, r#"{"code":"UNAUTHORIZED","message":"Missing token"}"#);
    }
}
