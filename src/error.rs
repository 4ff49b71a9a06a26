// HTTP API Error Types
//
// Every failure a request can end in is one of these variants, and
// `IntoResponse` below is the only place an error becomes an HTTP response.
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::database::{StoreError, ValidationFailure};

const DUPLICATE_KEY_MESSAGE: &str = "Email already exist";
const MALFORMED_ID_MESSAGE: &str = "Error: Invalid user id or user id does not exist";
const UNKNOWN_MESSAGE: &str = "Something went wrong, please try again later.";

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // Domain failures carrying their own status and message
    BadRequest(String),
    Unauthorized(String),
    AccessDenied(String),
    NotFound(String),

    // Storage failures
    DuplicateKey,
    Validation(ValidationFailure),
    MalformedId,

    /// Anything else. The detail is logged, never returned.
    Unknown(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::AccessDenied(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            // Reported as a server error, matching existing clients
            ApiError::DuplicateKey => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::MalformedId => StatusCode::BAD_REQUEST,
            ApiError::Unknown(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::Unauthorized(msg) => msg,
            ApiError::AccessDenied(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::DuplicateKey => DUPLICATE_KEY_MESSAGE,
            ApiError::Validation(failure) => failure.label(),
            ApiError::MalformedId => MALFORMED_ID_MESSAGE,
            ApiError::Unknown(_) => UNKNOWN_MESSAGE,
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        match self {
            ApiError::Validation(failure) => json!({
                "message": failure.label(),
                "inputs": failure.inputs,
            }),
            _ => json!({ "message": self.message() }),
        }
    }
}

// Static constructor methods
impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::AccessDenied(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn unknown(detail: impl Into<String>) -> Self {
        ApiError::Unknown(detail.into())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Cast { .. } => ApiError::MalformedId,
            StoreError::DuplicateKey(_) => ApiError::DuplicateKey,
            StoreError::Validation(failure) => ApiError::Validation(failure),
            other => ApiError::Unknown(other.to_string()),
        }
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Unknown(detail) => write!(f, "unknown failure: {}", detail),
            _ => write!(f, "{}", self.message()),
        }
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match &self {
            ApiError::Unknown(detail) => tracing::error!("Unhandled failure: {}", detail),
            ApiError::DuplicateKey => tracing::warn!("Duplicate key rejected"),
            ApiError::Validation(failure) => tracing::debug!("Validation failed: {}", failure),
            _ => tracing::debug!(status = %self.status_code(), "{}", self.message()),
        }

        (self.status_code(), Json(self.to_json())).into_response()
    }
}
