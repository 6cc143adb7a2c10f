//! Domain error types for the book reader server.
//!
//! Uses thiserror for ergonomic error handling with automatic Display implementations.

use actix_web::{HttpResponse, ResponseError};
use std::fmt;

/// Application-level errors.
///
/// Remote-proxy failures are kept as distinct kinds so callers can branch
/// on cause: a missing file is permanent for that input, a relay failure
/// or timeout is transient and the client may retry the view flow.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Server-side misconfiguration (e.g. missing bot token)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Resource not found, locally or on the platform
    #[error("{0} not found")]
    NotFound(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Transport failure while relaying bytes from the platform
    #[error("Relay error: {0}")]
    Relay(String),

    /// An upstream network phase exceeded its time bound
    #[error("Upstream timeout: {0}")]
    Timeout(String),
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let (status, error_code, response_message) = match self {
            AppError::Configuration(err_str) => {
                tracing::error!("Configuration error: {}", err_str);
                (
                    actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "CONFIGURATION_ERROR",
                    "Server is not configured for this operation".to_string(),
                )
            }
            AppError::NotFound(_) => (
                actix_web::http::StatusCode::NOT_FOUND,
                "NOT_FOUND",
                self.to_string(),
            ),
            AppError::InvalidInput(_) => (
                actix_web::http::StatusCode::BAD_REQUEST,
                "INVALID_INPUT",
                self.to_string(),
            ),
            AppError::Relay(err_str) => {
                tracing::error!("Relay error: {}", err_str);
                (
                    actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "RELAY_ERROR",
                    self.to_string(),
                )
            }
            AppError::Timeout(_) => (
                actix_web::http::StatusCode::GATEWAY_TIMEOUT,
                "GATEWAY_TIMEOUT",
                self.to_string(),
            ),
        };

        HttpResponse::build(status).json(ErrorResponse {
            error: error_code.to_string(),
            message: response_message,
        })
    }
}

/// Error response body matching OpenAPI schema.
#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

// Conversion implementations for common error types

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(format!("JSON parsing error: {}", err))
    }
}
