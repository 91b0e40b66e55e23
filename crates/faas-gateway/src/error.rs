//! # Gateway Error Types
//!
//! Unified error handling for the invocation API layer. Gateway-level
//! errors (unresolvable function, malformed request) map to HTTP status
//! codes; function-level errors never land here, they travel as 200
//! responses with the function-error marker.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use faas_protocol::ErrorPayload;

/// Gateway-level errors
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("function not found: {0}")]
    FunctionNotFound(String),

    #[error("invocation payload is not valid JSON: {0}")]
    InvalidPayload(String),

    #[error("invalid invocation mode: {0}")]
    InvalidMode(String),

    #[error("invalid log type: {0}")]
    InvalidLogType(String),
}

impl GatewayError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::FunctionNotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidPayload(_) | Self::InvalidMode(_) | Self::InvalidLogType(_) => {
                StatusCode::BAD_REQUEST
            }
        }
    }

    /// Get error code for the wire payload
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::FunctionNotFound(_) => "FUNCTION_NOT_FOUND",
            Self::InvalidPayload(_) => "INVALID_PAYLOAD",
            Self::InvalidMode(_) => "INVALID_MODE",
            Self::InvalidLogType(_) => "INVALID_LOG_TYPE",
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorPayload::new(self.error_code(), self.to_string());

        (status, axum::Json(body)).into_response()
    }
}

/// Result type alias for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;
