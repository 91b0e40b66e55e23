//! Invocation client error types

use thiserror::Error;

/// Everything that can go wrong during a single invocation.
///
/// Exactly one of a decoded result or one of these variants is produced per
/// call. Nothing is retried, suppressed, or converted to a default value;
/// recovery is the caller's decision.
#[derive(Debug, Error)]
pub enum InvokeError {
    /// The remote endpoint could not be reached or the connection failed
    /// mid-flight (refused, reset, timed out).
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),

    /// The call completed at the transport level but the status code is
    /// outside the accepted set {200, 201}. Carries the raw response body.
    #[error("remote returned status {status_code}")]
    RemoteStatus { status_code: u16, body: String },

    /// The function itself failed: the response carried the function-error
    /// marker. `payload` is the error document the function produced.
    #[error("function returned error: {error_type}")]
    Remote {
        error_type: String,
        payload: serde_json::Value,
    },

    /// The response body of a logically successful call was not valid JSON.
    #[error("response payload is not valid JSON: {0}")]
    Decode(#[source] serde_json::Error),

    /// The structured payload could not be serialized to the wire format.
    #[error("payload serialization failed: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The function identifier was empty or whitespace-only; no transport
    /// call was made.
    #[error("function name must not be empty")]
    EmptyFunctionName,
}

/// Connectivity-level failure reported by a transport implementation.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self::with_source(err.to_string(), err)
    }
}

pub type Result<T> = std::result::Result<T, InvokeError>;
