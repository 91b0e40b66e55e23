//! # Function Invocation Wire Protocol
//!
//! Shared vocabulary for the invocation client and the function gateway:
//! invocation modes, log capture modes, wire header names, the accepted
//! status set, and the error payload shape. These types are the single
//! source of truth on both sides of the wire.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// WIRE HEADERS
// =============================================================================

/// Header carrying the requested invocation mode.
pub const HEADER_INVOCATION_TYPE: &str = "x-invocation-type";

/// Header carrying the requested log capture mode.
pub const HEADER_LOG_TYPE: &str = "x-log-type";

/// Header the gateway sets when the function itself failed.
///
/// A response carrying this header is a completed call whose payload is an
/// error document, not a result. Status code is still 200 in that case.
pub const HEADER_FUNCTION_ERROR: &str = "x-function-error";

/// Header echoing the execution id assigned to the invocation.
pub const HEADER_EXECUTION_ID: &str = "x-execution-id";

// =============================================================================
// ENUMS
// =============================================================================

/// How a remote call is dispatched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvocationMode {
    /// Caller awaits the function result (synchronous).
    #[default]
    RequestResponse,
    /// Fire-and-forget: the gateway acknowledges receipt and runs the
    /// function in the background.
    Event,
    /// Validate that the function resolves without executing it.
    DryRun,
}

impl InvocationMode {
    /// Wire string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RequestResponse => "RequestResponse",
            Self::Event => "Event",
            Self::DryRun => "DryRun",
        }
    }

    /// Parse from the wire string.
    pub fn parse(value: &str) -> Result<Self, ProtocolError> {
        match value {
            "RequestResponse" => Ok(Self::RequestResponse),
            "Event" => Ok(Self::Event),
            "DryRun" => Ok(Self::DryRun),
            other => Err(ProtocolError::UnknownInvocationMode(other.to_string())),
        }
    }
}

/// Whether the gateway captures execution logs for the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogType {
    /// No log capture.
    #[default]
    None,
    /// Capture the tail of the execution log.
    Tail,
}

impl LogType {
    /// Wire string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Tail => "Tail",
        }
    }

    /// Parse from the wire string.
    pub fn parse(value: &str) -> Result<Self, ProtocolError> {
        match value {
            "None" => Ok(Self::None),
            "Tail" => Ok(Self::Tail),
            other => Err(ProtocolError::UnknownLogType(other.to_string())),
        }
    }
}

// =============================================================================
// STATUS & PATHS
// =============================================================================

/// Whether a transport status code counts as a logical success.
///
/// The accepted set is exactly {200, 201}. 202 (event acknowledgement) is
/// deliberately excluded: a synchronous invocation that comes back with an
/// acknowledgement instead of a result did not succeed.
#[must_use]
pub fn is_success_status(status: u16) -> bool {
    matches!(status, 200 | 201)
}

/// Request path for invoking a named function.
#[must_use]
pub fn invocation_path(function: &str) -> String {
    format!("/functions/{function}/invocations")
}

// =============================================================================
// ERROR PAYLOAD
// =============================================================================

/// JSON document the gateway returns for failed calls.
///
/// Used both for function-level errors (status 200 + function-error header)
/// and gateway-level errors (404 unknown function, 400 bad payload).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub error_type: String,
    pub error_message: String,
}

impl ErrorPayload {
    pub fn new(error_type: impl Into<String>, error_message: impl Into<String>) -> Self {
        Self {
            error_type: error_type.into(),
            error_message: error_message.into(),
        }
    }
}

// =============================================================================
// FUNCTION CONTRACT
// =============================================================================

/// Application-level failure produced by a function handler.
///
/// Distinct from a transport status: the gateway reports it with status 200
/// plus the [`HEADER_FUNCTION_ERROR`] marker and an [`ErrorPayload`] body.
#[derive(Debug, Clone, Error)]
#[error("{error_type}: {message}")]
pub struct FunctionError {
    pub error_type: String,
    pub message: String,
}

impl FunctionError {
    pub fn new(error_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_type: error_type.into(),
            message: message.into(),
        }
    }

    /// Wire shape of this error.
    #[must_use]
    pub fn to_payload(&self) -> ErrorPayload {
        ErrorPayload::new(self.error_type.clone(), self.message.clone())
    }
}

/// A hosted function: takes a JSON event, produces a JSON result.
///
/// Implementations can be swapped freely (cache handlers, relays, test
/// echoes); the gateway only sees this contract.
#[async_trait::async_trait]
pub trait FunctionHandler: Send + Sync {
    /// Run the function for one invocation event.
    async fn handle(&self, event: serde_json::Value) -> Result<serde_json::Value, FunctionError>;
}

// =============================================================================
// ERRORS
// =============================================================================

/// Protocol-level parse errors.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("unknown invocation mode: {0}")]
    UnknownInvocationMode(String),

    #[error("unknown log type: {0}")]
    UnknownLogType(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_round_trip() {
        for mode in [
            InvocationMode::RequestResponse,
            InvocationMode::Event,
            InvocationMode::DryRun,
        ] {
            assert_eq!(InvocationMode::parse(mode.as_str()).unwrap(), mode);
        }
    }

    #[test]
    fn test_mode_rejects_unknown() {
        assert!(InvocationMode::parse("Async").is_err());
    }

    #[test]
    fn test_log_type_round_trip() {
        for log_type in [LogType::None, LogType::Tail] {
            assert_eq!(LogType::parse(log_type.as_str()).unwrap(), log_type);
        }
    }

    #[test]
    fn test_success_status_set() {
        assert!(is_success_status(200));
        assert!(is_success_status(201));
        assert!(!is_success_status(202));
        assert!(!is_success_status(204));
        assert!(!is_success_status(404));
        assert!(!is_success_status(500));
    }

    #[test]
    fn test_invocation_path() {
        assert_eq!(invocation_path("producer"), "/functions/producer/invocations");
    }

    #[test]
    fn test_error_payload_wire_shape() {
        let payload = ErrorPayload::new("AccessDenied", "operation GET is not permitted");
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["errorType"], "AccessDenied");
        assert_eq!(json["errorMessage"], "operation GET is not permitted");
    }
}
