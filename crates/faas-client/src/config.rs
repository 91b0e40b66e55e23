//! Invocation client configuration.
//!
//! An explicit configuration struct built once by the entry point and
//! injected into every call site. There is no ambient global client handle.

use std::env;
use std::time::Duration;

use faas_protocol::LogType;

/// Default per-request timeout.
///
/// The original design relied on the transport default and configured no
/// timeout at all; exposing one explicitly is a deliberate deviation.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Invocation client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the function gateway, e.g. `http://127.0.0.1:8080`
    pub endpoint: String,

    /// Per-request timeout applied at the transport level
    pub timeout: Duration,

    /// Log capture mode requested with every invocation
    pub log_type: LogType,
}

impl ClientConfig {
    /// Configuration for a given gateway endpoint with default timeout and
    /// no log capture.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: DEFAULT_TIMEOUT,
            log_type: LogType::None,
        }
    }

    /// Load configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            endpoint: env::var("FAAS_ENDPOINT")
                .unwrap_or_else(|_| "http://127.0.0.1:8080".to_string()),

            timeout: env::var("FAAS_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map_or(DEFAULT_TIMEOUT, Duration::from_millis),

            log_type: env::var("FAAS_LOG_TYPE")
                .ok()
                .and_then(|v| LogType::parse(&v).ok())
                .unwrap_or_default(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://127.0.0.1:8080")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults() {
        let config = ClientConfig::new("http://gateway:9000");
        assert_eq!(config.endpoint, "http://gateway:9000");
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.log_type, LogType::None);
    }
}
