//! Transport seam between the invocation client and the wire.
//!
//! The client talks to a [`InvocationTransport`] trait object so tests can
//! substitute a stub; [`HttpTransport`] is the production implementation over
//! a shared `reqwest` client. The reqwest client is created once and reused
//! read-only across concurrent calls: it holds no per-call mutable state, so
//! no locking is needed.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;

use faas_protocol::{
    invocation_path, InvocationMode, LogType, HEADER_FUNCTION_ERROR, HEADER_INVOCATION_TYPE,
    HEADER_LOG_TYPE,
};

use crate::config::ClientConfig;
use crate::error::TransportError;

/// One marshalled request handed to the transport. Created per call, never
/// persisted.
#[derive(Debug, Clone)]
pub struct WireRequest {
    pub function: String,
    pub mode: InvocationMode,
    pub log_type: LogType,
    pub payload: String,
}

/// Transport-level response: status, function-error marker, raw body.
#[derive(Debug, Clone)]
pub struct WireResponse {
    pub status_code: u16,
    pub function_error: Option<String>,
    pub payload: String,
}

/// Performs one request/response exchange with the remote invocation API.
#[async_trait]
pub trait InvocationTransport: Send + Sync {
    /// Send the request and await the complete response.
    ///
    /// Only connectivity failures are errors here; non-success status codes
    /// and function errors come back inside [`WireResponse`] for the client
    /// to classify.
    async fn send(&self, request: WireRequest) -> Result<WireResponse, TransportError>;
}

/// HTTP transport posting to `{endpoint}/functions/{name}/invocations`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    /// Build a transport for the configured gateway endpoint.
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(TransportError::from)?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl InvocationTransport for HttpTransport {
    async fn send(&self, request: WireRequest) -> Result<WireResponse, TransportError> {
        let url = format!("{}{}", self.endpoint, invocation_path(&request.function));

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .header(HEADER_INVOCATION_TYPE, request.mode.as_str())
            .header(HEADER_LOG_TYPE, request.log_type.as_str())
            .body(request.payload)
            .send()
            .await
            .map_err(TransportError::from)?;

        let status_code = response.status().as_u16();
        let function_error = response
            .headers()
            .get(HEADER_FUNCTION_ERROR)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);

        let payload = response.text().await.map_err(TransportError::from)?;

        Ok(WireResponse {
            status_code,
            function_error,
            payload,
        })
    }
}
