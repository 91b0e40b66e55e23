//! The invocation client.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use faas_protocol::{is_success_status, InvocationMode, LogType};

use crate::config::ClientConfig;
use crate::error::{InvokeError, Result};
use crate::payload::Payload;
use crate::transport::{HttpTransport, InvocationTransport, WireRequest};

/// Client for synchronous invocation of gateway-hosted functions.
///
/// Holds no state across calls beyond its immutable configuration and the
/// shared transport handle; cloning is cheap and many invocations may run
/// concurrently over one instance without interfering.
#[derive(Clone)]
pub struct FunctionClient {
    transport: Arc<dyn InvocationTransport>,
    log_type: LogType,
}

impl FunctionClient {
    /// Build a client over the HTTP transport for the configured endpoint.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(config)?;
        Ok(Self {
            transport: Arc::new(transport),
            log_type: config.log_type,
        })
    }

    /// Build a client over an injected transport. Tests use this to
    /// substitute a stub for the wire.
    pub fn with_transport(transport: Arc<dyn InvocationTransport>, log_type: LogType) -> Self {
        Self {
            transport,
            log_type,
        }
    }

    /// Invoke `function` synchronously and decode its JSON result into `R`.
    ///
    /// The call suspends until the remote side completes; dropping the
    /// returned future aborts the in-flight request. There is no retry or
    /// backoff: every failure is a hard stop for this invocation, reported
    /// as a typed [`InvokeError`] for the caller to handle.
    pub async fn invoke<T, R>(&self, function: &str, payload: Payload<T>) -> Result<R>
    where
        T: Serialize,
        R: DeserializeOwned,
    {
        if function.trim().is_empty() {
            return Err(InvokeError::EmptyFunctionName);
        }

        let wire = payload.into_wire()?;

        // Payload contents are deliberately not logged, only their size.
        tracing::debug!(
            function,
            mode = InvocationMode::RequestResponse.as_str(),
            payload_bytes = wire.len(),
            "invoking remote function"
        );

        let response = self
            .transport
            .send(WireRequest {
                function: function.to_string(),
                mode: InvocationMode::RequestResponse,
                log_type: self.log_type,
                payload: wire,
            })
            .await?;

        if !is_success_status(response.status_code) {
            return Err(InvokeError::RemoteStatus {
                status_code: response.status_code,
                body: response.payload,
            });
        }

        if let Some(error_type) = response.function_error {
            let payload = serde_json::from_str(&response.payload)
                .unwrap_or(Value::String(response.payload));
            return Err(InvokeError::Remote {
                error_type,
                payload,
            });
        }

        serde_json::from_str(&response.payload).map_err(InvokeError::Decode)
    }

    /// Invoke and return the result as untyped JSON.
    pub async fn invoke_value(&self, function: &str, payload: Payload) -> Result<Value> {
        self.invoke(function, payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::transport::WireResponse;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    /// Transport stub: records every request and replays a programmed
    /// outcome.
    struct StubTransport {
        outcome: Outcome,
        requests: Mutex<Vec<WireRequest>>,
    }

    enum Outcome {
        Respond(WireResponse),
        Fail(String),
    }

    impl StubTransport {
        fn responding(response: WireResponse) -> Self {
            Self {
                outcome: Outcome::Respond(response),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                outcome: Outcome::Fail(message.to_string()),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn sent(&self) -> Vec<WireRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl InvocationTransport for StubTransport {
        async fn send(
            &self,
            request: WireRequest,
        ) -> std::result::Result<WireResponse, TransportError> {
            self.requests.lock().unwrap().push(request);
            match &self.outcome {
                Outcome::Respond(response) => Ok(response.clone()),
                Outcome::Fail(message) => Err(TransportError::new(message.clone())),
            }
        }
    }

    fn response(status_code: u16, payload: &str) -> WireResponse {
        WireResponse {
            status_code,
            function_error: None,
            payload: payload.to_string(),
        }
    }

    fn client_over(stub: Arc<StubTransport>) -> FunctionClient {
        FunctionClient::with_transport(stub, LogType::None)
    }

    #[tokio::test]
    async fn test_success_decodes_payload() {
        let stub = Arc::new(StubTransport::responding(response(200, r#"{"ok":true}"#)));
        let client = client_over(stub.clone());

        let result: Value = client
            .invoke(
                "producer",
                Payload::Structured(json!({"op": "SET", "key": "x", "value": "1"})),
            )
            .await
            .unwrap();

        assert_eq!(result, json!({"ok": true}));
        assert_eq!(stub.sent().len(), 1);
        assert_eq!(stub.sent()[0].mode, InvocationMode::RequestResponse);
    }

    #[tokio::test]
    async fn test_created_status_is_accepted() {
        let stub = Arc::new(StubTransport::responding(response(201, r#"{"ok":true}"#)));
        let client = client_over(stub);

        let result: Value = client
            .invoke("producer", Payload::Structured(json!({})))
            .await
            .unwrap();
        assert_eq!(result, json!({"ok": true}));
    }

    #[tokio::test]
    async fn test_error_status_maps_to_remote_status() {
        let stub = Arc::new(StubTransport::responding(response(500, "error")));
        let client = client_over(stub);

        let err = client
            .invoke_value(
                "producer",
                Payload::Structured(json!({"op": "SET", "key": "x", "value": "1"})),
            )
            .await
            .unwrap_err();

        match err {
            InvokeError::RemoteStatus { status_code, body } => {
                assert_eq!(status_code, 500);
                assert_eq!(body, "error");
            }
            other => panic!("expected RemoteStatus, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_event_ack_status_is_not_success() {
        // 202 is an acknowledgement, not a result
        let stub = Arc::new(StubTransport::responding(response(202, "")));
        let client = client_over(stub);

        let err = client
            .invoke_value("producer", Payload::Structured(json!({})))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            InvokeError::RemoteStatus { status_code: 202, .. }
        ));
    }

    #[tokio::test]
    async fn test_transport_failure_maps_to_transport_error() {
        let stub = Arc::new(StubTransport::failing("connection reset by peer"));
        let client = client_over(stub.clone());

        let err = client
            .invoke_value("producer", Payload::Structured(json!({"op": "SET"})))
            .await
            .unwrap_err();

        assert!(matches!(err, InvokeError::Transport(_)));
        // One attempt, no retries
        assert_eq!(stub.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_function_error_header_maps_to_remote() {
        let stub = Arc::new(StubTransport::responding(WireResponse {
            status_code: 200,
            function_error: Some("AccessDenied".to_string()),
            payload: r#"{"errorType":"AccessDenied","errorMessage":"no GET"}"#.to_string(),
        }));
        let client = client_over(stub);

        let err = client
            .invoke_value("consumer", Payload::Structured(json!({"op": "GET"})))
            .await
            .unwrap_err();

        match err {
            InvokeError::Remote {
                error_type,
                payload,
            } => {
                assert_eq!(error_type, "AccessDenied");
                assert_eq!(payload["errorMessage"], "no GET");
            }
            other => panic!("expected Remote, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_json_response_is_decode_error() {
        let stub = Arc::new(StubTransport::responding(response(200, "not-json")));
        let client = client_over(stub);

        let err = client
            .invoke_value("producer", Payload::Structured(json!({})))
            .await
            .unwrap_err();
        assert!(matches!(err, InvokeError::Decode(_)));
    }

    #[tokio::test]
    async fn test_raw_payload_reaches_transport_unmodified() {
        let stub = Arc::new(StubTransport::responding(response(200, "null")));
        let client = client_over(stub.clone());

        let raw = r#"{"op":"SET"}"#;
        let _: Value = client
            .invoke("producer", Payload::<Value>::Raw(raw.to_string()))
            .await
            .unwrap();

        assert_eq!(stub.sent()[0].payload, raw);
    }

    #[tokio::test]
    async fn test_empty_function_name_rejected_before_transport() {
        let stub = Arc::new(StubTransport::responding(response(200, "null")));
        let client = client_over(stub.clone());

        let err = client
            .invoke_value("", Payload::Structured(json!({})))
            .await
            .unwrap_err();

        assert!(matches!(err, InvokeError::EmptyFunctionName));
        assert!(stub.sent().is_empty());
    }

    #[tokio::test]
    async fn test_whitespace_function_name_rejected_before_transport() {
        let stub = Arc::new(StubTransport::responding(response(200, "null")));
        let client = client_over(stub.clone());

        let err = client
            .invoke_value("  ", Payload::Structured(json!({})))
            .await
            .unwrap_err();

        assert!(matches!(err, InvokeError::EmptyFunctionName));
        assert!(stub.sent().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_invocations_share_one_client() {
        let stub = Arc::new(StubTransport::responding(response(200, r#"{"ok":true}"#)));
        let client = client_over(stub.clone());

        let (a, b, c) = tokio::join!(
            client.invoke_value("producer", Payload::Structured(json!({"n": 1}))),
            client.invoke_value("producer", Payload::Structured(json!({"n": 2}))),
            client.invoke_value("producer", Payload::Structured(json!({"n": 3}))),
        );

        assert_eq!(a.unwrap(), json!({"ok": true}));
        assert_eq!(b.unwrap(), json!({"ok": true}));
        assert_eq!(c.unwrap(), json!({"ok": true}));
        assert_eq!(stub.sent().len(), 3);
    }
}
