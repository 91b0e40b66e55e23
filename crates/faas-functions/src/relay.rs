//! Relay function: forwards its own event to another function.
//!
//! The relay is itself a hosted function holding an invocation client. It
//! forwards whatever event it receives to its target: string events travel
//! as raw pre-serialized payloads (byte-for-byte, no re-encoding), anything
//! else as structured JSON.

use async_trait::async_trait;
use serde_json::Value;

use faas_client::{FunctionClient, InvokeError, Payload};
use faas_protocol::{FunctionError, FunctionHandler};

/// Forwards events to a fixed target function.
pub struct RelayFunction {
    client: FunctionClient,
    target: String,
}

impl RelayFunction {
    pub fn new(client: FunctionClient, target: impl Into<String>) -> Self {
        Self {
            client,
            target: target.into(),
        }
    }
}

#[async_trait]
impl FunctionHandler for RelayFunction {
    async fn handle(&self, event: Value) -> Result<Value, FunctionError> {
        tracing::debug!(target = %self.target, "relaying event");

        self.client
            .invoke_value(&self.target, Payload::from_event(event))
            .await
            .map_err(|e| {
                let error_type = match &e {
                    InvokeError::Transport(_) => "TransportError",
                    InvokeError::RemoteStatus { .. } => "RemoteStatusError",
                    InvokeError::Remote { .. } => "RemoteError",
                    InvokeError::Decode(_) => "DecodeError",
                    InvokeError::Serialize(_) => "SerializeError",
                    InvokeError::EmptyFunctionName => "InvalidRequest",
                };
                FunctionError::new(error_type, e.to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faas_client::{InvocationTransport, TransportError, WireRequest, WireResponse};
    use faas_protocol::LogType;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    struct RecordingTransport {
        requests: Mutex<Vec<WireRequest>>,
    }

    #[async_trait]
    impl InvocationTransport for RecordingTransport {
        async fn send(&self, request: WireRequest) -> Result<WireResponse, TransportError> {
            self.requests.lock().unwrap().push(request);
            Ok(WireResponse {
                status_code: 200,
                function_error: None,
                payload: r#"{"ok":true}"#.to_string(),
            })
        }
    }

    fn relay_over(transport: Arc<RecordingTransport>) -> RelayFunction {
        RelayFunction::new(
            FunctionClient::with_transport(transport, LogType::None),
            "producer",
        )
    }

    #[tokio::test]
    async fn test_relay_forwards_structured_event() {
        let transport = Arc::new(RecordingTransport {
            requests: Mutex::new(Vec::new()),
        });
        let relay = relay_over(transport.clone());

        let result = relay
            .handle(json!({"op": "SET", "key": "x", "value": "1"}))
            .await
            .unwrap();

        assert_eq!(result, json!({"ok": true}));
        let sent = transport.requests.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].function, "producer");
        let forwarded: Value = serde_json::from_str(&sent[0].payload).unwrap();
        assert_eq!(forwarded, json!({"op": "SET", "key": "x", "value": "1"}));
    }

    #[tokio::test]
    async fn test_relay_passes_string_event_byte_for_byte() {
        let transport = Arc::new(RecordingTransport {
            requests: Mutex::new(Vec::new()),
        });
        let relay = relay_over(transport.clone());

        let raw = r#"{"op":"SET","key":"x","value":"1"}"#;
        relay.handle(Value::String(raw.to_string())).await.unwrap();

        let sent = transport.requests.lock().unwrap();
        assert_eq!(sent[0].payload, raw);
    }
}
