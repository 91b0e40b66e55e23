//! # Function Gateway
//!
//! HTTP service hosting registered function handlers behind the invocation
//! API. This is the environment that resolves a function identifier to a
//! callable: the invocation client posts to
//! `POST /functions/{name}/invocations` and the gateway dispatches to the
//! registered handler according to the requested invocation mode.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Axum HTTP Server                         │
//! │          POST /functions/{name}/invocations                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   FunctionRegistry                          │
//! │             (name → Arc<dyn FunctionHandler>)               │
//! └─────────────────────────────────────────────────────────────┘
//!                    │                   │
//!                    ▼                   ▼
//! ┌─────────────────────────┐   ┌──────────────────────────────┐
//! │  Cache Functions        │   │       Relay Function         │
//! │  (producer / consumer)  │   │  (forwards via the client)   │
//! └─────────────────────────┘   └──────────────────────────────┘
//! ```
//!
//! ## Invocation modes
//!
//! - `RequestResponse`: run the handler, return 200 with its JSON result;
//!   handler failures come back as 200 with the `x-function-error` header
//!   and an error payload body.
//! - `Event`: acknowledge with 202 and run the handler in a detached task.
//! - `DryRun`: validate that the function resolves, return 204, execute
//!   nothing.

pub mod config;
pub mod error;
pub mod registry;

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{AppendHeaders, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use faas_protocol::{
    FunctionHandler, InvocationMode, LogType, HEADER_EXECUTION_ID, HEADER_FUNCTION_ERROR,
    HEADER_INVOCATION_TYPE, HEADER_LOG_TYPE,
};

pub use config::Config;
pub use error::{GatewayError, GatewayResult};
pub use registry::FunctionRegistry;

/// Application state for Axum handlers
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<FunctionRegistry>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    #[must_use]
    pub fn new(registry: FunctionRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            started_at: Utc::now(),
        }
    }
}

/// Invocation endpoint handler
pub async fn invoke_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> GatewayResult<Response> {
    let mode = parse_header(&headers, HEADER_INVOCATION_TYPE, InvocationMode::parse)
        .map_err(GatewayError::InvalidMode)?;
    let log_type = parse_header(&headers, HEADER_LOG_TYPE, LogType::parse)
        .map_err(GatewayError::InvalidLogType)?;

    let handler = state
        .registry
        .resolve(&name)
        .ok_or_else(|| GatewayError::FunctionNotFound(name.clone()))?;

    let execution_id = Uuid::new_v4();
    let execution_header = AppendHeaders([(HEADER_EXECUTION_ID, execution_id.to_string())]);

    tracing::debug!(
        function = %name,
        %execution_id,
        mode = mode.as_str(),
        log_type = log_type.as_str(),
        payload_bytes = body.len(),
        "invocation received"
    );

    // Dry runs validate resolution only; no payload parse, no execution.
    if mode == InvocationMode::DryRun {
        return Ok((StatusCode::NO_CONTENT, execution_header).into_response());
    }

    let event: Value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).map_err(|e| GatewayError::InvalidPayload(e.to_string()))?
    };

    match mode {
        InvocationMode::RequestResponse => {
            Ok(run_function(&name, execution_id, &*handler, event).await)
        }
        InvocationMode::Event => {
            tokio::spawn(async move {
                match handler.handle(event).await {
                    Ok(_) => {
                        tracing::debug!(function = %name, %execution_id, "event invocation completed");
                    }
                    Err(e) => {
                        tracing::warn!(function = %name, %execution_id, error = %e, "event invocation failed");
                    }
                }
            });
            Ok((StatusCode::ACCEPTED, execution_header).into_response())
        }
        InvocationMode::DryRun => unreachable!("handled above"),
    }
}

/// Run a function synchronously and shape its outcome for the wire.
async fn run_function(
    name: &str,
    execution_id: Uuid,
    handler: &dyn FunctionHandler,
    event: Value,
) -> Response {
    let execution_header = AppendHeaders([(HEADER_EXECUTION_ID, execution_id.to_string())]);

    match handler.handle(event).await {
        Ok(result) => (StatusCode::OK, execution_header, Json(result)).into_response(),
        Err(e) => {
            tracing::debug!(function = %name, %execution_id, error = %e, "function returned error");
            // Function failures are completed calls: status 200 plus the
            // function-error marker, never a gateway status code.
            (
                StatusCode::OK,
                AppendHeaders([
                    (HEADER_EXECUTION_ID, execution_id.to_string()),
                    (HEADER_FUNCTION_ERROR, e.error_type.clone()),
                ]),
                Json(e.to_payload()),
            )
                .into_response()
        }
    }
}

fn parse_header<T: Default, E>(
    headers: &HeaderMap,
    name: &str,
    parse: impl Fn(&str) -> Result<T, E>,
) -> Result<T, String> {
    match headers.get(name) {
        None => Ok(T::default()),
        Some(value) => {
            let value = value
                .to_str()
                .map_err(|_| format!("{name} header is not valid UTF-8"))?;
            parse(value).map_err(|_| value.to_string())
        }
    }
}

/// Service info endpoint handler
pub async fn info_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "service": "faas-gateway",
        "version": VERSION,
        "startedAt": state.started_at,
        "functions": state.registry.names(),
    }))
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    "OK"
}

/// Build the Axum router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/functions/{name}/invocations", post(invoke_handler))
        .route("/health", get(health_check))
        .route("/", get(info_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
