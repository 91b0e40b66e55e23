//! # Function Invocation Client
//!
//! Typed, synchronous invocation of gateway-hosted functions with JSON
//! payload marshalling and a typed failure taxonomy.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     FunctionClient                          │
//! │        (marshalling, status validation, decoding)           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 InvocationTransport trait                   │
//! │           (HttpTransport / test stubs)                      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │        POST {endpoint}/functions/{name}/invocations         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use faas_client::{ClientConfig, FunctionClient, Payload};
//! use serde_json::{json, Value};
//!
//! let client = FunctionClient::new(&ClientConfig::from_env())?;
//! let result: Value = client
//!     .invoke("producer", Payload::Structured(json!({"op": "SET", "key": "x", "value": "1"})))
//!     .await?;
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod payload;
pub mod transport;

pub use client::FunctionClient;
pub use config::ClientConfig;
pub use error::{InvokeError, Result, TransportError};
pub use payload::Payload;
pub use transport::{HttpTransport, InvocationTransport, WireRequest, WireResponse};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
