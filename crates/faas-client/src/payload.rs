//! Invocation payload marshalling.
//!
//! The marshalling decision is a tagged union resolved at the call site,
//! not a runtime type inspection: callers forwarding a pre-serialized
//! payload use [`Payload::Raw`] and it reaches the transport byte-for-byte;
//! everything else goes through [`Payload::Structured`] and is serialized
//! exactly once. This is what prevents double-encoding of forwarded events.

use serde::Serialize;
use serde_json::Value;

use crate::error::{InvokeError, Result};

/// A payload destined for the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload<T = Value> {
    /// Already in wire format; passed through unmodified.
    Raw(String),
    /// Serialized to JSON at marshalling time.
    Structured(T),
}

impl<T: Serialize> Payload<T> {
    /// Marshal to the wire string.
    ///
    /// `Raw` is the identity; `Structured` is `serde_json::to_string`.
    pub fn into_wire(self) -> Result<String> {
        match self {
            Self::Raw(wire) => Ok(wire),
            Self::Structured(value) => {
                serde_json::to_string(&value).map_err(InvokeError::Serialize)
            }
        }
    }
}

impl Payload<Value> {
    /// Bridge for forwarded events of unknown shape: string events are
    /// treated as pre-serialized, anything else as structured.
    #[must_use]
    pub fn from_event(event: Value) -> Self {
        match event {
            Value::String(wire) => Self::Raw(wire),
            other => Self::Structured(other),
        }
    }
}

impl<T> From<T> for Payload<T> {
    fn from(value: T) -> Self {
        Self::Structured(value)
    }
}
