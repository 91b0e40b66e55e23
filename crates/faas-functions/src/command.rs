//! Invocation event shape for the cache functions.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use faas_protocol::FunctionError;

/// Command carried by a cache function event:
/// `{"op": "SET", "key": "x", "value": "1"}` and friends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "UPPERCASE")]
pub enum CacheCommand {
    Set { key: String, value: String },
    Get { key: String },
    Del { key: String },
}

impl CacheCommand {
    /// Parse the raw invocation event.
    pub fn from_event(event: Value) -> Result<Self, FunctionError> {
        serde_json::from_value(event).map_err(|e| {
            FunctionError::new("InvalidRequest", format!("malformed cache command: {e}"))
        })
    }

    /// Command name as the access policy sees it.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Set { .. } => "SET",
            Self::Get { .. } => "GET",
            Self::Del { .. } => "DEL",
        }
    }

    /// Key the command targets.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Set { key, .. } | Self::Get { key } | Self::Del { key } => key,
        }
    }
}
