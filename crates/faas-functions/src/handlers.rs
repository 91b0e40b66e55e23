//! Cache-backed function handlers.
//!
//! One handler type parameterized by user name and access policy covers the
//! producer (`on ~* -@all +SET`) and the consumer (`on ~* -@all +GET`).
//! Authorization happens before any command reaches the store.

use async_trait::async_trait;
use serde_json::{json, Value};

use faas_protocol::{FunctionError, FunctionHandler};

use crate::command::CacheCommand;
use crate::error::Result;
use crate::policy::AccessPolicy;
use crate::store::CacheStore;

/// Access string for the producer user.
pub const PRODUCER_ACCESS_STRING: &str = "on ~* -@all +SET";

/// Access string for the consumer user.
pub const CONSUMER_ACCESS_STRING: &str = "on ~* -@all +GET";

/// A cache function acting as one policy-scoped cache user.
pub struct CacheFunction {
    user: String,
    policy: AccessPolicy,
    store: CacheStore,
}

impl CacheFunction {
    pub fn new(user: impl Into<String>, policy: AccessPolicy, store: CacheStore) -> Self {
        Self {
            user: user.into(),
            policy,
            store,
        }
    }

    /// The producer function: may only SET.
    pub fn producer(store: CacheStore) -> Result<Self> {
        Ok(Self::new(
            "producer",
            AccessPolicy::parse(PRODUCER_ACCESS_STRING)?,
            store,
        ))
    }

    /// The consumer function: may only GET.
    pub fn consumer(store: CacheStore) -> Result<Self> {
        Ok(Self::new(
            "consumer",
            AccessPolicy::parse(CONSUMER_ACCESS_STRING)?,
            store,
        ))
    }
}

/// Gate a parsed command against the user's policy.
pub fn authorize(
    user: &str,
    policy: &AccessPolicy,
    command: &CacheCommand,
) -> std::result::Result<(), FunctionError> {
    if policy.permits(command.name(), command.key()) {
        Ok(())
    } else {
        Err(FunctionError::new(
            "AccessDenied",
            format!(
                "user {user} is not permitted to {} key {}",
                command.name(),
                command.key()
            ),
        ))
    }
}

#[async_trait]
impl FunctionHandler for CacheFunction {
    async fn handle(&self, event: Value) -> std::result::Result<Value, FunctionError> {
        let command = CacheCommand::from_event(event)?;
        authorize(&self.user, &self.policy, &command)?;

        tracing::debug!(user = %self.user, op = command.name(), key = command.key(), "executing cache command");

        let outcome = match &command {
            CacheCommand::Set { key, value } => self
                .store
                .set(key, value)
                .await
                .map(|()| json!({"ok": true})),
            CacheCommand::Get { key } => self
                .store
                .get(key)
                .await
                .map(|value| json!({"key": key, "value": value})),
            CacheCommand::Del { key } => self
                .store
                .del(key)
                .await
                .map(|deleted| json!({"ok": deleted})),
        };

        outcome.map_err(|e| FunctionError::new("CacheError", e.to_string()))
    }
}
