//! Cache function error types

use thiserror::Error;

/// Failures inside the cache-backed function handlers.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("redis error: {0}")]
    Redis(String),

    #[error("invalid credentials secret: {0}")]
    Credentials(String),

    #[error("invalid access string: {0}")]
    AccessString(String),
}

impl From<redis::RedisError> for CacheError {
    fn from(err: redis::RedisError) -> Self {
        Self::Redis(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CacheError>;
