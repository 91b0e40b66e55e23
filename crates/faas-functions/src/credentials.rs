//! Cache user credentials.
//!
//! Each cache user has a secret document holding its username and password,
//! the shape the secret store keeps per user. The handler wiring parses the
//! document and builds an authenticated connection URL from it plus the
//! cache endpoint.

use serde::Deserialize;

use crate::error::{CacheError, Result};

/// Credentials for one cache user.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheCredentials {
    pub username: String,
    pub password: String,
}

impl CacheCredentials {
    /// Parse the secret JSON document (`{"username": ..., "password": ...}`).
    pub fn from_secret_json(secret: &str) -> Result<Self> {
        let credentials: Self = serde_json::from_str(secret)
            .map_err(|e| CacheError::Credentials(e.to_string()))?;

        if credentials.username.is_empty() {
            return Err(CacheError::Credentials("username is empty".to_string()));
        }
        Ok(credentials)
    }

    /// Authenticated connection URL for the given cache endpoint.
    #[must_use]
    pub fn connection_url(&self, endpoint: &str, port: u16) -> String {
        format!(
            "redis://{}:{}@{}:{}",
            self.username, self.password, endpoint, port
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_secret_document() {
        let secret = r#"{"username": "producer", "password": "s3cr3t"}"#;
        let credentials = CacheCredentials::from_secret_json(secret).unwrap();
        assert_eq!(credentials.username, "producer");
        assert_eq!(credentials.password, "s3cr3t");
    }

    #[test]
    fn test_rejects_malformed_secret() {
        assert!(CacheCredentials::from_secret_json("not-json").is_err());
        assert!(CacheCredentials::from_secret_json(r#"{"username": "x"}"#).is_err());
    }

    #[test]
    fn test_rejects_empty_username() {
        let secret = r#"{"username": "", "password": "p"}"#;
        assert!(CacheCredentials::from_secret_json(secret).is_err());
    }

    #[test]
    fn test_connection_url() {
        let credentials = CacheCredentials {
            username: "producer".to_string(),
            password: "pw".to_string(),
        };
        assert_eq!(
            credentials.connection_url("cache.internal", 6379),
            "redis://producer:pw@cache.internal:6379"
        );
    }
}
