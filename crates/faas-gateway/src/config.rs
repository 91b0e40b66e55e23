//! # Gateway Configuration
//!
//! Environment-based configuration for the function gateway service.

use std::env;
use std::net::SocketAddr;

/// Gateway server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address
    pub server_addr: SocketAddr,

    /// Endpoint the relay function uses to call back into the gateway
    pub self_endpoint: String,

    /// Function the relay forwards to
    pub relay_target: String,

    /// Cache connection configuration
    pub cache: CacheEndpointConfig,

    /// Logging level
    pub log_level: String,
}

/// Cache endpoint and per-user secrets
#[derive(Debug, Clone)]
pub struct CacheEndpointConfig {
    pub endpoint: String,
    pub port: u16,

    /// Secret JSON document for the producer user; plain connection if unset
    pub producer_secret: Option<String>,

    /// Secret JSON document for the consumer user; plain connection if unset
    pub consumer_secret: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        let server_addr: SocketAddr = env::var("GATEWAY_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .expect("Invalid GATEWAY_ADDR");

        Self {
            server_addr,

            self_endpoint: env::var("GATEWAY_SELF_ENDPOINT")
                .unwrap_or_else(|_| format!("http://127.0.0.1:{}", server_addr.port())),

            relay_target: env::var("RELAY_TARGET").unwrap_or_else(|_| "producer".to_string()),

            cache: CacheEndpointConfig {
                endpoint: env::var("CACHE_ENDPOINT").unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: env::var("CACHE_PORT")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(6379),
                producer_secret: env::var("PRODUCER_SECRET_JSON").ok(),
                consumer_secret: env::var("CONSUMER_SECRET_JSON").ok(),
            },

            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        }
    }
}

impl CacheEndpointConfig {
    /// Connection URL for one cache user: authenticated when a secret
    /// document is configured, plain otherwise.
    pub fn connection_url(
        &self,
        secret: Option<&str>,
    ) -> faas_functions::Result<String> {
        match secret {
            Some(secret) => {
                let credentials = faas_functions::CacheCredentials::from_secret_json(secret)?;
                Ok(credentials.connection_url(&self.endpoint, self.port))
            }
            None => Ok(format!("redis://{}:{}", self.endpoint, self.port)),
        }
    }
}
