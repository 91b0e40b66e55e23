//! Thin async wrapper over the Redis connection.

use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};

use crate::error::Result;

/// Cache store handle with a managed connection.
///
/// `ConnectionManager` reconnects on failure and is cheap to clone; one
/// store instance serves all concurrent invocations of a handler.
#[derive(Clone)]
pub struct CacheStore {
    conn: ConnectionManager,
}

impl CacheStore {
    /// Connect to the cache at the given URL (plain or authenticated).
    pub async fn connect(url: &str) -> Result<Self> {
        let client = Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self { conn })
    }

    /// Set a string value.
    pub async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: () = conn.set(key, value).await?;
        Ok(())
    }

    /// Get a string value, `None` on missing key.
    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    /// Delete a key, reporting whether it existed.
    pub async fn del(&self, key: &str) -> Result<bool> {
        let mut conn = self.conn.clone();
        let deleted: i64 = conn.del(key).await?;
        Ok(deleted > 0)
    }
}
