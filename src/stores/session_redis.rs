//! Redis-based session store implementation.
//!
//! Session entries are stored as plain strings under
//! `session:{session_id}:{key}` with a TTL tied to the browser-session
//! lifetime. Writes are full overwrites (`SET EX`), matching the
//! overwrite-only contract of [`SessionStore`].

use crate::error::{BrokerError, Result};
use crate::providers::SessionStore;
use crate::state::SessionId;
use chrono::Duration;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};

/// Redis-based session store with TTL-based expiration.
#[derive(Clone)]
pub struct RedisSessionStore {
    /// Connection manager for connection pooling.
    conn_manager: ConnectionManager,

    /// Entry time-to-live.
    ttl: Duration,
}

impl RedisSessionStore {
    /// Create a new Redis session store.
    ///
    /// # Arguments
    ///
    /// * `redis_url` - Redis connection URL (e.g., "redis://127.0.0.1:6379")
    /// * `ttl` - Entry time-to-live (browser-session scale, e.g. 24 hours)
    ///
    /// # Errors
    ///
    /// Returns error if connection to Redis fails.
    pub async fn new(redis_url: &str, ttl: Duration) -> Result<Self> {
        let client = Client::open(redis_url).map_err(|e| {
            BrokerError::SessionStoreFailure(format!("Failed to create Redis client: {e}"))
        })?;

        let conn_manager = ConnectionManager::new(client).await.map_err(|e| {
            BrokerError::SessionStoreFailure(format!(
                "Failed to create Redis connection manager: {e}"
            ))
        })?;

        Ok(Self { conn_manager, ttl })
    }

    /// Get the Redis key for a session entry.
    fn entry_key(session_id: SessionId, key: &str) -> String {
        format!("session:{}:{key}", session_id.0)
    }
}

impl SessionStore for RedisSessionStore {
    async fn get(&self, session_id: SessionId, key: &str) -> Result<Option<String>> {
        let mut conn = self.conn_manager.clone();
        let entry_key = Self::entry_key(session_id, key);

        conn.get(&entry_key)
            .await
            .map_err(|e| BrokerError::SessionStoreFailure(format!("Failed to read entry: {e}")))
    }

    async fn set(&self, session_id: SessionId, key: &str, value: &str) -> Result<()> {
        let mut conn = self.conn_manager.clone();
        let entry_key = Self::entry_key(session_id, key);

        #[allow(clippy::cast_sign_loss)]
        let ttl_seconds = self.ttl.num_seconds().max(0) as u64;

        let _: () = conn
            .set_ex(&entry_key, value, ttl_seconds)
            .await
            .map_err(|e| BrokerError::SessionStoreFailure(format!("Failed to write entry: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_key_format() {
        let session_id = SessionId(uuid::Uuid::nil());
        assert_eq!(
            RedisSessionStore::entry_key(session_id, "tvId"),
            "session:00000000-0000-0000-0000-000000000000:tvId"
        );
    }
}
