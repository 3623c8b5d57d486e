//! Mock session store for testing.

use crate::error::{BrokerError, Result};
use crate::providers::SessionStore;
use crate::state::SessionId;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

/// Mock session store.
///
/// Uses in-memory storage. A write counter lets tests assert that the
/// correlation entry is written exactly once per reconciliation pass.
#[derive(Debug, Clone)]
pub struct MockSessionStore {
    entries: Arc<Mutex<HashMap<(SessionId, String), String>>>,
    write_count: Arc<Mutex<usize>>,
}

impl MockSessionStore {
    /// Create a new mock session store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            write_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Read an entry synchronously (for assertions).
    ///
    /// # Errors
    ///
    /// Returns error if lock is poisoned.
    pub fn entry(&self, session_id: SessionId, key: &str) -> Result<Option<String>> {
        Ok(self
            .entries
            .lock()
            .map_err(|_| BrokerError::InternalError("Mutex lock failed".to_string()))?
            .get(&(session_id, key.to_string()))
            .cloned())
    }

    /// Number of writes observed.
    ///
    /// # Errors
    ///
    /// Returns error if lock is poisoned.
    pub fn write_count(&self) -> Result<usize> {
        Ok(*self
            .write_count
            .lock()
            .map_err(|_| BrokerError::InternalError("Mutex lock failed".to_string()))?)
    }
}

impl Default for MockSessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for MockSessionStore {
    fn get(
        &self,
        session_id: SessionId,
        key: &str,
    ) -> impl Future<Output = Result<Option<String>>> + Send {
        let entries = Arc::clone(&self.entries);
        let key = key.to_string();

        async move {
            let entries = entries
                .lock()
                .map_err(|_| BrokerError::InternalError("Mutex lock failed".to_string()))?;
            Ok(entries.get(&(session_id, key)).cloned())
        }
    }

    fn set(
        &self,
        session_id: SessionId,
        key: &str,
        value: &str,
    ) -> impl Future<Output = Result<()>> + Send {
        let entries = Arc::clone(&self.entries);
        let write_count = Arc::clone(&self.write_count);
        let key = key.to_string();
        let value = value.to_string();

        async move {
            *write_count
                .lock()
                .map_err(|_| BrokerError::InternalError("Mutex lock failed".to_string()))? += 1;

            let mut entries = entries
                .lock()
                .map_err(|_| BrokerError::InternalError("Mutex lock failed".to_string()))?;
            entries.insert((session_id, key), value);
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_overwrites() {
        let store = MockSessionStore::new();
        let session_id = SessionId::new();

        store.set(session_id, "tvId", "user-1").await.unwrap();
        store.set(session_id, "tvId", "user-2").await.unwrap();

        assert_eq!(
            store.get(session_id, "tvId").await.unwrap().as_deref(),
            Some("user-2")
        );
        assert_eq!(store.write_count().unwrap(), 2);
    }
}
