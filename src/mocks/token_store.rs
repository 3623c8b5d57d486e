//! Mock token resource store for testing.

use crate::error::{BrokerError, Result};
use crate::providers::TokenResourceStore;
use crate::state::{ProviderKind, SubjectId, TokenResource, TokenStatus};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

/// Mock token resource store.
///
/// Uses in-memory storage; placeholders get a deterministic login URL per
/// (provider, subject) key, so back-to-back get-or-create calls observe
/// identical placeholders. A `create_count` counter makes the benign
/// get-or-create race observable in tests.
#[derive(Debug, Clone)]
pub struct MockTokenResourceStore {
    resources: Arc<Mutex<HashMap<(ProviderKind, SubjectId), TokenResource>>>,
    create_count: Arc<Mutex<usize>>,
    /// Whether to simulate an unreachable store.
    pub should_succeed: bool,
}

impl MockTokenResourceStore {
    /// Create a new mock store with no resources.
    #[must_use]
    pub fn new() -> Self {
        Self {
            resources: Arc::new(Mutex::new(HashMap::new())),
            create_count: Arc::new(Mutex::new(0)),
            should_succeed: true,
        }
    }

    /// Create a mock that fails every request with `StoreUnavailable`.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            should_succeed: false,
            ..Self::new()
        }
    }

    /// Seed a connected resource carrying an access token.
    ///
    /// # Errors
    ///
    /// Returns error if lock is poisoned.
    pub fn insert_connected(
        &self,
        provider: ProviderKind,
        subject: &SubjectId,
        access_token: impl Into<String>,
    ) -> Result<()> {
        let resource = TokenResource {
            provider,
            subject: subject.clone(),
            status: TokenStatus::Ok,
            access_token: Some(access_token.into()),
            login_url: None,
        };
        self.insert(resource)
    }

    /// Seed a resource with an arbitrary status and the deterministic
    /// placeholder login URL.
    ///
    /// # Errors
    ///
    /// Returns error if lock is poisoned.
    pub fn insert_with_status(
        &self,
        provider: ProviderKind,
        subject: &SubjectId,
        status: TokenStatus,
    ) -> Result<()> {
        let resource = TokenResource {
            provider,
            subject: subject.clone(),
            status,
            access_token: None,
            login_url: Some(Self::placeholder_login_url(provider, subject)),
        };
        self.insert(resource)
    }

    /// Number of `create` calls observed.
    ///
    /// # Errors
    ///
    /// Returns error if lock is poisoned.
    pub fn create_count(&self) -> Result<usize> {
        Ok(*self
            .create_count
            .lock()
            .map_err(|_| BrokerError::InternalError("Mutex lock failed".to_string()))?)
    }

    /// The deterministic login URL a placeholder for this key carries.
    #[must_use]
    pub fn placeholder_login_url(provider: ProviderKind, subject: &SubjectId) -> String {
        format!("https://store.example.net/login/{provider}/{subject}")
    }

    fn insert(&self, resource: TokenResource) -> Result<()> {
        let mut resources = self
            .resources
            .lock()
            .map_err(|_| BrokerError::InternalError("Mutex lock failed".to_string()))?;
        resources.insert((resource.provider, resource.subject.clone()), resource);
        Ok(())
    }
}

impl Default for MockTokenResourceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenResourceStore for MockTokenResourceStore {
    fn fetch(
        &self,
        provider: ProviderKind,
        subject: &SubjectId,
    ) -> impl Future<Output = Result<Option<TokenResource>>> + Send {
        let resources = Arc::clone(&self.resources);
        let should_succeed = self.should_succeed;
        let subject = subject.clone();

        async move {
            if !should_succeed {
                return Err(BrokerError::StoreUnavailable("mock store down".to_string()));
            }

            let resources = resources
                .lock()
                .map_err(|_| BrokerError::InternalError("Mutex lock failed".to_string()))?;
            Ok(resources.get(&(provider, subject)).cloned())
        }
    }

    fn create(
        &self,
        provider: ProviderKind,
        subject: &SubjectId,
    ) -> impl Future<Output = Result<TokenResource>> + Send {
        let resources = Arc::clone(&self.resources);
        let create_count = Arc::clone(&self.create_count);
        let should_succeed = self.should_succeed;
        let subject = subject.clone();

        async move {
            if !should_succeed {
                return Err(BrokerError::StoreUnavailable("mock store down".to_string()));
            }

            *create_count
                .lock()
                .map_err(|_| BrokerError::InternalError("Mutex lock failed".to_string()))? += 1;

            let mut resources = resources
                .lock()
                .map_err(|_| BrokerError::InternalError("Mutex lock failed".to_string()))?;

            // The store is the dedup authority: a racing create observes
            // the already-stored placeholder.
            let resource = resources
                .entry((provider, subject.clone()))
                .or_insert_with(|| TokenResource {
                    provider,
                    subject: subject.clone(),
                    status: TokenStatus::Pending,
                    access_token: None,
                    login_url: Some(Self::placeholder_login_url(provider, &subject)),
                });

            Ok(resource.clone())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_does_not_create() {
        let store = MockTokenResourceStore::new();
        let subject = SubjectId::from("u1");

        let resource = store.fetch(ProviderKind::Dropbox, &subject).await.unwrap();
        assert!(resource.is_none());
        assert_eq!(store.create_count().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_is_deduplicated_by_key() {
        let store = MockTokenResourceStore::new();
        let subject = SubjectId::from("u1");

        let first = store.create(ProviderKind::Dropbox, &subject).await.unwrap();
        let second = store.create(ProviderKind::Dropbox, &subject).await.unwrap();

        assert_eq!(first.login_url, second.login_url);
        assert_eq!(store.create_count().unwrap(), 2);
    }
}
