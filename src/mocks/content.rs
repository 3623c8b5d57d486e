//! Mock content fetcher for testing.

use crate::error::{BrokerError, Result};
use crate::providers::ContentFetcher;
use crate::state::ProviderKind;
use std::future::Future;
use std::sync::{Arc, Mutex};

/// Mock content fetcher.
///
/// Returns predefined item names. Counts simulated network calls — the
/// empty-token guard returns before the counter is touched, so tests can
/// assert that no call was made.
#[derive(Debug, Clone)]
pub struct MockContentFetcher {
    provider: ProviderKind,
    items: Vec<String>,
    call_count: Arc<Mutex<usize>>,
    /// Whether to simulate success or a provider-side failure.
    pub should_succeed: bool,
}

impl MockContentFetcher {
    /// Create a mock fetcher returning the given item names.
    #[must_use]
    pub fn new(provider: ProviderKind, items: Vec<String>) -> Self {
        Self {
            provider,
            items,
            call_count: Arc::new(Mutex::new(0)),
            should_succeed: true,
        }
    }

    /// Create a mock whose fetches fail with `ProviderFetchFailure`.
    #[must_use]
    pub fn failing(provider: ProviderKind) -> Self {
        Self {
            should_succeed: false,
            ..Self::new(provider, Vec::new())
        }
    }

    /// Number of simulated network calls performed.
    ///
    /// # Errors
    ///
    /// Returns error if lock is poisoned.
    pub fn call_count(&self) -> Result<usize> {
        Ok(*self
            .call_count
            .lock()
            .map_err(|_| BrokerError::InternalError("Mutex lock failed".to_string()))?)
    }
}

impl ContentFetcher for MockContentFetcher {
    fn list_top_level_items(
        &self,
        token: &str,
    ) -> impl Future<Output = Result<Vec<String>>> + Send {
        let provider = self.provider;
        let items = self.items.clone();
        let call_count = Arc::clone(&self.call_count);
        let should_succeed = self.should_succeed;
        let token_is_empty = token.is_empty();

        async move {
            // Empty-token guard mirrors the real fetchers: no call counted
            if token_is_empty {
                return Ok(Vec::new());
            }

            *call_count
                .lock()
                .map_err(|_| BrokerError::InternalError("Mutex lock failed".to_string()))? += 1;

            if !should_succeed {
                return Err(BrokerError::ProviderFetchFailure {
                    provider,
                    cause: "mock provider outage".to_string(),
                });
            }

            Ok(items)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_token_short_circuits_without_a_call() {
        let fetcher = MockContentFetcher::new(ProviderKind::Dropbox, vec!["a.txt".into()]);

        let items = fetcher.list_top_level_items("").await.unwrap();
        assert!(items.is_empty());
        assert_eq!(fetcher.call_count().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_non_empty_token_counts_one_call() {
        let fetcher = MockContentFetcher::new(ProviderKind::Dropbox, vec!["a.txt".into()]);

        let items = fetcher.list_top_level_items("tok").await.unwrap();
        assert_eq!(items, vec!["a.txt".to_string()]);
        assert_eq!(fetcher.call_count().unwrap(), 1);
    }
}
