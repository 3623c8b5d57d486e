//! Provider registry.
//!
//! Maps configured provider keys to their content fetchers while
//! preserving configuration order — reconciliation processes providers in
//! exactly this order. The broker selects fetchers through this registry,
//! never by branching on provider ids inside the flow.

use crate::config::BrokerConfig;
use crate::error::Result;
use crate::providers::{ContentFetcher, DropboxFetcher, GraphFetcher};
use crate::state::ProviderKind;

/// Dispatch over the concrete fetcher implementations.
///
/// The fetcher trait uses `impl Future` methods and is therefore not
/// dyn-compatible; a registry of heterogeneous fetchers uses enum
/// dispatch instead of trait objects.
#[derive(Clone, Debug)]
pub enum ProviderFetcher {
    /// Dropbox file storage.
    Dropbox(DropboxFetcher),
    /// Microsoft Graph (OneDrive).
    Graph(GraphFetcher),
}

impl ContentFetcher for ProviderFetcher {
    async fn list_top_level_items(&self, token: &str) -> Result<Vec<String>> {
        match self {
            Self::Dropbox(fetcher) => fetcher.list_top_level_items(token).await,
            Self::Graph(fetcher) => fetcher.list_top_level_items(token).await,
        }
    }
}

/// Ordered registry of (provider, fetcher) pairs.
#[derive(Clone, Debug, Default)]
pub struct ProviderRegistry<F> {
    entries: Vec<(ProviderKind, F)>,
}

impl<F: ContentFetcher> ProviderRegistry<F> {
    /// Create an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register a fetcher for a provider, appended in processing order.
    #[must_use]
    pub fn register(mut self, provider: ProviderKind, fetcher: F) -> Self {
        debug_assert!(
            !self.entries.iter().any(|(kind, _)| *kind == provider),
            "provider registered twice: {provider}"
        );
        self.entries.push((provider, fetcher));
        self
    }

    /// Iterate registered providers in processing order.
    pub fn iter(&self) -> impl Iterator<Item = &(ProviderKind, F)> {
        self.entries.iter()
    }

    /// Number of registered providers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ProviderRegistry<ProviderFetcher> {
    /// Build the standard registry from the configured provider order.
    #[must_use]
    pub fn standard(config: &BrokerConfig) -> Self {
        let mut registry = Self::new();
        for provider in &config.providers {
            let fetcher = match provider {
                ProviderKind::Dropbox => ProviderFetcher::Dropbox(DropboxFetcher::new()),
                ProviderKind::Graph => ProviderFetcher::Graph(GraphFetcher::new()),
            };
            registry = registry.register(*provider, fetcher);
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BrokerConfig;

    #[test]
    fn test_standard_registry_follows_configured_order() {
        let config = BrokerConfig::default()
            .with_providers(vec![ProviderKind::Graph, ProviderKind::Dropbox]);
        let registry = ProviderRegistry::standard(&config);

        let order: Vec<ProviderKind> = registry.iter().map(|(kind, _)| *kind).collect();
        assert_eq!(order, vec![ProviderKind::Graph, ProviderKind::Dropbox]);
    }

    #[test]
    fn test_empty_registry() {
        let config = BrokerConfig::default().with_providers(Vec::new());
        let registry = ProviderRegistry::standard(&config);
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }
}
