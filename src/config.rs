//! Broker configuration.
//!
//! Configuration values are provided by the application, not hardcoded.

use crate::state::ProviderKind;
use chrono::Duration;

/// Token broker configuration.
#[derive(Debug, Clone)]
pub struct BrokerConfig {
    /// Base URL of the token store (e.g., "https://contoso.tokenstore.example.net").
    pub store_url: String,

    /// Providers to reconcile, in processing order.
    ///
    /// Default: Dropbox, then Graph.
    pub providers: Vec<ProviderKind>,

    /// Time-to-live of session correlation entries.
    ///
    /// Default: 24 hours (browser-session scale).
    pub session_ttl: Duration,
}

impl BrokerConfig {
    /// Create a new broker configuration.
    ///
    /// # Arguments
    ///
    /// * `store_url` - Base URL of the token store
    #[must_use]
    pub fn new(store_url: String) -> Self {
        Self {
            store_url,
            providers: vec![ProviderKind::Dropbox, ProviderKind::Graph],
            session_ttl: Duration::hours(24),
        }
    }

    /// Set the providers to reconcile, in processing order.
    #[must_use]
    pub fn with_providers(mut self, providers: Vec<ProviderKind>) -> Self {
        self.providers = providers;
        self
    }

    /// Set the session correlation entry time-to-live.
    #[must_use]
    pub const fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self::new("http://localhost:8088".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = BrokerConfig::new("https://store.example.net".to_string())
            .with_providers(vec![ProviderKind::Graph])
            .with_session_ttl(Duration::hours(1));

        assert_eq!(config.store_url, "https://store.example.net");
        assert_eq!(config.providers, vec![ProviderKind::Graph]);
        assert_eq!(config.session_ttl, Duration::hours(1));
    }

    #[test]
    fn test_default_provider_order() {
        let config = BrokerConfig::default();
        assert_eq!(
            config.providers,
            vec![ProviderKind::Dropbox, ProviderKind::Graph]
        );
    }
}
