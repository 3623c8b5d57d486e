//! Provider content fetcher trait.

use crate::error::Result;

/// Capability: list top-level items for a bearer token.
///
/// One implementation per integrated provider. Implementations issue a
/// single "list root folder contents" request and return entry names
/// exactly as the provider API ordered them — no dedup, no sort.
pub trait ContentFetcher: Send + Sync {
    /// List the names of the user's top-level items.
    ///
    /// An empty `token` returns an empty sequence immediately, without
    /// any network call — a missing credential must never reach a
    /// provider API.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::BrokerError::ProviderFetchFailure`] if:
    /// - Network request fails
    /// - Provider rejects the token
    /// - Response is malformed
    fn list_top_level_items(
        &self,
        token: &str,
    ) -> impl std::future::Future<Output = Result<Vec<String>>> + Send;
}
