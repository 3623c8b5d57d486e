//! Microsoft Graph content fetcher implementation.

use crate::error::{BrokerError, Result};
use crate::providers::ContentFetcher;
use crate::state::ProviderKind;
use reqwest::Client;
use serde::Deserialize;

/// Microsoft Graph content fetcher.
///
/// Lists the children of the signed-in user's drive root
/// (`GET /v1.0/me/drive/root/children`).
#[derive(Clone, Debug)]
pub struct GraphFetcher {
    /// HTTP client for API requests.
    http_client: Client,

    /// API base URL.
    api_base: String,
}

/// Drive children response body.
#[derive(Debug, Deserialize)]
struct DriveChildrenResponse {
    value: Vec<DriveItem>,
}

/// One drive item of a children listing.
#[derive(Debug, Deserialize)]
struct DriveItem {
    name: String,
}

impl GraphFetcher {
    /// Create a new Graph fetcher against the public API.
    #[must_use]
    pub fn new() -> Self {
        Self {
            http_client: Client::new(),
            api_base: "https://graph.microsoft.com".to_string(),
        }
    }

    /// Override the API base URL.
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    fn fetch_failure(cause: impl std::fmt::Display) -> BrokerError {
        BrokerError::ProviderFetchFailure {
            provider: ProviderKind::Graph,
            cause: cause.to_string(),
        }
    }
}

impl Default for GraphFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentFetcher for GraphFetcher {
    async fn list_top_level_items(&self, token: &str) -> Result<Vec<String>> {
        // Empty-token guard: no credential, no network call
        if token.is_empty() {
            return Ok(Vec::new());
        }

        let response = self
            .http_client
            .get(format!("{}/v1.0/me/drive/root/children", self.api_base))
            .bearer_auth(token)
            .send()
            .await
            .map_err(Self::fetch_failure)?;

        if !response.status().is_success() {
            return Err(Self::fetch_failure(format!(
                "Graph returned {}",
                response.status()
            )));
        }

        let listing: DriveChildrenResponse = response.json().await.map_err(Self::fetch_failure)?;

        // Provider order preserved
        Ok(listing.value.into_iter().map(|item| item.name).collect())
    }
}
