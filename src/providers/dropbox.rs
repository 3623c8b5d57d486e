//! Dropbox content fetcher implementation.

use crate::error::{BrokerError, Result};
use crate::providers::ContentFetcher;
use crate::state::ProviderKind;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Dropbox content fetcher.
///
/// Lists the user's root folder via the Dropbox HTTP API
/// (`POST /2/files/list_folder` with an empty path).
#[derive(Clone, Debug)]
pub struct DropboxFetcher {
    /// HTTP client for API requests.
    http_client: Client,

    /// API base URL.
    api_base: String,
}

/// `list_folder` request body.
#[derive(Debug, Serialize)]
struct ListFolderRequest<'a> {
    path: &'a str,
}

/// `list_folder` response body.
#[derive(Debug, Deserialize)]
struct ListFolderResponse {
    entries: Vec<ListFolderEntry>,
}

/// One entry of a `list_folder` response.
#[derive(Debug, Deserialize)]
struct ListFolderEntry {
    name: String,
}

impl DropboxFetcher {
    /// Create a new Dropbox fetcher against the public API.
    #[must_use]
    pub fn new() -> Self {
        Self {
            http_client: Client::new(),
            api_base: "https://api.dropboxapi.com".to_string(),
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
            provider: ProviderKind::Dropbox,
            cause: cause.to_string(),
        }
    }
}

impl Default for DropboxFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentFetcher for DropboxFetcher {
    async fn list_top_level_items(&self, token: &str) -> Result<Vec<String>> {
        // Empty-token guard: no credential, no network call
        if token.is_empty() {
            return Ok(Vec::new());
        }

        let response = self
            .http_client
            .post(format!("{}/2/files/list_folder", self.api_base))
            .bearer_auth(token)
            .json(&ListFolderRequest { path: "" })
            .send()
            .await
            .map_err(Self::fetch_failure)?;

        if !response.status().is_success() {
            return Err(Self::fetch_failure(format!(
                "Dropbox returned {}",
                response.status()
            )));
        }

        let listing: ListFolderResponse = response.json().await.map_err(Self::fetch_failure)?;

        // Provider order preserved
        Ok(listing.entries.into_iter().map(|entry| entry.name).collect())
    }
}
