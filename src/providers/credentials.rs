//! Broker-to-store credential acquisition.

use crate::error::{BrokerError, Result};
use reqwest::Client;
use serde::Deserialize;

/// Ambient service-identity credential for the token store audience.
///
/// The token store requires a bearer credential identifying this system
/// itself (not the end user). Implementations return a short-lived opaque
/// token string; caching and renewal are the implementation's concern.
pub trait ApiCredential: Send + Sync {
    /// Acquire an access token for the token store audience.
    ///
    /// # Errors
    ///
    /// Returns [`BrokerError::AuthFailure`] if the identity provider
    /// cannot issue a credential.
    fn access_token(&self) -> impl std::future::Future<Output = Result<String>> + Send;
}

/// Managed-identity credential acquired from the instance metadata
/// endpoint.
///
/// Treated as a black box: one GET against the metadata service per
/// acquisition, returning a short-lived token scoped to the configured
/// resource audience.
#[derive(Clone, Debug)]
pub struct ManagedIdentityCredential {
    /// HTTP client for metadata requests.
    http_client: Client,

    /// Metadata identity endpoint.
    endpoint: String,

    /// Audience the token is scoped to (the token store).
    resource: String,
}

/// Instance metadata token response.
#[derive(Debug, Deserialize)]
struct MetadataTokenResponse {
    access_token: String,
}

impl ManagedIdentityCredential {
    /// Default instance metadata identity endpoint.
    pub const DEFAULT_ENDPOINT: &'static str =
        "http://169.254.169.254/metadata/identity/oauth2/token";

    /// Create a credential scoped to the given resource audience.
    #[must_use]
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            endpoint: Self::DEFAULT_ENDPOINT.to_string(),
            resource: resource.into(),
        }
    }

    /// Override the metadata endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

impl ApiCredential for ManagedIdentityCredential {
    async fn access_token(&self) -> Result<String> {
        let response = self
            .http_client
            .get(&self.endpoint)
            .query(&[
                ("api-version", "2018-02-01"),
                ("resource", self.resource.as_str()),
            ])
            .header("Metadata", "true")
            .send()
            .await
            .map_err(|e| BrokerError::AuthFailure(format!("Metadata endpoint unreachable: {e}")))?;

        if !response.status().is_success() {
            return Err(BrokerError::AuthFailure(format!(
                "Metadata endpoint returned {}",
                response.status()
            )));
        }

        let token: MetadataTokenResponse = response
            .json()
            .await
            .map_err(|e| BrokerError::AuthFailure(format!("Malformed metadata response: {e}")))?;

        Ok(token.access_token)
    }
}
