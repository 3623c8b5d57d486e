//! REST token-store client.
//!
//! Implements [`TokenResourceStore`] against the token store's HTTP
//! surface: `GET`/`PUT /services/{serviceId}/tokens/{tokenId}`. Every
//! call is bearer-authenticated with a credential from the ambient
//! service identity (see [`ApiCredential`]).

use crate::error::{BrokerError, Result};
use crate::providers::{ApiCredential, TokenResourceStore};
use crate::state::{ProviderKind, SubjectId, TokenResource, TokenStatus};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

/// REST client for the central token store.
#[derive(Clone, Debug)]
pub struct RestVaultStore<C> {
    /// HTTP client for store requests.
    http_client: Client,

    /// Store base URL.
    base_url: String,

    /// Credential provider for the store audience.
    credential: C,
}

/// Token resource wire representation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenResourceDto {
    status: TokenStatusDto,
    value: Option<TokenValueDto>,
    login_uri: Option<String>,
}

/// Status portion of a token resource.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenStatusDto {
    state: String,
}

/// Credential portion of a token resource.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenValueDto {
    access_token: Option<String>,
}

impl TokenResourceDto {
    /// Classify the wire representation into a typed resource.
    ///
    /// Raw status strings never leave this boundary.
    fn into_resource(self, provider: ProviderKind, subject: &SubjectId) -> TokenResource {
        TokenResource {
            provider,
            subject: subject.clone(),
            status: TokenStatus::classify(&self.status.state),
            access_token: self.value.and_then(|value| value.access_token),
            login_url: self.login_uri,
        }
    }
}

impl<C: ApiCredential> RestVaultStore<C> {
    /// Create a new store client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Store base URL (e.g., "https://contoso.tokenstore.example.net")
    /// * `credential` - Ambient service-identity credential
    #[must_use]
    pub fn new(base_url: impl Into<String>, credential: C) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.into(),
            credential,
        }
    }

    /// URL of one token resource.
    fn resource_url(&self, provider: ProviderKind, subject: &SubjectId) -> String {
        format!(
            "{}/services/{}/tokens/{}",
            self.base_url,
            provider.as_str(),
            subject.as_str()
        )
    }

    /// Map a non-success store response to the error taxonomy.
    fn store_failure(status: StatusCode) -> BrokerError {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                BrokerError::AuthFailure(format!("Store returned {status}"))
            }
            _ => BrokerError::StoreUnavailable(format!("Store returned {status}")),
        }
    }

    /// Parse a successful store response into a resource.
    async fn parse_resource(
        response: reqwest::Response,
        provider: ProviderKind,
        subject: &SubjectId,
    ) -> Result<TokenResource> {
        let dto: TokenResourceDto = response
            .json()
            .await
            .map_err(|e| BrokerError::StoreUnavailable(format!("Malformed store response: {e}")))?;

        Ok(dto.into_resource(provider, subject))
    }
}

impl<C: ApiCredential> TokenResourceStore for RestVaultStore<C> {
    async fn fetch(
        &self,
        provider: ProviderKind,
        subject: &SubjectId,
    ) -> Result<Option<TokenResource>> {
        let api_token = self.credential.access_token().await?;

        let response = self
            .http_client
            .get(self.resource_url(provider, subject))
            .bearer_auth(api_token)
            .send()
            .await
            .map_err(|e| BrokerError::StoreUnavailable(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!(provider = %provider, "No token resource yet");
            return Ok(None);
        }

        if !response.status().is_success() {
            return Err(Self::store_failure(response.status()));
        }

        let resource = Self::parse_resource(response, provider, subject).await?;
        debug!(provider = %provider, status = ?resource.status, "Fetched token resource");
        Ok(Some(resource))
    }

    async fn create(
        &self,
        provider: ProviderKind,
        subject: &SubjectId,
    ) -> Result<TokenResource> {
        let api_token = self.credential.access_token().await?;

        let response = self
            .http_client
            .put(self.resource_url(provider, subject))
            .bearer_auth(api_token)
            .json(&serde_json::json!({}))
            .send()
            .await
            .map_err(|e| BrokerError::StoreUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::store_failure(response.status()));
        }

        let resource = Self::parse_resource(response, provider, subject).await?;
        debug!(provider = %provider, "Created placeholder token resource");
        Ok(resource)
    }
}

#[cfg(all(test, feature = "test-utils"))]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_dto_classification() {
        let dto = TokenResourceDto {
            status: TokenStatusDto {
                state: "OK".to_string(),
            },
            value: Some(TokenValueDto {
                access_token: Some("tok".to_string()),
            }),
            login_uri: None,
        };

        let resource = dto.into_resource(ProviderKind::Dropbox, &SubjectId::from("u1"));
        assert!(resource.status.is_connected());
        assert_eq!(resource.access_token.as_deref(), Some("tok"));
    }

    #[test]
    fn test_dto_parses_store_json() {
        let json = r#"{
            "name": "u1",
            "status": { "state": "Pending" },
            "value": null,
            "loginUri": "https://store.example.net/login/abc"
        }"#;

        let dto: TokenResourceDto = serde_json::from_str(json).unwrap();
        let resource = dto.into_resource(ProviderKind::Graph, &SubjectId::from("u1"));
        assert_eq!(resource.status, TokenStatus::Pending);
        assert!(resource.access_token.is_none());
        assert_eq!(
            resource.login_url.as_deref(),
            Some("https://store.example.net/login/abc")
        );
    }

    #[test]
    fn test_store_failure_mapping() {
        assert_eq!(
            RestVaultStore::<crate::mocks::MockApiCredential>::store_failure(
                StatusCode::UNAUTHORIZED
            ),
            BrokerError::AuthFailure("Store returned 401 Unauthorized".to_string())
        );
        assert!(matches!(
            RestVaultStore::<crate::mocks::MockApiCredential>::store_failure(
                StatusCode::INTERNAL_SERVER_ERROR
            ),
            BrokerError::StoreUnavailable(_)
        ));
    }
}
