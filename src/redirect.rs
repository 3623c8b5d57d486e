//! Correlation/redirect URL construction.
//!
//! Builds the post-auth redirect URL that is appended — percent-encoded,
//! as a single opaque query value — onto a provider's login URL. The
//! provider's consent flow redirects the user's browser to exactly that
//! value after consent, carrying the provider key and subject id back to
//! this system's post-auth endpoint.
//!
//! Construction is deterministic: same inputs, byte-identical output.

use crate::constants::{POST_AUTH_PATH, query_params};
use crate::error::{BrokerError, Result};
use crate::state::{ProviderKind, SubjectId};

/// Scheme/host/port of the current inbound request.
///
/// Taken from the request (or its forwarding headers) so redirect URLs
/// round-trip correctly behind proxies without hardcoding a host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostContext {
    /// URL scheme, usually "https".
    pub scheme: String,

    /// Host name, without port.
    pub host: String,

    /// Explicit port; omit for the scheme default.
    pub port: Option<u16>,
}

impl HostContext {
    /// Create a host context with the default scheme (https) and no
    /// explicit port.
    #[must_use]
    pub fn https(host: impl Into<String>) -> Self {
        Self {
            scheme: "https".to_string(),
            host: host.into(),
            port: None,
        }
    }

    /// Set an explicit port.
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Authority portion of a URL ("host" or "host:port").
    #[must_use]
    pub fn authority(&self) -> String {
        match self.port {
            Some(port) => format!("{}:{port}", self.host),
            None => self.host.clone(),
        }
    }
}

/// Build the absolute post-auth redirect URL for a (provider, user) pair.
///
/// The URL points at this system's own post-auth endpoint and carries
/// `serviceId` and `tokenId` query parameters, e.g.
/// `https://app.example.com/postauth?serviceId=dropbox&tokenId=user-123`.
///
/// # Errors
///
/// Returns [`BrokerError::InternalError`] if query serialization fails.
pub fn post_auth_redirect_url(
    provider: ProviderKind,
    subject: &SubjectId,
    host: &HostContext,
) -> Result<String> {
    let params = [
        (query_params::SERVICE_ID, provider.as_str()),
        (query_params::TOKEN_ID, subject.as_str()),
    ];

    let query = serde_urlencoded::to_string(params)
        .map_err(|e| BrokerError::InternalError(format!("Failed to build redirect query: {e}")))?;

    Ok(format!(
        "{}://{}/{POST_AUTH_PATH}?{query}",
        host.scheme,
        host.authority()
    ))
}

/// Append the post-auth redirect URL onto a provider login URL.
///
/// The redirect URL is percent-encoded exactly once and carried as the
/// `PostLoginRedirectUrl` query parameter.
#[must_use]
pub fn with_post_login_redirect(login_url: &str, redirect_url: &str) -> String {
    let separator = if login_url.contains('?') { '&' } else { '?' };
    format!(
        "{login_url}{separator}{}={}",
        query_params::POST_LOGIN_REDIRECT,
        urlencoding::encode(redirect_url)
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_url_is_deterministic() {
        let host = HostContext::https("app.example.com");
        let subject = SubjectId::from("user-123");

        let first = post_auth_redirect_url(ProviderKind::Dropbox, &subject, &host).unwrap();
        let second = post_auth_redirect_url(ProviderKind::Dropbox, &subject, &host).unwrap();

        assert_eq!(
            first,
            "https://app.example.com/postauth?serviceId=dropbox&tokenId=user-123"
        );
        assert_eq!(first, second);
    }

    #[test]
    fn test_redirect_url_includes_explicit_port() {
        let host = HostContext::https("localhost").with_port(5001);
        let subject = SubjectId::from("u");

        let url = post_auth_redirect_url(ProviderKind::Graph, &subject, &host).unwrap();
        assert_eq!(url, "https://localhost:5001/postauth?serviceId=graph&tokenId=u");
    }

    #[test]
    fn test_redirect_url_escapes_subject() {
        let host = HostContext::https("app.example.com");
        let subject = SubjectId::from("user a&b");

        let url = post_auth_redirect_url(ProviderKind::Dropbox, &subject, &host).unwrap();
        assert!(url.ends_with("tokenId=user+a%26b"));
    }

    #[test]
    fn test_post_login_redirect_round_trips_reserved_characters() {
        let redirect = "https://app.example.com/postauth?serviceId=dropbox&tokenId=user-123";
        let combined = with_post_login_redirect("https://store.example.net/login/abc", redirect);

        let (_, encoded) = combined.split_once("PostLoginRedirectUrl=").unwrap();
        assert!(!encoded.contains('?'));
        assert!(!encoded.contains('&'));
        assert_eq!(urlencoding::decode(encoded).unwrap(), redirect);
    }

    #[test]
    fn test_post_login_redirect_preserves_existing_query() {
        let combined = with_post_login_redirect("https://store.example.net/login?x=1", "https://a/b");
        assert!(combined.starts_with("https://store.example.net/login?x=1&PostLoginRedirectUrl="));
    }
}
