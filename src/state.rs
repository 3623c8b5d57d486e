//! Core broker state types.
//!
//! This module defines the identifiers, identity value, token-resource
//! representation, and per-provider view models. All types are `Clone` so
//! views can be assembled independently of their sources.

use serde::{Deserialize, Serialize};
use std::fmt;

// ═══════════════════════════════════════════════════════════════════════
// ID Types
// ═══════════════════════════════════════════════════════════════════════

/// Stable opaque identifier of the authenticated user (the "subject").
///
/// Used as the token-store key and as the session correlation value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubjectId(pub String);

impl SubjectId {
    /// View the subject id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SubjectId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Unique identifier for a browser session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub uuid::Uuid);

impl SessionId {
    /// Generate a new random `SessionId`.
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Identity
// ═══════════════════════════════════════════════════════════════════════

/// Authenticated identity, passed explicitly into the reconciler.
///
/// This is a plain value, not ambient request state, so reconciliation
/// can be unit tested without a simulated request pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Whether the caller is authenticated at all.
    pub is_authenticated: bool,

    /// Display name claim (required once authenticated).
    pub display_name: Option<String>,

    /// Stable subject identifier claim (required once authenticated).
    pub subject_id: Option<SubjectId>,
}

impl Identity {
    /// An unauthenticated caller.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self {
            is_authenticated: false,
            display_name: None,
            subject_id: None,
        }
    }

    /// An authenticated caller with both required claims present.
    #[must_use]
    pub fn authenticated(display_name: impl Into<String>, subject_id: impl Into<String>) -> Self {
        Self {
            is_authenticated: true,
            display_name: Some(display_name.into()),
            subject_id: Some(SubjectId(subject_id.into())),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Providers
// ═══════════════════════════════════════════════════════════════════════

/// Integrated provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Dropbox file storage.
    Dropbox,
    /// Microsoft Graph (OneDrive).
    Graph,
}

impl ProviderKind {
    /// Get the provider key as used by the token store.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Dropbox => "dropbox",
            Self::Graph => "graph",
        }
    }

    /// Parse a provider key.
    ///
    /// # Errors
    ///
    /// Returns error if the provider key is not recognized.
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "dropbox" => Ok(Self::Dropbox),
            "graph" => Ok(Self::Graph),
            _ => Err(format!("Unknown provider: {s}")),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Token Resources
// ═══════════════════════════════════════════════════════════════════════

/// Connection status of a token resource.
///
/// The token store reports status as a free-form state string; it is
/// classified here, once, at the store boundary. Only [`TokenStatus::Ok`]
/// counts as connected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenStatus {
    /// Consent completed, access token available.
    Ok,
    /// Placeholder created, consent not yet completed.
    Pending,
    /// The store reported an error state for this resource.
    Error,
    /// Any other store-defined state.
    Other(String),
}

impl TokenStatus {
    /// Classify a raw state string from the token store.
    ///
    /// Comparison is case-insensitive, so `"OK"`, `"Ok"` and `"ok"` all
    /// classify as connected.
    #[must_use]
    pub fn classify(state: &str) -> Self {
        match state.to_lowercase().as_str() {
            "ok" => Self::Ok,
            "pending" => Self::Pending,
            "error" => Self::Error,
            other => Self::Other(other.to_string()),
        }
    }

    /// Whether this status counts as connected.
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        matches!(self, Self::Ok)
    }
}

/// Stored credential/consent state for a (provider, user) pair.
///
/// Created lazily on first reconciliation; status transitions are driven
/// externally by the user completing consent and are observed on the next
/// pass. The access token is opaque bearer material and is redacted from
/// `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenResource {
    /// Provider this resource belongs to.
    pub provider: ProviderKind,

    /// Subject this resource belongs to.
    pub subject: SubjectId,

    /// Classified connection status.
    pub status: TokenStatus,

    /// Bearer credential; present only when status is [`TokenStatus::Ok`].
    pub access_token: Option<String>,

    /// Provider-issued consent URL; present when not connected.
    pub login_url: Option<String>,
}

impl fmt::Debug for TokenResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenResource")
            .field("provider", &self.provider)
            .field("subject", &self.subject)
            .field("status", &self.status)
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("login_url", &self.login_url)
            .finish()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// View Models
// ═══════════════════════════════════════════════════════════════════════

/// Per-provider view model, rebuilt on every reconciliation pass.
///
/// Invariant: a view is never simultaneously connected and carrying a
/// login URL. Construct through [`ConnectionView::connected`],
/// [`ConnectionView::degraded`] or [`ConnectionView::not_connected`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionView {
    /// Whether the provider is connected.
    pub is_connected: bool,

    /// Item names, in provider order. Empty if not connected or degraded.
    pub items: Vec<String>,

    /// Combined login URL; present iff not connected.
    pub login_url: Option<String>,

    /// Whether a connected provider's fetch failed this pass.
    ///
    /// Distinguishes a transient provider outage from "not connected",
    /// so users are not told to log in again for an erroring token.
    pub fetch_failed: bool,
}

impl ConnectionView {
    /// Connected view carrying the fetched item names.
    #[must_use]
    pub const fn connected(items: Vec<String>) -> Self {
        Self {
            is_connected: true,
            items,
            login_url: None,
            fetch_failed: false,
        }
    }

    /// Connected view whose content fetch failed.
    #[must_use]
    pub const fn degraded() -> Self {
        Self {
            is_connected: true,
            items: Vec::new(),
            login_url: None,
            fetch_failed: true,
        }
    }

    /// Not-connected view carrying the correlated login URL.
    #[must_use]
    pub const fn not_connected(login_url: String) -> Self {
        Self {
            is_connected: false,
            items: Vec::new(),
            login_url: Some(login_url),
            fetch_failed: false,
        }
    }
}

/// Per-request dashboard view: one [`ConnectionView`] per configured
/// provider, in configured order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dashboard {
    /// Whether the caller is authenticated.
    pub logged_in: bool,

    /// Display name of the authenticated user.
    pub display_name: Option<String>,

    /// Provider views, in configured provider order.
    pub connections: Vec<(ProviderKind, ConnectionView)>,
}

impl Dashboard {
    /// Dashboard for an unauthenticated caller: no providers processed.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self {
            logged_in: false,
            display_name: None,
            connections: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification_is_case_insensitive() {
        assert_eq!(TokenStatus::classify("ok"), TokenStatus::Ok);
        assert_eq!(TokenStatus::classify("OK"), TokenStatus::Ok);
        assert_eq!(TokenStatus::classify("Ok"), TokenStatus::Ok);
        assert_eq!(TokenStatus::classify("Pending"), TokenStatus::Pending);
        assert_eq!(TokenStatus::classify("ERROR"), TokenStatus::Error);
        assert_eq!(
            TokenStatus::classify("Revoked"),
            TokenStatus::Other("revoked".to_string())
        );
    }

    #[test]
    fn test_only_ok_is_connected() {
        assert!(TokenStatus::Ok.is_connected());
        assert!(!TokenStatus::Pending.is_connected());
        assert!(!TokenStatus::Error.is_connected());
        assert!(!TokenStatus::Other("revoked".into()).is_connected());
    }

    #[test]
    fn test_view_constructors_uphold_mutual_exclusion() {
        let connected = ConnectionView::connected(vec!["a.txt".into()]);
        assert!(connected.is_connected);
        assert!(connected.login_url.is_none());

        let degraded = ConnectionView::degraded();
        assert!(degraded.is_connected);
        assert!(degraded.items.is_empty());
        assert!(degraded.login_url.is_none());
        assert!(degraded.fetch_failed);

        let pending = ConnectionView::not_connected("https://login.example".into());
        assert!(!pending.is_connected);
        assert!(pending.items.is_empty());
        assert!(pending.login_url.is_some());
    }

    #[test]
    fn test_access_token_is_redacted_from_debug() {
        let resource = TokenResource {
            provider: ProviderKind::Dropbox,
            subject: SubjectId::from("user-1"),
            status: TokenStatus::Ok,
            access_token: Some("super-secret".to_string()),
            login_url: None,
        };
        let debug = format!("{resource:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_provider_kind_round_trip() {
        assert_eq!(ProviderKind::Dropbox.as_str(), "dropbox");
        assert_eq!(ProviderKind::Graph.as_str(), "graph");
        assert_eq!(ProviderKind::from_str("DROPBOX"), Ok(ProviderKind::Dropbox));
        assert!(ProviderKind::from_str("box").is_err());
    }
}
