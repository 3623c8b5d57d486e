//! Error types for token brokering operations.

use crate::state::ProviderKind;
use thiserror::Error;

/// Result type alias for broker operations.
pub type Result<T> = std::result::Result<T, BrokerError>;

/// Error taxonomy for the token broker.
///
/// Errors split into two families: request-fatal errors (the whole view
/// cannot be computed) and provider-scoped errors (one provider's view
/// degrades while its siblings are unaffected). See [`BrokerError::is_request_fatal`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BrokerError {
    // ═══════════════════════════════════════════════════════════
    // Token Store Errors (request-fatal)
    // ═══════════════════════════════════════════════════════════

    /// Token store backend cannot be reached.
    #[error("Token store unavailable: {0}")]
    StoreUnavailable(String),

    /// The broker's own credential to the token store was rejected.
    #[error("Token store rejected the broker credential: {0}")]
    AuthFailure(String),

    // ═══════════════════════════════════════════════════════════
    // Provider Errors (provider-scoped)
    // ═══════════════════════════════════════════════════════════

    /// A provider-side content fetch failed (expired token, outage,
    /// rate limit). Recovered at provider granularity.
    #[error("Provider {provider} fetch failed: {cause}")]
    ProviderFetchFailure {
        /// Provider whose fetch failed.
        provider: ProviderKind,
        /// Underlying cause, as reported by the provider client.
        cause: String,
    },

    // ═══════════════════════════════════════════════════════════
    // Identity Errors (request-fatal)
    // ═══════════════════════════════════════════════════════════

    /// Caller is authenticated but a required identity claim is absent.
    #[error("Missing identity claim: {0}")]
    MissingIdentityClaim(&'static str),

    // ═══════════════════════════════════════════════════════════
    // System Errors (request-fatal)
    // ═══════════════════════════════════════════════════════════

    /// Session store operation failed.
    #[error("Session store error: {0}")]
    SessionStoreFailure(String),

    /// Internal error (should not be exposed to users).
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl BrokerError {
    /// Returns `true` if this error aborts the whole request.
    ///
    /// Store-scoped, identity, and session failures are fatal; provider
    /// fetch failures are recovered locally as a degraded view.
    ///
    /// # Examples
    ///
    /// ```
    /// # use token_broker::error::BrokerError;
    /// assert!(BrokerError::StoreUnavailable("timeout".into()).is_request_fatal());
    /// ```
    #[must_use]
    pub const fn is_request_fatal(&self) -> bool {
        !matches!(self, Self::ProviderFetchFailure { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_failure_is_not_fatal() {
        let err = BrokerError::ProviderFetchFailure {
            provider: ProviderKind::Dropbox,
            cause: "429 Too Many Requests".to_string(),
        };
        assert!(!err.is_request_fatal());
    }

    #[test]
    fn test_store_and_identity_failures_are_fatal() {
        assert!(BrokerError::StoreUnavailable("connection refused".into()).is_request_fatal());
        assert!(BrokerError::AuthFailure("401".into()).is_request_fatal());
        assert!(BrokerError::MissingIdentityClaim("subjectId").is_request_fatal());
        assert!(BrokerError::SessionStoreFailure("redis down".into()).is_request_fatal());
    }
}
