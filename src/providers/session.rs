//! Session store trait.

use crate::error::Result;
use crate::state::SessionId;

/// Key-value session store, scoped to a browser session.
///
/// The broker writes exactly one entry per reconciliation pass (the
/// correlation entry) and the post-auth callback reads it back. Entry
/// lifecycle is owned entirely by the session backend, never by the
/// broker.
pub trait SessionStore: Send + Sync {
    /// Read a session entry.
    ///
    /// Returns `None` if the entry does not exist or has expired.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::BrokerError::SessionStoreFailure`] if the
    /// backend cannot be reached.
    fn get(
        &self,
        session_id: SessionId,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>>> + Send;

    /// Write a session entry, fully overwriting any prior value.
    ///
    /// Overwrite-only semantics eliminate partial-write races between
    /// concurrent passes for the same session.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::BrokerError::SessionStoreFailure`] if the
    /// backend cannot be reached.
    fn set(
        &self,
        session_id: SessionId,
        key: &str,
        value: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}
