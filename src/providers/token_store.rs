//! Token resource store trait.

use crate::error::Result;
use crate::state::{ProviderKind, SubjectId, TokenResource};

/// Typed contract over the central token store.
///
/// The store holds one token resource per (provider, user) pair and
/// brokers the OAuth consent flows that complete them. This broker only
/// ever reads, creates placeholders, and classifies — it never deletes.
pub trait TokenResourceStore: Send + Sync {
    /// Read-only lookup of a token resource.
    ///
    /// Must not create state. Returns `None` if no resource exists for
    /// the (provider, subject) pair.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Backend cannot be reached → [`crate::error::BrokerError::StoreUnavailable`]
    /// - The broker's own credential is rejected → [`crate::error::BrokerError::AuthFailure`]
    fn fetch(
        &self,
        provider: ProviderKind,
        subject: &SubjectId,
    ) -> impl std::future::Future<Output = Result<Option<TokenResource>>> + Send;

    /// Create a placeholder resource (status not yet OK, fresh login URL).
    ///
    /// Idempotent in intent: if called concurrently for the same key, the
    /// store is the authority for deduplication — this client takes no
    /// lock, and either caller's result is usable.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`TokenResourceStore::fetch`].
    fn create(
        &self,
        provider: ProviderKind,
        subject: &SubjectId,
    ) -> impl std::future::Future<Output = Result<TokenResource>> + Send;

    /// Fetch the resource, creating a placeholder if absent.
    ///
    /// Not atomic across the two calls: two concurrent first visits may
    /// both call `create`. That race is benign — at worst the store ends
    /// up with redundant equivalent placeholders, never corrupted state.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`TokenResourceStore::fetch`].
    fn get_or_create(
        &self,
        provider: ProviderKind,
        subject: &SubjectId,
    ) -> impl std::future::Future<Output = Result<TokenResource>> + Send {
        async move {
            if let Some(resource) = self.fetch(provider, subject).await? {
                return Ok(resource);
            }

            self.create(provider, subject).await
        }
    }
}
