//! Connection reconciler.
//!
//! The orchestration state machine of the broker. Per provider, each pass
//! moves through `token resolved → connected | not connected`:
//!
//! 1. Get-or-create the token resource for (provider, subject).
//! 2. Classify its status; only OK counts as connected.
//! 3. Connected: fetch top-level item names with the resource's access
//!    token. A fetch failure degrades this provider's view only.
//! 4. Not connected: build the correlated login URL from the resource's
//!    login URL and the post-auth redirect.
//!
//! After all providers are processed — connected or not — the session
//! correlation entry is written exactly once, associating this browser
//! session with the subject so the post-auth callback can validate the
//! return trip.

use crate::constants::session_keys;
use crate::error::{BrokerError, Result};
use crate::providers::{ContentFetcher, ProviderRegistry, SessionStore, TokenResourceStore};
use crate::redirect::{self, HostContext};
use crate::state::{ConnectionView, Dashboard, Identity, ProviderKind, SessionId, SubjectId};
use tracing::{debug, info, warn};

/// Connection reconciler.
///
/// Dependencies are injected via generics: the token store, the session
/// store, and the registered content fetchers. Mocks plug in for tests,
/// real stores for production.
#[derive(Clone)]
pub struct ConnectionReconciler<T, S, F>
where
    T: TokenResourceStore,
    S: SessionStore,
    F: ContentFetcher,
{
    store: T,
    sessions: S,
    registry: ProviderRegistry<F>,
}

impl<T, S, F> ConnectionReconciler<T, S, F>
where
    T: TokenResourceStore,
    S: SessionStore,
    F: ContentFetcher,
{
    /// Create a new reconciler.
    #[must_use]
    pub const fn new(store: T, sessions: S, registry: ProviderRegistry<F>) -> Self {
        Self {
            store,
            sessions,
            registry,
        }
    }

    /// Run one reconciliation pass for the current request.
    ///
    /// Unauthenticated callers get an anonymous dashboard; no provider is
    /// processed and no session entry is written. Providers are processed
    /// sequentially in registry (configuration) order.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - A required identity claim is absent → [`BrokerError::MissingIdentityClaim`]
    /// - The token store fails → [`BrokerError::StoreUnavailable`] / [`BrokerError::AuthFailure`]
    /// - The session write fails → [`BrokerError::SessionStoreFailure`]
    ///
    /// Provider fetch failures are not errors at this level; they degrade
    /// the affected provider's view and leave siblings untouched.
    pub async fn reconcile(
        &self,
        identity: &Identity,
        host: &HostContext,
        session_id: SessionId,
    ) -> Result<Dashboard> {
        // Entry condition: caller must be authenticated
        if !identity.is_authenticated {
            debug!("Unauthenticated request, skipping reconciliation");
            return Ok(Dashboard::anonymous());
        }

        let subject = identity
            .subject_id
            .as_ref()
            .ok_or(BrokerError::MissingIdentityClaim("subjectId"))?;
        let display_name = identity
            .display_name
            .as_ref()
            .ok_or(BrokerError::MissingIdentityClaim("name"))?;

        let mut connections = Vec::with_capacity(self.registry.len());
        for (provider, fetcher) in self.registry.iter() {
            let view = self
                .reconcile_provider(*provider, fetcher, subject, host)
                .await?;
            connections.push((*provider, view));
        }

        // Correlation entry: written once per pass, after every provider,
        // regardless of per-provider outcomes.
        self.sessions
            .set(session_id, session_keys::CORRELATION, subject.as_str())
            .await?;
        debug!(%session_id, "Session correlation entry written");

        Ok(Dashboard {
            logged_in: true,
            display_name: Some(display_name.clone()),
            connections,
        })
    }

    /// Reconcile a single provider into its view.
    ///
    /// Store-scoped failures propagate (the whole request cannot proceed
    /// with an unknown token state); provider-scoped fetch failures are
    /// absorbed into a degraded view.
    async fn reconcile_provider(
        &self,
        provider: ProviderKind,
        fetcher: &F,
        subject: &SubjectId,
        host: &HostContext,
    ) -> Result<ConnectionView> {
        let resource = self.store.get_or_create(provider, subject).await?;
        debug!(%provider, status = ?resource.status, "Token resource resolved");

        if resource.status.is_connected() {
            let token = resource.access_token.as_deref().unwrap_or_default();
            return Ok(match fetcher.list_top_level_items(token).await {
                Ok(items) => {
                    info!(%provider, items = items.len(), "Provider connected");
                    ConnectionView::connected(items)
                }
                Err(err) => {
                    // Connected but erroring is not "not connected": never
                    // send the user back through consent for an outage.
                    warn!(%provider, %err, "Content fetch failed, degrading view");
                    ConnectionView::degraded()
                }
            });
        }

        let login_url = resource.login_url.as_deref().ok_or_else(|| {
            BrokerError::InternalError(format!(
                "Token resource for {provider} is not connected but has no login URL"
            ))
        })?;
        let redirect_url = redirect::post_auth_redirect_url(provider, subject, host)?;

        info!(%provider, "Provider not connected, issuing login URL");
        Ok(ConnectionView::not_connected(
            redirect::with_post_login_redirect(login_url, &redirect_url),
        ))
    }
}

#[cfg(all(test, feature = "test-utils"))]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::mocks::{MockContentFetcher, MockSessionStore, MockTokenResourceStore};

    fn reconciler_with(
        store: MockTokenResourceStore,
        sessions: MockSessionStore,
        registry: ProviderRegistry<MockContentFetcher>,
    ) -> ConnectionReconciler<MockTokenResourceStore, MockSessionStore, MockContentFetcher> {
        ConnectionReconciler::new(store, sessions, registry)
    }

    #[tokio::test]
    async fn test_missing_subject_claim_is_fatal() {
        let identity = Identity {
            is_authenticated: true,
            display_name: Some("Ada".to_string()),
            subject_id: None,
        };
        let reconciler = reconciler_with(
            MockTokenResourceStore::new(),
            MockSessionStore::new(),
            ProviderRegistry::new(),
        );

        let result = reconciler
            .reconcile(&identity, &HostContext::https("app.example.com"), SessionId::new())
            .await;

        assert_eq!(result, Err(BrokerError::MissingIdentityClaim("subjectId")));
    }

    #[tokio::test]
    async fn test_store_failure_aborts_request() {
        let identity = Identity::authenticated("Ada", "user-1");
        let sessions = MockSessionStore::new();
        let reconciler = reconciler_with(
            MockTokenResourceStore::failing(),
            sessions.clone(),
            ProviderRegistry::new()
                .register(ProviderKind::Dropbox, MockContentFetcher::new(ProviderKind::Dropbox, vec![])),
        );

        let result = reconciler
            .reconcile(&identity, &HostContext::https("app.example.com"), SessionId::new())
            .await;

        assert!(matches!(result, Err(BrokerError::StoreUnavailable(_))));
        // No correlation entry on a failed pass
        assert_eq!(sessions.write_count().unwrap(), 0);
    }
}
