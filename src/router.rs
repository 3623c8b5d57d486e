//! Broker router composition.

use crate::handlers::dashboard;
use crate::providers::{ContentFetcher, SessionStore, TokenResourceStore};
use crate::reconciler::ConnectionReconciler;
use axum::{Router, routing::get};
use std::sync::Arc;

/// Create the broker router.
///
/// # Routes
///
/// - `GET /` - Dashboard: per-provider connection state, item names, or
///   login URLs
///
/// # Example
///
/// ```rust,ignore
/// let reconciler = Arc::new(ConnectionReconciler::new(
///     RestVaultStore::new(config.store_url.clone(), credential),
///     RedisSessionStore::new("redis://127.0.0.1:6379", config.session_ttl).await?,
///     ProviderRegistry::standard(&config),
/// ));
///
/// let app = broker_router(reconciler);
/// ```
pub fn broker_router<T, S, F>(reconciler: Arc<ConnectionReconciler<T, S, F>>) -> Router
where
    T: TokenResourceStore + 'static,
    S: SessionStore + 'static,
    F: ContentFetcher + 'static,
{
    Router::new()
        .route("/", get(dashboard::get_dashboard::<T, S, F>))
        .with_state(reconciler)
}
