//! Dashboard view handler.

use crate::handlers::error::ApiError;
use crate::handlers::extract::{RequestHost, RequestIdentity, SESSION_COOKIE, SessionCookie};
use crate::providers::{ContentFetcher, SessionStore, TokenResourceStore};
use crate::reconciler::ConnectionReconciler;
use axum::{
    Json,
    extract::State,
    http::header::SET_COOKIE,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// Serve the dashboard view.
///
/// # Endpoint
///
/// ```text
/// GET /
/// ```
///
/// Runs one reconciliation pass for the authenticated user and returns
/// the per-provider connection views as JSON. Mints the session cookie
/// when the request carried none.
///
/// # Errors
///
/// Request-fatal broker errors (store unreachable, credential rejected,
/// missing identity claim, session write failure) map to 5xx responses;
/// provider fetch failures never fail the request.
pub async fn get_dashboard<T, S, F>(
    State(reconciler): State<Arc<ConnectionReconciler<T, S, F>>>,
    RequestIdentity(identity): RequestIdentity,
    RequestHost(host): RequestHost,
    session: SessionCookie,
) -> Result<Response, ApiError>
where
    T: TokenResourceStore,
    S: SessionStore,
    F: ContentFetcher,
{
    let dashboard = reconciler.reconcile(&identity, &host, session.id).await?;

    let mut response = Json(dashboard).into_response();
    if session.is_new {
        let cookie = format!("{SESSION_COOKIE}={}; Path=/; HttpOnly; Secure", session.id);
        if let Ok(value) = cookie.parse() {
            response.headers_mut().insert(SET_COOKIE, value);
        }
    }

    Ok(response)
}
