//! # Token Broker
//!
//! Per-user, multi-provider token broker backed by a central token store.
//!
//! For an authenticated user, the broker determines — per configured
//! provider — whether a usable access token already exists in the token
//! store. Connected providers get a short listing of the user's top-level
//! items; not-connected providers get a login URL carrying a correlated
//! post-auth redirect so the consent flow can find its way back.
//!
//! ## Architecture
//!
//! The broker is built around capability traits with injected
//! implementations:
//!
//! ```text
//! View request
//!     → ConnectionReconciler (per provider, configured order)
//!         → TokenResourceStore::get_or_create
//!         → classify status
//!         → ContentFetcher::list_top_level_items   (connected)
//!         → redirect::post_auth_redirect_url       (not connected)
//!     → SessionStore::set("tvId", subject)         (once, unconditional)
//! ```
//!
//! ## Example: reconciling with mocks
//!
//! ```rust,ignore
//! use token_broker::*;
//!
//! let reconciler = ConnectionReconciler::new(
//!     MockTokenResourceStore::new(),
//!     MockSessionStore::new(),
//!     ProviderRegistry::new()
//!         .register(ProviderKind::Dropbox, MockContentFetcher::new(ProviderKind::Dropbox, vec![])),
//! );
//!
//! let dashboard = reconciler
//!     .reconcile(&identity, &host, session_id)
//!     .await?;
//! ```

// Public modules
pub mod config;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod providers;
pub mod reconciler;
pub mod redirect;
pub mod router;
pub mod state;
pub mod stores;

// Mock providers (for testing)
#[cfg(feature = "test-utils")]
pub mod mocks;

// Re-export main types for convenience
pub use config::BrokerConfig;
pub use error::{BrokerError, Result};
pub use providers::{ApiCredential, ContentFetcher, ProviderRegistry, SessionStore, TokenResourceStore};
pub use reconciler::ConnectionReconciler;
pub use redirect::HostContext;
pub use state::{ConnectionView, Dashboard, Identity, ProviderKind, SessionId, SubjectId, TokenResource, TokenStatus};
