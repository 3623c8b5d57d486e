//! Broker capability traits and provider-facing implementations.
//!
//! This module defines traits for all external dependencies the broker
//! touches. These traits enable dependency injection and make the
//! reconciliation logic testable:
//!
//! - **Testing**: Use mocks (in-memory, deterministic)
//! - **Production**: Use real services (token store REST API, Dropbox,
//!   Microsoft Graph, Redis)
//!
//! The traits are `impl Future` based (no `async_trait`); heterogeneous
//! registries use enum dispatch (see [`registry`]).

pub mod content;
pub mod credentials;
pub mod dropbox;
pub mod graph;
pub mod registry;
pub mod session;
pub mod token_store;

// Re-export provider traits and concrete implementations
pub use content::ContentFetcher;
pub use credentials::{ApiCredential, ManagedIdentityCredential};
pub use dropbox::DropboxFetcher;
pub use graph::GraphFetcher;
pub use registry::{ProviderFetcher, ProviderRegistry};
pub use session::SessionStore;
pub use token_store::TokenResourceStore;
