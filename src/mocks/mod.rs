//! Mock providers for testing.
//!
//! In-memory, deterministic implementations of the broker's capability
//! traits. All mocks expose counters so tests can assert on side effects
//! (network calls avoided, placeholders created, session writes).

pub mod content;
pub mod credentials;
pub mod session;
pub mod token_store;

pub use content::MockContentFetcher;
pub use credentials::MockApiCredential;
pub use session::MockSessionStore;
pub use token_store::MockTokenResourceStore;
