//! Concrete store backends.
//!
//! Production implementations of the broker's store traits: the REST
//! token-store client and the Redis session store.

pub mod session_redis;
pub mod vault_rest;

pub use session_redis::RedisSessionStore;
pub use vault_rest::RestVaultStore;
