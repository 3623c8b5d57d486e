//! Mock store credential for testing.

use crate::error::{BrokerError, Result};
use crate::providers::ApiCredential;
use std::future::Future;

/// Mock credential returning a fixed token.
#[derive(Debug, Clone)]
pub struct MockApiCredential {
    token: String,
    /// Whether to simulate success or a rejected credential.
    pub should_succeed: bool,
}

impl MockApiCredential {
    /// Create a mock credential returning a fixed token.
    #[must_use]
    pub fn new() -> Self {
        Self {
            token: "mock-store-api-token".to_string(),
            should_succeed: true,
        }
    }

    /// Create a mock whose acquisition fails with `AuthFailure`.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            should_succeed: false,
            ..Self::new()
        }
    }
}

impl Default for MockApiCredential {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiCredential for MockApiCredential {
    fn access_token(&self) -> impl Future<Output = Result<String>> + Send {
        let token = self.token.clone();
        let should_succeed = self.should_succeed;

        async move {
            if !should_succeed {
                return Err(BrokerError::AuthFailure("mock credential rejected".to_string()));
            }
            Ok(token)
        }
    }
}
