//! Broker constants.
//!
//! Key and parameter names shared with the token store and the post-auth
//! callback handler. These are wire contracts; changing them breaks the
//! consent round trip.

/// Session entry keys.
pub mod session_keys {
    /// Correlation entry linking an in-flight consent redirect back to the
    /// originating user. Value is the subject id.
    pub const CORRELATION: &str = "tvId";
}

/// Query parameter names on the post-auth redirect URL.
pub mod query_params {
    /// Provider key parameter consumed by the post-auth callback.
    pub const SERVICE_ID: &str = "serviceId";

    /// Subject id parameter consumed by the post-auth callback.
    pub const TOKEN_ID: &str = "tokenId";

    /// Parameter appended to the provider login URL carrying the
    /// percent-encoded post-auth redirect URL.
    pub const POST_LOGIN_REDIRECT: &str = "PostLoginRedirectUrl";
}

/// Path of this system's own post-auth endpoint.
pub const POST_AUTH_PATH: &str = "postauth";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_contract_names() {
        assert_eq!(session_keys::CORRELATION, "tvId");
        assert_eq!(query_params::SERVICE_ID, "serviceId");
        assert_eq!(query_params::TOKEN_ID, "tokenId");
        assert_eq!(query_params::POST_LOGIN_REDIRECT, "PostLoginRedirectUrl");
        assert_eq!(POST_AUTH_PATH, "postauth");
    }
}
