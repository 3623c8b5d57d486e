//! Error-to-response bridging for web handlers.

use crate::error::BrokerError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// HTTP-facing error wrapper.
///
/// Converts broker errors into JSON error responses without leaking
/// internal details to the client.
#[derive(Debug)]
pub struct ApiError(pub BrokerError);

/// JSON error body.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    code: &'static str,
}

impl ApiError {
    fn status_and_body(&self) -> (StatusCode, ErrorBody) {
        match &self.0 {
            BrokerError::StoreUnavailable(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorBody {
                    error: "Token store is unavailable",
                    code: "store_unavailable",
                },
            ),
            BrokerError::AuthFailure(_) => (
                StatusCode::BAD_GATEWAY,
                ErrorBody {
                    error: "Token store rejected the broker credential",
                    code: "store_auth_failure",
                },
            ),
            BrokerError::MissingIdentityClaim(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    error: "Identity configuration fault",
                    code: "missing_identity_claim",
                },
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    error: "Internal error",
                    code: "internal_error",
                },
            ),
        }
    }
}

impl From<BrokerError> for ApiError {
    fn from(err: BrokerError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.0, "Request failed");
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let (status, body) =
            ApiError(BrokerError::StoreUnavailable("down".into())).status_and_body();
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.code, "store_unavailable");

        let (status, _) = ApiError(BrokerError::AuthFailure("401".into())).status_and_body();
        assert_eq!(status, StatusCode::BAD_GATEWAY);

        let (status, _) =
            ApiError(BrokerError::MissingIdentityClaim("subjectId")).status_and_body();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
