//! Custom Axum extractors.
//!
//! This module contains extractors for the request-scoped inputs the
//! reconciler needs:
//! - [`RequestIdentity`]: identity claims established by the auth gateway
//! - [`SessionCookie`]: browser session id (from cookie, minted if absent)
//! - [`RequestHost`]: scheme/host/port of the inbound request

use crate::redirect::HostContext;
use crate::state::{Identity, SessionId, SubjectId};
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{HeaderMap, request::Parts},
};

/// Header carrying the stable subject id, set by the auth gateway.
const SUBJECT_HEADER: &str = "x-auth-subject";

/// Header carrying the display name, set by the auth gateway.
const NAME_HEADER: &str = "x-auth-name";

/// Session cookie name.
pub const SESSION_COOKIE: &str = "tb.sid";

/// Identity claims of the current request.
///
/// The authentication layer in front of this system (out of scope here)
/// establishes the user and forwards claims as headers. Absence of both
/// claim headers means the caller is unauthenticated; a partially present
/// claim set surfaces later as `MissingIdentityClaim`.
#[derive(Debug, Clone)]
pub struct RequestIdentity(pub Identity);

#[async_trait]
impl<S> FromRequestParts<S> for RequestIdentity
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let subject = header_value(&parts.headers, SUBJECT_HEADER);
        let name = header_value(&parts.headers, NAME_HEADER);

        let identity = if subject.is_none() && name.is_none() {
            Identity::anonymous()
        } else {
            Identity {
                is_authenticated: true,
                display_name: name,
                subject_id: subject.map(SubjectId),
            }
        };

        Ok(Self(identity))
    }
}

/// Browser session id.
///
/// Extracted from the session cookie; a fresh id is minted when the
/// cookie is absent or unparseable, and `is_new` tells the handler to
/// set the cookie on the response.
#[derive(Debug, Clone, Copy)]
pub struct SessionCookie {
    /// The session id.
    pub id: SessionId,

    /// Whether the id was minted for this request.
    pub is_new: bool,
}

#[async_trait]
impl<S> FromRequestParts<S> for SessionCookie
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let existing = parts
            .headers
            .get("cookie")
            .and_then(|v| v.to_str().ok())
            .and_then(parse_session_cookie);

        Ok(existing.map_or_else(
            || Self {
                id: SessionId::new(),
                is_new: true,
            },
            |id| Self { id, is_new: false },
        ))
    }
}

/// Parse the session id out of a Cookie header value.
fn parse_session_cookie(cookies: &str) -> Option<SessionId> {
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        if name != SESSION_COOKIE {
            return None;
        }
        uuid::Uuid::parse_str(value).ok().map(SessionId)
    })
}

/// Scheme/host/port of the inbound request.
///
/// Honors `X-Forwarded-Proto`/`X-Forwarded-Host` so redirect URLs
/// round-trip correctly behind proxies; defaults to https on the Host
/// header otherwise.
#[derive(Debug, Clone)]
pub struct RequestHost(pub HostContext);

#[async_trait]
impl<S> FromRequestParts<S> for RequestHost
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let scheme = header_value(&parts.headers, "x-forwarded-proto")
            .unwrap_or_else(|| "https".to_string());

        let authority = header_value(&parts.headers, "x-forwarded-host")
            .or_else(|| header_value(&parts.headers, "host"))
            .unwrap_or_else(|| "localhost".to_string());

        let (host, port) = match authority.split_once(':') {
            Some((host, port)) => (host.to_string(), port.parse::<u16>().ok()),
            None => (authority, None),
        };

        let mut context = HostContext {
            scheme,
            host,
            port: None,
        };
        if let Some(port) = port {
            context = context.with_port(port);
        }

        Ok(Self(context))
    }
}

/// Read a header as an owned string.
fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_session_cookie() {
        let id = uuid::Uuid::new_v4();
        let header = format!("theme=dark; tb.sid={id}; lang=en");
        assert_eq!(parse_session_cookie(&header), Some(SessionId(id)));
    }

    #[test]
    fn test_parse_session_cookie_rejects_garbage() {
        assert_eq!(parse_session_cookie("tb.sid=not-a-uuid"), None);
        assert_eq!(parse_session_cookie("other=1"), None);
    }
}
