//! Extraction of the scheme and host a request was addressed to.
//!
//! Behind a reverse proxy the `X-Forwarded-*` headers win; otherwise the
//! `Host` header and the request URI are used.

use std::convert::Infallible;

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::HOST;
use axum::http::request::Parts;
use axum::http::{HeaderMap, Uri};

use crate::domain::checkout::RequestOrigin;

const X_FORWARDED_HOST: &str = "x-forwarded-host";
const X_FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Origin of the inbound request, `None` when no host is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundOrigin(pub Option<RequestOrigin>);

#[async_trait]
impl<S> FromRequestParts<S> for InboundOrigin
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(origin_from_parts(&parts.headers, &parts.uri)))
    }
}

/// Resolve `<scheme>://<host>` from headers and URI.
///
/// - scheme: `X-Forwarded-Proto`, else the URI scheme, else `http`
/// - host: `X-Forwarded-Host`, else `Host`, else the URI authority
pub fn origin_from_parts(headers: &HeaderMap, uri: &Uri) -> Option<RequestOrigin> {
    let host = first_value(headers, X_FORWARDED_HOST)
        .or_else(|| first_value(headers, HOST.as_str()))
        .or_else(|| uri.authority().map(|a| a.as_str().to_string()))?;

    let scheme = first_value(headers, X_FORWARDED_PROTO)
        .or_else(|| uri.scheme_str().map(str::to_string))
        .unwrap_or_else(|| "http".to_string());

    Some(RequestOrigin::new(scheme, host))
}

/// First comma-separated entry of a header, trimmed. Proxies append.
fn first_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
