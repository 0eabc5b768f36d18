use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, Uri, header, request::Parts},
};

use crate::infra::app_state::AppState;

const FORWARDED_PROTO: &str = "x-forwarded-proto";
const FALLBACK_BASE: &str = "http://localhost";

/// Base address used to build absolute image URLs for the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl(pub String);

impl FromRequestParts<AppState> for BaseUrl {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(resolve_base_url(
            state.config.public_base_url.as_deref(),
            &parts.headers,
            &parts.uri,
        )))
    }
}

/// The configured public base wins; otherwise `<scheme>://<host>` from the
/// request, where scheme honours `X-Forwarded-Proto`.
pub fn resolve_base_url(
    public_base_url: Option<&str>,
    headers: &HeaderMap,
    uri: &Uri,
) -> String {
    if let Some(base) = public_base_url {
        return base.trim_end_matches('/').to_string();
    }

    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .or_else(|| uri.authority().map(|a| a.as_str().to_owned()));
    let Some(host) = host.filter(|host| !host.is_empty()) else {
        return FALLBACK_BASE.to_string();
    };

    let scheme = headers
        .get(FORWARDED_PROTO)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|proto| !proto.is_empty())
        .or_else(|| uri.scheme_str())
        .unwrap_or("http");

    format!("{scheme}://{host}")
}
