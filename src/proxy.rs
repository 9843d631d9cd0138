//! Reverse proxy for the REST backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser calls `/api/v1/...` on the host so it never needs CORS or the
//! backend's address. Each request is forwarded once to `BACKEND_URL` with
//! the same method, query, body and end-to-end headers (the bearer token
//! included). The backend's status and body come back untouched.
//!
//! ERROR HANDLING
//! ==============
//! An unreachable or timed-out backend becomes a 502 carrying the same
//! `{status:false, message}` envelope the backend uses, so the client's
//! error path needs no special case.

#[cfg(test)]
#[path = "proxy_test.rs"]
mod proxy_test;

use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::extract::{Request, State};
use axum::http::header::{self, HeaderMap, HeaderName};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

/// Upper bound on a proxied request body.
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Headers that describe a single hop and must not be forwarded.
const HOP_BY_HOP: &[HeaderName] = &[
    header::CONNECTION,
    header::HOST,
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
    header::CONTENT_LENGTH,
];

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("http client setup failed: {0}")]
    Client(reqwest::Error),
    #[error("request body rejected: {0}")]
    Body(String),
    #[error("backend request failed: {0}")]
    Upstream(#[from] reqwest::Error),
}

impl HostError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Body(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Upstream(e) if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            Self::Client(_) | Self::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for HostError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match status {
            StatusCode::PAYLOAD_TOO_LARGE => "Request too large",
            StatusCode::GATEWAY_TIMEOUT => "Backend timed out",
            _ => "Backend unavailable",
        };
        (status, Json(serde_json::json!({ "status": false, "message": message }))).into_response()
    }
}

/// Forwarding target plus a pooled HTTP client.
#[derive(Clone, Debug)]
pub struct Proxy {
    client: reqwest::Client,
    base_url: String,
}

impl Proxy {
    /// # Errors
    ///
    /// Returns [`HostError::Client`] if the TLS backend cannot initialize.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, HostError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(HostError::Client)?;
        Ok(Self { client, base_url: base_url.into() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Join the backend base with the incoming path and query.
#[must_use]
pub fn upstream_url(base: &str, path: &str, query: Option<&str>) -> String {
    let mut url = format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'));
    if let Some(query) = query.filter(|q| !q.is_empty()) {
        url.push('?');
        url.push_str(query);
    }
    url
}

/// Copy end-to-end headers, dropping hop-by-hop ones.
#[must_use]
pub fn forwardable_headers(headers: &HeaderMap) -> HeaderMap {
    let mut out = headers.clone();
    for name in HOP_BY_HOP {
        out.remove(name);
    }
    out
}

/// Axum handler mounted at `/api/v1/{*path}`.
pub async fn forward(State(proxy): State<Proxy>, req: Request) -> Response {
    match forward_inner(&proxy, req).await {
        Ok(resp) => resp,
        Err(e) => {
            tracing::warn!(error = %e, backend = %proxy.base_url, "proxy request failed");
            e.into_response()
        }
    }
}

async fn forward_inner(proxy: &Proxy, req: Request) -> Result<Response, HostError> {
    let (parts, body) = req.into_parts();
    let url = upstream_url(&proxy.base_url, parts.uri.path(), parts.uri.query());
    let body: Bytes = axum::body::to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|e| HostError::Body(e.to_string()))?;

    tracing::debug!(method = %parts.method, %url, "proxying");
    let upstream = proxy
        .client
        .request(parts.method, &url)
        .headers(forwardable_headers(&parts.headers))
        .body(body)
        .send()
        .await?;

    let status = upstream.status();
    let headers = forwardable_headers(upstream.headers());
    let bytes = upstream.bytes().await?;

    let mut resp = Response::new(Body::from(bytes));
    *resp.status_mut() = status;
    *resp.headers_mut() = headers;
    Ok(resp)
}
