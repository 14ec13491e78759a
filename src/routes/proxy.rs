//! `/utilities` reverse proxy.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser only ever talks to this host. Every `/utilities/...` call is
//! forwarded verbatim (method, path, query, body, end-to-end headers) to the
//! configured backend, and the backend's reply is returned as-is. Transport
//! failures become a JSON `{message}` body the UI can toast.

use axum::body::{Body, to_bytes};
use axum::extract::{Request, State};
use axum::http::{HeaderMap, header};
use axum::response::Response;

use crate::error::ProxyError;
use crate::state::AppState;

/// Headers that describe a single connection and must not be forwarded.
const HOP_BY_HOP: [&str; 10] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
    "host",
    "content-length",
];

/// Copy end-to-end headers, dropping hop-by-hop ones and anything the
/// `Connection` header nominates.
pub fn end_to_end_headers(headers: &HeaderMap) -> HeaderMap {
    let nominated: Vec<String> = headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .map(|name| name.trim().to_ascii_lowercase())
        .filter(|name| !name.is_empty())
        .collect();

    let mut out = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        if HOP_BY_HOP.contains(&name.as_str()) || nominated.iter().any(|n| n == name.as_str()) {
            continue;
        }
        out.append(name.clone(), value.clone());
    }
    out
}

/// Join the backend root and the incoming path+query.
pub fn upstream_url(backend_url: &str, path_and_query: &str) -> String {
    format!("{}{}", backend_url.trim_end_matches('/'), path_and_query)
}

/// `ANY /utilities/{*path}`: forward to the backend.
pub async fn forward(State(state): State<AppState>, request: Request) -> Result<Response, ProxyError> {
    let (parts, body) = request.into_parts();
    let path_and_query = parts
        .uri
        .path_and_query()
        .map_or_else(|| parts.uri.path().to_owned(), |pq| pq.as_str().to_owned());
    let target = upstream_url(&state.config.backend_url, &path_and_query);

    let body = to_bytes(body, state.config.max_upload_bytes)
        .await
        .map_err(|e| ProxyError::Body(format!("Request body exceeds {} bytes: {e}", state.config.max_upload_bytes)))?;

    let upstream = state
        .http
        .request(parts.method.clone(), &target)
        .headers(end_to_end_headers(&parts.headers))
        .body(body)
        .send()
        .await
        .map_err(|e| {
            tracing::warn!(method = %parts.method, path = %path_and_query, error = %e, "backend request failed");
            ProxyError::from(e)
        })?;

    let status = upstream.status();
    let headers = end_to_end_headers(upstream.headers());
    let bytes = upstream.bytes().await.map_err(|e| {
        tracing::warn!(path = %path_and_query, error = %e, "backend response body failed");
        ProxyError::from(e)
    })?;

    tracing::debug!(method = %parts.method, path = %path_and_query, status = status.as_u16(), "proxied");

    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    Ok(response)
}

#[cfg(test)]
#[path = "proxy_test.rs"]
mod tests;
