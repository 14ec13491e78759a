//! Host error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::config::ConfigError;

/// Startup failures. Printed once and the process exits.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("http client build failed: {0}")]
    HttpClient(#[from] reqwest::Error),
    #[error("leptos configuration: {0}")]
    Leptos(String),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure forwarding a `/utilities` request.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("backend request timed out")]
    Timeout,
    #[error("backend unreachable: {0}")]
    Upstream(String),
    #[error("request body rejected: {0}")]
    Body(String),
}

/// Message the UI shows for any transport failure.
pub const UNAVAILABLE_MESSAGE: &str = "Network error or server unavailable.";

impl ProxyError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Timeout => StatusCode::GATEWAY_TIMEOUT,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::Body(_) => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }
}

impl From<reqwest::Error> for ProxyError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { Self::Timeout } else { Self::Upstream(err.to_string()) }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let message = match &self {
            Self::Body(reason) => reason.clone(),
            Self::Timeout | Self::Upstream(_) => UNAVAILABLE_MESSAGE.to_owned(),
        };
        (self.status(), Json(serde_json::json!({ "message": message }))).into_response()
    }
}
