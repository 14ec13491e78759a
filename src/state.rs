//! Shared application state.

use std::sync::Arc;

use crate::config::HostConfig;
use crate::error::HostError;

/// Injected into Axum handlers via the `State` extractor. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<HostConfig>,
    /// Shared upstream client. Redirects are passed through to the browser.
    pub http: reqwest::Client,
}

impl AppState {
    /// # Errors
    ///
    /// Returns [`HostError::HttpClient`] if the TLS backend fails to initialize.
    pub fn new(config: HostConfig) -> Result<Self, HostError> {
        let http = reqwest::Client::builder()
            .timeout(config.backend_timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self { config: Arc::new(config), http })
    }
}
