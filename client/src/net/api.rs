//! REST API helpers for the backend's `/utilities` surface.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`, same-origin, so the
//! host's proxy forwards them to the backend.
//! Server-side (SSR): every call resolves to an error since these endpoints
//! are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every call returns `Result<_, ApiError>`. Non-2xx responses carry the
//! backend's `message`/`error` text when present and a per-call fallback
//! otherwise. Transport failures use status 0. Pages turn errors into toasts
//! and send the user to `/login` on 401.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::fmt;

use records::analysis::{
    AssignAnalystRequest, CanMerge, ChunkDetail, ChunkSummary, MergeResponse, ProofValidationRequest, SelectedModel,
    Threshold, Verdict, VerdictChange, verdict_endpoint,
};
use records::auth::{LoginReply, LoginRequest, RegisterOutcome, RegisterRequest};
use records::endpoints;
use records::media::{PredictionReply, UrlPredictionRequest};
use records::runs::{
    ExpectedScore, MessageReply, ModelCatalog, RegressionModel, RegressionReady, RegressionRunRequest, SelectedVersion,
    StartOutcome, StartProcessReply, StartProcessRequest,
};
use records::task::{TaskReply, TaskRequest};
use serde::Serialize;
use serde::de::DeserializeOwned;
#[cfg(feature = "hydrate")]
use records::media::GeneratedImageUrl;

/// Message shown for transport failures.
pub const NETWORK_ERROR: &str = "Network error or server unavailable.";

/// Failure of one REST call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status, or 0 when no response arrived.
    pub status: u16,
    pub message: String,
}

impl ApiError {
    #[must_use]
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    #[must_use]
    pub fn network() -> Self {
        Self::new(0, NETWORK_ERROR)
    }

    /// The session is missing or expired.
    #[must_use]
    pub fn requires_login(&self) -> bool {
        self.status == 401
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<records::RecordsError> for ApiError {
    fn from(err: records::RecordsError) -> Self {
        Self::new(0, err.to_string())
    }
}

// =============================================================================
// PURE HELPERS
// =============================================================================

/// Pick the most useful message from an error body.
#[cfg(any(test, feature = "hydrate"))]
fn error_message(body: Option<&serde_json::Value>, fallback: &str) -> String {
    body.and_then(|b| {
        ["message", "error"]
            .iter()
            .filter_map(|key| b.get(*key).and_then(serde_json::Value::as_str))
            .map(str::trim)
            .find(|s| !s.is_empty())
            .map(ToOwned::to_owned)
    })
    .unwrap_or_else(|| fallback.to_owned())
}

#[cfg(any(test, feature = "hydrate"))]
fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

#[cfg(any(test, feature = "hydrate"))]
fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Body to deserialize from a successful reply; an empty body reads as `{}`.
#[cfg(any(test, feature = "hydrate"))]
fn success_body(body: Option<serde_json::Value>) -> serde_json::Value {
    body.unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new()))
}

// =============================================================================
// TRANSPORT
// =============================================================================

#[cfg(feature = "hydrate")]
fn authorized(builder: gloo_net::http::RequestBuilder) -> gloo_net::http::RequestBuilder {
    match crate::util::storage::load_token() {
        Some(token) => builder.header("Authorization", &bearer(&token)),
        None => builder,
    }
}

#[cfg(feature = "hydrate")]
fn transport_error(path: &str, err: &gloo_net::Error) -> ApiError {
    log::warn!("request to {path} failed: {err}");
    ApiError::network()
}

/// Status plus parsed JSON body (if any) of a finished request.
#[cfg(feature = "hydrate")]
async fn finish(path: &str, resp: gloo_net::http::Response) -> (u16, Option<serde_json::Value>) {
    let status = resp.status();
    let body = match resp.text().await {
        Ok(text) if !text.trim().is_empty() => serde_json::from_str(&text).ok(),
        Ok(_) => None,
        Err(e) => {
            log::warn!("reading {path} response failed: {e}");
            None
        }
    };
    (status, body)
}

#[cfg(feature = "hydrate")]
fn decode<T: DeserializeOwned>(
    path: &str,
    status: u16,
    body: Option<serde_json::Value>,
    fallback: &str,
) -> Result<T, ApiError> {
    if !is_success(status) {
        log::warn!("{path} returned {status}");
        return Err(ApiError::new(status, error_message(body.as_ref(), fallback)));
    }
    serde_json::from_value(success_body(body)).map_err(|e| {
        log::warn!("{path} returned unexpected body: {e}");
        ApiError::new(status, fallback)
    })
}

/// Send a request and return `(status, body)` without judging the status.
async fn exchange<B: Serialize>(
    method: &'static str,
    path: &str,
    body: Option<&B>,
) -> Result<(u16, Option<serde_json::Value>), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        use gloo_net::http::Request;

        let builder = authorized(match method {
            "POST" => Request::post(path),
            _ => Request::get(path),
        });
        let resp = match body {
            Some(body) => builder
                .json(body)
                .map_err(|e| transport_error(path, &e))?
                .send()
                .await,
            None => builder.send().await,
        }
        .map_err(|e| transport_error(path, &e))?;
        Ok(finish(path, resp).await)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (method, path, body);
        Err(ApiError::new(0, "not available on server"))
    }
}

async fn get_json<T: DeserializeOwned>(path: &str, fallback: &str) -> Result<T, ApiError> {
    let (status, body) = exchange::<()>("GET", path, None).await?;
    #[cfg(feature = "hydrate")]
    {
        decode(path, status, body, fallback)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (status, body, fallback);
        Err(ApiError::new(0, "not available on server"))
    }
}

async fn post_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B, fallback: &str) -> Result<T, ApiError> {
    let (status, reply) = exchange("POST", path, Some(body)).await?;
    #[cfg(feature = "hydrate")]
    {
        decode(path, status, reply, fallback)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (status, reply, fallback);
        Err(ApiError::new(0, "not available on server"))
    }
}

#[cfg(feature = "hydrate")]
async fn post_form<T: DeserializeOwned>(path: &str, form: web_sys::FormData, fallback: &str) -> Result<T, ApiError> {
    let resp = authorized(gloo_net::http::Request::post(path))
        .body(form)
        .map_err(|e| transport_error(path, &e))?
        .send()
        .await
        .map_err(|e| transport_error(path, &e))?;
    let (status, body) = finish(path, resp).await;
    decode(path, status, body, fallback)
}

#[cfg(feature = "hydrate")]
fn image_form(file: &web_sys::File, fields: &[(&str, &str)]) -> Result<web_sys::FormData, ApiError> {
    let form = web_sys::FormData::new().map_err(|_| ApiError::new(0, "Could not build upload form"))?;
    form.append_with_blob_and_filename("image", file, &file.name())
        .map_err(|_| ApiError::new(0, "Could not attach file"))?;
    for (name, value) in fields {
        form.append_with_str(name, value)
            .map_err(|_| ApiError::new(0, "Could not build upload form"))?;
    }
    Ok(form)
}

// =============================================================================
// AUTH
// =============================================================================

/// `POST auth/login`: returns the bearer token.
pub async fn login(request: &LoginRequest) -> Result<String, ApiError> {
    let reply: LoginReply = post_json(endpoints::LOGIN, request, "Invalid Credentials").await?;
    reply
        .token
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ApiError::new(200, "Login response did not include a token"))
}

/// `POST auth/register`. Status codes map to user-facing outcomes.
pub async fn register(request: &RegisterRequest) -> Result<RegisterOutcome, ApiError> {
    let (status, _) = exchange("POST", endpoints::REGISTER, Some(request)).await?;
    Ok(RegisterOutcome::from_status(status))
}

// =============================================================================
// LOAD TESTS
// =============================================================================

pub async fn fetch_models() -> Result<ModelCatalog, ApiError> {
    get_json(endpoints::ALL_MODELS, "Failed to fetch models").await
}

pub async fn fetch_versions(model: &str) -> Result<Vec<String>, ApiError> {
    get_json(&endpoints::all_versions(model), "Failed to fetch versions").await
}

pub async fn fetch_expected_score() -> Result<ExpectedScore, ApiError> {
    get_json(endpoints::GET_EXPECTED_SCORE, "Failed to fetch expected score").await
}

pub async fn fetch_selected_version() -> Result<SelectedVersion, ApiError> {
    get_json(endpoints::GET_SELECTED_VERSION, "Failed to fetch selected version").await
}

/// `POST start-process`. 400/409 bodies are interpreted, not raised.
pub async fn start_process(request: &StartProcessRequest) -> Result<StartOutcome, ApiError> {
    let (status, body) = exchange("POST", endpoints::START_PROCESS, Some(request)).await?;
    let reply: StartProcessReply = body
        .and_then(|b| serde_json::from_value(b).ok())
        .unwrap_or_default();
    Ok(StartOutcome::from_status(status, &reply))
}

pub async fn fetch_regression_ready() -> Result<bool, ApiError> {
    let reply: RegressionReady = get_json(endpoints::REGRESSION_READY, "Failed to check regression readiness").await?;
    Ok(reply.ready)
}

pub async fn fetch_regression_model() -> Result<RegressionModel, ApiError> {
    get_json(endpoints::REGRESSION_MODEL, "Failed to fetch regression model").await
}

/// `POST regression-test/run`: returns the backend's confirmation message.
pub async fn run_regression(request: &RegressionRunRequest) -> Result<String, ApiError> {
    let reply: MessageReply = post_json(endpoints::REGRESSION_RUN, request, "Cannot Start Regression").await?;
    Ok(reply.message.unwrap_or_else(|| "Regression Started".to_owned()))
}

// =============================================================================
// PREDICTION
// =============================================================================

pub async fn predict_url(request: &UrlPredictionRequest) -> Result<PredictionReply, ApiError> {
    post_json(endpoints::PREDICT_URL, request, "Prediction failed").await
}

/// `POST prediction/file-upload` as multipart (`image`, `model`, `version`).
#[cfg(feature = "hydrate")]
pub async fn predict_file(file: &web_sys::File, model: &str, version: &str) -> Result<PredictionReply, ApiError> {
    let form = image_form(file, &[("model", model), ("version", version)])?;
    post_form(endpoints::PREDICT_FILE, form, "Prediction failed").await
}

/// `POST generate-image-url` as multipart (`image`).
#[cfg(feature = "hydrate")]
pub async fn generate_image_url(file: &web_sys::File) -> Result<GeneratedImageUrl, ApiError> {
    let form = image_form(file, &[])?;
    post_form(endpoints::GENERATE_IMAGE_URL, form, "Error uploading image").await
}

// =============================================================================
// ANALYSIS
// =============================================================================

pub async fn fetch_chunks() -> Result<Vec<ChunkSummary>, ApiError> {
    get_json(endpoints::GET_CHUNKS, "Failed to fetch chunks").await
}

pub async fn fetch_chunk(chunk: &str, input_media_url: Option<&str>) -> Result<ChunkDetail, ApiError> {
    let path = endpoints::chunk(chunk, input_media_url)?;
    get_json(&path, "Failed to fetch chunk").await
}

/// Persist a verdict transition for one chunk record.
pub async fn change_verdict(next: Option<Verdict>, change: &VerdictChange) -> Result<serde_json::Value, ApiError> {
    post_json(verdict_endpoint(next), change, "Failed to update analysis").await
}

pub async fn validate_proof(request: &ProofValidationRequest) -> Result<serde_json::Value, ApiError> {
    post_json(endpoints::PROOF_VALIDATION, request, "Validation failed").await
}

pub async fn fetch_model_classes(model: &str) -> Result<Vec<String>, ApiError> {
    get_json(&endpoints::model_classes(model), "Failed to fetch model classes").await
}

/// Review threshold, defaulting to 0.5 when the backend omits it.
pub async fn fetch_threshold() -> Result<f64, ApiError> {
    let reply: Threshold = get_json(endpoints::GET_THRESHOLD, "Failed to fetch threshold").await?;
    Ok(reply.value())
}

pub async fn fetch_analysts() -> Result<Vec<String>, ApiError> {
    get_json(endpoints::GET_ANALYSTS, "Failed to fetch analysts").await
}

pub async fn assign_analyst(request: &AssignAnalystRequest) -> Result<serde_json::Value, ApiError> {
    post_json(endpoints::SET_ANALYST, request, "Failed to assign analyst").await
}

pub async fn fetch_can_merge() -> Result<bool, ApiError> {
    let reply: CanMerge = get_json(endpoints::CAN_MERGE, "Failed to check merge status").await?;
    Ok(reply.can_merge)
}

/// `GET merge`: success only when the backend reports `"merge successful"`.
pub async fn merge() -> Result<String, ApiError> {
    let (status, body) = exchange::<()>("GET", endpoints::MERGE, None).await?;
    let reply: MergeResponse = body
        .and_then(|b| serde_json::from_value(b).ok())
        .unwrap_or_default();
    if reply.is_success() {
        Ok(reply.message.unwrap_or_default())
    } else {
        Err(ApiError::new(status, reply.failure_message()))
    }
}

pub async fn fetch_selected_model() -> Result<SelectedModel, ApiError> {
    get_json(endpoints::GET_SELECTED_MODEL, "Failed to fetch selected model").await
}

// =============================================================================
// TASKS
// =============================================================================

pub async fn start_task(request: &TaskRequest) -> Result<TaskReply, ApiError> {
    post_json(endpoints::START_TASK, request, "Failed to start task").await
}
