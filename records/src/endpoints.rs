//! REST paths exposed by the model-testing backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! Paths are relative to the backend root. The browser reaches them through
//! the host's `/utilities` proxy; the CLI may target either the host or the
//! backend directly.

use url::form_urlencoded;

use crate::RecordsError;

pub const LOGIN: &str = "/utilities/auth/login";
pub const REGISTER: &str = "/utilities/auth/register";

pub const ALL_MODELS: &str = "/utilities/dynamic-test/all-models";
pub const START_PROCESS: &str = "/utilities/dynamic-test/start-process";
pub const GET_EXPECTED_SCORE: &str = "/utilities/dynamic-test/get-expected-score";
pub const GET_SELECTED_VERSION: &str = "/utilities/dynamic-test/get-selected-version";

pub const REGRESSION_READY: &str = "/utilities/regression-test/get-regression-ready";
pub const REGRESSION_MODEL: &str = "/utilities/regression-test/get-regression-model";
pub const REGRESSION_RUN: &str = "/utilities/regression-test/run";

pub const PREDICT_URL: &str = "/utilities/prediction/url-upload";
pub const PREDICT_FILE: &str = "/utilities/prediction/file-upload";
pub const GENERATE_IMAGE_URL: &str = "/utilities/generate-image-url";

pub const GET_CHUNKS: &str = "/utilities/analysis/get-chunks";
pub const UNSET_ANALYSIS: &str = "/utilities/analysis/unset-analysis";
pub const SET_NOT_BUG: &str = "/utilities/analysis/set-notbug";
pub const SET_OUTLIER: &str = "/utilities/analysis/set-outlier";
pub const PROOF_VALIDATION: &str = "/utilities/analysis/proof-validation";
pub const GET_THRESHOLD: &str = "/utilities/analysis/get-threshold";
pub const GET_ANALYSTS: &str = "/utilities/analysis/get-analysts";
pub const SET_ANALYST: &str = "/utilities/analysis/set-analyst";
pub const CAN_MERGE: &str = "/utilities/analysis/can-merge";
pub const MERGE: &str = "/utilities/analysis/merge";
pub const GET_SELECTED_MODEL: &str = "/utilities/analysis/get-selected-model";

pub const START_TASK: &str = "/utilities/task/start";

/// `GET /utilities/dynamic-test/all-versions/{model}`.
#[must_use]
pub fn all_versions(model: &str) -> String {
    format!("/utilities/dynamic-test/all-versions/{}", encode_segment(model))
}

/// `GET /utilities/analysis/get-model-classes/{model}`; the backend keys
/// class lists by lowercase model name.
#[must_use]
pub fn model_classes(model: &str) -> String {
    format!(
        "/utilities/analysis/get-model-classes/{}",
        encode_segment(&model.to_lowercase())
    )
}

/// `GET /utilities/analysis/get-chunk/{chunk}` with an optional
/// `inputMediaUrl` filter narrowing the response to one record.
///
/// # Errors
///
/// Returns [`RecordsError::MissingChunk`] when `chunk` is blank.
pub fn chunk(chunk: &str, input_media_url: Option<&str>) -> Result<String, RecordsError> {
    let chunk = chunk.trim();
    if chunk.is_empty() {
        return Err(RecordsError::MissingChunk);
    }
    let base = format!("/utilities/analysis/get-chunk/{}", encode_segment(chunk));
    match input_media_url.map(str::trim).filter(|u| !u.is_empty()) {
        Some(url) => {
            let query = form_urlencoded::Serializer::new(String::new())
                .append_pair("inputMediaUrl", url)
                .finish();
            Ok(format!("{base}?{query}"))
        }
        None => Ok(base),
    }
}

/// Percent-encode one path segment. Form encoding writes spaces as `+`,
/// which is only meaningful in queries, so those become `%20`.
#[must_use]
pub fn encode_segment(segment: &str) -> String {
    form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

#[cfg(test)]
#[path = "endpoints_test.rs"]
mod tests;
