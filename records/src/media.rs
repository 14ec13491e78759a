//! Media upload checks and prediction payloads.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::RecordsError;

/// Image extensions accepted by the prediction and image-URL endpoints.
pub const ALLOWED_IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "webp", "gif"];

/// Largest image the UI will upload.
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

fn extension(name: &str) -> Option<String> {
    let (_, ext) = name.rsplit_once('.')?;
    Some(ext.to_ascii_lowercase())
}

/// Check an image's extension and size before upload.
///
/// # Errors
///
/// Returns [`RecordsError::DisallowedExtension`] or
/// [`RecordsError::FileTooLarge`].
pub fn validate_image(name: &str, size: u64) -> Result<(), RecordsError> {
    let allowed = extension(name).is_some_and(|ext| ALLOWED_IMAGE_EXTENSIONS.contains(&ext.as_str()));
    if !allowed {
        return Err(RecordsError::DisallowedExtension {
            allowed: ALLOWED_IMAGE_EXTENSIONS.join(", "),
        });
    }
    if size > MAX_IMAGE_BYTES {
        return Err(RecordsError::FileTooLarge { max_mb: MAX_IMAGE_BYTES / (1024 * 1024) });
    }
    Ok(())
}

/// # Errors
///
/// Returns [`RecordsError::DisallowedExtension`] unless the name ends in `.csv`.
pub fn validate_csv_name(name: &str) -> Result<(), RecordsError> {
    if extension(name).as_deref() == Some("csv") {
        Ok(())
    } else {
        Err(RecordsError::DisallowedExtension { allowed: "CSV".to_owned() })
    }
}

/// Body for `prediction/url-upload`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlPredictionRequest {
    pub model: String,
    pub version: String,
    #[serde(rename = "inputMediaUrl")]
    pub input_media_url: String,
}

impl UrlPredictionRequest {
    /// # Errors
    ///
    /// Returns [`RecordsError::Form`] when any field is blank.
    pub fn build(model: Option<&str>, version: Option<&str>, url: &str) -> Result<Self, RecordsError> {
        let (Some(model), Some(version)) = (
            model.map(str::trim).filter(|m| !m.is_empty()),
            version.map(str::trim).filter(|v| !v.is_empty()),
        ) else {
            return Err(RecordsError::Form("Please select a model and version."));
        };
        let url = url.trim();
        if url.is_empty() {
            return Err(RecordsError::Form("Please enter an image URL."));
        }
        Ok(Self {
            model: model.to_owned(),
            version: version.to_owned(),
            input_media_url: url.to_owned(),
        })
    }
}

/// Prediction reply from either upload endpoint. The payload shape is
/// model-specific, so it is kept as raw JSON.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionReply {
    #[serde(default)]
    pub predictions: Value,
}

/// `generate-image-url` reply.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedImageUrl {
    #[serde(default)]
    pub url: Option<String>,
}

/// Flatten `{label: score}` into pairs sorted by descending score. Scores
/// that are not numbers (or numeric strings) are skipped.
#[must_use]
pub fn ranked_predictions(value: &Value) -> Vec<(String, f64)> {
    let Value::Object(map) = value else {
        return Vec::new();
    };
    let mut ranked: Vec<(String, f64)> = map
        .iter()
        .filter_map(|(label, score)| {
            let score = match score {
                Value::Number(n) => n.as_f64(),
                Value::String(s) => s.trim().parse().ok(),
                _ => None,
            }?;
            Some((label.clone(), score))
        })
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked
}

#[cfg(test)]
#[path = "media_test.rs"]
mod tests;
