//! Prediction records, analyst verdicts, and chunk review payloads.
//!
//! DESIGN
//! ======
//! A record keeps the backend's column names on the wire (`"Predicted
//! Classes"`, `"inputMediaUrl"`, ...) and exposes them as typed fields.
//! Columns this crate does not know about ride along in `extra` so nothing
//! is dropped between load and export.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::{RecordsError, de, endpoints};

// =============================================================================
// VERDICT
// =============================================================================

/// Analyst judgment on one record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Verdict {
    Bug,
    NotBug,
    Outlier,
}

impl Verdict {
    /// Button order on the analysis card.
    pub const ALL: [Self; 3] = [Self::Bug, Self::NotBug, Self::Outlier];

    /// Wire and display label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Bug => "Bug",
            Self::NotBug => "Not Bug",
            Self::Outlier => "Outlier",
        }
    }

    /// Parse a wire label. Unknown or blank labels are treated as unset.
    #[must_use]
    pub fn from_label(raw: &str) -> Option<Self> {
        match raw.trim() {
            "Bug" => Some(Self::Bug),
            "Not Bug" => Some(Self::NotBug),
            "Outlier" => Some(Self::Outlier),
            _ => None,
        }
    }

    /// Clicking the active verdict clears it; clicking another selects it.
    #[must_use]
    pub fn toggle(current: Option<Self>, clicked: Self) -> Option<Self> {
        if current == Some(clicked) { None } else { Some(clicked) }
    }
}

/// Endpoint that persists a verdict transition for a chunk record.
///
/// Bug is not stored directly: the backend only records it through proof
/// validation, so moving to Bug first clears any earlier verdict.
#[must_use]
pub fn verdict_endpoint(next: Option<Verdict>) -> &'static str {
    match next {
        None | Some(Verdict::Bug) => endpoints::UNSET_ANALYSIS,
        Some(Verdict::NotBug) => endpoints::SET_NOT_BUG,
        Some(Verdict::Outlier) => endpoints::SET_OUTLIER,
    }
}

fn serialize_verdict<S>(verdict: &Option<Verdict>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(verdict.map_or("", Verdict::label))
}

fn deserialize_verdict<'de, D>(deserializer: D) -> Result<Option<Verdict>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = de::text(deserializer)?;
    Ok(Verdict::from_label(&raw))
}

// =============================================================================
// RECORD
// =============================================================================

/// Source columns, in export order.
pub const SOURCE_COLUMNS: [&str; 5] = [
    "inputMediaUrl",
    "Result",
    "Projection Layer",
    "Detection Layer",
    "Predicted Classes",
];

/// Review columns appended by analysts, in export order.
pub const REVIEW_COLUMNS: [&str; 5] = [
    "Analysis",
    "ExpectedClasses",
    "ExpectedScore",
    "ReproducedUrls",
    "AnalysedBy",
];

/// One prediction record plus the analyst's review state.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    #[serde(rename = "inputMediaUrl", default, deserialize_with = "de::text")]
    pub input_media_url: String,
    #[serde(rename = "Result", default, deserialize_with = "de::text")]
    pub result: String,
    #[serde(rename = "Projection Layer", default, deserialize_with = "de::text")]
    pub projection_layer: String,
    #[serde(rename = "Detection Layer", default, deserialize_with = "de::text")]
    pub detection_layer: String,
    #[serde(rename = "Predicted Classes", default, deserialize_with = "de::text")]
    pub predicted_classes: String,
    #[serde(
        rename = "Analysis",
        default,
        serialize_with = "serialize_verdict",
        deserialize_with = "deserialize_verdict"
    )]
    pub analysis: Option<Verdict>,
    #[serde(rename = "ExpectedClasses", default, deserialize_with = "de::list")]
    pub expected_classes: Vec<String>,
    #[serde(rename = "ExpectedScore", default, deserialize_with = "de::text")]
    pub expected_score: String,
    #[serde(rename = "ReproducedUrls", default, deserialize_with = "de::list")]
    pub reproduced_urls: Vec<String>,
    #[serde(rename = "AnalysedBy", default, deserialize_with = "de::text")]
    pub analysed_by: String,
    /// Any other columns, in first-seen order.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl AnalysisRecord {
    /// Assign a source column by name. Review columns are ignored so that a
    /// freshly imported record always starts unreviewed.
    pub fn set_column(&mut self, name: &str, value: String) {
        match name {
            "inputMediaUrl" => self.input_media_url = value,
            "Result" => self.result = value,
            "Projection Layer" => self.projection_layer = value,
            "Detection Layer" => self.detection_layer = value,
            "Predicted Classes" => self.predicted_classes = value,
            n if REVIEW_COLUMNS.contains(&n) => {}
            other => {
                self.extra.insert(other.to_owned(), Value::String(value));
            }
        }
    }

    /// Text of a column for export or display.
    #[must_use]
    pub fn column(&self, name: &str) -> String {
        match name {
            "inputMediaUrl" => self.input_media_url.clone(),
            "Result" => self.result.clone(),
            "Projection Layer" => self.projection_layer.clone(),
            "Detection Layer" => self.detection_layer.clone(),
            "Predicted Classes" => self.predicted_classes.clone(),
            "Analysis" => self.analysis.map_or_else(String::new, |v| v.label().to_owned()),
            "ExpectedClasses" => self.expected_classes.join(","),
            "ExpectedScore" => self.expected_score.clone(),
            "ReproducedUrls" => self.reproduced_urls.join(","),
            "AnalysedBy" => self.analysed_by.clone(),
            other => self.extra.get(other).map(de::value_to_text).unwrap_or_default(),
        }
    }

    /// Drop all analyst input, leaving the prediction columns untouched.
    pub fn reset_review(&mut self) {
        self.analysis = None;
        self.expected_classes.clear();
        self.expected_score.clear();
        self.reproduced_urls.clear();
        self.analysed_by.clear();
    }

    /// Apply a verdict. Leaving Bug discards the bug-only fields.
    pub fn set_verdict(&mut self, verdict: Option<Verdict>) {
        if verdict != Some(Verdict::Bug) {
            self.expected_classes.clear();
            self.reproduced_urls.clear();
        }
        self.analysis = verdict;
    }

    /// Ranked predicted class scores for this record.
    #[must_use]
    pub fn class_scores(&self) -> Vec<ClassScore> {
        parse_predicted_classes(&self.predicted_classes)
    }
}

// =============================================================================
// PREDICTED CLASSES
// =============================================================================

/// One predicted label with its score.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassScore {
    pub label: String,
    pub score: f64,
}

impl ClassScore {
    /// Whether the score meets the review threshold.
    #[must_use]
    pub fn exceeds(&self, threshold: f64) -> bool {
        self.score >= threshold
    }
}

/// Parse the backend's predicted-classes text into scores sorted descending.
///
/// The backend writes Python dict literals (`{'cat': 0.91}`); single quotes
/// are swapped for double quotes before JSON parsing. Text that still does
/// not parse yields an empty list.
#[must_use]
pub fn parse_predicted_classes(raw: &str) -> Vec<ClassScore> {
    let normalized = raw.trim().replace('\'', "\"");
    if normalized.is_empty() {
        return Vec::new();
    }
    let Ok(map) = serde_json::from_str::<serde_json::Map<String, Value>>(&normalized) else {
        return Vec::new();
    };
    let mut scores: Vec<ClassScore> = map
        .into_iter()
        .filter_map(|(label, value)| {
            let score = match value {
                Value::Number(n) => n.as_f64(),
                Value::String(s) => s.trim().parse::<f64>().ok(),
                _ => None,
            }?;
            Some(ClassScore { label, score })
        })
        .collect();
    scores.sort_by(|a, b| b.score.total_cmp(&a.score));
    scores
}

// =============================================================================
// CHUNKS
// =============================================================================

/// Chunk list entry from `get-chunks`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChunkSummary {
    #[serde(deserialize_with = "de::text")]
    pub file: String,
    #[serde(default, deserialize_with = "de::text")]
    pub analyst: String,
    #[serde(default, deserialize_with = "de::text")]
    pub status: String,
}

/// Chunk body from `get-chunk/{chunk}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChunkDetail {
    #[serde(default)]
    pub data: Vec<AnalysisRecord>,
    #[serde(default, deserialize_with = "de::optional_text")]
    pub model: Option<String>,
}

/// Body for unset-analysis / set-notbug / set-outlier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VerdictChange {
    pub chunk: String,
    #[serde(rename = "inputMediaUrl")]
    pub input_media_url: String,
}

/// Body for `set-analyst`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssignAnalystRequest {
    pub analyst: String,
    pub chunk: String,
}

/// Body for `proof-validation`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProofValidationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunk: Option<String>,
    #[serde(rename = "imageURL")]
    pub image_url: String,
    #[serde(rename = "expectedClasses")]
    pub expected_classes: Vec<String>,
    #[serde(rename = "reproducedUrls")]
    pub reproduced_urls: Vec<String>,
    #[serde(rename = "analysedBy", skip_serializing_if = "String::is_empty", default)]
    pub analysed_by: String,
}

impl ProofValidationRequest {
    /// Build a validation request from a Bug-tagged record.
    ///
    /// # Errors
    ///
    /// Returns [`RecordsError::Form`] when the record is not tagged Bug or
    /// has no expected classes selected.
    pub fn from_record(chunk: Option<&str>, record: &AnalysisRecord) -> Result<Self, RecordsError> {
        if record.analysis != Some(Verdict::Bug) {
            return Err(RecordsError::Form("Only records tagged Bug can be validated."));
        }
        if record.expected_classes.is_empty() {
            return Err(RecordsError::Form("Select at least one expected class."));
        }
        Ok(Self {
            chunk: chunk.map(ToOwned::to_owned),
            image_url: record.input_media_url.clone(),
            expected_classes: record.expected_classes.clone(),
            reproduced_urls: record
                .reproduced_urls
                .iter()
                .map(|u| u.trim().to_owned())
                .filter(|u| !u.is_empty())
                .collect(),
            analysed_by: record.analysed_by.clone(),
        })
    }
}

/// `can-merge` reply.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanMerge {
    #[serde(rename = "can-merge", default, deserialize_with = "de::flag")]
    pub can_merge: bool,
}

/// Message the backend sends on a completed merge.
pub const MERGE_SUCCESS: &str = "merge successful";

/// `merge` reply.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl MergeResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.message.as_deref() == Some(MERGE_SUCCESS)
    }

    #[must_use]
    pub fn failure_message(&self) -> String {
        self.error.clone().unwrap_or_else(|| "Cannot Merge".to_owned())
    }
}

/// Review threshold used to highlight predicted classes.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// `get-threshold` reply. Missing, blank, or zero thresholds fall back to 0.5.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    #[serde(default, deserialize_with = "de::optional_f64")]
    pub threshold: Option<f64>,
}

impl Threshold {
    #[must_use]
    pub fn value(self) -> f64 {
        self.threshold.filter(|t| *t > 0.0).unwrap_or(DEFAULT_THRESHOLD)
    }
}

/// `get-selected-model` reply.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedModel {
    #[serde(default, deserialize_with = "de::optional_text")]
    pub model: Option<String>,
}

#[cfg(test)]
#[path = "analysis_test.rs"]
mod tests;
