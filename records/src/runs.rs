//! Fresh-load and regression test payloads.
//!
//! SYSTEM CONTEXT
//! ==============
//! The backend owns scheduling. The UI only needs to pick a model/version,
//! collect notification recipients, and interpret the start reply.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::{RecordsError, de};

/// `all-models` reply. Older backends send a name list, newer ones a
/// name → versions map.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModelCatalog {
    Names(Vec<String>),
    WithVersions(IndexMap<String, Vec<String>>),
}

impl Default for ModelCatalog {
    fn default() -> Self {
        Self::Names(Vec::new())
    }
}

impl ModelCatalog {
    /// Model names in backend order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        match self {
            Self::Names(names) => names.clone(),
            Self::WithVersions(map) => map.keys().cloned().collect(),
        }
    }

    /// Versions embedded in the catalog, if the backend sent them.
    #[must_use]
    pub fn embedded_versions(&self, model: &str) -> Option<Vec<String>> {
        match self {
            Self::Names(_) => None,
            Self::WithVersions(map) => map.get(model).cloned(),
        }
    }
}

/// Default expected score when the backend does not provide one.
pub const DEFAULT_EXPECTED_SCORE: &str = "0.5";

/// `get-expected-score` reply.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedScore {
    #[serde(rename = "expected-score", default, deserialize_with = "de::optional_text")]
    pub expected_score: Option<String>,
}

impl ExpectedScore {
    #[must_use]
    pub fn or_default(&self) -> String {
        self.expected_score
            .clone()
            .unwrap_or_else(|| DEFAULT_EXPECTED_SCORE.to_owned())
    }
}

/// Parse and range-check an expected score (`0 < score <= 1`).
///
/// # Errors
///
/// Returns [`RecordsError::InvalidScore`] for non-numeric text and
/// [`RecordsError::ScoreOutOfRange`] outside the half-open unit interval.
pub fn parse_expected_score(raw: &str) -> Result<f64, RecordsError> {
    let score: f64 = raw
        .trim()
        .parse()
        .map_err(|_| RecordsError::InvalidScore(raw.to_owned()))?;
    if !(score > 0.0 && score <= 1.0) {
        return Err(RecordsError::ScoreOutOfRange(score));
    }
    Ok(score)
}

/// Trim, drop blanks, and de-duplicate recipients preserving entry order.
#[must_use]
pub fn normalize_recipients(recipients: &[String]) -> Vec<String> {
    recipients
        .iter()
        .map(|r| r.trim().to_owned())
        .filter(|r| !r.is_empty())
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}

/// Body for `start-process`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StartProcessRequest {
    pub version: String,
    pub model: String,
    pub recipients: Vec<String>,
    #[serde(rename = "expectedScore")]
    pub expected_score: String,
}

impl StartProcessRequest {
    /// Validate form input and build the request.
    ///
    /// # Errors
    ///
    /// Returns [`RecordsError::Form`] when model or version is missing and a
    /// score error when the expected score is invalid.
    pub fn build(
        model: Option<&str>,
        version: Option<&str>,
        recipients: &[String],
        expected_score: &str,
    ) -> Result<Self, RecordsError> {
        let (Some(model), Some(version)) = (non_blank(model), non_blank(version)) else {
            return Err(RecordsError::Form("Please select a model and version."));
        };
        parse_expected_score(expected_score)?;
        Ok(Self {
            version: version.to_owned(),
            model: model.to_owned(),
            recipients: normalize_recipients(recipients),
            expected_score: expected_score.trim().to_owned(),
        })
    }
}

/// `start-process` reply body (success or 400 rejection).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartProcessReply {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Vec<String>,
}

/// How the UI should react to a `start-process` response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StartOutcome {
    Started(String),
    LoginRequired,
    Rejected(Vec<String>),
    Failed(String),
}

impl StartOutcome {
    #[must_use]
    pub fn from_status(status: u16, reply: &StartProcessReply) -> Self {
        match status {
            200 | 202 => Self::Started(
                reply
                    .message
                    .clone()
                    .unwrap_or_else(|| "Process Started".to_owned()),
            ),
            401 | 409 => Self::LoginRequired,
            400 => {
                let mut messages: Vec<String> = reply.message.iter().cloned().collect();
                messages.extend(reply.errors.iter().cloned());
                if messages.is_empty() {
                    messages.push("Request rejected".to_owned());
                }
                Self::Rejected(messages)
            }
            _ => Self::Failed("Cannot Start Process".to_owned()),
        }
    }
}

/// `get-selected-version` reply: the version currently under fresh-load
/// test, which is excluded from regression candidates.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedVersion {
    #[serde(default, deserialize_with = "de::optional_text")]
    pub version: Option<String>,
}

/// `get-regression-ready` reply.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegressionReady {
    #[serde(rename = "regression-ready", default, deserialize_with = "de::flag")]
    pub ready: bool,
}

/// `get-regression-model` reply.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegressionModel {
    #[serde(default, deserialize_with = "de::optional_text")]
    pub model: Option<String>,
}

/// Body for `regression-test/run`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegressionRunRequest {
    pub model: String,
    pub version: String,
}

impl RegressionRunRequest {
    /// # Errors
    ///
    /// Returns [`RecordsError::Form`] when model or version is missing.
    pub fn build(model: Option<&str>, version: Option<&str>) -> Result<Self, RecordsError> {
        match (non_blank(model), non_blank(version)) {
            (Some(model), Some(version)) => Ok(Self { model: model.to_owned(), version: version.to_owned() }),
            _ => Err(RecordsError::Form("Please select a model and version.")),
        }
    }
}

/// Regression candidates: de-duplicated in backend order, minus the
/// version already selected for the fresh-load run.
#[must_use]
pub fn regression_versions(all: &[String], excluded: Option<&str>) -> Vec<String> {
    all.iter()
        .filter(|v| Some(v.as_str()) != excluded)
        .cloned()
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}

/// Generic `{message}` / `{error}` reply used by run endpoints.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageReply {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
#[path = "runs_test.rs"]
mod tests;
