//! Collector task submission.
//!
//! A task asks the collector agents to gather media for a model version:
//! per-class score windows, size limits, optional prompts and seed URLs.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{RecordsError, de};

/// Agents offered by the task form.
pub const DEFAULT_AGENTS: [&str; 4] = ["1001GEC", "1002YOR", "1003BEC", "1004BGT"];

pub const DEFAULT_LOWER_LIMIT: f64 = 0.5;
pub const DEFAULT_UPPER_LIMIT: f64 = 1.0;

/// Score window for one class. Invariant: `0 <= lower <= upper <= 1`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClassLimits {
    lower: f64,
    upper: f64,
}

impl Default for ClassLimits {
    fn default() -> Self {
        Self { lower: DEFAULT_LOWER_LIMIT, upper: DEFAULT_UPPER_LIMIT }
    }
}

impl ClassLimits {
    #[must_use]
    pub fn lower(self) -> f64 {
        self.lower
    }

    #[must_use]
    pub fn upper(self) -> f64 {
        self.upper
    }

    /// Set the lower bound, clamped into `[0, upper]`. NaN is ignored.
    pub fn set_lower(&mut self, value: f64) {
        if !value.is_nan() {
            self.lower = value.clamp(0.0, self.upper);
        }
    }

    /// Set the upper bound, clamped into `[lower, 1]`. NaN is ignored.
    pub fn set_upper(&mut self, value: f64) {
        if !value.is_nan() {
            self.upper = value.clamp(self.lower, 1.0);
        }
    }
}

/// Carry limits over to a new class selection: kept classes retain their
/// window, new ones get the default, deselected ones are dropped. Output
/// follows `selected` order.
#[must_use]
pub fn reconcile_classes(
    current: &IndexMap<String, ClassLimits>,
    selected: &[String],
) -> IndexMap<String, ClassLimits> {
    selected
        .iter()
        .map(|class| (class.clone(), current.get(class).copied().unwrap_or_default()))
        .collect()
}

/// Append an empty draft entry unless one is already pending.
pub fn push_draft(entries: &mut Vec<String>) {
    if !entries.iter().any(String::is_empty) {
        entries.push(String::new());
    }
}

/// Keep the resizable split between 10% and 90%.
#[must_use]
pub fn clamp_split(percent: f64) -> f64 {
    if percent.is_nan() {
        return 50.0;
    }
    percent.clamp(10.0, 90.0)
}

/// Body for `task/start`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskRequest {
    pub model: String,
    pub version: String,
    pub folder_name: String,
    pub maxsize: Option<u64>,
    pub minsize: Option<u64>,
    pub size: Option<u64>,
    /// `{class: [lower, upper]}`
    pub class_type: IndexMap<String, (f64, f64)>,
    pub prompt: Vec<String>,
    pub url: Vec<String>,
    pub submitter_email: String,
    pub submitter_phone_number: String,
    pub agent_id: String,
}

/// Raw form input for [`TaskRequest::build`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TaskDraft {
    pub model: Option<String>,
    pub version: Option<String>,
    pub folder_name: String,
    pub maxsize: Option<u64>,
    pub minsize: Option<u64>,
    pub size: Option<u64>,
    pub classes: IndexMap<String, ClassLimits>,
    pub prompts: Vec<String>,
    pub urls: Vec<String>,
    pub submitter_email: String,
    pub submitter_phone_number: String,
    pub agent_id: String,
}

impl TaskRequest {
    /// Build the request from a draft, dropping blank prompts and URLs.
    ///
    /// # Errors
    ///
    /// Returns [`RecordsError::Form`] when model, version, or agent is missing,
    /// or when `minsize` exceeds `maxsize`.
    pub fn build(draft: &TaskDraft) -> Result<Self, RecordsError> {
        let model = draft.model.as_deref().map(str::trim).unwrap_or_default();
        let version = draft.version.as_deref().map(str::trim).unwrap_or_default();
        if model.is_empty() || version.is_empty() {
            return Err(RecordsError::Form("Please select a model and version."));
        }
        if draft.agent_id.trim().is_empty() {
            return Err(RecordsError::Form("Please select an agent."));
        }
        if let (Some(min), Some(max)) = (draft.minsize, draft.maxsize) {
            if min > max {
                return Err(RecordsError::Form("Min size must not exceed max size."));
            }
        }
        let non_blank = |items: &[String]| -> Vec<String> {
            items
                .iter()
                .map(|s| s.trim().to_owned())
                .filter(|s| !s.is_empty())
                .collect()
        };
        Ok(Self {
            model: model.to_owned(),
            version: version.to_owned(),
            folder_name: draft.folder_name.trim().to_owned(),
            maxsize: draft.maxsize,
            minsize: draft.minsize,
            size: draft.size,
            class_type: draft
                .classes
                .iter()
                .map(|(class, limits)| (class.clone(), (limits.lower, limits.upper)))
                .collect(),
            prompt: non_blank(&draft.prompts),
            url: non_blank(&draft.urls),
            submitter_email: draft.submitter_email.trim().to_owned(),
            submitter_phone_number: draft.submitter_phone_number.trim().to_owned(),
            agent_id: draft.agent_id.trim().to_owned(),
        })
    }
}

/// Task as echoed back by the backend.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    #[serde(rename = "_id", default, deserialize_with = "de::text")]
    pub id: String,
    #[serde(default, deserialize_with = "de::text")]
    pub agent_id: String,
    #[serde(default)]
    pub class_type: IndexMap<String, serde_json::Value>,
    #[serde(default, deserialize_with = "de::text")]
    pub folder_name: String,
    #[serde(default, deserialize_with = "de::text")]
    pub maxsize: String,
    #[serde(default, deserialize_with = "de::text")]
    pub minsize: String,
    #[serde(default, deserialize_with = "de::text")]
    pub model: String,
    #[serde(default, deserialize_with = "de::text")]
    pub progress: String,
    #[serde(default, deserialize_with = "de::list")]
    pub prompt: Vec<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub size: String,
    #[serde(default, deserialize_with = "de::text")]
    pub status: String,
    #[serde(default, deserialize_with = "de::text")]
    pub submitter_email: String,
    #[serde(default, deserialize_with = "de::text")]
    pub submitter_phone_number: String,
    #[serde(default, deserialize_with = "de::list")]
    pub url: Vec<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub version: String,
}

impl TaskRecord {
    /// CSS modifier for the status badge.
    #[must_use]
    pub fn status_class(&self) -> String {
        self.status.trim().to_ascii_lowercase().replace(' ', "-")
    }
}

/// `task/start` reply.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskReply {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub task: Option<TaskRecord>,
}

#[cfg(test)]
#[path = "task_test.rs"]
mod tests;
