//! Collector task form.

#[cfg(test)]
#[path = "task_test.rs"]
mod task_test;

use records::RecordsError;
use records::task::{DEFAULT_AGENTS, TaskDraft, TaskReply, TaskRequest, clamp_split, push_draft, reconcile_classes};

/// Tabs on the right-hand side of the split view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TaskTab {
    #[default]
    Collectors,
    Tester,
    Reproducers,
}

impl TaskTab {
    pub const ALL: [Self; 3] = [Self::Collectors, Self::Tester, Self::Reproducers];

    pub fn label(self) -> &'static str {
        match self {
            Self::Collectors => "Collectors",
            Self::Tester => "Tester",
            Self::Reproducers => "Reproducers",
        }
    }
}

#[derive(Clone, Debug)]
pub struct TaskState {
    pub draft: TaskDraft,
    pub agents: Vec<String>,
    /// Classes offered for the selected model.
    pub available_classes: Vec<String>,
    pub loading_classes: bool,
    /// Left pane width in percent.
    pub split: f64,
    pub tab: TaskTab,
    pub reply: Option<TaskReply>,
    pub submitting: bool,
}

impl Default for TaskState {
    fn default() -> Self {
        Self {
            draft: TaskDraft { agent_id: DEFAULT_AGENTS[0].to_owned(), ..TaskDraft::default() },
            agents: DEFAULT_AGENTS.iter().map(|a| (*a).to_owned()).collect(),
            available_classes: Vec::new(),
            loading_classes: false,
            split: 50.0,
            tab: TaskTab::default(),
            reply: None,
            submitting: false,
        }
    }
}

/// Which list a prompt/URL edit targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DraftList {
    Prompts,
    Urls,
}

impl TaskState {
    /// Forget classes when the model or version changes.
    pub fn reset_classes(&mut self) {
        self.available_classes.clear();
        self.draft.classes.clear();
        self.loading_classes = false;
    }

    pub fn set_selected_classes(&mut self, selected: &[String]) {
        self.draft.classes = reconcile_classes(&self.draft.classes, selected);
    }

    pub fn toggle_class(&mut self, class: &str) {
        let mut selected: Vec<String> = self.draft.classes.keys().cloned().collect();
        if let Some(pos) = selected.iter().position(|c| c == class) {
            selected.remove(pos);
        } else {
            selected.push(class.to_owned());
        }
        self.set_selected_classes(&selected);
    }

    pub fn set_lower(&mut self, class: &str, value: f64) {
        if let Some(limits) = self.draft.classes.get_mut(class) {
            limits.set_lower(value);
        }
    }

    pub fn set_upper(&mut self, class: &str, value: f64) {
        if let Some(limits) = self.draft.classes.get_mut(class) {
            limits.set_upper(value);
        }
    }

    fn list_mut(&mut self, list: DraftList) -> &mut Vec<String> {
        match list {
            DraftList::Prompts => &mut self.draft.prompts,
            DraftList::Urls => &mut self.draft.urls,
        }
    }

    pub fn add_entry(&mut self, list: DraftList) {
        push_draft(self.list_mut(list));
    }

    pub fn update_entry(&mut self, list: DraftList, index: usize, value: String) {
        if let Some(entry) = self.list_mut(list).get_mut(index) {
            *entry = value;
        }
    }

    pub fn remove_entry(&mut self, list: DraftList, index: usize) {
        let entries = self.list_mut(list);
        if index < entries.len() {
            entries.remove(index);
        }
    }

    pub fn set_split(&mut self, percent: f64) {
        self.split = clamp_split(percent);
    }

    /// Request for the current draft with the picker's model and version.
    ///
    /// # Errors
    ///
    /// Returns the draft validation error from [`TaskRequest::build`].
    pub fn request(&self, model: Option<String>, version: Option<String>) -> Result<TaskRequest, RecordsError> {
        let draft = TaskDraft { model, version, ..self.draft.clone() };
        TaskRequest::build(&draft)
    }
}

/// Parse an optional non-negative size field.
pub fn parse_size(raw: &str) -> Option<u64> {
    raw.trim().parse().ok()
}
