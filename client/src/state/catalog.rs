//! Model/version selection shared by the run, test, and task pages.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use records::runs::ModelCatalog;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CatalogState {
    pub catalog: ModelCatalog,
    pub models: Vec<String>,
    pub versions: Vec<String>,
    pub model: Option<String>,
    pub version: Option<String>,
    pub loading_versions: bool,
    /// Set by the first model selection, manual or preferred.
    pub selection_made: bool,
}

impl CatalogState {
    pub fn set_catalog(&mut self, catalog: ModelCatalog) {
        self.models = catalog.names();
        self.catalog = catalog;
    }

    /// Whether `preferred` should be auto-selected: it is listed and no model
    /// has been chosen yet, including one chosen and then cleared.
    pub fn wants_preferred(&self, preferred: &str) -> bool {
        !self.selection_made && self.model.is_none() && self.models.iter().any(|m| m == preferred)
    }

    /// Change the selected model. The version always resets. Returns `true`
    /// when versions must be fetched from the backend.
    pub fn select_model(&mut self, model: Option<String>) -> bool {
        let model = model.filter(|m| !m.trim().is_empty());
        self.version = None;
        self.versions.clear();
        self.loading_versions = false;
        self.model = model;
        self.selection_made = true;

        let Some(model) = self.model.as_deref() else {
            return false;
        };
        if let Some(embedded) = self.catalog.embedded_versions(model) {
            self.versions = embedded;
            return false;
        }
        self.loading_versions = true;
        true
    }

    /// Apply fetched versions unless the user has since picked another model.
    pub fn set_versions(&mut self, for_model: &str, versions: Vec<String>) {
        if self.model.as_deref() != Some(for_model) {
            return;
        }
        self.versions = versions;
        self.loading_versions = false;
    }

    pub fn version_fetch_failed(&mut self, for_model: &str) {
        if self.model.as_deref() == Some(for_model) {
            self.loading_versions = false;
        }
    }

    pub fn select_version(&mut self, version: Option<String>) {
        self.version = version.filter(|v| self.versions.contains(v));
    }

    /// Both halves of the selection, if complete.
    pub fn selection(&self) -> Option<(String, String)> {
        Some((self.model.clone()?, self.version.clone()?))
    }
}
