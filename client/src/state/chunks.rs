//! Chunk inventory for the verification page.

#[cfg(test)]
#[path = "chunks_test.rs"]
mod chunks_test;

use records::analysis::{AssignAnalystRequest, ChunkSummary};

#[derive(Clone, Debug, Default)]
pub struct ChunksState {
    pub items: Vec<ChunkSummary>,
    pub analysts: Vec<String>,
    pub loading: bool,
    pub can_merge: bool,
    pub merging: bool,
}

impl ChunksState {
    pub fn set_items(&mut self, items: Vec<ChunkSummary>) {
        self.items = items;
        self.loading = false;
    }

    /// Record an analyst assignment locally. Returns the request to persist,
    /// or `None` when the chunk is unknown or the analyst is unchanged.
    pub fn assign(&mut self, file: &str, analyst: &str) -> Option<AssignAnalystRequest> {
        let analyst = analyst.trim();
        if analyst.is_empty() {
            return None;
        }
        let item = self.items.iter_mut().find(|c| c.file == file)?;
        if item.analyst == analyst {
            return None;
        }
        item.analyst = analyst.to_owned();
        Some(AssignAnalystRequest { analyst: analyst.to_owned(), chunk: file.to_owned() })
    }

    pub fn merge_enabled(&self) -> bool {
        self.can_merge && !self.merging && !self.loading
    }
}
