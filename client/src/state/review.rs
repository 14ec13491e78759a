//! Records under review, from a local CSV or a server chunk.
//!
//! DESIGN
//! ======
//! Verdict changes are applied locally first and reported back as a
//! transition so the chunk page can persist them and roll back on failure.
//! The local CSV page never talks to the backend for verdicts.

#[cfg(test)]
#[path = "review_test.rs"]
mod review_test;

use std::collections::BTreeSet;

use records::RecordsError;
use records::analysis::{AnalysisRecord, DEFAULT_THRESHOLD, ProofValidationRequest, Verdict, VerdictChange};

/// A verdict change applied to one record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VerdictTransition {
    pub index: usize,
    pub previous: Option<Verdict>,
    pub next: Option<Verdict>,
}

#[derive(Clone, Debug)]
pub struct ReviewState {
    pub records: Vec<AnalysisRecord>,
    /// Server chunk name; `None` for a local CSV.
    pub chunk: Option<String>,
    pub model: Option<String>,
    /// Classes the model can emit; options for expected classes.
    pub classes: Vec<String>,
    pub analysts: Vec<String>,
    pub threshold: f64,
    pub preview: Option<String>,
    pub loading: bool,
    /// Records with a request in flight.
    pub pending: BTreeSet<usize>,
}

impl Default for ReviewState {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            chunk: None,
            model: None,
            classes: Vec::new(),
            analysts: Vec::new(),
            threshold: DEFAULT_THRESHOLD,
            preview: None,
            loading: false,
            pending: BTreeSet::new(),
        }
    }
}

impl ReviewState {
    pub fn for_chunk(chunk: impl Into<String>) -> Self {
        Self { chunk: Some(chunk.into()), ..Self::default() }
    }

    /// Start reviewing another chunk, keeping the analyst roster and threshold.
    pub fn reset_for_chunk(&mut self, chunk: impl Into<String>) {
        *self = Self {
            analysts: std::mem::take(&mut self.analysts),
            threshold: self.threshold,
            loading: true,
            ..Self::for_chunk(chunk)
        };
    }

    pub fn load_records(&mut self, records: Vec<AnalysisRecord>) {
        self.records = records;
        self.pending.clear();
        self.preview = None;
    }

    pub fn record(&self, index: usize) -> Option<&AnalysisRecord> {
        self.records.get(index)
    }

    /// Toggle `clicked` on a record and return the resulting transition.
    pub fn apply_verdict(&mut self, index: usize, clicked: Verdict) -> Option<VerdictTransition> {
        let record = self.records.get_mut(index)?;
        let previous = record.analysis;
        let next = Verdict::toggle(previous, clicked);
        record.set_verdict(next);
        Some(VerdictTransition { index, previous, next })
    }

    /// Undo a transition whose server update failed.
    pub fn revert(&mut self, transition: VerdictTransition) {
        if let Some(record) = self.records.get_mut(transition.index) {
            if record.analysis == transition.next {
                record.set_verdict(transition.previous);
            }
        }
    }

    /// Edit one record in place. Returns `false` for an unknown index.
    pub fn update_record(&mut self, index: usize, edit: impl FnOnce(&mut AnalysisRecord)) -> bool {
        match self.records.get_mut(index) {
            Some(record) => {
                edit(record);
                true
            }
            None => false,
        }
    }

    pub fn toggle_expected_class(&mut self, index: usize, class: &str) {
        self.update_record(index, |r| {
            if let Some(pos) = r.expected_classes.iter().position(|c| c == class) {
                r.expected_classes.remove(pos);
            } else {
                r.expected_classes.push(class.to_owned());
            }
        });
    }

    pub fn set_reproduced_urls(&mut self, index: usize, urls: Vec<String>) {
        self.update_record(index, |r| r.reproduced_urls = dedupe(urls));
    }

    pub fn set_analysed_by(&mut self, index: usize, analyst: String) {
        self.update_record(index, |r| r.analysed_by = analyst);
    }

    pub fn open_preview(&mut self, url: String) {
        if !url.trim().is_empty() {
            self.preview = Some(url);
        }
    }

    pub fn close_preview(&mut self) {
        self.preview = None;
    }

    /// Body for a chunk verdict update. `None` outside chunk review.
    pub fn verdict_change(&self, index: usize) -> Option<VerdictChange> {
        Some(VerdictChange {
            chunk: self.chunk.clone()?,
            input_media_url: self.records.get(index)?.input_media_url.clone(),
        })
    }

    /// Body for proof validation of one record.
    ///
    /// # Errors
    ///
    /// Returns the record-level validation error from [`ProofValidationRequest::from_record`].
    pub fn proof_request(&self, index: usize) -> Result<ProofValidationRequest, RecordsError> {
        let record = self
            .records
            .get(index)
            .ok_or(RecordsError::Form("Record not found."))?;
        ProofValidationRequest::from_record(self.chunk.as_deref(), record)
    }

    /// CSV text of the current records.
    ///
    /// # Errors
    ///
    /// Returns [`RecordsError::NothingToExport`] when nothing is loaded.
    pub fn export_csv(&self) -> Result<String, RecordsError> {
        records::csv::export_records(&self.records)
    }

    pub fn is_pending(&self, index: usize) -> bool {
        self.pending.contains(&index)
    }
}

fn dedupe(items: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        let item = item.trim().to_owned();
        if !item.is_empty() && !out.contains(&item) {
            out.push(item);
        }
    }
    out
}
