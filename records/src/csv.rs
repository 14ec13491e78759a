//! CSV import and export for analysis records.
//!
//! Import mirrors how analysts hand over prediction dumps: a header row,
//! blank lines ignored, every record starting unreviewed. Export writes
//! source columns, then any extra columns, then the review columns.

use indexmap::IndexSet;

use crate::RecordsError;
use crate::analysis::{AnalysisRecord, REVIEW_COLUMNS, SOURCE_COLUMNS};

/// File name offered for downloaded review results.
pub const EXPORT_FILE_NAME: &str = "analysis_results.csv";

/// MIME type for downloaded review results.
pub const EXPORT_MIME: &str = "text/csv;charset=utf-8;";

/// Parse CSV text into fresh, unreviewed records.
///
/// # Errors
///
/// Returns [`RecordsError::Csv`] for malformed input and
/// [`RecordsError::EmptyCsv`] when no data rows remain after skipping blanks.
pub fn parse_records(text: &str) -> Result<Vec<AnalysisRecord>, RecordsError> {
    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(::csv::Trim::Headers)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        if row.len() == 1 && row.get(0) == Some("") {
            continue;
        }
        let mut record = AnalysisRecord::default();
        for (name, value) in headers.iter().zip(row.iter()) {
            if name.is_empty() {
                continue;
            }
            record.set_column(name, value.to_owned());
        }
        record.reset_review();
        records.push(record);
    }

    if records.is_empty() {
        return Err(RecordsError::EmptyCsv);
    }
    Ok(records)
}

/// Column order used for export.
#[must_use]
pub fn export_columns(records: &[AnalysisRecord]) -> Vec<String> {
    let mut extras: IndexSet<&str> = IndexSet::new();
    for record in records {
        for key in record.extra.keys() {
            extras.insert(key.as_str());
        }
    }
    SOURCE_COLUMNS
        .iter()
        .copied()
        .chain(extras)
        .chain(REVIEW_COLUMNS.iter().copied())
        .map(ToOwned::to_owned)
        .collect()
}

/// Render records as CSV text. List fields are joined with commas.
///
/// # Errors
///
/// Returns [`RecordsError::NothingToExport`] for an empty slice and
/// [`RecordsError::Csv`] if the writer fails.
pub fn export_records(records: &[AnalysisRecord]) -> Result<String, RecordsError> {
    if records.is_empty() {
        return Err(RecordsError::NothingToExport);
    }
    let columns = export_columns(records);
    let mut writer = ::csv::Writer::from_writer(Vec::new());
    writer.write_record(&columns)?;
    for record in records {
        writer.write_record(columns.iter().map(|c| record.column(c)))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| RecordsError::Csv(e.into_error().into()))?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
#[path = "csv_test.rs"]
mod tests;
