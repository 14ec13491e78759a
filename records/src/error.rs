//! Error type shared by the contract helpers.
//!
//! `Display` strings double as the user-facing notification text, so the UI
//! and CLI can surface them without another mapping layer.

/// Error returned by parsing, export, and validation helpers.
#[derive(Debug, thiserror::Error)]
pub enum RecordsError {
    /// The CSV reader or writer failed.
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] ::csv::Error),
    /// A CSV upload contained a header but no records.
    #[error("No valid data found in CSV")]
    EmptyCsv,
    /// Export was requested with no records loaded.
    #[error("No data to export")]
    NothingToExport,
    /// The exported CSV buffer was not valid UTF-8.
    #[error("CSV output was not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
    /// A chunk request was made without a chunk name.
    #[error("insufficient information")]
    MissingChunk,
    /// The expected score is not a number.
    #[error("Expected score must be a number")]
    InvalidScore(String),
    /// The expected score is outside `0 < score <= 1`.
    #[error("Expected score must satisfy 0 < score <= 1")]
    ScoreOutOfRange(f64),
    /// An uploaded file has an extension outside the allowed set.
    #[error("Only {allowed} files are allowed!")]
    DisallowedExtension { allowed: String },
    /// An uploaded file exceeds the size cap.
    #[error("File size must be less than {max_mb}MB")]
    FileTooLarge { max_mb: u64 },
    /// A form failed a required-field or consistency check.
    #[error("{0}")]
    Form(&'static str),
}
