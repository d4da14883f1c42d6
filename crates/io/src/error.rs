//! Error types for cardio-io.

use std::path::PathBuf;

use cardio_knn::{FailureKind, KnnError};

/// Error type for all fallible operations in the cardio-io crate.
///
/// Covers opening and reading the reference dataset, row shape and cell
/// failures, and decoding of patient records.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when the dataset file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Returned when a file exists but cannot be opened or read.
    #[error("cannot read {}: {reason}", path.display())]
    Read {
        /// Path being read.
        path: PathBuf,
        /// Description of the underlying I/O failure.
        reason: String,
    },

    /// Wraps an error originating from the CSV reader.
    #[error("csv error: {reason}")]
    Csv {
        /// Description of the underlying CSV failure.
        reason: String,
    },

    /// Returned when a data row has fewer fields than features + label.
    #[error("line {line}: expected {expected} fields, found {found}")]
    ShortRow {
        /// 1-based line number in the source.
        line: u64,
        /// Number of fields required.
        expected: usize,
        /// Number of fields present.
        found: usize,
    },

    /// Returned when a data row has more fields than features + label.
    #[error("line {line}: expected {expected} fields, found {found} (extra fields)")]
    LongRow {
        /// 1-based line number in the source.
        line: u64,
        /// Number of fields required.
        expected: usize,
        /// Number of fields present.
        found: usize,
    },

    /// Returned under strict parsing when a cell is not a number.
    #[error("line {line}, column {column}: malformed cell '{raw}'")]
    MalformedCell {
        /// 1-based line number in the source.
        line: u64,
        /// 0-based column index.
        column: usize,
        /// The cell text as read.
        raw: String,
    },

    /// Returned when the source holds no usable data rows.
    #[error("dataset has no data rows")]
    EmptyDataset,

    /// Returned when the parsed rows do not form a valid reference table.
    #[error("invalid reference table: {0}")]
    Reference(#[from] KnnError),

    /// Returned when a patient record cannot be decoded.
    #[error("invalid patient record: {reason}")]
    InvalidPayload {
        /// Description of the decoding failure.
        reason: String,
    },
}

impl From<csv::Error> for IoError {
    fn from(e: csv::Error) -> Self {
        IoError::Csv {
            reason: e.to_string(),
        }
    }
}

impl IoError {
    /// Classifies this error for the caller.
    pub fn kind(&self) -> FailureKind {
        match self {
            IoError::InvalidPayload { .. } => FailureKind::BadInput,
            IoError::Reference(e) => e.kind(),
            _ => FailureKind::DataUnavailable,
        }
    }
}
