//! # cardio-io
//!
//! Read the labelled reference dataset from CSV and patient records from JSON.
//! Bridges external file formats into the integer slices consumed by
//! `cardio-knn`.

mod error;
mod patient;
mod reader;
mod row;

pub use error::IoError;
pub use patient::{FEATURE_NAMES, PatientRecord, parse_patient_json, read_patient_json};
pub use reader::{
    CellPolicy, LoadReport, LoadedTable, N_FEATURES, ReaderConfig, read_queries_csv,
    read_queries_from, read_reference_csv, read_reference_from,
};
pub use row::{BadCell, RowOutcome, parse_cell, parse_row};
