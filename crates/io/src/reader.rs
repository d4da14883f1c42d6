//! Reference dataset reader.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use cardio_knn::ReferenceTable;
use csv::{ReaderBuilder, Trim};
use tracing::{debug, info, warn};

use crate::error::IoError;
use crate::row::{RowOutcome, parse_cell, parse_row};

/// Number of features in the reference heart dataset.
pub const N_FEATURES: usize = 13;

/// What the reader does with a row containing an unparseable cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CellPolicy {
    /// Fail the whole load.
    #[default]
    Strict,
    /// Drop the row (features and label together) and continue.
    SkipRow,
    /// Read the bad cell as 0 and keep the row.
    ZeroFill,
}

/// Configuration for reading a reference dataset.
///
/// # Example
///
/// ```
/// use cardio_io::{CellPolicy, ReaderConfig};
///
/// let config = ReaderConfig::default().with_cell_policy(CellPolicy::SkipRow);
/// assert_eq!(config.n_features(), 13);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderConfig {
    n_features: usize,
    cell_policy: CellPolicy,
}

impl ReaderConfig {
    /// Sets the number of feature columns; the label is the column after them.
    pub fn with_n_features(mut self, n_features: usize) -> Self {
        self.n_features = n_features;
        self
    }

    /// Sets the malformed cell policy.
    pub fn with_cell_policy(mut self, cell_policy: CellPolicy) -> Self {
        self.cell_policy = cell_policy;
        self
    }

    /// Returns the number of feature columns.
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Returns the malformed cell policy.
    pub fn cell_policy(&self) -> CellPolicy {
        self.cell_policy
    }
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            n_features: N_FEATURES,
            cell_policy: CellPolicy::Strict,
        }
    }
}

/// Counters gathered while reading a dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Data rows read (excluding the header).
    pub rows_read: usize,
    /// Rows dropped under [`CellPolicy::SkipRow`].
    pub rows_skipped: usize,
    /// Cells read as 0 under [`CellPolicy::ZeroFill`].
    pub cells_zero_filled: usize,
    /// Decimal feature cells truncated toward zero (e.g. `2.3` read as 2).
    pub cells_truncated: usize,
}

/// A loaded reference table and how it was obtained.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    /// The reference rows.
    pub table: ReferenceTable,
    /// Load counters.
    pub report: LoadReport,
}

fn open(path: &Path) -> Result<BufReader<File>, IoError> {
    File::open(path).map(BufReader::new).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => IoError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => IoError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        },
    })
}

/// Reads a reference dataset from a CSV file.
///
/// The first line is a header and is skipped. Every following line must have
/// `n_features + 1` fields; the last is the label.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if `path` does not exist, and any error
/// of [`read_reference_from`].
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn read_reference_csv(path: &Path, config: &ReaderConfig) -> Result<LoadedTable, IoError> {
    let file = open(path)?;
    let loaded = read_reference_from(file, config)?;
    info!(
        rows = loaded.table.n_rows(),
        skipped = loaded.report.rows_skipped,
        truncated = loaded.report.cells_truncated,
        "reference dataset loaded"
    );
    Ok(loaded)
}

/// Reads a reference dataset from any CSV source.
///
/// # Errors
///
/// Returns [`IoError::Csv`] for framing errors, [`IoError::ShortRow`] /
/// [`IoError::LongRow`] for rows of the wrong width, [`IoError::MalformedCell`]
/// under [`CellPolicy::Strict`], and [`IoError::EmptyDataset`] when no rows
/// remain.
pub fn read_reference_from<R: Read>(source: R, config: &ReaderConfig) -> Result<LoadedTable, IoError> {
    let n_features = config.n_features();
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(source);

    let mut features = Vec::new();
    let mut labels = Vec::new();
    let mut report = LoadReport::default();

    for result in reader.records() {
        let record = result?;
        let line = record.position().map_or(0, |p| p.line());
        report.rows_read += 1;

        match parse_row(&record, n_features, line)? {
            RowOutcome::Parsed {
                features: row,
                label,
                truncated,
            } => {
                report.cells_truncated += truncated;
                features.extend(row);
                labels.push(label);
            }
            RowOutcome::Malformed {
                bad,
                features: row,
                label,
                truncated,
            } => match config.cell_policy() {
                CellPolicy::Strict => {
                    let first = bad.into_iter().next().map(|c| (c.column, c.raw));
                    let (column, raw) = first.unwrap_or_default();
                    return Err(IoError::MalformedCell { line, column, raw });
                }
                CellPolicy::SkipRow => {
                    warn!(line, cells = bad.len(), "skipping row with malformed cells");
                    report.rows_skipped += 1;
                }
                CellPolicy::ZeroFill => {
                    debug!(line, cells = bad.len(), "malformed cells read as 0");
                    report.cells_zero_filled += bad.len();
                    report.cells_truncated += truncated;
                    features.extend(row);
                    labels.push(label);
                }
            },
        }
    }

    if labels.is_empty() {
        return Err(IoError::EmptyDataset);
    }

    let table = ReferenceTable::new(features, labels, n_features)?;
    Ok(LoadedTable { table, report })
}

/// Reads unlabelled query rows (header + `n_features` columns) from a CSV file.
///
/// Cells follow the same grammar as the reference dataset; any malformed cell
/// fails the read.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] / [`IoError::Read`] if the file cannot be
/// opened, and any error of [`read_queries_from`].
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn read_queries_csv(path: &Path, n_features: usize) -> Result<Vec<Vec<i64>>, IoError> {
    let file = open(path)?;
    read_queries_from(file, n_features)
}

/// Reads unlabelled query rows from any CSV source.
///
/// # Errors
///
/// Returns [`IoError::ShortRow`] / [`IoError::LongRow`] for rows that are not
/// exactly `n_features` wide, [`IoError::MalformedCell`] for unparseable
/// cells, and [`IoError::Csv`] for framing errors. An empty file yields no
/// queries.
pub fn read_queries_from<R: Read>(source: R, n_features: usize) -> Result<Vec<Vec<i64>>, IoError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(source);

    let mut queries = Vec::new();
    for result in reader.records() {
        let record = result?;
        let line = record.position().map_or(0, |p| p.line());
        let found = record.len();
        if found < n_features {
            return Err(IoError::ShortRow {
                line,
                expected: n_features,
                found,
            });
        }
        if found > n_features {
            return Err(IoError::LongRow {
                line,
                expected: n_features,
                found,
            });
        }
        let query = record
            .iter()
            .enumerate()
            .map(|(column, raw)| {
                parse_cell(raw).ok_or_else(|| IoError::MalformedCell {
                    line,
                    column,
                    raw: raw.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        queries.push(query);
    }
    debug!(n = queries.len(), "query rows read");
    Ok(queries)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "a,b,target\n";

    fn read(body: &str, policy: CellPolicy) -> Result<LoadedTable, IoError> {
        let text = format!("{HEADER}{body}");
        let config = ReaderConfig::default()
            .with_n_features(2)
            .with_cell_policy(policy);
        read_reference_from(text.as_bytes(), &config)
    }

    #[test]
    fn header_is_skipped_and_order_kept() {
        let loaded = read("1,2,0\n3,4,1\n5,6,1\n", CellPolicy::Strict).unwrap();
        assert_eq!(loaded.table.features(), &[1, 2, 3, 4, 5, 6]);
        assert_eq!(loaded.table.labels(), &[0, 1, 1]);
        assert_eq!(loaded.report.rows_read, 3);
    }

    #[test]
    fn strict_rejects_bad_cell_with_position() {
        let err = read("1,2,0\n3,NA,1\n", CellPolicy::Strict).unwrap_err();
        match err {
            IoError::MalformedCell { line, column, raw } => {
                assert_eq!(line, 3);
                assert_eq!(column, 1);
                assert_eq!(raw, "NA");
            }
            other => panic!("expected MalformedCell, got {other:?}"),
        }
    }

    #[test]
    fn skip_row_drops_features_and_label_together() {
        let loaded = read("1,2,0\n3,NA,1\n5,6,1\n", CellPolicy::SkipRow).unwrap();
        assert_eq!(loaded.table.features(), &[1, 2, 5, 6]);
        assert_eq!(loaded.table.labels(), &[0, 1]);
        assert_eq!(loaded.report.rows_skipped, 1);
        assert_eq!(loaded.report.rows_read, 3);
    }

    #[test]
    fn truncated_decimals_are_counted() {
        let loaded = read("1.5,2,0\n3,4.0,1\n5,6.9,1\n", CellPolicy::Strict).unwrap();
        assert_eq!(loaded.table.features(), &[1, 2, 3, 4, 5, 6]);
        assert_eq!(loaded.report.cells_truncated, 2);
    }

    #[test]
    fn skipped_row_truncations_not_counted() {
        let loaded = read("1.5,NA,0\n3,4,1\n", CellPolicy::SkipRow).unwrap();
        assert_eq!(loaded.report.rows_skipped, 1);
        assert_eq!(loaded.report.cells_truncated, 0);
    }

    #[test]
    fn zero_fill_keeps_row() {
        let loaded = read("1,2,0\n3,NA,1\n", CellPolicy::ZeroFill).unwrap();
        assert_eq!(loaded.table.features(), &[1, 2, 3, 0]);
        assert_eq!(loaded.table.labels(), &[0, 1]);
        assert_eq!(loaded.report.cells_zero_filled, 1);
    }

    #[test]
    fn short_row_is_fatal_under_every_policy() {
        for policy in [CellPolicy::Strict, CellPolicy::SkipRow, CellPolicy::ZeroFill] {
            let err = read("1,2,0\n3,1\n", policy).unwrap_err();
            assert!(matches!(err, IoError::ShortRow { line: 3, .. }), "{err:?}");
        }
    }

    #[test]
    fn header_only_is_empty() {
        assert!(matches!(
            read("", CellPolicy::Strict),
            Err(IoError::EmptyDataset)
        ));
    }

    #[test]
    fn all_rows_skipped_is_empty() {
        assert!(matches!(
            read("x,2,0\n", CellPolicy::SkipRow),
            Err(IoError::EmptyDataset)
        ));
    }

    #[test]
    fn queries_parse_and_truncate() {
        let text = "a,b\n1,2.7\n-3,4\n";
        let queries = read_queries_from(text.as_bytes(), 2).unwrap();
        assert_eq!(queries, vec![vec![1, 2], vec![-3, 4]]);
    }

    #[test]
    fn queries_reject_bad_cell_and_width() {
        assert!(matches!(
            read_queries_from("a,b\n1,x\n".as_bytes(), 2),
            Err(IoError::MalformedCell { line: 2, column: 1, .. })
        ));
        assert!(matches!(
            read_queries_from("a,b\n1\n".as_bytes(), 2),
            Err(IoError::ShortRow { .. })
        ));
        assert!(matches!(
            read_queries_from("a,b\n1,2,3\n".as_bytes(), 2),
            Err(IoError::LongRow { .. })
        ));
    }

    #[test]
    fn queries_empty_file() {
        assert!(read_queries_from("a,b\n".as_bytes(), 2).unwrap().is_empty());
    }
}
