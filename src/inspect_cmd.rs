//! Inspect command: summarise the reference dataset.

use std::fmt::Write;

use anyhow::Result;
use tracing::info_span;

use cardio_io::{FEATURE_NAMES, LoadedTable};

use crate::cli::InspectArgs;
use crate::config::CardioConfig;
use crate::convert::Settings;

/// Observed range of one raw feature column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSummary {
    pub name: String,
    pub min: i64,
    pub max: i64,
}

impl ColumnSummary {
    /// True when every row holds the same value.
    pub fn is_constant(&self) -> bool {
        self.min == self.max
    }
}

/// Run the dataset summary.
pub fn run(args: InspectArgs, config: &CardioConfig) -> Result<()> {
    let _cmd = info_span!("inspect").entered();
    let settings = Settings::resolve(config, &args.dataset)?;
    let loaded = settings.load_table()?;
    print!("{}", render(&loaded));
    Ok(())
}

/// Computes per-column min/max over the raw table.
pub fn summarise_columns(loaded: &LoadedTable) -> Vec<ColumnSummary> {
    let table = &loaded.table;
    let n_features = table.n_features();
    (0..n_features)
        .map(|j| {
            let (min, max) = table
                .rows()
                .map(|row| row[j])
                .fold((i64::MAX, i64::MIN), |(lo, hi), v| (lo.min(v), hi.max(v)));
            let name = if n_features == FEATURE_NAMES.len() {
                FEATURE_NAMES[j].to_string()
            } else {
                format!("column_{j}")
            };
            ColumnSummary { name, min, max }
        })
        .collect()
}

/// Renders the summary as plain text.
pub fn render(loaded: &LoadedTable) -> String {
    let report = &loaded.report;
    let (positive, negative) = loaded.table.label_counts();
    let mut out = String::new();

    let _ = writeln!(out, "rows:          {}", loaded.table.n_rows());
    let _ = writeln!(out, "rows read:     {}", report.rows_read);
    let _ = writeln!(out, "rows skipped:  {}", report.rows_skipped);
    let _ = writeln!(out, "cells as 0:    {}", report.cells_zero_filled);
    let _ = writeln!(out, "truncated:     {}", report.cells_truncated);
    let _ = writeln!(out, "label 1:       {positive}");
    let _ = writeln!(out, "label 0:       {negative}");
    let _ = writeln!(out, "columns:");
    for column in summarise_columns(loaded) {
        let marker = if column.is_constant() { "  (constant)" } else { "" };
        let _ = writeln!(
            out,
            "  {:<26} {:>6} {:>6}{marker}",
            column.name, column.min, column.max
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardio_io::LoadReport;
    use cardio_knn::ReferenceTable;

    fn loaded() -> LoadedTable {
        LoadedTable {
            table: ReferenceTable::new(vec![1, 5, 3, 5, -2, 5], vec![1, 0, 1], 2).unwrap(),
            report: LoadReport {
                rows_read: 4,
                rows_skipped: 1,
                cells_zero_filled: 0,
                cells_truncated: 2,
            },
        }
    }

    #[test]
    fn columns_min_max() {
        let columns = summarise_columns(&loaded());
        assert_eq!(columns.len(), 2);
        assert_eq!((columns[0].min, columns[0].max), (-2, 3));
        assert!(!columns[0].is_constant());
        assert!(columns[1].is_constant());
        assert_eq!(columns[1].name, "column_1");
    }

    #[test]
    fn render_counts() {
        let text = render(&loaded());
        assert!(text.contains("rows:          3"));
        assert!(text.contains("rows skipped:  1"));
        assert!(text.contains("truncated:     2"));
        assert!(text.contains("label 1:       2"));
        assert!(text.contains("label 0:       1"));
        assert!(text.contains("(constant)"));
    }
}
