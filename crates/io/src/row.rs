//! Per-row parsing of dataset records.

use csv::StringRecord;

use crate::error::IoError;

/// A cell that could not be read as a number (or, in the label column, as 0/1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadCell {
    /// 0-based column index.
    pub column: usize,
    /// The cell text as read.
    pub raw: String,
}

/// Outcome of parsing one data row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    /// Every cell parsed.
    Parsed {
        /// Feature values in column order.
        features: Vec<i64>,
        /// Label, 0 or 1.
        label: u8,
        /// Decimal feature cells truncated to an integer.
        truncated: usize,
    },
    /// At least one cell failed to parse. Failed cells read as 0 in
    /// `features` / `label`; callers decide whether to use, skip or reject.
    Malformed {
        /// The cells that failed, in column order.
        bad: Vec<BadCell>,
        /// Feature values with failed cells as 0.
        features: Vec<i64>,
        /// Label with a failed cell as 0.
        label: u8,
        /// Decimal feature cells truncated to an integer.
        truncated: usize,
    },
}

/// Parses a numeric cell.
///
/// Accepts an optionally signed integer, or a decimal fraction which is
/// truncated toward zero (`"2.3"` reads as `2`, `"-0.5"` as `0`).
/// Surrounding whitespace is ignored. Returns `None` for anything else.
pub fn parse_cell(raw: &str) -> Option<i64> {
    read_cell(raw).map(|(v, _)| v)
}

/// Like [`parse_cell`], also reporting whether a fraction was dropped.
fn read_cell(raw: &str) -> Option<(i64, bool)> {
    let s = raw.trim();
    if let Ok(v) = s.parse::<i64>() {
        return Some((v, false));
    }
    let (int_part, frac) = s.split_once('.')?;
    if frac.is_empty() || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let truncated = frac.bytes().any(|b| b != b'0');
    match int_part {
        "" | "+" | "-" => Some((0, truncated)),
        _ => int_part.parse().ok().map(|v| (v, truncated)),
    }
}

/// Parses one data record of `n_features` features followed by a label.
///
/// `line` is used only for error messages.
///
/// # Errors
///
/// Returns [`IoError::ShortRow`] or [`IoError::LongRow`] when the record does
/// not have exactly `n_features + 1` fields. Unparseable cells are not errors
/// here; they are reported through [`RowOutcome::Malformed`].
pub fn parse_row(record: &StringRecord, n_features: usize, line: u64) -> Result<RowOutcome, IoError> {
    let expected = n_features + 1;
    let found = record.len();
    if found < expected {
        return Err(IoError::ShortRow {
            line,
            expected,
            found,
        });
    }
    if found > expected {
        return Err(IoError::LongRow {
            line,
            expected,
            found,
        });
    }

    let mut bad = Vec::new();
    let mut truncated = 0;
    let mut features = Vec::with_capacity(n_features);
    for (column, raw) in record.iter().take(n_features).enumerate() {
        match read_cell(raw) {
            Some((v, dropped)) => {
                truncated += usize::from(dropped);
                features.push(v);
            }
            None => {
                bad.push(BadCell {
                    column,
                    raw: raw.to_string(),
                });
                features.push(0);
            }
        }
    }

    let raw_label = &record[n_features];
    let label = match parse_cell(raw_label) {
        Some(0) => 0,
        Some(1) => 1,
        _ => {
            bad.push(BadCell {
                column: n_features,
                raw: raw_label.to_string(),
            });
            0
        }
    };

    if bad.is_empty() {
        Ok(RowOutcome::Parsed {
            features,
            label,
            truncated,
        })
    } else {
        Ok(RowOutcome::Malformed {
            bad,
            features,
            label,
            truncated,
        })
    }
}
