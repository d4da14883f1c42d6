//! Min-max feature scaling into `[0, 1]`.
//!
//! The reference table is scaled per column. The query vector is, by default,
//! scaled across its own values (see [`QueryScaling`](crate::QueryScaling)).
//! Integer inputs are differenced in `f64` and the result is narrowed to
//! `f32`, so the observed min maps to exactly `0.0` and the max to `1.0`.

use crate::config::ZeroRange;
use crate::error::{KnnError, RangeContext};

/// Observed minimum and maximum of one column (or of a vector).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRange {
    /// Smallest observed value.
    pub min: i64,
    /// Largest observed value.
    pub max: i64,
}

impl ColumnRange {
    /// Returns `true` when `max == min`.
    pub fn is_degenerate(&self) -> bool {
        self.max == self.min
    }

    /// Maps `value` linearly so that `min -> 0.0` and `max -> 1.0`.
    ///
    /// A degenerate range maps every value to `0.0`.
    #[inline]
    pub fn scale(&self, value: i64) -> f32 {
        if self.is_degenerate() {
            return 0.0;
        }
        ((value as f64 - self.min as f64) / (self.max as f64 - self.min as f64)) as f32
    }

    fn of(values: impl Iterator<Item = i64>) -> Option<Self> {
        values.fold(None, |acc, v| match acc {
            None => Some(Self { min: v, max: v }),
            Some(r) => Some(Self {
                min: r.min.min(v),
                max: r.max.max(v),
            }),
        })
    }
}

/// A scaled row-major matrix and the column ranges used to produce it.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledColumns {
    /// Scaled values, `[n_rows × n_features]`.
    pub values: Vec<f32>,
    /// One range per feature column.
    pub ranges: Vec<ColumnRange>,
}

/// Scales every column of a flat row-major matrix independently.
///
/// # Errors
///
/// Returns [`KnnError::ZeroFeatures`], [`KnnError::EmptyReference`] or
/// [`KnnError::ReferenceShapeMismatch`] for a malformed matrix, and
/// [`KnnError::DegenerateRange`] under [`ZeroRange::Reject`] when a column
/// holds a single distinct value.
pub fn scale_columns(
    features: &[i64],
    n_features: usize,
    zero_range: ZeroRange,
) -> Result<ScaledColumns, KnnError> {
    if n_features == 0 {
        return Err(KnnError::ZeroFeatures);
    }
    if features.is_empty() {
        return Err(KnnError::EmptyReference);
    }
    if !features.len().is_multiple_of(n_features) {
        return Err(KnnError::ReferenceShapeMismatch {
            len: features.len(),
            n_features,
        });
    }

    let mut ranges = Vec::with_capacity(n_features);
    for col in 0..n_features {
        let range = ColumnRange::of(features.iter().skip(col).step_by(n_features).copied())
            .ok_or(KnnError::EmptyReference)?;
        if range.is_degenerate() && zero_range == ZeroRange::Reject {
            return Err(KnnError::DegenerateRange {
                context: RangeContext::Column(col),
            });
        }
        ranges.push(range);
    }

    let values = features
        .chunks_exact(n_features)
        .flat_map(|row| row.iter().zip(&ranges).map(|(&v, r)| r.scale(v)))
        .collect();

    Ok(ScaledColumns { values, ranges })
}

/// Scales a vector against its own min and max.
///
/// # Errors
///
/// Returns [`KnnError::EmptyVector`] for an empty slice and
/// [`KnnError::DegenerateRange`] under [`ZeroRange::Reject`] when all values
/// are equal.
pub fn scale_vector(values: &[i64], zero_range: ZeroRange) -> Result<Vec<f32>, KnnError> {
    let range = ColumnRange::of(values.iter().copied()).ok_or(KnnError::EmptyVector)?;
    if range.is_degenerate() && zero_range == ZeroRange::Reject {
        return Err(KnnError::DegenerateRange {
            context: RangeContext::Query,
        });
    }
    Ok(values.iter().map(|&v| range.scale(v)).collect())
}

/// Scales a vector position-by-position against reference column ranges.
///
/// Values outside a column's range scale outside `[0, 1]`; they are not
/// clamped. Degenerate columns were already accepted (or rejected) when the
/// ranges were computed, so they map to `0.0` here.
///
/// # Errors
///
/// Returns [`KnnError::QueryArity`] if `values` and `ranges`
/// differ in length.
pub fn scale_against(values: &[i64], ranges: &[ColumnRange]) -> Result<Vec<f32>, KnnError> {
    if values.len() != ranges.len() {
        return Err(KnnError::QueryArity {
            query: values.len(),
            n_features: ranges.len(),
        });
    }
    Ok(values
        .iter()
        .zip(ranges)
        .map(|(&v, r)| r.scale(v))
        .collect())
}
