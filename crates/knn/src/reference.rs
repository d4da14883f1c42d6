//! Reference table types: raw integer rows and their scaled counterpart.

use tracing::debug;

use crate::config::{KnnConfig, QueryScaling};
use crate::error::KnnError;
use crate::knn::{KnnScratch, knn_predict, knn_predict_with_scratch};
use crate::result::Prediction;
use crate::scale::{ColumnRange, scale_against, scale_columns, scale_vector};

/// Labelled reference rows as read from the dataset.
///
/// Features are stored flat, row-major, `[n_rows × n_features]`; labels are
/// index-aligned with rows and are always 0 or 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceTable {
    features: Vec<i64>,
    labels: Vec<u8>,
    n_features: usize,
}

impl ReferenceTable {
    /// Creates a reference table, checking shape and labels.
    ///
    /// # Errors
    ///
    /// Returns [`KnnError`] if `n_features` is zero, the table is empty, the
    /// feature matrix is not a whole number of rows, the label count differs
    /// from the row count, or a label is not 0 or 1.
    pub fn new(features: Vec<i64>, labels: Vec<u8>, n_features: usize) -> Result<Self, KnnError> {
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
        let n_rows = features.len() / n_features;
        if labels.len() != n_rows {
            return Err(KnnError::LabelCountMismatch {
                labels: labels.len(),
                n_rows,
            });
        }
        if let Some((row, &label)) = labels.iter().enumerate().find(|(_, l)| **l > 1) {
            return Err(KnnError::InvalidLabel { row, label });
        }
        Ok(Self {
            features,
            labels,
            n_features,
        })
    }

    /// Returns the flat feature matrix.
    pub fn features(&self) -> &[i64] {
        &self.features
    }

    /// Returns the features of row `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.n_rows()`.
    pub fn row(&self, i: usize) -> &[i64] {
        &self.features[i * self.n_features..(i + 1) * self.n_features]
    }

    /// Returns an iterator over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[i64]> {
        self.features.chunks_exact(self.n_features)
    }

    /// Returns the labels.
    pub fn labels(&self) -> &[u8] {
        &self.labels
    }

    /// Returns the number of features per row.
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Returns the number of rows.
    pub fn n_rows(&self) -> usize {
        self.labels.len()
    }

    /// Counts rows labelled 1 and rows labelled 0, in that order.
    pub fn label_counts(&self) -> (usize, usize) {
        let positive = self.labels.iter().filter(|&&l| l == 1).count();
        (positive, self.labels.len() - positive)
    }
}

/// A reference table scaled into `[0, 1]`, ready for prediction.
///
/// Immutable once built; share it across threads behind an `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledReference {
    values: Vec<f32>,
    labels: Vec<u8>,
    ranges: Vec<ColumnRange>,
    n_features: usize,
}

impl ScaledReference {
    /// Scales every column of `table` using the config's degenerate range policy.
    ///
    /// # Errors
    ///
    /// Returns [`KnnError::DegenerateRange`] under
    /// [`ZeroRange::Reject`](crate::ZeroRange::Reject) if a column is constant.
    #[tracing::instrument(skip_all, fields(n_rows = table.n_rows(), n_features = table.n_features()))]
    pub fn fit(table: &ReferenceTable, config: &KnnConfig) -> Result<Self, KnnError> {
        let scaled = scale_columns(table.features(), table.n_features(), config.zero_range())?;
        let degenerate = scaled.ranges.iter().filter(|r| r.is_degenerate()).count();
        debug!(degenerate, "reference table scaled");
        Ok(Self {
            values: scaled.values,
            labels: table.labels().to_vec(),
            ranges: scaled.ranges,
            n_features: table.n_features(),
        })
    }

    /// Scales a raw query vector according to `config`.
    ///
    /// # Errors
    ///
    /// Returns [`KnnError::QueryArity`] if the query has the
    /// wrong length, or [`KnnError::DegenerateRange`] if a constant query
    /// is rejected.
    pub fn scale_query(&self, query: &[i64], config: &KnnConfig) -> Result<Vec<f32>, KnnError> {
        if query.len() != self.n_features {
            return Err(KnnError::QueryArity {
                query: query.len(),
                n_features: self.n_features,
            });
        }
        match config.query_scaling() {
            QueryScaling::SelfRange => scale_vector(query, config.zero_range()),
            QueryScaling::ReferenceRange => scale_against(query, &self.ranges),
        }
    }

    /// Scales `query` and predicts its label.
    ///
    /// # Errors
    ///
    /// Returns [`KnnError`] for an invalid query or configuration.
    #[tracing::instrument(skip_all, fields(k = config.k()))]
    pub fn predict(&self, query: &[i64], config: &KnnConfig) -> Result<Prediction, KnnError> {
        config.validate()?;
        let scaled = self.scale_query(query, config)?;
        let prediction = knn_predict(&scaled, &self.values, self.n_features, &self.labels, config.k())?;
        debug!(label = prediction.label(), "prediction made");
        Ok(prediction)
    }

    /// Predicts like [`ScaledReference::predict`], reusing scratch buffers.
    ///
    /// # Errors
    ///
    /// Returns [`KnnError`] for an invalid query or configuration.
    pub fn predict_with_scratch(
        &self,
        query: &[i64],
        config: &KnnConfig,
        scratch: &mut KnnScratch,
    ) -> Result<Prediction, KnnError> {
        config.validate()?;
        let scaled = self.scale_query(query, config)?;
        knn_predict_with_scratch(
            &scaled,
            &self.values,
            self.n_features,
            &self.labels,
            config.k(),
            scratch,
        )
    }

    /// Returns the flat scaled matrix.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Returns scaled row `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.n_rows()`.
    pub fn row(&self, i: usize) -> &[f32] {
        &self.values[i * self.n_features..(i + 1) * self.n_features]
    }

    /// Returns the labels, index-aligned with rows.
    pub fn labels(&self) -> &[u8] {
        &self.labels
    }

    /// Returns the per-column ranges observed while scaling.
    pub fn ranges(&self) -> &[ColumnRange] {
        &self.ranges
    }

    /// Returns the number of features per row.
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Returns the number of rows.
    pub fn n_rows(&self) -> usize {
        self.labels.len()
    }
}
