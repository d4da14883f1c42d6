//! Prediction entry point and scratch buffer management.

use tracing::trace;

use crate::distance::euclidean_distances;
use crate::error::KnnError;
use crate::result::{Prediction, Votes};
use crate::select::select_k_nearest;

/// Pre-allocated scratch buffers for prediction.
///
/// Reuse across calls to [`knn_predict_with_scratch`] when classifying many
/// queries against the same reference table, e.g. one scratch per worker
/// thread in a batch.
///
/// # Example
///
/// ```
/// use cardio_knn::KnnScratch;
///
/// let mut scratch = KnnScratch::new(300);
/// // Use with knn_predict_with_scratch() in a loop...
/// ```
#[derive(Debug, Clone, Default)]
pub struct KnnScratch {
    /// One distance per reference row.
    pub(crate) distances: Vec<f32>,
    /// (distance, index) pairs for sorting.
    pub(crate) pairs: Vec<(f32, usize)>,
    /// Indices of the k nearest rows.
    pub(crate) nn_indices: Vec<usize>,
    /// Distances of the k nearest rows.
    pub(crate) nn_dists: Vec<f32>,
}

impl KnnScratch {
    /// Creates a new scratch buffer with capacity for `max_rows` reference rows.
    pub fn new(max_rows: usize) -> Self {
        Self {
            distances: Vec::with_capacity(max_rows),
            pairs: Vec::with_capacity(max_rows),
            nn_indices: Vec::new(),
            nn_dists: Vec::new(),
        }
    }
}

/// Validates all inputs and returns the derived `n_rows`.
fn validate_inputs(
    query: &[f32],
    reference: &[f32],
    n_features: usize,
    labels: &[u8],
    k: usize,
) -> Result<usize, KnnError> {
    if k < 1 {
        return Err(KnnError::InvalidK { k });
    }
    if n_features == 0 {
        return Err(KnnError::ZeroFeatures);
    }
    if reference.is_empty() {
        return Err(KnnError::EmptyReference);
    }
    if !reference.len().is_multiple_of(n_features) {
        return Err(KnnError::ReferenceShapeMismatch {
            len: reference.len(),
            n_features,
        });
    }

    let n_rows = reference.len() / n_features;

    if labels.len() != n_rows {
        return Err(KnnError::LabelCountMismatch {
            labels: labels.len(),
            n_rows,
        });
    }
    if query.len() != n_features {
        return Err(KnnError::QueryDimensionMismatch {
            query: query.len(),
            n_features,
        });
    }
    if query.iter().any(|v| !v.is_finite()) {
        return Err(KnnError::NonFiniteInput { input: "query" });
    }
    if k > n_rows {
        return Err(KnnError::KExceedsReference { k, n_rows });
    }

    Ok(n_rows)
}

/// Internal implementation that assumes all inputs are validated.
fn knn_predict_inner(
    query: &[f32],
    reference: &[f32],
    n_rows: usize,
    n_features: usize,
    labels: &[u8],
    k: usize,
    scratch: &mut KnnScratch,
) -> Prediction {
    scratch.distances.clear();
    scratch.distances.resize(n_rows, 0.0);
    euclidean_distances(query, reference, n_features, &mut scratch.distances);

    select_k_nearest(
        &scratch.distances,
        k,
        &mut scratch.pairs,
        &mut scratch.nn_indices,
        &mut scratch.nn_dists,
    );

    let mut votes = Votes::default();
    for &idx in &scratch.nn_indices {
        votes.add(labels[idx]);
    }
    trace!(
        positive = votes.positive,
        negative = votes.negative,
        "neighbors tallied"
    );

    Prediction::new(scratch.nn_indices.clone(), scratch.nn_dists.clone(), votes)
}

/// Predicts the majority label among the `k` nearest reference rows.
///
/// This is the simple entry point. For many queries against the same table,
/// use [`knn_predict_with_scratch`] to reuse allocations.
///
/// # Arguments
///
/// * `query` — scaled query vector `[n_features]`
/// * `reference` — flat row-major scaled reference matrix `[n_rows × n_features]`
/// * `n_features` — number of features per row
/// * `labels` — one label per reference row, index-aligned
/// * `k` — number of voting neighbors, `1 <= k <= n_rows`
///
/// # Errors
///
/// Returns [`KnnError`] if `k` is zero or larger than the table, if the
/// shapes disagree, or if the query contains a non-finite value.
pub fn knn_predict(
    query: &[f32],
    reference: &[f32],
    n_features: usize,
    labels: &[u8],
    k: usize,
) -> Result<Prediction, KnnError> {
    let n_rows = validate_inputs(query, reference, n_features, labels, k)?;
    let mut scratch = KnnScratch::new(n_rows);
    Ok(knn_predict_inner(
        query,
        reference,
        n_rows,
        n_features,
        labels,
        k,
        &mut scratch,
    ))
}

/// Predicts like [`knn_predict`], reusing pre-allocated scratch buffers.
///
/// Buffers grow as needed and never shrink.
///
/// # Errors
///
/// Returns [`KnnError`] if inputs are invalid.
pub fn knn_predict_with_scratch(
    query: &[f32],
    reference: &[f32],
    n_features: usize,
    labels: &[u8],
    k: usize,
    scratch: &mut KnnScratch,
) -> Result<Prediction, KnnError> {
    let n_rows = validate_inputs(query, reference, n_features, labels, k)?;
    Ok(knn_predict_inner(
        query, reference, n_rows, n_features, labels, k, scratch,
    ))
}
