//! Euclidean distance computation.

/// Euclidean distance between two equal-length vectors.
///
/// # Panics
///
/// Debug-asserts that `a.len() == b.len()`.
#[inline]
pub fn euclidean(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b)
        .map(|(&x, &y)| {
            let d = x - y;
            d * d
        })
        .sum::<f32>()
        .sqrt()
}

/// Computes Euclidean distances from `query` to every reference row.
///
/// For each row `i`:
/// ```text
/// out[i] = sqrt(Σⱼ (reference[i × n_features + j] − query[j])²)
/// ```
///
/// # Panics
///
/// Debug-asserts that `reference.len() % n_features == 0`,
/// `query.len() == n_features` and `out.len() == reference.len() / n_features`.
pub(crate) fn euclidean_distances(
    query: &[f32],
    reference: &[f32],
    n_features: usize,
    out: &mut [f32],
) {
    debug_assert_eq!(reference.len() % n_features, 0);
    debug_assert_eq!(query.len(), n_features);
    debug_assert_eq!(out.len(), reference.len() / n_features);

    for (o, row) in out.iter_mut().zip(reference.chunks_exact(n_features)) {
        *o = euclidean(row, query);
    }
}
