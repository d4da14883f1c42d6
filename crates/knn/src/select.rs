//! Top-k nearest neighbor selection.

/// Selects the `k` nearest rows from a distance list without mutating it.
///
/// Sorts `(distance, index)` pairs by distance, breaking ties by the lower
/// index, and keeps the first `k`. Each row can therefore be chosen at most
/// once. Uses full sort, which is fine for reference tables of a few
/// thousand rows.
///
/// Writes into caller-provided buffers:
/// - `pairs`: scratch buffer for (distance, index) pairs
/// - `nn_indices`: indices of the k nearest rows, by ascending distance
/// - `nn_dists`: their distances
///
/// # Panics
///
/// Debug-asserts that `k >= 1` and `k <= distances.len()`.
pub(crate) fn select_k_nearest(
    distances: &[f32],
    k: usize,
    pairs: &mut Vec<(f32, usize)>,
    nn_indices: &mut Vec<usize>,
    nn_dists: &mut Vec<f32>,
) {
    debug_assert!(k >= 1);
    debug_assert!(k <= distances.len());

    pairs.clear();
    pairs.extend(distances.iter().copied().enumerate().map(|(i, d)| (d, i)));

    // total_cmp gives a total order even for NaN; the index makes it stable.
    pairs.sort_unstable_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
    pairs.truncate(k);

    nn_indices.clear();
    nn_dists.clear();
    for &(d, idx) in pairs.iter() {
        nn_indices.push(idx);
        nn_dists.push(d);
    }
}
