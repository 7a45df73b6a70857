//! k-nearest-neighbour search entry point.

use crate::config::KnnConfig;
use crate::distance::pairwise_distances;
use crate::error::KnnError;
use crate::points::{QueryPoints, ReferencePoints};
use crate::result::NeighborIndices;
use crate::select::select_k_nearest;

/// Finds the `k` nearest reference points for every query point.
///
/// Validates `k` against the reference set before computing any distance.
///
/// # Errors
///
/// Returns [`KnnError::InvalidK`] if `k == 0` or `k > reference.len()`.
pub fn knn_search(
    queries: &QueryPoints,
    reference: &ReferencePoints,
    k: usize,
) -> Result<NeighborIndices, KnnError> {
    KnnConfig::new(k).validate(reference.len())?;
    let distances = pairwise_distances(queries.coords(), reference.coords())?;
    select_k_nearest(&distances, k)
}
