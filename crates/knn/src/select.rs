//! Top-k nearest neighbour selection.

use crate::distance::DistanceMatrix;
use crate::error::KnnError;
use crate::result::NeighborIndices;

/// Selects the `k` nearest reference points for every query.
///
/// Uses `select_nth_unstable_by` (introselect) on `(distance, index)` pairs,
/// so each query costs O(N) rather than a full O(N log N) sort. Only the
/// partition boundary is exact: the returned `k` indices are the `k`
/// smallest distances, in no particular order. Exact ties at the boundary
/// are broken deterministically by the selection algorithm.
///
/// # Errors
///
/// Returns [`KnnError::InvalidK`] if `k == 0` or `k > n_references`. An
/// empty query set with a valid `k` yields an empty result.
pub fn select_k_nearest(distances: &DistanceMatrix, k: usize) -> Result<NeighborIndices, KnnError> {
    let n_references = distances.n_references();
    if k == 0 || k > n_references {
        return Err(KnnError::InvalidK { k, n_references });
    }

    let mut indices = Vec::with_capacity(distances.n_queries() * k);
    let mut pairs: Vec<(f64, usize)> = Vec::with_capacity(n_references);

    for q in 0..distances.n_queries() {
        let row = distances.query_row(q);
        if k == n_references {
            indices.extend(0..n_references);
            continue;
        }

        pairs.clear();
        pairs.extend(row.iter().copied().enumerate().map(|(i, d)| (d, i)));

        // total_cmp keeps NaN ordering well-defined (sorted last)
        pairs.select_nth_unstable_by(k - 1, |a, b| a.0.total_cmp(&b.0));
        indices.extend(pairs[..k].iter().map(|&(_, i)| i));
    }

    Ok(NeighborIndices::new(indices, k))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::pairwise_distances;

    fn sorted(row: &[usize]) -> Vec<usize> {
        let mut v = row.to_vec();
        v.sort_unstable();
        v
    }

    /// One query at the origin against points on the x axis.
    fn axis_matrix(xs: &[f64]) -> DistanceMatrix {
        let reference: Vec<f64> = xs.iter().flat_map(|&x| [x, 0.0, 0.0]).collect();
        pairwise_distances(&[0.0, 0.0, 0.0], &reference).unwrap()
    }

    #[test]
    fn test_k1_closest() {
        let nn = select_k_nearest(&axis_matrix(&[3.0, 1.0, 2.0]), 1).unwrap();
        assert_eq!(nn.row(0), &[1]);
    }

    #[test]
    fn test_k_equals_n_returns_all() {
        let nn = select_k_nearest(&axis_matrix(&[2.0, 1.0, 3.0, 0.0]), 4).unwrap();
        assert_eq!(sorted(nn.row(0)), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_returns_correct_set() {
        let nn = select_k_nearest(&axis_matrix(&[5.0, -1.0, 4.0, 0.5, -3.0, 2.0]), 3).unwrap();
        assert_eq!(sorted(nn.row(0)), vec![1, 3, 5]);
    }

    #[test]
    fn test_ties_pick_one_of_tied() {
        let nn = select_k_nearest(&axis_matrix(&[2.0, -2.0, 1.0]), 2).unwrap();
        let row = sorted(nn.row(0));
        assert!(row == vec![0, 2] || row == vec![1, 2], "got {row:?}");
    }

    #[test]
    fn test_deterministic() {
        let m = axis_matrix(&[1.0, -1.0, 1.0, -1.0, 2.0]);
        let a = select_k_nearest(&m, 2).unwrap();
        let b = select_k_nearest(&m, 2).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_k_zero_rejected() {
        let err = select_k_nearest(&axis_matrix(&[1.0]), 0).unwrap_err();
        assert_eq!(
            err,
            KnnError::InvalidK {
                k: 0,
                n_references: 1
            }
        );
    }

    #[test]
    fn test_k_above_n_rejected() {
        let err = select_k_nearest(&axis_matrix(&[1.0, 2.0]), 3).unwrap_err();
        assert_eq!(
            err,
            KnnError::InvalidK {
                k: 3,
                n_references: 2
            }
        );
    }

    #[test]
    fn test_empty_reference_is_invalid_k() {
        let m = pairwise_distances(&[0.0, 0.0, 0.0], &[]).unwrap();
        assert!(matches!(
            select_k_nearest(&m, 1),
            Err(KnnError::InvalidK { n_references: 0, .. })
        ));
    }

    #[test]
    fn test_no_queries() {
        let m = pairwise_distances(&[], &[0.0, 0.0, 0.0, 1.0, 1.0, 1.0]).unwrap();
        let nn = select_k_nearest(&m, 2).unwrap();
        assert_eq!(nn.n_queries(), 0);
        assert_eq!(nn.k(), 2);
    }

    #[test]
    fn test_multiple_queries_independent() {
        let reference = [0.0, 0.0, 0.0, 10.0, 0.0, 0.0, 20.0, 0.0, 0.0];
        let queries = [1.0, 0.0, 0.0, 19.0, 0.0, 0.0];
        let m = pairwise_distances(&queries, &reference).unwrap();
        let nn = select_k_nearest(&m, 1).unwrap();
        assert_eq!(nn.row(0), &[0]);
        assert_eq!(nn.row(1), &[2]);
    }
}
