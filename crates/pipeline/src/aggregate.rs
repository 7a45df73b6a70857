//! Price estimation by averaging the k nearest reference prices.

use kgrid_knn::{
    KnnConfig, KnnError, NeighborIndices, ReferencePoints, pairwise_distances, select_k_nearest,
};

/// Estimates one price per query as the mean price of its `k` nearest
/// reference points.
///
/// `queries` is a flat row-major `[n × 3]` buffer, typically one batch. The
/// returned vector has one entry per query, in query order. When several
/// reference points tie at the k-th distance the selector decides which of
/// them contribute, so prices at such points are only defined up to that
/// choice.
///
/// # Errors
///
/// Returns [`KnnError::InvalidK`] if `k` is zero or exceeds the reference
/// set, or [`KnnError::ShapeMismatch`] if `queries` does not hold whole rows.
pub fn compute_prices(
    queries: &[f64],
    reference: &ReferencePoints,
    k: usize,
) -> Result<Vec<f64>, KnnError> {
    KnnConfig::new(k).validate(reference.len())?;
    let distances = pairwise_distances(queries, reference.coords())?;
    let neighbors = select_k_nearest(&distances, k)?;
    Ok(mean_prices(&neighbors, reference.prices()))
}

fn mean_prices(neighbors: &NeighborIndices, prices: &[f64]) -> Vec<f64> {
    let k = neighbors.k() as f64;
    neighbors
        .rows()
        .map(|row| row.iter().map(|&i| prices[i]).sum::<f64>() / k)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn reference() -> ReferencePoints {
        ReferencePoints::from_rows(&[
            [0.0, 0.0, 0.0, 7.0],
            [1.0, 1.0, 0.0, 2.0],
            [2.0, 2.0, 0.0, 5.0],
            [1.0, 1.0, 1.0, 6.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_known_prices() {
        let queries = [0.0, 0.0, 1.0, 3.0, 3.0, 3.0];
        let prices = compute_prices(&queries, &reference(), 2).unwrap();
        assert_eq!(prices.len(), 2);
        // [0,0,1]: indices 0 and 3 at distance 1 -> (7 + 6) / 2
        assert_abs_diff_eq!(prices[0], 6.5, epsilon = 1e-12);
        // [3,3,3]: index 2 (sqrt 11) and 3 (sqrt 12) -> (5 + 6) / 2
        assert_abs_diff_eq!(prices[1], 5.5, epsilon = 1e-12);
    }

    #[test]
    fn test_k1_is_nearest_price() {
        let prices = compute_prices(&[1.0, 1.0, 1.0], &reference(), 1).unwrap();
        assert_eq!(prices, vec![6.0]);
    }

    #[test]
    fn test_k_equals_n_is_global_mean() {
        let prices = compute_prices(&[100.0, -3.0, 2.0], &reference(), 4).unwrap();
        assert_abs_diff_eq!(prices[0], 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_batch() {
        let prices = compute_prices(&[], &reference(), 2).unwrap();
        assert!(prices.is_empty());
    }

    #[test]
    fn test_k_too_large() {
        let err = compute_prices(&[0.0, 0.0, 0.0], &reference(), 5).unwrap_err();
        assert_eq!(
            err,
            KnnError::InvalidK {
                k: 5,
                n_references: 4
            }
        );
    }

    #[test]
    fn test_identical_reference_prices_are_stable() {
        // Tied neighbours share a price, so the tie-break cannot change the mean.
        let reference = ReferencePoints::from_rows(&[
            [1.0, 0.0, 0.0, 4.0],
            [-1.0, 0.0, 0.0, 4.0],
            [0.0, 5.0, 0.0, 100.0],
        ])
        .unwrap();
        let prices = compute_prices(&[0.0, 0.0, 0.0], &reference, 1).unwrap();
        assert_eq!(prices, vec![4.0]);
    }
}
