//! Pairwise Euclidean distances between query and reference points.

use crate::error::KnnError;
use crate::points::SPATIAL_DIMS;

/// Euclidean distances between every reference point and every query point.
///
/// Stored query-major: row `m` holds the distances from query `m` to all
/// `n_references` reference points, so neighbour selection scans contiguous
/// memory. [`DistanceMatrix::get`] takes `(reference, query)` in that order.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    n_queries: usize,
    n_references: usize,
}

impl DistanceMatrix {
    /// Number of query points (columns in reference-major orientation).
    pub fn n_queries(&self) -> usize {
        self.n_queries
    }

    /// Number of reference points (rows in reference-major orientation).
    pub fn n_references(&self) -> usize {
        self.n_references
    }

    /// Returns `true` if either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Distance between reference point `reference` and query point `query`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn get(&self, reference: usize, query: usize) -> f64 {
        assert!(reference < self.n_references && query < self.n_queries);
        self.data[query * self.n_references + reference]
    }

    /// Distances from query `query` to every reference point.
    pub fn query_row(&self, query: usize) -> &[f64] {
        &self.data[query * self.n_references..(query + 1) * self.n_references]
    }

    /// Copies the matrix into a reference-major `[n_references × n_queries]`
    /// buffer.
    pub fn to_reference_major(&self) -> Vec<f64> {
        let mut out = vec![0.0; self.data.len()];
        for q in 0..self.n_queries {
            for (r, &d) in self.query_row(q).iter().enumerate() {
                out[r * self.n_queries + q] = d;
            }
        }
        out
    }
}

/// Computes Euclidean distances in `(x, y, floor)` space.
///
/// Both inputs are flat row-major buffers with three coordinates per point.
/// Either may be empty, in which case the result has the matching degenerate
/// shape.
///
/// # Errors
///
/// Returns [`KnnError::ShapeMismatch`] if either buffer does not hold whole
/// `(x, y, floor)` rows.
pub fn pairwise_distances(queries: &[f64], reference: &[f64]) -> Result<DistanceMatrix, KnnError> {
    let n_queries = rows_of(queries, "queries")?;
    let n_references = rows_of(reference, "reference")?;

    let mut data = vec![0.0; n_queries * n_references];
    if !data.is_empty() {
        for (q, out) in queries
            .chunks_exact(SPATIAL_DIMS)
            .zip(data.chunks_exact_mut(n_references))
        {
            euclidean_3d(reference, q, out);
        }
    }

    Ok(DistanceMatrix {
        data,
        n_queries,
        n_references,
    })
}

/// Shape-only check; finiteness is enforced by the point-set constructors.
fn rows_of(coords: &[f64], input: &'static str) -> Result<usize, KnnError> {
    if !coords.len().is_multiple_of(SPATIAL_DIMS) {
        return Err(KnnError::ShapeMismatch {
            input,
            len: coords.len(),
            dims: SPATIAL_DIMS,
        });
    }
    Ok(coords.len() / SPATIAL_DIMS)
}

#[inline]
fn euclidean_3d(reference: &[f64], target: &[f64], out: &mut [f64]) {
    let (t0, t1, t2) = (target[0], target[1], target[2]);
    for (o, r) in out.iter_mut().zip(reference.chunks_exact(SPATIAL_DIMS)) {
        let d0 = r[0] - t0;
        let d1 = r[1] - t1;
        let d2 = r[2] - t2;
        *o = (d0 * d0 + d1 * d1 + d2 * d2).sqrt();
    }
}
