//! Output type for k-nearest-neighbour queries.

/// Indices of the k nearest reference points for each query.
///
/// Row `m` holds `k` distinct indices into the reference set. The set of
/// indices is exact; their order within the row is not sorted by distance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborIndices {
    /// Flat row-major `[n_queries × k]` buffer.
    indices: Vec<usize>,
    /// Neighbours per query.
    k: usize,
}

impl NeighborIndices {
    /// Creates a new `NeighborIndices`.
    pub(crate) fn new(indices: Vec<usize>, k: usize) -> Self {
        debug_assert!(k > 0);
        debug_assert_eq!(indices.len() % k, 0);
        Self { indices, k }
    }

    /// Neighbours per query.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Number of queries.
    pub fn n_queries(&self) -> usize {
        self.indices.len() / self.k
    }

    /// Neighbour indices of query `m`.
    pub fn row(&self, m: usize) -> &[usize] {
        &self.indices[m * self.k..(m + 1) * self.k]
    }

    /// Iterates over per-query neighbour rows.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[usize]> + '_ {
        self.indices.chunks_exact(self.k)
    }

    /// The flat row-major index buffer.
    pub fn as_flat(&self) -> &[usize] {
        &self.indices
    }
}
