//! Splitting query sets into fixed-size batches.

use std::ops::Range;

use kgrid_knn::{QueryPoints, SPATIAL_DIMS};

use crate::error::PipelineError;

/// A contiguous run of query points processed as one unit of work.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Batch<'a> {
    /// Position of this batch in submission order.
    index: usize,
    /// Index of the first query of this batch in the full query set.
    offset: usize,
    /// Flat row-major `[len × 3]` coordinates of this batch's queries.
    coords: &'a [f64],
}

impl<'a> Batch<'a> {
    /// Position of this batch in submission order.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Index of the first query in the full query set.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of queries in this batch.
    pub fn len(&self) -> usize {
        self.coords.len() / SPATIAL_DIMS
    }

    /// Returns `true` if this batch holds no queries.
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Range of query indices covered by this batch.
    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.len()
    }

    /// The batch's flat coordinate buffer.
    pub fn coords(&self) -> &'a [f64] {
        self.coords
    }
}

/// Splits `queries` into `ceil(len / batch_size)` ordered, disjoint batches.
///
/// Every batch except possibly the last holds exactly `batch_size` queries.
/// An empty query set yields no batches.
///
/// # Errors
///
/// Returns [`PipelineError::InvalidBatchSize`] if `batch_size == 0`.
pub fn split_into_batches(
    queries: &QueryPoints,
    batch_size: usize,
) -> Result<Vec<Batch<'_>>, PipelineError> {
    if batch_size == 0 {
        return Err(PipelineError::InvalidBatchSize { batch_size });
    }

    // a batch never holds more than the whole set, so neither product below
    // can exceed the coordinate buffer length
    let rows = batch_size.min(queries.len().max(1));

    Ok(queries
        .coords()
        .chunks(rows * SPATIAL_DIMS)
        .enumerate()
        .map(|(index, coords)| Batch {
            index,
            offset: index * rows,
            coords,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queries(n: usize) -> QueryPoints {
        let coords = (0..n).flat_map(|i| [i as f64, -(i as f64), 1.0]).collect();
        QueryPoints::new(coords).unwrap()
    }

    #[test]
    fn test_batch_counts() {
        // (points, batch_size, n_batches, last_batch_size)
        for &(p, b, n, last) in &[
            (99, 10, 10, 9),
            (100, 10, 10, 10),
            (101, 10, 11, 1),
            (1, 1, 1, 1),
            (7, 100, 1, 7),
        ] {
            let q = queries(p);
            let batches = split_into_batches(&q, b).unwrap();
            assert_eq!(batches.len(), n, "points={p} batch_size={b}");
            for batch in &batches[..n - 1] {
                assert_eq!(batch.len(), b);
            }
            assert_eq!(batches[n - 1].len(), last);
        }
    }

    #[test]
    fn test_empty_input_has_no_batches() {
        let points = QueryPoints::default();
        let batches = split_into_batches(&points, 10).unwrap();
        assert!(batches.is_empty());
    }

    #[test]
    fn test_zero_batch_size() {
        let err = split_into_batches(&queries(3), 0).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::InvalidBatchSize { batch_size: 0 }
        ));
    }

    #[test]
    fn test_concatenation_reproduces_input() {
        let q = queries(23);
        let batches = split_into_batches(&q, 4).unwrap();
        let joined: Vec<f64> = batches.iter().flat_map(|b| b.coords()).copied().collect();
        assert_eq!(joined, q.coords());
    }

    #[test]
    fn test_indices_offsets_and_ranges() {
        let q = queries(10);
        let batches = split_into_batches(&q, 3).unwrap();
        let ranges: Vec<_> = batches.iter().map(Batch::range).collect();
        assert_eq!(ranges, vec![0..3, 3..6, 6..9, 9..10]);
        for (i, b) in batches.iter().enumerate() {
            assert_eq!(b.index(), i);
            assert_eq!(b.offset(), i * 3);
            assert_eq!(b.coords()[0], b.offset() as f64);
        }
    }

    #[test]
    fn test_huge_batch_size_is_one_batch() {
        let q = queries(3);
        for b in [usize::MAX / 3 + 1, usize::MAX] {
            let batches = split_into_batches(&q, b).unwrap();
            assert_eq!(batches.len(), 1, "batch_size={b}");
            assert_eq!(batches[0].len(), 3);
            assert_eq!(batches[0].range(), 0..3);
            assert_eq!(batches[0].coords(), q.coords());
        }
    }

    #[test]
    fn test_huge_batch_size_on_empty_input() {
        let points = QueryPoints::default();
        let batches = split_into_batches(&points, usize::MAX).unwrap();
        assert!(batches.is_empty());
    }

    #[test]
    fn test_batch_size_one() {
        let q = queries(5);
        let batches = split_into_batches(&q, 1).unwrap();
        assert_eq!(batches.len(), 5);
        assert!(batches.iter().all(|b| b.len() == 1));
    }
}
