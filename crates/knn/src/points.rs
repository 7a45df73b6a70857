//! Query and reference point sets.
//!
//! Both sets store spatial coordinates as a flat row-major `[n × 3]` buffer
//! of `(x, y, floor)`. Reference points keep their prices in a separate
//! vector so that no caller ever slices attributes out of coordinate rows.

use crate::error::KnnError;

/// Number of spatial coordinates per point: x, y, floor.
pub const SPATIAL_DIMS: usize = 3;

/// Checks that `coords` holds whole `(x, y, floor)` rows of finite values.
///
/// Returns the number of rows.
pub(crate) fn check_coords(coords: &[f64], input: &'static str) -> Result<usize, KnnError> {
    if !coords.len().is_multiple_of(SPATIAL_DIMS) {
        return Err(KnnError::ShapeMismatch {
            input,
            len: coords.len(),
            dims: SPATIAL_DIMS,
        });
    }
    if coords.iter().any(|v| !v.is_finite()) {
        return Err(KnnError::NonFiniteInput { input });
    }
    Ok(coords.len() / SPATIAL_DIMS)
}

/// Points at which a price estimate is wanted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryPoints {
    coords: Vec<f64>,
}

impl QueryPoints {
    /// Creates a query set from a flat row-major `[n × 3]` buffer.
    ///
    /// # Errors
    ///
    /// Returns [`KnnError::ShapeMismatch`] if the buffer does not hold whole
    /// rows, or [`KnnError::NonFiniteInput`] on NaN/infinity.
    pub fn new(coords: Vec<f64>) -> Result<Self, KnnError> {
        check_coords(&coords, "queries")?;
        Ok(Self { coords })
    }

    /// Creates a query set from `(x, y, floor)` rows.
    pub fn from_rows(rows: &[[f64; SPATIAL_DIMS]]) -> Result<Self, KnnError> {
        Self::new(rows.iter().flatten().copied().collect())
    }

    /// Number of query points.
    pub fn len(&self) -> usize {
        self.coords.len() / SPATIAL_DIMS
    }

    /// Returns `true` if there are no query points.
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// The flat row-major coordinate buffer.
    pub fn coords(&self) -> &[f64] {
        &self.coords
    }

    /// Coordinates of query `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.len()`.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.coords[i * SPATIAL_DIMS..(i + 1) * SPATIAL_DIMS]
    }

    /// Iterates over `(x, y, floor)` rows in order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[f64]> + '_ {
        self.coords.chunks_exact(SPATIAL_DIMS)
    }
}

/// Known prices at known locations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferencePoints {
    /// Flat row-major `[n × 3]` spatial coordinates.
    coords: Vec<f64>,
    /// One price per reference point.
    prices: Vec<f64>,
}

impl ReferencePoints {
    /// Creates a reference set from spatial coordinates and matching prices.
    ///
    /// # Errors
    ///
    /// Returns [`KnnError::ShapeMismatch`], [`KnnError::PriceLengthMismatch`]
    /// or [`KnnError::NonFiniteInput`] when the inputs are inconsistent.
    pub fn new(coords: Vec<f64>, prices: Vec<f64>) -> Result<Self, KnnError> {
        let n = check_coords(&coords, "reference")?;
        if prices.len() != n {
            return Err(KnnError::PriceLengthMismatch {
                coords: n,
                prices: prices.len(),
            });
        }
        if prices.iter().any(|v| !v.is_finite()) {
            return Err(KnnError::NonFiniteInput { input: "prices" });
        }
        Ok(Self { coords, prices })
    }

    /// Creates a reference set from `(x, y, floor, price)` rows.
    pub fn from_rows(rows: &[[f64; 4]]) -> Result<Self, KnnError> {
        let coords = rows.iter().flat_map(|r| [r[0], r[1], r[2]]).collect();
        let prices = rows.iter().map(|r| r[3]).collect();
        Self::new(coords, prices)
    }

    /// Number of reference points.
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Returns `true` if there are no reference points.
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// The flat row-major spatial coordinate buffer.
    pub fn coords(&self) -> &[f64] {
        &self.coords
    }

    /// Prices, one per reference point.
    pub fn prices(&self) -> &[f64] {
        &self.prices
    }

    /// Coordinates of reference point `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.len()`.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.coords[i * SPATIAL_DIMS..(i + 1) * SPATIAL_DIMS]
    }
}
