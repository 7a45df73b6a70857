//! High-level Parquet reading into point sets.

use std::path::Path;

use kgrid_knn::ReferencePoints;
use tracing::{debug, info};

use crate::error::IoError;
use crate::parquet_read;

/// Read a reference dataset from a Parquet file.
///
/// Columns `x`, `y`, `floor` and `price` are located by name and widened to
/// `f64`; any other columns are ignored. Files produced by both
/// [`write_reference_points`](crate::write_reference_points) and
/// [`write_price_grid`](crate::write_price_grid) are accepted.
///
/// # Errors
///
/// - [`IoError::FileNotFound`] if `path` does not exist.
/// - [`IoError::MissingColumn`] if a required column is absent.
/// - [`IoError::Validation`] if a column contains nulls.
/// - [`IoError::Points`] if a value is non-finite.
/// - [`IoError::Parquet`] for any other read or cast failure.
pub fn read_reference_points(path: &Path) -> Result<ReferencePoints, IoError> {
    let batches = parquet_read::read_batches(path)?;
    debug!(path = %path.display(), n_batches = batches.len(), "read record batches");

    let columns = parquet_read::extract_points(&batches, path)?;
    let reference = ReferencePoints::new(columns.coords, columns.prices)?;

    info!(path = %path.display(), n_points = reference.len(), "loaded reference points");
    Ok(reference)
}
