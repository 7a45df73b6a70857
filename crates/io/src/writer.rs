//! High-level Parquet writer configuration and orchestration.

use std::path::Path;

use arrow::datatypes::DataType;
use kgrid_knn::{QueryPoints, ReferencePoints};
use parquet::file::properties::WriterProperties;
use tracing::info;

use crate::error::IoError;
use crate::parquet_write;

/// Compression algorithm for Parquet output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Compression {
    /// No compression.
    None,
    /// Snappy compression (fast, moderate ratio).
    #[default]
    Snappy,
    /// Zstd compression (slower, better ratio).
    Zstd,
}

impl Compression {
    /// Converts to the corresponding `parquet::basic::Compression` variant.
    fn to_parquet(self) -> Result<parquet::basic::Compression, IoError> {
        Ok(match self {
            Self::None => parquet::basic::Compression::UNCOMPRESSED,
            Self::Snappy => parquet::basic::Compression::SNAPPY,
            Self::Zstd => {
                let level =
                    parquet::basic::ZstdLevel::try_new(3).map_err(|e| IoError::Parquet {
                        reason: e.to_string(),
                    })?;
                parquet::basic::Compression::ZSTD(level)
            }
        })
    }
}

/// Configuration for writing point tables to Parquet.
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Compression algorithm to use.
    compression: Compression,
    /// Maximum number of rows per row group.
    row_group_size: usize,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            compression: Compression::default(),
            row_group_size: 1_000_000,
        }
    }
}

impl WriterConfig {
    /// Sets the compression algorithm.
    pub fn with_compression(mut self, comp: Compression) -> Self {
        self.compression = comp;
        self
    }

    /// Sets the maximum number of rows per row group.
    pub fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    /// Compression algorithm.
    pub fn compression(&self) -> Compression {
        self.compression
    }

    /// Maximum number of rows per row group.
    pub fn row_group_size(&self) -> usize {
        self.row_group_size
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if `row_group_size` is zero.
    pub fn validate(&self) -> Result<(), IoError> {
        if self.row_group_size == 0 {
            return Err(IoError::Validation {
                count: 1,
                details: "row_group_size must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    fn properties(&self) -> Result<WriterProperties, IoError> {
        Ok(WriterProperties::builder()
            .set_compression(self.compression.to_parquet()?)
            .set_max_row_group_size(self.row_group_size)
            .build())
    }
}

/// Write a reference dataset to a Parquet file.
///
/// Columns are `x`, `y`, `floor` (`Int32`) and `price`, one row per point.
///
/// # Errors
///
/// Returns [`IoError::Validation`] if the configuration is invalid, or
/// [`IoError::Parquet`] if batch conversion or file I/O fails.
pub fn write_reference_points(
    path: &Path,
    reference: &ReferencePoints,
    config: &WriterConfig,
) -> Result<(), IoError> {
    config.validate()?;

    let schema = parquet_write::build_schema(DataType::Int32);
    let batch =
        parquet_write::points_to_record_batch(reference.coords(), reference.prices(), &schema)?;
    parquet_write::write_batch(path, &batch, config.properties()?)?;

    info!(path = %path.display(), n_points = reference.len(), "wrote reference points");
    Ok(())
}

/// Write interpolated grid prices to a Parquet file.
///
/// Rows follow query order. The `floor` column stays `Float64` so fractional
/// query floors survive, and the file can be read back with
/// [`read_reference_points`](crate::read_reference_points).
///
/// # Errors
///
/// Returns [`IoError::Validation`] if the configuration is invalid or
/// `prices` does not have one entry per query, or [`IoError::Parquet`] if
/// batch conversion or file I/O fails.
pub fn write_price_grid(
    path: &Path,
    queries: &QueryPoints,
    prices: &[f64],
    config: &WriterConfig,
) -> Result<(), IoError> {
    config.validate()?;
    if prices.len() != queries.len() {
        return Err(IoError::Validation {
            count: 1,
            details: format!(
                "{} prices for {} query points",
                prices.len(),
                queries.len()
            ),
        });
    }

    let schema = parquet_write::build_schema(DataType::Float64);
    let batch = parquet_write::points_to_record_batch(queries.coords(), prices, &schema)?;
    parquet_write::write_batch(path, &batch, config.properties()?)?;

    info!(path = %path.display(), n_points = queries.len(), "wrote price grid");
    Ok(())
}
