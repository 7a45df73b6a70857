//! Low-level Parquet reading and column extraction.

use std::path::Path;

use arrow::array::{Array, AsArray, RecordBatch};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::error::IoError;
use crate::parquet_write::COLUMNS;

/// Columns of an `x, y, floor, price` table, widened to `f64`.
#[derive(Debug, Default)]
pub(crate) struct PointColumns {
    /// Flat row-major `[n × 3]` coordinates.
    pub coords: Vec<f64>,
    /// One price per row.
    pub prices: Vec<f64>,
}

/// Reads all record batches from a Parquet file.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if the file does not exist, or
/// [`IoError::Parquet`] if the file cannot be opened or read.
pub(crate) fn read_batches(path: &Path) -> Result<Vec<RecordBatch>, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let file = std::fs::File::open(path).map_err(|e| IoError::Parquet {
        reason: e.to_string(),
    })?;

    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let reader = builder.build()?;

    let batches: Vec<RecordBatch> = reader.collect::<Result<Vec<_>, _>>()?;
    Ok(batches)
}

/// Locates the `x, y, floor, price` columns of `batch` by name.
///
/// Extra columns are ignored; column order does not matter.
///
/// # Errors
///
/// Returns [`IoError::MissingColumn`] naming the first absent column.
pub(crate) fn column_indices(batch: &RecordBatch, path: &Path) -> Result<[usize; 4], IoError> {
    let schema = batch.schema();
    let mut out = [0; 4];
    for (slot, name) in out.iter_mut().zip(COLUMNS) {
        *slot = schema.index_of(name).map_err(|_| IoError::MissingColumn {
            name: name.to_string(),
            path: path.to_path_buf(),
        })?;
    }
    Ok(out)
}

/// Appends the rows of every batch to a single [`PointColumns`].
///
/// Each of the four columns is cast to `Float64`, so integer and float
/// floors are both accepted.
///
/// # Errors
///
/// Returns [`IoError::MissingColumn`] for an absent column,
/// [`IoError::Parquet`] if a column cannot be cast, or
/// [`IoError::Validation`] listing every column that contains nulls.
pub(crate) fn extract_points(
    batches: &[RecordBatch],
    path: &Path,
) -> Result<PointColumns, IoError> {
    let n_rows: usize = batches.iter().map(RecordBatch::num_rows).sum();
    let mut out = PointColumns {
        coords: Vec::with_capacity(n_rows * 3),
        prices: Vec::with_capacity(n_rows),
    };

    for batch in batches {
        let indices = column_indices(batch, path)?;

        let mut columns = Vec::with_capacity(4);
        let mut null_columns: Vec<String> = Vec::new();
        for (&i, name) in indices.iter().zip(COLUMNS) {
            let col = cast(batch.column(i), &DataType::Float64)?;
            if col.null_count() > 0 {
                null_columns.push(format!("{name} has {} null(s)", col.null_count()));
            }
            columns.push(col);
        }
        if !null_columns.is_empty() {
            return Err(IoError::Validation {
                count: null_columns.len(),
                details: null_columns.join("; "),
            });
        }

        let x = columns[0].as_primitive::<Float64Type>();
        let y = columns[1].as_primitive::<Float64Type>();
        let floor = columns[2].as_primitive::<Float64Type>();
        let price = columns[3].as_primitive::<Float64Type>();

        for row in 0..batch.num_rows() {
            out.coords.extend([x.value(row), y.value(row), floor.value(row)]);
            out.prices.push(price.value(row));
        }
    }

    Ok(out)
}
