//! Low-level Parquet column building.

use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int32Array, RecordBatch};
use arrow::datatypes::{DataType, Field, Schema};
use parquet::arrow::ArrowWriter;
use parquet::file::properties::WriterProperties;

use crate::error::IoError;

/// Column names shared by reference files and price grids, in order.
pub(crate) const COLUMNS: [&str; 4] = ["x", "y", "floor", "price"];

/// Builds the Arrow schema for `x, y, floor, price` tables.
///
/// Reference files store whole floors (`Int32`); price grids keep the query
/// floor as `Float64`.
pub(crate) fn build_schema(floor_type: DataType) -> Schema {
    Schema::new(vec![
        Field::new(COLUMNS[0], DataType::Float64, false),
        Field::new(COLUMNS[1], DataType::Float64, false),
        Field::new(COLUMNS[2], floor_type, false),
        Field::new(COLUMNS[3], DataType::Float64, false),
    ])
}

/// Converts flat `(x, y, floor)` coordinates and prices into a
/// [`RecordBatch`] matching `schema`.
///
/// The floor column is emitted with the type declared in `schema`; integer
/// floors are rounded.
pub(crate) fn points_to_record_batch(
    coords: &[f64],
    prices: &[f64],
    schema: &Schema,
) -> Result<RecordBatch, IoError> {
    let mut x = Vec::with_capacity(prices.len());
    let mut y = Vec::with_capacity(prices.len());
    let mut floor = Vec::with_capacity(prices.len());
    for row in coords.chunks_exact(3) {
        x.push(row[0]);
        y.push(row[1]);
        floor.push(row[2]);
    }

    let floor_col: ArrayRef = match schema.field(2).data_type() {
        DataType::Int32 => Arc::new(Int32Array::from(
            floor.iter().map(|f| f.round() as i32).collect::<Vec<_>>(),
        )),
        _ => Arc::new(Float64Array::from(floor)),
    };

    let columns: Vec<ArrayRef> = vec![
        Arc::new(Float64Array::from(x)),
        Arc::new(Float64Array::from(y)),
        floor_col,
        Arc::new(Float64Array::from(prices.to_vec())),
    ];

    Ok(RecordBatch::try_new(Arc::new(schema.clone()), columns)?)
}

/// Writes a single [`RecordBatch`] to a Parquet file at `path`.
///
/// # Errors
///
/// Returns [`IoError::Parquet`] if file creation, batch writing, or file
/// finalisation fails.
pub(crate) fn write_batch(
    path: &Path,
    batch: &RecordBatch,
    props: WriterProperties,
) -> Result<(), IoError> {
    let file = std::fs::File::create(path).map_err(|e| IoError::Parquet {
        reason: e.to_string(),
    })?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))?;
    writer.write(batch)?;
    writer.close()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use arrow::array::AsArray;
    use arrow::datatypes::{Float64Type, Int32Type};

    use super::*;

    #[test]
    fn schema_column_names() {
        let schema = build_schema(DataType::Int32);
        assert_eq!(schema.fields().len(), 4);
        for (i, name) in COLUMNS.iter().enumerate() {
            assert_eq!(schema.field(i).name(), name);
        }
        assert_eq!(schema.field(2).data_type(), &DataType::Int32);
    }

    #[test]
    fn record_batch_integer_floor() {
        let coords = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let prices = [100.0, 200.0];
        let schema = build_schema(DataType::Int32);
        let batch = points_to_record_batch(&coords, &prices, &schema).unwrap();

        assert_eq!(batch.num_rows(), 2);
        assert_eq!(batch.num_columns(), 4);
        let floor = batch.column(2).as_primitive::<Int32Type>();
        assert_eq!(floor.values(), &[2, 5]);
    }

    #[test]
    fn record_batch_float_floor() {
        let coords = [0.0, 1.0, 1.0];
        let schema = build_schema(DataType::Float64);
        let batch = points_to_record_batch(&coords, &[42.0], &schema).unwrap();
        let floor = batch.column(2).as_primitive::<Float64Type>();
        assert_eq!(floor.value(0), 1.0);
        let price = batch.column(3).as_primitive::<Float64Type>();
        assert_eq!(price.value(0), 42.0);
    }

    #[test]
    fn record_batch_length_mismatch_is_error() {
        let schema = build_schema(DataType::Float64);
        let err = points_to_record_batch(&[0.0, 1.0, 1.0], &[1.0, 2.0], &schema).unwrap_err();
        assert!(matches!(err, IoError::Parquet { .. }));
    }
}
