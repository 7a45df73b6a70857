//! # kgrid-io
//!
//! Read reference datasets from Parquet and write reference datasets or
//! interpolated price grids back out. Bridges the columnar `x, y, floor,
//! price` layout into the flat `&[f64]` point sets used by kgrid-knn.

mod error;
mod parquet_read;
mod parquet_write;
mod reader;
mod writer;

pub use error::IoError;
pub use reader::read_reference_points;
pub use writer::{Compression, WriterConfig, write_price_grid, write_reference_points};
