//! Brute-force k-nearest-neighbour search over `(x, y, floor)` points.
//!
//! # Quick start
//!
//! ```
//! use kgrid_knn::{QueryPoints, ReferencePoints, knn_search};
//!
//! let reference = ReferencePoints::from_rows(&[
//!     [0.0, 0.0, 0.0, 7.0],
//!     [1.0, 1.0, 0.0, 2.0],
//!     [2.0, 2.0, 0.0, 5.0],
//!     [1.0, 1.0, 1.0, 6.0],
//! ])
//! .unwrap();
//! let queries = QueryPoints::from_rows(&[[0.0, 0.0, 1.0]]).unwrap();
//!
//! let nn = knn_search(&queries, &reference, 2).unwrap();
//! let mut row = nn.row(0).to_vec();
//! row.sort_unstable();
//! assert_eq!(row, vec![0, 3]);
//! ```
//!
//! # Architecture
//!
//! ```text
//! knn_search()
//!   ├─ KnnConfig::validate()
//!   ├─ pairwise_distances()   (distance.rs)
//!   └─ select_k_nearest()     (select.rs)
//! ```
//!
//! Selection is partial: each row of [`NeighborIndices`] holds the right
//! set of indices but not in ascending distance order.

pub mod config;
pub mod distance;
pub mod error;
pub mod knn;
pub mod points;
pub mod result;
pub mod select;

pub use config::{DEFAULT_K, KnnConfig};
pub use distance::{DistanceMatrix, pairwise_distances};
pub use error::KnnError;
pub use knn::knn_search;
pub use points::{QueryPoints, ReferencePoints, SPATIAL_DIMS};
pub use result::NeighborIndices;
pub use select::select_k_nearest;
