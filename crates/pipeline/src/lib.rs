//! # kgrid-pipeline
//!
//! Batched k-nearest-neighbour price interpolation over a city grid.
//!
//! ## Pipeline
//!
//! ```text
//! create_query_points()          (grid.rs)
//!   └─ Orchestrator::interpolate()   (orchestrate.rs)
//!        ├─ split_into_batches()     (batch.rs)
//!        ├─ per batch, on the pool:
//!        │    compute_prices()       (aggregate.rs)
//!        │      ├─ pairwise_distances()
//!        │      ├─ select_k_nearest()
//!        │      └─ mean of neighbour prices
//!        └─ concatenate in batch order
//! ```
//!
//! The reference set is shared read-only by every batch task; batches
//! never see each other's intermediate state.

mod aggregate;
mod batch;
mod config;
mod error;
mod grid;
mod orchestrate;

pub use aggregate::compute_prices;
pub use batch::{Batch, split_into_batches};
pub use config::{GridConfig, PipelineConfig};
pub use error::PipelineError;
pub use grid::{create_grid, create_query_points, linspace};
pub use orchestrate::{Orchestrator, interpolate_unbatched};
