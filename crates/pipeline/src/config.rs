//! Configuration for grid construction and batched interpolation.

use kgrid_knn::{DEFAULT_K, KnnError};

use crate::error::PipelineError;

/// Configuration of the query grid.
///
/// The grid spans `[-limit, limit]` on both axes with `n_points` points per
/// axis, all on the same floor.
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    /// Points per axis.
    n_points: usize,
    /// Half-width of the symmetric coordinate range.
    limit: f64,
    /// Floor assigned to every query point.
    floor: f64,
}

impl GridConfig {
    /// Creates a new grid configuration.
    ///
    /// Defaults: `n_points = 10`, `limit = 10.0`, `floor = 1`.
    pub fn new() -> Self {
        Self {
            n_points: 10,
            limit: 10.0,
            floor: 1.0,
        }
    }

    /// Sets the number of points per axis.
    pub fn with_n_points(mut self, n_points: usize) -> Self {
        self.n_points = n_points;
        self
    }

    /// Sets the half-width of the coordinate range.
    pub fn with_limit(mut self, limit: f64) -> Self {
        self.limit = limit;
        self
    }

    /// Sets the floor of every query point.
    pub fn with_floor(mut self, floor: f64) -> Self {
        self.floor = floor;
        self
    }

    /// Returns the number of points per axis.
    pub fn n_points(&self) -> usize {
        self.n_points
    }

    /// Returns the half-width of the coordinate range.
    pub fn limit(&self) -> f64 {
        self.limit
    }

    /// Returns the floor.
    pub fn floor(&self) -> f64 {
        self.floor
    }

    /// Validates this configuration.
    ///
    /// Returns [`PipelineError::InvalidGrid`] if `limit` is not finite and
    /// positive or `floor` is not finite.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if !self.limit.is_finite() || self.limit <= 0.0 {
            return Err(PipelineError::InvalidGrid {
                reason: format!("limit must be finite and positive, got {}", self.limit),
            });
        }
        if !self.floor.is_finite() {
            return Err(PipelineError::InvalidGrid {
                reason: format!("floor must be finite, got {}", self.floor),
            });
        }
        Ok(())
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration for a batched interpolation run.
///
/// # Example
///
/// ```
/// use kgrid_pipeline::PipelineConfig;
///
/// let config = PipelineConfig::new().with_k(4).with_batch_size(10);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Neighbours averaged per query.
    k: usize,
    /// Maximum queries per dispatched batch.
    batch_size: usize,
    /// Worker threads; 0 lets rayon choose.
    n_workers: usize,
}

impl PipelineConfig {
    /// Creates a new configuration.
    ///
    /// Defaults: `k = 4`, `batch_size = 1024`, `n_workers = 0` (one per core).
    pub fn new() -> Self {
        Self {
            k: DEFAULT_K,
            batch_size: 1024,
            n_workers: 0,
        }
    }

    /// Sets the number of neighbours.
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    /// Sets the batch size.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Sets the number of worker threads.
    pub fn with_n_workers(mut self, n_workers: usize) -> Self {
        self.n_workers = n_workers;
        self
    }

    /// Returns the number of neighbours.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Returns the batch size.
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Returns the number of worker threads.
    pub fn n_workers(&self) -> usize {
        self.n_workers
    }

    /// Validates the parts of this configuration that do not depend on data.
    ///
    /// k is checked against the reference set size at run time.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.k == 0 {
            return Err(KnnError::InvalidK {
                k: 0,
                n_references: 0,
            }
            .into());
        }
        if self.batch_size == 0 {
            return Err(PipelineError::InvalidBatchSize { batch_size: 0 });
        }
        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new()
    }
}
