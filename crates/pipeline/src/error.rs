//! Error types for the kgrid-pipeline crate.

use kgrid_knn::KnnError;

/// Error type for all fallible operations in the kgrid-pipeline crate.
///
/// Validation failures raised before any work is dispatched surface
/// directly; failures inside a dispatched batch are wrapped with the index
/// of the batch that raised them.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PipelineError {
    /// Returned when the batch size is zero.
    #[error("batch size must be >= 1, got {batch_size}")]
    InvalidBatchSize {
        /// The invalid batch size.
        batch_size: usize,
    },

    /// Returned when the query grid parameters are unusable.
    #[error("invalid grid: {reason}")]
    InvalidGrid {
        /// Description of the problem.
        reason: String,
    },

    /// kNN validation error raised before dispatch.
    #[error(transparent)]
    Knn(#[from] KnnError),

    /// Returned when a dispatched batch task fails.
    #[error("batch {batch} failed: {source}")]
    TaskFailed {
        /// Index of the failing batch.
        batch: usize,
        /// Underlying failure.
        #[source]
        source: KnnError,
    },

    /// Returned when a dispatched batch task panics.
    #[error("batch {batch} panicked: {reason}")]
    TaskPanicked {
        /// Index of the panicking batch.
        batch: usize,
        /// Panic payload, if it was a string.
        reason: String,
    },

    /// Returned when a batch finished without reporting a result.
    #[error("batch {batch} returned no result")]
    MissingResult {
        /// Index of the silent batch.
        batch: usize,
    },

    /// Returned when the worker pool cannot be built.
    #[error("worker pool error: {reason}")]
    WorkerPool {
        /// Description of the pool failure.
        reason: String,
    },
}

impl PipelineError {
    /// Index of the batch that failed, if the error came from a dispatched task.
    pub fn batch(&self) -> Option<usize> {
        match self {
            Self::TaskFailed { batch, .. }
            | Self::TaskPanicked { batch, .. }
            | Self::MissingResult { batch } => Some(*batch),
            _ => None,
        }
    }
}
