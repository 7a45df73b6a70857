//! Error types for kgrid-city.

use std::path::PathBuf;

use kgrid_knn::KnnError;

/// Errors produced while loading city definitions or sampling from them.
#[derive(Debug, thiserror::Error)]
pub enum CityError {
    /// The city definition file could not be read.
    #[error("failed to read city definition {}: {source}", path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The city definition is not valid JSON for [`CityParams`](crate::CityParams).
    #[error("invalid city definition: {0}")]
    Json(#[from] serde_json::Error),

    /// A parameter is outside its valid range.
    #[error("invalid city parameters: {reason}")]
    InvalidParams {
        /// Description of the violated constraint.
        reason: String,
    },

    /// Sampled points did not form a valid reference set.
    #[error(transparent)]
    Points(#[from] KnnError),
}
