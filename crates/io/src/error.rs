//! Error types for kgrid-io.

use std::path::PathBuf;

use kgrid_knn::KnnError;

/// Error type for all fallible operations in the kgrid-io crate.
///
/// Covers file-system failures, Parquet/Arrow errors, schema problems and
/// point sets that fail validation after loading.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps an error originating from the Parquet or Arrow libraries.
    #[error("parquet error: {reason}")]
    Parquet {
        /// Description of the underlying failure.
        reason: String,
    },

    /// Returned when one or more validation checks fail.
    #[error("{count} validation error(s): {details}")]
    Validation {
        /// Number of accumulated validation failures.
        count: usize,
        /// Human-readable summary of the failures.
        details: String,
    },

    /// Returned when a required column is not present in a file.
    #[error("column '{name}' not found in {}", path.display())]
    MissingColumn {
        /// Name of the missing column.
        name: String,
        /// Path to the file that was inspected.
        path: PathBuf,
    },

    /// Returned when loaded data does not form a valid point set.
    #[error(transparent)]
    Points(#[from] KnnError),
}

impl From<parquet::errors::ParquetError> for IoError {
    fn from(e: parquet::errors::ParquetError) -> Self {
        IoError::Parquet {
            reason: e.to_string(),
        }
    }
}

impl From<arrow::error::ArrowError> for IoError {
    fn from(e: arrow::error::ArrowError) -> Self {
        IoError::Parquet {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_file_not_found() {
        let err = IoError::FileNotFound {
            path: PathBuf::from("/tmp/missing.parquet"),
        };
        assert_eq!(err.to_string(), "file not found: /tmp/missing.parquet");
    }

    #[test]
    fn display_parquet() {
        let err = IoError::Parquet {
            reason: "corrupt footer".to_string(),
        };
        assert_eq!(err.to_string(), "parquet error: corrupt footer");
    }

    #[test]
    fn display_validation() {
        let err = IoError::Validation {
            count: 2,
            details: "x has nulls; price has nulls".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "2 validation error(s): x has nulls; price has nulls"
        );
    }

    #[test]
    fn display_missing_column() {
        let err = IoError::MissingColumn {
            name: "price".to_string(),
            path: PathBuf::from("/data/data.parquet"),
        };
        assert_eq!(
            err.to_string(),
            "column 'price' not found in /data/data.parquet"
        );
    }

    #[test]
    fn from_knn_error() {
        let err: IoError = KnnError::NonFiniteInput { input: "prices" }.into();
        assert!(matches!(err, IoError::Points(_)));
        assert_eq!(err.to_string(), "non-finite value in prices");
    }

    #[test]
    fn from_parquet_error() {
        let pq_err = parquet::errors::ParquetError::General("test pq error".to_string());
        let err: IoError = pq_err.into();
        assert!(matches!(err, IoError::Parquet { .. }));
        assert!(err.to_string().contains("test pq error"));
    }

    #[test]
    fn from_arrow_error() {
        let err: IoError = arrow::error::ArrowError::CastError("bad cast".to_string()).into();
        assert!(matches!(err, IoError::Parquet { .. }));
        assert!(err.to_string().contains("bad cast"));
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<IoError>();
    }
}
