//! Configuration for k-nearest-neighbour queries.

use crate::error::KnnError;

/// Default number of neighbours averaged per query.
pub const DEFAULT_K: usize = 4;

/// Configuration for a k-nearest-neighbour query.
///
/// # Example
///
/// ```
/// use kgrid_knn::KnnConfig;
///
/// let config = KnnConfig::new(3);
/// assert!(config.validate(10).is_ok());
/// assert!(config.validate(2).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnnConfig {
    /// Number of nearest neighbours to select.
    k: usize,
}

impl KnnConfig {
    /// Creates a new configuration with the given k.
    pub fn new(k: usize) -> Self {
        Self { k }
    }

    /// Sets the number of neighbours.
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    /// Returns the number of nearest neighbours.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Validates this configuration against a reference set of
    /// `n_references` points.
    ///
    /// Returns [`KnnError::InvalidK`] if k < 1 or k > `n_references`.
    pub fn validate(&self, n_references: usize) -> Result<(), KnnError> {
        if self.k < 1 || self.k > n_references {
            return Err(KnnError::InvalidK {
                k: self.k,
                n_references,
            });
        }
        Ok(())
    }
}

impl Default for KnnConfig {
    fn default() -> Self {
        Self::new(DEFAULT_K)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(KnnConfig::default().k(), 4);
    }

    #[test]
    fn test_builder() {
        assert_eq!(KnnConfig::default().with_k(7).k(), 7);
    }

    #[test]
    fn test_validate_ok() {
        assert!(KnnConfig::new(4).validate(4).is_ok());
        assert!(KnnConfig::new(1).validate(100).is_ok());
    }

    #[test]
    fn test_validate_zero_k() {
        let err = KnnConfig::new(0).validate(10).unwrap_err();
        assert!(
            matches!(err, KnnError::InvalidK { k: 0, .. }),
            "expected InvalidK, got {err:?}"
        );
    }

    #[test]
    fn test_validate_k_exceeds_reference() {
        let err = KnnConfig::new(5).validate(4).unwrap_err();
        assert_eq!(
            err,
            KnnError::InvalidK {
                k: 5,
                n_references: 4
            }
        );
    }

    #[test]
    fn test_validate_empty_reference() {
        assert!(KnnConfig::default().validate(0).is_err());
    }
}
