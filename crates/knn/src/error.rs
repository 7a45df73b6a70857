//! Error types for the kgrid-knn crate.

/// Error type for all fallible operations in the kgrid-knn crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum KnnError {
    /// Returned when k is zero or exceeds the number of reference points.
    #[error("k must be in 1..={n_references}, got {k}")]
    InvalidK {
        /// The requested k.
        k: usize,
        /// Number of reference points available.
        n_references: usize,
    },

    /// Returned when a flat coordinate buffer does not hold whole rows.
    #[error("{input} length {len} is not divisible by {dims} coordinates")]
    ShapeMismatch {
        /// Name of the offending input.
        input: &'static str,
        /// Length of the flat buffer.
        len: usize,
        /// Expected number of coordinates per point.
        dims: usize,
    },

    /// Returned when reference coordinates and prices disagree in length.
    #[error("{coords} reference coordinates but {prices} prices")]
    PriceLengthMismatch {
        /// Number of reference points implied by the coordinate buffer.
        coords: usize,
        /// Length of the price vector.
        prices: usize,
    },

    /// Returned when an input contains NaN or infinity.
    #[error("non-finite value in {input}")]
    NonFiniteInput {
        /// Name of the input containing the non-finite value.
        input: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_invalid_k() {
        let e = KnnError::InvalidK {
            k: 5,
            n_references: 4,
        };
        assert_eq!(e.to_string(), "k must be in 1..=4, got 5");
    }

    #[test]
    fn error_shape_mismatch() {
        let e = KnnError::ShapeMismatch {
            input: "queries",
            len: 10,
            dims: 3,
        };
        assert_eq!(
            e.to_string(),
            "queries length 10 is not divisible by 3 coordinates"
        );
    }

    #[test]
    fn error_price_length_mismatch() {
        let e = KnnError::PriceLengthMismatch {
            coords: 4,
            prices: 3,
        };
        assert_eq!(e.to_string(), "4 reference coordinates but 3 prices");
    }

    #[test]
    fn error_non_finite_input() {
        let e = KnnError::NonFiniteInput { input: "prices" };
        assert_eq!(e.to_string(), "non-finite value in prices");
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<KnnError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<KnnError>();
    }
}
