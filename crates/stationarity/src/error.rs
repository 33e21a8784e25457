//! Error types for the demand-stationarity crate.

/// Error type for all fallible operations in the demand-stationarity crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StationarityError {
    /// Returned when the series is too short to run the regression.
    #[error("insufficient data: got {n} observations, need at least {min}")]
    InsufficientData {
        /// Number of observations provided.
        n: usize,
        /// Minimum number of observations required.
        min: usize,
    },

    /// Returned when the input contains NaN or infinite values.
    #[error("input data contains non-finite values")]
    NonFiniteData,

    /// Returned when the regression design matrix is rank deficient.
    #[error("regression design is singular")]
    SingularDesign,

    /// Returned when the regression leaves no residual variance.
    #[error("regression fits the data exactly; test statistic is undefined")]
    PerfectFit,

    /// Returned when the significance level is outside (0, 1).
    #[error("invalid significance level {alpha} (must be in (0, 1))")]
    InvalidAlpha {
        /// The rejected significance level.
        alpha: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_insufficient_data() {
        let err = StationarityError::InsufficientData { n: 3, min: 6 };
        assert_eq!(
            err.to_string(),
            "insufficient data: got 3 observations, need at least 6"
        );
    }

    #[test]
    fn error_singular_design() {
        assert_eq!(
            StationarityError::SingularDesign.to_string(),
            "regression design is singular"
        );
    }

    #[test]
    fn error_invalid_alpha() {
        let err = StationarityError::InvalidAlpha { alpha: 1.5 };
        assert_eq!(
            err.to_string(),
            "invalid significance level 1.5 (must be in (0, 1))"
        );
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<StationarityError>();
    }
}
