//! Error types for the demand-arima crate.

/// Error type for all fallible operations in the demand-arima crate.
///
/// Covers input validation, numerical failures while evaluating the
/// likelihood, optimizer problems, misuse of the forecast API and the
/// exhausted-grid case of the order search.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ArimaError {
    /// Returned when the input data is empty.
    #[error("input data is empty")]
    EmptyData,

    /// Returned when the input data has fewer observations than required.
    #[error("insufficient data: got {n} observations, need at least {min}")]
    InsufficientData {
        /// Number of observations provided.
        n: usize,
        /// Minimum number of observations required.
        min: usize,
    },

    /// Returned when the input data contains non-finite values (NaN or infinity).
    #[error("input data contains non-finite values")]
    NonFiniteData,

    /// Returned when the (differenced) data has zero variance.
    #[error("input data is constant after differencing (zero variance)")]
    ConstantData,

    /// Returned when the Kalman filter meets a non-positive prediction variance.
    #[error("likelihood evaluation failed at observation {t}")]
    LikelihoodFailed {
        /// Zero-based index into the differenced series.
        t: usize,
    },

    /// Returned when the optimization algorithm fails to converge.
    #[error("optimisation failed to converge")]
    OptimizationFailed,

    /// Returned when a forecast is requested for zero steps.
    #[error("forecast horizon must be at least 1")]
    InvalidHorizon,

    /// Returned when a prediction range is empty or starts past the data.
    #[error("invalid prediction range {start}..={end} for {n} observations")]
    InvalidRange {
        /// First requested index.
        start: usize,
        /// Last requested index (inclusive).
        end: usize,
        /// Number of training observations.
        n: usize,
    },

    /// Returned when a search grid contains no candidate.
    #[error("search grid is empty")]
    EmptyGrid,

    /// Returned when every candidate of an order search fails to fit.
    #[error("all {n_candidates} ARIMA candidates failed")]
    AllCandidatesFailed {
        /// Number of orders attempted.
        n_candidates: usize,
    },

    /// Returned when the stationarity test used to pick `d` is misconfigured.
    #[error("stationarity test failed: {0}")]
    Stationarity(#[from] demand_stationarity::StationarityError),

    /// Returned when a fitted model's fields contradict each other.
    #[error("inconsistent model: {0}")]
    InconsistentModel(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_empty_data() {
        let err = ArimaError::EmptyData;
        assert_eq!(err.to_string(), "input data is empty");
    }

    #[test]
    fn error_insufficient_data() {
        let err = ArimaError::InsufficientData { n: 5, min: 10 };
        assert_eq!(
            err.to_string(),
            "insufficient data: got 5 observations, need at least 10"
        );
    }

    #[test]
    fn error_constant_data() {
        let err = ArimaError::ConstantData;
        assert_eq!(
            err.to_string(),
            "input data is constant after differencing (zero variance)"
        );
    }

    #[test]
    fn error_likelihood_failed() {
        let err = ArimaError::LikelihoodFailed { t: 17 };
        assert_eq!(err.to_string(), "likelihood evaluation failed at observation 17");
    }

    #[test]
    fn error_invalid_range() {
        let err = ArimaError::InvalidRange { start: 9, end: 3, n: 5 };
        assert_eq!(err.to_string(), "invalid prediction range 9..=3 for 5 observations");
    }

    #[test]
    fn error_all_candidates_failed() {
        let err = ArimaError::AllCandidatesFailed { n_candidates: 75 };
        assert_eq!(err.to_string(), "all 75 ARIMA candidates failed");
    }

    #[test]
    fn error_inconsistent_model() {
        let err = ArimaError::InconsistentModel("2 AR coefficients for p=1".into());
        assert_eq!(err.to_string(), "inconsistent model: 2 AR coefficients for p=1");
    }

    #[test]
    fn error_stationarity_wraps_source() {
        let err: ArimaError = demand_stationarity::StationarityError::InvalidAlpha { alpha: 2.0 }.into();
        assert_eq!(
            err.to_string(),
            "stationarity test failed: invalid significance level 2 (must be in (0, 1))"
        );
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<ArimaError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<ArimaError>();
    }
}
