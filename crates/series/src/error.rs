//! Error types for the demand-series crate.

use chrono::NaiveDate;

/// Error type for all fallible operations in the demand-series crate.
///
/// Covers empty inputs, ordering violations of the daily series invariant,
/// non-finite quantities, and invalid split or horizon requests.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SeriesError {
    /// Returned when no records or points were supplied.
    #[error("series is empty")]
    Empty,

    /// Returned when a date appears more than once in a daily series.
    #[error("duplicate date {date} in daily series")]
    DuplicateDate {
        /// The repeated date.
        date: NaiveDate,
    },

    /// Returned when dates are not in ascending order.
    #[error("dates out of order: {previous} followed by {next}")]
    Unordered {
        /// Date at the earlier position.
        previous: NaiveDate,
        /// Date that should have come later but did not.
        next: NaiveDate,
    },

    /// Returned when the date and value columns differ in length.
    #[error("length mismatch: {dates} dates but {values} values")]
    LengthMismatch {
        /// Number of dates supplied.
        dates: usize,
        /// Number of values supplied.
        values: usize,
    },

    /// Returned when a quantity is NaN or infinite.
    #[error("non-finite quantity {value} on {date}")]
    NonFiniteQuantity {
        /// Date carrying the offending value.
        date: NaiveDate,
        /// The offending value.
        value: f64,
    },

    /// Returned when the series is too short for the requested operation.
    #[error("insufficient data: got {n} observations, need at least {min}")]
    InsufficientData {
        /// Number of observations available.
        n: usize,
        /// Minimum number of observations required.
        min: usize,
    },

    /// Returned when a train/test ratio lies outside the open interval (0, 1).
    #[error("invalid train ratio {ratio} (must be in (0, 1))")]
    InvalidRatio {
        /// The rejected ratio.
        ratio: f64,
    },

    /// Returned when a date sequence would overflow the calendar.
    #[error("date overflow after {date}")]
    DateOverflow {
        /// Last representable date before the overflow.
        date: NaiveDate,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn error_empty() {
        assert_eq!(SeriesError::Empty.to_string(), "series is empty");
    }

    #[test]
    fn error_duplicate_date() {
        let err = SeriesError::DuplicateDate {
            date: date(2022, 1, 5),
        };
        assert_eq!(err.to_string(), "duplicate date 2022-01-05 in daily series");
    }

    #[test]
    fn error_unordered() {
        let err = SeriesError::Unordered {
            previous: date(2022, 1, 5),
            next: date(2022, 1, 3),
        };
        assert_eq!(
            err.to_string(),
            "dates out of order: 2022-01-05 followed by 2022-01-03"
        );
    }

    #[test]
    fn error_insufficient_data() {
        let err = SeriesError::InsufficientData { n: 1, min: 2 };
        assert_eq!(
            err.to_string(),
            "insufficient data: got 1 observations, need at least 2"
        );
    }

    #[test]
    fn error_invalid_ratio() {
        let err = SeriesError::InvalidRatio { ratio: 1.5 };
        assert_eq!(err.to_string(), "invalid train ratio 1.5 (must be in (0, 1))");
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<SeriesError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<SeriesError>();
    }
}
