//! The daily quantity series.

use chrono::NaiveDate;

use crate::error::SeriesError;

/// One total quantity per calendar date, dates strictly increasing.
///
/// The invariant is checked by every constructor, so a `DailySeries` is never
/// empty, never holds duplicate dates and never holds NaN or infinite values.
/// Missing calendar days are allowed; see [`DailySeries::missing_dates()`].
#[derive(Debug, Clone, PartialEq)]
pub struct DailySeries {
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl DailySeries {
    /// Creates a series from parallel date and value columns.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`SeriesError::Empty`] | no dates |
    /// | [`SeriesError::LengthMismatch`] | `dates.len() != values.len()` |
    /// | [`SeriesError::DuplicateDate`] | a date repeats |
    /// | [`SeriesError::Unordered`] | dates not ascending |
    /// | [`SeriesError::NonFiniteQuantity`] | a value is NaN or infinite |
    pub fn new(dates: Vec<NaiveDate>, values: Vec<f64>) -> Result<Self, SeriesError> {
        if dates.len() != values.len() {
            return Err(SeriesError::LengthMismatch {
                dates: dates.len(),
                values: values.len(),
            });
        }
        if dates.is_empty() {
            return Err(SeriesError::Empty);
        }
        for w in dates.windows(2) {
            if w[0] == w[1] {
                return Err(SeriesError::DuplicateDate { date: w[1] });
            }
            if w[0] > w[1] {
                return Err(SeriesError::Unordered {
                    previous: w[0],
                    next: w[1],
                });
            }
        }
        if let Some((date, value)) = dates
            .iter()
            .zip(values.iter())
            .find(|(_, v)| !v.is_finite())
        {
            return Err(SeriesError::NonFiniteQuantity {
                date: *date,
                value: *value,
            });
        }
        Ok(Self { dates, values })
    }

    /// Creates a series from `(date, value)` pairs already in date order.
    ///
    /// # Errors
    ///
    /// Same as [`DailySeries::new()`].
    pub fn from_points(points: impl IntoIterator<Item = (NaiveDate, f64)>) -> Result<Self, SeriesError> {
        let (dates, values) = points.into_iter().unzip();
        Self::new(dates, values)
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`; kept for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Calendar dates, ascending.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Quantities aligned with [`DailySeries::dates()`].
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// First date in the series.
    pub fn first_date(&self) -> NaiveDate {
        self.dates[0]
    }

    /// Last date in the series.
    pub fn last_date(&self) -> NaiveDate {
        self.dates[self.dates.len() - 1]
    }

    /// Iterates over `(date, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }

    /// Calendar days between the first and last date that have no entry.
    pub fn missing_dates(&self) -> Vec<NaiveDate> {
        let mut missing = Vec::new();
        for w in self.dates.windows(2) {
            let mut d = w[0];
            while let Some(next) = d.succ_opt() {
                if next >= w[1] {
                    break;
                }
                missing.push(next);
                d = next;
            }
        }
        missing
    }

    /// Splits into the first `n_train` observations and the rest.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::InsufficientData`] unless
    /// `1 <= n_train < self.len()`.
    pub fn split_at(&self, n_train: usize) -> Result<(Self, Self), SeriesError> {
        if n_train == 0 || n_train >= self.len() {
            return Err(SeriesError::InsufficientData {
                n: self.len(),
                min: n_train.max(1) + 1,
            });
        }
        let train = Self {
            dates: self.dates[..n_train].to_vec(),
            values: self.values[..n_train].to_vec(),
        };
        let test = Self {
            dates: self.dates[n_train..].to_vec(),
            values: self.values[n_train..].to_vec(),
        };
        Ok((train, test))
    }

    /// Splits chronologically, the training prefix holding
    /// `floor(len * ratio)` observations.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::InvalidRatio`] if `ratio` is outside (0, 1) and
    /// [`SeriesError::InsufficientData`] if either side would be empty.
    pub fn train_test_split(&self, ratio: f64) -> Result<(Self, Self), SeriesError> {
        if !(ratio > 0.0 && ratio < 1.0) {
            return Err(SeriesError::InvalidRatio { ratio });
        }
        let n_train = (self.len() as f64 * ratio).floor() as usize;
        self.split_at(n_train)
    }
}
