//! Point forecasts keyed by future calendar date.

use chrono::NaiveDate;

use crate::error::SeriesError;
use crate::sequence::days_after;

/// A dated point forecast.
///
/// Dates form a contiguous daily sequence beginning the day after the last
/// training date.
#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl Forecast {
    /// Attaches dates to `values`, starting the day after `last_date`.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::DateOverflow`] if the dates run past the
    /// calendar's range.
    pub fn following(last_date: NaiveDate, values: Vec<f64>) -> Result<Self, SeriesError> {
        let dates = days_after(last_date, values.len())?;
        Ok(Self { dates, values })
    }

    /// Number of forecast steps.
    pub fn horizon(&self) -> usize {
        self.values.len()
    }

    /// Forecast dates.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Forecast values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Iterates over `(date, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }

    /// Average forecast value over the horizon, `None` when empty.
    pub fn mean(&self) -> Option<f64> {
        if self.values.is_empty() {
            None
        } else {
            Some(self.values.iter().sum::<f64>() / self.values.len() as f64)
        }
    }
}
