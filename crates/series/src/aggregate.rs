//! Collapse per-transaction records into one total per calendar day.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::daily::DailySeries;
use crate::error::SeriesError;

/// A single sales record: the day it happened and how many units moved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transaction {
    /// Calendar date of the transaction.
    pub date: NaiveDate,
    /// Quantity sold (may be fractional or negative for returns).
    pub quantity: f64,
}

impl Transaction {
    /// Creates a transaction record.
    pub fn new(date: NaiveDate, quantity: f64) -> Self {
        Self { date, quantity }
    }
}

/// How calendar days without any transaction are represented.
///
/// The choice changes both the stationarity test and the fitted model, so it
/// is always explicit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GapPolicy {
    /// Days without transactions stay absent from the series.
    #[default]
    Preserve,
    /// Days without transactions between the first and last date are
    /// inserted with a total of zero.
    ZeroFill,
}

/// Groups `records` by date, sums quantities, and sorts ascending.
///
/// With [`GapPolicy::Preserve`] the output holds exactly one entry per
/// distinct date present in `records`. With [`GapPolicy::ZeroFill`] every
/// calendar day between the first and last date is present.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`SeriesError::Empty`] | `records` is empty |
/// | [`SeriesError::NonFiniteQuantity`] | a quantity (or a daily sum) is NaN or infinite |
pub fn aggregate_daily(records: &[Transaction], policy: GapPolicy) -> Result<DailySeries, SeriesError> {
    if records.is_empty() {
        return Err(SeriesError::Empty);
    }

    let mut totals: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for rec in records {
        if !rec.quantity.is_finite() {
            return Err(SeriesError::NonFiniteQuantity {
                date: rec.date,
                value: rec.quantity,
            });
        }
        *totals.entry(rec.date).or_insert(0.0) += rec.quantity;
    }

    debug!(
        n_records = records.len(),
        n_days = totals.len(),
        "aggregated transactions"
    );

    match policy {
        GapPolicy::Preserve => DailySeries::from_points(totals),
        GapPolicy::ZeroFill => {
            let first = *totals.keys().next().ok_or(SeriesError::Empty)?;
            let last = *totals.keys().next_back().ok_or(SeriesError::Empty)?;
            let n_days = (last - first).num_days() as usize + 1;
            let dates = crate::sequence::daily_sequence(first, n_days)?;
            let values = dates
                .iter()
                .map(|d| totals.get(d).copied().unwrap_or(0.0))
                .collect();
            DailySeries::new(dates, values)
        }
    }
}
