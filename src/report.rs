//! Run report: everything the pipeline learned, as one JSON document.

use chrono::NaiveDate;
use serde::Serialize;

use demand_arima::{ArimaSpec, Candidate, DifferencingStep};
use demand_evaluate::AccuracyReport;
use demand_series::{DailySeries, GapPolicy};
use demand_stationarity::AdfResult;
use demand_stats::{FiveNumberSummary, autocorrelation, five_number_summary, partial_autocorrelation};

/// Lags reported for the correlograms.
pub const CORRELOGRAM_LAGS: usize = 30;

#[derive(Debug, Serialize)]
pub struct RunReport {
    pub engine_version: &'static str,
    pub series: SeriesSummary,
    pub stationarity: AdfResult,
    pub search: SearchSummary,
    pub accuracy: AccuracyReport,
    pub selection: SelectionComparison,
    pub forecast: ForecastSummary,
}

/// Shape of the aggregated daily series.
#[derive(Debug, Serialize)]
pub struct SeriesSummary {
    pub gap_policy: GapPolicy,
    pub n_days: usize,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    /// Calendar days between first and last date with no entry.
    pub n_missing_dates: usize,
    pub summary: Option<FiveNumberSummary>,
    pub acf: Option<Vec<f64>>,
    pub pacf: Option<Vec<f64>>,
}

impl SeriesSummary {
    pub fn describe(series: &DailySeries, gap_policy: GapPolicy) -> Self {
        let values = series.values();
        Self {
            gap_policy,
            n_days: series.len(),
            first_date: series.first_date(),
            last_date: series.last_date(),
            n_missing_dates: series.missing_dates().len(),
            summary: five_number_summary(values),
            acf: autocorrelation(values, CORRELOGRAM_LAGS),
            pacf: partial_autocorrelation(values, CORRELOGRAM_LAGS),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SearchSummary {
    pub n_train: usize,
    pub n_failed: usize,
    pub best: ArimaSpec,
    pub best_aic: f64,
    pub candidates: Vec<Candidate>,
}

/// Grid search against automatic selection, both scored on the test split.
#[derive(Debug, Serialize)]
pub struct SelectionComparison {
    pub grid: OrderScore,
    /// `None` when automatic selection is disabled.
    pub auto: Option<AutoSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderScore {
    pub order: ArimaSpec,
    pub aic: f64,
    pub test_rmse: f64,
}

#[derive(Debug, Serialize)]
pub struct AutoSummary {
    #[serde(flatten)]
    pub score: OrderScore,
    /// ADF result per differencing level tried.
    pub differencing: Vec<DifferencingStep>,
    pub n_candidates: usize,
    pub n_failed: usize,
}

/// The final model's forward forecast.
#[derive(Debug, Serialize)]
pub struct ForecastSummary {
    pub horizon: usize,
    pub first_date: Option<NaiveDate>,
    pub mean: Option<f64>,
}
