//! Augmented Dickey-Fuller regression with automatic lag selection.

use ndarray::{Array1, Array2};
use serde::Serialize;
use tracing::debug;

use crate::error::StationarityError;
use crate::mackinnon::{CriticalValues, critical_values, mackinnon_p_value};
use crate::ols::ols;
use crate::verdict::Verdict;

/// Smallest series the test accepts.
const MIN_OBS: usize = 6;

/// How many lagged differences enter the regression.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LagSelection {
    /// Pick the lag in `0..=max_lag` minimising AIC.
    #[default]
    Aic,
    /// Always use `max_lag` lagged differences.
    Fixed,
}

/// Configuration for [`adf_test`].
///
/// ```
/// use demand_stationarity::{AdfConfig, LagSelection};
///
/// let config = AdfConfig::new()
///     .with_alpha(0.01)
///     .with_max_lag(Some(7))
///     .with_lag_selection(LagSelection::Fixed);
/// assert_eq!(config.alpha(), 0.01);
/// ```
#[derive(Debug, Clone)]
pub struct AdfConfig {
    alpha: f64,
    max_lag: Option<usize>,
    lag_selection: LagSelection,
}

impl Default for AdfConfig {
    fn default() -> Self {
        Self {
            alpha: 0.05,
            max_lag: None,
            lag_selection: LagSelection::Aic,
        }
    }
}

impl AdfConfig {
    /// Creates a config with significance 0.05 and AIC lag selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the significance level used for the verdict.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the largest lag considered. `None` uses `ceil(12 (n/100)^(1/4))`.
    pub fn with_max_lag(mut self, max_lag: Option<usize>) -> Self {
        self.max_lag = max_lag;
        self
    }

    /// Sets the lag selection rule.
    pub fn with_lag_selection(mut self, lag_selection: LagSelection) -> Self {
        self.lag_selection = lag_selection;
        self
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn max_lag(&self) -> Option<usize> {
        self.max_lag
    }

    pub fn lag_selection(&self) -> LagSelection {
        self.lag_selection
    }
}

/// Outcome of an augmented Dickey-Fuller test.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdfResult {
    /// t-statistic of the lagged level coefficient.
    pub statistic: f64,
    /// MacKinnon approximate p-value.
    pub p_value: f64,
    /// Number of lagged differences in the final regression.
    pub used_lag: usize,
    /// Observations in the final regression.
    pub n_obs: usize,
    pub critical_values: CriticalValues,
    /// AIC of the selected lag on the common sample, when selected by AIC.
    pub ic_best: Option<f64>,
    pub alpha: f64,
    pub verdict: Verdict,
}

/// Runs the ADF test (constant, no trend) on `series`.
///
/// The null hypothesis is a unit root. The verdict is
/// [`Verdict::Stationary`] when the p-value is at most `config.alpha()`.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`StationarityError::InvalidAlpha`] | `alpha` outside (0, 1) |
/// | [`StationarityError::NonFiniteData`] | NaN or infinite input |
/// | [`StationarityError::InsufficientData`] | fewer than 6 observations |
/// | [`StationarityError::SingularDesign`] | constant series or collinear lags |
/// | [`StationarityError::PerfectFit`] | differences explained exactly (e.g. a straight line) |
pub fn adf_test(series: &[f64], config: &AdfConfig) -> Result<AdfResult, StationarityError> {
    let alpha = config.alpha;
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(StationarityError::InvalidAlpha { alpha });
    }
    if series.iter().any(|v| !v.is_finite()) {
        return Err(StationarityError::NonFiniteData);
    }
    let n = series.len();
    if n < MIN_OBS {
        return Err(StationarityError::InsufficientData { n, min: MIN_OBS });
    }

    let lag_cap = n / 2 - 2;
    let max_lag = match config.max_lag {
        Some(l) => l.min(lag_cap),
        None => default_max_lag(n).min(lag_cap),
    };

    let diffs: Vec<f64> = series.windows(2).map(|w| w[1] - w[0]).collect();

    let (used_lag, ic_best) = match config.lag_selection {
        LagSelection::Fixed => (max_lag, None),
        LagSelection::Aic => {
            let (lag, aic) = select_lag(series, &diffs, max_lag)?;
            (lag, Some(aic))
        }
    };

    let (y, x) = design(series, &diffs, used_lag, used_lag);
    let fit = ols(&y, &x)?;
    let statistic = fit.t_values[1];
    let n_obs = y.len();
    let p_value = mackinnon_p_value(statistic);
    let verdict = Verdict::from_p_value(p_value, alpha);

    debug!(
        statistic,
        p_value,
        used_lag,
        n_obs,
        gamma = fit.coef[1],
        "ADF regression"
    );

    Ok(AdfResult {
        statistic,
        p_value,
        used_lag,
        n_obs,
        critical_values: critical_values(n_obs),
        ic_best,
        alpha,
        verdict,
    })
}

/// Schwert's rule of thumb: `ceil(12 (n/100)^(1/4))`.
fn default_max_lag(n: usize) -> usize {
    (12.0 * (n as f64 / 100.0).powf(0.25)).ceil() as usize
}

/// Fits every lag on the sample shared by the largest lag and keeps the
/// smallest AIC. Ties go to the shorter lag.
fn select_lag(series: &[f64], diffs: &[f64], max_lag: usize) -> Result<(usize, f64), StationarityError> {
    let mut best: Option<(usize, f64)> = None;
    for lag in 0..=max_lag {
        let (y, x) = design(series, diffs, lag, max_lag);
        let aic = ols(&y, &x)?.aic;
        if best.is_none_or(|(_, b)| aic < b) {
            best = Some((lag, aic));
        }
    }
    best.ok_or(StationarityError::InsufficientData {
        n: series.len(),
        min: MIN_OBS,
    })
}

/// Builds `Δy_t` on `[1, y_{t-1}, Δy_{t-1}, ..., Δy_{t-lag}]`.
///
/// Rows start at difference index `start`; `start >= lag` must hold.
fn design(series: &[f64], diffs: &[f64], lag: usize, start: usize) -> (Array1<f64>, Array2<f64>) {
    debug_assert!(start >= lag);
    let rows = diffs.len() - start;
    let y = Array1::from_iter((start..diffs.len()).map(|i| diffs[i]));
    let x = Array2::from_shape_fn((rows, lag + 2), |(r, c)| {
        let i = start + r;
        match c {
            0 => 1.0,
            1 => series[i],
            j => diffs[i - (j - 1)],
        }
    });
    (y, x)
}
