//! Automatic order selection: ADF-driven choice of `d`, then an AIC search
//! over `p` and `q` with `d` held fixed.

use demand_stationarity::{AdfConfig, StationarityError, Verdict, adf_test};
use serde::Serialize;
use tracing::{info, warn};

use crate::diff::difference;
use crate::error::ArimaError;
use crate::selection::{SearchGrid, SearchReport, search_orders};

/// Bounds and test settings for [`auto_order`].
///
/// ```
/// use demand_arima::AutoConfig;
///
/// let config = AutoConfig::new().with_max_p(3).with_max_q(2).with_max_order(None);
/// assert_eq!(config.max_p(), 3);
/// assert_eq!(config.max_d(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct AutoConfig {
    max_p: usize,
    max_d: usize,
    max_q: usize,
    max_order: Option<usize>,
    adf: AdfConfig,
    parallel: bool,
}

impl Default for AutoConfig {
    fn default() -> Self {
        Self {
            max_p: 5,
            max_d: 2,
            max_q: 5,
            max_order: Some(5),
            adf: AdfConfig::default(),
            parallel: true,
        }
    }
}

impl AutoConfig {
    /// `p, q <= 5`, `p + q <= 5`, `d <= 2`, ADF at 0.05.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_p(mut self, max_p: usize) -> Self {
        self.max_p = max_p;
        self
    }

    /// Largest number of differences tried before giving up on stationarity.
    pub fn with_max_d(mut self, max_d: usize) -> Self {
        self.max_d = max_d;
        self
    }

    pub fn with_max_q(mut self, max_q: usize) -> Self {
        self.max_q = max_q;
        self
    }

    /// Caps `p + q`. `None` searches the full rectangle.
    pub fn with_max_order(mut self, max_order: Option<usize>) -> Self {
        self.max_order = max_order;
        self
    }

    /// Test applied to each differencing level.
    pub fn with_adf(mut self, adf: AdfConfig) -> Self {
        self.adf = adf;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn max_p(&self) -> usize {
        self.max_p
    }

    pub fn max_d(&self) -> usize {
        self.max_d
    }

    pub fn max_q(&self) -> usize {
        self.max_q
    }

    pub fn max_order(&self) -> Option<usize> {
        self.max_order
    }

    pub fn adf(&self) -> &AdfConfig {
        &self.adf
    }

    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// Grid searched once `d` is known.
    pub fn grid(&self, d: usize) -> SearchGrid {
        SearchGrid::new(0..=self.max_p, d..=d, 0..=self.max_q)
            .with_max_order(self.max_order)
            .with_parallel(self.parallel)
    }
}

/// ADF outcome on one differencing level.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DifferencingOutcome {
    Tested {
        statistic: f64,
        p_value: f64,
        verdict: Verdict,
    },
    /// The test could not run, e.g. a constant or too short level.
    Untestable { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DifferencingStep {
    pub d: usize,
    #[serde(flatten)]
    pub outcome: DifferencingOutcome,
}

/// Chosen `d`, the tests behind it and the search that followed.
#[derive(Debug, Clone)]
pub struct AutoReport {
    d: usize,
    steps: Vec<DifferencingStep>,
    search: SearchReport,
}

impl AutoReport {
    pub fn d(&self) -> usize {
        self.d
    }

    /// One entry per level tested, `d = 0` first.
    pub fn steps(&self) -> &[DifferencingStep] {
        &self.steps
    }

    pub fn search(&self) -> &SearchReport {
        &self.search
    }

    pub fn into_search(self) -> SearchReport {
        self.search
    }
}

/// Smallest `d <= max_d` whose differenced series the ADF test calls
/// stationary.
///
/// Testing stops at the first level the test cannot handle and keeps that
/// level. When no level rejects the unit root, `max_d` is returned.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`ArimaError::EmptyData`] | `data` is empty |
/// | [`ArimaError::NonFiniteData`] | any element is NaN or infinite |
/// | [`ArimaError::Stationarity`] | the ADF significance level is invalid |
pub fn select_d(data: &[f64], config: &AutoConfig) -> Result<(usize, Vec<DifferencingStep>), ArimaError> {
    if data.is_empty() {
        return Err(ArimaError::EmptyData);
    }
    if data.iter().any(|v| !v.is_finite()) {
        return Err(ArimaError::NonFiniteData);
    }

    let mut steps = Vec::with_capacity(config.max_d + 1);
    for d in 0..=config.max_d {
        let level = difference(data, d);
        match adf_test(&level, &config.adf) {
            Ok(result) => {
                steps.push(DifferencingStep {
                    d,
                    outcome: DifferencingOutcome::Tested {
                        statistic: result.statistic,
                        p_value: result.p_value,
                        verdict: result.verdict,
                    },
                });
                if result.verdict.is_stationary() {
                    return Ok((d, steps));
                }
            }
            Err(e @ StationarityError::InvalidAlpha { .. }) => return Err(e.into()),
            Err(e) => {
                warn!(d, reason = %e, "stationarity test not applicable, keeping this d");
                steps.push(DifferencingStep {
                    d,
                    outcome: DifferencingOutcome::Untestable { reason: e.to_string() },
                });
                return Ok((d, steps));
            }
        }
    }
    Ok((config.max_d, steps))
}

/// Picks `d` with [`select_d`], then the minimum-AIC `(p, q)` for that `d`.
///
/// # Errors
///
/// Those of [`select_d`] and [`search_orders`].
#[tracing::instrument(skip_all, fields(n_obs = data.len(), max_d = config.max_d))]
pub fn auto_order(data: &[f64], config: &AutoConfig) -> Result<AutoReport, ArimaError> {
    let (d, steps) = select_d(data, config)?;
    info!(d, n_tested = steps.len(), "differencing order chosen");

    let search = search_orders(data, &config.grid(d))?;
    Ok(AutoReport { d, steps, search })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic noise in [-0.5, 0.5).
    fn jitter(n: usize, seed: u64) -> Vec<f64> {
        let mut state = seed;
        (0..n)
            .map(|_| {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                (state >> 11) as f64 / (1u64 << 53) as f64 - 0.5
            })
            .collect()
    }

    fn white_noise(n: usize) -> Vec<f64> {
        jitter(n, 7).into_iter().map(|e| 20.0 + 4.0 * e).collect()
    }

    /// Drifting walk: trending levels, stationary differences.
    fn random_walk(n: usize) -> Vec<f64> {
        let mut level = 100.0;
        jitter(n, 11)
            .into_iter()
            .map(|e| {
                level += 0.2 + e;
                level
            })
            .collect()
    }

    #[test]
    fn default_bounds() {
        let c = AutoConfig::default();
        assert_eq!((c.max_p(), c.max_d(), c.max_q()), (5, 2, 5));
        assert_eq!(c.max_order(), Some(5));
        assert_eq!(c.grid(1).len(), 21);
    }

    #[test]
    fn noise_needs_no_differencing() {
        let (d, steps) = select_d(&white_noise(300), &AutoConfig::new()).unwrap();
        assert_eq!(d, 0);
        assert_eq!(steps.len(), 1);
    }

    #[test]
    fn walk_is_differenced_once() {
        let (d, steps) = select_d(&random_walk(300), &AutoConfig::new()).unwrap();
        assert_eq!(d, 1);
        assert_eq!(steps.len(), 2);
        assert!(matches!(
            steps[0].outcome,
            DifferencingOutcome::Tested {
                verdict: Verdict::NonStationary,
                ..
            }
        ));
    }

    #[test]
    fn max_d_bounds_the_choice() {
        let config = AutoConfig::new().with_max_d(0);
        let (d, steps) = select_d(&random_walk(300), &config).unwrap();
        assert_eq!(d, 0);
        assert_eq!(steps.len(), 1);
    }

    #[test]
    fn untestable_level_stops_differencing() {
        // A straight line: its first difference is constant.
        let line: Vec<f64> = (0..50).map(|t| 3.0 + 2.0 * t as f64).collect();
        let (d, steps) = select_d(&line, &AutoConfig::new()).unwrap();
        let last = steps.last().unwrap();
        assert_eq!(last.d, d);
        assert!(matches!(last.outcome, DifferencingOutcome::Untestable { .. }));
    }

    #[test]
    fn invalid_alpha_is_an_error() {
        let config = AutoConfig::new().with_adf(AdfConfig::new().with_alpha(1.5));
        let err = select_d(&white_noise(50), &config).unwrap_err();
        assert!(matches!(err, ArimaError::Stationarity(_)));
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(select_d(&[], &AutoConfig::new()).unwrap_err(), ArimaError::EmptyData);
        assert_eq!(
            select_d(&[1.0, f64::NAN], &AutoConfig::new()).unwrap_err(),
            ArimaError::NonFiniteData
        );
    }

    #[test]
    fn step_serializes_flat() {
        let step = DifferencingStep {
            d: 1,
            outcome: DifferencingOutcome::Untestable {
                reason: "regression design is singular".into(),
            },
        };
        let json = serde_json::to_value(&step).unwrap();
        assert_eq!(json["d"], 1);
        assert_eq!(json["status"], "untestable");
    }
}
