//! Fitted ARIMA model: accessors, forecasting and in-sample prediction.

use serde::{Deserialize, Serialize};

use crate::diff;
use crate::error::ArimaError;
use crate::kalman::{self, KalmanOutput};
use crate::spec::ArimaSpec;
use crate::state_space::StateSpace;

/// A fitted ARIMA(p,d,q) model produced by [`ArimaSpec::fit()`].
///
/// Holds the estimated AR (`phi`) and MA (`theta`) coefficients, the
/// innovation variance, the mean of an undifferenced model, the
/// log-likelihood and the training levels. Forecasts are recomputed from
/// these fields, so a fit that survives a serde round trip forecasts the
/// same values.
///
/// ```mermaid
/// graph LR
///     B["ArimaFit"] --> C[".forecast(h)"]
///     B --> D[".predict(start, end)"]
///     B --> E[".aic()"]
///     B --> F[".validate()"]
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArimaFit {
    spec: ArimaSpec,
    ar: Vec<f64>,
    ma: Vec<f64>,
    sigma2: f64,
    mean: Option<f64>,
    log_likelihood: f64,
    residuals: Vec<f64>,
    data: Vec<f64>,
}

impl ArimaFit {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        spec: ArimaSpec,
        ar: Vec<f64>,
        ma: Vec<f64>,
        sigma2: f64,
        mean: Option<f64>,
        log_likelihood: f64,
        residuals: Vec<f64>,
        data: Vec<f64>,
    ) -> Self {
        Self {
            spec,
            ar,
            ma,
            sigma2,
            mean,
            log_likelihood,
            residuals,
            data,
        }
    }

    /// Returns the [`ArimaSpec`] that produced this fit.
    pub fn spec(&self) -> ArimaSpec {
        self.spec
    }

    /// Returns `(p, d, q)`.
    pub fn order(&self) -> (usize, usize, usize) {
        self.spec.order()
    }

    /// Returns the AR coefficients (`phi`).
    pub fn ar(&self) -> &[f64] {
        &self.ar
    }

    /// Returns the MA coefficients (`theta`).
    pub fn ma(&self) -> &[f64] {
        &self.ma
    }

    /// Returns the innovation variance (`sigma2`).
    pub fn sigma2(&self) -> f64 {
        self.sigma2
    }

    /// Mean of the series; `None` for differenced models.
    pub fn mean(&self) -> Option<f64> {
        self.mean
    }

    /// Returns the maximised log-likelihood of the differenced series.
    pub fn log_likelihood(&self) -> f64 {
        self.log_likelihood
    }

    /// One-step prediction errors on the differenced scale.
    pub fn residuals(&self) -> &[f64] {
        &self.residuals
    }

    /// The training levels.
    pub fn training_data(&self) -> &[f64] {
        &self.data
    }

    /// Number of training observations (levels, before differencing).
    pub fn n_obs(&self) -> usize {
        self.data.len()
    }

    /// Estimated parameters: `p + q + 1` for the variance, plus one for a mean.
    pub fn n_params(&self) -> usize {
        self.spec.p() + self.spec.q() + 1 + usize::from(self.mean.is_some())
    }

    /// Akaike Information Criterion, `2k - 2 logL` with `k = n_params()`.
    ///
    /// Lower AIC indicates a better trade-off between fit and complexity.
    pub fn aic(&self) -> f64 {
        2.0 * self.n_params() as f64 - 2.0 * self.log_likelihood
    }

    /// Point forecast for the `horizon` steps after the training data.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`ArimaError::InvalidHorizon`] | `horizon == 0` |
    /// | [`ArimaError::LikelihoodFailed`] | the filter breaks down on the stored data |
    pub fn forecast(&self, horizon: usize) -> Result<Vec<f64>, ArimaError> {
        if horizon == 0 {
            return Err(ArimaError::InvalidHorizon);
        }
        let (ss, output) = self.filter()?;
        Ok(self.extend(&ss, &output, horizon))
    }

    /// Predictions for indices `start..=end` of the training span.
    ///
    /// Indices below [`n_obs()`](Self::n_obs) are one-step-ahead in-sample
    /// predictions on the level scale; indices from `n_obs()` on are
    /// forecasts. For a differenced model the first `d` points carry no
    /// differenced information: index 0 predicts 0 and index `t < d`
    /// predicts the previous observation.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`ArimaError::InvalidRange`] | `start > end` or `start > n_obs()` |
    /// | [`ArimaError::LikelihoodFailed`] | the filter breaks down on the stored data |
    pub fn predict(&self, start: usize, end: usize) -> Result<Vec<f64>, ArimaError> {
        let n = self.data.len();
        if start > end || start > n {
            return Err(ArimaError::InvalidRange { start, end, n });
        }

        let (ss, output) = self.filter()?;
        let mut out = Vec::with_capacity(end - start + 1);
        if start < n {
            let in_sample = self.in_sample(&output);
            out.extend_from_slice(&in_sample[start..=end.min(n - 1)]);
        }
        if end >= n {
            let ahead = self.extend(&ss, &output, end + 1 - n);
            let skip = start.saturating_sub(n);
            out.extend_from_slice(&ahead[skip..]);
        }
        Ok(out)
    }

    /// Checks that the fields describe a usable model.
    ///
    /// Deserialized fits bypass [`ArimaSpec::fit()`]; this catches files whose
    /// fields contradict each other before they reach the forecaster.
    ///
    /// # Errors
    ///
    /// Returns [`ArimaError::InconsistentModel`] naming the first violation.
    pub fn validate(&self) -> Result<(), ArimaError> {
        let (p, _, q) = self.order();
        let bad = |msg: String| Err(ArimaError::InconsistentModel(msg));

        if self.ar.len() != p {
            return bad(format!("{} AR coefficients for p={p}", self.ar.len()));
        }
        if self.ma.len() != q {
            return bad(format!("{} MA coefficients for q={q}", self.ma.len()));
        }
        if self.mean.is_some() != self.spec.includes_mean() {
            return bad(format!("mean presence does not match d={}", self.spec.d()));
        }
        if !(self.sigma2 > 0.0 && self.sigma2.is_finite()) {
            return bad(format!("sigma2 = {}", self.sigma2));
        }
        let all_finite = self
            .ar
            .iter()
            .chain(&self.ma)
            .chain(&self.data)
            .chain(self.mean.iter())
            .all(|v| v.is_finite());
        if !all_finite {
            return bad("non-finite parameter or training value".into());
        }
        let min = self.spec.min_observations();
        if self.data.len() < min {
            return bad(format!("{} training values, need {min}", self.data.len()));
        }
        let expected_residuals = self.data.len() - self.spec.d();
        if self.residuals.len() != expected_residuals {
            return bad(format!(
                "{} residuals for {expected_residuals} differenced values",
                self.residuals.len()
            ));
        }
        Ok(())
    }

    /// Centred, differenced training data.
    fn working_series(&self) -> Vec<f64> {
        let mean = self.mean.unwrap_or(0.0);
        diff::difference(&self.data, self.spec.d())
            .into_iter()
            .map(|w| w - mean)
            .collect()
    }

    fn filter(&self) -> Result<(StateSpace, KalmanOutput), ArimaError> {
        let ss = StateSpace::new(&self.ar, &self.ma);
        let output = kalman::kalman_full(&ss, &self.working_series())?;
        Ok((ss, output))
    }

    /// Forecasts `horizon` steps from the filter's terminal state.
    fn extend(&self, ss: &StateSpace, output: &KalmanOutput, horizon: usize) -> Vec<f64> {
        let mean = self.mean.unwrap_or(0.0);
        let mut state = output.next_state.clone();
        let mut w_hat = Vec::with_capacity(horizon);
        for _ in 0..horizon {
            w_hat.push(state[0] + mean);
            state = ss.t().dot(&state);
        }
        let tails = diff::level_tails(&self.data, self.spec.d());
        diff::integrate(&w_hat, &tails)
    }

    /// One-step-ahead predictions of every training level.
    fn in_sample(&self, output: &KalmanOutput) -> Vec<f64> {
        let d = self.spec.d();
        let mean = self.mean.unwrap_or(0.0);
        let mut out = Vec::with_capacity(self.data.len());
        for t in 0..d.min(self.data.len()) {
            out.push(if t == 0 { 0.0 } else { self.data[t - 1] });
        }
        let offsets = diff::level_offsets(&self.data, d);
        out.extend(
            output
                .predictions
                .iter()
                .zip(offsets.iter())
                .map(|(w_hat, offset)| w_hat + mean + offset),
        );
        out
    }
}
