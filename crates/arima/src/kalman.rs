//! Kalman filter for ARMA likelihood evaluation.
//!
//! Implements a univariate Kalman filter operating on the state-space
//! representation from [`crate::state_space`]. The exact Gaussian
//! log-likelihood follows from the prediction error decomposition with the
//! innovation variance concentrated out:
//!
//! ```text
//! sigma2_hat = (1/n) Σ v_t² / F_t
//! logL       = -n/2 (ln 2π + 1 + ln sigma2_hat) - 1/2 Σ ln F_t
//! ```
//!
//! The filter starts from `a = 0` and the stationary state covariance.
//!
//! **Not part of the public API.**

use ndarray::{Array1, Array2};

use crate::error::ArimaError;
use crate::state_space::StateSpace;

/// Everything a single filter pass produces.
#[derive(Clone, Debug)]
pub(crate) struct KalmanOutput {
    /// Concentrated innovation variance.
    pub(crate) sigma2: f64,
    /// One-step prediction errors `v_t`.
    pub(crate) residuals: Vec<f64>,
    /// One-step predictions `a_t[0]`.
    pub(crate) predictions: Vec<f64>,
    pub(crate) log_likelihood: f64,
    /// Predicted state for the first step after the data.
    pub(crate) next_state: Array1<f64>,
}

/// Running sums of one pass, with optional per-step records.
struct Pass {
    sum_sq: f64,
    sum_log_f: f64,
    residuals: Vec<f64>,
    predictions: Vec<f64>,
    state: Array1<f64>,
}

fn run(ss: &StateSpace, data: &[f64], record: bool) -> Result<Pass, ArimaError> {
    let r = ss.r();
    let t_mat = ss.t();
    let mut a = Array1::<f64>::zeros(r);
    let mut p: Array2<f64> = ss.stationary_covariance();

    let cap = if record { data.len() } else { 0 };
    let mut pass = Pass {
        sum_sq: 0.0,
        sum_log_f: 0.0,
        residuals: Vec::with_capacity(cap),
        predictions: Vec::with_capacity(cap),
        state: Array1::zeros(r),
    };

    for (t, &y) in data.iter().enumerate() {
        let f = p[[0, 0]];
        if !(f > 0.0 && f.is_finite()) {
            return Err(ArimaError::LikelihoodFailed { t });
        }
        let v = y - a[0];
        pass.sum_sq += v * v / f;
        pass.sum_log_f += f.ln();
        if record {
            pass.residuals.push(v);
            pass.predictions.push(a[0]);
        }

        let gain = t_mat.dot(&p.column(0)) / f;
        a = t_mat.dot(&a) + &gain * v;

        let mut next_p = t_mat.dot(&p).dot(&t_mat.t()) + ss.rrt();
        for i in 0..r {
            for j in 0..r {
                next_p[[i, j]] -= gain[i] * gain[j] * f;
            }
        }
        p = next_p;
    }

    pass.state = a;
    Ok(pass)
}

fn concentrated(n: usize, sum_sq: f64, sum_log_f: f64) -> Result<(f64, f64), ArimaError> {
    let nf = n as f64;
    let sigma2 = sum_sq / nf;
    if !(sigma2 > 0.0 && sigma2.is_finite()) {
        return Err(ArimaError::ConstantData);
    }
    let loglik = -0.5 * nf * ((2.0 * std::f64::consts::PI).ln() + 1.0 + sigma2.ln()) - 0.5 * sum_log_f;
    Ok((sigma2, loglik))
}

/// Concentrated log-likelihood only; the optimizer's inner loop.
pub(crate) fn kalman_concentrated_loglik(ss: &StateSpace, data: &[f64]) -> Result<f64, ArimaError> {
    let pass = run(ss, data, false)?;
    concentrated(data.len(), pass.sum_sq, pass.sum_log_f).map(|(_, ll)| ll)
}

/// Full pass keeping residuals, predictions and the terminal state.
pub(crate) fn kalman_full(ss: &StateSpace, data: &[f64]) -> Result<KalmanOutput, ArimaError> {
    let pass = run(ss, data, true)?;
    let (sigma2, log_likelihood) = concentrated(data.len(), pass.sum_sq, pass.sum_log_f)?;
    Ok(KalmanOutput {
        sigma2,
        residuals: pass.residuals,
        predictions: pass.predictions,
        log_likelihood,
        next_state: pass.state,
    })
}
