//! Nelder-Mead optimizer for ARIMA maximum-likelihood estimation.
//!
//! Wraps the `argmin` crate to minimize the negative concentrated
//! log-likelihood of the differenced series over unconstrained PACF
//! parameters.
//!
//! **Not part of the public API.**

use argmin::core::{CostFunction, Executor};
use argmin::solver::neldermead::NelderMead;
use tracing::debug;

use crate::diff;
use crate::error::ArimaError;
use crate::fit::ArimaFit;
use crate::kalman;
use crate::params;
use crate::spec::ArimaSpec;
use crate::state_space::StateSpace;

const MAX_ITERS: u64 = 1000;

/// Fits an ARIMA(p,d,q) model to levels via exact MLE.
///
/// 1. Validate the levels
/// 2. Difference `d` times; centre on the sample mean when `d == 0`
/// 3. Optimize the concentrated log-likelihood via Nelder-Mead
/// 4. Extract sigma2, residuals and log-likelihood with a full Kalman pass
pub(crate) fn fit_arima(spec: ArimaSpec, data: &[f64]) -> Result<ArimaFit, ArimaError> {
    let (p, d, q) = spec.order();

    if data.is_empty() {
        return Err(ArimaError::EmptyData);
    }
    if data.iter().any(|x| !x.is_finite()) {
        return Err(ArimaError::NonFiniteData);
    }
    let min_len = spec.min_observations();
    if data.len() < min_len {
        return Err(ArimaError::InsufficientData {
            n: data.len(),
            min: min_len,
        });
    }

    let w = diff::difference(data, d);
    let min_val = w.iter().copied().fold(f64::INFINITY, f64::min);
    let max_val = w.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if (max_val - min_val).abs() < f64::EPSILON {
        return Err(ArimaError::ConstantData);
    }

    let mean = spec
        .includes_mean()
        .then(|| w.iter().sum::<f64>() / w.len() as f64);
    let centered: Vec<f64> = w.iter().map(|x| x - mean.unwrap_or(0.0)).collect();

    let (ar, ma) = if p + q == 0 {
        (Vec::new(), Vec::new())
    } else {
        optimise(p, q, &centered)?
    };

    let ss = StateSpace::new(&ar, &ma);
    let output = kalman::kalman_full(&ss, &centered)?;
    if !output.log_likelihood.is_finite() {
        return Err(ArimaError::OptimizationFailed);
    }

    debug!(
        order = %spec,
        log_likelihood = output.log_likelihood,
        sigma2 = output.sigma2,
        "fitted"
    );

    Ok(ArimaFit::new(
        spec,
        ar,
        ma,
        output.sigma2,
        mean,
        output.log_likelihood,
        output.residuals,
        data.to_vec(),
    ))
}

/// Runs Nelder-Mead from white noise and maps the optimum back to AR and
/// MA polynomials.
fn optimise(p: usize, q: usize, centered: &[f64]) -> Result<(Vec<f64>, Vec<f64>), ArimaError> {
    let dim = p + q;
    let mut simplex: Vec<Vec<f64>> = Vec::with_capacity(dim + 1);
    simplex.push(vec![0.0; dim]);
    for i in 0..dim {
        let mut vertex = vec![0.0; dim];
        vertex[i] = 0.5;
        simplex.push(vertex);
    }

    let cost = ArimaCost { data: centered, p };
    let solver = NelderMead::new(simplex)
        .with_sd_tolerance(1e-8)
        .map_err(|_| ArimaError::OptimizationFailed)?;
    let result = Executor::new(cost, solver)
        .configure(|state| state.max_iters(MAX_ITERS))
        .run()
        .map_err(|_| ArimaError::OptimizationFailed)?;

    let best = result
        .state()
        .best_param
        .as_ref()
        .ok_or(ArimaError::OptimizationFailed)?;
    let (alpha, beta) = best.split_at(p);
    Ok((
        params::unconstrained_to_coeffs(alpha),
        params::unconstrained_to_ma(beta),
    ))
}

/// Cost function for argmin: negative concentrated log-likelihood.
struct ArimaCost<'a> {
    data: &'a [f64],
    p: usize,
}

impl CostFunction for ArimaCost<'_> {
    type Param = Vec<f64>;
    type Output = f64;

    fn cost(&self, params: &Self::Param) -> Result<Self::Output, argmin::core::Error> {
        let (alpha, beta) = params.split_at(self.p);
        let ar = params::unconstrained_to_coeffs(alpha);
        let ma = params::unconstrained_to_ma(beta);
        let ss = StateSpace::new(&ar, &ma);

        match kalman::kalman_concentrated_loglik(&ss, self.data) {
            Ok(loglik) if loglik.is_finite() => Ok(-loglik),
            _ => Ok(f64::MAX),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_distr::{Distribution, Normal};

    fn noise(n: usize, seed: u64) -> Vec<f64> {
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        let normal = Normal::new(0.0, 1.0).unwrap();
        (0..n).map(|_| normal.sample(&mut rng)).collect()
    }

    #[test]
    fn white_noise_with_mean() {
        let data: Vec<f64> = noise(500, 42).into_iter().map(|e| 20.0 + e).collect();
        let fit = fit_arima(ArimaSpec::new(0, 0, 0), &data).unwrap();
        let mean = fit.mean().unwrap();
        assert!((mean - 20.0).abs() < 0.2, "mean = {mean}");
        assert!(fit.sigma2() > 0.8 && fit.sigma2() < 1.2, "sigma2 = {}", fit.sigma2());
        assert_eq!(fit.n_params(), 2);
    }

    #[test]
    fn ar1_coefficient_recovery() {
        let phi = 0.7;
        let eps = noise(1000, 123);
        let mut data = vec![0.0; eps.len()];
        for t in 1..data.len() {
            data[t] = phi * data[t - 1] + eps[t];
        }

        let fit = fit_arima(ArimaSpec::new(1, 0, 0), &data).unwrap();
        assert!(
            (fit.ar()[0] - phi).abs() < 0.1,
            "AR(1) phi: expected ~{}, got {}",
            phi,
            fit.ar()[0]
        );
    }

    #[test]
    fn ma1_recovery() {
        let theta = 0.5;
        let eps = noise(1000, 456);
        let data: Vec<f64> = (0..eps.len())
            .map(|t| eps[t] + if t > 0 { theta * eps[t - 1] } else { 0.0 })
            .collect();

        let fit = fit_arima(ArimaSpec::new(0, 0, 1), &data).unwrap();
        assert!(
            (fit.ma()[0] - theta).abs() < 0.1,
            "MA(1) theta: expected ~{}, got {}",
            theta,
            fit.ma()[0]
        );
    }

    #[test]
    fn integrated_ar1_recovers_phi_on_differences() {
        let phi = -0.4;
        let eps = noise(800, 9);
        let mut w = vec![0.0; eps.len()];
        for t in 1..w.len() {
            w[t] = phi * w[t - 1] + eps[t];
        }
        let mut level = 100.0;
        let data: Vec<f64> = w
            .iter()
            .map(|x| {
                level += x;
                level
            })
            .collect();

        let fit = fit_arima(ArimaSpec::new(1, 1, 0), &data).unwrap();
        assert!(fit.mean().is_none());
        assert_eq!(fit.residuals().len(), data.len() - 1);
        assert!((fit.ar()[0] - phi).abs() < 0.1, "phi = {}", fit.ar()[0]);
    }

    #[test]
    fn more_parameters_never_lower_likelihood_much() {
        let data = noise(300, 5);
        let small = fit_arima(ArimaSpec::new(0, 0, 0), &data).unwrap();
        let big = fit_arima(ArimaSpec::new(1, 0, 1), &data).unwrap();
        assert!(big.log_likelihood() >= small.log_likelihood() - 1e-3);
    }
}
