//! ARMA state-space representation.
//!
//! Writes the ARMA(p,q) part of an ARIMA model in Harvey's form:
//!
//! ```text
//! x[t+1] = T * x[t] + R * e[t+1]     (state transition)
//! w[t]   = x[t][0]                   (observation)
//! ```
//!
//! where `T` is the companion matrix of the AR polynomial, `R` carries the
//! MA weights and `e[t] ~ N(0, sigma2)`. `sigma2` is concentrated out of the
//! likelihood, so every covariance here is in units of `sigma2`.
//!
//! **Not part of the public API.**

use ndarray::{Array1, Array2, Axis};

/// Upper bound on doubling steps when solving the Lyapunov equation.
const MAX_DOUBLING_STEPS: usize = 64;

/// State-space matrices of an ARMA(p,q) process.
#[derive(Clone, Debug)]
pub(crate) struct StateSpace {
    r: usize,
    t: Array2<f64>,
    rrt: Array2<f64>,
}

impl StateSpace {
    /// Builds the state-space form from AR and MA coefficients.
    pub(crate) fn new(ar: &[f64], ma: &[f64]) -> Self {
        let p = ar.len();
        let q = ma.len();
        let r = p.max(q + 1).max(1);

        // Companion form: AR weights down the first column, ones above the diagonal.
        let mut t = Array2::zeros((r, r));
        for (i, &phi) in ar.iter().enumerate() {
            t[[i, 0]] = phi;
        }
        for i in 0..r - 1 {
            t[[i, i + 1]] = 1.0;
        }

        let mut r_vec = Array1::zeros(r);
        r_vec[0] = 1.0;
        for (j, &theta) in ma.iter().enumerate() {
            r_vec[j + 1] = theta;
        }

        let r_col = r_vec.view().insert_axis(Axis(1));
        let r_row = r_vec.view().insert_axis(Axis(0));
        let rrt = r_col.dot(&r_row);

        Self { r, t, rrt }
    }

    /// State dimension `r = max(p, q+1)`, minimum 1.
    pub(crate) fn r(&self) -> usize {
        self.r
    }

    /// Transition matrix `T` (r×r).
    pub(crate) fn t(&self) -> &Array2<f64> {
        &self.t
    }

    /// Precomputed `R·Rᵀ` (r×r).
    pub(crate) fn rrt(&self) -> &Array2<f64> {
        &self.rrt
    }

    /// Unconditional state covariance: the solution of `P = T P Tᵀ + R Rᵀ`.
    ///
    /// Uses the doubling iteration `P ← P + A P Aᵀ`, `A ← A²`, which sums
    /// `2^k` terms of the series `Σ Tʲ R Rᵀ (Tʲ)ᵀ` after `k` steps.
    pub(crate) fn stationary_covariance(&self) -> Array2<f64> {
        let mut p = self.rrt.clone();
        let mut a = self.t.clone();
        for _ in 0..MAX_DOUBLING_STEPS {
            let increment = a.dot(&p).dot(&a.t());
            p += &increment;
            a = a.dot(&a);
            let a_max = a.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
            if a_max < 1e-15 || !a_max.is_finite() {
                break;
            }
        }
        p
    }
}
