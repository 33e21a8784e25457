//! MacKinnon approximate p-values and finite-sample critical values for the
//! Dickey-Fuller statistic with a constant and a single series.
//!
//! P-values follow MacKinnon (1994) response surfaces, critical values
//! MacKinnon (2010).

use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};

/// Above this statistic the p-value is 1.
const TAU_MAX: f64 = 2.74;
/// Below this statistic the p-value is 0.
const TAU_MIN: f64 = -18.83;
/// Switch point between the small-p and large-p polynomials.
const TAU_STAR: f64 = -1.61;

const TAU_SMALLP: [f64; 3] = [2.1659, 1.4412, 0.038269];
const TAU_LARGEP: [f64; 4] = [1.7339, 0.93202, -0.12745, -0.010368];

const CRIT_1: [f64; 4] = [-3.43035, -6.5393, -16.786, -79.433];
const CRIT_5: [f64; 4] = [-2.86154, -2.8903, -4.234, -40.04];
const CRIT_10: [f64; 4] = [-2.56677, -1.5384, -2.809, 0.0];

/// Critical values of the test statistic at the conventional levels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CriticalValues {
    #[serde(rename = "1%")]
    pub one_pct: f64,
    #[serde(rename = "5%")]
    pub five_pct: f64,
    #[serde(rename = "10%")]
    pub ten_pct: f64,
}

/// Approximate p-value of a Dickey-Fuller statistic.
pub fn mackinnon_p_value(stat: f64) -> f64 {
    if stat.is_nan() {
        return f64::NAN;
    }
    if stat > TAU_MAX {
        return 1.0;
    }
    if stat < TAU_MIN {
        return 0.0;
    }
    let coeffs: &[f64] = if stat <= TAU_STAR {
        &TAU_SMALLP
    } else {
        &TAU_LARGEP
    };
    Normal::standard().cdf(polyval(coeffs, stat))
}

/// Critical values for a regression with `nobs` observations.
pub fn critical_values(nobs: usize) -> CriticalValues {
    let inv = 1.0 / nobs as f64;
    CriticalValues {
        one_pct: polyval(&CRIT_1, inv),
        five_pct: polyval(&CRIT_5, inv),
        ten_pct: polyval(&CRIT_10, inv),
    }
}

/// `c[0] + c[1] x + c[2] x^2 + ...`
fn polyval(coeffs: &[f64], x: f64) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, &c| acc * x + c)
}
