//! Ordinary least squares for the Dickey-Fuller regression.
//!
//! **Not part of the public API.**

use ndarray::{Array1, Array2};

use crate::error::StationarityError;

/// Relative pivot threshold below which `XᵀX` is treated as singular.
const PIVOT_TOL: f64 = 1e-12;
/// Residual sum of squares at or below this fraction of `yᵀy` counts as exact.
const EXACT_FIT_TOL: f64 = 1e-20;

/// Result of one OLS regression.
#[derive(Clone, Debug)]
pub(crate) struct OlsFit {
    pub(crate) coef: Vec<f64>,
    pub(crate) t_values: Vec<f64>,
    pub(crate) ssr: f64,
    pub(crate) aic: f64,
}

/// Regresses `y` on the columns of `x`.
///
/// AIC uses the Gaussian log-likelihood with the MLE variance `ssr / n` and
/// counts one parameter per column.
pub(crate) fn ols(y: &Array1<f64>, x: &Array2<f64>) -> Result<OlsFit, StationarityError> {
    let (n, k) = x.dim();
    if n <= k {
        return Err(StationarityError::InsufficientData { n, min: k + 1 });
    }

    let xtx = x.t().dot(x);
    let xty = x.t().dot(y);
    let inv = invert(&xtx)?;
    let coef = inv.dot(&xty);

    let resid = y - &x.dot(&coef);
    let ssr = resid.dot(&resid);
    if !(ssr > EXACT_FIT_TOL * y.dot(y)) {
        return Err(StationarityError::PerfectFit);
    }

    let sigma2 = ssr / (n - k) as f64;
    let t_values = (0..k)
        .map(|j| coef[j] / (sigma2 * inv[[j, j]]).sqrt())
        .collect();

    let nf = n as f64;
    let llf = -0.5 * nf * ((2.0 * std::f64::consts::PI).ln() + (ssr / nf).ln() + 1.0);
    let aic = -2.0 * llf + 2.0 * k as f64;

    Ok(OlsFit {
        coef: coef.to_vec(),
        t_values,
        ssr,
        aic,
    })
}

/// Gauss-Jordan inversion with partial pivoting.
fn invert(a: &Array2<f64>) -> Result<Array2<f64>, StationarityError> {
    let k = a.nrows();
    let scale = a.iter().fold(0.0_f64, |m, v| m.max(v.abs())).max(1.0);
    let mut m = a.clone();
    let mut inv = Array2::<f64>::eye(k);

    for col in 0..k {
        let pivot_row = (col..k)
            .max_by(|&i, &j| m[[i, col]].abs().total_cmp(&m[[j, col]].abs()))
            .unwrap_or(col);
        if m[[pivot_row, col]].abs() < PIVOT_TOL * scale {
            return Err(StationarityError::SingularDesign);
        }
        if pivot_row != col {
            for c in 0..k {
                m.swap([col, c], [pivot_row, c]);
                inv.swap([col, c], [pivot_row, c]);
            }
        }

        let pivot = m[[col, col]];
        for c in 0..k {
            m[[col, c]] /= pivot;
            inv[[col, c]] /= pivot;
        }

        for r in 0..k {
            if r == col {
                continue;
            }
            let factor = m[[r, col]];
            if factor == 0.0 {
                continue;
            }
            for c in 0..k {
                m[[r, c]] -= factor * m[[col, c]];
                inv[[r, c]] -= factor * inv[[col, c]];
            }
        }
    }

    Ok(inv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn simple_regression_matches_closed_form() {
        let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
        let ys = [2.1, 3.9, 6.2, 7.8, 10.1];
        let x = Array2::from_shape_fn((5, 2), |(i, j)| if j == 0 { 1.0 } else { xs[i] });
        let y = Array1::from(ys.to_vec());

        let fit = ols(&y, &x).unwrap();

        let mx = xs.iter().sum::<f64>() / 5.0;
        let my = ys.iter().sum::<f64>() / 5.0;
        let sxy: f64 = xs.iter().zip(ys.iter()).map(|(a, b)| (a - mx) * (b - my)).sum();
        let sxx: f64 = xs.iter().map(|a| (a - mx) * (a - mx)).sum();
        let slope = sxy / sxx;
        let intercept = my - slope * mx;

        assert_abs_diff_eq!(fit.coef[0], intercept, epsilon = 1e-10);
        assert_abs_diff_eq!(fit.coef[1], slope, epsilon = 1e-10);

        let ssr: f64 = xs
            .iter()
            .zip(ys.iter())
            .map(|(a, b)| (b - intercept - slope * a).powi(2))
            .sum();
        assert_abs_diff_eq!(fit.ssr, ssr, epsilon = 1e-10);

        let se_slope = (ssr / 3.0 / sxx).sqrt();
        assert_abs_diff_eq!(fit.t_values[1], slope / se_slope, epsilon = 1e-8);
    }

    #[test]
    fn invert_identity() {
        let a = Array2::<f64>::eye(3);
        assert_eq!(invert(&a).unwrap(), a);
    }

    #[test]
    fn invert_requires_pivoting() {
        let a = array![[0.0, 1.0], [1.0, 0.0]];
        let inv = invert(&a).unwrap();
        assert_abs_diff_eq!(inv[[0, 1]], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(inv[[1, 0]], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn collinear_columns_are_singular() {
        let x = Array2::from_shape_fn((6, 2), |(i, _)| i as f64);
        let y = Array1::from(vec![1.0, 3.0, 2.0, 5.0, 4.0, 6.0]);
        assert_eq!(ols(&y, &x).unwrap_err(), StationarityError::SingularDesign);
    }

    #[test]
    fn exact_fit_is_rejected() {
        let x = Array2::from_shape_fn((4, 2), |(i, j)| if j == 0 { 1.0 } else { i as f64 });
        let y = Array1::from(vec![1.0, 3.0, 5.0, 7.0]);
        assert_eq!(ols(&y, &x).unwrap_err(), StationarityError::PerfectFit);
    }

    #[test]
    fn too_few_rows() {
        let x = Array2::<f64>::ones((2, 2));
        let y = Array1::from(vec![1.0, 2.0]);
        assert!(matches!(
            ols(&y, &x).unwrap_err(),
            StationarityError::InsufficientData { .. }
        ));
    }
}
