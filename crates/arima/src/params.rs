//! Unconstrained parametrisation of AR and MA polynomials.
//!
//! **Not part of the public API.**

/// Maps unconstrained parameters to stationary/invertible coefficients
/// via the PACF parametrization (Jones 1980, Monahan 1984).
///
/// Step 1: `r_k = tanh(alpha_k)` maps each parameter to (-1, 1).
/// Step 2: Levinson-Durbin recursion converts partial autocorrelations
///         to polynomial coefficients.
///
/// The same transform enforces stationarity (for AR) and invertibility
/// (for MA) when applied independently to each set of coefficients.
pub(crate) fn unconstrained_to_coeffs(alpha: &[f64]) -> Vec<f64> {
    let p = alpha.len();
    if p == 0 {
        return Vec::new();
    }

    // Step 1: map each unconstrained parameter to (-1, 1) via tanh
    let r: Vec<f64> = alpha.iter().map(|a| a.tanh()).collect();

    // Step 2: Levinson-Durbin recursion
    let mut phi = vec![0.0; p];
    let mut prev = vec![0.0; p];

    phi[0] = r[0];

    for k in 1..p {
        // Copy phi into prev
        prev[..p].copy_from_slice(&phi[..p]);

        phi[k] = r[k];
        for j in 0..k {
            phi[j] = prev[j] - r[k] * prev[k - 1 - j];
        }
    }

    phi
}

/// MA coefficients `theta` such that `1 + θ₁B + … + θ_qB^q` is invertible.
///
/// The PACF transform yields a stable polynomial in `1 - φ₁B - …`, so the
/// MA weights are its negation.
pub(crate) fn unconstrained_to_ma(beta: &[f64]) -> Vec<f64> {
    unconstrained_to_coeffs(beta).into_iter().map(|c| -c).collect()
}
