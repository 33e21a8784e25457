//! Pointwise error metrics.

use crate::error::EvaluateError;

/// Root mean squared error between `actual` and `predicted`.
///
/// `sqrt(mean((a_i - p_i)^2))`. Symmetric in its arguments and zero when
/// they are equal. Finite inputs give a finite result unless the
/// differences themselves overflow.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`EvaluateError::LengthMismatch`] | lengths differ |
/// | [`EvaluateError::EmptyInput`] | both are empty |
/// | [`EvaluateError::NonFinite`] | a value is NaN or infinite |
///
/// # Example
///
/// ```
/// use demand_evaluate::rmse;
///
/// let e = rmse(&[1.0, 2.0, 3.0], &[1.0, 2.0, 5.0]).unwrap();
/// assert!((e - (4.0f64 / 3.0).sqrt()).abs() < 1e-12);
/// ```
pub fn rmse(actual: &[f64], predicted: &[f64]) -> Result<f64, EvaluateError> {
    check(actual, predicted)?;
    // Errors are scaled by the largest one so squaring cannot overflow.
    let scale = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).abs())
        .fold(0.0, f64::max);
    if scale == 0.0 {
        return Ok(0.0);
    }
    let sum_sq: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| {
            let e = (a - p) / scale;
            e * e
        })
        .sum();
    Ok(scale * (sum_sq / actual.len() as f64).sqrt())
}

/// Mean absolute error between `actual` and `predicted`.
///
/// # Errors
///
/// Same as [`rmse`].
pub fn mae(actual: &[f64], predicted: &[f64]) -> Result<f64, EvaluateError> {
    check(actual, predicted)?;
    let sum_abs: f64 = actual.iter().zip(predicted).map(|(a, p)| (a - p).abs()).sum();
    Ok(sum_abs / actual.len() as f64)
}

fn check(actual: &[f64], predicted: &[f64]) -> Result<(), EvaluateError> {
    if actual.len() != predicted.len() {
        return Err(EvaluateError::LengthMismatch {
            actual: actual.len(),
            predicted: predicted.len(),
        });
    }
    if actual.is_empty() {
        return Err(EvaluateError::EmptyInput);
    }
    for (index, (a, p)) in actual.iter().zip(predicted).enumerate() {
        if !a.is_finite() || !p.is_finite() {
            return Err(EvaluateError::NonFinite { index });
        }
    }
    Ok(())
}
