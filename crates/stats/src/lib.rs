//! Statistical helper functions for the demand forecasting pipeline.

use serde::Serialize;

/// Arithmetic mean of a slice. Returns 0.0 if empty.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Linear-interpolation quantile (Hyndman-Fan type 7, the numpy default).
///
/// **Expects pre-sorted input** (caller's responsibility).
///
/// # Panics
///
/// Panics if `sorted` is empty.
pub fn quantile_type7(sorted: &[f64], p: f64) -> f64 {
    assert!(
        !sorted.is_empty(),
        "quantile_type7: input must not be empty"
    );
    let n = sorted.len();
    let h = (n - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    sorted[lo] + (h - h.floor()) * (sorted[hi] - sorted[lo])
}

/// Median of pre-sorted data. For even length, averages the middle two values.
///
/// # Panics
///
/// Panics if `sorted` is empty.
pub fn median(sorted: &[f64]) -> f64 {
    assert!(!sorted.is_empty(), "median: input must not be empty");
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// Box-plot summary of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FiveNumberSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    /// Number of points outside the 1.5 * IQR whiskers.
    pub n_outliers: usize,
}

/// Minimum, quartiles, maximum and whisker outlier count.
///
/// Non-finite values are ignored. Returns `None` when no finite value remains.
pub fn five_number_summary(data: &[f64]) -> Option<FiveNumberSummary> {
    let mut sorted: Vec<f64> = data.iter().copied().filter(|x| x.is_finite()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(|a, b| a.total_cmp(b));

    let q1 = quantile_type7(&sorted, 0.25);
    let q3 = quantile_type7(&sorted, 0.75);
    let iqr = q3 - q1;
    let (lo, hi) = (q1 - 1.5 * iqr, q3 + 1.5 * iqr);

    Some(FiveNumberSummary {
        min: sorted[0],
        q1,
        median: median(&sorted),
        q3,
        max: sorted[sorted.len() - 1],
        n_outliers: sorted.iter().filter(|&&x| x < lo || x > hi).count(),
    })
}

/// Sample autocorrelation for lags `0..=max_lag`.
///
/// Uses the biased estimator (denominator `n` at every lag), so the sequence
/// is positive semi-definite. Lags beyond `n - 1` are dropped.
///
/// Returns `None` if `data` has fewer than 2 values or zero variance.
pub fn autocorrelation(data: &[f64], max_lag: usize) -> Option<Vec<f64>> {
    let n = data.len();
    if n < 2 {
        return None;
    }
    let m = mean(data);
    let denom: f64 = data.iter().map(|x| (x - m) * (x - m)).sum();
    if denom <= 0.0 {
        return None;
    }

    let max_lag = max_lag.min(n - 1);
    let acf = (0..=max_lag)
        .map(|k| {
            let num: f64 = (k..n).map(|t| (data[t] - m) * (data[t - k] - m)).sum();
            num / denom
        })
        .collect();
    Some(acf)
}

/// Sample partial autocorrelation for lags `0..=max_lag`.
///
/// Solves the Yule-Walker equations on the biased autocorrelation with the
/// Durbin-Levinson recursion. Element 0 is always 1.
///
/// Returns `None` under the same conditions as [`autocorrelation()`].
pub fn partial_autocorrelation(data: &[f64], max_lag: usize) -> Option<Vec<f64>> {
    let r = autocorrelation(data, max_lag)?;
    let max_lag = r.len() - 1;

    let mut pacf = Vec::with_capacity(max_lag + 1);
    pacf.push(1.0);
    if max_lag == 0 {
        return Some(pacf);
    }

    let mut phi = vec![r[1]];
    pacf.push(r[1]);
    for k in 2..=max_lag {
        let num = r[k] - (1..k).map(|j| phi[j - 1] * r[k - j]).sum::<f64>();
        let den = 1.0 - (1..k).map(|j| phi[j - 1] * r[j]).sum::<f64>();
        let phi_kk = if den.abs() < 1e-12 { 0.0 } else { num / den };

        let prev = phi.clone();
        for j in 1..k {
            phi[j - 1] = prev[j - 1] - phi_kk * prev[k - j - 1];
        }
        phi.push(phi_kk);
        pacf.push(phi_kk);
    }
    Some(pacf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(mean(&data), 5.0, epsilon = 1e-6);
    }

    #[test]
    fn test_mean_empty() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_quantile_type7() {
        let sorted = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_relative_eq!(quantile_type7(&sorted, 0.25), 2.0, epsilon = 1e-6);
        assert_relative_eq!(quantile_type7(&sorted, 0.1), 1.4, epsilon = 1e-10);
    }

    #[test]
    fn test_quantile_type7_numpy_crossvalidation() {
        // numpy.quantile(range(1, 11), 0.3) = 3.7
        let sorted: Vec<f64> = (1..=10).map(|x| x as f64).collect();
        assert_relative_eq!(quantile_type7(&sorted, 0.3), 3.7, epsilon = 1e-10);
    }

    #[test]
    #[should_panic(expected = "quantile_type7: input must not be empty")]
    fn test_quantile_type7_empty_panics() {
        quantile_type7(&[], 0.5);
    }

    #[test]
    fn test_median_even() {
        assert_relative_eq!(median(&[1.0, 2.0, 3.0, 4.0]), 2.5, epsilon = 1e-6);
    }

    #[test]
    fn test_five_number_summary() {
        let data = [5.0, 1.0, 3.0, 2.0, 4.0, 100.0];
        let s = five_number_summary(&data).unwrap();
        assert_eq!(s.min, 1.0);
        assert_eq!(s.max, 100.0);
        assert_relative_eq!(s.median, 3.5, epsilon = 1e-12);
        assert_relative_eq!(s.q1, 2.25, epsilon = 1e-12);
        assert_relative_eq!(s.q3, 4.75, epsilon = 1e-12);
        assert_eq!(s.n_outliers, 1);
    }

    #[test]
    fn test_five_number_summary_empty() {
        assert!(five_number_summary(&[]).is_none());
        assert!(five_number_summary(&[f64::NAN]).is_none());
    }

    #[test]
    fn test_autocorrelation_hand_computed() {
        let acf = autocorrelation(&[1.0, 2.0, 3.0, 4.0, 5.0], 2).unwrap();
        assert_relative_eq!(acf[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(acf[1], 0.4, epsilon = 1e-12);
        assert_relative_eq!(acf[2], -0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_autocorrelation_truncates_lags() {
        let acf = autocorrelation(&[1.0, 2.0, 4.0], 10).unwrap();
        assert_eq!(acf.len(), 3);
    }

    #[test]
    fn test_autocorrelation_constant() {
        assert!(autocorrelation(&[2.0, 2.0, 2.0], 1).is_none());
    }

    #[test]
    fn test_partial_autocorrelation_hand_computed() {
        let pacf = partial_autocorrelation(&[1.0, 2.0, 3.0, 4.0, 5.0], 2).unwrap();
        assert_relative_eq!(pacf[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(pacf[1], 0.4, epsilon = 1e-12);
        // (r2 - r1^2) / (1 - r1^2) = (-0.1 - 0.16) / 0.84
        assert_relative_eq!(pacf[2], -0.26 / 0.84, epsilon = 1e-12);
    }

    #[test]
    fn test_partial_autocorrelation_ar1_cuts_off() {
        use rand::SeedableRng;
        use rand_distr::{Distribution, Normal};

        let phi = 0.6;
        let mut rng = rand::rngs::StdRng::seed_from_u64(11);
        let normal = Normal::new(0.0, 1.0).unwrap();
        let mut data = vec![0.0; 5000];
        for t in 1..data.len() {
            data[t] = phi * data[t - 1] + normal.sample(&mut rng);
        }

        let pacf = partial_autocorrelation(&data, 5).unwrap();
        assert!((pacf[1] - phi).abs() < 0.05, "pacf[1] = {}", pacf[1]);
        for (k, v) in pacf.iter().enumerate().skip(2) {
            assert!(v.abs() < 0.06, "pacf[{}] = {}", k, v);
        }
    }
}
