use demand_evaluate::{AccuracyReport, EvaluateError, mae, rmse, to_json};

/// Deterministic pseudo-random sequence in `[-1, 1)`.
fn jitter(n: usize, seed: u64) -> Vec<f64> {
    let mut state = seed;
    (0..n)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            ((state >> 11) as f64 / (1u64 << 53) as f64) * 2.0 - 1.0
        })
        .collect()
}

#[test]
fn test_rmse_properties_on_many_sequences() {
    for seed in 1..20 {
        let a = jitter(50, seed);
        let b = jitter(50, seed + 100);
        assert_eq!(rmse(&a, &a).unwrap(), 0.0);
        assert_eq!(rmse(&a, &b).unwrap(), rmse(&b, &a).unwrap());
        assert!(rmse(&a, &b).unwrap() >= mae(&a, &b).unwrap());
    }
}

#[test]
fn test_constant_offset() {
    let a = jitter(30, 7);
    let b: Vec<f64> = a.iter().map(|x| x + 2.5).collect();
    assert!((rmse(&a, &b).unwrap() - 2.5).abs() < 1e-12);
    assert!((mae(&a, &b).unwrap() - 2.5).abs() < 1e-12);
}

#[test]
fn test_split_report_json() {
    // 292/73 split shape with a naive last-value forecast.
    let series: Vec<f64> = jitter(365, 3).iter().map(|x| 50.0 + 10.0 * x).collect();
    let (train, test) = series.split_at(292);
    let train_pred: Vec<f64> = std::iter::once(train[0]).chain(train[..291].iter().copied()).collect();
    let test_pred = vec![train[291]; test.len()];

    let report = AccuracyReport::compute(train, &train_pred, test, &test_pred).unwrap();
    assert_eq!(report.n_train, 292);
    assert_eq!(report.horizon, 73);
    assert!(report.test_rmse > 0.0);

    let json = to_json(&report).unwrap();
    assert!(json.contains("\"train_rmse\""));
    assert!(json.contains("\"test_mae\""));
}

#[test]
fn test_mismatch_is_not_truncated() {
    let err = rmse(&[1.0; 73], &[1.0; 30]).unwrap_err();
    assert_eq!(
        err,
        EvaluateError::LengthMismatch {
            actual: 73,
            predicted: 30
        }
    );
}
