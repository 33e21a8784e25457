//! Order search integration tests.

use demand_arima::{CandidateOutcome, SearchGrid, search_orders};
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

fn ar1(phi: f64, n: usize, seed: u64) -> Vec<f64> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let normal = Normal::new(0.0, 1.0).unwrap();
    let mut data = vec![0.0; n];
    for t in 1..n {
        data[t] = phi * data[t - 1] + normal.sample(&mut rng);
    }
    data.into_iter().map(|x| x + 50.0).collect()
}

#[test]
fn parallel_and_sequential_agree() {
    let data = ar1(0.6, 250, 10);
    let grid = SearchGrid::new(0..=2, 0..=1, 0..=2);
    let par = search_orders(&data, &grid).unwrap();
    let seq = search_orders(&data, &grid.clone().with_parallel(false)).unwrap();

    assert_eq!(par.candidates(), seq.candidates());
    assert_eq!(par.best_order(), seq.best_order());
}

#[test]
fn best_has_minimum_finite_aic() {
    let data = ar1(0.7, 300, 11);
    let report = search_orders(&data, &SearchGrid::new(0..=2, 0..=1, 0..=2)).unwrap();

    let best_aic = report.best().aic().unwrap();
    assert!(best_aic.is_finite());
    assert_eq!(report.best_fit().aic(), best_aic);
    for c in report.candidates() {
        if let Some(aic) = c.aic() {
            assert!(aic >= best_aic);
        }
    }
    for c in &report.candidates()[..report.best_index()] {
        assert!(c.aic().is_none_or(|aic| aic > best_aic));
    }
}

#[test]
fn candidates_follow_grid_order() {
    let data = ar1(0.5, 120, 12);
    let grid = SearchGrid::new(0..=1, 0..=2, 0..=1);
    let report = search_orders(&data, &grid).unwrap();
    let orders: Vec<_> = report.candidates().iter().map(|c| c.order).collect();
    assert_eq!(orders, grid.orders());
}

#[test]
fn short_series_records_failures_without_aborting() {
    // Five observations: AR(5) cannot be fit, lower orders can.
    let data = [3.0, 7.0, 4.0, 9.0, 5.0];
    let grid = SearchGrid::new(0..=5, 0..=0, 0..=0).with_parallel(false);
    let report = search_orders(&data, &grid).unwrap();

    assert_eq!(report.candidates().len(), 6);
    assert!(report.n_failed() >= 1);
    let last = &report.candidates()[5];
    assert!(matches!(last.outcome, CandidateOutcome::Failed { .. }));
    assert!(report.best().is_fitted());
}

#[test]
fn ar1_data_prefers_autoregression_over_white_noise() {
    let data = ar1(0.8, 400, 13);
    let grid = SearchGrid::new(0..=1, 0..=0, 0..=0);
    let report = search_orders(&data, &grid).unwrap();
    assert_eq!(report.best_order().order(), (1, 0, 0));
}
