use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use demand_series::{GapPolicy, Transaction, aggregate_daily};

fn random_records(n: usize, seed: u64) -> Vec<Transaction> {
    let start = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let offset: u64 = rng.random_range(0..60);
            let qty: u32 = rng.random_range(1..20);
            Transaction::new(start + Days::new(offset), qty as f64)
        })
        .collect()
}

#[test]
fn one_entry_per_distinct_date_with_exact_sums() {
    for seed in 0..5 {
        let records = random_records(500, seed);

        let mut expected: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for r in &records {
            *expected.entry(r.date).or_insert(0.0) += r.quantity;
        }

        let series = aggregate_daily(&records, GapPolicy::Preserve).unwrap();
        assert_eq!(series.len(), expected.len());
        for ((date, value), (exp_date, exp_value)) in series.iter().zip(expected.iter()) {
            assert_eq!(date, *exp_date);
            assert_eq!(value, *exp_value);
        }
        assert!(series.dates().windows(2).all(|w| w[0] < w[1]));
    }
}

#[test]
fn total_quantity_is_conserved() {
    let records = random_records(1000, 42);
    let total: f64 = records.iter().map(|r| r.quantity).sum();

    for policy in [GapPolicy::Preserve, GapPolicy::ZeroFill] {
        let series = aggregate_daily(&records, policy).unwrap();
        let sum: f64 = series.values().iter().sum();
        assert_eq!(sum, total);
    }
}

#[test]
fn zero_fill_spans_whole_calendar_range() {
    let d = |day| NaiveDate::from_ymd_opt(2022, 3, day).unwrap();
    let records = vec![
        Transaction::new(d(10), 1.0),
        Transaction::new(d(1), 1.0),
        Transaction::new(d(5), 2.0),
    ];
    let series = aggregate_daily(&records, GapPolicy::ZeroFill).unwrap();
    assert_eq!(series.len(), 10);
    assert_eq!(series.first_date(), d(1));
    assert_eq!(series.last_date(), d(10));
    assert_eq!(series.values().iter().filter(|&&v| v == 0.0).count(), 7);
}

#[test]
fn split_then_forecast_dates_follow_training_tail() {
    let records = random_records(300, 7);
    let series = aggregate_daily(&records, GapPolicy::ZeroFill).unwrap();
    let (train, test) = series.train_test_split(0.8).unwrap();
    assert_eq!(train.len() + test.len(), series.len());

    let forecast = demand_series::Forecast::following(train.last_date(), vec![0.0; test.len()]).unwrap();
    assert_eq!(forecast.dates(), test.dates());
}
