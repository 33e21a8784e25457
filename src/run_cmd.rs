//! Run command: the full aggregate, test, search, evaluate, refit, save and
//! forecast pipeline.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use tracing::{info, info_span, warn};

use demand_arima::{ArimaFit, ENGINE_VERSION, auto_order, search_orders};
use demand_evaluate::{AccuracyReport, rmse, to_json};
use demand_io::{ModelArtifact, read_transactions, save_model, write_forecast_csv};
use demand_series::{GapPolicy, aggregate_daily};
use demand_stationarity::adf_test;

use crate::cli::RunArgs;
use crate::config::DemandConfig;
use crate::convert;
use crate::report::{
    AutoSummary, ForecastSummary, OrderScore, RunReport, SearchSummary, SelectionComparison, SeriesSummary,
};

/// Load the config and apply command-line overrides.
pub fn resolve_config(args: &RunArgs) -> Result<DemandConfig> {
    let toml_str = std::fs::read_to_string(&args.config)
        .with_context(|| format!("failed to read config file: {}", args.config.display()))?;
    let mut config: DemandConfig = toml::from_str(&toml_str).context("failed to parse TOML config")?;

    if let Some(ref input) = args.input {
        config.io.input = Some(input.clone());
    }
    if let Some(ref output) = args.model_output {
        config.io.model_output = Some(output.clone());
    }
    if let Some(ref report) = args.report {
        config.io.report_output = Some(report.clone());
    }
    if let Some(horizon) = args.horizon {
        config.forecast.horizon = horizon;
    }
    Ok(config)
}

/// Run the full pipeline from a config file.
pub fn run(args: RunArgs) -> Result<()> {
    let _cmd = info_span!("run").entered();
    let config = resolve_config(&args)?;
    execute(&config).map(|_| ())
}

/// Run the pipeline on a resolved config and return its report.
pub fn execute(config: &DemandConfig) -> Result<RunReport> {
    // Step 1: Resolve paths and settings
    let input = config
        .io
        .input
        .as_ref()
        .ok_or_else(|| anyhow!("no input path: set [io].input in config or use --input"))?;
    let model_output: &PathBuf = config.io.model_output.as_ref().ok_or_else(|| {
        anyhow!("no model output path: set [io].model_output in config or use --model-output")
    })?;

    let reader_cfg = convert::build_reader_config(&config.io)?;
    let gap_policy = convert::parse_gap_policy(&config.series.gap_policy)?;
    let train_ratio = convert::check_train_ratio(&config.split)?;
    let adf_cfg = convert::build_adf_config(&config.stationarity)?;
    let grid = convert::build_search_grid(&config.search)?;
    let auto_cfg = convert::build_auto_config(&config.auto, &adf_cfg, config.search.parallel);
    let horizon = convert::check_horizon(config.forecast.horizon)?;

    // Step 2: Read and aggregate
    info!(path = %input.display(), "reading transactions");
    let records = read_transactions(input, &reader_cfg)
        .with_context(|| format!("failed to read transactions: {}", input.display()))?;
    let series = aggregate_daily(&records, gap_policy).context("failed to aggregate transactions")?;

    let n_missing = series.missing_dates().len();
    info!(
        n_records = records.len(),
        n_days = series.len(),
        first = %series.first_date(),
        last = %series.last_date(),
        "daily series built"
    );
    if n_missing > 0 && gap_policy == GapPolicy::Preserve {
        warn!(
            n_missing,
            "calendar days without transactions are absent from the series"
        );
    }

    // Step 3: Stationarity
    let adf = adf_test(series.values(), &adf_cfg).context("stationarity test failed")?;
    info!(
        statistic = adf.statistic,
        p_value = adf.p_value,
        used_lag = adf.used_lag,
        verdict = %adf.verdict,
        "ADF test"
    );

    // Step 4: Split and search on the training prefix
    let (train, test) = series
        .train_test_split(train_ratio)
        .context("failed to split series")?;
    info!(n_train = train.len(), n_test = test.len(), "train/test split");

    let search = search_orders(train.values(), &grid).context("order search failed")?;
    let best = search.best_order();
    info!(
        best = %best,
        aic = search.best_fit().aic(),
        n_failed = search.n_failed(),
        "best order on training data"
    );

    // Step 5: Evaluate the best training fit
    let fit = search.best_fit();
    let train_pred = fit
        .predict(0, train.len() - 1)
        .context("in-sample prediction failed")?;
    let test_pred = fit.forecast(test.len()).context("test forecast failed")?;
    let accuracy = AccuracyReport::compute(train.values(), &train_pred, test.values(), &test_pred)
        .context("accuracy evaluation failed")?;

    // Step 5b: Automatic selection on the same split, for comparison
    let auto = match auto_cfg {
        Some(ref auto_cfg) => {
            let auto = auto_order(train.values(), auto_cfg).context("automatic order selection failed")?;
            let scored = score(auto.search().best_fit(), test.values())?;
            info!(
                grid = %best,
                grid_rmse = accuracy.test_rmse,
                auto = %scored.order,
                auto_rmse = scored.test_rmse,
                "grid and automatic selection compared"
            );
            Some(AutoSummary {
                score: scored,
                differencing: auto.steps().to_vec(),
                n_candidates: auto.search().candidates().len(),
                n_failed: auto.search().n_failed(),
            })
        }
        None => None,
    };

    // Step 6: Refit on the whole series, save, forecast
    let final_fit = best
        .fit(series.values())
        .with_context(|| format!("refitting {best} on the full series failed"))?;
    let artifact = ModelArtifact::new(final_fit, series.last_date());
    save_model(model_output, &artifact)
        .with_context(|| format!("failed to save model: {}", model_output.display()))?;

    let forecast = artifact.forecast(horizon).context("forecast failed")?;
    info!(horizon, mean = forecast.mean(), "forecast");
    if let Some(ref path) = config.io.forecast_output {
        write_forecast_csv(path, &forecast)
            .with_context(|| format!("failed to write forecast: {}", path.display()))?;
    }

    // Step 7: Report
    let report = RunReport {
        engine_version: ENGINE_VERSION,
        series: SeriesSummary::describe(&series, gap_policy),
        stationarity: adf,
        search: SearchSummary {
            n_train: train.len(),
            n_failed: search.n_failed(),
            best,
            best_aic: search.best_fit().aic(),
            candidates: search.candidates().to_vec(),
        },
        selection: SelectionComparison {
            grid: OrderScore {
                order: best,
                aic: search.best_fit().aic(),
                test_rmse: accuracy.test_rmse,
            },
            auto,
        },
        accuracy,
        forecast: ForecastSummary {
            horizon: forecast.horizon(),
            first_date: forecast.dates().first().copied(),
            mean: forecast.mean(),
        },
    };

    if let Some(ref path) = config.io.report_output {
        let json = to_json(&report).context("failed to serialize run report")?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report: {}", path.display()))?;
        info!(path = %path.display(), "report written");
    }

    Ok(report)
}

/// Order, AIC and test-split RMSE of a model fitted on the training prefix.
fn score(fit: &ArimaFit, test: &[f64]) -> Result<OrderScore> {
    let pred = fit.forecast(test.len()).context("test forecast failed")?;
    let test_rmse = rmse(test, &pred).context("accuracy evaluation failed")?;
    Ok(OrderScore {
        order: fit.spec(),
        aic: fit.aic(),
        test_rmse,
    })
}
