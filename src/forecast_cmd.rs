//! Forecast command: reload a saved model and forecast forward.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use demand_io::{OUTPUT_DATE_FORMAT, load_model, write_forecast_csv};

use crate::cli::ForecastArgs;
use crate::convert;

pub fn run(args: ForecastArgs) -> Result<()> {
    let _cmd = info_span!("forecast").entered();
    let horizon = convert::check_horizon(args.horizon)?;

    let artifact = load_model(&args.model)
        .with_context(|| format!("failed to load model: {}", args.model.display()))?;
    info!(
        order = %artifact.order,
        last_date = %artifact.last_date,
        engine_version = %artifact.engine_version,
        "model loaded"
    );

    let forecast = artifact.forecast(horizon).context("forecast failed")?;
    info!(horizon, mean = forecast.mean(), "forecast");

    match args.output {
        Some(path) => write_forecast_csv(&path, &forecast)
            .with_context(|| format!("failed to write forecast: {}", path.display()))?,
        None => {
            println!("date,forecast");
            for (date, value) in forecast.iter() {
                println!("{},{value}", date.format(OUTPUT_DATE_FORMAT));
            }
        }
    }
    Ok(())
}
