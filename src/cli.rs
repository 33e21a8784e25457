use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Daily sales demand forecasting with ARIMA order search.
#[derive(Parser)]
#[command(
    name = "demand",
    version,
    about = "Daily sales demand forecasting with ARIMA order search"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Aggregate, test, search, evaluate, refit, save and forecast.
    Run(RunArgs),
    /// Forecast from a previously saved model.
    Forecast(ForecastArgs),
}

/// Arguments for the `run` subcommand.
#[derive(clap::Args)]
pub struct RunArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "demand.toml")]
    pub config: PathBuf,

    /// Override input CSV path from config.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Override model output path from config.
    #[arg(short, long)]
    pub model_output: Option<PathBuf>,

    /// Override forecast horizon (days) from config.
    #[arg(long)]
    pub horizon: Option<usize>,

    /// Override run report JSON path from config.
    #[arg(long)]
    pub report: Option<PathBuf>,
}

/// Arguments for the `forecast` subcommand.
#[derive(clap::Args)]
pub struct ForecastArgs {
    /// Path to a saved model.
    #[arg(short, long)]
    pub model: PathBuf,

    /// Number of days to forecast.
    #[arg(long, default_value_t = 30)]
    pub horizon: usize,

    /// Forecast CSV path. Printed to stdout when omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn run_overrides() {
        let cli = Cli::parse_from([
            "demand", "-vv", "run", "--input", "sales.csv", "--horizon", "14",
        ]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Run(args) => {
                assert_eq!(args.config, PathBuf::from("demand.toml"));
                assert_eq!(args.input, Some(PathBuf::from("sales.csv")));
                assert_eq!(args.horizon, Some(14));
                assert!(args.model_output.is_none());
            }
            Command::Forecast(_) => panic!("expected run"),
        }
    }

    #[test]
    fn forecast_defaults() {
        let cli = Cli::parse_from(["demand", "forecast", "--model", "m.json"]);
        match cli.command {
            Command::Forecast(args) => {
                assert_eq!(args.horizon, 30);
                assert!(args.output.is_none());
            }
            Command::Run(_) => panic!("expected forecast"),
        }
    }
}
