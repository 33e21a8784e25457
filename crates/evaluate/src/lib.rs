//! Forecast accuracy for the demand pipeline: pointwise error metrics and
//! a JSON-serialisable train/test summary.

mod error;
mod metrics;
mod report;

pub use error::EvaluateError;
pub use metrics::{mae, rmse};
pub use report::{AccuracyReport, to_json};
