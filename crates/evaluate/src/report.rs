//! Train/test accuracy summary.

use serde::Serialize;
use tracing::info;

use crate::error::EvaluateError;
use crate::metrics::{mae, rmse};

/// Accuracy of one model on its training span and on the held-out span.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccuracyReport {
    /// RMSE of the in-sample one-step predictions.
    pub train_rmse: f64,
    /// RMSE of the multi-step forecast over the test span.
    pub test_rmse: f64,
    pub test_mae: f64,
    pub n_train: usize,
    /// Number of forecast steps scored, equal to the test length.
    pub horizon: usize,
}

impl AccuracyReport {
    /// Scores both spans.
    ///
    /// # Errors
    ///
    /// Any [`EvaluateError`] raised by [`rmse`] or [`mae`] on either span.
    pub fn compute(
        train_actual: &[f64],
        train_predicted: &[f64],
        test_actual: &[f64],
        test_predicted: &[f64],
    ) -> Result<Self, EvaluateError> {
        let report = Self {
            train_rmse: rmse(train_actual, train_predicted)?,
            test_rmse: rmse(test_actual, test_predicted)?,
            test_mae: mae(test_actual, test_predicted)?,
            n_train: train_actual.len(),
            horizon: test_actual.len(),
        };
        info!(
            train_rmse = report.train_rmse,
            test_rmse = report.test_rmse,
            test_mae = report.test_mae,
            horizon = report.horizon,
            "accuracy"
        );
        Ok(report)
    }
}

/// Serialize any evaluation output to pretty-printed JSON.
///
/// # Errors
///
/// Returns [`EvaluateError::Serialization`] if serialization fails.
pub fn to_json<T: Serialize>(output: &T) -> Result<String, EvaluateError> {
    serde_json::to_string_pretty(output).map_err(|e| EvaluateError::Serialization {
        reason: e.to_string(),
    })
}
