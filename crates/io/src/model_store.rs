//! Versioned JSON persistence for fitted models.
//!
//! A saved model is a [`ModelArtifact`]: the fit itself plus the metadata
//! needed to reload and date its forecasts. Loading checks the envelope
//! version before decoding the fit, then validates the fit's internal
//! consistency.
//!
//! ```text
//! {
//!   "format_version": 1,
//!   "engine_version": "0.1.0",
//!   "order": { "p": 2, "d": 1, "q": 3 },
//!   "last_date": "2022-12-31",
//!   "fit": { ... }
//! }
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use chrono::NaiveDate;
use demand_arima::{ArimaFit, ArimaSpec, ENGINE_VERSION};
use demand_series::Forecast;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::IoError;

/// Envelope version written by [`save_model`] and accepted by [`load_model`].
pub const MODEL_FORMAT_VERSION: u32 = 1;

/// A fitted model together with the metadata stored next to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Layout version of this envelope.
    pub format_version: u32,
    /// Version of the estimation code that produced `fit`.
    pub engine_version: String,
    /// Order of `fit`, duplicated for readers that skip the fit body.
    pub order: ArimaSpec,
    /// Last date of the training series; forecasts start the day after.
    pub last_date: NaiveDate,
    pub fit: ArimaFit,
}

impl ModelArtifact {
    /// Wraps `fit` for the running build.
    pub fn new(fit: ArimaFit, last_date: NaiveDate) -> Self {
        Self {
            format_version: MODEL_FORMAT_VERSION,
            engine_version: ENGINE_VERSION.to_string(),
            order: fit.spec(),
            last_date,
            fit,
        }
    }

    /// Dated forecast for the `horizon` days after [`last_date`](Self::last_date).
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`IoError::Model`] | `horizon == 0` or the filter fails |
    /// | [`IoError::Series`] | the dates run past the calendar range |
    pub fn forecast(&self, horizon: usize) -> Result<Forecast, IoError> {
        let values = self.fit.forecast(horizon)?;
        Ok(Forecast::following(self.last_date, values)?)
    }
}

/// Write `artifact` as pretty-printed JSON, replacing any existing file.
///
/// # Errors
///
/// Returns [`IoError::Persistence`] when the file cannot be created or
/// written.
pub fn save_model(path: &Path, artifact: &ModelArtifact) -> Result<(), IoError> {
    let fail = |reason: String| IoError::Persistence {
        path: path.to_path_buf(),
        reason,
    };

    let file = File::create(path).map_err(|e| fail(e.to_string()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, artifact).map_err(|e| fail(e.to_string()))?;
    writer.flush().map_err(|e| fail(e.to_string()))?;

    info!(
        path = %path.display(),
        order = %artifact.order,
        format_version = artifact.format_version,
        "saved model"
    );
    Ok(())
}

/// Read a model written by [`save_model`].
///
/// A differing `engine_version` is accepted with a warning.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`IoError::FileNotFound`] | `path` does not exist |
/// | [`IoError::IncompatibleModel`] | `format_version` is not [`MODEL_FORMAT_VERSION`] |
/// | [`IoError::Persistence`] | unreadable file, malformed JSON, or an inconsistent fit |
pub fn load_model(path: &Path) -> Result<ModelArtifact, IoError> {
    let fail = |reason: String| IoError::Persistence {
        path: path.to_path_buf(),
        reason,
    };

    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => IoError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => fail(e.to_string()),
    })?;

    let value: serde_json::Value =
        serde_json::from_reader(BufReader::new(file)).map_err(|e| fail(e.to_string()))?;

    let found = value
        .get("format_version")
        .and_then(serde_json::Value::as_u64)
        .ok_or_else(|| fail("missing or invalid format_version".into()))?;
    if found != u64::from(MODEL_FORMAT_VERSION) {
        return Err(IoError::IncompatibleModel {
            found,
            supported: MODEL_FORMAT_VERSION,
        });
    }

    let artifact: ModelArtifact = serde_json::from_value(value).map_err(|e| fail(e.to_string()))?;

    if artifact.order != artifact.fit.spec() {
        return Err(fail(format!(
            "envelope order {} does not match fitted {}",
            artifact.order,
            artifact.fit.spec()
        )));
    }
    artifact.fit.validate().map_err(|e| fail(e.to_string()))?;

    if artifact.engine_version != ENGINE_VERSION {
        warn!(
            saved = %artifact.engine_version,
            running = ENGINE_VERSION,
            "model was saved by a different engine version"
        );
    }

    info!(path = %path.display(), order = %artifact.order, "loaded model");
    Ok(artifact)
}
