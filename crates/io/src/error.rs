//! Error types for demand-io.

use std::path::PathBuf;

/// Error type for all fallible operations in the demand-io crate.
///
/// Covers file access, CSV parsing, schema validation of the transaction
/// table, model persistence and errors bubbling up from the series and
/// model crates.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps an error originating from the CSV reader or writer.
    #[error("csv error in {}: {reason}", path.display())]
    Csv {
        /// File being read or written.
        path: PathBuf,
        /// Description of the underlying CSV failure.
        reason: String,
    },

    /// Returned when one or more validation checks fail.
    #[error("{count} validation error(s): {details}")]
    Validation {
        /// Number of accumulated validation failures.
        count: usize,
        /// Human-readable summary of the failures.
        details: String,
    },

    /// Returned when a required column is not present in the header.
    #[error("column '{name}' not found in {}", path.display())]
    MissingColumn {
        /// Name of the missing column.
        name: String,
        /// Path to the file that was inspected.
        path: PathBuf,
    },

    /// Returned when a model file cannot be written, read or decoded.
    #[error("model persistence failed for {}: {reason}", path.display())]
    Persistence {
        /// Model file path.
        path: PathBuf,
        /// Description of the failure.
        reason: String,
    },

    /// Returned when a model file uses an unsupported format version.
    #[error("model format version {found} is not supported (expected {supported})")]
    IncompatibleModel {
        /// Version recorded in the file.
        found: u64,
        /// Version this build reads and writes.
        supported: u32,
    },

    /// Wraps an error originating from the demand-series crate.
    #[error("series error: {reason}")]
    Series {
        /// Description of the underlying series failure.
        reason: String,
    },

    /// Wraps an error originating from the demand-arima crate.
    #[error("model error: {reason}")]
    Model {
        /// Description of the underlying model failure.
        reason: String,
    },
}

impl From<demand_series::SeriesError> for IoError {
    fn from(e: demand_series::SeriesError) -> Self {
        IoError::Series {
            reason: e.to_string(),
        }
    }
}

impl From<demand_arima::ArimaError> for IoError {
    fn from(e: demand_arima::ArimaError) -> Self {
        IoError::Model {
            reason: e.to_string(),
        }
    }
}
