//! Forecast CSV output.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use demand_series::Forecast;
use tracing::info;

use crate::error::IoError;

/// Date format used for every written date.
pub const OUTPUT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Write a dated forecast as CSV with the header `date,forecast`.
///
/// The file is created or truncated. Dates are written as `%Y-%m-%d`.
///
/// # Errors
///
/// Returns [`IoError::Csv`] when the file cannot be created or written.
pub fn write_forecast_csv(path: &Path, forecast: &Forecast) -> Result<(), IoError> {
    let file = File::create(path).map_err(|e| IoError::Csv {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    write_forecast(BufWriter::new(file), forecast, path)?;
    info!(path = %path.display(), horizon = forecast.horizon(), "wrote forecast");
    Ok(())
}

fn write_forecast<W: Write>(writer: W, forecast: &Forecast, target: &Path) -> Result<(), IoError> {
    let csv_err = |e: csv::Error| IoError::Csv {
        path: target.to_path_buf(),
        reason: e.to_string(),
    };

    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["date", "forecast"]).map_err(csv_err)?;
    for (date, value) in forecast.iter() {
        wtr.write_record([date.format(OUTPUT_DATE_FORMAT).to_string(), value.to_string()])
            .map_err(csv_err)?;
    }
    wtr.flush().map_err(|e| IoError::Csv {
        path: target.to_path_buf(),
        reason: e.to_string(),
    })
}
