//! CSV transaction reader configuration and parsing.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::NaiveDate;
use demand_series::Transaction;
use tracing::{debug, info};

use crate::error::IoError;
use crate::validate::ValidationCollector;

// ---------------------------------------------------------------------------
// ReaderConfig
// ---------------------------------------------------------------------------

/// Configuration for reading transaction records from a CSV file.
///
/// Use the builder methods (`with_*`) to customise column names, the date
/// format and the field delimiter. The [`Default`] implementation matches
/// a comma-separated export with `Date` (`%Y-%m-%d`) and `Qty` columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Header name of the date column.
    date_column: String,
    /// Header name of the quantity column.
    quantity_column: String,
    /// `chrono` format string for the date column.
    date_format: String,
    /// Field delimiter byte.
    delimiter: u8,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            date_column: "Date".into(),
            quantity_column: "Qty".into(),
            date_format: "%Y-%m-%d".into(),
            delimiter: b',',
        }
    }
}

impl ReaderConfig {
    /// Set the date column name.
    pub fn with_date_column(mut self, name: impl Into<String>) -> Self {
        self.date_column = name.into();
        self
    }

    /// Set the quantity column name.
    pub fn with_quantity_column(mut self, name: impl Into<String>) -> Self {
        self.quantity_column = name.into();
        self
    }

    /// Set the `chrono` format string used to parse dates.
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    /// Set the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn date_column(&self) -> &str {
        &self.date_column
    }

    pub fn quantity_column(&self) -> &str {
        &self.quantity_column
    }

    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    /// Validate that the configuration is internally consistent.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] listing every empty column name or
    /// format string, or a date column that equals the quantity column.
    pub fn validate(&self) -> Result<(), IoError> {
        let mut errors = ValidationCollector::new();
        if self.date_column.trim().is_empty() {
            errors.push("date_column must not be empty");
        }
        if self.quantity_column.trim().is_empty() {
            errors.push("quantity_column must not be empty");
        }
        if self.date_format.is_empty() {
            errors.push("date_format must not be empty");
        }
        if !self.date_column.is_empty() && self.date_column == self.quantity_column {
            errors.push(format!(
                "date_column and quantity_column must differ, both are '{}'",
                self.date_column
            ));
        }
        errors.finish()
    }
}

// ---------------------------------------------------------------------------
// read_transactions
// ---------------------------------------------------------------------------

/// Read transaction records from a CSV file with a header row.
///
/// Only the configured date and quantity columns are used; other columns
/// are ignored. Every unparseable row is reported, not just the first.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`IoError::FileNotFound`] | `path` does not exist |
/// | [`IoError::Csv`] | the file is not readable as CSV |
/// | [`IoError::MissingColumn`] | a configured column is not in the header |
/// | [`IoError::Validation`] | invalid config, bad rows, or no data rows |
pub fn read_transactions(path: &Path, config: &ReaderConfig) -> Result<Vec<Transaction>, IoError> {
    config.validate()?;

    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => IoError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => IoError::Csv {
            path: path.to_path_buf(),
            reason: e.to_string(),
        },
    })?;

    let records = parse_transactions(BufReader::new(file), config, path)?;
    info!(path = %path.display(), n_records = records.len(), "read transactions");
    Ok(records)
}

/// Parse CSV content from any reader. `source` is only used in errors.
pub(crate) fn parse_transactions<R: Read>(
    reader: R,
    config: &ReaderConfig,
    source: &Path,
) -> Result<Vec<Transaction>, IoError> {
    let csv_err = |e: csv::Error| IoError::Csv {
        path: source.to_path_buf(),
        reason: e.to_string(),
    };

    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(config.delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers().map_err(csv_err)?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| IoError::MissingColumn {
                name: name.to_string(),
                path: source.to_path_buf(),
            })
    };
    let date_idx = column(config.date_column.as_str())?;
    let qty_idx = column(config.quantity_column.as_str())?;
    debug!(date_idx, qty_idx, n_columns = headers.len(), "resolved columns");

    let mut out = Vec::new();
    let mut errors = ValidationCollector::new();

    for (i, row) in rdr.records().enumerate() {
        // Header is line 1.
        let line = i + 2;
        let row = row.map_err(csv_err)?;

        let date = match row.get(date_idx) {
            Some(raw) => match NaiveDate::parse_from_str(raw, &config.date_format) {
                Ok(d) => Some(d),
                Err(e) => {
                    errors.push(format!("line {line}: invalid date '{raw}' ({e})"));
                    None
                }
            },
            None => {
                errors.push(format!("line {line}: missing '{}' field", config.date_column));
                None
            }
        };

        let quantity = match row.get(qty_idx) {
            Some(raw) => match raw.parse::<f64>() {
                Ok(q) if q.is_finite() => Some(q),
                Ok(_) | Err(_) => {
                    errors.push(format!("line {line}: invalid quantity '{raw}'"));
                    None
                }
            },
            None => {
                errors.push(format!(
                    "line {line}: missing '{}' field",
                    config.quantity_column
                ));
                None
            }
        };

        if let (Some(date), Some(quantity)) = (date, quantity) {
            out.push(Transaction::new(date, quantity));
        }
    }

    if out.is_empty() && errors.is_empty() {
        errors.push(format!("no data rows in {}", source.display()));
    }
    errors.finish()?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str, config: &ReaderConfig) -> Result<Vec<Transaction>, IoError> {
        parse_transactions(content.as_bytes(), config, Path::new("test.csv"))
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn default_config() {
        let cfg = ReaderConfig::default();
        assert_eq!(cfg.date_column(), "Date");
        assert_eq!(cfg.quantity_column(), "Qty");
        assert_eq!(cfg.date_format(), "%Y-%m-%d");
        assert_eq!(cfg.delimiter(), b',');
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_reports_every_problem() {
        let cfg = ReaderConfig::default()
            .with_date_column("")
            .with_quantity_column(" ")
            .with_date_format("");
        match cfg.validate().unwrap_err() {
            IoError::Validation { count, .. } => assert_eq!(count, 3),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn same_column_twice_is_invalid() {
        let cfg = ReaderConfig::default().with_quantity_column("Date");
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("must differ"), "{err}");
    }

    #[test]
    fn extra_columns_are_ignored() {
        let csv = "TransactionID,Date,Qty,Price\nT1,2022-01-01,3,10.5\nT2,2022-01-02,4.5,7\n";
        let recs = parse(csv, &ReaderConfig::default()).unwrap();
        assert_eq!(
            recs,
            vec![
                Transaction::new(d(2022, 1, 1), 3.0),
                Transaction::new(d(2022, 1, 2), 4.5)
            ]
        );
    }

    #[test]
    fn custom_columns_format_and_delimiter() {
        let csv = "day;units\n01/02/2022;7\n";
        let cfg = ReaderConfig::default()
            .with_date_column("day")
            .with_quantity_column("units")
            .with_date_format("%d/%m/%Y")
            .with_delimiter(b';');
        let recs = parse(csv, &cfg).unwrap();
        assert_eq!(recs, vec![Transaction::new(d(2022, 2, 1), 7.0)]);
    }

    #[test]
    fn missing_column() {
        let err = parse("Date,Amount\n2022-01-01,3\n", &ReaderConfig::default()).unwrap_err();
        match err {
            IoError::MissingColumn { name, .. } => assert_eq!(name, "Qty"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn all_bad_rows_are_reported() {
        let csv = "Date,Qty\n2022-01-01,1\n2022-13-01,2\n2022-01-03,abc\n2022-01-04,NaN\n";
        match parse(csv, &ReaderConfig::default()).unwrap_err() {
            IoError::Validation { count, details } => {
                assert_eq!(count, 3);
                assert!(details.contains("line 3: invalid date '2022-13-01'"), "{details}");
                assert!(details.contains("line 4: invalid quantity 'abc'"), "{details}");
                assert!(details.contains("line 5: invalid quantity 'NaN'"), "{details}");
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn short_row_is_a_validation_error() {
        let csv = "Date,Qty\n2022-01-01\n";
        match parse(csv, &ReaderConfig::default()).unwrap_err() {
            IoError::Validation { count, details } => {
                assert_eq!(count, 1);
                assert!(details.contains("missing 'Qty' field"), "{details}");
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn header_only_is_rejected() {
        let err = parse("Date,Qty\n", &ReaderConfig::default()).unwrap_err();
        assert!(err.to_string().contains("no data rows"), "{err}");
    }

    #[test]
    fn whitespace_is_trimmed() {
        let recs = parse("Date , Qty\n 2022-03-04 , 12 \n", &ReaderConfig::default()).unwrap();
        assert_eq!(recs, vec![Transaction::new(d(2022, 3, 4), 12.0)]);
    }
}
