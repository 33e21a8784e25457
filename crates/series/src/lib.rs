//! # demand-series
//!
//! Daily quantity series for the demand forecasting pipeline: aggregation of
//! transaction records, the strictly ordered [`DailySeries`] container,
//! chronological train/test splitting, and dated forecasts.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["Vec of Transaction"] -->|"aggregate_daily(&records, GapPolicy)"| B["DailySeries"]
//!     B -->|".train_test_split(0.8)"| C["(train, test)"]
//!     B -->|".missing_dates()"| D["gap report"]
//!     E["model values"] -->|"Forecast::following(last_date, values)"| F["Forecast"]
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use chrono::NaiveDate;
//! use demand_series::{GapPolicy, Transaction, aggregate_daily};
//!
//! let d = |day| NaiveDate::from_ymd_opt(2022, 1, day).unwrap();
//! let records = vec![
//!     Transaction::new(d(2), 3.0),
//!     Transaction::new(d(1), 1.0),
//!     Transaction::new(d(2), 4.0),
//! ];
//! let series = aggregate_daily(&records, GapPolicy::Preserve).unwrap();
//! assert_eq!(series.values(), &[1.0, 7.0]);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `aggregate` | Transaction records to daily totals, gap policy |
//! | `daily` | Ordered daily series and splitting |
//! | `sequence` | Contiguous daily date sequences |
//! | `forecast` | Dated point forecasts |
//! | `error` | Error types |

mod aggregate;
mod daily;
mod error;
mod forecast;
mod sequence;

pub use aggregate::{GapPolicy, Transaction, aggregate_daily};
pub use daily::DailySeries;
pub use error::SeriesError;
pub use forecast::Forecast;
pub use sequence::{daily_sequence, days_after};
