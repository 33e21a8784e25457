//! Unit-root testing for daily demand series.
//!
//! Runs the augmented Dickey-Fuller test with a constant term, choosing the
//! number of lagged differences by AIC, and reports the statistic, MacKinnon
//! p-value, critical values and a [`Verdict`] at the configured level.
//!
//! ```mermaid
//! graph LR
//!     A[levels] --> B[Δy regression per lag]
//!     B --> C[AIC lag choice]
//!     C --> D[t-stat of y_t-1]
//!     D --> E[MacKinnon p-value]
//!     E --> F[Verdict]
//! ```
//!
//! # Quick start
//!
//! ```
//! use demand_stationarity::{AdfConfig, Verdict, adf_test};
//!
//! // Pseudo-random draws on [0, 1): no unit root.
//! let mut state = 12345_u64;
//! let data: Vec<f64> = (0..200)
//!     .map(|_| {
//!         state = state
//!             .wrapping_mul(6364136223846793005)
//!             .wrapping_add(1442695040888963407);
//!         (state >> 33) as f64 / (1_u64 << 31) as f64
//!     })
//!     .collect();
//! let result = adf_test(&data, &AdfConfig::default()).unwrap();
//! assert_eq!(result.verdict, Verdict::Stationary);
//! ```

mod adf;
mod error;
mod mackinnon;
mod ols;
mod verdict;

pub use adf::{AdfConfig, AdfResult, LagSelection, adf_test};
pub use error::StationarityError;
pub use mackinnon::{CriticalValues, critical_values, mackinnon_p_value};
pub use verdict::Verdict;
