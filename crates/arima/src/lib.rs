//! # demand-arima
//!
//! ARIMA(p,d,q) model fitting, forecasting and order search via
//! state-space maximum-likelihood (Kalman filter).
//!
//! ## Typestate Workflow
//!
//! ```mermaid
//! graph LR
//!     A["ArimaSpec::new(p, d, q)"] -->|".fit(&levels)?"| B["ArimaFit"]
//!     B --> C[".forecast(h)"]
//!     B --> D[".predict(start, end)"]
//!     B --> E[".aic()"]
//!     H["search_orders(&levels, &grid)?"] -->|"grid search"| R["SearchReport"]
//!     R -->|".best_fit()"| B
//!     U["auto_order(&levels, &config)?"] -->|"ADF picks d, then search"| R
//! ```
//!
//! ## Usage Paths
//!
//! **Direct fit** (known orders):
//! ```
//! use demand_arima::ArimaSpec;
//!
//! let levels: Vec<f64> = (0..60).map(|t| 50.0 + ((t * 7) % 11) as f64).collect();
//! let fit = ArimaSpec::new(1, 0, 0).fit(&levels).unwrap();
//! let forecast = fit.forecast(7).unwrap();
//! assert_eq!(forecast.len(), 7);
//! ```
//!
//! **AIC grid search** (unknown orders):
//! ```
//! use demand_arima::{SearchGrid, search_orders};
//!
//! let levels: Vec<f64> = (0..60).map(|t| 50.0 + ((t * 7) % 11) as f64).collect();
//! let grid = SearchGrid::new(0..=1, 0..=1, 0..=1);
//! let report = search_orders(&levels, &grid).unwrap();
//! assert_eq!(report.candidates().len(), 8);
//! let best = report.best_fit();
//! assert!(best.aic().is_finite());
//! ```
//!
//! **Automatic** (ADF chooses `d`, AIC chooses `p` and `q`):
//! ```
//! use demand_arima::{AutoConfig, auto_order};
//!
//! let levels: Vec<f64> = (0..80).map(|t| 50.0 + ((t * 7) % 11) as f64).collect();
//! let config = AutoConfig::new().with_max_p(1).with_max_q(1);
//! let report = auto_order(&levels, &config).unwrap();
//! assert_eq!(report.search().best_order().d(), report.d());
//! ```
//!
//! ## Mathematical Glossary
//!
//! | Symbol | Accessor | Meaning |
//! |--------|----------|---------|
//! | phi | [`ArimaFit::ar()`] | AR coefficients: weights on past differenced values |
//! | d | [`ArimaSpec::d()`] | number of first differences taken before fitting |
//! | theta | [`ArimaFit::ma()`] | MA coefficients: weights on past forecast errors |
//! | sigma2 | [`ArimaFit::sigma2()`] | Innovation (white-noise) variance |
//! | mu | [`ArimaFit::mean()`] | Mean of an undifferenced series |
//! | AIC | [`ArimaFit::aic()`] | Akaike Information Criterion (lower = better) |

mod auto;
mod diff;
mod error;
mod fit;
mod selection;
mod spec;

pub(crate) mod kalman;
pub(crate) mod optimizer;
pub(crate) mod params;
pub(crate) mod state_space;

pub use auto::{AutoConfig, AutoReport, DifferencingOutcome, DifferencingStep, auto_order, select_d};
pub use error::ArimaError;
pub use fit::ArimaFit;
pub use selection::{Candidate, CandidateOutcome, SearchGrid, SearchReport, best_candidate, search_orders};
pub use spec::ArimaSpec;

/// Version of the estimation code, recorded next to persisted models.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
