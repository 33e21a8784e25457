use std::path::PathBuf;

use serde::Deserialize;

/// Top-level demand forecasting configuration (`demand.toml`).
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DemandConfig {
    /// I/O settings.
    #[serde(default)]
    pub io: IoConfig,

    /// Daily aggregation settings.
    #[serde(default)]
    pub series: SeriesToml,

    /// Train/test split settings.
    #[serde(default)]
    pub split: SplitToml,

    /// Stationarity test settings.
    #[serde(default)]
    pub stationarity: StationarityToml,

    /// Order search settings.
    #[serde(default)]
    pub search: SearchToml,

    /// Automatic order selection, compared against the grid search.
    #[serde(default)]
    pub auto: AutoToml,

    /// Forecast settings.
    #[serde(default)]
    pub forecast: ForecastToml,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoConfig {
    pub input: Option<PathBuf>,
    pub model_output: Option<PathBuf>,
    pub forecast_output: Option<PathBuf>,
    pub report_output: Option<PathBuf>,
    #[serde(default = "default_date_column")]
    pub date_column: String,
    #[serde(default = "default_quantity_column")]
    pub quantity_column: String,
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            input: None,
            model_output: None,
            forecast_output: None,
            report_output: None,
            date_column: default_date_column(),
            quantity_column: default_quantity_column(),
            date_format: default_date_format(),
            delimiter: default_delimiter(),
        }
    }
}

fn default_date_column() -> String {
    "Date".to_string()
}
fn default_quantity_column() -> String {
    "Qty".to_string()
}
fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}
fn default_delimiter() -> String {
    ",".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeriesToml {
    /// `"preserve"` or `"zero_fill"`.
    #[serde(default = "default_gap_policy")]
    pub gap_policy: String,
}

impl Default for SeriesToml {
    fn default() -> Self {
        Self {
            gap_policy: default_gap_policy(),
        }
    }
}

fn default_gap_policy() -> String {
    "preserve".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SplitToml {
    #[serde(default = "default_train_ratio")]
    pub train_ratio: f64,
}

impl Default for SplitToml {
    fn default() -> Self {
        Self {
            train_ratio: default_train_ratio(),
        }
    }
}

fn default_train_ratio() -> f64 {
    0.8
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StationarityToml {
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    #[serde(default)]
    pub max_lag: Option<usize>,
}

impl Default for StationarityToml {
    fn default() -> Self {
        Self {
            alpha: default_alpha(),
            max_lag: None,
        }
    }
}

fn default_alpha() -> f64 {
    0.05
}

/// Inclusive `[min, max]` bounds per order.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchToml {
    #[serde(default = "default_pq_range")]
    pub p: [usize; 2],
    #[serde(default = "default_d_range")]
    pub d: [usize; 2],
    #[serde(default = "default_pq_range")]
    pub q: [usize; 2],
    #[serde(default = "default_true")]
    pub parallel: bool,
}

impl Default for SearchToml {
    fn default() -> Self {
        Self {
            p: default_pq_range(),
            d: default_d_range(),
            q: default_pq_range(),
            parallel: true,
        }
    }
}

fn default_pq_range() -> [usize; 2] {
    [0, 4]
}
fn default_d_range() -> [usize; 2] {
    [0, 2]
}
fn default_true() -> bool {
    true
}

/// Upper bounds for automatic order selection.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AutoToml {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_auto_pq")]
    pub max_p: usize,
    #[serde(default = "default_auto_d")]
    pub max_d: usize,
    #[serde(default = "default_auto_pq")]
    pub max_q: usize,
    /// Cap on `p + q`. At least `max_p + max_q` searches every pair.
    #[serde(default = "default_auto_max_order")]
    pub max_order: usize,
}

impl Default for AutoToml {
    fn default() -> Self {
        Self {
            enabled: true,
            max_p: default_auto_pq(),
            max_d: default_auto_d(),
            max_q: default_auto_pq(),
            max_order: default_auto_max_order(),
        }
    }
}

fn default_auto_pq() -> usize {
    5
}
fn default_auto_d() -> usize {
    2
}
fn default_auto_max_order() -> usize {
    5
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ForecastToml {
    #[serde(default = "default_horizon")]
    pub horizon: usize,
}

impl Default for ForecastToml {
    fn default() -> Self {
        Self {
            horizon: default_horizon(),
        }
    }
}

fn default_horizon() -> usize {
    30
}
