//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Result, bail};

use demand_arima::{AutoConfig, SearchGrid};
use demand_io::ReaderConfig;
use demand_series::GapPolicy;
use demand_stationarity::AdfConfig;

use crate::config::*;

/// Parses a gap policy name into the corresponding enum variant.
pub fn parse_gap_policy(s: &str) -> Result<GapPolicy> {
    match s.to_lowercase().as_str() {
        "preserve" => Ok(GapPolicy::Preserve),
        "zero_fill" | "zero-fill" => Ok(GapPolicy::ZeroFill),
        other => bail!("unknown gap policy: {other:?}"),
    }
}

/// Builds a [`ReaderConfig`] from the TOML I/O configuration.
pub fn build_reader_config(io: &IoConfig) -> Result<ReaderConfig> {
    let delimiter = match io.delimiter.as_bytes() {
        [b] => *b,
        _ => bail!("delimiter must be a single byte, got {:?}", io.delimiter),
    };
    let cfg = ReaderConfig::default()
        .with_date_column(&io.date_column)
        .with_quantity_column(&io.quantity_column)
        .with_date_format(&io.date_format)
        .with_delimiter(delimiter);
    cfg.validate()?;
    Ok(cfg)
}

/// Checks the train ratio lies strictly between 0 and 1.
pub fn check_train_ratio(split: &SplitToml) -> Result<f64> {
    let r = split.train_ratio;
    if !(r > 0.0 && r < 1.0) {
        bail!("train_ratio must be in (0, 1), got {r}");
    }
    Ok(r)
}

/// Builds a [`SearchGrid`] from the TOML search configuration.
pub fn build_search_grid(search: &SearchToml) -> Result<SearchGrid> {
    for (name, [lo, hi]) in [("p", search.p), ("d", search.d), ("q", search.q)] {
        if lo > hi {
            bail!("search.{name} must be [min, max] with min <= max, got [{lo}, {hi}]");
        }
    }
    Ok(SearchGrid::new(
        search.p[0]..=search.p[1],
        search.d[0]..=search.d[1],
        search.q[0]..=search.q[1],
    )
    .with_parallel(search.parallel))
}

/// Builds an [`AdfConfig`] from the TOML stationarity configuration.
pub fn build_adf_config(st: &StationarityToml) -> Result<AdfConfig> {
    if !(st.alpha > 0.0 && st.alpha < 1.0) {
        bail!("stationarity.alpha must be in (0, 1), got {}", st.alpha);
    }
    Ok(AdfConfig::new()
        .with_alpha(st.alpha)
        .with_max_lag(st.max_lag))
}

/// Builds the [`AutoConfig`] for the automatic selection, or `None` when it
/// is disabled. It shares the ADF settings and parallelism of the main run.
pub fn build_auto_config(auto: &AutoToml, adf: &AdfConfig, parallel: bool) -> Option<AutoConfig> {
    auto.enabled.then(|| {
        AutoConfig::new()
            .with_max_p(auto.max_p)
            .with_max_d(auto.max_d)
            .with_max_q(auto.max_q)
            .with_max_order(Some(auto.max_order))
            .with_adf(adf.clone())
            .with_parallel(parallel)
    })
}

/// Checks a forecast horizon is at least one day.
pub fn check_horizon(horizon: usize) -> Result<usize> {
    if horizon == 0 {
        bail!("forecast horizon must be at least 1");
    }
    Ok(horizon)
}
