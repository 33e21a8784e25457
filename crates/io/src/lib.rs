//! # demand-io
//!
//! Read transaction records from CSV, write dated forecasts to CSV, and
//! save or reload fitted models. Bridges external files into the
//! `demand-series` and `demand-arima` types.
//!
//! ```mermaid
//! graph LR
//!     A["sales.csv"] -->|"read_transactions(path, &ReaderConfig)"| B["Vec of Transaction"]
//!     C["ArimaFit + last date"] -->|"ModelArtifact::new"| D["ModelArtifact"]
//!     D -->|"save_model"| E["model.json"]
//!     E -->|"load_model"| D
//!     D -->|".forecast(h)"| F["Forecast"]
//!     F -->|"write_forecast_csv"| G["forecast.csv"]
//! ```

mod error;
mod model_store;
mod reader;
mod validate;
mod writer;

pub use error::IoError;
pub use model_store::{MODEL_FORMAT_VERSION, ModelArtifact, load_model, save_model};
pub use reader::{ReaderConfig, read_transactions};
pub use writer::{OUTPUT_DATE_FORMAT, write_forecast_csv};
