//! Configuration loading and validation for a verification run
//!
//! Configuration is plain JSON, parsed with `serde`/`serde_json` and
//! validated in one [`Config::validate`] pass rather than scattering checks
//! across the driver.

mod config;
mod error;
mod threshold;
mod weights;

pub use config::{Config, FieldConfig, HeaderInfo, NcOutput, NcOutputFlags, OutputConfig};
pub use error::Error;
pub use threshold::{Threshold, ThresholdOp};
pub use weights::{InterestFunctions, InterestFunctionsRaw, Weights};
