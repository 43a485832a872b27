//! Result and Error types for the config module

/// Type alias for `Result<T, config::Error>`
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for `stobj_config`
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Reading the configuration file from disk failed
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid JSON, or is missing/mistyped fields
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// A threshold string (e.g. `">=0.5"`) could not be parsed
    #[error("invalid threshold expression '{expression}'")]
    InvalidThreshold { expression: String },

    /// All eight interest weights are zero, so no match/merge would ever fire
    #[error("all interest weights are zero; at least one must be positive when matching is requested")]
    AllWeightsZero,

    /// A negative interest weight was supplied
    #[error("interest weight '{name}' is negative ({value})")]
    NegativeWeight { name: &'static str, value: f64 },

    /// A user-selected intensity percentile outside of the valid range
    #[error("intensity percentile {value} is outside of the valid range [0, 100]")]
    InvalidPercentile { value: f64 },

    /// A convolution radius or time window of zero or less
    #[error("{name} must be a positive integer, got {value}")]
    NonPositive { name: &'static str, value: i64 },
}
