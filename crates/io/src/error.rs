//! Result and Error types for stobj-io

/// Type alias for `Result<T, io::Error>`
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for `stobj_io`
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Netcdf(#[from] netcdf::Error),

    #[error(transparent)]
    Core(#[from] stobj_core::Error),

    #[error(transparent)]
    Geo(#[from] stobj_geo::Error),

    /// A requested field variable is missing from the input file
    #[error("variable '{name}' not found in {path}")]
    MissingVariable { path: String, name: String },

    /// A required axis variable (lat/lon/time) is missing or malformed
    #[error("axis '{name}' is missing or malformed in {path}")]
    InvalidAxis { path: String, name: String },
}
