//! Result and Error types for the `stobj` driver

/// Type alias for `Result<T, Error>`
pub type Result<T> = core::result::Result<T, Error>;

/// The top-level error type for the CLI driver
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] stobj_config::Error),

    #[error(transparent)]
    Core(#[from] stobj_core::Error),

    #[error(transparent)]
    Io(#[from] stobj_io::Error),

    /// Forecast and observation grids cover different geometry
    #[error("forecast and observation grids do not match: fcst is {fcst_nx}x{fcst_ny}, obs is {obs_nx}x{obs_ny}")]
    GridMismatch {
        fcst_nx: usize,
        fcst_ny: usize,
        obs_nx: usize,
        obs_ny: usize,
    },

    /// Forecast and observation series have a different number of timesteps
    #[error("forecast has {fcst_nt} timesteps but observation has {obs_nt}")]
    TimestepMismatch { fcst_nt: usize, obs_nt: usize },

    /// `--single` was given with no files
    #[error("--single mode requires at least one input file")]
    NoSingleInput,
}
