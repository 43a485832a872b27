//! Command line arguments

use clap::Parser;
use std::path::PathBuf;

/// Space-time object-based verification engine for gridded meteorological fields
#[derive(Parser, Debug)]
#[command(name = "stobj", version, about, long_about = None)]
pub struct Cli {
    /// Forecast field file(s), one per timestep, in chronological order
    #[arg(long = "fcst", num_args = 1.., value_name = "FILE")]
    pub fcst: Vec<PathBuf>,

    /// Observation field file(s), one per timestep, in chronological order
    #[arg(long = "obs", num_args = 1.., value_name = "FILE")]
    pub obs: Vec<PathBuf>,

    /// Run configuration in JSON
    #[arg(long = "config", value_name = "FILE")]
    pub config: PathBuf,

    /// Single-field file(s): replaces `--fcst`/`--obs` with a single-object-only run
    #[arg(long = "single", num_args = 1.., value_name = "FILE")]
    pub single: Vec<PathBuf>,

    /// Name of the gridded variable to read from each input file
    #[arg(long = "field", default_value = "data", value_name = "NAME")]
    pub field: String,

    /// Directory output tables and the NetCDF object file are written to
    #[arg(long = "outdir", default_value = ".", value_name = "DIR")]
    pub outdir: PathBuf,

    /// Optional log file; logs go to stderr if omitted
    #[arg(long = "log", value_name = "FILE")]
    pub log: Option<PathBuf>,

    /// Verbosity level, repeatable (`-v`, `-vv`, ...)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

impl Cli {
    /// Whether this run is in `--single` mode rather than a forecast/observation pair
    pub fn is_single_mode(&self) -> bool {
        !self.single.is_empty()
    }
}
