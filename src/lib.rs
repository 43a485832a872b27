//! Space-time object-based verification engine for gridded meteorological
//! fields
//!
//! Compares forecast and observation fields by convolving and thresholding
//! each into a binary mask, labeling 3D (x, y, t) connected objects, computing
//! per-object attributes, and matching/merging forecast objects against
//! observation objects via a fuzzy interest score. [`run`] drives the whole
//! pipeline for a parsed [`Cli`].

mod cli;
mod driver;
mod error;

pub use cli::Cli;
pub use driver::run;
pub use error::{Error, Result};
