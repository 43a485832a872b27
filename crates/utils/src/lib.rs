//! Numeric and string helpers shared by the other `stobj` crates
//!
//! These are left public for convenience and have no dependency on anything
//! else in the workspace, so every other crate can pull them in freely.

// Alias for the format! macro
pub use std::format as f;

// Modules
mod error;
mod option_ext;
mod percentile;
mod pwl;
mod slice_ext;
mod sort_ext;
mod string_ext;
mod value_ext;

// Flatten
pub use error::{Error, Result};
pub use option_ext::OptionExt;
pub use percentile::percentile;
pub use pwl::PiecewiseLinear;
pub use slice_ext::SliceExt;
pub use sort_ext::SortExt;
pub use string_ext::StringExt;
pub use value_ext::ValueExt;
