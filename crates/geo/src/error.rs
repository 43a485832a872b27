//! Result and Error types for the geo module

/// Type alias for `Result<T, geo::Error>`
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for `stobj_geo`
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum Error {
    /// A grid defined with fewer than two points along an axis
    #[error("grid axis '{axis}' has {len} point(s), at least 2 are required")]
    DegenerateAxis { axis: &'static str, len: usize },

    /// Axis spacing that is not strictly increasing
    #[error("grid axis '{axis}' is not strictly increasing")]
    NonMonotonicAxis { axis: &'static str },

    /// A grid coordinate outside the domain covered by the axes
    #[error("coordinate ({x}, {y}) is outside of the grid domain")]
    OutOfDomain { x: f64, y: f64 },
}
