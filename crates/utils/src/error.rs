//! Result and Error types for the utils module

/// Type alias for `Result<T, utils::Error>`
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for `stobj_utils`
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum Error {
    /// An empty slice of floats for SliceExt
    #[error("slice contains no values")]
    SliceContainsNoValues,

    /// The slice of float values contains things like NAN or INFINITY
    #[error("slice contains undefined values (NaN or infinite)")]
    SliceContainsUndefinedValues,

    /// A catch-all for functions returning errors that should be unreachable
    #[error("uncaptured error condition")]
    UncapturedErrorCondition,

    /// Value that is searched for outside of the min/max of the array
    #[error("value {value} outside of bounds [{lower_bound}, {upper_bound}]")]
    ValueOutsideOfBounds {
        value: f64,
        lower_bound: f64,
        upper_bound: f64,
    },

    /// For when a slice has fewer than the minimum required values
    #[error("slice of length {length} is below the minimum required length {minimum_required}")]
    BelowMinimumSliceLength {
        length: usize,
        minimum_required: usize,
    },

    /// The tolerance for bin edges should not be greater than 100% of the width
    #[error("tolerance {tolerance} is unreasonable, expected between {minimum} and {maximum}")]
    UnreasonableBoundaryTolerance {
        tolerance: f64,
        minimum: f64,
        maximum: f64,
    },

    /// A percentile request outside of the valid [0, 100] range
    #[error("percentile {requested} is outside of the valid range [0, 100]")]
    PercentileOutOfRange { requested: f64 },

    /// A piecewise-linear function defined with fewer than two knots, or with
    /// knots whose x-coordinates are not strictly increasing
    #[error("piecewise-linear function requires at least two knots in strictly increasing x order")]
    InvalidPiecewiseLinear,
}
