//! Result and Error types for the core module

/// Type alias for `Result<T, core::Error>`
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for `stobj_core`
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The forecast and observation fields (or a field and its mask) have
    /// mismatched grid dimensions
    #[error("grid dimension mismatch: {a_name} is {a_nx}x{a_ny}x{a_nt}, {b_name} is {b_nx}x{b_ny}x{b_nt}")]
    DimensionMismatch {
        a_name: &'static str,
        a_nx: usize,
        a_ny: usize,
        a_nt: usize,
        b_name: &'static str,
        b_nx: usize,
        b_ny: usize,
        b_nt: usize,
    },

    /// A volume was constructed with a zero-length axis
    #[error("{name} volume has a zero-length axis (nx={nx}, ny={ny}, nt={nt})")]
    EmptyVolume {
        name: &'static str,
        nx: usize,
        ny: usize,
        nt: usize,
    },

    /// Attribute computation was attempted on an empty object (no true voxels)
    #[error("cannot compute attributes for an empty object (label {label})")]
    EmptyObject { label: i32 },

    /// A requested label does not exist in this volume
    #[error("label {label} is not present in this volume")]
    UnknownLabel { label: i32 },

    /// Configuration failed validation
    #[error(transparent)]
    Config(#[from] stobj_config::Error),

    /// Grid geometry lookup failed
    #[error(transparent)]
    Geo(#[from] stobj_geo::Error),

    /// A numeric helper from `stobj-utils` failed
    #[error(transparent)]
    Utils(#[from] stobj_utils::Error),
}
