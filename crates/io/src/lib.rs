//! Output writers and the gridded-input reader contract for stobj
//!
//! Text tables ([`write_single_table`], [`write_pair_table`],
//! [`write_cluster_table`], [`write_slice_table`]) and a NetCDF object-file
//! writer ([`write_object_netcdf`]) on the output side; [`GriddedFieldSource`]
//! on the input side.

mod error;
mod netcdf_writer;
mod reader;
mod text;

pub use error::Error;
pub use netcdf_writer::{write_object_netcdf, NcWriteFlags};
pub use reader::{GriddedFieldSource, NetcdfFieldSource, RawField};
pub use text::{write_cluster_table, write_pair_table, write_single_table, write_slice_table, ClusterRow, RowHeader, SliceRow};
