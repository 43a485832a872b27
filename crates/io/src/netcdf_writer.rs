//! NetCDF object-file output
//!
//! Writes a labeled [`IntVolume`] to a self-describing NetCDF file: the 2D
//! lat/lon axes the objects sit on, the object-id mask itself, and
//! optionally the raw (pre-convolution) field and the cluster-id remap,
//! each gated independently by [`NcWriteFlags`].

use crate::error::Result;
use std::path::Path;

use stobj_core::IntVolume;
use stobj_geo::GridGeometry;

/// Which variables [`write_object_netcdf`] writes
///
/// Mirrors the four flags of the `nc_output` configuration sub-object, kept
/// as plain booleans here so this crate doesn't need to depend on
/// `stobj-config` just to name them.
#[derive(Debug, Clone, Copy)]
pub struct NcWriteFlags {
    pub latlon: bool,
    pub raw: bool,
    pub object_id: bool,
    pub cluster_id: bool,
}

impl Default for NcWriteFlags {
    fn default() -> Self {
        Self {
            latlon: true,
            raw: true,
            object_id: true,
            cluster_id: true,
        }
    }
}

/// Write `mask` (an object-labeled volume) to `path` as NetCDF
///
/// `prefix` names the forecast/observation side (`"fcst"`, `"obs"`, or
/// `"obj"` for single-field mode); variables are written as
/// `{prefix}_obj_id`, `{prefix}_raw` and `{prefix}_clus_id`. `raw` is the
/// original unconvolved field and `clus_ids` the per-voxel composite id
/// (both already flattened `(t, y, x)`, row-major); either may be omitted
/// when the corresponding flag is off or the caller has nothing to offer
/// (simple, unmerged runs have no cluster ids). `0` marks background/no
/// cluster in the integer variables.
pub fn write_object_netcdf<P: AsRef<Path>>(
    path: P,
    mask: &IntVolume,
    raw: Option<&[f64]>,
    clus_ids: Option<&[i32]>,
    geo: &GridGeometry,
    prefix: &str,
    flags: NcWriteFlags,
) -> Result<()> {
    let mut file = netcdf::create(path)?;

    file.add_dimension("time", mask.nt())?;
    file.add_dimension("y", mask.ny())?;
    file.add_dimension("x", mask.nx())?;

    if flags.latlon {
        let mut lat = Vec::with_capacity(mask.nx() * mask.ny());
        let mut lon = Vec::with_capacity(mask.nx() * mask.ny());
        for y in 0..mask.ny() {
            for x in 0..mask.nx() {
                let (point_lat, point_lon) = geo.xy_to_latlon(x as f64, y as f64)?;
                lat.push(point_lat);
                // west-positive longitude, per convention
                lon.push(-point_lon);
            }
        }

        let mut lat_var = file.add_variable::<f64>("lat", &["y", "x"])?;
        lat_var.put_values(&lat, ..)?;
        let mut lon_var = file.add_variable::<f64>("lon", &["y", "x"])?;
        lon_var.put_values(&lon, ..)?;
    }

    if flags.object_id {
        let mut data = Vec::with_capacity(mask.nx() * mask.ny() * mask.nt());
        for t in 0..mask.nt() {
            for y in 0..mask.ny() {
                for x in 0..mask.nx() {
                    data.push(mask.get(x, y, t));
                }
            }
        }

        let mut obj_var = file.add_variable::<i32>(&format!("{prefix}_obj_id"), &["time", "y", "x"])?;
        obj_var.put_values(&data, ..)?;
        obj_var.put_attribute("missing_value", 0i32)?;
    }

    if flags.raw {
        if let Some(raw) = raw {
            let mut raw_var = file.add_variable::<f64>(&format!("{prefix}_raw"), &["time", "y", "x"])?;
            raw_var.put_values(raw, ..)?;
        }
    }

    if flags.cluster_id {
        if let Some(ids) = clus_ids {
            let mut clus_var = file.add_variable::<i32>(&format!("{prefix}_clus_id"), &["time", "y", "x"])?;
            clus_var.put_values(ids, ..)?;
            clus_var.put_attribute("missing_value", 0i32)?;
        }
    }

    Ok(())
}
