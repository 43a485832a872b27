//! Gridded-field input contract
//!
//! Anything that can hand back a time series of a single field on a
//! lat/lon grid can feed the verification engine. The CLI binds this to a
//! real NetCDF reader; tests bind it to in-memory data.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

use stobj_geo::GridGeometry;

/// A raw, ungridded field read straight from storage
///
/// Row-major `(x, y, t)` order, matching [`stobj_core::FloatVolume`]'s
/// layout directly so a [`RawField`] can be handed to
/// `FloatVolume::new(field.nx, field.ny, field.nt, field.data, field.sentinel)`
/// with no further rearrangement.
#[derive(Debug, Clone)]
pub struct RawField {
    pub nx: usize,
    pub ny: usize,
    pub nt: usize,
    pub data: Vec<f64>,
    pub sentinel: f64,
    pub geo: GridGeometry,
}

/// Anything that can read a named field's full time series off disk
pub trait GriddedFieldSource {
    /// Read `variable` in full, along with the lat/lon grid it sits on
    fn read_field(&self, variable: &str) -> Result<RawField>;
}

/// Reads a single-variable time series from a stack of NetCDF files, one
/// file per timestep, which is how MET-style gridded verification inputs are
/// typically supplied
pub struct NetcdfFieldSource {
    paths: Vec<PathBuf>,
}

impl NetcdfFieldSource {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }
}

impl GriddedFieldSource for NetcdfFieldSource {
    fn read_field(&self, variable: &str) -> Result<RawField> {
        if self.paths.is_empty() {
            return Err(Error::MissingVariable {
                path: "<empty file list>".into(),
                name: variable.into(),
            });
        }

        let mut slices: Vec<Vec<f64>> = Vec::with_capacity(self.paths.len());
        let mut geo: Option<GridGeometry> = None;
        let mut sentinel = -9999.0;
        let (mut nx, mut ny) = (0usize, 0usize);

        for path in &self.paths {
            let file = netcdf::open(path)?;
            let path_str = path.display().to_string();

            let var = file.variable(variable).ok_or_else(|| Error::MissingVariable {
                path: path_str.clone(),
                name: variable.into(),
            })?;

            let values: Vec<f64> = var.get_values(..)?;
            if let Some(attr) = var.attribute("missing_value") {
                if let Ok(value) = attr.value() {
                    sentinel = attribute_as_f64(&value).unwrap_or(sentinel);
                }
            }

            let lat = read_axis(&file, &path_str, "lat")?;
            let lon = read_axis(&file, &path_str, "lon")?;
            (nx, ny) = (lon.len(), lat.len());

            if geo.is_none() {
                geo = Some(GridGeometry::new(lat, lon)?);
            }

            slices.push(values);
        }

        let geo = geo.expect("at least one path was read above");
        let mut data = Vec::with_capacity(nx * ny * slices.len());
        for slice in slices {
            data.extend(slice);
        }

        Ok(RawField {
            nx,
            ny,
            nt: self.paths.len(),
            data,
            sentinel,
            geo,
        })
    }
}

fn attribute_as_f64(value: &netcdf::AttributeValue) -> Option<f64> {
    match value {
        netcdf::AttributeValue::Double(v) => Some(*v),
        netcdf::AttributeValue::Float(v) => Some(*v as f64),
        netcdf::AttributeValue::Int(v) => Some(*v as f64),
        netcdf::AttributeValue::Short(v) => Some(*v as f64),
        _ => None,
    }
}

fn read_axis(file: &netcdf::File, path: &str, name: &str) -> Result<Vec<f64>> {
    let var = file.variable(name).ok_or_else(|| Error::InvalidAxis {
        path: path.to_string(),
        name: name.into(),
    })?;
    var.get_values(..).map_err(Error::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// An in-memory [`GriddedFieldSource`] for tests that don't want to touch disk
    pub struct MemoryFieldSource {
        pub field: RawField,
    }

    impl GriddedFieldSource for MemoryFieldSource {
        fn read_field(&self, _variable: &str) -> Result<RawField> {
            Ok(self.field.clone())
        }
    }

    #[test]
    fn memory_source_hands_back_the_field_unchanged() {
        let geo = GridGeometry::new(vec![10.0, 11.0], vec![-80.0, -79.0]).unwrap();
        let field = RawField {
            nx: 2,
            ny: 2,
            nt: 1,
            data: vec![1.0, 2.0, 3.0, 4.0],
            sentinel: -9999.0,
            geo,
        };
        let source = MemoryFieldSource { field: field.clone() };
        let read_back = source.read_field("anything").unwrap();
        assert_eq!(read_back.data, field.data);
    }

    #[test]
    fn empty_path_list_is_a_missing_variable_error() {
        let source = NetcdfFieldSource::new(vec![]);
        assert!(matches!(source.read_field("temp"), Err(Error::MissingVariable { .. })));
    }
}
