use crate::error::{Error, Result};

/// Mean radius of the Earth in kilometres, used by [`gc_dist`]
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// An evenly-spaced lat/lon grid
///
/// This is the minimal geometry contract the verification core needs: given a
/// fractional grid coordinate `(x, y)` it can locate the corresponding
/// lat/lon, and vice versa. `x` indexes the longitude axis, `y` indexes the
/// latitude axis, both starting at `0`.
#[derive(Debug, Clone, PartialEq)]
pub struct GridGeometry {
    lat_axis: Vec<f64>,
    lon_axis: Vec<f64>,
}

impl GridGeometry {
    /// Build a grid from strictly increasing latitude and longitude axes
    ///
    /// ```rust
    /// # use stobj_geo::GridGeometry;
    /// let grid = GridGeometry::new(vec![10.0, 11.0, 12.0], vec![-80.0, -79.0]).unwrap();
    /// assert_eq!(grid.ny(), 3);
    /// assert_eq!(grid.nx(), 2);
    /// ```
    pub fn new(lat_axis: Vec<f64>, lon_axis: Vec<f64>) -> Result<Self> {
        if lat_axis.len() < 2 {
            return Err(Error::DegenerateAxis {
                axis: "lat",
                len: lat_axis.len(),
            });
        }
        if lon_axis.len() < 2 {
            return Err(Error::DegenerateAxis {
                axis: "lon",
                len: lon_axis.len(),
            });
        }
        if lat_axis.windows(2).any(|w| w[1] <= w[0]) {
            return Err(Error::NonMonotonicAxis { axis: "lat" });
        }
        if lon_axis.windows(2).any(|w| w[1] <= w[0]) {
            return Err(Error::NonMonotonicAxis { axis: "lon" });
        }

        Ok(Self { lat_axis, lon_axis })
    }

    /// Number of points along the longitude (x) axis
    pub fn nx(&self) -> usize {
        self.lon_axis.len()
    }

    /// Number of points along the latitude (y) axis
    pub fn ny(&self) -> usize {
        self.lat_axis.len()
    }

    /// Convert a fractional grid coordinate to `(lat, lon)`
    ///
    /// Integer coordinates land exactly on an axis point; fractional
    /// coordinates are linearly interpolated between the two bracketing
    /// points, which is accurate enough for the evenly-spaced grids this
    /// engine operates on.
    pub fn xy_to_latlon(&self, x: f64, y: f64) -> Result<(f64, f64)> {
        let lat = interpolate_axis(&self.lat_axis, y)
            .ok_or(Error::OutOfDomain { x, y })?;
        let lon = interpolate_axis(&self.lon_axis, x)
            .ok_or(Error::OutOfDomain { x, y })?;
        Ok((lat, lon))
    }

    /// Convert `(lat, lon)` back to a fractional grid coordinate
    pub fn latlon_to_xy(&self, lat: f64, lon: f64) -> Result<(f64, f64)> {
        let y = locate_axis(&self.lat_axis, lat)
            .ok_or(Error::OutOfDomain { x: lon, y: lat })?;
        let x = locate_axis(&self.lon_axis, lon)
            .ok_or(Error::OutOfDomain { x: lon, y: lat })?;
        Ok((x, y))
    }
}

/// Evaluate an evenly (or unevenly) spaced axis at a fractional index
fn interpolate_axis(axis: &[f64], index: f64) -> Option<f64> {
    let n = axis.len();
    if index < 0.0 || index > (n - 1) as f64 {
        return None;
    }
    let lo = index.floor() as usize;
    if lo >= n - 1 {
        return Some(axis[n - 1]);
    }
    let frac = index - lo as f64;
    Some(axis[lo] + frac * (axis[lo + 1] - axis[lo]))
}

/// Locate the fractional index of a value along a strictly increasing axis
fn locate_axis(axis: &[f64], value: f64) -> Option<f64> {
    let n = axis.len();
    if value < axis[0] || value > axis[n - 1] {
        return None;
    }
    for w in axis.windows(2).enumerate() {
        let (i, pair) = w;
        let (lo, hi) = (pair[0], pair[1]);
        if value >= lo && value <= hi {
            let frac = (value - lo) / (hi - lo);
            return Some(i as f64 + frac);
        }
    }
    Some((n - 1) as f64)
}

/// Great-circle distance between two lat/lon points, in kilometres
///
/// Uses the haversine formula. Inputs and output match the original tool's
/// `gc_dist` contract: latitude/longitude in degrees, distance along the
/// Earth's surface.
///
/// ```rust
/// # use stobj_geo::gc_dist;
/// // same point, zero distance
/// assert!(gc_dist(51.5, -0.1, 51.5, -0.1) < 1e-9);
/// ```
pub fn gc_dist(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (lat1, lon1, lat2, lon2) = (
        lat1.to_radians(),
        lon1.to_radians(),
        lat2.to_radians(),
        lon2.to_radians(),
    );

    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}
