//! Grid geometry: the lat/lon <-> grid-coordinate contract the core needs
//!
//! This is deliberately minimal. It is not a map-projection library; it
//! models the single evenly-spaced lat/lon grid that gridded forecast and
//! observation fields are defined on.

mod error;
mod geometry;

pub use error::Error;
pub use geometry::{gc_dist, GridGeometry, EARTH_RADIUS_KM};
