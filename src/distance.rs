//! Great-circle distance on the WGS84 ellipsoid.

use crate::location::Coordinate;
use geo::{GeodesicDistance, Point};

/// Geodesic distance in kilometres. Exactly zero for identical coordinates.
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    if a == b {
        return 0.0;
    }
    let pa = Point::new(a.lon, a.lat);
    let pb = Point::new(b.lon, b.lat);
    pa.geodesic_distance(&pb) / 1000.0
}
