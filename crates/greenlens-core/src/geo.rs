//! Geographic coordinate primitives.

use serde::{Deserialize, Serialize};

/// Square tile edge length in pixels, the standard slippy-map size.
pub const TILE_SIZE: f64 = 256.0;

/// Earth's equatorial radius in meters (WGS84), used for area scaling.
pub const EQUATORIAL_RADIUS_M: f64 = 6_378_137.0;

/// Earth's mean radius in meters, used for great-circle distances.
pub const MEAN_RADIUS_M: f64 = 6_371_000.0;

/// Meters per degree of latitude (and of longitude at the equator).
pub const METERS_PER_DEGREE: f64 = 111_320.0;

/// A point on the globe in decimal degrees.
///
/// Latitude is positive north, longitude positive east. Pixel-space
/// coordinates use `kurbo::Point`; the two spaces never mix silently.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees, [-90, 90].
    pub lat: f64,
    /// Longitude in degrees, [-180, 180].
    pub lng: f64,
}

impl GeoPoint {
    /// Create a new geographic point.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Planar distance to another point in degree space.
    ///
    /// Not a ground distance; used only for small-delta comparisons such
    /// as the polygon decimation threshold.
    pub fn degree_distance(&self, other: &GeoPoint) -> f64 {
        let dlat = self.lat - other.lat;
        let dlng = self.lng - other.lng;
        (dlat * dlat + dlng * dlng).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degree_distance() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(3.0, 4.0);
        assert!((a.degree_distance(&b) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_degree_distance_is_symmetric() {
        let a = GeoPoint::new(37.7749, -122.4194);
        let b = GeoPoint::new(37.78, -122.41);
        assert!((a.degree_distance(&b) - b.degree_distance(&a)).abs() < f64::EPSILON);
    }
}
