//! Geometry math: great-circle distance and planar area approximations.

use crate::geo::{EQUATORIAL_RADIUS_M, GeoPoint, MEAN_RADIUS_M};
use std::f64::consts::PI;

/// Great-circle distance between two points in meters (haversine formula).
pub fn haversine_distance(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let d_lat = (b.lat - a.lat) * PI / 180.0;
    let d_lng = (b.lng - a.lng) * PI / 180.0;

    let h = (d_lat / 2.0).sin().powi(2)
        + (a.lat * PI / 180.0).cos()
            * (b.lat * PI / 180.0).cos()
            * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    MEAN_RADIUS_M * c
}

/// Polygon area in square meters via the shoelace formula.
///
/// Coordinates are treated as planar, converted to radians and scaled by
/// the equatorial radius squared. A small-area approximation: fine for
/// neighborhood-scale selections, increasingly wrong for continent-scale
/// ones. Returns 0 for fewer than 3 vertices.
pub fn polygon_area(points: &[GeoPoint]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }

    let mut sum = 0.0;
    for i in 0..points.len() {
        let j = (i + 1) % points.len();
        let (xi, yi) = (points[i].lat * PI / 180.0, points[i].lng * PI / 180.0);
        let (xj, yj) = (points[j].lat * PI / 180.0, points[j].lng * PI / 180.0);
        sum += xi * yj - xj * yi;
    }
    sum.abs() * EQUATORIAL_RADIUS_M * EQUATORIAL_RADIUS_M / 2.0
}

/// Area of a circle of the given radius in meters.
pub fn circle_area(radius_meters: f64) -> f64 {
    PI * radius_meters * radius_meters
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::METERS_PER_DEGREE;

    #[test]
    fn test_haversine_zero_for_same_point() {
        let p = GeoPoint::new(37.7749, -122.4194);
        assert!(haversine_distance(&p, &p).abs() < 1e-9);
    }

    #[test]
    fn test_haversine_one_degree_latitude() {
        // One degree of latitude is roughly 111.2 km on the mean sphere.
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(1.0, 0.0);
        let d = haversine_distance(&a, &b);
        assert!((d - 111_195.0).abs() < 100.0, "got {d}");
    }

    #[test]
    fn test_haversine_is_symmetric() {
        let a = GeoPoint::new(37.7749, -122.4194);
        let b = GeoPoint::new(37.8044, -122.2712);
        let ab = haversine_distance(&a, &b);
        let ba = haversine_distance(&b, &a);
        assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn test_polygon_area_known_rectangle() {
        // 0.001 x 0.001 degree square at the equator; the planar estimate
        // is (111320 * 0.001)^2 and the shoelace result must land within 1%.
        let ring = [
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 0.001),
            GeoPoint::new(0.001, 0.001),
            GeoPoint::new(0.001, 0.0),
        ];
        let area = polygon_area(&ring);
        let expected = (METERS_PER_DEGREE * 0.001).powi(2);
        assert!(
            (area - expected).abs() / expected < 0.01,
            "area {area} vs expected {expected}"
        );
    }

    #[test]
    fn test_polygon_area_degenerate() {
        assert_eq!(polygon_area(&[]), 0.0);
        let two = [GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 1.0)];
        assert_eq!(polygon_area(&two), 0.0);
    }

    #[test]
    fn test_polygon_area_winding_independent() {
        let cw = [
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.001, 0.0),
            GeoPoint::new(0.001, 0.001),
            GeoPoint::new(0.0, 0.001),
        ];
        let ccw: Vec<GeoPoint> = cw.iter().rev().copied().collect();
        assert!((polygon_area(&cw) - polygon_area(&ccw)).abs() < 1e-9);
    }

    #[test]
    fn test_circle_area() {
        let area = circle_area(100.0);
        assert!((area - PI * 10_000.0).abs() < 1e-9);
    }
}
