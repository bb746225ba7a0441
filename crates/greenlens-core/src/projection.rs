//! Web Mercator projection between geographic and pixel coordinates.
//!
//! Pure functions of `(point, viewport, canvas size)`. The forward and
//! inverse transforms are exact mirrors of each other, so round-tripping
//! recovers the input to floating-point tolerance anywhere Mercator is
//! well-defined (lat within roughly ±85 degrees).

use crate::geo::{GeoPoint, METERS_PER_DEGREE, TILE_SIZE};
use crate::viewport::Viewport;
use kurbo::{Point, Size};
use std::f64::consts::PI;

/// World edge length in pixels at a zoom level: `256 * 2^zoom`.
pub fn world_size(zoom: f64) -> f64 {
    TILE_SIZE * 2f64.powf(zoom)
}

/// Project a geographic point into absolute world-pixel space.
fn to_world(point: GeoPoint, zoom: f64) -> Point {
    let world = world_size(zoom);
    // Clamp so arithmetic drift past the poles never produces NaN.
    let lat = point.lat.clamp(-89.999_999, 89.999_999);
    let lat_rad = lat * PI / 180.0;

    let x = (point.lng + 180.0) / 360.0 * world;
    let y = (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0 * world;
    Point::new(x, y)
}

/// Convert a geographic point to canvas pixels for the given viewport.
///
/// The canvas origin is its top-left corner; the viewport center projects
/// to the canvas center.
pub fn to_pixel(point: GeoPoint, viewport: &Viewport, canvas: Size) -> Point {
    let world_point = to_world(point, viewport.zoom);
    let world_center = to_world(viewport.center, viewport.zoom);
    Point::new(
        world_point.x - world_center.x + canvas.width / 2.0,
        world_point.y - world_center.y + canvas.height / 2.0,
    )
}

/// Convert a canvas pixel back to a geographic point. Exact inverse of
/// [`to_pixel`] via `atan(sinh(·))`.
pub fn to_geo(pixel: Point, viewport: &Viewport, canvas: Size) -> GeoPoint {
    let world = world_size(viewport.zoom);
    let world_center = to_world(viewport.center, viewport.zoom);

    let world_x = pixel.x + world_center.x - canvas.width / 2.0;
    let world_y = pixel.y + world_center.y - canvas.height / 2.0;

    let lng = world_x / world * 360.0 - 180.0;
    let n = PI - 2.0 * PI * world_y / world;
    let lat = (180.0 / PI) * (0.5 * (n.exp() - (-n).exp())).atan();

    GeoPoint::new(lat.clamp(-90.0, 90.0), lng)
}

/// Convert a ground distance in meters to screen pixels at a latitude.
///
/// Used to size circle overlays: meters shrink to fewer degrees of
/// longitude as the cosine of latitude grows.
pub fn meters_to_pixels(meters: f64, lat: f64, zoom: f64) -> f64 {
    let lat_rad = lat * PI / 180.0;
    let degrees = meters / (METERS_PER_DEGREE * lat_rad.cos());
    degrees * world_size(zoom) / 360.0
}
