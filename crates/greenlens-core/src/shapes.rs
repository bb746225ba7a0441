//! Selected-region shapes and the selection record handed to consumers.

use crate::geo::GeoPoint;
use crate::geometry::{circle_area, polygon_area};
use serde::{Deserialize, Serialize};

/// A finalized region selection.
///
/// Closed variant set: every consumer matches exhaustively, so adding a
/// shape kind is a compile-visible change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates", rename_all = "lowercase")]
pub enum Shape {
    /// Ordered ring of at least 3 vertices, in drawing order.
    Polygon(Vec<GeoPoint>),
    /// Axis-aligned (in lat/lng space) closed ring of exactly 4 corners.
    Rectangle([GeoPoint; 4]),
    /// Center plus great-circle radius.
    Circle {
        center: GeoPoint,
        radius_meters: f64,
    },
}

impl Shape {
    /// Build the rectangle ring from two opposite corners.
    pub fn rectangle_from_corners(start: GeoPoint, end: GeoPoint) -> Self {
        Shape::Rectangle([
            start,
            GeoPoint::new(start.lat, end.lng),
            end,
            GeoPoint::new(end.lat, start.lng),
        ])
    }

    /// Area of the shape in square meters.
    pub fn area(&self) -> f64 {
        match self {
            Shape::Polygon(points) => polygon_area(points),
            Shape::Rectangle(ring) => polygon_area(ring),
            Shape::Circle { radius_meters, .. } => circle_area(*radius_meters),
        }
    }
}

/// A committed shape together with its derived area.
///
/// The area is computed once at commit time and never stored anywhere else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    #[serde(flatten)]
    pub shape: Shape,
    /// Area in square meters.
    pub area: f64,
}

impl Selection {
    /// Derive a selection record from a finalized shape.
    pub fn from_shape(shape: Shape) -> Self {
        let area = shape.area();
        Self { shape, area }
    }

    /// Serialize for the report/analysis collaborator.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Receiver for selection changes.
///
/// Called exactly once with `Some` per successful draw and once with `None`
/// per clear, including repeated clears.
pub trait SelectionSink {
    fn on_area_selected(&mut self, selection: Option<&Selection>);
}

/// Sink that ignores selections, for shells that poll instead.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl SelectionSink for NullSink {
    fn on_area_selected(&mut self, _selection: Option<&Selection>) {}
}
