//! Viewport state: map center, zoom, and pan interaction.

use crate::geo::GeoPoint;
use crate::projection::world_size;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Minimum allowed zoom level.
pub const MIN_ZOOM: f64 = 1.0;

/// Maximum allowed zoom level.
pub const MAX_ZOOM: f64 = 18.0;

/// Pan responsiveness multiplier applied to drag deltas.
pub const DEFAULT_PAN_SMOOTHING: f64 = 1.2;

/// In-progress pan gesture, anchored at pointer-down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragState {
    /// Screen position where the drag started.
    pub screen_start: Point,
    /// Viewport center when the drag started.
    pub center_at_start: GeoPoint,
}

/// The visible map region and its pan gesture state.
///
/// Owned by a single [`MapSession`](crate::MapSession); mutated only through
/// its zoom and pan methods, which keep `zoom` clamped to [`MIN_ZOOM`],
/// [`MAX_ZOOM`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Center of the visible region.
    pub center: GeoPoint,
    /// Zoom level, clamped to [1, 18].
    pub zoom: f64,
    /// Active pan gesture, if any.
    #[serde(skip)]
    pub drag: Option<DragState>,
    /// Multiplier applied to pan deltas.
    pub pan_smoothing: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            // San Francisco
            center: GeoPoint::new(37.7749, -122.4194),
            zoom: 13.0,
            drag: None,
            pan_smoothing: DEFAULT_PAN_SMOOTHING,
        }
    }
}

impl Viewport {
    /// Create a viewport centered on the given point.
    pub fn new(center: GeoPoint, zoom: f64) -> Self {
        Self {
            center,
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            ..Self::default()
        }
    }

    /// Adjust zoom by a delta, clamped to the allowed range.
    pub fn zoom_by(&mut self, delta: f64) {
        self.zoom = (self.zoom + delta).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Whether a pan gesture is in progress.
    pub fn is_panning(&self) -> bool {
        self.drag.is_some()
    }

    /// Start a pan gesture at a screen position.
    pub fn begin_pan(&mut self, screen: Point) {
        self.drag = Some(DragState {
            screen_start: screen,
            center_at_start: self.center,
        });
    }

    /// Move the center to follow the pointer during a pan gesture.
    ///
    /// Longitude shifts linearly with the pixel delta at the current
    /// pixels-per-degree; latitude is additionally scaled by the cosine of
    /// the anchor latitude to cancel Mercator's compression, keeping the
    /// drag visually 1:1 at any latitude. A no-op when no drag is active.
    pub fn pan_to(&mut self, screen: Point) {
        let Some(drag) = self.drag else {
            return;
        };

        let dx = screen.x - drag.screen_start.x;
        let dy = screen.y - drag.screen_start.y;
        let pixels_per_degree = world_size(self.zoom) / 360.0;
        let lat_scale = (drag.center_at_start.lat * PI / 180.0).cos();

        self.center = GeoPoint::new(
            drag.center_at_start.lat + dy / pixels_per_degree * lat_scale * self.pan_smoothing,
            drag.center_at_start.lng - dx / pixels_per_degree * self.pan_smoothing,
        );
    }

    /// Commit the pan gesture and clear drag state.
    pub fn end_pan(&mut self) {
        self.drag = None;
    }
}
