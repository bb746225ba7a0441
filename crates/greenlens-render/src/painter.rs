//! Painter collaborator trait and overlay styling.

use crate::tiles::TileCoord;
use kurbo::{Point, Rect};
use thiserror::Error;

/// Render errors surfaced by painter implementations.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("paint failed: {0}")]
    Paint(String),
}

/// Result type for painter operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// RGBA color, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Stroke and fill styling for overlay shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayStyle {
    pub stroke: Rgba,
    pub fill: Rgba,
    pub stroke_width: f64,
    /// Dashed outline marks an in-progress preview.
    pub dashed: bool,
}

impl OverlayStyle {
    /// Solid green style for the committed selection.
    pub fn committed() -> Self {
        Self {
            stroke: Rgba::new(0x16, 0xa3, 0x4a, 0xff),
            fill: Rgba::new(34, 197, 94, 77),
            stroke_width: 2.0,
            dashed: false,
        }
    }

    /// Dashed emerald style for the in-progress preview.
    pub fn preview() -> Self {
        Self {
            stroke: Rgba::new(0x05, 0x96, 0x69, 0xff),
            fill: Rgba::new(16, 185, 129, 51),
            stroke_width: 2.0,
            dashed: true,
        }
    }
}

/// Drawing surface collaborator.
///
/// Implementations paint onto whatever surface the shell owns (HTML canvas,
/// GPU scene, test recorder). Tile pixels are looked up by coordinate: the
/// shell keeps the decoded images, the engine only addresses them. All
/// painting is idempotent and derived from the state passed in.
pub trait Painter {
    /// Blit the tile image for `coord` into its destination rectangle.
    fn paint_tile(&mut self, coord: TileCoord, dest: Rect) -> RenderResult<()>;

    /// Fill and stroke a closed polygon given in canvas coordinates.
    fn fill_polygon(&mut self, points: &[Point], style: &OverlayStyle) -> RenderResult<()>;

    /// Stroke an open polyline (polygon preview while drawing).
    fn stroke_polyline(&mut self, points: &[Point], style: &OverlayStyle) -> RenderResult<()>;

    /// Fill and stroke a circle given in canvas coordinates.
    fn fill_circle(&mut self, center: Point, radius_px: f64, style: &OverlayStyle)
    -> RenderResult<()>;
}
