//! Frame orchestration: tile readiness, overlay painting, redraw debounce.

use crate::painter::{OverlayStyle, Painter, RenderResult};
use crate::tiles::{PlannedTile, TileCoord, TileOutcome, TileSource, tile_plan};
use greenlens_core::draw::{DrawMode, DrawingSession};
use greenlens_core::projection;
use greenlens_core::shapes::Shape;
use greenlens_core::viewport::Viewport;
use kurbo::{Point, Rect, Size};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Fraction of the frame's tiles that must have arrived (loaded or failed)
/// before the overlay paints. A tuning constant carried over as-is.
pub const DEFAULT_COVERAGE_THRESHOLD: f64 = 0.8;

/// Delay used to coalesce rapid overlay redraw requests.
pub const DEFAULT_REDRAW_DELAY: Duration = Duration::from_millis(50);

/// Tunable render-loop parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    /// Tile-arrival fraction that unblocks the overlay.
    pub coverage_threshold: f64,
    /// Debounce window for overlay redraws.
    pub redraw_delay: Duration,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            coverage_threshold: DEFAULT_COVERAGE_THRESHOLD,
            redraw_delay: DEFAULT_REDRAW_DELAY,
        }
    }
}

/// Trailing-edge debouncer for overlay redraws.
///
/// Every request pushes the deadline out; the shell polls from its event
/// loop and paints once the window has elapsed with no further requests.
#[derive(Debug, Clone)]
pub struct RedrawDebouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl RedrawDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Register a redraw request at `now`.
    pub fn request(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Consume the pending redraw if its window has elapsed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// State for the frame currently being assembled.
///
/// Holds a snapshot of the viewport taken at `begin_frame` so that overlay
/// painting and tile placement stay consistent even while the live viewport
/// keeps moving.
#[derive(Debug, Clone)]
struct FrameState {
    viewport: Viewport,
    canvas: Size,
    tiles: HashMap<TileCoord, Rect>,
    expected: usize,
    arrived: usize,
}

impl FrameState {
    fn coverage_reached(&self, threshold: f64) -> bool {
        self.arrived == self.expected || self.arrived as f64 > self.expected as f64 * threshold
    }
}

/// Orchestrates tile retrieval and overlay drawing for one map view.
///
/// Tile completions may arrive in any order; only the arrival count gates
/// the overlay. A completion for a tile outside the current frame's plan
/// (the viewport has since moved or zoomed) is dropped without painting —
/// staleness falls out of the coordinate keying, nothing is cancelled.
pub struct RenderLoop {
    config: RenderConfig,
    frame: Option<FrameState>,
    overlay_painted: bool,
}

impl Default for RenderLoop {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}

impl RenderLoop {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            frame: None,
            overlay_painted: false,
        }
    }

    /// Start a new frame: snapshot the viewport, plan the covering tiles,
    /// and ask the tile collaborator for each. Returns the number of tiles
    /// requested.
    pub fn begin_frame(
        &mut self,
        viewport: &Viewport,
        canvas: Size,
        source: &mut dyn TileSource,
    ) -> usize {
        let plan = tile_plan(viewport, canvas);
        log::debug!(
            "frame started: zoom {:.1}, {} tiles",
            viewport.zoom,
            plan.len()
        );

        for tile in &plan {
            source.fetch(tile.coord);
        }

        let tiles: HashMap<TileCoord, Rect> =
            plan.iter().map(|t: &PlannedTile| (t.coord, t.dest)).collect();
        let expected = tiles.len();
        self.frame = Some(FrameState {
            viewport: viewport.clone(),
            canvas,
            expected,
            arrived: 0,
            tiles,
        });
        self.overlay_painted = false;
        expected
    }

    /// Handle one tile completion from the collaborator.
    ///
    /// Loaded tiles are painted; failures count toward readiness with their
    /// area left blank. Once coverage passes the threshold the overlay is
    /// painted, and repainted after any later tile so it stays on top.
    pub fn tile_ready(
        &mut self,
        coord: TileCoord,
        outcome: TileOutcome,
        painter: &mut dyn Painter,
        session: &DrawingSession,
    ) -> RenderResult<()> {
        let Some(frame) = self.frame.as_mut() else {
            log::debug!("tile {coord:?} arrived with no active frame, dropped");
            return Ok(());
        };
        let Some(&dest) = frame.tiles.get(&coord) else {
            log::debug!("stale tile {coord:?} dropped");
            return Ok(());
        };

        frame.arrived += 1;
        match outcome {
            TileOutcome::Loaded => painter.paint_tile(coord, dest)?,
            TileOutcome::Failed => log::warn!("tile {coord:?} failed to load"),
        }

        if self
            .frame
            .as_ref()
            .is_some_and(|f| f.coverage_reached(self.config.coverage_threshold))
        {
            self.paint_overlay(painter, session)?;
            self.overlay_painted = true;
        }
        Ok(())
    }

    /// Whether the current frame's overlay has been painted at least once.
    pub fn overlay_painted(&self) -> bool {
        self.overlay_painted
    }

    /// Make a debouncer matching this loop's configured delay.
    pub fn debouncer(&self) -> RedrawDebouncer {
        RedrawDebouncer::new(self.config.redraw_delay)
    }

    /// Paint the selection overlay from the frame's viewport snapshot:
    /// committed shape first in the solid style, then the in-progress path
    /// in the dashed preview style.
    pub fn paint_overlay(
        &self,
        painter: &mut dyn Painter,
        session: &DrawingSession,
    ) -> RenderResult<()> {
        let Some(frame) = self.frame.as_ref() else {
            return Ok(());
        };

        if let Some(selection) = session.committed() {
            paint_shape(&selection.shape, frame, painter, &OverlayStyle::committed())?;
        }

        if session.is_drawing() && !session.current_path().is_empty() {
            paint_preview(session, frame, painter)?;
        }
        Ok(())
    }
}

fn project(frame: &FrameState, points: &[greenlens_core::GeoPoint]) -> Vec<Point> {
    points
        .iter()
        .map(|p| projection::to_pixel(*p, &frame.viewport, frame.canvas))
        .collect()
}

fn paint_shape(
    shape: &Shape,
    frame: &FrameState,
    painter: &mut dyn Painter,
    style: &OverlayStyle,
) -> RenderResult<()> {
    match shape {
        Shape::Polygon(points) => painter.fill_polygon(&project(frame, points), style),
        Shape::Rectangle(ring) => painter.fill_polygon(&project(frame, ring), style),
        Shape::Circle {
            center,
            radius_meters,
        } => {
            let center_px = projection::to_pixel(*center, &frame.viewport, frame.canvas);
            let radius_px =
                projection::meters_to_pixels(*radius_meters, center.lat, frame.viewport.zoom);
            painter.fill_circle(center_px, radius_px, style)
        }
    }
}

fn paint_preview(
    session: &DrawingSession,
    frame: &FrameState,
    painter: &mut dyn Painter,
) -> RenderResult<()> {
    let style = OverlayStyle::preview();
    let path = session.current_path();
    match session.mode() {
        Some(DrawMode::Polygon) if path.len() > 1 => {
            painter.stroke_polyline(&project(frame, path), &style)
        }
        Some(DrawMode::Rectangle) if path.len() == 2 => {
            let px = project(frame, path);
            let corners = [
                px[0],
                Point::new(px[1].x, px[0].y),
                px[1],
                Point::new(px[0].x, px[1].y),
            ];
            painter.fill_polygon(&corners, &style)
        }
        Some(DrawMode::Circle) if path.len() == 2 => {
            let px = project(frame, path);
            let radius = px[0].distance(px[1]);
            painter.fill_circle(px[0], radius, &style)
        }
        _ => Ok(()),
    }
}
