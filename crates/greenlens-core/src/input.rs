//! Pointer/wheel event routing.
//!
//! A single dispatch point decides whether an event pans the viewport or
//! feeds the drawing session, based on whether a drawing tool is armed.
//! Events are handled synchronously; nothing here ever waits on rendering.

use crate::draw::{DrawOutcome, DrawingSession, SessionError};
use crate::projection;
use crate::viewport::Viewport;
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};

/// Wheel scroll step in zoom levels, small for smooth incremental zoom.
pub const DEFAULT_WHEEL_STEP: f64 = 0.3;

/// Pointer event in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up { position: Point },
    /// Wheel scroll; positive `delta_y` scrolls away (zooms out).
    Scroll { delta_y: f64 },
}

/// Dispatches pointer events to the viewport or the drawing session.
#[derive(Debug, Clone)]
pub struct InputRouter {
    /// Zoom delta applied per wheel event.
    pub wheel_step: f64,
}

impl Default for InputRouter {
    fn default() -> Self {
        Self {
            wheel_step: DEFAULT_WHEEL_STEP,
        }
    }
}

impl InputRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route one event.
    ///
    /// Returns `Some(outcome)` when the event finished a draw gesture, so
    /// the caller can notify its selection sink.
    pub fn route(
        &self,
        event: PointerEvent,
        viewport: &mut Viewport,
        session: &mut DrawingSession,
        canvas: Size,
    ) -> Result<Option<DrawOutcome>, SessionError> {
        match event {
            PointerEvent::Down { position } => {
                if session.mode().is_some() {
                    session.begin_draw(projection::to_geo(position, viewport, canvas))?;
                } else {
                    viewport.begin_pan(position);
                }
                Ok(None)
            }
            PointerEvent::Move { position } => {
                if viewport.is_panning() {
                    viewport.pan_to(position);
                } else if session.is_drawing() {
                    session.extend_draw(projection::to_geo(position, viewport, canvas))?;
                }
                // A plain hover routes nowhere.
                Ok(None)
            }
            PointerEvent::Up { .. } => {
                if viewport.is_panning() {
                    viewport.end_pan();
                    Ok(None)
                } else if session.is_drawing() {
                    Ok(Some(session.end_draw()?))
                } else {
                    Ok(None)
                }
            }
            PointerEvent::Scroll { delta_y } => {
                let step = if delta_y > 0.0 {
                    -self.wheel_step
                } else {
                    self.wheel_step
                };
                viewport.zoom_by(step);
                Ok(None)
            }
        }
    }
}
