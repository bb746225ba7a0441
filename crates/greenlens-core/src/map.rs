//! The owned per-view map session.

use crate::draw::{DrawMode, DrawOutcome, DrawingSession, SessionError};
use crate::input::{InputRouter, PointerEvent};
use crate::shapes::SelectionSink;
use crate::viewport::Viewport;
use kurbo::Size;

/// Cursor hint for the hosting shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    /// A drawing tool is armed.
    Crosshair,
    /// A pan gesture is in progress.
    Grabbing,
    Grab,
}

/// One interactive map view: viewport, drawing session, and input routing,
/// owned together so there is no ambient shared state.
///
/// All mutation happens on the shell's event-loop thread through these
/// methods. Each transition completes before the redraw flag is raised, so
/// a paint never observes a half-updated session.
pub struct MapSession {
    viewport: Viewport,
    drawing: DrawingSession,
    router: InputRouter,
    canvas_size: Size,
    sink: Box<dyn SelectionSink>,
    needs_redraw: bool,
}

impl MapSession {
    /// Create a session reporting selections to the given sink.
    pub fn new(sink: Box<dyn SelectionSink>) -> Self {
        Self {
            viewport: Viewport::default(),
            drawing: DrawingSession::new(),
            router: InputRouter::new(),
            canvas_size: Size::new(800.0, 600.0),
            sink,
            needs_redraw: true,
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn drawing(&self) -> &DrawingSession {
        &self.drawing
    }

    pub fn canvas_size(&self) -> Size {
        self.canvas_size
    }

    /// Update the canvas size after a layout change.
    pub fn set_canvas_size(&mut self, size: Size) {
        self.canvas_size = size;
        self.needs_redraw = true;
    }

    /// Arm a drawing tool (tool-select button).
    pub fn set_tool(&mut self, mode: DrawMode) {
        self.drawing.select_mode(mode);
        self.needs_redraw = true;
    }

    /// Zoom button step in.
    pub fn zoom_in(&mut self) {
        self.zoom_by(1.0);
    }

    /// Zoom button step out.
    pub fn zoom_out(&mut self) {
        self.zoom_by(-1.0);
    }

    /// Adjust zoom by an arbitrary delta.
    pub fn zoom_by(&mut self, delta: f64) {
        self.viewport.zoom_by(delta);
        self.needs_redraw = true;
    }

    /// Drop any selection and in-progress draw, and tell the sink the
    /// selection is now empty. Safe to call repeatedly; every call notifies.
    pub fn clear(&mut self) {
        self.drawing.clear();
        self.sink.on_area_selected(None);
        self.needs_redraw = true;
    }

    /// Feed one pointer/wheel event through the router.
    ///
    /// A completed draw notifies the sink exactly once. Errors surface
    /// routing desynchronization and leave the session unchanged.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) -> Result<(), SessionError> {
        let outcome = self.router.route(
            event,
            &mut self.viewport,
            &mut self.drawing,
            self.canvas_size,
        )?;

        if let Some(DrawOutcome::Committed(selection)) = outcome {
            self.sink.on_area_selected(Some(&selection));
        }
        self.needs_redraw = true;
        Ok(())
    }

    /// Cursor hint for the current interaction state.
    pub fn cursor(&self) -> Cursor {
        if self.drawing.mode().is_some() {
            Cursor::Crosshair
        } else if self.viewport.is_panning() {
            Cursor::Grabbing
        } else {
            Cursor::Grab
        }
    }

    /// Consume the pending redraw request, if any.
    ///
    /// The shell polls this from its event loop and schedules an
    /// asynchronous repaint; input handling never waits on the paint.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }
}
