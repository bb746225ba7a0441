//! Drawing session state machine.
//!
//! Lifecycle: `Idle -> mode selected -> drawing -> (committed | discarded)
//! -> Idle`. Degenerate shapes (too few vertices, sub-threshold radius) are
//! discarded as a normal outcome; calling an operation from the wrong state
//! is a programming error and returns a [`SessionError`].

use crate::geo::GeoPoint;
use crate::geometry::haversine_distance;
use crate::shapes::{Selection, Shape};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum degree-space distance between consecutive polygon vertices.
///
/// Decimates continuous pointer movement to bound path length; a tuning
/// constant, not a correctness requirement.
pub const DEFAULT_DECIMATION_EPSILON: f64 = 0.0001;

/// Circles with a smaller radius (meters) are treated as misclicks.
pub const MIN_CIRCLE_RADIUS_M: f64 = 10.0;

/// Available drawing tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrawMode {
    Polygon,
    Circle,
    Rectangle,
}

/// Errors for operations invoked in an invalid session state.
///
/// These indicate input-routing desynchronization, never a recoverable
/// runtime condition.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("begin_draw called with no drawing mode selected")]
    NoMode,
    #[error("{0} called while no draw is in progress")]
    NotDrawing(&'static str),
}

/// Outcome of finishing a draw gesture.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOutcome {
    /// The gesture produced a valid shape.
    Committed(Selection),
    /// The gesture was too short or degenerate; nothing was selected.
    Discarded,
}

/// Tracks the drawing mode, the in-progress path, and the committed shape.
#[derive(Debug, Clone)]
pub struct DrawingSession {
    mode: Option<DrawMode>,
    is_drawing: bool,
    current_path: Vec<GeoPoint>,
    committed: Option<Selection>,
    /// Polygon vertex decimation threshold in degrees.
    pub decimation_epsilon: f64,
}

impl Default for DrawingSession {
    fn default() -> Self {
        Self {
            mode: None,
            is_drawing: false,
            current_path: Vec::new(),
            committed: None,
            decimation_epsilon: DEFAULT_DECIMATION_EPSILON,
        }
    }
}

impl DrawingSession {
    /// Create an idle session with no mode selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently armed drawing tool, if any.
    pub fn mode(&self) -> Option<DrawMode> {
        self.mode
    }

    /// Whether a draw gesture is in progress.
    pub fn is_drawing(&self) -> bool {
        self.is_drawing
    }

    /// The in-progress path, in drawing order.
    pub fn current_path(&self) -> &[GeoPoint] {
        &self.current_path
    }

    /// The committed selection, if a draw has completed.
    pub fn committed(&self) -> Option<&Selection> {
        self.committed.as_ref()
    }

    /// Arm a drawing tool. Valid from any state; drops any in-progress path
    /// and any previously committed selection.
    pub fn select_mode(&mut self, mode: DrawMode) {
        log::debug!("draw mode selected: {mode:?}");
        self.mode = Some(mode);
        self.is_drawing = false;
        self.current_path.clear();
        self.committed = None;
    }

    /// Start a draw gesture at the given geographic point.
    pub fn begin_draw(&mut self, point: GeoPoint) -> Result<(), SessionError> {
        if self.mode.is_none() {
            log::warn!("begin_draw rejected: no mode selected");
            return Err(SessionError::NoMode);
        }
        self.is_drawing = true;
        self.committed = None;
        self.current_path.clear();
        self.current_path.push(point);
        Ok(())
    }

    /// Extend the in-progress gesture with the pointer's current position.
    pub fn extend_draw(&mut self, point: GeoPoint) -> Result<(), SessionError> {
        if !self.is_drawing {
            log::warn!("extend_draw rejected: no draw in progress");
            return Err(SessionError::NotDrawing("extend_draw"));
        }

        match self.mode {
            Some(DrawMode::Polygon) => {
                // Decimate: skip points closer than epsilon to the last one.
                let far_enough = self
                    .current_path
                    .last()
                    .is_none_or(|last| last.degree_distance(&point) > self.decimation_epsilon);
                if far_enough {
                    self.current_path.push(point);
                }
            }
            Some(DrawMode::Circle) | Some(DrawMode::Rectangle) => {
                // Path is capped at [anchor, current].
                self.current_path.truncate(1);
                self.current_path.push(point);
            }
            None => unreachable!("is_drawing implies an armed mode"),
        }
        Ok(())
    }

    /// Finish the gesture, committing a shape or discarding a degenerate one.
    ///
    /// Either way the session lands back in `Idle` with no armed mode.
    pub fn end_draw(&mut self) -> Result<DrawOutcome, SessionError> {
        if !self.is_drawing {
            log::warn!("end_draw rejected: no draw in progress");
            return Err(SessionError::NotDrawing("end_draw"));
        }

        let shape = self.finalize_shape();
        self.is_drawing = false;
        self.current_path.clear();
        self.mode = None;

        match shape {
            Some(shape) => {
                let selection = Selection::from_shape(shape);
                log::debug!("draw committed, area {:.1} m^2", selection.area);
                self.committed = Some(selection.clone());
                Ok(DrawOutcome::Committed(selection))
            }
            None => {
                log::debug!("draw discarded as degenerate");
                Ok(DrawOutcome::Discarded)
            }
        }
    }

    /// Reset to `Idle`. Valid (and idempotent) from any state.
    pub fn clear(&mut self) {
        self.mode = None;
        self.is_drawing = false;
        self.current_path.clear();
        self.committed = None;
    }

    fn finalize_shape(&self) -> Option<Shape> {
        match self.mode? {
            DrawMode::Polygon if self.current_path.len() >= 3 => {
                Some(Shape::Polygon(self.current_path.clone()))
            }
            DrawMode::Rectangle if self.current_path.len() == 2 => Some(
                Shape::rectangle_from_corners(self.current_path[0], self.current_path[1]),
            ),
            DrawMode::Circle if self.current_path.len() == 2 => {
                let center = self.current_path[0];
                let radius = haversine_distance(&center, &self.current_path[1]);
                (radius > MIN_CIRCLE_RADIUS_M).then_some(Shape::Circle {
                    center,
                    radius_meters: radius,
                })
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drag(session: &mut DrawingSession, points: &[(f64, f64)]) {
        let mut iter = points.iter();
        let (lat, lng) = iter.next().unwrap();
        session.begin_draw(GeoPoint::new(*lat, *lng)).unwrap();
        for (lat, lng) in iter {
            session.extend_draw(GeoPoint::new(*lat, *lng)).unwrap();
        }
    }

    #[test]
    fn test_begin_without_mode_is_rejected() {
        let mut session = DrawingSession::new();
        assert_eq!(
            session.begin_draw(GeoPoint::new(0.0, 0.0)),
            Err(SessionError::NoMode)
        );
        assert!(!session.is_drawing());
    }

    #[test]
    fn test_extend_while_idle_is_rejected() {
        let mut session = DrawingSession::new();
        session.select_mode(DrawMode::Polygon);
        assert_eq!(
            session.extend_draw(GeoPoint::new(0.0, 0.0)),
            Err(SessionError::NotDrawing("extend_draw"))
        );
    }

    #[test]
    fn test_end_while_idle_is_rejected() {
        let mut session = DrawingSession::new();
        assert_eq!(
            session.end_draw(),
            Err(SessionError::NotDrawing("end_draw"))
        );
    }

    #[test]
    fn test_polygon_commit() {
        let mut session = DrawingSession::new();
        session.select_mode(DrawMode::Polygon);
        drag(
            &mut session,
            &[(0.0, 0.0), (0.001, 0.0), (0.001, 0.001), (0.0, 0.001)],
        );

        let outcome = session.end_draw().unwrap();
        let DrawOutcome::Committed(selection) = outcome else {
            panic!("expected commit");
        };
        assert!(matches!(selection.shape, Shape::Polygon(ref pts) if pts.len() == 4));
        assert!(selection.area > 0.0);

        // Back to idle with no armed mode.
        assert!(!session.is_drawing());
        assert_eq!(session.mode(), None);
        assert!(session.current_path().is_empty());
        assert!(session.committed().is_some());
    }

    #[test]
    fn test_polygon_too_short_is_discarded() {
        let mut session = DrawingSession::new();
        session.select_mode(DrawMode::Polygon);
        drag(&mut session, &[(0.0, 0.0), (0.001, 0.0)]);

        assert_eq!(session.end_draw().unwrap(), DrawOutcome::Discarded);
        assert!(session.committed().is_none());
        assert_eq!(session.mode(), None);
    }

    #[test]
    fn test_polygon_decimation() {
        let mut session = DrawingSession::new();
        session.select_mode(DrawMode::Polygon);
        session.begin_draw(GeoPoint::new(0.0, 0.0)).unwrap();
        // 50 points all within 0.00001 degrees of the anchor: every one is
        // inside the decimation threshold.
        for i in 0..50 {
            let nudge = (i as f64) * 0.0000001;
            session.extend_draw(GeoPoint::new(nudge, nudge)).unwrap();
        }
        assert_eq!(session.current_path().len(), 1);
    }

    #[test]
    fn test_rectangle_path_capped_at_two_points() {
        let mut session = DrawingSession::new();
        session.select_mode(DrawMode::Rectangle);
        drag(&mut session, &[(0.0, 0.0), (0.1, 0.1), (0.2, 0.2), (0.3, 0.3)]);

        assert_eq!(session.current_path().len(), 2);
        assert_eq!(session.current_path()[1], GeoPoint::new(0.3, 0.3));

        let DrawOutcome::Committed(selection) = session.end_draw().unwrap() else {
            panic!("expected commit");
        };
        assert!(matches!(selection.shape, Shape::Rectangle(_)));
    }

    #[test]
    fn test_circle_minimum_radius() {
        // ~5 m away: discarded as noise.
        let mut session = DrawingSession::new();
        session.select_mode(DrawMode::Circle);
        drag(&mut session, &[(0.0, 0.0), (0.000045, 0.0)]);
        assert_eq!(session.end_draw().unwrap(), DrawOutcome::Discarded);
        assert!(session.committed().is_none());

        // ~15 m away: commits a circle of roughly that radius.
        session.select_mode(DrawMode::Circle);
        drag(&mut session, &[(0.0, 0.0), (0.000135, 0.0)]);
        let DrawOutcome::Committed(selection) = session.end_draw().unwrap() else {
            panic!("expected commit");
        };
        let Shape::Circle { radius_meters, .. } = selection.shape else {
            panic!("expected circle");
        };
        assert!((radius_meters - 15.0).abs() < 1.0, "radius {radius_meters}");
    }

    #[test]
    fn test_single_click_circle_is_discarded() {
        let mut session = DrawingSession::new();
        session.select_mode(DrawMode::Circle);
        session.begin_draw(GeoPoint::new(0.0, 0.0)).unwrap();
        assert_eq!(session.end_draw().unwrap(), DrawOutcome::Discarded);
    }

    #[test]
    fn test_select_mode_drops_previous_commit() {
        let mut session = DrawingSession::new();
        session.select_mode(DrawMode::Rectangle);
        drag(&mut session, &[(0.0, 0.0), (0.01, 0.01)]);
        session.end_draw().unwrap();
        assert!(session.committed().is_some());

        session.select_mode(DrawMode::Polygon);
        assert!(session.committed().is_none());
        assert!(session.current_path().is_empty());
    }

    #[test]
    fn test_state_machine_closure() {
        // From every reachable state, select_mode and clear land in a valid
        // state with no pending path.
        let mut session = DrawingSession::new();

        // Idle.
        session.clear();
        assert!(session.current_path().is_empty());

        // Mode selected.
        session.select_mode(DrawMode::Polygon);
        session.select_mode(DrawMode::Circle);
        assert!(session.current_path().is_empty());
        session.clear();
        assert_eq!(session.mode(), None);

        // Mid-draw.
        session.select_mode(DrawMode::Polygon);
        session.begin_draw(GeoPoint::new(0.0, 0.0)).unwrap();
        session.select_mode(DrawMode::Rectangle);
        assert!(!session.is_drawing());
        assert!(session.current_path().is_empty());

        session.begin_draw(GeoPoint::new(0.0, 0.0)).unwrap();
        session.clear();
        assert!(!session.is_drawing());
        assert!(session.current_path().is_empty());
        assert_eq!(session.mode(), None);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut session = DrawingSession::new();
        session.select_mode(DrawMode::Rectangle);
        drag(&mut session, &[(0.0, 0.0), (0.01, 0.01)]);
        session.end_draw().unwrap();

        session.clear();
        assert!(session.committed().is_none());
        session.clear();
        assert!(session.committed().is_none());
    }
}
