//! GreenLens Core Library
//!
//! Platform-agnostic map-session logic for the GreenLens region picker:
//! Web Mercator projection, viewport pan/zoom, the region-drawing state
//! machine, and the geometry math behind area reports.

pub mod draw;
pub mod geo;
pub mod geometry;
pub mod input;
pub mod map;
pub mod projection;
pub mod shapes;
pub mod viewport;

pub use draw::{DrawMode, DrawOutcome, DrawingSession, SessionError};
pub use geo::GeoPoint;
pub use input::{InputRouter, PointerEvent};
pub use map::{Cursor, MapSession};
pub use shapes::{NullSink, Selection, SelectionSink, Shape};
pub use viewport::Viewport;
