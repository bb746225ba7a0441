//! GreenLens Render Library
//!
//! Render orchestration for the GreenLens map view: slippy-tile planning,
//! the tile-source and painter collaborator traits, frame readiness
//! tracking, and debounced overlay redraws. Holds no drawing state of its
//! own; every paint is derived from the viewport and drawing session it is
//! handed.

pub mod frame;
pub mod painter;
pub mod tiles;

pub use frame::{RedrawDebouncer, RenderConfig, RenderLoop};
pub use painter::{OverlayStyle, Painter, RenderError, RenderResult, Rgba};
pub use tiles::{PlannedTile, TileCoord, TileOutcome, TileSource, tile_plan};
