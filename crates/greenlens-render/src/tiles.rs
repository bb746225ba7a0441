//! Slippy-map tile addressing and viewport coverage planning.

use greenlens_core::geo::TILE_SIZE;
use greenlens_core::projection::world_size;
use greenlens_core::viewport::Viewport;
use kurbo::{Rect, Size};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Address of one map tile in the standard z/x/y grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    pub z: u8,
    pub x: u32,
    pub y: u32,
}

/// Completion status reported by the tile collaborator.
///
/// Failures are tolerated: a failed tile still counts toward frame
/// readiness and its area is simply left blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileOutcome {
    Loaded,
    Failed,
}

/// External image-delivery collaborator.
///
/// `fetch` initiates an asynchronous load; the shell reports each
/// completion back through [`RenderLoop::tile_ready`](crate::RenderLoop).
pub trait TileSource {
    fn fetch(&mut self, coord: TileCoord);
}

/// A tile the current frame needs, with its canvas destination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannedTile {
    pub coord: TileCoord,
    pub dest: Rect,
}

/// Compute the tile grid covering the viewport.
///
/// Tiles are taken at the integer zoom below the viewport's continuous
/// zoom. Indices outside the world grid (past the antimeridian or poles)
/// are skipped rather than wrapped.
pub fn tile_plan(viewport: &Viewport, canvas: Size) -> Vec<PlannedTile> {
    let z = viewport.zoom.floor().clamp(0.0, 22.0) as u8;
    let scale = 1u32 << z;
    let world = world_size(f64::from(z));

    // World-pixel position of the viewport center at the tile zoom.
    let lat_rad = viewport.center.lat.clamp(-89.999_999, 89.999_999) * PI / 180.0;
    let center_x = (viewport.center.lng + 180.0) / 360.0 * world;
    let center_y = (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0 * world;

    let left = center_x - canvas.width / 2.0;
    let top = center_y - canvas.height / 2.0;

    let x_first = (left / TILE_SIZE).floor() as i64;
    let x_last = ((left + canvas.width) / TILE_SIZE).floor() as i64;
    let y_first = (top / TILE_SIZE).floor() as i64;
    let y_last = ((top + canvas.height) / TILE_SIZE).floor() as i64;

    let mut plan = Vec::new();
    for x in x_first..=x_last {
        for y in y_first..=y_last {
            if x < 0 || y < 0 || x >= i64::from(scale) || y >= i64::from(scale) {
                continue;
            }
            let screen_x = x as f64 * TILE_SIZE - left;
            let screen_y = y as f64 * TILE_SIZE - top;
            plan.push(PlannedTile {
                coord: TileCoord {
                    z,
                    x: x as u32,
                    y: y as u32,
                },
                dest: Rect::new(
                    screen_x,
                    screen_y,
                    screen_x + TILE_SIZE,
                    screen_y + TILE_SIZE,
                ),
            });
        }
    }
    plan
}
