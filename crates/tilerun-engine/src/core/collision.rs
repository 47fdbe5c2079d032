//! Axis-separated stepping of bodies through a tile grid.
//!
//! A body moves along X first, then Y, in fixed increments. At each increment
//! the leading edge is sampled against the grid; the first blocking tile stops
//! the body flush against that tile's boundary. The same rule applies in both
//! directions of an axis: the leading edge is the near side when moving toward
//! negative coordinates and the far side (inset by `EDGE_INSET`) when moving
//! toward positive ones, so a body resting flush against a boundary never reads
//! the tile beyond it.

use glam::Vec2;

use crate::components::body::Body;
use crate::components::tilemap::{TileGrid, TileKind};

/// Default stepping increment in pixels.
pub const DEFAULT_STEP: f32 = 2.0;

/// Far edges (right, bottom) are sampled this far inside the box.
const EDGE_INSET: f32 = 0.01;

/// What a resolution pass ran into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Contact {
    /// Stopped by a wall or a map side; velocity.x was negated.
    pub hit_wall: bool,
    /// Stopped by a ceiling; velocity.y was zeroed.
    pub hit_ceiling: bool,
    /// Landed on a tile this pass.
    pub landed: bool,
    /// Feet are on the map's lowest habitable row.
    pub on_floor: bool,
    /// Footprint touches a hazard tile after moving.
    pub hazard: bool,
}

/// Moves bodies against a `TileGrid` without ever penetrating solid tiles.
#[derive(Debug, Clone, Copy)]
pub struct CollisionResolver {
    step: f32,
}

impl Default for CollisionResolver {
    fn default() -> Self {
        Self::new(DEFAULT_STEP)
    }
}

impl CollisionResolver {
    /// Non-positive steps fall back to `DEFAULT_STEP`.
    pub fn new(step: f32) -> Self {
        let step = if step > 0.0 { step } else { DEFAULT_STEP };
        Self { step }
    }

    /// Increment actually used on `grid`: never more than half a tile, so a
    /// single increment cannot carry a leading edge across a whole tile.
    pub fn increment_for(&self, grid: &TileGrid) -> f32 {
        let limit = grid.tile_width().min(grid.tile_height()) * 0.5;
        self.step.min(limit)
    }

    /// Move `body` by `velocity * elapsed_ms`, resolving against `grid`.
    /// Always leaves the body in bounds and outside every solid tile it did
    /// not start inside.
    pub fn resolve(&self, body: &mut Body, grid: &TileGrid, elapsed_ms: f32) -> Contact {
        let mut contact = Contact::default();
        let elapsed = elapsed_ms.max(0.0);
        let inc = self.increment_for(grid);

        contact.hit_wall = clamp_into_map(body, grid);

        let delta = body.velocity() * elapsed;

        if delta.x != 0.0 && step_x(body, grid, delta.x, inc) {
            let vx = body.velocity().x;
            body.set_velocity_x(-vx);
            contact.hit_wall = true;
        }

        if delta.y > 0.0 {
            if step_down(body, grid, delta.y, inc) {
                body.set_velocity_y(0.0);
                body.land();
                contact.landed = true;
            } else {
                body.on_ground = false;
            }
        } else if delta.y < 0.0 && step_up(body, grid, delta.y, inc) {
            body.set_velocity_y(0.0);
            contact.hit_ceiling = true;
        }

        let floor = grid.floor_y();
        if body.footprint.bottom() > floor {
            body.footprint.pos.y = floor - body.footprint.size.y;
        }
        if body.footprint.bottom() >= floor {
            if body.velocity().y > 0.0 {
                body.set_velocity_y(0.0);
            }
            body.land();
            contact.on_floor = true;
        }

        contact.hazard = touches(body, grid, TileKind::Hazard);
        contact
    }
}

/// Fail-safe: pull a body that starts outside the map back in.
/// Returns whether the body was at a side boundary moving outward.
fn clamp_into_map(body: &mut Body, grid: &TileGrid) -> bool {
    let size = body.footprint.size;
    let max_x = (grid.pixel_width() - size.x).max(0.0);
    let max_y = (grid.floor_y() - size.y).max(0.0);
    let pos = body.footprint.pos;
    let mut bounced = false;

    if pos.x < 0.0 || pos.x > max_x {
        let vx = body.velocity().x;
        if (pos.x < 0.0 && vx < 0.0) || (pos.x > max_x && vx > 0.0) {
            body.set_velocity_x(-vx);
            bounced = true;
        }
    }
    body.footprint.pos = Vec2::new(pos.x.clamp(0.0, max_x), pos.y.clamp(0.0, max_y));
    bounced
}

/// Rows covered by the body's vertical extent, mid-point row first.
fn spanned_rows(grid: &TileGrid, y: f32, h: f32) -> impl Iterator<Item = i32> {
    let mid = grid.row_of(y + h / 2.0);
    let top = grid.row_of(y);
    let bottom = grid.row_of(y + h - EDGE_INSET);
    std::iter::once(mid).chain(top..=bottom)
}

/// Columns covered by the body's horizontal extent, centre column first.
fn spanned_cols(grid: &TileGrid, x: f32, w: f32) -> impl Iterator<Item = i32> {
    let mid = grid.col_of(x + w / 2.0);
    let left = grid.col_of(x);
    let right = grid.col_of(x + w - EDGE_INSET);
    std::iter::once(mid).chain(left..=right)
}

/// Returns true when a wall stopped the body.
fn step_x(body: &mut Body, grid: &TileGrid, dx: f32, inc: f32) -> bool {
    let Vec2 { x: start, y } = body.footprint.pos;
    let Vec2 { x: w, y: h } = body.footprint.size;
    let dir = dx.signum();
    let mut x = start;
    let mut remaining = dx.abs();

    while remaining > 0.0 {
        let advance = remaining.min(inc);
        let next = x + dir * advance;
        let edge = if dir > 0.0 { next + w - EDGE_INSET } else { next };
        let col = grid.col_of(edge);

        if spanned_rows(grid, y, h).any(|row| grid.tile_at(col, row).blocks_sideways()) {
            body.footprint.pos.x = if dir > 0.0 {
                grid.pixel_origin_of(col, 0).x - w
            } else {
                grid.pixel_origin_of(col + 1, 0).x
            };
            return true;
        }

        x = next;
        remaining -= advance;
    }

    body.footprint.pos.x = start + dx;
    false
}

/// Returns true when the body landed.
/// Ground-only tiles catch a body only if its feet were at or above the
/// tile's top before the increment.
fn step_down(body: &mut Body, grid: &TileGrid, dy: f32, inc: f32) -> bool {
    let Vec2 { x, y: start } = body.footprint.pos;
    let Vec2 { x: w, y: h } = body.footprint.size;
    let mut y = start;
    let mut remaining = dy;

    while remaining > 0.0 {
        let advance = remaining.min(inc);
        let next = y + advance;
        let feet = y + h;
        // Feet resting flush on a tile top sample that tile, however small the increment.
        let row = grid.row_of((next + h - EDGE_INSET).max(feet));
        let top = grid.pixel_origin_of(0, row).y;

        let blocked = spanned_cols(grid, x, w).any(|col| {
            let kind = grid.tile_at(col, row);
            kind.blocks_descent() && (kind == TileKind::Solid || feet <= top + EDGE_INSET)
        });
        if blocked {
            body.footprint.pos.y = top - h;
            return true;
        }

        y = next;
        remaining -= advance;
    }

    body.footprint.pos.y = start + dy;
    false
}

/// Returns true when a ceiling stopped the body.
fn step_up(body: &mut Body, grid: &TileGrid, dy: f32, inc: f32) -> bool {
    let Vec2 { x, y: start } = body.footprint.pos;
    let w = body.footprint.size.x;
    let mut y = start;
    let mut remaining = -dy;

    while remaining > 0.0 {
        let advance = remaining.min(inc);
        let next = y - advance;
        let row = grid.row_of(next);

        if spanned_cols(grid, x, w).any(|col| grid.tile_at(col, row).blocks_sideways()) {
            body.footprint.pos.y = grid.pixel_origin_of(0, row + 1).y;
            return true;
        }

        y = next;
        remaining -= advance;
    }

    body.footprint.pos.y = start + dy;
    false
}

/// Whether any tile under the body's footprint is of `kind`.
fn touches(body: &Body, grid: &TileGrid, kind: TileKind) -> bool {
    let Vec2 { x, y } = body.footprint.pos;
    let Vec2 { x: w, y: h } = body.footprint.size;
    let (left, top) = grid.world_to_tile(x, y);
    let (right, bottom) = grid.world_to_tile(x + w - EDGE_INSET, y + h - EDGE_INSET);
    (top..=bottom).any(|row| (left..=right).any(|col| grid.tile_at(col, row) == kind))
}
