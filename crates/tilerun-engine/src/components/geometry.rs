use glam::Vec2;

use crate::api::types::EntityId;

/// Position and extent shared by every entity kind.
/// `pos` is the top-left corner in pixels (Y-down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    pub pos: Vec2,
    pub size: Vec2,
    /// Radius of the bounding circle used for gameplay hits.
    pub radius: f32,
}

impl Footprint {
    /// Box of the given size; the circle radius is half the larger side.
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            radius: size.max_element() / 2.0,
        }
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Zero or negative extent: never overlaps anything.
    pub fn is_degenerate(&self) -> bool {
        !(self.size.x > 0.0 && self.size.y > 0.0)
    }
}

/// Anything overlap tests can run against.
pub trait Collidable {
    fn id(&self) -> EntityId;
    fn footprint(&self) -> &Footprint;
}
