use glam::Vec2;

use crate::api::types::{EntityId, EntityKind};
use crate::components::geometry::{Collidable, Footprint};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupKind {
    /// Worth points.
    Crystal,
    /// Ends the level.
    Goal,
}

impl From<PickupKind> for EntityKind {
    fn from(kind: PickupKind) -> Self {
        match kind {
            PickupKind::Crystal => EntityKind::Crystal,
            PickupKind::Goal => EntityKind::Goal,
        }
    }
}

/// A static item the player can collect.
#[derive(Debug, Clone)]
pub struct Pickup {
    pub id: EntityId,
    pub kind: PickupKind,
    pub footprint: Footprint,
    collected: bool,
}

impl Pickup {
    pub fn new(id: EntityId, kind: PickupKind, pos: Vec2, size: Vec2) -> Self {
        Self {
            id,
            kind,
            footprint: Footprint::new(pos, size),
            collected: false,
        }
    }

    pub fn is_collected(&self) -> bool {
        self.collected
    }

    /// Mark collected. Collection is one-way within a level.
    pub fn collect(&mut self) {
        self.collected = true;
    }
}

impl Collidable for Pickup {
    fn id(&self) -> EntityId {
        self.id
    }

    fn footprint(&self) -> &Footprint {
        &self.footprint
    }
}
