use glam::Vec2;

use crate::api::types::{EntityId, EntityKind};
use crate::components::body::Body;
use crate::components::pickup::{Pickup, PickupKind};

/// Active entities of the current level. The player always has id 0.
#[derive(Debug, Clone)]
pub struct Scene {
    pub player: Body,
    enemies: Vec<Body>,
    pickups: Vec<Pickup>,
    next_id: u32,
}

impl Scene {
    /// Empty scene with a player of the given size at `spawn`.
    pub fn new(spawn: Vec2, player_size: Vec2) -> Self {
        Self {
            player: Body::new(EntityId(0), EntityKind::Player, spawn, player_size),
            enemies: Vec::with_capacity(8),
            pickups: Vec::with_capacity(16),
            next_id: 1,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn spawn_enemy(&mut self, pos: Vec2, size: Vec2, velocity: Vec2) -> EntityId {
        let id = self.next_id();
        self.enemies
            .push(Body::new(id, EntityKind::Enemy, pos, size).with_velocity(velocity));
        id
    }

    pub fn spawn_pickup(&mut self, kind: PickupKind, pos: Vec2, size: Vec2) -> EntityId {
        let id = self.next_id();
        self.pickups.push(Pickup::new(id, kind, pos, size));
        id
    }

    /// Drop every enemy and pickup. The player stays.
    pub fn clear(&mut self) {
        self.enemies.clear();
        self.pickups.clear();
    }

    pub fn enemies(&self) -> &[Body] {
        &self.enemies
    }

    pub fn enemies_mut(&mut self) -> &mut [Body] {
        &mut self.enemies
    }

    pub fn pickups(&self) -> &[Pickup] {
        &self.pickups
    }

    pub fn pickups_mut(&mut self) -> &mut [Pickup] {
        &mut self.pickups
    }

    pub fn enemy(&self, id: EntityId) -> Option<&Body> {
        self.enemies.iter().find(|e| e.id == id)
    }

    pub fn pickup(&self, id: EntityId) -> Option<&Pickup> {
        self.pickups.iter().find(|p| p.id == id)
    }

    /// Remove enemies that are no longer alive. Returns how many were removed.
    pub fn remove_fallen_enemies(&mut self) -> usize {
        let before = self.enemies.len();
        self.enemies.retain(|e| e.is_alive());
        before - self.enemies.len()
    }

    /// Remove pickups already collected. Returns how many were removed.
    pub fn remove_collected(&mut self) -> usize {
        let before = self.pickups.len();
        self.pickups.retain(|p| !p.is_collected());
        before - self.pickups.len()
    }

    pub fn count_pickups(&self, kind: PickupKind) -> usize {
        self.pickups.iter().filter(|p| p.kind == kind).count()
    }
}
