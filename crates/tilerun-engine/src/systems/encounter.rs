//! Player-vs-entity gameplay rules.
//!
//! Box overlap picks a candidate, circle overlap confirms the hit. At most one
//! encounter is resolved per tick, looking at enemies first, then crystals,
//! then the goal.

use glam::Vec2;

use crate::api::config::GameConfig;
use crate::api::types::{EntityId, EntityKind, SoundEvent};
use crate::components::pickup::PickupKind;
use crate::core::overlap::{box_overlap, circle_overlap};
use crate::core::scene::Scene;

/// What an encounter did to the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encounter {
    CrystalCollected { id: EntityId, points: u64 },
    EnemyStomped { id: EntityId, points: u64 },
    PlayerKilled { by: EntityId },
    GoalReached { id: EntityId, points: u64 },
}

impl Encounter {
    pub fn points(&self) -> u64 {
        match *self {
            Encounter::CrystalCollected { points, .. }
            | Encounter::EnemyStomped { points, .. }
            | Encounter::GoalReached { points, .. } => points,
            Encounter::PlayerKilled { .. } => 0,
        }
    }

    pub fn sound(&self) -> SoundEvent {
        match self {
            Encounter::CrystalCollected { .. } => SoundEvent::CRYSTAL,
            Encounter::EnemyStomped { .. } => SoundEvent::ENEMY_HURT,
            Encounter::PlayerKilled { .. } => SoundEvent::GAME_OVER,
            Encounter::GoalReached { .. } => SoundEvent::GOAL,
        }
    }
}

/// Scoring and tuning used when the player touches something.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncounterRules {
    pub crystal_bonus: u64,
    pub enemy_bonus: u64,
    pub goal_bonus: u64,
    /// Upward nudge applied to a collected crystal.
    pub crystal_pop: f32,
}

impl EncounterRules {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            crystal_bonus: config.crystal_bonus,
            enemy_bonus: config.enemy_bonus,
            goal_bonus: config.goal_bonus,
            crystal_pop: config.crystal_pop,
        }
    }

    /// First entity the player is confirmed to be touching.
    pub fn candidate(&self, scene: &Scene) -> Option<(EntityKind, EntityId)> {
        let player = &scene.player;
        let enemy = scene
            .enemies()
            .iter()
            .filter(|e| e.is_alive())
            .find(|e| box_overlap(player, *e) && circle_overlap(player, *e))
            .map(|e| (e.kind, e.id));
        if enemy.is_some() {
            return enemy;
        }

        [PickupKind::Crystal, PickupKind::Goal].into_iter().find_map(|kind| {
            scene
                .pickups()
                .iter()
                .filter(|p| p.kind == kind && !p.is_collected())
                .find(|p| box_overlap(player, *p) && circle_overlap(player, *p))
                .map(|p| (EntityKind::from(p.kind), p.id))
        })
    }

    /// Apply the rule for whatever the player touches. `prev_y` is the
    /// player's y before this tick's movement; a larger y now means the
    /// player came down onto the entity.
    pub fn run(&self, scene: &mut Scene, prev_y: f32) -> Option<Encounter> {
        if !scene.player.is_alive() {
            return None;
        }
        let (kind, id) = self.candidate(scene)?;

        let encounter = match kind {
            EntityKind::Goal => {
                self.collect(scene, id, 0.0);
                Encounter::GoalReached {
                    id,
                    points: self.goal_bonus,
                }
            }
            EntityKind::Crystal => {
                self.collect(scene, id, self.crystal_pop);
                Encounter::CrystalCollected {
                    id,
                    points: self.crystal_bonus,
                }
            }
            EntityKind::Enemy if prev_y < scene.player.pos().y => {
                let enemy_top = scene
                    .enemies_mut()
                    .iter_mut()
                    .find(|e| e.id == id)
                    .map(|e| {
                        e.kill();
                        e.pos().y
                    })?;
                let player = &mut scene.player;
                let x = player.pos().x;
                player.set_pos(Vec2::new(x, enemy_top - player.size().y));
                player.jump(true);
                player.set_velocity_x(0.0);
                Encounter::EnemyStomped {
                    id,
                    points: self.enemy_bonus,
                }
            }
            EntityKind::Enemy => {
                scene.player.kill();
                log::info!("player killed by enemy {:?}", id);
                Encounter::PlayerKilled { by: id }
            }
            EntityKind::Player => return None,
        };
        Some(encounter)
    }

    fn collect(&self, scene: &mut Scene, id: EntityId, pop: f32) {
        if let Some(pickup) = scene.pickups_mut().iter_mut().find(|p| p.id == id) {
            pickup.collect();
            pickup.footprint.pos.y -= pop;
        }
    }
}
