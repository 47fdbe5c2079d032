use glam::Vec2;

use crate::api::types::{EntityId, EntityKind};
use crate::components::animation::{Action, AnimationKey, AnimationState};
use crate::components::geometry::{Collidable, Footprint};

/// Vertical velocity of a jump (negative is up).
pub const JUMP_SPEED: f32 = -0.5;
/// Fall speed cap, enforced on every write to velocity.y.
pub const MAX_FALLING_SPEED: f32 = 0.25;
/// Jumps allowed before touching the ground again.
pub const MAX_JUMPS: u8 = 3;
/// How long the dying animation runs before a creature is dead, in ms.
pub const DIE_TIME_MS: f32 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facing {
    Left,
    Right,
}

/// Life cycle: Normal → Dying → Dead. Only a restart goes back to Normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifeState {
    Normal,
    Dying,
    Dead,
}

/// A creature taking part in physics: the player or an enemy.
#[derive(Debug, Clone)]
pub struct Body {
    pub id: EntityId,
    pub kind: EntityKind,
    pub footprint: Footprint,
    velocity: Vec2,
    pub facing: Facing,
    pub on_ground: bool,
    jump_count: u8,
    pub attacking: bool,
    life: LifeState,
    /// Milliseconds since the last life state change.
    state_time: f32,
    pub animation: AnimationState,
}

impl Body {
    pub fn new(id: EntityId, kind: EntityKind, pos: Vec2, size: Vec2) -> Self {
        Self {
            id,
            kind,
            footprint: Footprint::new(pos, size),
            velocity: Vec2::ZERO,
            facing: Facing::Right,
            on_ground: false,
            jump_count: 0,
            attacking: false,
            life: LifeState::Normal,
            state_time: 0.0,
            animation: AnimationState::creature(kind == EntityKind::Player),
        }
    }

    // -- Builder pattern --

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.set_velocity(velocity);
        self
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.footprint.radius = radius;
        self
    }

    // -- Geometry --

    pub fn pos(&self) -> Vec2 {
        self.footprint.pos
    }

    pub fn set_pos(&mut self, pos: Vec2) {
        self.footprint.pos = pos;
    }

    pub fn size(&self) -> Vec2 {
        self.footprint.size
    }

    // -- Kinematics --

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity.x = velocity.x;
        self.set_velocity_y(velocity.y);
    }

    pub fn set_velocity_x(&mut self, dx: f32) {
        self.velocity.x = dx;
    }

    /// Writes velocity.y, capped at `MAX_FALLING_SPEED`.
    pub fn set_velocity_y(&mut self, dy: f32) {
        self.velocity.y = dy.min(MAX_FALLING_SPEED);
    }

    pub fn stop(&mut self) {
        self.velocity = Vec2::ZERO;
    }

    pub fn jump_count(&self) -> u8 {
        self.jump_count
    }

    /// Jump if standing, or unconditionally when `force` is set, as long as the
    /// jump budget is not spent. Returns whether the jump happened.
    pub fn jump(&mut self, force: bool) -> bool {
        if (self.on_ground || force) && self.jump_count < MAX_JUMPS {
            self.on_ground = false;
            self.jump_count += 1;
            self.set_velocity_y(JUMP_SPEED);
            true
        } else {
            false
        }
    }

    /// Ground contact: resets the jump budget.
    pub fn land(&mut self) {
        self.on_ground = true;
        self.jump_count = 0;
    }

    // -- Life cycle --

    pub fn life(&self) -> LifeState {
        self.life
    }

    pub fn is_alive(&self) -> bool {
        self.life == LifeState::Normal
    }

    pub fn state_time(&self) -> f32 {
        self.state_time
    }

    /// Change life state. Entering `Dying` stops the body dead.
    pub fn set_life(&mut self, life: LifeState) {
        if self.life != life {
            self.life = life;
            self.state_time = 0.0;
            if life == LifeState::Dying {
                self.stop();
            }
        }
    }

    /// Normal → Dying. No effect on a body already dying or dead.
    pub fn kill(&mut self) -> bool {
        if self.is_alive() {
            self.set_life(LifeState::Dying);
            true
        } else {
            false
        }
    }

    /// Advance facing, animation and the life-state clock by `dt_ms`.
    /// A dying body becomes dead once `DIE_TIME_MS` has elapsed.
    pub fn update(&mut self, dt_ms: f32) {
        if self.is_alive() {
            if self.velocity.x < 0.0 {
                self.facing = Facing::Left;
            } else if self.velocity.x > 0.0 {
                self.facing = Facing::Right;
            }
        }

        self.animation.select(self.animation_key());
        self.animation.tick(dt_ms);

        self.state_time += dt_ms;
        if self.life == LifeState::Dying && self.state_time >= DIE_TIME_MS {
            self.set_life(LifeState::Dead);
        }
    }

    /// The clip this body should show right now (before clip fallback).
    pub fn animation_key(&self) -> AnimationKey {
        let action = match self.life {
            LifeState::Normal if self.attacking => Action::Attack,
            LifeState::Normal if self.velocity.x == 0.0 => Action::Idle,
            LifeState::Normal => Action::Walk,
            LifeState::Dying | LifeState::Dead => Action::Dying,
        };
        AnimationKey::new(action, self.facing)
    }

    /// Put the body back to a fresh, living state at `pos`.
    pub fn respawn(&mut self, pos: Vec2) {
        self.footprint.pos = pos;
        self.velocity = Vec2::ZERO;
        self.facing = Facing::Right;
        self.on_ground = false;
        self.jump_count = 0;
        self.attacking = false;
        self.life = LifeState::Normal;
        self.state_time = 0.0;
    }
}

impl Collidable for Body {
    fn id(&self) -> EntityId {
        self.id
    }

    fn footprint(&self) -> &Footprint {
        &self.footprint
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body() -> Body {
        Body::new(EntityId(1), EntityKind::Player, Vec2::ZERO, Vec2::new(32.0, 32.0))
    }

    #[test]
    fn fall_speed_is_capped_on_every_write() {
        let mut b = body();
        b.set_velocity_y(10.0);
        assert_eq!(b.velocity().y, MAX_FALLING_SPEED);
        b.set_velocity(Vec2::new(1.0, 3.0));
        assert_eq!(b.velocity(), Vec2::new(1.0, MAX_FALLING_SPEED));
        let b = body().with_velocity(Vec2::new(0.0, 0.9));
        assert_eq!(b.velocity().y, MAX_FALLING_SPEED);
        let mut b = body();
        b.set_velocity_y(-2.0);
        assert_eq!(b.velocity().y, -2.0);
    }

    #[test]
    fn jump_requires_ground_unless_forced() {
        let mut b = body();
        assert!(!b.jump(false));
        b.land();
        assert!(b.jump(false));
        assert_eq!(b.velocity().y, JUMP_SPEED);
        assert!(!b.on_ground);
        assert_eq!(b.jump_count(), 1);
        assert!(!b.jump(false));
        assert!(b.jump(true));
        assert!(b.jump(true));
        assert_eq!(b.jump_count(), MAX_JUMPS);
        assert!(!b.jump(true));
        b.land();
        assert_eq!(b.jump_count(), 0);
    }

    #[test]
    fn dying_zeroes_velocity_and_becomes_dead() {
        let mut b = body().with_velocity(Vec2::new(0.1, -0.3));
        assert!(b.kill());
        assert_eq!(b.life(), LifeState::Dying);
        assert_eq!(b.velocity(), Vec2::ZERO);
        assert!(!b.is_alive());
        assert!(!b.kill());

        b.update(600.0);
        assert_eq!(b.life(), LifeState::Dying);
        b.update(400.0);
        assert_eq!(b.life(), LifeState::Dead);
        assert_eq!(b.state_time(), 0.0);
    }

    #[test]
    fn facing_follows_velocity() {
        let mut b = body();
        b.set_velocity_x(-0.1);
        b.update(16.0);
        assert_eq!(b.facing, Facing::Left);
        assert_eq!(b.animation_key(), AnimationKey::new(Action::Walk, Facing::Left));
        b.set_velocity_x(0.0);
        b.update(16.0);
        assert_eq!(b.facing, Facing::Left);
        assert_eq!(b.animation.current, AnimationKey::new(Action::Idle, Facing::Left));
    }

    #[test]
    fn enemy_attack_request_falls_back_to_idle_clip() {
        let mut e = Body::new(EntityId(2), EntityKind::Enemy, Vec2::ZERO, Vec2::ONE);
        e.attacking = true;
        e.update(16.0);
        assert_eq!(e.animation_key().action, Action::Attack);
        assert_eq!(e.animation.current, AnimationKey::new(Action::Idle, Facing::Right));
    }

    #[test]
    fn respawn_restores_normal_state() {
        let mut b = body();
        b.kill();
        b.update(2000.0);
        assert_eq!(b.life(), LifeState::Dead);
        b.respawn(Vec2::new(20.0, 0.0));
        assert!(b.is_alive());
        assert_eq!(b.pos(), Vec2::new(20.0, 0.0));
        assert_eq!(b.jump_count(), 0);
    }
}
