use crate::api::types::EntityKind;
use crate::components::body::{Body, LifeState};
use crate::components::pickup::Pickup;
use crate::core::scene::Scene;
use crate::renderer::instance::{kind_code, RenderBuffer, SpriteInstance};

/// Build the render buffer from the scene.
/// Pickups first, then enemies, then the player on top.
pub fn build_render_buffer(scene: &Scene, buffer: &mut RenderBuffer) {
    buffer.clear();

    for pickup in scene.pickups() {
        buffer.push(pickup_instance(pickup));
    }
    for enemy in scene.enemies() {
        buffer.push(body_instance(enemy));
    }
    buffer.push(body_instance(&scene.player));
}

fn kind_to_code(kind: EntityKind) -> f32 {
    match kind {
        EntityKind::Player => kind_code::PLAYER,
        EntityKind::Enemy => kind_code::ENEMY,
        EntityKind::Crystal => kind_code::CRYSTAL,
        EntityKind::Goal => kind_code::GOAL,
    }
}

fn body_instance(body: &Body) -> SpriteInstance {
    let life = match body.life() {
        LifeState::Normal => 0.0,
        LifeState::Dying => 1.0,
        LifeState::Dead => 2.0,
    };
    SpriteInstance {
        x: body.footprint.pos.x,
        y: body.footprint.pos.y,
        width: body.footprint.size.x,
        height: body.footprint.size.y,
        kind: kind_to_code(body.kind),
        animation: body.animation.current.code() as f32,
        frame: body.animation.frame_index as f32,
        life,
    }
}

// Collected pickups are still drawn for the tick they pop.
fn pickup_instance(pickup: &Pickup) -> SpriteInstance {
    SpriteInstance {
        x: pickup.footprint.pos.x,
        y: pickup.footprint.pos.y,
        width: pickup.footprint.size.x,
        height: pickup.footprint.size.y,
        kind: kind_to_code(pickup.kind.into()),
        animation: 0.0,
        frame: 0.0,
        life: if pickup.is_collected() { 1.0 } else { 0.0 },
    }
}
