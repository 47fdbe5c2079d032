use bytemuck::{Pod, Zeroable};

/// Per-entity draw data handed to the host renderer.
/// 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    /// Top-left corner in world pixels.
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Entity kind code (see `kind_code`).
    pub kind: f32,
    /// `AnimationKey::code()` of the clip being shown.
    pub animation: f32,
    /// Frame within the clip.
    pub frame: f32,
    /// 0 = normal, 1 = dying, 2 = dead.
    pub life: f32,
}

/// Codes written into `SpriteInstance::kind`.
pub mod kind_code {
    pub const PLAYER: f32 = 0.0;
    pub const ENEMY: f32 = 1.0;
    pub const CRYSTAL: f32 = 2.0;
    pub const GOAL: f32 = 3.0;
}

impl SpriteInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Sprite instances for one frame, in draw order.
pub struct RenderBuffer {
    pub instances: Vec<SpriteInstance>,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self {
            instances: Vec::with_capacity(32),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: SpriteInstance) {
        self.instances.push(instance);
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer to instance data for host-side reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }

    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}
