use bytemuck::{Pod, Zeroable};

/// Unique identifier for an entity in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub u32);

/// The kinds of entity a level holds. Encounter rules dispatch on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Player,
    Enemy,
    Crystal,
    Goal,
}

/// A sound request emitted by the game logic.
/// Fire-and-forget: the host maps the id to a clip and never reports back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct SoundEvent(pub u32);

impl SoundEvent {
    pub const GOAL: SoundEvent = SoundEvent(1);
    pub const ENEMY_HURT: SoundEvent = SoundEvent(2);
    pub const GAME_OVER: SoundEvent = SoundEvent(3);
    pub const CRYSTAL: SoundEvent = SoundEvent(4);
    pub const MUSIC: SoundEvent = SoundEvent(5);
}

/// A game event handed to the host.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

/// Event kinds written into `GameEvent::kind`.
pub mod event_kind {
    /// `a` = new level index, `b` = score.
    pub const LEVEL_ADVANCED: f32 = 1.0;
    /// `a` = level index, `b` = score at death.
    pub const GAME_OVER: f32 = 2.0;
    /// `a` = final score.
    pub const GAME_COMPLETE: f32 = 3.0;
    /// `a` = new score, `b` = points just awarded.
    pub const SCORE: f32 = 4.0;
}

impl GameEvent {
    pub const FLOATS: usize = 4;

    pub fn new(kind: f32, a: f32, b: f32, c: f32) -> Self {
        Self { kind, a, b, c }
    }

    pub fn level_advanced(level: usize, score: u64) -> Self {
        Self::new(event_kind::LEVEL_ADVANCED, level as f32, score as f32, 0.0)
    }

    pub fn game_over(level: usize, score: u64) -> Self {
        Self::new(event_kind::GAME_OVER, level as f32, score as f32, 0.0)
    }

    pub fn game_complete(score: u64) -> Self {
        Self::new(event_kind::GAME_COMPLETE, score as f32, 0.0, 0.0)
    }

    pub fn score(score: u64, awarded: u64) -> Self {
        Self::new(event_kind::SCORE, score as f32, awarded as f32, 0.0)
    }
}
