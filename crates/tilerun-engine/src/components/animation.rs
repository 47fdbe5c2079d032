//! Logical animation selection for creatures.
//!
//! The core only decides *which* clip is active (idle/walk/attack/dying per
//! facing) and how far into it playback is. Frame images live with the host.

use std::collections::HashMap;

use crate::components::body::Facing;

/// What a creature is visibly doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Idle,
    Walk,
    Attack,
    Dying,
}

/// An action paired with the direction it is drawn facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationKey {
    pub action: Action,
    pub facing: Facing,
}

impl AnimationKey {
    pub fn new(action: Action, facing: Facing) -> Self {
        Self { action, facing }
    }

    /// Idle clip for the same facing; the fallback for missing clips.
    pub fn idle(self) -> Self {
        Self::new(Action::Idle, self.facing)
    }

    /// Stable numeric code for wire formats: action * 2 + facing.
    pub fn code(self) -> u32 {
        let action = match self.action {
            Action::Idle => 0,
            Action::Walk => 1,
            Action::Attack => 2,
            Action::Dying => 3,
        };
        let facing = match self.facing {
            Facing::Left => 0,
            Facing::Right => 1,
        };
        action * 2 + facing
    }
}

/// Definition of a single clip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationDef {
    pub frame_count: u32,
    /// Milliseconds per frame.
    pub frame_ms: f32,
    /// Whether to loop when reaching the end.
    pub looping: bool,
}

impl AnimationDef {
    pub fn looping(frame_count: u32, frame_ms: f32) -> Self {
        Self {
            frame_count,
            frame_ms,
            looping: true,
        }
    }

    /// Plays once and holds the last frame.
    pub fn once(frame_count: u32, frame_ms: f32) -> Self {
        Self {
            frame_count,
            frame_ms,
            looping: false,
        }
    }
}

/// Playback state for one creature.
#[derive(Debug, Clone)]
pub struct AnimationState {
    /// Clips available to this creature.
    pub clips: HashMap<AnimationKey, AnimationDef>,
    /// Currently selected clip (after fallback).
    pub current: AnimationKey,
    pub frame_index: u32,
    /// Time accumulated in the current frame, in ms.
    pub frame_timer: f32,
    pub playing: bool,
    /// Playback speed multiplier (1.0 = normal).
    pub speed: f32,
}

impl AnimationState {
    pub fn new(clips: HashMap<AnimationKey, AnimationDef>) -> Self {
        Self {
            clips,
            current: AnimationKey::new(Action::Idle, Facing::Right),
            frame_index: 0,
            frame_timer: 0.0,
            playing: true,
            speed: 1.0,
        }
    }

    /// Standard creature set: looping idle/walk per facing, one-shot dying.
    /// With `with_attack`, looping attack clips are added too.
    pub fn creature(with_attack: bool) -> Self {
        let mut clips = HashMap::new();
        for facing in [Facing::Left, Facing::Right] {
            clips.insert(AnimationKey::new(Action::Idle, facing), AnimationDef::looping(4, 200.0));
            clips.insert(AnimationKey::new(Action::Walk, facing), AnimationDef::looping(6, 200.0));
            clips.insert(AnimationKey::new(Action::Dying, facing), AnimationDef::once(5, 200.0));
            if with_attack {
                clips.insert(AnimationKey::new(Action::Attack, facing), AnimationDef::looping(4, 200.0));
            }
        }
        Self::new(clips)
    }

    /// Resolve a requested key against the available clips.
    /// Missing clips fall back to idle with the same facing.
    pub fn resolve(&self, key: AnimationKey) -> AnimationKey {
        if self.clips.contains_key(&key) {
            key
        } else {
            key.idle()
        }
    }

    /// Switch clips, restarting playback only when the clip actually changes.
    pub fn select(&mut self, key: AnimationKey) {
        let key = self.resolve(key);
        if self.current != key {
            self.current = key;
            self.frame_index = 0;
            self.frame_timer = 0.0;
            self.playing = true;
        }
    }

    pub fn current_def(&self) -> Option<&AnimationDef> {
        self.clips.get(&self.current)
    }

    /// Check if the clip has finished (only meaningful for non-looping).
    pub fn is_finished(&self) -> bool {
        match self.current_def() {
            Some(def) => !def.looping && self.frame_index + 1 >= def.frame_count,
            None => true,
        }
    }

    /// Advance playback by `dt_ms`. Returns true if the frame changed.
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        if !self.playing {
            return false;
        }

        let Some(def) = self.clips.get(&self.current).copied() else {
            return false;
        };

        if def.frame_count == 0 || def.frame_ms <= 0.0 {
            return false;
        }

        self.frame_timer += dt_ms * self.speed;
        let mut frame_changed = false;

        while self.frame_timer >= def.frame_ms {
            self.frame_timer -= def.frame_ms;
            self.frame_index += 1;
            frame_changed = true;

            if self.frame_index >= def.frame_count {
                if def.looping {
                    self.frame_index = 0;
                } else {
                    self.frame_index = def.frame_count - 1;
                    self.playing = false;
                    break;
                }
            }
        }

        frame_changed
    }
}
