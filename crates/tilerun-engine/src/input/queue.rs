/// Input event types the engine understands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A key was pressed.
    KeyDown { key_code: u32 },
    /// A key was released.
    KeyUp { key_code: u32 },
    /// A touch/click began at world coordinates (x, y).
    PointerDown { x: f32, y: f32 },
    /// A touch/click ended.
    PointerUp { x: f32, y: f32 },
}

/// DOM key codes bound to game intents.
pub mod keys {
    pub const LEFT: u32 = 37;
    pub const UP: u32 = 38;
    pub const RIGHT: u32 = 39;
    pub const SPACE: u32 = 32;
    pub const P: u32 = 80;
    pub const Q: u32 = 81;
    pub const X: u32 = 88;
}

/// A queue of input events.
/// The host writes events into the queue; the runner drains them each frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Discrete intents sampled once per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputIntents {
    pub move_left: bool,
    pub move_right: bool,
    /// Fires once per key press.
    pub jump: bool,
    pub attack: bool,
    /// Toggle pause. Edge-triggered.
    pub pause: bool,
    /// Restart the level with the score cleared. Edge-triggered.
    pub restart: bool,
}

impl InputIntents {
    /// Horizontal direction: -1, 0 or 1. Opposing moves cancel out.
    pub fn horizontal(&self) -> f32 {
        match (self.move_left, self.move_right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// Folds raw events into held keys and one-shot requests.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: InputIntents,
    jump_down: bool,
    /// Pointer-driven horizontal move, cleared on pointer release.
    pointer_dir: f32,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one event. `player_x` steers pointer presses left or right.
    pub fn apply(&mut self, event: &InputEvent, player_x: f32) {
        match *event {
            InputEvent::KeyDown { key_code } => match key_code {
                keys::LEFT => self.held.move_left = true,
                keys::RIGHT => self.held.move_right = true,
                keys::UP | keys::SPACE => {
                    if !self.jump_down {
                        self.held.jump = true;
                    }
                    self.jump_down = true;
                }
                keys::X => self.held.attack = true,
                keys::Q => self.held.restart = true,
                _ => {}
            },
            InputEvent::KeyUp { key_code } => match key_code {
                keys::LEFT => self.held.move_left = false,
                keys::RIGHT => self.held.move_right = false,
                keys::UP | keys::SPACE => self.jump_down = false,
                keys::X => self.held.attack = false,
                keys::P => self.held.pause = true,
                _ => {}
            },
            InputEvent::PointerDown { x, .. } => {
                self.pointer_dir = if x < player_x { -1.0 } else { 1.0 };
            }
            InputEvent::PointerUp { .. } => self.pointer_dir = 0.0,
        }
    }

    /// Intents for the next tick. One-shot requests are consumed.
    pub fn sample(&mut self) -> InputIntents {
        let mut intents = self.held;
        if self.pointer_dir < 0.0 {
            intents.move_left = true;
        } else if self.pointer_dir > 0.0 {
            intents.move_right = true;
        }
        self.held.jump = false;
        self.held.pause = false;
        self.held.restart = false;
        intents
    }

    /// Forget everything held, e.g. after a restart.
    pub fn release_all(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 10.0, y: 20.0 });
        q.push(InputEvent::KeyDown { key_code: 32 });
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1], InputEvent::KeyDown { key_code: 32 });
        assert!(q.drain().is_empty());
    }

    #[test]
    fn held_keys_persist_across_samples() {
        let mut state = InputState::new();
        state.apply(&InputEvent::KeyDown { key_code: keys::RIGHT }, 0.0);
        assert!(state.sample().move_right);
        assert!(state.sample().move_right);
        state.apply(&InputEvent::KeyUp { key_code: keys::RIGHT }, 0.0);
        assert!(!state.sample().move_right);
    }

    #[test]
    fn pause_fires_once_on_release() {
        let mut state = InputState::new();
        state.apply(&InputEvent::KeyDown { key_code: keys::P }, 0.0);
        assert!(!state.sample().pause);
        state.apply(&InputEvent::KeyUp { key_code: keys::P }, 0.0);
        assert!(state.sample().pause);
        assert!(!state.sample().pause);
    }

    #[test]
    fn jump_ignores_key_repeat() {
        let mut state = InputState::new();
        state.apply(&InputEvent::KeyDown { key_code: keys::UP }, 0.0);
        state.apply(&InputEvent::KeyDown { key_code: keys::UP }, 0.0);
        assert!(state.sample().jump);
        state.apply(&InputEvent::KeyDown { key_code: keys::UP }, 0.0);
        assert!(!state.sample().jump);
        state.apply(&InputEvent::KeyUp { key_code: keys::UP }, 0.0);
        state.apply(&InputEvent::KeyDown { key_code: keys::SPACE }, 0.0);
        assert!(state.sample().jump);
    }

    #[test]
    fn opposing_moves_cancel() {
        let intents = InputIntents {
            move_left: true,
            move_right: true,
            ..Default::default()
        };
        assert_eq!(intents.horizontal(), 0.0);
        let left = InputIntents {
            move_left: true,
            ..Default::default()
        };
        assert_eq!(left.horizontal(), -1.0);
    }

    #[test]
    fn pointer_steers_relative_to_player() {
        let mut state = InputState::new();
        state.apply(&InputEvent::PointerDown { x: 5.0, y: 0.0 }, 100.0);
        assert!(state.sample().move_left);
        state.apply(&InputEvent::PointerUp { x: 5.0, y: 0.0 }, 100.0);
        let intents = state.sample();
        assert!(!intents.move_left && !intents.move_right);
    }
}
