use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Tuning for the simulation, provided by the host.
///
/// Units are pixels and milliseconds: velocities in px/ms, gravity in px/ms².
/// Every field has a default, so a partial JSON document is enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed timestep in milliseconds (default: 16).
    pub fixed_dt_ms: f32,
    /// Downward acceleration added to every living body each tick.
    pub gravity: f32,
    /// Horizontal player speed while a move intent is held.
    pub run_speed: f32,
    /// Enemy walking speed (enemies start walking left).
    pub enemy_speed: f32,
    /// Collision stepping increment in pixels. Must stay below the tile size.
    pub step_size: f32,
    pub enemy_count: usize,
    pub crystal_count: usize,
    /// Player spawn position (x, y).
    pub player_spawn: [f32; 2],
    pub player_size: [f32; 2],
    pub enemy_size: [f32; 2],
    pub pickup_size: [f32; 2],
    /// Leftmost enemy spawn x.
    pub enemy_spawn_x: f32,
    /// Random spread added to `enemy_spawn_x`.
    pub enemy_spawn_spread: f32,
    /// Tile column of the first crystal.
    pub crystal_start_col: u32,
    /// Tile row of the crystal line.
    pub crystal_row: u32,
    /// Goal distance from the right edge, in tiles.
    pub goal_inset_cols: u32,
    pub crystal_bonus: u64,
    pub enemy_bonus: u64,
    pub goal_bonus: u64,
    /// How far a collected crystal pops upward, in pixels.
    pub crystal_pop: f32,
    /// Seed for spawn randomisation.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt_ms: 16.0,
            gravity: 0.0001,
            run_speed: 0.1,
            enemy_speed: 0.02,
            step_size: 2.0,
            enemy_count: 5,
            crystal_count: 10,
            player_spawn: [20.0, 0.0],
            player_size: [48.0, 60.0],
            enemy_size: [48.0, 48.0],
            pickup_size: [32.0, 32.0],
            enemy_spawn_x: 900.0,
            enemy_spawn_spread: 600.0,
            crystal_start_col: 7,
            crystal_row: 3,
            goal_inset_cols: 4,
            crystal_bonus: 2000,
            enemy_bonus: 1000,
            goal_bonus: 5000,
            crystal_pop: 20.0,
            seed: 0x5EED,
        }
    }
}

impl GameConfig {
    /// Parse a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::validated)
    }

    /// Replace values the simulation cannot run with by their defaults.
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();
        if !(self.fixed_dt_ms > 0.0) {
            log::warn!("fixed_dt_ms {} is not positive, using {}", self.fixed_dt_ms, defaults.fixed_dt_ms);
            self.fixed_dt_ms = defaults.fixed_dt_ms;
        }
        if !(self.step_size > 0.0) {
            log::warn!("step_size {} is not positive, using {}", self.step_size, defaults.step_size);
            self.step_size = defaults.step_size;
        }
        for (name, size, fallback) in [
            ("player_size", &mut self.player_size, defaults.player_size),
            ("enemy_size", &mut self.enemy_size, defaults.enemy_size),
            ("pickup_size", &mut self.pickup_size, defaults.pickup_size),
        ] {
            if !(size[0] > 0.0 && size[1] > 0.0) {
                log::warn!("{} {:?} is degenerate, using {:?}", name, size, fallback);
                *size = fallback;
            }
        }
        self
    }

    pub fn player_spawn(&self) -> Vec2 {
        Vec2::from(self.player_spawn)
    }

    pub fn player_size(&self) -> Vec2 {
        Vec2::from(self.player_size)
    }

    pub fn enemy_size(&self) -> Vec2 {
        Vec2::from(self.enemy_size)
    }

    pub fn pickup_size(&self) -> Vec2 {
        Vec2::from(self.pickup_size)
    }
}
