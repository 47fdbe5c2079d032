/// Most fixed steps run for a single frame; anything beyond is dropped.
const MAX_STEPS_PER_FRAME: u32 = 10;

/// Fixed timestep accumulator.
/// Runs the simulation at a consistent rate regardless of frame time.
/// All durations are in milliseconds.
pub struct FixedTimestep {
    /// The fixed delta time per tick.
    dt: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(dt_ms: f32) -> Self {
        Self {
            dt: dt_ms,
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_ms: f32) -> u32 {
        self.accumulator += frame_ms.max(0.0);
        self.accumulator = self.accumulator.min(self.dt * MAX_STEPS_PER_FRAME as f32);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// Drop any partial tick, e.g. when pausing.
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }

    /// The fixed delta time in ms.
    pub fn dt(&self) -> f32 {
        self.dt
    }
}
