use tilerun_engine::{
    build_render_buffer, FixedTimestep, GameConfig, GameEvent, InputEvent, InputQueue,
    InputState, LoadError, RenderBuffer, TickOutcome, World,
};

/// Wires a `World` to the host: queues raw input, runs the fixed timestep,
/// and flattens each frame's output into buffers the host reads by pointer.
///
/// The web exports keep one `GameRunner` in a `thread_local!`, because
/// wasm-bindgen cannot hand out references into Rust-owned state.
pub struct GameRunner {
    world: World,
    input: InputQueue,
    intents: InputState,
    render_buffer: RenderBuffer,
    timestep: FixedTimestep,
    /// Flat buffer of sound event IDs for host reads.
    sound_buffer: Vec<u8>,
    event_buffer: Vec<GameEvent>,
}

impl GameRunner {
    pub fn new(world: World) -> Self {
        let timestep = FixedTimestep::new(world.config().fixed_dt_ms);
        Self {
            world,
            input: InputQueue::new(),
            intents: InputState::new(),
            render_buffer: RenderBuffer::new(),
            timestep,
            sound_buffer: Vec::with_capacity(16),
            event_buffer: Vec::with_capacity(16),
        }
    }

    /// Build a runner from a JSON config (empty for defaults) and level texts.
    pub fn from_text(
        config_json: &str,
        levels: &[&str],
        tile_width: f32,
        tile_height: f32,
    ) -> Result<Self, LoadError> {
        let config = if config_json.trim().is_empty() {
            GameConfig::default()
        } else {
            GameConfig::from_json(config_json)?
        };
        let world = World::from_text(config, levels, tile_width, tile_height)?;
        Ok(Self::new(world))
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: fold input, step the world, publish the frame.
    pub fn tick(&mut self, frame_ms: f32) {
        let player_x = self.world.player().footprint.center().x;
        for event in self.input.drain() {
            self.intents.apply(&event, player_x);
        }

        let steps = self.timestep.accumulate(frame_ms);
        let dt = self.timestep.dt();
        for _ in 0..steps {
            let intents = self.intents.sample();
            match self.world.tick(dt, &intents) {
                TickOutcome::GameOver => {
                    self.world.restart(false);
                    self.intents.release_all();
                }
                TickOutcome::Paused => {
                    // Unpausing starts from a clean accumulator
                    self.timestep.reset();
                    break;
                }
                TickOutcome::Running | TickOutcome::Finished => {}
            }
        }

        build_render_buffer(self.world.scene(), &mut self.render_buffer);

        // Pack this frame's sounds and events, then let the world forget them
        self.sound_buffer.clear();
        for sound in self.world.sounds() {
            self.sound_buffer.push(sound.0 as u8);
        }
        self.event_buffer.clear();
        self.event_buffer.extend_from_slice(self.world.events());
        self.world.clear_frame_data();
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    // ---- Pointer accessors for host reads ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count()
    }

    pub fn sound_events_ptr(&self) -> *const u8 {
        self.sound_buffer.as_ptr()
    }

    pub fn sound_events_len(&self) -> u32 {
        self.sound_buffer.len() as u32
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.event_buffer.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.event_buffer.len() as u32
    }

    pub fn world_width(&self) -> f32 {
        self.world.grid().pixel_width()
    }

    pub fn world_height(&self) -> f32 {
        self.world.grid().pixel_height()
    }

    pub fn score(&self) -> f64 {
        self.world.score() as f64
    }

    pub fn level(&self) -> u32 {
        self.world.level_index() as u32
    }

    pub fn is_paused(&self) -> bool {
        self.world.is_paused()
    }

    pub fn is_finished(&self) -> bool {
        self.world.is_finished()
    }
}
