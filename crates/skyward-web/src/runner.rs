use skyward_engine::{
    Game, GameConfig, EngineContext,
    InputEvent, InputQueue, RenderBuffer, CameraUniform,
    FixedTimestep, build_render_buffer,
};

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner (via `export_game!`)
/// and exports free functions through `#[wasm_bindgen]`, because wasm-bindgen
/// cannot export generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    render_buffer: RenderBuffer,
    camera_uniform: CameraUniform,
    timestep: FixedTimestep,
    config: GameConfig,
    initialized: bool,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let timestep = FixedTimestep::new(config.fixed_dt).with_max_steps(config.max_steps_per_frame);
        let ctx = EngineContext::from_config(&config);
        let camera_uniform = ctx.camera.uniform();

        Self {
            game,
            ctx,
            input: InputQueue::new(),
            render_buffer: RenderBuffer::with_capacity(config.max_instances),
            camera_uniform,
            timestep,
            config,
            initialized: false,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.game.init(&mut self.ctx);
        self.initialized = true;
        self.rebuild_frame_output();
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Viewport resize in screen pixels.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.ctx.camera.resize(width, height);
    }

    /// Run one frame: fixed-step updates, then build the render output.
    ///
    /// Input is handed to the first fixed step only and drained right after,
    /// so each event is processed exactly once per frame.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        self.ctx.clear_frame_data();

        let steps = self.timestep.accumulate(dt);
        for step in 0..steps {
            self.game.update(&mut self.ctx, &self.input);
            if step == 0 {
                self.input.clear();
            }
        }

        self.rebuild_frame_output();
    }

    fn rebuild_frame_output(&mut self) {
        build_render_buffer(self.ctx.scene.iter(), &mut self.render_buffer);
        if self.render_buffer.instances.len() > self.config.max_instances {
            log::warn!(
                "render buffer overflow: {} instances, capacity {}",
                self.render_buffer.instances.len(),
                self.config.max_instances
            );
            self.render_buffer.instances.truncate(self.config.max_instances);
        }
        self.camera_uniform = self.ctx.camera.uniform();
    }

    /// Read-only access to the game (for tests and tooling).
    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    // ---- Pointer accessors for shared-memory reads ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count()
    }

    pub fn camera_uniform_ptr(&self) -> *const f32 {
        &self.camera_uniform as *const CameraUniform as *const f32
    }

    pub fn lines_ptr(&self) -> *const f32 {
        self.ctx.lines.segments_ptr()
    }

    pub fn line_count(&self) -> u32 {
        self.ctx.lines.segment_count()
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len().min(self.config.max_events) as u32
    }

    // ---- Capacity accessors ----

    pub fn max_instances(&self) -> u32 {
        self.config.max_instances as u32
    }

    pub fn max_events(&self) -> u32 {
        self.config.max_events as u32
    }

    pub fn max_lines(&self) -> u32 {
        self.config.max_lines as u32
    }
}
