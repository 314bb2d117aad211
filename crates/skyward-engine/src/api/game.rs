use crate::core::scene::Scene;
use crate::api::types::{EntityId, GameEvent};
use crate::extensions::transform::TransformGraph;
use crate::input::queue::InputQueue;
use crate::renderer::camera::Camera3D;
use crate::renderer::lines::LineBuffer;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Maximum fixed steps run for one rendered frame (default: 10).
    pub max_steps_per_frame: u32,
    /// Initial viewport width in screen pixels.
    pub viewport_width: f32,
    /// Initial viewport height in screen pixels.
    pub viewport_height: f32,
    /// Maximum number of render instances (default: 512).
    pub max_instances: usize,
    /// Maximum number of game events per frame (default: 64).
    pub max_events: usize,
    /// Maximum number of line segments (default: 2048).
    pub max_lines: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            max_steps_per_frame: 10,
            viewport_width: 1280.0,
            viewport_height: 720.0,
            max_instances: 512,
            max_events: 64,
            max_lines: 2048,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state, spawn entities, configure the scene.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One fixed simulation tick. `input` holds everything queued since the last frame.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub graph: TransformGraph,
    pub camera: Camera3D,
    pub events: Vec<GameEvent>,
    /// Persists across frames; the game clears it when it redraws.
    pub lines: LineBuffer,
    dt: f32,
    next_id: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::from_config(&GameConfig::default())
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            scene: Scene::new(),
            graph: TransformGraph::new(),
            camera: Camera3D::new(config.viewport_width, config.viewport_height),
            events: Vec::with_capacity(config.max_events),
            lines: LineBuffer::with_capacity(config.max_lines),
            dt: config.fixed_dt,
            next_id: 1,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Seconds of real time covered by one update.
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Emit a game event to be forwarded to the UI layer.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}
