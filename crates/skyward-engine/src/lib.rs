pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod input;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext};
pub use api::types::{EntityId, GameEvent};
pub use components::entity::{Entity, PickVolume};
pub use core::scene::Scene;
pub use core::time::{FixedTimestep, SimClock};
pub use renderer::instance::{RenderInstance, RenderBuffer};
pub use renderer::lines::{LineSegment, LineBuffer};
pub use renderer::camera::{Camera3D, CameraPose, CameraUniform};
pub use input::queue::{EventQueue, InputEvent, InputQueue};
pub use systems::picking::{Ray, PickHit};
pub use systems::render::build_render_buffer;

// Extensions: decoupled optional systems
pub use extensions::{
    Easing, lerp, lerp_vec3, ease, ease_vec3,
    FadeOverlay, FadeState,
    TransformGraph,
};
