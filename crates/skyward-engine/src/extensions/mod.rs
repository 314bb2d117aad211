// extensions/mod.rs
//
// Optional extension modules.
// These are decoupled from core Entity/Scene; games opt in by creating these systems.

pub mod easing;
pub mod fade;
pub mod transform;

pub use easing::{Easing, lerp, lerp_vec3, ease, ease_vec3};
pub use fade::{FadeOverlay, FadeState};
pub use transform::TransformGraph;
