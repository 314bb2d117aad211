use crate::components::entity::Entity;
use crate::renderer::instance::{RenderBuffer, RenderInstance};

/// Build the render buffer from a set of entities.
/// Inactive, transparent and mesh-less helper entities are skipped.
pub fn build_render_buffer<'a>(entities: impl Iterator<Item = &'a Entity>, buffer: &mut RenderBuffer) {
    buffer.clear();

    for entity in entities.filter(|e| e.is_visible()) {
        buffer.push(RenderInstance {
            x: entity.pos.x,
            y: entity.pos.y,
            z: entity.pos.z,
            radius: entity.radius,
            spin: entity.spin,
            alpha: entity.alpha,
            kind: entity.kind as f32,
            index: entity.index as f32,
            r: entity.color[0],
            g: entity.color[1],
            b: entity.color[2],
            _pad: 0.0,
        });
    }
}
