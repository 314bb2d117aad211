use glam::Vec3;
use crate::api::types::EntityId;

/// Invisible sphere used by ray picking.
/// Usually larger than the visible mesh so small, distant objects stay clickable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickVolume {
    pub radius: f32,
}

/// Fat Entity: a single struct with optional components.
/// Designed for simplicity and rapid prototyping over ECS purity.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// String tag for finding entities by name. Selectable entities report it when picked.
    pub tag: String,
    /// Whether this entity is active (inactive entities are neither rendered nor picked).
    pub active: bool,
    /// Position in world space.
    pub pos: Vec3,
    /// Visible radius in world units. Zero for helper nodes with no mesh.
    pub radius: f32,
    /// Self-rotation angle around the local Y axis, in radians.
    pub spin: f32,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub alpha: f32,
    /// Linear RGB tint multiplied into the mesh colour.
    pub color: [f32; 3],
    /// Game-defined render kind, forwarded untouched to the renderer.
    pub kind: u32,
    /// Game-defined index (e.g. body index), forwarded to the renderer.
    pub index: u32,
    /// Pick volume (optional; entities without one are never hit by rays).
    pub pick: Option<PickVolume>,
    /// Marks the entity as a selection root: picking walks up to the nearest one.
    pub selectable: bool,
}

impl Entity {
    /// Create a new entity with the given ID at the origin.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            tag: String::new(),
            active: true,
            pos: Vec3::ZERO,
            radius: 0.0,
            spin: 0.0,
            alpha: 1.0,
            color: [1.0, 1.0, 1.0],
            kind: 0,
            index: 0,
            pick: None,
            selectable: false,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_pos(mut self, pos: Vec3) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_color(mut self, color: [f32; 3]) -> Self {
        self.color = color;
        self
    }

    pub fn with_kind(mut self, kind: u32, index: u32) -> Self {
        self.kind = kind;
        self.index = index;
        self
    }

    pub fn with_pick_radius(mut self, radius: f32) -> Self {
        self.pick = Some(PickVolume { radius });
        self
    }

    pub fn selectable(mut self) -> Self {
        self.selectable = true;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Whether this entity draws anything.
    pub fn is_visible(&self) -> bool {
        self.active && self.radius > 0.0 && self.alpha > 0.0
    }
}
