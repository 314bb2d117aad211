// extensions/transform.rs
//
// Transform hierarchy extension. Tracks parent-child relationships by EntityId.
// Completely decoupled from Entity/Scene internals.
//
// Usage:
//   let mut graph = TransformGraph::new();
//   graph.set_parent(hit_volume_id, Some(planet_id));
//   graph.propagate(&mut scene);  // Updates world positions from local offsets

use std::collections::HashMap;
use glam::Vec3;
use crate::api::types::EntityId;
use crate::core::scene::Scene;

/// Node in the transform hierarchy.
#[derive(Debug, Clone, Default)]
struct TransformNode {
    parent: Option<EntityId>,
    children: Vec<EntityId>,
    /// Translation relative to parent (or world if no parent).
    offset: Vec3,
}

/// Transform hierarchy graph: manages parent-child relationships.
///
/// Lives next to the Scene rather than inside it. Picking uses the parent
/// chain to map a hit helper node back to the object it belongs to.
#[derive(Debug, Default)]
pub struct TransformGraph {
    nodes: HashMap<EntityId, TransformNode>,
    /// Entities with no parent (top-level), in registration order.
    roots: Vec<EntityId>,
    /// Dirty flag, set when hierarchy or offsets change, cleared after propagate.
    dirty: bool,
}

impl TransformGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity as a root with the given offset.
    pub fn register(&mut self, id: EntityId, offset: Vec3) {
        let node = self.nodes.entry(id).or_default();
        node.offset = offset;
        if node.parent.is_none() && !self.roots.contains(&id) {
            self.roots.push(id);
        }
        self.dirty = true;
    }

    /// Set the parent of an entity. Pass `None` to make it a root.
    /// Requests that would create a cycle are ignored.
    pub fn set_parent(&mut self, child: EntityId, parent: Option<EntityId>) {
        if let Some(p) = parent {
            if p == child || self.ancestors(p).any(|a| a == child) {
                log::warn!("TransformGraph: refusing to parent {:?} under its descendant {:?}", child, p);
                return;
            }
        }

        self.nodes.entry(child).or_default();
        if let Some(p) = parent {
            self.nodes.entry(p).or_default();
            if !self.roots.contains(&p) && self.get_parent(p).is_none() {
                self.roots.push(p);
            }
        }

        // Remove from old parent's children
        if let Some(old_parent) = self.nodes.get(&child).and_then(|n| n.parent) {
            if let Some(old_node) = self.nodes.get_mut(&old_parent) {
                old_node.children.retain(|&c| c != child);
            }
        }

        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = parent;
        }

        match parent {
            Some(p) => {
                if let Some(parent_node) = self.nodes.get_mut(&p) {
                    if !parent_node.children.contains(&child) {
                        parent_node.children.push(child);
                    }
                }
                self.roots.retain(|&r| r != child);
            }
            None => {
                if !self.roots.contains(&child) {
                    self.roots.push(child);
                }
            }
        }

        self.dirty = true;
    }

    /// Set the local offset for an entity.
    pub fn set_offset(&mut self, id: EntityId, offset: Vec3) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.offset = offset;
            self.dirty = true;
        }
    }

    /// Get the parent of an entity.
    pub fn get_parent(&self, id: EntityId) -> Option<EntityId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    /// Get the children of an entity.
    pub fn get_children(&self, id: EntityId) -> Option<&[EntityId]> {
        self.nodes.get(&id).map(|n| n.children.as_slice())
    }

    /// Walk up from `id` (exclusive) to its root.
    pub fn ancestors(&self, id: EntityId) -> impl Iterator<Item = EntityId> + '_ {
        std::iter::successors(self.get_parent(id), move |&p| self.get_parent(p))
    }

    /// Remove an entity from the hierarchy.
    /// Children become roots (orphaned).
    pub fn remove(&mut self, id: EntityId) {
        if let Some(node) = self.nodes.remove(&id) {
            if let Some(parent) = node.parent {
                if let Some(parent_node) = self.nodes.get_mut(&parent) {
                    parent_node.children.retain(|&c| c != id);
                }
            }

            for child in node.children {
                if let Some(child_node) = self.nodes.get_mut(&child) {
                    child_node.parent = None;
                }
                if !self.roots.contains(&child) {
                    self.roots.push(child);
                }
            }

            self.roots.retain(|&r| r != id);
        }
        self.dirty = true;
    }

    /// Propagate offsets from roots down through the hierarchy,
    /// writing world positions into `Entity.pos`.
    pub fn propagate(&mut self, scene: &mut Scene) {
        if !self.dirty {
            return;
        }

        for &root in &self.roots {
            self.propagate_recursive(root, Vec3::ZERO, scene);
        }

        self.dirty = false;
    }

    fn propagate_recursive(&self, id: EntityId, parent_pos: Vec3, scene: &mut Scene) {
        let Some(node) = self.nodes.get(&id) else { return };
        let world_pos = parent_pos + node.offset;

        if let Some(entity) = scene.get_mut(id) {
            entity.pos = world_pos;
        }

        for &child in &node.children {
            self.propagate_recursive(child, world_pos, scene);
        }
    }

    /// Check if the hierarchy has pending changes.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Number of entities in the hierarchy.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the hierarchy is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Clear all hierarchy data.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.roots.clear();
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::entity::Entity;

    #[test]
    fn parent_child_relationship() {
        let mut graph = TransformGraph::new();
        let parent = EntityId(1);
        let child = EntityId(2);

        graph.register(parent, Vec3::ZERO);
        graph.register(child, Vec3::ZERO);
        graph.set_parent(child, Some(parent));

        assert_eq!(graph.get_parent(child), Some(parent));
        assert_eq!(graph.get_children(parent), Some([child].as_slice()));
    }

    #[test]
    fn propagate_composes_offsets() {
        let mut graph = TransformGraph::new();
        let mut scene = Scene::new();

        let planet = EntityId(1);
        let moon = EntityId(2);
        let hit = EntityId(3);
        scene.spawn(Entity::new(planet));
        scene.spawn(Entity::new(moon));
        scene.spawn(Entity::new(hit));

        graph.register(planet, Vec3::new(100.0, 0.0, 0.0));
        graph.register(moon, Vec3::new(0.0, 0.0, 5.0));
        graph.register(hit, Vec3::ZERO);
        graph.set_parent(moon, Some(planet));
        graph.set_parent(hit, Some(moon));

        graph.propagate(&mut scene);

        assert_eq!(scene.get(moon).unwrap().pos, Vec3::new(100.0, 0.0, 5.0));
        assert_eq!(scene.get(hit).unwrap().pos, Vec3::new(100.0, 0.0, 5.0));
        assert!(!graph.is_dirty());
    }

    #[test]
    fn ancestors_walks_to_root() {
        let mut graph = TransformGraph::new();
        graph.register(EntityId(1), Vec3::ZERO);
        graph.set_parent(EntityId(2), Some(EntityId(1)));
        graph.set_parent(EntityId(3), Some(EntityId(2)));

        let chain: Vec<_> = graph.ancestors(EntityId(3)).collect();
        assert_eq!(chain, vec![EntityId(2), EntityId(1)]);
        assert_eq!(graph.ancestors(EntityId(1)).count(), 0);
    }

    #[test]
    fn cycles_are_refused() {
        let mut graph = TransformGraph::new();
        graph.set_parent(EntityId(2), Some(EntityId(1)));
        graph.set_parent(EntityId(1), Some(EntityId(2)));
        assert_eq!(graph.get_parent(EntityId(1)), None);
    }

    #[test]
    fn remove_orphans_children() {
        let mut graph = TransformGraph::new();
        let parent = EntityId(1);
        let child = EntityId(2);

        graph.register(parent, Vec3::ZERO);
        graph.register(child, Vec3::ZERO);
        graph.set_parent(child, Some(parent));

        graph.remove(parent);

        assert_eq!(graph.get_parent(child), None);
        assert!(graph.roots.contains(&child));
    }
}
