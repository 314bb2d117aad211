//! Ray picking: screen point → ray → nearest pick volume → selectable ancestor.

use glam::{Vec2, Vec3};
use crate::api::types::EntityId;
use crate::components::entity::Entity;
use crate::core::scene::Scene;
use crate::extensions::transform::TransformGraph;
use crate::renderer::camera::Camera3D;

/// A half-line in world space. `direction` is unit length (or zero when degenerate).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Distance along the ray to the first point on the sphere, if any.
    /// An origin inside the sphere counts as a hit at distance 0.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        if self.direction == Vec3::ZERO || radius <= 0.0 {
            return None;
        }
        let oc = self.origin - center;
        let c = oc.length_squared() - radius * radius;
        if c <= 0.0 {
            return Some(0.0);
        }
        let b = oc.dot(self.direction);
        if b > 0.0 {
            // Outside and pointing away
            return None;
        }
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        Some(-b - disc.sqrt())
    }
}

/// One ray/pick-volume intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub entity: EntityId,
    pub distance: f32,
}

/// Intersect a ray against every active pick volume, nearest first.
pub fn raycast(scene: &Scene, ray: &Ray) -> Vec<PickHit> {
    let mut hits: Vec<PickHit> = scene
        .iter_active()
        .filter_map(|e| {
            let volume = e.pick?;
            ray.intersect_sphere(e.pos, volume.radius)
                .map(|distance| PickHit { entity: e.id, distance })
        })
        .collect();
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}

/// The entity itself if selectable, otherwise its nearest selectable, active ancestor.
pub fn selection_root<'a>(
    scene: &'a Scene,
    graph: &TransformGraph,
    id: EntityId,
) -> Option<&'a Entity> {
    std::iter::once(id)
        .chain(graph.ancestors(id))
        .filter_map(|candidate| scene.get(candidate))
        .find(|e| e.selectable && e.active)
}

/// Translates a screen point into the tag of the selected object.
///
/// A hit on a selectable entity's own volume wins over any helper volume,
/// so an oversized volume never swallows a neighbour that sits inside it.
/// Otherwise hits are considered nearest first and the first one whose
/// ancestor chain contains a selectable entity wins. `None` when nothing
/// pickable is hit.
pub fn resolve(
    screen: Vec2,
    camera: &Camera3D,
    scene: &Scene,
    graph: &TransformGraph,
) -> Option<String> {
    let ray = camera.screen_ray(screen);
    let hits = raycast(scene, &ray);
    hits.iter()
        .filter_map(|hit| scene.get(hit.entity))
        .find(|e| e.selectable)
        .or_else(|| {
            hits.iter()
                .find_map(|hit| selection_root(scene, graph, hit.entity))
        })
        .map(|e| e.tag.clone())
}
