use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// One world-space line segment read by the external renderer.
/// 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct LineSegment {
    pub ax: f32,
    pub ay: f32,
    pub az: f32,
    pub bx: f32,
    pub by: f32,
    pub bz: f32,
    pub alpha: f32,
    /// Game-defined style (orbit path, constellation line, ...).
    pub kind: f32,
}

impl LineSegment {
    pub const FLOATS: usize = 8;

    pub fn new(a: Vec3, b: Vec3, alpha: f32, kind: u32) -> Self {
        Self {
            ax: a.x,
            ay: a.y,
            az: a.z,
            bx: b.x,
            by: b.y,
            bz: b.z,
            alpha,
            kind: kind as f32,
        }
    }
}

/// Line segments drawn by the game, rebuilt whenever the game redraws them.
pub struct LineBuffer {
    segments: Vec<LineSegment>,
    capacity: usize,
}

impl LineBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            segments: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn clear(&mut self) {
        self.segments.clear();
    }

    /// Append a segment. Returns false (and drops it) once capacity is reached.
    pub fn push(&mut self, segment: LineSegment) -> bool {
        if self.segments.len() >= self.capacity {
            return false;
        }
        self.segments.push(segment);
        true
    }

    /// Stroke a closed polyline through `points`.
    pub fn push_loop(&mut self, points: &[Vec3], alpha: f32, kind: u32) {
        if points.len() < 2 {
            return;
        }
        for (i, &a) in points.iter().enumerate() {
            let b = points[(i + 1) % points.len()];
            if !self.push(LineSegment::new(a, b, alpha, kind)) {
                log::warn!("line buffer full ({} segments)", self.capacity);
                return;
            }
        }
    }

    pub fn segments(&self) -> &[LineSegment] {
        &self.segments
    }

    pub fn segment_count(&self) -> u32 {
        self.segments.len() as u32
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Raw pointer to segment data for shared-memory reads.
    pub fn segments_ptr(&self) -> *const f32 {
        self.segments.as_ptr() as *const f32
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::with_capacity(2048)
    }
}
