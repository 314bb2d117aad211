//! Body registry: every star, planet and moon in the scene, owned in one place
//! and addressed by stable index or by name.
//!
//! Distances and radii are visualization units, periods are simulated days.
//! Sizes are exaggerated for readability (real planets would be sub-pixel).

use std::collections::HashMap;
use std::f64::consts::TAU;

use crate::error::SkyError;

/// Rendering family of a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Star,
    Planet,
    DwarfPlanet,
    Moon,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub name: String,
    pub kind: BodyKind,
    /// Orbit radius around the primary (or the star).
    pub distance: f64,
    /// Simulated days per revolution. Zero only for a stationary body.
    pub period: f64,
    pub visual_radius: f32,
    /// Orbit angle at t = 0, radians. Fixed at creation.
    pub start_phase: f64,
    /// Simulated days per self-rotation. Negative is retrograde, zero means none.
    pub spin_period: f64,
    /// Registry index of the body this one orbits. `None` orbits the frame origin.
    pub primary: Option<usize>,
}

impl Body {
    pub fn new(name: impl Into<String>, kind: BodyKind, distance: f64, period: f64, visual_radius: f32) -> Self {
        Self {
            name: name.into(),
            kind,
            distance,
            period,
            visual_radius,
            start_phase: 0.0,
            spin_period: 0.0,
            primary: None,
        }
    }

    pub fn with_start_phase(mut self, start_phase: f64) -> Self {
        self.start_phase = start_phase;
        self
    }

    pub fn with_spin_period(mut self, spin_period: f64) -> Self {
        self.spin_period = spin_period;
        self
    }

    pub fn is_stationary(&self) -> bool {
        self.distance == 0.0
    }
}

/// Arena of bodies, built once at scene construction.
#[derive(Debug, Clone, Default)]
pub struct BodyRegistry {
    bodies: Vec<Body>,
    by_name: HashMap<String, usize>,
}

impl BodyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a body orbiting the frame origin. Returns its index.
    pub fn insert(&mut self, body: Body) -> Result<usize, SkyError> {
        self.insert_inner(body, None)
    }

    /// Add a body orbiting an already registered primary.
    pub fn insert_moon(&mut self, body: Body, primary: &str) -> Result<usize, SkyError> {
        let primary = self.index_of(primary)?;
        self.insert_inner(body, Some(primary))
    }

    fn insert_inner(&mut self, mut body: Body, primary: Option<usize>) -> Result<usize, SkyError> {
        if self.by_name.contains_key(&body.name) {
            return Err(SkyError::Config(format!("duplicate body name {}", body.name)));
        }
        if !body.is_stationary() && !(body.period > 0.0) {
            return Err(SkyError::Config(format!(
                "{} orbits at distance {} but has period {}",
                body.name, body.distance, body.period
            )));
        }
        body.primary = primary;
        let index = self.bodies.len();
        self.by_name.insert(body.name.clone(), index);
        self.bodies.push(body);
        Ok(index)
    }

    pub fn index_of(&self, name: &str) -> Result<usize, SkyError> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| SkyError::NotFound(name.to_string()))
    }

    pub fn get(&self, name: &str) -> Option<&Body> {
        self.by_name.get(name).map(|&i| &self.bodies[i])
    }

    pub fn by_index(&self, index: usize) -> Option<&Body> {
        self.bodies.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// The default scene: Sun, eight planets, Pluto and Earth's Moon,
    /// with start phases drawn deterministically from `seed`.
    pub fn solar_system(seed: u32) -> Result<Self, SkyError> {
        let mut registry = Self::new();
        for (i, spec) in SOLAR_SYSTEM.iter().enumerate() {
            let start_phase = if spec.distance == 0.0 {
                0.0
            } else {
                unit_hash(seed.wrapping_add(i as u32 * 7919)) * TAU
            };
            let body = Body::new(spec.name, spec.kind, spec.distance, spec.period, spec.radius)
                .with_start_phase(start_phase)
                .with_spin_period(spec.spin_period);
            match spec.primary {
                Some(primary) => registry.insert_moon(body, primary)?,
                None => registry.insert(body)?,
            };
        }
        Ok(registry)
    }
}

struct BodySpec {
    name: &'static str,
    kind: BodyKind,
    primary: Option<&'static str>,
    distance: f64,
    period: f64,
    radius: f32,
    spin_period: f64,
}

/// Default scene table. Primaries must come before their moons.
const SOLAR_SYSTEM: [BodySpec; 11] = [
    BodySpec { name: "Sun",     kind: BodyKind::Star,        primary: None,          distance: 0.0,   period: 0.0,     radius: 5.0,  spin_period: 25.4 },
    BodySpec { name: "Mercury", kind: BodyKind::Planet,      primary: None,          distance: 10.0,  period: 88.0,    radius: 0.8,  spin_period: 58.6 },
    BodySpec { name: "Venus",   kind: BodyKind::Planet,      primary: None,          distance: 15.0,  period: 225.0,   radius: 1.2,  spin_period: -243.0 },
    BodySpec { name: "Earth",   kind: BodyKind::Planet,      primary: None,          distance: 22.0,  period: 365.0,   radius: 1.3,  spin_period: 1.0 },
    BodySpec { name: "Moon",    kind: BodyKind::Moon,        primary: Some("Earth"), distance: 2.5,   period: 27.3,    radius: 0.35, spin_period: 27.3 },
    BodySpec { name: "Mars",    kind: BodyKind::Planet,      primary: None,          distance: 30.0,  period: 687.0,   radius: 1.0,  spin_period: 1.03 },
    BodySpec { name: "Jupiter", kind: BodyKind::Planet,      primary: None,          distance: 45.0,  period: 4333.0,  radius: 3.2,  spin_period: 0.41 },
    BodySpec { name: "Saturn",  kind: BodyKind::Planet,      primary: None,          distance: 60.0,  period: 10759.0, radius: 2.8,  spin_period: 0.45 },
    BodySpec { name: "Uranus",  kind: BodyKind::Planet,      primary: None,          distance: 75.0,  period: 30687.0, radius: 2.0,  spin_period: -0.72 },
    BodySpec { name: "Neptune", kind: BodyKind::Planet,      primary: None,          distance: 88.0,  period: 60190.0, radius: 1.9,  spin_period: 0.67 },
    BodySpec { name: "Pluto",   kind: BodyKind::DwarfPlanet, primary: None,          distance: 100.0, period: 90560.0, radius: 0.5,  spin_period: -6.39 },
];

/// Deterministic integer hash (no external rand crate).
pub fn hash(seed: u32) -> u32 {
    let mut n = seed;
    n = n.wrapping_mul(2654435761);
    n ^= n >> 16;
    n = n.wrapping_mul(2246822519);
    n ^= n >> 13;
    n
}

/// `hash` mapped to [0, 1).
pub fn unit_hash(seed: u32) -> f64 {
    hash(seed) as f64 / (u32::MAX as f64 + 1.0)
}
