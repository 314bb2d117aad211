//! Circular orbital motion as pure functions of simulated time.
//!
//! Positions are never stored: every consumer asks for `position(body, t)`
//! with the tick's `t`, so nothing drifts and nothing disagrees within a frame.
//! f64 throughout; convert to f32 only when writing into the scene.

use std::f64::consts::TAU;

use glam::DVec3;

use crate::bodies::{Body, BodyRegistry};
use crate::error::SkyError;

/// Orbit angle in radians at time `t`.
pub fn orbit_angle(body: &Body, t: f64) -> f64 {
    if body.is_stationary() {
        return body.start_phase;
    }
    body.start_phase + TAU / body.period * t
}

/// Position relative to the body's primary (or the frame origin).
/// All orbits are coplanar in the XZ plane.
pub fn local_offset(body: &Body, t: f64) -> DVec3 {
    if body.is_stationary() {
        return DVec3::ZERO;
    }
    let angle = orbit_angle(body, t);
    DVec3::new(body.distance * angle.cos(), 0.0, body.distance * angle.sin())
}

/// Heliocentric position of the named body at time `t`.
pub fn position(registry: &BodyRegistry, name: &str, t: f64) -> Result<DVec3, SkyError> {
    position_at(registry, registry.index_of(name)?, t)
}

/// Heliocentric position of the body at `index`, summing up its primary chain.
pub fn position_at(registry: &BodyRegistry, index: usize, t: f64) -> Result<DVec3, SkyError> {
    let mut current = Some(index);
    let mut pos = DVec3::ZERO;
    // Primaries are registered before their moons, so the chain is finite.
    while let Some(i) = current {
        let body = registry
            .by_index(i)
            .ok_or_else(|| SkyError::NotFound(format!("body #{i}")))?;
        pos += local_offset(body, t);
        current = body.primary;
    }
    Ok(pos)
}

/// Self-rotation angle in [0, 2π). Independent of orbital position.
pub fn spin_angle(body: &Body, t: f64) -> f64 {
    if body.spin_period == 0.0 {
        return 0.0;
    }
    (TAU / body.spin_period * t).rem_euclid(TAU)
}

/// Sample an orbit path around the primary's current position, for drawing.
pub fn orbit_path(registry: &BodyRegistry, index: usize, t: f64, samples: usize) -> Result<Vec<DVec3>, SkyError> {
    let body = registry
        .by_index(index)
        .ok_or_else(|| SkyError::NotFound(format!("body #{index}")))?;
    let center = match body.primary {
        Some(primary) => position_at(registry, primary, t)?,
        None => DVec3::ZERO,
    };
    Ok((0..samples)
        .map(|i| {
            let angle = i as f64 / samples as f64 * TAU;
            center + DVec3::new(body.distance * angle.cos(), 0.0, body.distance * angle.sin())
        })
        .collect())
}
