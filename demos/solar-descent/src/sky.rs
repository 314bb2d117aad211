//! Sky coordinates: the fixed-star catalog on a celestial sphere, and where
//! the other bodies appear from an observer standing on a body's surface.
//!
//! Everything here is a pure function of its inputs.

use glam::DVec3;

use crate::bodies::BodyRegistry;
use crate::error::SkyError;
use crate::orbit;

/// Observer used when the requested one has no orbital data.
pub const DEFAULT_OBSERVER: &str = "Earth";

/// Local horizontal coordinates, degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalSky {
    /// Compass bearing in [0, 360).
    pub azimuth: f64,
    /// Angle above the horizon.
    pub altitude: f64,
}

/// A body as seen from the observer.
#[derive(Debug, Clone, PartialEq)]
pub struct SkyObject {
    /// Registry index of the body.
    pub body: usize,
    pub sky: LocalSky,
    /// Point on the sky dome, relative to the observer.
    pub placement: DVec3,
}

/// Catalog (right ascension, declination), both in degrees, to a point on a
/// sphere of `radius` around the origin.
pub fn catalog_to_cartesian(ra_deg: f64, dec_deg: f64, radius: f64) -> DVec3 {
    let ra = ra_deg.to_radians();
    let dec = dec_deg.to_radians();
    DVec3::new(
        radius * dec.cos() * ra.cos(),
        radius * dec.sin(),
        radius * dec.cos() * ra.sin(),
    )
}

/// Inverse of `catalog_to_cartesian`: (ra in [0, 360), dec in [-90, 90]).
pub fn cartesian_to_catalog(point: DVec3) -> (f64, f64) {
    let radius = point.length();
    if radius == 0.0 {
        return (0.0, 0.0);
    }
    let dec = (point.y / radius).clamp(-1.0, 1.0).asin().to_degrees();
    let ra = point.z.atan2(point.x).to_degrees().rem_euclid(360.0);
    (ra, dec)
}

/// Stand-in altitude: a slow oscillation in time, offset per azimuth so
/// objects do not all rise together. Not a horizon calculation.
pub fn heuristic_altitude(azimuth_deg: f64, t: f64) -> f64 {
    (35.0 + 25.0 * (t * 0.05 + azimuth_deg.to_radians()).sin()).clamp(5.0, 85.0)
}

/// Where `target` appears from `observer` (both heliocentric) at time `t`.
/// Azimuth is taken in the orbital plane.
pub fn local_sky(observer: DVec3, target: DVec3, t: f64) -> LocalSky {
    let rel = target - observer;
    let azimuth = rel.z.atan2(rel.x).to_degrees().rem_euclid(360.0);
    LocalSky {
        azimuth,
        altitude: heuristic_altitude(azimuth, t),
    }
}

/// Point on a sky dome of `radius`; azimuth 0 is -Z, 90 is +X.
pub fn sky_placement(sky: LocalSky, radius: f64) -> DVec3 {
    let az = sky.azimuth.to_radians();
    let alt = sky.altitude.to_radians();
    DVec3::new(
        radius * alt.cos() * az.sin(),
        radius * alt.sin(),
        -radius * alt.cos() * az.cos(),
    )
}

/// Sky coordinates of `target` as seen from `observer`.
pub fn observe(registry: &BodyRegistry, observer: &str, target: &str, t: f64) -> Result<LocalSky, SkyError> {
    let missing = || SkyError::MissingObserverData {
        observer: observer.to_string(),
        target: target.to_string(),
    };
    let from = orbit::position(registry, observer, t).map_err(|_| missing())?;
    let to = orbit::position(registry, target, t).map_err(|_| missing())?;
    Ok(local_sky(from, to, t))
}

/// Index of the observer body, falling back to `DEFAULT_OBSERVER` when the
/// requested one is unknown.
pub fn resolve_observer(registry: &BodyRegistry, name: &str) -> Result<usize, SkyError> {
    if let Ok(index) = registry.index_of(name) {
        return Ok(index);
    }
    log::warn!("no orbital data for observer {name}, standing on {DEFAULT_OBSERVER} instead");
    registry
        .index_of(DEFAULT_OBSERVER)
        .map_err(|_| SkyError::MissingObserverData {
            observer: name.to_string(),
            target: DEFAULT_OBSERVER.to_string(),
        })
}

/// Every other body as seen from `observer`, placed on a dome of `radius`.
pub fn visible_objects(
    registry: &BodyRegistry,
    observer: &str,
    t: f64,
    radius: f64,
) -> Result<Vec<SkyObject>, SkyError> {
    let observer = resolve_observer(registry, observer)?;
    let from = orbit::position_at(registry, observer, t)?;

    registry
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != observer)
        .map(|(i, _)| {
            let sky = local_sky(from, orbit::position_at(registry, i, t)?, t);
            Ok(SkyObject {
                body: i,
                sky,
                placement: sky_placement(sky, radius),
            })
        })
        .collect()
}
