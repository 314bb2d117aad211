//! Scene tuning loaded from JSON. Every field has a default, so a partial
//! (or empty) object is a valid config.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::SkyError;

const SCENE_JSON: &str = include_str!("../data/scene.json");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Simulated days per real second.
    pub time_scale: f64,
    /// Simulated time at startup, in days.
    pub start_time: f64,
    /// Seed for the fixed start phase of every body.
    pub phase_seed: u32,

    /// Per-step smoothing factor for the fly-in, in (0, 1].
    pub focus_lerp: f32,
    /// Fly-in is complete once the camera is this close to its resting offset.
    pub arrival_threshold: f32,
    /// Resting camera distance in multiples of the target's visual radius.
    pub focus_distance: f32,
    /// Hard limit on the fly-in, in seconds.
    pub focus_timeout: f32,

    /// Seconds for the approach toward the surface.
    pub approach_duration: f32,
    /// Approach end point in multiples of the target's visual radius.
    pub surface_standoff: f32,
    pub fade_in: f32,
    pub fade_hold: f32,
    pub fade_out: f32,

    /// Radius of the celestial sphere around the surface observer.
    pub sky_radius: f32,
    /// Centre of the surface-sky scene, kept well away from the orbital scene.
    pub sky_anchor: [f32; 3],
    pub background_stars: u32,

    /// Invisible hit volume radius in multiples of the visual radius.
    pub hit_volume_scale: f32,
    /// Smallest hit volume radius, so far-away bodies stay clickable.
    pub hit_volume_min: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            time_scale: 10.0,
            start_time: 0.0,
            phase_seed: 2024,

            focus_lerp: 0.06,
            arrival_threshold: 0.05,
            focus_distance: 6.0,
            focus_timeout: 6.0,

            approach_duration: 1.5,
            surface_standoff: 1.15,
            fade_in: 0.6,
            fade_hold: 0.35,
            fade_out: 0.8,

            sky_radius: 500.0,
            sky_anchor: [0.0, -5000.0, 0.0],
            background_stars: 300,

            hit_volume_scale: 3.0,
            hit_volume_min: 2.0,
        }
    }
}

impl SceneConfig {
    /// Parse and validate a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, SkyError> {
        let config: Self = serde_json::from_str(json).map_err(SkyError::ConfigParse)?;
        config.validate()?;
        Ok(config)
    }

    /// The config shipped with the game, or defaults if it fails to load.
    pub fn load() -> Self {
        Self::from_json(SCENE_JSON).unwrap_or_else(|err| {
            log::warn!("{err}; using default scene config");
            Self::default()
        })
    }

    pub fn validate(&self) -> Result<(), SkyError> {
        if !(self.focus_lerp > 0.0 && self.focus_lerp <= 1.0) {
            return Err(SkyError::Config(format!(
                "focus_lerp must be in (0, 1], got {}",
                self.focus_lerp
            )));
        }

        let positive = [
            ("arrival_threshold", self.arrival_threshold),
            ("focus_distance", self.focus_distance),
            ("focus_timeout", self.focus_timeout),
            ("approach_duration", self.approach_duration),
            ("surface_standoff", self.surface_standoff),
            ("fade_in", self.fade_in),
            ("fade_out", self.fade_out),
            ("sky_radius", self.sky_radius),
            ("hit_volume_scale", self.hit_volume_scale),
        ];
        if let Some((name, value)) = positive.iter().find(|(_, v)| !(*v > 0.0)) {
            return Err(SkyError::Config(format!("{name} must be positive, got {value}")));
        }

        if !(self.fade_hold >= 0.0) || !(self.hit_volume_min >= 0.0) {
            return Err(SkyError::Config("fade_hold and hit_volume_min must not be negative".into()));
        }
        if self.surface_standoff <= 1.0 {
            return Err(SkyError::Config(format!(
                "surface_standoff must keep the camera outside the body, got {}",
                self.surface_standoff
            )));
        }
        if !self.time_scale.is_finite() || !self.start_time.is_finite() {
            return Err(SkyError::Config("time_scale and start_time must be finite".into()));
        }
        Ok(())
    }

    pub fn sky_anchor(&self) -> Vec3 {
        Vec3::from_array(self.sky_anchor)
    }

    /// Pick radius for a body of the given visual radius.
    pub fn hit_radius(&self, visual_radius: f32) -> f32 {
        (visual_radius * self.hit_volume_scale).max(self.hit_volume_min)
    }
}
