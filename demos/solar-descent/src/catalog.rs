//! Fixed-star catalog: named constellations loaded from embedded JSON,
//! plus a deterministic background star field.

use glam::DVec3;
use serde::Deserialize;

use crate::bodies::unit_hash;
use crate::error::SkyError;
use crate::sky::catalog_to_cartesian;

const CONSTELLATIONS_JSON: &str = include_str!("../data/constellations.json");

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CatalogStar {
    pub name: String,
    /// Right ascension, degrees in [0, 360).
    pub ra: f64,
    /// Declination, degrees in [-90, 90].
    pub dec: f64,
    /// Apparent magnitude (smaller is brighter).
    pub magnitude: f32,
    #[serde(default = "default_color")]
    pub color: [f32; 3],
}

fn default_color() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Constellation {
    pub name: String,
    pub stars: Vec<CatalogStar>,
    /// Index pairs into `stars`.
    #[serde(default)]
    pub connections: Vec<[usize; 2]>,
}

/// Immutable after load.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StarCatalog {
    pub constellations: Vec<Constellation>,
}

/// A generated filler star on the celestial sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundStar {
    pub position: DVec3,
    pub magnitude: f32,
}

impl StarCatalog {
    /// Load the catalog shipped with the game.
    pub fn load() -> Result<Self, SkyError> {
        Self::from_json(CONSTELLATIONS_JSON)
    }

    /// Parse and validate a catalog from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, SkyError> {
        let catalog: Self = serde_json::from_str(json).map_err(SkyError::CatalogParse)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Every connection must index into its own constellation's star list,
    /// and every star must have in-range coordinates.
    pub fn validate(&self) -> Result<(), SkyError> {
        for constellation in &self.constellations {
            let count = constellation.stars.len();
            for star in &constellation.stars {
                if !(0.0..360.0).contains(&star.ra) || !(-90.0..=90.0).contains(&star.dec) {
                    return Err(SkyError::Catalog(format!(
                        "{} in {}: coordinates ({}, {}) out of range",
                        star.name, constellation.name, star.ra, star.dec
                    )));
                }
            }
            if let Some([a, b]) = constellation
                .connections
                .iter()
                .find(|[a, b]| *a >= count || *b >= count)
            {
                return Err(SkyError::Catalog(format!(
                    "{}: connection [{a}, {b}] outside {count} stars",
                    constellation.name
                )));
            }
        }
        Ok(())
    }

    pub fn star_count(&self) -> usize {
        self.constellations.iter().map(|c| c.stars.len()).sum()
    }

    /// (constellation index, star) for every catalog star.
    pub fn stars(&self) -> impl Iterator<Item = (usize, &CatalogStar)> {
        self.constellations
            .iter()
            .enumerate()
            .flat_map(|(i, c)| c.stars.iter().map(move |s| (i, s)))
    }

    /// Constellation lines projected onto a sphere of `radius`.
    pub fn segments(&self, radius: f64) -> Vec<(DVec3, DVec3)> {
        let project = |s: &CatalogStar| catalog_to_cartesian(s.ra, s.dec, radius);
        self.constellations
            .iter()
            .flat_map(|c| {
                c.connections
                    .iter()
                    .map(move |&[a, b]| (project(&c.stars[a]), project(&c.stars[b])))
            })
            .collect()
    }
}

/// `count` stars spread evenly over a sphere of `radius`, identical for the same seed.
pub fn background_stars(count: u32, seed: u32, radius: f64) -> Vec<BackgroundStar> {
    (0..count)
        .map(|i| {
            let base = seed.wrapping_add(i.wrapping_mul(3));
            let ra = unit_hash(base) * 360.0;
            // Uniform in sin(dec) so the poles are not crowded.
            let dec = (unit_hash(base.wrapping_add(1)) * 2.0 - 1.0).asin().to_degrees();
            let magnitude = 3.0 + unit_hash(base.wrapping_add(2)) as f32 * 3.0;
            BackgroundStar {
                position: catalog_to_cartesian(ra, dec, radius),
                magnitude,
            }
        })
        .collect()
}
