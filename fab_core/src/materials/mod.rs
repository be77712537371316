//! # Materials Database
//!
//! Mass densities for the sheet and pipe materials a fabrication shop
//! commonly works with, plus the metric fastener tables used by the
//! bolted-joint check.
//!
//! Densities are in kg/dm³ (numerically g/cm³), so a volume in litres times
//! the density gives kilograms directly.
//!
//! ## Example
//!
//! ```rust
//! use fab_core::materials::Material;
//!
//! let m = Material::from_id("stainless");
//! assert_eq!(m.density_kg_dm3(), 7.90);
//!
//! // Unknown identifiers fall back to carbon steel
//! assert_eq!(Material::from_id("unobtainium"), Material::Steel);
//! ```

pub mod fasteners;

pub use fasteners::{
    bolt_class, fastener_size, BoltClassData, FastenerData, BOLT_CLASS_DESIGNATIONS,
    FASTENER_SIZE_DESIGNATIONS,
};

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Density used when a material identifier is not recognized (carbon steel).
pub const FALLBACK_DENSITY_KG_DM3: f64 = 7.85;

/// Material identifier -> density (kg/dm³)
static DENSITIES: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    HashMap::from([
        ("steel", 7.85),
        ("galvanized", 7.85),
        ("stainless", 7.90),
        ("aluminum", 2.70),
        ("copper", 8.96),
        ("brass", 8.73),
        ("bronze", 8.80),
        ("cast_iron", 7.20),
        ("nylon", 1.15),
    ])
});

/// Look up a density by raw identifier, falling back to steel.
pub fn density_for(id: &str) -> f64 {
    match DENSITIES.get(id) {
        Some(density) => *density,
        None => {
            warn!(material = id, "unknown material, using steel density");
            FALLBACK_DENSITY_KG_DM3
        }
    }
}

/// Sheet/pipe material selection.
///
/// Serializes as its snake_case identifier (`"cast_iron"`). Deserializing an
/// unknown identifier yields [`Material::Steel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Material {
    /// Carbon steel
    #[default]
    Steel,
    /// Stainless steel
    Stainless,
    /// Aluminium
    Aluminum,
    Copper,
    Brass,
    Bronze,
    /// Grey cast iron
    CastIron,
    /// Hot-dip galvanized steel
    Galvanized,
    Nylon,
}

impl Material {
    /// All materials for UI selection
    pub const ALL: [Material; 9] = [
        Material::Steel,
        Material::Stainless,
        Material::Aluminum,
        Material::Copper,
        Material::Brass,
        Material::Bronze,
        Material::CastIron,
        Material::Galvanized,
        Material::Nylon,
    ];

    /// Identifier used in requests and in the density table
    pub fn id(&self) -> &'static str {
        match self {
            Material::Steel => "steel",
            Material::Stainless => "stainless",
            Material::Aluminum => "aluminum",
            Material::Copper => "copper",
            Material::Brass => "brass",
            Material::Bronze => "bronze",
            Material::CastIron => "cast_iron",
            Material::Galvanized => "galvanized",
            Material::Nylon => "nylon",
        }
    }

    /// Parse an identifier. Case and separators are forgiven; anything
    /// unrecognized becomes steel.
    pub fn from_id(s: &str) -> Self {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        match Material::ALL.iter().find(|m| m.id() == normalized) {
            Some(m) => *m,
            None => {
                warn!(material = s, "unknown material, falling back to steel");
                Material::Steel
            }
        }
    }

    /// Mass density in kg/dm³
    pub fn density_kg_dm3(&self) -> f64 {
        density_for(self.id())
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Material::Steel => "Carbon Steel",
            Material::Stainless => "Stainless Steel",
            Material::Aluminum => "Aluminum",
            Material::Copper => "Copper",
            Material::Brass => "Brass",
            Material::Bronze => "Bronze",
            Material::CastIron => "Cast Iron",
            Material::Galvanized => "Galvanized Steel",
            Material::Nylon => "Nylon",
        }
    }
}

impl std::fmt::Display for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl From<String> for Material {
    fn from(s: String) -> Self {
        Material::from_id(&s)
    }
}

impl From<Material> for String {
    fn from(m: Material) -> Self {
        m.id().to_string()
    }
}
