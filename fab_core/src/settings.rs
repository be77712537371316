//! # Fabrication Settings
//!
//! Shop-level tunables shared by the calculators. Every field has a sensible
//! default so a partially written settings file (or none at all) still works.
//!
//! ## Example
//!
//! ```rust
//! use fab_core::settings::FabricationSettings;
//!
//! let settings = FabricationSettings::default();
//! assert_eq!(settings.development_divisions, 12);
//! assert!(settings.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::materials::Material;

/// Global calculation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FabricationSettings {
    /// Material used when a request does not name one
    pub default_material: Material,

    /// Angular divisions for development templates (saddle, fish-mouth)
    pub development_divisions: usize,

    /// Gravitational acceleration used to turn kgf into newtons (m/s²)
    pub gravity: f64,

    /// Yield strength assumed for bracket profiles (MPa, A36-like steel)
    pub structural_yield_mpa: f64,

    /// Stair design targets
    pub stairs: StairSettings,

    /// Bolt tightening assumptions
    pub bolts: BoltSettings,
}

impl Default for FabricationSettings {
    fn default() -> Self {
        FabricationSettings {
            default_material: Material::Steel,
            development_divisions: 12,
            gravity: 9.81,
            structural_yield_mpa: 250.0,
            stairs: StairSettings::default(),
            bolts: BoltSettings::default(),
        }
    }
}

impl FabricationSettings {
    /// Check that the settings describe something usable.
    ///
    /// Every calculator that reads settings calls this first.
    pub fn validate(&self) -> CalcResult<()> {
        if self.development_divisions < 4 || self.development_divisions > 360 {
            return Err(CalcError::invalid_input(
                "development_divisions",
                self.development_divisions.to_string(),
                "Divisions must be between 4 and 360",
            ));
        }
        positive("gravity", self.gravity)?;
        positive("structural_yield_mpa", self.structural_yield_mpa)?;
        positive("stairs.ideal_rise_mm", self.stairs.ideal_rise_mm)?;
        positive("stairs.default_tread_mm", self.stairs.default_tread_mm)?;
        positive("stairs.blondel_min_mm", self.stairs.blondel_min_mm)?;
        positive("stairs.blondel_max_mm", self.stairs.blondel_max_mm)?;
        if self.stairs.blondel_min_mm > self.stairs.blondel_max_mm {
            return Err(CalcError::invalid_input(
                "stairs.blondel_min_mm",
                self.stairs.blondel_min_mm.to_string(),
                "Blondel range minimum exceeds maximum",
            ));
        }
        positive("bolts.nut_factor", self.bolts.nut_factor)?;
        if !(0.0..=1.0).contains(&self.bolts.preload_ratio) {
            return Err(CalcError::invalid_input(
                "bolts.preload_ratio",
                self.bolts.preload_ratio.to_string(),
                "Preload ratio must be within 0-1",
            ));
        }
        Ok(())
    }
}

/// Finite and strictly positive, or an `InvalidInput` naming the field
fn positive(field: &str, value: f64) -> CalcResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(CalcError::invalid_input(field, value.to_string(), "Must be a positive finite number"))
    }
}

/// Stair comfort targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StairSettings {
    /// Target riser height (mm)
    pub ideal_rise_mm: f64,
    /// Tread depth used when no horizontal run is given (mm)
    pub default_tread_mm: f64,
    /// Blondel's rule lower bound for 2·rise + tread (mm)
    pub blondel_min_mm: f64,
    /// Blondel's rule upper bound (mm)
    pub blondel_max_mm: f64,
}

impl Default for StairSettings {
    fn default() -> Self {
        StairSettings {
            ideal_rise_mm: 175.0,
            default_tread_mm: 280.0,
            blondel_min_mm: 630.0,
            blondel_max_mm: 650.0,
        }
    }
}

/// Short-form torque model T = K·d·F.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoltSettings {
    /// Nut factor K (0.2 for dry, unlubricated steel)
    pub nut_factor: f64,
    /// Target preload as a fraction of the per-bolt yield load
    pub preload_ratio: f64,
}

impl Default for BoltSettings {
    fn default() -> Self {
        BoltSettings {
            nut_factor: 0.2,
            preload_ratio: 0.75,
        }
    }
}
