//! # Cylinder (Rolled Shell) Calculation
//!
//! Blank size, mass, capacity and surface area for a rolled cylindrical shell.
//!
//! ## Assumptions
//!
//! - `diameter_mm` is the **internal** diameter
//! - The blank is developed on the mean diameter `D + t`
//! - Surface area is external (lateral + two end caps)
//!
//! ## Example
//!
//! ```rust
//! use fab_core::calculations::cylinder::{calculate, CylinderInput};
//! use fab_core::materials::Material;
//!
//! let input = CylinderInput { diameter_mm: 1000.0, height_mm: 2000.0, thickness_mm: 5.0 };
//! let result = calculate(&input, Material::Steel).unwrap();
//!
//! let width = result.number("blank_width_mm").unwrap();
//! assert!((width - 3157.30).abs() < 0.01);
//! ```

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::result::{precheck, CalculationResult};
use crate::errors::{require_non_negative, require_positive, CalcResult};
use crate::materials::Material;
use crate::units::{CubicMillimeters, Liters, SquareMeters, SquareMillimeters};

/// Input parameters for a rolled cylinder.
///
/// ## JSON Example
///
/// ```json
/// { "diameter_mm": 1000.0, "height_mm": 2000.0, "thickness_mm": 5.0 }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CylinderInput {
    /// Internal diameter (mm)
    pub diameter_mm: f64,
    /// Shell height, i.e. blank height (mm)
    pub height_mm: f64,
    /// Plate thickness (mm)
    pub thickness_mm: f64,
}

impl CylinderInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("diameter_mm", self.diameter_mm)?;
        require_positive("height_mm", self.height_mm)?;
        require_non_negative("thickness_mm", self.thickness_mm)?;
        Ok(())
    }

    /// Mean diameter D + t, the neutral fibre the blank is developed on
    pub fn mean_diameter_mm(&self) -> f64 {
        self.diameter_mm + self.thickness_mm
    }

    /// External diameter D + 2t
    pub fn external_diameter_mm(&self) -> f64 {
        self.diameter_mm + 2.0 * self.thickness_mm
    }

    /// Blank width = circumference of the mean diameter
    pub fn blank_width_mm(&self) -> f64 {
        PI * self.mean_diameter_mm()
    }
}

/// Calculate the cylinder blank and its derived quantities.
pub fn calculate(input: &CylinderInput, material: Material) -> CalcResult<CalculationResult> {
    if let Some(empty) = precheck("cylinder", input.validate())? {
        return Ok(empty);
    }

    let d = input.diameter_mm;
    let h = input.height_mm;
    let t = input.thickness_mm;
    let density = material.density_kg_dm3();

    let mean_diameter = input.mean_diameter_mm();
    let external_diameter = input.external_diameter_mm();
    let blank_width = input.blank_width_mm();

    let mass = CubicMillimeters(blank_width * h * t).mass(density);

    let capacity: Liters = CubicMillimeters(PI * (d / 2.0).powi(2) * h).into();

    let ext_radius = external_diameter / 2.0;
    let lateral = 2.0 * PI * ext_radius * h;
    let cap = PI * ext_radius.powi(2);
    let surface: SquareMeters = SquareMillimeters(lateral + 2.0 * cap).into();

    debug!(blank_width, mass = mass.0, "cylinder calculated");

    let mut result = CalculationResult::new();
    result
        .metric("Blank size", format!("{:.1} x {} mm", blank_width, h))
        .metric("Mean diameter", format!("{:.2} mm", mean_diameter))
        .metric("External diameter", format!("{:.2} mm", external_diameter))
        .metric("Cut length (L)", format!("{:.2} mm", blank_width))
        .metric("Estimated weight", format!("{:.2} kg", mass.0))
        .metric("Internal volume", format!("{:.2} L", capacity.0))
        .metric("Surface area", format!("{:.2} m²", surface.0));

    result
        .step(format!(
            "PREPARATION: Select a {} plate, {} mm thick. Check that it is flat and free of defects.",
            material.display_name(),
            t
        ))
        .step(format!(
            "LAYOUT: Mark a rectangle {:.1} mm wide by {} mm high. Check squareness by measuring both diagonals; they must be equal.",
            blank_width, h
        ))
        .step("CUTTING: Cut along the marked lines (shear, plasma or oxy-fuel) and deburr the edges.")
        .step(format!(
            "ROLLING: Feed the plate square to the rolls and make progressive passes until the internal diameter reaches {} mm. Check roundness with a template.",
            d
        ))
        .step("CLOSING: Prepare the seam edges (bevel if required), tack the joint, check alignment, then weld.");

    result
        .set("blank_width_mm", blank_width)
        .set("height_mm", h)
        .set("mean_diameter_mm", mean_diameter)
        .set("external_diameter_mm", external_diameter)
        .set("weight_kg", mass.0)
        .set("internal_volume_l", capacity.0)
        .set("surface_area_m2", surface.0);

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tank() -> CylinderInput {
        CylinderInput {
            diameter_mm: 1000.0,
            height_mm: 2000.0,
            thickness_mm: 5.0,
        }
    }

    #[test]
    fn test_blank_width_uses_mean_diameter() {
        let r = calculate(&tank(), Material::Steel).unwrap();
        let width = r.number("blank_width_mm").unwrap();
        assert!((width - PI * 1005.0).abs() < 1e-9);
        assert!((width - 3157.30).abs() < 0.01);
        assert_eq!(r.metric_value("Blank size"), Some("3157.3 x 2000 mm"));
    }

    #[test]
    fn test_mass_and_capacity() {
        let r = calculate(&tank(), Material::Steel).unwrap();
        // 3157.30 * 2000 * 5 mm³ = 31.573 L -> * 7.85
        let expected_mass = PI * 1005.0 * 2000.0 * 5.0 / 1e6 * 7.85;
        assert!((r.number("weight_kg").unwrap() - expected_mass).abs() < 1e-9);
        assert!((expected_mass - 247.85).abs() < 0.01);

        let expected_volume = PI * 500.0 * 500.0 * 2000.0 / 1e6;
        let volume = r.number("internal_volume_l").unwrap();
        assert!(((volume - expected_volume) / expected_volume).abs() < 1e-6);
    }

    #[test]
    fn test_surface_area_includes_caps() {
        let r = calculate(&tank(), Material::Steel).unwrap();
        let re: f64 = 505.0;
        let expected = (2.0 * PI * re * 2000.0 + 2.0 * PI * re * re) / 1e6;
        assert!((r.number("surface_area_m2").unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_material_changes_mass_only() {
        let steel = calculate(&tank(), Material::Steel).unwrap();
        let alu = calculate(&tank(), Material::Aluminum).unwrap();
        let ratio = alu.number("weight_kg").unwrap() / steel.number("weight_kg").unwrap();
        assert!((ratio - 2.70 / 7.85).abs() < 1e-12);
        assert_eq!(alu.number("blank_width_mm"), steel.number("blank_width_mm"));
    }

    #[test]
    fn test_insufficient_input_is_empty() {
        let mut input = tank();
        input.height_mm = 0.0;
        let r = calculate(&input, Material::Steel).unwrap();
        assert!(r.is_empty());
        assert!(r.calculated.is_empty());

        input = tank();
        input.diameter_mm = -10.0;
        assert!(calculate(&input, Material::Steel).unwrap().is_empty());
    }

    #[test]
    fn test_serialization() {
        let input = tank();
        let json = serde_json::to_string_pretty(&input).unwrap();
        let roundtrip: CylinderInput = serde_json::from_str(&json).unwrap();
        assert_eq!(input, roundtrip);

        let partial: CylinderInput = serde_json::from_str(r#"{ "diameter_mm": 300 }"#).unwrap();
        assert_eq!(partial.height_mm, 0.0);
    }
}
