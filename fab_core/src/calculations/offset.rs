//! # Pipe Offset (Dogleg)
//!
//! A diagonal piece joining two parallel pipe runs displaced by `set`
//! vertically and `run` horizontally.
//!
//! ```text
//! travel  T = √(set² + run²)
//! angle   φ = atan2(set, run)
//! cut     φ/2 at each end, cuts parallel
//! cutback D·tan(φ/2)   (toe to heel)
//! ```

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::result::{precheck, CalculationResult};
use crate::errors::{require_non_negative, require_positive, CalcResult};
use crate::materials::Material;
use crate::units::{CubicMillimeters, Liters, SquareMeters, SquareMillimeters};

/// Input parameters for an offset.
///
/// ## JSON Example
///
/// ```json
/// { "diameter_mm": 100.0, "set_mm": 300.0, "run_mm": 400.0, "thickness_mm": 3.0 }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OffsetInput {
    /// Pipe outside diameter (mm)
    pub diameter_mm: f64,
    /// Vertical displacement between the two centrelines (mm)
    pub set_mm: f64,
    /// Horizontal advance (mm)
    pub run_mm: f64,
    /// Wall thickness (mm)
    pub thickness_mm: f64,
}

impl OffsetInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("diameter_mm", self.diameter_mm)?;
        require_non_negative("set_mm", self.set_mm)?;
        require_non_negative("run_mm", self.run_mm)?;
        require_positive("travel", self.travel_mm())?;
        require_non_negative("thickness_mm", self.thickness_mm)?;
        Ok(())
    }

    /// Centreline length of the diagonal piece
    pub fn travel_mm(&self) -> f64 {
        self.set_mm.hypot(self.run_mm)
    }

    /// Offset angle from the run direction
    pub fn offset_angle_deg(&self) -> f64 {
        self.set_mm.atan2(self.run_mm).to_degrees()
    }
}

/// Calculate an offset.
pub fn calculate(input: &OffsetInput, material: Material) -> CalcResult<CalculationResult> {
    if let Some(empty) = precheck("offset", input.validate())? {
        return Ok(empty);
    }

    let d = input.diameter_mm;
    let t = input.thickness_mm;
    let density = material.density_kg_dm3();

    let travel = input.travel_mm();
    let angle = input.offset_angle_deg();
    let cut_angle = angle / 2.0;
    let cutback = d * cut_angle.to_radians().tan();

    let area_mm2 = PI * d * travel;
    let area: SquareMeters = SquareMillimeters(area_mm2).into();
    let mass = CubicMillimeters(area_mm2 * t).mass(density);
    let volume: Liters = CubicMillimeters(PI * (d / 2.0).powi(2) * travel).into();

    debug!(travel, angle, cutback, "offset calculated");

    let mut result = CalculationResult::new();
    result
        .metric("Set", format!("{} mm", input.set_mm))
        .metric("Run", format!("{} mm", input.run_mm))
        .metric("Travel (diagonal)", format!("{:.1} mm", travel))
        .metric("Offset angle", format!("{:.2}°", angle))
        .metric("Cut angle", format!("{:.2}°", cut_angle))
        .metric("Cutback", format!("{:.1} mm", cutback))
        .metric("Surface area", format!("{:.2} m²", area.0))
        .metric("Internal volume", format!("{:.2} L", volume.0))
        .metric("Estimated weight", format!("{:.2} kg", mass.0));

    result
        .step(format!(
            "1. PREPARATION:\n   - Material: {} pipe, Ø{} mm, {} mm wall.\n   - The piece joins two parallel pipes with a set of {} mm and a run of {} mm.",
            material.display_name(),
            d,
            t,
            input.set_mm,
            input.run_mm
        ))
        .step(format!(
            "2. TRAVEL:\n   - The connecting piece measures {:.1} mm end to end on its centreline.\n   - Offset angle: {:.2}°.\n   - Cut angle at each end: {:.2}° (half the offset angle).",
            travel, angle, cut_angle
        ))
        .step(format!(
            "3. MARKING THE CUTBACK:\n   - Mark the travel ({:.1} mm) on the pipe.\n   - At each end mark a cutback of {:.1} mm.\n   - The two cuts must be PARALLEL: mark the cutbacks on opposite sides of the pipe (180° apart).",
            travel, cutback
        ))
        .step("4. CUTTING:\n   - Cut along the marks, joining the cutback points smoothly with a wrap-around band.\n   - Deburr and bevel if required.")
        .step(format!(
            "5. ASSEMBLY:\n   - Position the diagonal piece and check the vertical distance between centrelines is exactly {} mm.\n   - Check the run is {} mm.\n   - Tack, check alignment, then weld.",
            input.set_mm, input.run_mm
        ));

    result
        .set("diameter_mm", d)
        .set("set_mm", input.set_mm)
        .set("run_mm", input.run_mm)
        .set("travel_mm", travel)
        .set("angle_deg", angle)
        .set("cut_angle_deg", cut_angle)
        .set("cutback_mm", cutback)
        .set("surface_area_m2", area.0)
        .set("internal_volume_l", volume.0)
        .set("weight_kg", mass.0);

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dogleg() -> OffsetInput {
        OffsetInput {
            diameter_mm: 100.0,
            set_mm: 300.0,
            run_mm: 400.0,
            thickness_mm: 3.0,
        }
    }

    #[test]
    fn test_travel_and_angles() {
        let r = calculate(&dogleg(), Material::Steel).unwrap();
        assert!((r.number("travel_mm").unwrap() - 500.0).abs() < 1e-9);
        let angle = (0.75f64).atan().to_degrees();
        assert!((r.number("angle_deg").unwrap() - angle).abs() < 1e-9);
        assert!((r.number("cut_angle_deg").unwrap() - angle / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_cutback() {
        let r = calculate(&dogleg(), Material::Steel).unwrap();
        // tan(φ/2) = set / (travel + run) = 300 / 900
        assert!((r.number("cutback_mm").unwrap() - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_pure_set_is_a_right_angle() {
        let input = OffsetInput { run_mm: 0.0, ..dogleg() };
        let r = calculate(&input, Material::Steel).unwrap();
        assert!((r.number("angle_deg").unwrap() - 90.0).abs() < 1e-9);
        assert!((r.number("cutback_mm").unwrap() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_mass_uses_travel() {
        let r = calculate(&dogleg(), Material::Stainless).unwrap();
        let expected = PI * 100.0 * 500.0 * 3.0 / 1e6 * 7.90;
        assert!((r.number("weight_kg").unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_zero_travel_is_empty() {
        let input = OffsetInput { set_mm: 0.0, run_mm: 0.0, ..dogleg() };
        assert!(calculate(&input, Material::Steel).unwrap().is_empty());

        let input = OffsetInput { diameter_mm: 0.0, ..dogleg() };
        assert!(calculate(&input, Material::Steel).unwrap().is_empty());
    }
}
