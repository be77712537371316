//! # Wall Bracket (Diagonal Brace)
//!
//! A right-triangle bracket: vertical leg on the wall, horizontal arm under
//! the load, diagonal brace between them.
//!
//! ## Check
//!
//! The load hangs at the end of the arm, so the brace carries
//! `F = P / sin(angle)` where `angle` is measured between arm and brace.
//! The brace is treated as a flat bar `width × thickness` in axial stress:
//!
//! ```text
//! σ = F / (w·t)          allowable = fy / safety_factor
//! ```
//!
//! Buckling of the brace, weld and anchor capacity are not checked.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::result::{precheck, CalculationResult};
use crate::errors::{require_non_negative, require_positive, CalcError, CalcResult};
use crate::materials::Material;
use crate::settings::FabricationSettings;
use crate::units::{CubicMillimeters, KilogramForce, Megapascals, Newtons, SquareMillimeters};

/// Input parameters for a bracket.
///
/// ## JSON Example
///
/// ```json
/// { "height_mm": 400.0, "base_mm": 300.0, "width_mm": 50.0, "thickness_mm": 6.0, "load_kg": 500.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BracketInput {
    /// Vertical leg (mm)
    pub height_mm: f64,
    /// Horizontal arm (mm)
    pub base_mm: f64,
    /// Brace profile width (mm)
    pub width_mm: f64,
    /// Brace profile thickness (mm)
    pub thickness_mm: f64,
    /// Design load at the end of the arm (kg)
    pub load_kg: f64,
    /// Factor applied to the yield strength
    pub safety_factor: f64,
}

impl Default for BracketInput {
    fn default() -> Self {
        BracketInput {
            height_mm: 0.0,
            base_mm: 0.0,
            width_mm: 0.0,
            thickness_mm: 0.0,
            load_kg: 0.0,
            safety_factor: 2.0,
        }
    }
}

impl BracketInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("height_mm", self.height_mm)?;
        require_positive("base_mm", self.base_mm)?;
        require_non_negative("width_mm", self.width_mm)?;
        require_non_negative("thickness_mm", self.thickness_mm)?;
        require_non_negative("load_kg", self.load_kg)?;

        if !(self.safety_factor > 0.0 && self.safety_factor.is_finite()) {
            return Err(CalcError::invalid_input(
                "safety_factor",
                self.safety_factor.to_string(),
                "Safety factor must be positive",
            ));
        }
        Ok(())
    }

    /// Brace cross-section area (mm²)
    pub fn profile_area(&self) -> SquareMillimeters {
        SquareMillimeters(self.width_mm * self.thickness_mm)
    }
}

/// Outcome of the stress check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BracketStatus {
    Safe,
    Danger,
    /// No profile section given, nothing to check against
    NotChecked,
}

impl BracketStatus {
    pub fn label(&self) -> &'static str {
        match self {
            BracketStatus::Safe => "Safe",
            BracketStatus::Danger => "Danger (stress too high)",
            BracketStatus::NotChecked => "Not checked",
        }
    }
}

/// Result of the structural check on the brace
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BraceCheck {
    pub force_kgf: f64,
    pub force_n: f64,
    pub stress_mpa: f64,
    pub allowable_mpa: f64,
    pub max_load_kg: f64,
    pub status: BracketStatus,
}

/// Check the brace of `input` with the shop's yield and gravity settings.
pub fn check_brace(input: &BracketInput, settings: &FabricationSettings) -> BraceCheck {
    let angle = input.height_mm.atan2(input.base_mm);
    let force = KilogramForce(input.load_kg / angle.sin());
    let force_n = force.to_newtons(settings.gravity);

    let allowable = Megapascals(settings.structural_yield_mpa / input.safety_factor);
    let area = input.profile_area();

    if area.0 <= 0.0 {
        return BraceCheck {
            force_kgf: force.0,
            force_n: force_n.0,
            stress_mpa: 0.0,
            allowable_mpa: allowable.0,
            max_load_kg: 0.0,
            status: BracketStatus::NotChecked,
        };
    }

    let stress = force_n.0 / area.0;
    let status = if stress > allowable.0 {
        BracketStatus::Danger
    } else {
        BracketStatus::Safe
    };
    let max_force: Newtons = allowable.force_on(area);
    let max_load_kg = max_force.0 * angle.sin() / settings.gravity;

    BraceCheck {
        force_kgf: force.0,
        force_n: force_n.0,
        stress_mpa: stress,
        allowable_mpa: allowable.0,
        max_load_kg,
        status,
    }
}

/// Calculate the bracket geometry and its brace check.
pub fn calculate(
    input: &BracketInput,
    material: Material,
    settings: &FabricationSettings,
) -> CalcResult<CalculationResult> {
    settings.validate()?;
    if let Some(empty) = precheck("bracket", input.validate())? {
        return Ok(empty);
    }

    let h = input.height_mm;
    let b = input.base_mm;
    let diagonal = h.hypot(b);
    let base_angle = h.atan2(b).to_degrees();
    let top_angle = 90.0 - base_angle;
    let total_length = h + b + diagonal;

    let check = check_brace(input, settings);
    let mass = CubicMillimeters(diagonal * input.profile_area().0).mass(material.density_kg_dm3());

    if check.status == BracketStatus::Danger {
        warn!(stress = check.stress_mpa, allowable = check.allowable_mpa, "bracket brace overstressed");
    }
    debug!(diagonal, base_angle, stress = check.stress_mpa, "bracket calculated");

    let mut result = CalculationResult::new();
    result
        .metric("Diagonal (hypotenuse)", format!("{:.1} mm", diagonal))
        .metric("Base angle", format!("{:.2}°", base_angle))
        .metric("Top angle", format!("{:.2}°", top_angle))
        .metric("Total length", format!("{:.1} mm", total_length))
        .metric("Diagonal force", format!("{:.1} kgf", check.force_kgf))
        .metric("Working stress", format!("{:.1} MPa", check.stress_mpa))
        .metric("Safety status", check.status.label())
        .metric("Theoretical max load", format!("{:.1} kg", check.max_load_kg))
        .metric("Weight (diagonal)", format!("{:.2} kg", mass.0));

    result
        .step(format!(
            "1. ANALYSIS AND PREPARATION:\n   - Profile: {} x {} mm.\n   - Design load: {} kg.\n   - Safety factor: {}.\n   - IMPORTANT: check that the wall or column the bracket is fixed to can carry this load.",
            input.width_mm, input.thickness_mm, input.load_kg, input.safety_factor
        ))
        .step(format!(
            "2. STRUCTURAL CHECK:\n   - The diagonal (hypotenuse) is {:.1} mm.\n   - Axial force in the diagonal: {:.1} kgf.\n   - Working stress: {:.1} MPa against {:.1} MPa allowed. Status: {}.",
            diagonal,
            check.force_kgf,
            check.stress_mpa,
            check.allowable_mpa,
            check.status.label()
        ))
        .step(format!(
            "3. CUTTING THE PROFILES:\n   - Cut the diagonal {:.1} mm long.\n   - Bottom cut angle (base): {:.2}°.\n   - Top cut angle: {:.2}°.",
            diagonal, base_angle, top_angle
        ))
        .step("4. ASSEMBLY:\n   - Set the vertical (H) and horizontal (B) pieces square (90°).\n   - Fit the diagonal. With correct angles the joints close without gaps.\n   - Tack the corners.")
        .step("5. WELDING AND FINISHING:\n   - Weld all joints fully. For heavy loads use E7018 electrodes or MIG/MAG with good penetration.\n   - Add a gusset plate in the inside corners if more stiffness is needed.\n   - Clean the welds and apply corrosion protection.");

    result
        .set("height_mm", h)
        .set("base_mm", b)
        .set("width_mm", input.width_mm)
        .set("diagonal_mm", diagonal)
        .set("angle_deg", base_angle)
        .set("top_angle_deg", top_angle)
        .set("total_length_mm", total_length)
        .set("force_kgf", check.force_kgf)
        .set("force_n", check.force_n)
        .set("stress_mpa", check.stress_mpa)
        .set("allowable_mpa", check.allowable_mpa)
        .set("max_load_kg", check.max_load_kg)
        .set("status", check.status.label())
        .set("weight_kg", mass.0);

    Ok(result)
}
