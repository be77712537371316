//! # Straight Stair
//!
//! Step count, rise/tread and stringer length for a straight steel stair,
//! checked against Blondel's comfort rule `630 ≤ 2·rise + tread ≤ 650`.
//!
//! The material estimate uses plate area when a thickness is given: two
//! 200 mm deep stringers plus the developed tread/riser area. Without a
//! thickness it falls back to shop linear weights (15 kg/m for stringers,
//! 40 kg/m² for checker-plate treads).

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::result::{precheck, CalculationResult};
use crate::errors::{require_non_negative, require_positive, CalcResult};
use crate::materials::Material;
use crate::settings::FabricationSettings;
use crate::units::{CubicMillimeters, Liters, SquareMeters, SquareMillimeters};

/// Assumed stringer depth for the plate-area estimate (mm)
pub const STRINGER_DEPTH_MM: f64 = 200.0;

/// Fallback stringer weight (kg/m)
pub const STRINGER_KG_PER_M: f64 = 15.0;

/// Fallback tread plate weight (kg/m²)
pub const TREAD_KG_PER_M2: f64 = 40.0;

/// Input parameters for a stair.
///
/// ## JSON Example
///
/// ```json
/// { "height_mm": 2800.0, "base_mm": 4000.0, "width_mm": 900.0, "thickness_mm": 4.75 }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StairsInput {
    /// Floor-to-floor height (mm)
    pub height_mm: f64,
    /// Available horizontal run (mm); zero uses the default tread
    pub base_mm: f64,
    /// Stair width (mm)
    pub width_mm: f64,
    /// Plate thickness for the estimate (mm); zero uses linear weights
    pub thickness_mm: f64,
}

impl StairsInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("height_mm", self.height_mm)?;
        require_non_negative("base_mm", self.base_mm)?;
        require_non_negative("width_mm", self.width_mm)?;
        require_non_negative("thickness_mm", self.thickness_mm)?;
        Ok(())
    }
}

/// Step layout of a stair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepLayout {
    pub steps: usize,
    pub rise_mm: f64,
    pub tread_mm: f64,
    pub blondel_mm: f64,
    pub blondel_ok: bool,
}

/// Lay out the steps for `input` with the shop's comfort targets.
pub fn layout(input: &StairsInput, settings: &FabricationSettings) -> StepLayout {
    let targets = &settings.stairs;
    let steps = ((input.height_mm / targets.ideal_rise_mm).round() as usize).max(1);
    let rise = input.height_mm / steps as f64;
    let tread = if input.base_mm > 0.0 {
        input.base_mm / steps as f64
    } else {
        targets.default_tread_mm
    };
    let blondel = 2.0 * rise + tread;

    StepLayout {
        steps,
        rise_mm: rise,
        tread_mm: tread,
        blondel_mm: blondel,
        blondel_ok: (targets.blondel_min_mm..=targets.blondel_max_mm).contains(&blondel),
    }
}

/// Calculate a straight stair.
pub fn calculate(
    input: &StairsInput,
    material: Material,
    settings: &FabricationSettings,
) -> CalcResult<CalculationResult> {
    settings.validate()?;
    if let Some(empty) = precheck("stairs", input.validate())? {
        return Ok(empty);
    }

    let h = input.height_mm;
    let b = input.base_mm;
    let w = input.width_mm;
    let t = input.thickness_mm;

    let steps = layout(input, settings);
    let incline = h.atan2(b).to_degrees();
    let stringer = h.hypot(b);
    let total_stringer = 2.0 * stringer;
    let total_tread_length = steps.steps as f64 * w;

    let stringer_area = stringer * STRINGER_DEPTH_MM * 2.0;
    let step_area = steps.steps as f64 * w * (steps.tread_mm + steps.rise_mm);
    let area_mm2 = stringer_area + step_area;
    let area: SquareMeters = SquareMillimeters(area_mm2).into();
    let volume: Liters = CubicMillimeters(area_mm2 * t).into();

    let weight = if t > 0.0 {
        CubicMillimeters(area_mm2 * t).mass(material.density_kg_dm3()).0
    } else {
        total_stringer / 1000.0 * STRINGER_KG_PER_M
            + total_tread_length / 1000.0 * steps.tread_mm / 1000.0 * TREAD_KG_PER_M2
    };

    let blondel_status = if steps.blondel_ok {
        "Ideal".to_string()
    } else {
        format!(
            "Outside ideal ({}-{})",
            settings.stairs.blondel_min_mm, settings.stairs.blondel_max_mm
        )
    };

    debug!(steps = steps.steps, rise = steps.rise_mm, blondel = steps.blondel_mm, "stairs calculated");

    let mut result = CalculationResult::new();
    result
        .metric("Total height", format!("{} mm", h))
        .metric("Total base", format!("{} mm", b))
        .metric("Number of steps", steps.steps.to_string())
        .metric("Rise", format!("{:.1} mm", steps.rise_mm))
        .metric("Tread", format!("{:.1} mm", steps.tread_mm))
        .metric("Blondel (2R+T)", format!("{:.1} mm ({})", steps.blondel_mm, blondel_status))
        .metric("Incline", format!("{:.1}°", incline))
        .metric("Stringers total length", format!("{:.2} m", total_stringer / 1000.0))
        .metric("Treads total length", format!("{:.2} m", total_tread_length / 1000.0))
        .metric("Estimated weight", format!("{:.2} kg", weight));

    result
        .step(format!(
            "1. SITE MEASUREMENTS:\n   - Total height (floor to floor): {} mm.\n   - Available run (base): {} mm.\n   - Check that the lower floor and the upper slab are level.",
            h, b
        ))
        .step(format!(
            "2. LAYOUT CHECK:\n   - The stair has {} steps.\n   - Rise (step height): {:.1} mm.\n   - Tread (step depth): {:.1} mm.\n   - Blondel rule (2R + T): {:.1} mm (ideal {}-{} mm).",
            steps.steps,
            steps.rise_mm,
            steps.tread_mm,
            steps.blondel_mm,
            settings.stairs.blondel_min_mm,
            settings.stairs.blondel_max_mm
        ))
        .step(format!(
            "3. CUTTING THE STRINGERS:\n   - Material: channel or I-beam, {:.1} mm long.\n   - Cut the ends at {:.1}° so the stringer bears fully on the floor and on the slab.\n   - Cut both stringers together (mirrored) to keep them identical.",
            stringer, incline
        ))
        .step(format!(
            "4. MARKING THE STEPS:\n   - Use a framing square or a template.\n   - Mark the rise ({:.1}) and the tread ({:.1}) repeatedly along the stringer.\n   - Use a spirit level so the treads end up horizontal once the stair is inclined.",
            steps.rise_mm, steps.tread_mm
        ))
        .step("5. ASSEMBLY AND INSTALLATION:\n   - Fix the tread brackets or weld the treads directly to the stringers.\n   - Set the stair in place. Fix the top (slab) first and check level before fixing the base.\n   - Install the handrail at 900 mm height.");

    result
        .set("height_mm", h)
        .set("base_mm", b)
        .set("steps", steps.steps)
        .set("rise_mm", steps.rise_mm)
        .set("tread_mm", steps.tread_mm)
        .set("blondel_mm", steps.blondel_mm)
        .set("blondel_ok", steps.blondel_ok)
        .set("angle_deg", incline)
        .set("stringer_length_mm", stringer)
        .set("total_stringer_length_mm", total_stringer)
        .set("total_tread_length_mm", total_tread_length)
        .set("total_area_m2", area.0)
        .set("volume_l", volume.0)
        .set("weight_kg", weight);

    Ok(result)
}
