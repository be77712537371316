//! # Flat Plate Weight
//!
//! Unit and batch weight of rectangular plates.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::result::{precheck, CalculationResult};
use crate::errors::{require_positive, CalcError, CalcResult};
use crate::materials::Material;
use crate::units::{CubicMillimeters, Liters, SquareMeters, SquareMillimeters};

/// Input parameters for a batch of plates.
///
/// ## JSON Example
///
/// ```json
/// { "width_mm": 1000.0, "length_mm": 2000.0, "thickness_mm": 6.35, "quantity": 5 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlateInput {
    pub width_mm: f64,
    pub length_mm: f64,
    pub thickness_mm: f64,
    /// Number of identical pieces
    pub quantity: i64,
}

impl Default for PlateInput {
    fn default() -> Self {
        PlateInput {
            width_mm: 0.0,
            length_mm: 0.0,
            thickness_mm: 0.0,
            quantity: 1,
        }
    }
}

impl PlateInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("width_mm", self.width_mm)?;
        require_positive("length_mm", self.length_mm)?;
        require_positive("thickness_mm", self.thickness_mm)?;
        if self.quantity <= 0 {
            return Err(CalcError::insufficient_input("quantity", "at least one piece is needed"));
        }
        Ok(())
    }
}

/// Calculate plate weights.
pub fn calculate(input: &PlateInput, material: Material) -> CalcResult<CalculationResult> {
    if let Some(empty) = precheck("plate", input.validate())? {
        return Ok(empty);
    }

    let w = input.width_mm;
    let l = input.length_mm;
    let t = input.thickness_mm;
    let qty = input.quantity as f64;
    let density = material.density_kg_dm3();

    let volume_mm3 = CubicMillimeters(w * l * t);
    let volume: Liters = volume_mm3.into();
    let unit_weight = volume_mm3.mass(density);
    let total_weight = unit_weight * qty;
    let area: SquareMeters = SquareMillimeters(w * l).into();
    let total_area = area * qty;

    debug!(unit_weight = unit_weight.0, quantity = input.quantity, "plate calculated");

    let mut result = CalculationResult::new();
    result
        .metric("Unit weight", format!("{:.2} kg", unit_weight.0))
        .metric("Total weight", format!("{:.2} kg", total_weight.0))
        .metric("Quantity", format!("{} pcs", input.quantity))
        .metric("Unit area", format!("{:.2} m²", area.0))
        .metric("Total area", format!("{:.2} m²", total_area.0))
        .metric("Unit volume", format!("{:.4} dm³", volume.0));

    result
        .step(format!(
            "1. MATERIAL:\n   - Dimensions: {} mm (width) x {} mm (length) x {} mm (thickness).\n   - Quantity: {} pieces.\n   - Material: {}.",
            w,
            l,
            t,
            input.quantity,
            material.display_name()
        ))
        .step(format!(
            "2. VOLUME:\n   - Unit volume = width x length x thickness.\n   - V = {} x {} x {} = {:.0} mm³ ({:.4} dm³).",
            w, l, t, volume_mm3.0, volume.0
        ))
        .step(format!(
            "3. WEIGHT:\n   - Density: {} kg/dm³.\n   - Unit weight = volume (dm³) x density.\n   - W = {:.4} x {} = {:.2} kg.",
            density, volume.0, density, unit_weight.0
        ))
        .step(format!(
            "4. TOTALS:\n   - Batch weight: {} x {:.2} = {:.2} kg.\n   - Total painting/surface area: {:.2} m².",
            input.quantity, unit_weight.0, total_weight.0, total_area.0
        ))
        .step("5. PURCHASING:\n   - Allow a margin for cutting losses (offcuts) when cutting from a larger sheet.");

    result
        .set("width_mm", w)
        .set("length_mm", l)
        .set("thickness_mm", t)
        .set("quantity", input.quantity as usize)
        .set("weight_kg", unit_weight.0)
        .set("total_weight_kg", total_weight.0)
        .set("area_m2", area.0)
        .set("total_area_m2", total_area.0)
        .set("volume_l", volume.0);

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet() -> PlateInput {
        PlateInput {
            width_mm: 1000.0,
            length_mm: 2000.0,
            thickness_mm: 5.0,
            quantity: 3,
        }
    }

    #[test]
    fn test_weights() {
        let r = calculate(&sheet(), Material::Steel).unwrap();
        // 10 dm³ of steel
        assert!((r.number("weight_kg").unwrap() - 78.5).abs() < 1e-9);
        assert!((r.number("total_weight_kg").unwrap() - 235.5).abs() < 1e-9);
        assert!((r.number("total_area_m2").unwrap() - 6.0).abs() < 1e-12);
        assert_eq!(r.metric_value("Quantity"), Some("3 pcs"));
    }

    #[test]
    fn test_quantity_defaults_to_one() {
        let input: PlateInput =
            serde_json::from_str(r#"{ "width_mm": 1000, "length_mm": 1000, "thickness_mm": 1 }"#).unwrap();
        assert_eq!(input.quantity, 1);
        let r = calculate(&input, Material::Aluminum).unwrap();
        assert!((r.number("total_weight_kg").unwrap() - 2.7).abs() < 1e-12);
    }

    #[test]
    fn test_missing_dimension_is_empty() {
        let input = PlateInput { thickness_mm: 0.0, ..sheet() };
        assert!(calculate(&input, Material::Steel).unwrap().is_empty());
        let input = PlateInput { quantity: 0, ..sheet() };
        assert!(calculate(&input, Material::Steel).unwrap().is_empty());
    }

    #[test]
    fn test_negative_quantity_is_empty() {
        let input: PlateInput = serde_json::from_str(
            r#"{ "width_mm": 1000, "length_mm": 2000, "thickness_mm": 5, "quantity": -2 }"#,
        )
        .unwrap();
        assert_eq!(input.quantity, -2);
        assert!(calculate(&input, Material::Steel).unwrap().is_empty());
    }
}
