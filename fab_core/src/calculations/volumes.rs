//! # Solid Volumes
//!
//! Closed-form capacity and total surface area of common solids, with the
//! working shown step by step.
//!
//! | Solid | Volume | Surface |
//! |-------|--------|---------|
//! | Cylinder | πr²h | 2πr(r + h) |
//! | Box | l·w·h | 2(lw + lh + wh) |
//! | Sphere | 4/3·πr³ | 4πr² |
//! | Cone | πr²h/3 | πr(r + g) |
//! | Pyramid | l·w·h/3 | lw + w·g₁ + l·g₂ |

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::result::{precheck, CalculationResult};
use crate::errors::{require_positive, CalcResult};
use crate::units::{CubicMillimeters, Liters, SquareMeters, SquareMillimeters};

/// Solid family. A request without `sub_shape` measures a cylinder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Solid {
    #[default]
    Cylinder,
    Box,
    Sphere,
    Cone,
    Pyramid,
}

impl Solid {
    pub fn id(&self) -> &'static str {
        match self {
            Solid::Cylinder => "cylinder",
            Solid::Box => "box",
            Solid::Sphere => "sphere",
            Solid::Cone => "cone",
            Solid::Pyramid => "pyramid",
        }
    }
}

/// The solid to measure. Only the dimensions of `sub_shape` are read.
///
/// ## JSON Example
///
/// ```json
/// { "sub_shape": "box", "width_mm": 500.0, "length_mm": 800.0, "height_mm": 400.0 }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolumesInput {
    pub sub_shape: Solid,
    /// Cylinder, sphere and cone (mm)
    pub diameter_mm: f64,
    /// Box and pyramid (mm)
    pub width_mm: f64,
    /// Box and pyramid (mm)
    pub length_mm: f64,
    /// Everything but the sphere (mm)
    pub height_mm: f64,
}

impl VolumesInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        match self.sub_shape {
            Solid::Cylinder | Solid::Cone => {
                require_positive("diameter_mm", self.diameter_mm)?;
                require_positive("height_mm", self.height_mm)?;
            }
            Solid::Box | Solid::Pyramid => {
                require_positive("width_mm", self.width_mm)?;
                require_positive("length_mm", self.length_mm)?;
                require_positive("height_mm", self.height_mm)?;
            }
            Solid::Sphere => {
                require_positive("diameter_mm", self.diameter_mm)?;
            }
        }
        Ok(())
    }

    pub fn name(&self) -> &'static str {
        self.sub_shape.id()
    }
}

/// Volume (mm³), total surface (mm²) and the worked steps
fn solve(input: &VolumesInput) -> (f64, f64, Vec<String>) {
    let VolumesInput { sub_shape, diameter_mm, width_mm, length_mm, height_mm } = *input;
    match sub_shape {
        Solid::Cylinder => {
            let r = diameter_mm / 2.0;
            let base = PI * r * r;
            let volume = base * height_mm;
            let area = 2.0 * PI * r * (r + height_mm);
            let steps = vec![
                format!("1. GEOMETRY (CYLINDER):\n   - Right circular prism.\n   - Base: circle of radius r = {} mm.\n   - Height: h = {} mm.", r, height_mm),
                format!("2. BASE AREA:\n   - A_base = π · r²\n   - A_base = 3.1416 · {}² = {:.0} mm².", r, base),
                format!("3. VOLUME:\n   - V = A_base · h\n   - V = {:.0} · {} = {:.0} mm³.", base, height_mm, volume),
                format!("4. SURFACE AREA:\n   - Lateral area = 2 · π · r · h\n   - Total area = 2 · A_base + lateral = {:.0} mm².", area),
                format!("5. CONVERSION TO LITRES:\n   - 1 litre = 1,000,000 mm³ (1 dm³).\n   - V = {:.0} / 1,000,000 = {:.2} L.", volume, volume / 1e6),
            ];
            (volume, area, steps)
        }
        Solid::Cone => {
            let r = diameter_mm / 2.0;
            let volume = PI * r * r * height_mm / 3.0;
            let slant = r.hypot(height_mm);
            let area = PI * r * (r + slant);
            let steps = vec![
                format!("1. GEOMETRY (CONE):\n   - Solid of revolution with a circular base and an apex.\n   - Base radius (r): {} mm.\n   - Height (h): {} mm.", r, height_mm),
                format!("2. SLANT HEIGHT (g):\n   - Hypotenuse of the right triangle formed by r and h.\n   - g = √(r² + h²) = {:.1} mm.", slant),
                format!("3. VOLUME:\n   - A cone holds 1/3 of the cylinder with the same base and height.\n   - V = (π · r² · h) / 3 = {:.0} mm³.", volume),
                format!("4. SURFACE AREA:\n   - Lateral area = π · r · g\n   - Total area = base + lateral = {:.0} mm².", area),
                format!("5. CONVERSION:\n   - Capacity: {:.2} L.", volume / 1e6),
            ];
            (volume, area, steps)
        }
        Solid::Box => {
            let volume = width_mm * length_mm * height_mm;
            let area = 2.0 * (length_mm * width_mm + length_mm * height_mm + width_mm * height_mm);
            let steps = vec![
                format!("1. GEOMETRY (RECTANGULAR PRISM):\n   - Box with right-angled faces.\n   - Dimensions: length {} mm, width {} mm, height {} mm.", length_mm, width_mm, height_mm),
                format!("2. VOLUME:\n   - Product of the three dimensions.\n   - V = L · W · H = {:.0} mm³.", volume),
                format!("3. SURFACE AREA:\n   - Sum of the 6 faces (3 pairs of equal faces).\n   - A = 2(LW) + 2(LH) + 2(WH) = {:.0} mm².", area),
                format!("4. CONVERSION:\n   - Capacity: {:.2} L.", volume / 1e6),
            ];
            (volume, area, steps)
        }
        Solid::Pyramid => {
            let volume = width_mm * length_mm * height_mm / 3.0;
            let slant_w = height_mm.hypot(length_mm / 2.0);
            let slant_l = height_mm.hypot(width_mm / 2.0);
            let lateral = width_mm * slant_w + length_mm * slant_l;
            let area = width_mm * length_mm + lateral;
            let steps = vec![
                format!("1. GEOMETRY (RECTANGULAR PYRAMID):\n   - Rectangular base and a central apex.\n   - Base: {} x {} mm. Height: {} mm.", length_mm, width_mm, height_mm),
                format!("2. VOLUME:\n   - Like the cone, 1/3 of the matching prism.\n   - V = (base · height) / 3 = {:.0} mm³.", volume),
                format!("3. LATERAL AREA:\n   - Sum of the 4 triangular faces, using the slant heights of each face.\n   - Lateral area = {:.0} mm².", lateral),
                format!("4. CONVERSION:\n   - Capacity: {:.2} L.", volume / 1e6),
            ];
            (volume, area, steps)
        }
        Solid::Sphere => {
            let r = diameter_mm / 2.0;
            let volume = 4.0 / 3.0 * PI * r.powi(3);
            let area = 4.0 * PI * r * r;
            let steps = vec![
                format!("1. GEOMETRY (SPHERE):\n   - Perfectly round solid.\n   - Diameter: {} mm (radius r = {} mm).", diameter_mm, r),
                format!("2. VOLUME:\n   - V = 4/3 · π · r³\n   - V = 1.333 · 3.1416 · {:.0} = {:.0} mm³.", r.powi(3), volume),
                format!("3. SURFACE AREA:\n   - A = 4 · π · r²\n   - A = 4 · 3.1416 · {:.0} = {:.0} mm².", r * r, area),
                format!("4. CONVERSION:\n   - Capacity: {:.2} L.", volume / 1e6),
            ];
            (volume, area, steps)
        }
    }
}

/// Calculate the volume and surface of a solid.
pub fn calculate(input: &VolumesInput) -> CalcResult<CalculationResult> {
    if let Some(empty) = precheck("volumes", input.validate())? {
        return Ok(empty);
    }

    let (volume_mm3, area_mm2, steps) = solve(input);
    let volume: Liters = CubicMillimeters(volume_mm3).into();
    let area: SquareMeters = SquareMillimeters(area_mm2).into();

    debug!(solid = input.name(), volume_mm3, area_mm2, "volume calculated");

    let mut result = CalculationResult::new();
    result
        .metric("Volume (litres)", format!("{:.2} L", volume.0))
        .metric("Volume (m³)", format!("{:.4} m³", volume.0 / 1000.0))
        .metric("Surface area", format!("{:.2} m²", area.0));

    for step in steps {
        result.step(step);
    }

    result
        .set("sub_shape", input.name())
        .set("volume_mm3", volume_mm3)
        .set("area_mm2", area_mm2)
        .set("volume_l", volume.0)
        .set("area_m2", area.0);

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(sub_shape: Solid, diameter_mm: f64, width_mm: f64, length_mm: f64, height_mm: f64) -> VolumesInput {
        VolumesInput { sub_shape, diameter_mm, width_mm, length_mm, height_mm }
    }

    fn volume_of(input: VolumesInput) -> (f64, f64) {
        let r = calculate(&input).unwrap();
        (r.number("volume_mm3").unwrap(), r.number("area_mm2").unwrap())
    }

    #[test]
    fn test_cylinder() {
        let (v, a) = volume_of(solid(Solid::Cylinder, 200.0, 0.0, 0.0, 500.0));
        assert!((v - PI * 100.0 * 100.0 * 500.0).abs() < 1e-6);
        assert!((a - 2.0 * PI * 100.0 * 600.0).abs() < 1e-6);
    }

    #[test]
    fn test_box() {
        let (v, a) = volume_of(solid(Solid::Box, 0.0, 500.0, 800.0, 400.0));
        assert_eq!(v, 160_000_000.0);
        assert_eq!(a, 2.0 * (400_000.0 + 320_000.0 + 200_000.0));
    }

    #[test]
    fn test_sphere() {
        let (v, a) = volume_of(solid(Solid::Sphere, 300.0, 0.0, 0.0, 0.0));
        assert!((v - 4.0 / 3.0 * PI * 150.0f64.powi(3)).abs() < 1e-3);
        assert!((a - 4.0 * PI * 150.0 * 150.0).abs() < 1e-6);
    }

    #[test]
    fn test_cone() {
        let (v, a) = volume_of(solid(Solid::Cone, 600.0, 0.0, 0.0, 400.0));
        assert!((v - PI * 300.0 * 300.0 * 400.0 / 3.0).abs() < 1e-3);
        // slant = 500
        assert!((a - PI * 300.0 * 800.0).abs() < 1e-6);
    }

    #[test]
    fn test_pyramid() {
        let (v, a) = volume_of(solid(Solid::Pyramid, 0.0, 600.0, 800.0, 300.0));
        assert_eq!(v, 48_000_000.0);
        let lateral = 600.0 * 300.0f64.hypot(400.0) + 800.0 * 300.0f64.hypot(300.0);
        assert!((a - (480_000.0 + lateral)).abs() < 1e-6);
    }

    #[test]
    fn test_sub_shape_tag() {
        let input: VolumesInput = serde_json::from_str(r#"{ "sub_shape": "sphere", "diameter_mm": 100 }"#).unwrap();
        assert_eq!(input, solid(Solid::Sphere, 100.0, 0.0, 0.0, 0.0));
        let r = calculate(&input).unwrap();
        assert_eq!(r.text("sub_shape"), Some("sphere"));
    }

    #[test]
    fn test_missing_sub_shape_is_cylinder() {
        let input: VolumesInput = serde_json::from_str(r#"{ "diameter_mm": 100, "height_mm": 100 }"#).unwrap();
        assert_eq!(input.sub_shape, Solid::Cylinder);
        let r = calculate(&input).unwrap();
        assert_eq!(r.text("sub_shape"), Some("cylinder"));
        assert!((r.number("volume_mm3").unwrap() - PI * 50.0 * 50.0 * 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_other_solids_dimensions_ignored() {
        // a box only reads width, length and height
        let r = calculate(&solid(Solid::Box, 999.0, 0.0, 800.0, 400.0)).unwrap();
        assert!(r.is_empty());
    }

    #[test]
    fn test_missing_dimension_is_empty() {
        assert!(calculate(&solid(Solid::Sphere, 0.0, 0.0, 0.0, 0.0)).unwrap().is_empty());
        assert!(calculate(&VolumesInput::default()).unwrap().is_empty());
    }
}
