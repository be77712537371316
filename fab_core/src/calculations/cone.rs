//! # Cone / Frustum Development
//!
//! Develops a conical frustum (reducer, hopper, funnel) into the annular
//! sector that is cut from flat plate.
//!
//! ## Method
//!
//! With base radius `R`, top radius `r` and vertical height `H`:
//!
//! ```text
//! g      = √(H² + (R - r)²)          slant height (generatrix)
//! R_dev  = R·g / (R - r)             similar triangles to the apex
//! r_dev  = R_dev - g
//! θ      = 360·R / R_dev             sweep of the sector (degrees)
//! ```
//!
//! When `R ≈ r` the apex is at infinity and the sector degenerates into the
//! rectangle of a cylinder. That case is flagged (`degenerate = true`) with a
//! zero development instead of dividing by a near-zero difference.
//!
//! ## Example
//!
//! ```rust
//! use fab_core::calculations::cone::{calculate, ConeInput};
//! use fab_core::materials::Material;
//!
//! let input = ConeInput { d1_mm: 1000.0, d2_mm: 500.0, height_mm: 600.0, thickness_mm: 4.0 };
//! let result = calculate(&input, Material::Steel).unwrap();
//! assert_eq!(result.flag("degenerate"), Some(false));
//! ```

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::result::{precheck, CalculationResult};
use crate::errors::{require_non_negative, require_positive, CalcResult};
use crate::geometry::{chord_for_angle, sagitta_for_angle};
use crate::materials::Material;
use crate::units::{CubicMillimeters, Liters, SquareMeters, SquareMillimeters};

/// Radius difference (mm) below which the frustum is treated as a cylinder
pub const DEGENERATE_RADIUS_DIFF_MM: f64 = 0.01;

/// Input parameters for a cone or frustum.
///
/// The larger diameter is always used as the base, whichever field it is in.
/// `d2_mm = 0` describes a full (pointed) cone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConeInput {
    /// Larger (base) diameter (mm)
    pub d1_mm: f64,
    /// Smaller (top) diameter (mm)
    pub d2_mm: f64,
    /// Vertical height between the two circles (mm)
    pub height_mm: f64,
    /// Plate thickness (mm)
    pub thickness_mm: f64,
}

impl ConeInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_non_negative("d1_mm", self.d1_mm)?;
        require_non_negative("d2_mm", self.d2_mm)?;
        require_positive("d1_mm", self.d1_mm.max(self.d2_mm))?;
        require_positive("height_mm", self.height_mm)?;
        require_non_negative("thickness_mm", self.thickness_mm)?;
        Ok(())
    }

    /// (R, r): base and top radii, larger first
    pub fn radii(&self) -> (f64, f64) {
        let a = self.d1_mm / 2.0;
        let b = self.d2_mm / 2.0;
        (a.max(b), a.min(b))
    }

    /// Slant height g
    pub fn slant_height_mm(&self) -> f64 {
        let (big, small) = self.radii();
        self.height_mm.hypot(big - small)
    }
}

/// The annular sector cut from plate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConeDevelopment {
    /// Outer development radius R_dev (mm)
    pub outer_radius_mm: f64,
    /// Inner development radius r_dev (mm)
    pub inner_radius_mm: f64,
    /// Sweep angle θ (degrees)
    pub sweep_deg: f64,
}

impl ConeDevelopment {
    /// Develop a frustum; `None` when R ≈ r (no finite apex).
    pub fn from_radii(big: f64, small: f64, slant: f64) -> Option<Self> {
        let diff = big - small;
        if diff.abs() < DEGENERATE_RADIUS_DIFF_MM {
            return None;
        }
        let outer = big * slant / diff;
        Some(ConeDevelopment {
            outer_radius_mm: outer,
            inner_radius_mm: outer - slant,
            sweep_deg: 360.0 * big / outer,
        })
    }

    pub fn outer_chord_mm(&self) -> f64 {
        chord_for_angle(self.outer_radius_mm, self.sweep_deg)
    }

    pub fn inner_chord_mm(&self) -> f64 {
        chord_for_angle(self.inner_radius_mm, self.sweep_deg)
    }

    pub fn outer_sagitta_mm(&self) -> f64 {
        sagitta_for_angle(self.outer_radius_mm, self.sweep_deg)
    }

    pub fn inner_sagitta_mm(&self) -> f64 {
        sagitta_for_angle(self.inner_radius_mm, self.sweep_deg)
    }
}

/// Calculate the development of a cone/frustum.
pub fn calculate(input: &ConeInput, material: Material) -> CalcResult<CalculationResult> {
    if let Some(empty) = precheck("cone", input.validate())? {
        return Ok(empty);
    }

    let (big, small) = input.radii();
    let h = input.height_mm;
    let t = input.thickness_mm;
    let g = input.slant_height_mm();
    let density = material.density_kg_dm3();

    let lateral_mm2 = PI * (big + small) * g;
    let lateral: SquareMeters = SquareMillimeters(lateral_mm2).into();
    let mass = CubicMillimeters(lateral_mm2 * t).mass(density);
    let volume: Liters =
        CubicMillimeters(PI * h / 3.0 * (big * big + small * small + big * small)).into();

    let development = ConeDevelopment::from_radii(big, small, g);

    let mut result = CalculationResult::new();
    result.metric("Slant height (g)", format!("{:.2} mm", g));

    match development {
        Some(dev) => {
            debug!(
                outer = dev.outer_radius_mm,
                inner = dev.inner_radius_mm,
                sweep = dev.sweep_deg,
                "cone developed"
            );
            result
                .metric("Outer radius (R)", format!("{:.2} mm", dev.outer_radius_mm))
                .metric("Inner radius (r)", format!("{:.2} mm", dev.inner_radius_mm))
                .metric("Sweep angle", format!("{:.2}°", dev.sweep_deg))
                .metric("Outer chord", format!("{:.1} mm", dev.outer_chord_mm()))
                .metric("Outer sagitta", format!("{:.1} mm", dev.outer_sagitta_mm()));
        }
        None => {
            warn!(big, small, "cone diameters are equal, development degenerates to a cylinder");
            result.metric(
                "Warning",
                "Diameters are equal: the part is a cylinder and has no conical development. Use the cylinder calculator.",
            );
        }
    }

    result
        .metric("Lateral area", format!("{:.2} m²", lateral.0))
        .metric("Internal volume", format!("{:.2} L", volume.0))
        .metric("Estimated weight", format!("{:.2} kg", mass.0));

    let dev = development.unwrap_or(ConeDevelopment {
        outer_radius_mm: 0.0,
        inner_radius_mm: 0.0,
        sweep_deg: 0.0,
    });

    if development.is_none() {
        result.step(format!(
            "DEVELOP AS A CYLINDER: a {:.1} x {} mm blank rolled to Ø{} mm replaces the conical layout.",
            PI * (2.0 * big + t),
            h,
            2.0 * big
        ));
    } else {
        result
            .step(format!(
                "1. PREPARATION AND LAYOUT:\n   - Material: {} plate, {} mm thick.\n   - Mark a centre point \"O\" near the plate edge to save material.\n   - From \"O\", scribe two arcs:\n     • Outer arc, radius {:.1} mm\n     • Inner arc, radius {:.1} mm",
                material.display_name(),
                t,
                dev.outer_radius_mm,
                dev.inner_radius_mm
            ))
            .step(format!(
                "2. SWEEP ANGLE (BY CHORD):\n   - The sector opens {:.1}°.\n   - Without a protractor, step off the chord on the outer arc: C = 2 x {:.1} x sin({:.1}° / 2) = {:.1} mm.\n   - Check: the arc rise over that chord is {:.1} mm.",
                dev.sweep_deg,
                dev.outer_radius_mm,
                dev.sweep_deg,
                dev.outer_chord_mm(),
                dev.outer_sagitta_mm()
            ))
            .step("3. CUTTING:\n   - Cut along both arcs and the two radial lines that converge on the centre.\n   - TIP: leave 10-20 mm extra on one straight edge if you need overlap or fit-up allowance.")
            .step("4. ROLLING (TAPER):\n   - The small-radius side must travel slower than the large side.\n   - On parallel rolls, brake the small end slightly or use an inclined stop.\n   - Check the curvature often with templates of both radii.")
            .step(format!(
                "5. CLOSING:\n   - Bring the straight edges together and check the vertical height is {} mm.\n   - Tack, check the base is square on a flat surface, then weld.",
                h
            ));
    }

    result
        .set("slant_height_mm", g)
        .set("outer_radius_mm", dev.outer_radius_mm)
        .set("inner_radius_mm", dev.inner_radius_mm)
        .set("sweep_deg", dev.sweep_deg)
        .set("outer_chord_mm", dev.outer_chord_mm())
        .set("inner_chord_mm", dev.inner_chord_mm())
        .set("outer_sagitta_mm", dev.outer_sagitta_mm())
        .set("inner_sagitta_mm", dev.inner_sagitta_mm())
        .set("lateral_area_m2", lateral.0)
        .set("internal_volume_l", volume.0)
        .set("weight_kg", mass.0)
        .set("degenerate", development.is_none());

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reducer() -> ConeInput {
        ConeInput {
            d1_mm: 1000.0,
            d2_mm: 500.0,
            height_mm: 600.0,
            thickness_mm: 4.0,
        }
    }

    #[test]
    fn test_similar_triangle_development() {
        let r = calculate(&reducer(), Material::Steel).unwrap();
        // g = √(600² + 250²) = 650
        assert!((r.number("slant_height_mm").unwrap() - 650.0).abs() < 1e-9);
        // R_dev = 500 * 650 / 250 = 1300, r_dev = 650
        assert!((r.number("outer_radius_mm").unwrap() - 1300.0).abs() < 1e-9);
        assert!((r.number("inner_radius_mm").unwrap() - 650.0).abs() < 1e-9);
        // θ = 360 * 500 / 1300
        assert!((r.number("sweep_deg").unwrap() - 138.461_538).abs() < 1e-5);
    }

    #[test]
    fn test_development_arc_matches_base_circumference() {
        let dev = ConeDevelopment::from_radii(500.0, 250.0, 650.0).unwrap();
        let outer_arc = dev.outer_radius_mm * dev.sweep_deg.to_radians();
        assert!((outer_arc - PI * 1000.0).abs() < 1e-6);
        let inner_arc = dev.inner_radius_mm * dev.sweep_deg.to_radians();
        assert!((inner_arc - PI * 500.0).abs() < 1e-6);
    }

    #[test]
    fn test_area_and_volume() {
        let r = calculate(&reducer(), Material::Steel).unwrap();
        let area = PI * 750.0 * 650.0 / 1e6;
        assert!((r.number("lateral_area_m2").unwrap() - area).abs() < 1e-9);
        let vol = PI * 600.0 / 3.0 * (500.0f64.powi(2) + 250.0f64.powi(2) + 500.0 * 250.0) / 1e6;
        assert!((r.number("internal_volume_l").unwrap() - vol).abs() < 1e-9);
    }

    #[test]
    fn test_equal_diameters_are_flagged_degenerate() {
        let input = ConeInput {
            d1_mm: 800.0,
            d2_mm: 800.0,
            height_mm: 500.0,
            thickness_mm: 3.0,
        };
        let r = calculate(&input, Material::Steel).unwrap();
        assert_eq!(r.flag("degenerate"), Some(true));
        assert_eq!(r.number("outer_radius_mm"), Some(0.0));
        assert!(r.metric_value("Warning").is_some());
        assert!(r.calculated.values().all(|v| match v {
            crate::calculations::result::CalculatedValue::Number(n) => n.is_finite(),
            _ => true,
        }));
    }

    #[test]
    fn test_nearly_equal_diameters_still_develop() {
        let input = ConeInput {
            d1_mm: 800.0,
            d2_mm: 799.0,
            height_mm: 500.0,
            thickness_mm: 3.0,
        };
        let r = calculate(&input, Material::Steel).unwrap();
        assert_eq!(r.flag("degenerate"), Some(false));
        // Radius grows without bound as D1 approaches D2
        assert!(r.number("outer_radius_mm").unwrap() > 100_000.0);
    }

    #[test]
    fn test_swapped_diameters_give_same_development() {
        let mut swapped = reducer();
        std::mem::swap(&mut swapped.d1_mm, &mut swapped.d2_mm);
        let a = calculate(&reducer(), Material::Steel).unwrap();
        let b = calculate(&swapped, Material::Steel).unwrap();
        assert_eq!(a.number("outer_radius_mm"), b.number("outer_radius_mm"));
    }

    #[test]
    fn test_full_cone() {
        let input = ConeInput {
            d1_mm: 600.0,
            d2_mm: 0.0,
            height_mm: 400.0,
            thickness_mm: 2.0,
        };
        let r = calculate(&input, Material::Steel).unwrap();
        // Apex at the top: R_dev = g = 500, r_dev = 0
        assert!((r.number("outer_radius_mm").unwrap() - 500.0).abs() < 1e-9);
        assert!(r.number("inner_radius_mm").unwrap().abs() < 1e-9);
        assert!((r.number("sweep_deg").unwrap() - 216.0).abs() < 1e-9);
        // Major arc: rise exceeds the radius
        assert!(r.number("outer_sagitta_mm").unwrap() > 500.0);
    }

    #[test]
    fn test_missing_height_is_empty() {
        let mut input = reducer();
        input.height_mm = 0.0;
        assert!(calculate(&input, Material::Steel).unwrap().is_empty());
    }
}
