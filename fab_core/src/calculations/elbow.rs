//! # Segmented (Mitred) Elbow
//!
//! Cuts a pipe bend into `N` mitred segments ("gores").
//!
//! ## Method
//!
//! With `N` segments there are `N - 1` welded joints. Each joint turns the
//! pipe by `α / (N - 1)`, so each cut face is inclined at the half-angle
//!
//! ```text
//! β = α / (2(N - 1))
//! ```
//!
//! A full interior segment spans `2β`. Its developed length is
//!
//! ```text
//! back  (extrados) = 2(R + D/2)·tan β
//! belly (intrados) = 2(R - D/2)·tan β
//! ```
//!
//! and the two end segments are half of that. Wrapped around the pipe, the
//! cut line is the fish-mouth curve `h(φ) = belly + (back - belly)(1 - cos φ)/2`
//! with φ measured from the belly.
//!
//! Lengths, area, mass and volume use the bend's centreline arc `πRα/180`.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::result::{precheck, CalculationResult, CurvePoint};
use crate::errors::{require_non_negative, require_positive, CalcError, CalcResult};
use crate::materials::Material;
use crate::settings::FabricationSettings;
use crate::units::{CubicMillimeters, Liters, SquareMeters, SquareMillimeters};

/// Input parameters for a segmented elbow.
///
/// ## JSON Example
///
/// ```json
/// { "diameter_mm": 300.0, "bend_radius_mm": 450.0, "angle_deg": 90.0, "segments": 4, "thickness_mm": 4.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElbowInput {
    /// Pipe outside diameter (mm)
    pub diameter_mm: f64,
    /// Centreline bend radius (mm)
    pub bend_radius_mm: f64,
    /// Total bend angle (degrees)
    pub angle_deg: f64,
    /// Number of segments, ends included
    pub segments: i64,
    /// Wall thickness (mm)
    pub thickness_mm: f64,
}

impl Default for ElbowInput {
    fn default() -> Self {
        ElbowInput {
            diameter_mm: 0.0,
            bend_radius_mm: 0.0,
            angle_deg: 90.0,
            segments: 3,
            thickness_mm: 0.0,
        }
    }
}

impl ElbowInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("diameter_mm", self.diameter_mm)?;
        require_positive("bend_radius_mm", self.bend_radius_mm)?;
        require_positive("angle_deg", self.angle_deg)?;
        require_non_negative("thickness_mm", self.thickness_mm)?;
        if self.segments < 0 {
            return Err(CalcError::insufficient_input("segments", "cannot be negative"));
        }

        if self.segments < 2 {
            return Err(CalcError::invalid_input(
                "segments",
                self.segments.to_string(),
                "A bend needs at least 2 segments to have a joint",
            ));
        }
        if self.angle_deg > 360.0 {
            return Err(CalcError::invalid_input(
                "angle_deg",
                self.angle_deg.to_string(),
                "Bend angle cannot exceed 360°",
            ));
        }
        if self.bend_radius_mm < self.diameter_mm / 2.0 {
            return Err(CalcError::impossible_geometry(
                "elbow",
                format!(
                    "bend radius {} mm is smaller than the pipe radius {} mm; the belly would be negative",
                    self.bend_radius_mm,
                    self.diameter_mm / 2.0
                ),
            ));
        }
        if self.cut_angle_deg() >= 90.0 {
            return Err(CalcError::impossible_geometry(
                "elbow",
                "cut angle reaches 90°; add more segments",
            ));
        }
        Ok(())
    }

    /// Number of welded joints (N - 1)
    pub fn joints(&self) -> u32 {
        u32::try_from(self.segments - 1).unwrap_or(0)
    }

    /// Turn per joint α / (N - 1)
    pub fn joint_angle_deg(&self) -> f64 {
        self.angle_deg / self.joints().max(1) as f64
    }

    /// Cut half-angle β = α / (2(N - 1))
    pub fn cut_angle_deg(&self) -> f64 {
        self.joint_angle_deg() / 2.0
    }
}

/// Developed lengths of one segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentLengths {
    /// Extrados (long side) length (mm)
    pub back_mm: f64,
    /// Intrados (short side) length (mm)
    pub belly_mm: f64,
}

impl SegmentLengths {
    /// Ordinate of the fish-mouth at angle φ (degrees) from the belly
    pub fn height_at(&self, phi_deg: f64) -> f64 {
        let blend = (1.0 - phi_deg.to_radians().cos()) / 2.0;
        self.belly_mm + (self.back_mm - self.belly_mm) * blend
    }

    /// Sample the fish-mouth over one circumference, closing point included
    pub fn template(&self, divisions: usize) -> Vec<CurvePoint> {
        (0..=divisions)
            .map(|i| {
                let angle = i as f64 * 360.0 / divisions as f64;
                CurvePoint {
                    angle_deg: angle,
                    height_mm: self.height_at(angle),
                }
            })
            .collect()
    }
}

/// Full interior segment lengths
pub fn full_segment(input: &ElbowInput) -> SegmentLengths {
    let tan_beta = input.cut_angle_deg().to_radians().tan();
    let half_d = input.diameter_mm / 2.0;
    SegmentLengths {
        back_mm: 2.0 * (input.bend_radius_mm + half_d) * tan_beta,
        belly_mm: 2.0 * (input.bend_radius_mm - half_d) * tan_beta,
    }
}

/// Calculate a segmented elbow.
pub fn calculate(
    input: &ElbowInput,
    material: Material,
    settings: &FabricationSettings,
) -> CalcResult<CalculationResult> {
    settings.validate()?;
    if let Some(empty) = precheck("elbow", input.validate())? {
        return Ok(empty);
    }

    let d = input.diameter_mm;
    let radius = input.bend_radius_mm;
    let angle = input.angle_deg;
    let n = input.segments;
    let t = input.thickness_mm;
    let density = material.density_kg_dm3();
    let divisions = settings.development_divisions;

    let joint_angle = input.joint_angle_deg();
    let cut_angle = input.cut_angle_deg();
    let full = full_segment(input);
    let end = SegmentLengths {
        back_mm: full.back_mm / 2.0,
        belly_mm: full.belly_mm / 2.0,
    };

    let arc_length = PI * radius * angle / 180.0;
    let circumference = PI * d;
    let area_mm2 = circumference * arc_length;
    let area: SquareMeters = SquareMillimeters(area_mm2).into();
    let mass = CubicMillimeters(area_mm2 * t).mass(density);
    let volume: Liters = CubicMillimeters(PI * (d / 2.0).powi(2) * arc_length).into();

    debug!(segments = n, cut_angle, back = full.back_mm, belly = full.belly_mm, "elbow calculated");

    let mut result = CalculationResult::new();
    result
        .metric("Bend radius", format!("{} mm", radius))
        .metric("Total angle", format!("{}°", angle))
        .metric("Segments", n.to_string())
        .metric("Angle per joint", format!("{:.2}°", joint_angle))
        .metric("Cut angle", format!("{:.2}°", cut_angle))
        .metric("Cut length (circumference)", format!("{:.1} mm", circumference))
        .metric("Centreline arc length", format!("{:.1} mm", arc_length))
        .metric("Segment back (long side)", format!("{:.1} mm", full.back_mm))
        .metric("Segment belly (short side)", format!("{:.1} mm", full.belly_mm))
        .metric("Surface area", format!("{:.2} m²", area.0))
        .metric("Internal volume", format!("{:.2} L", volume.0))
        .metric("Estimated weight", format!("{:.2} kg", mass.0));

    result
        .step(format!(
            "1. PREPARATION:\n   - Material: {} pipe or plate, {} mm wall.\n   - The {}° bend is split into {} segments ({} joints).\n   - Cut angle of each face: {:.2}°.",
            material.display_name(),
            t,
            angle,
            n,
            input.joints(),
            cut_angle
        ))
        .step(format!(
            "2. TEMPLATE LAYOUT:\n   - Draw a straight line equal to the circumference: {:.1} mm.\n   - Divide it into {} equal parts.\n   - At each division mark the fish-mouth height between {:.1} mm (back) and {:.1} mm (belly).\n   - Join the points with a flexible batten to get a smooth wave.",
            circumference, divisions, full.back_mm, full.belly_mm
        ))
        .step(format!(
            "3. CUTTING THE SEGMENTS:\n   - Wrap the template around the pipe (or mark the flat plate before rolling).\n   - Mark the cut line and the back centreline.\n   - Cut {} segments. The two end pieces are half segments ({:.1} / {:.1} mm).",
            n, end.back_mm, end.belly_mm
        ))
        .step(format!(
            "4. ASSEMBLY:\n   - Set the first segment.\n   - Turn the next segment 180° so long sides meet short sides.\n   - Check that the axes meet at {:.2}° per joint.",
            joint_angle
        ))
        .step(format!(
            "5. WELDING:\n   - Tack each joint at 4 points (cross pattern).\n   - Check the total angle ({}°) and bend radius ({} mm) before final welding.\n   - Weld each joint all round, controlling heat input to limit distortion.",
            angle, radius
        ));

    result
        .set("diameter_mm", d)
        .set("bend_radius_mm", radius)
        .set("segments", n as usize)
        .set("angle_deg", angle)
        .set("joint_angle_deg", joint_angle)
        .set("cut_angle_deg", cut_angle)
        .set("back_full_mm", full.back_mm)
        .set("belly_full_mm", full.belly_mm)
        .set("back_half_mm", end.back_mm)
        .set("belly_half_mm", end.belly_mm)
        .set("circumference_mm", circumference)
        .set("arc_length_mm", arc_length)
        .set("surface_area_m2", area.0)
        .set("internal_volume_l", volume.0)
        .set("weight_kg", mass.0)
        .set("template", full.template(divisions))
        .set("end_template", end.template(divisions));

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn elbow() -> ElbowInput {
        ElbowInput {
            diameter_mm: 300.0,
            bend_radius_mm: 450.0,
            angle_deg: 90.0,
            segments: 4,
            thickness_mm: 4.0,
        }
    }

    fn run(input: &ElbowInput) -> CalcResult<CalculationResult> {
        calculate(input, Material::Steel, &FabricationSettings::default())
    }

    #[test]
    fn test_cut_angles_add_up_to_bend() {
        for n in 2..=8i64 {
            for angle in [30.0, 45.0, 90.0, 135.0, 180.0] {
                let input = ElbowInput { segments: n, angle_deg: angle, ..elbow() };
                let total = input.cut_angle_deg() * 2.0 * (n - 1) as f64;
                assert!((total - angle).abs() < 1e-9, "n={} angle={}", n, angle);
            }
        }
    }

    #[test]
    fn test_segment_lengths() {
        let r = run(&elbow()).unwrap();
        // β = 90 / 6 = 15°
        assert!((r.number("cut_angle_deg").unwrap() - 15.0).abs() < 1e-12);
        let tan = 15f64.to_radians().tan();
        assert!((r.number("back_full_mm").unwrap() - 2.0 * 600.0 * tan).abs() < 1e-9);
        assert!((r.number("belly_full_mm").unwrap() - 2.0 * 300.0 * tan).abs() < 1e-9);
        assert!((r.number("back_half_mm").unwrap() - 600.0 * tan).abs() < 1e-9);
    }

    #[test]
    fn test_fish_mouth_template() {
        let full = full_segment(&elbow());
        let points = full.template(12);
        assert_eq!(points.len(), 13);
        assert!((points[0].height_mm - full.belly_mm).abs() < 1e-9);
        assert!((points[6].height_mm - full.back_mm).abs() < 1e-9);
        assert!((points[12].height_mm - full.belly_mm).abs() < 1e-9);
        // Quarter point is the mean of back and belly
        let mid = (full.back_mm + full.belly_mm) / 2.0;
        assert!((points[3].height_mm - mid).abs() < 1e-9);
    }

    #[test]
    fn test_centreline_quantities() {
        let r = run(&elbow()).unwrap();
        let arc = PI * 450.0 / 2.0;
        assert!((r.number("arc_length_mm").unwrap() - arc).abs() < 1e-9);
        let volume = PI * 150.0 * 150.0 * arc / 1e6;
        assert!((r.number("internal_volume_l").unwrap() - volume).abs() < 1e-9);
        let mass = PI * 300.0 * arc * 4.0 / 1e6 * 7.85;
        assert!((r.number("weight_kg").unwrap() - mass).abs() < 1e-9);
    }

    #[test]
    fn test_single_segment_rejected() {
        let input = ElbowInput { segments: 1, ..elbow() };
        let err = run(&input).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_negative_segments_is_empty() {
        let input: ElbowInput = serde_json::from_str(
            r#"{ "diameter_mm": 300, "bend_radius_mm": 450, "segments": -4 }"#,
        )
        .unwrap();
        assert!(run(&input).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = FabricationSettings {
            development_divisions: 0,
            ..FabricationSettings::default()
        };
        let err = calculate(&elbow(), Material::Steel, &settings).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_tight_radius_is_impossible() {
        let input = ElbowInput { bend_radius_mm: 100.0, ..elbow() };
        assert_eq!(run(&input).unwrap_err().error_code(), "IMPOSSIBLE_GEOMETRY");
    }

    #[test]
    fn test_defaults_fill_angle_and_segments() {
        let input: ElbowInput =
            serde_json::from_str(r#"{ "diameter_mm": 200, "bend_radius_mm": 300 }"#).unwrap();
        assert_eq!(input.angle_deg, 90.0);
        assert_eq!(input.segments, 3);
        let r = run(&input).unwrap();
        assert!((r.number("cut_angle_deg").unwrap() - 22.5).abs() < 1e-12);
    }

    #[test]
    fn test_missing_diameter_is_empty() {
        let input = ElbowInput { diameter_mm: 0.0, ..elbow() };
        assert!(run(&input).unwrap().is_empty());
    }
}
