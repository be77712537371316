//! # Square-to-Round Transition
//!
//! Summary quantities for a transition piece joining a square base to a round
//! top, plus the true-length triangulation used to lay it out.
//!
//! ## Method
//!
//! The weight/area metrics use the shop approximation
//!
//! ```text
//! A ≈ (4W + πD)/2 · √(H² + ((W - D)/2)²)
//! V = H/3 · (A_base + A_top + √(A_base·A_top))
//! ```
//!
//! The layout itself is triangulated: the top circle is divided into 12
//! points (3 spaces per quadrant), each base corner is joined to the 4 points
//! of its quadrant, and each plan length is turned into a true length with the
//! height as the second leg of a right triangle. The facet area of that
//! triangulation is reported alongside the approximation so the two can be
//! compared.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::result::{precheck, CalculationResult};
use crate::errors::{require_non_negative, require_positive, CalcResult};
use crate::materials::Material;
use crate::units::{CubicMillimeters, Liters, SquareMeters, SquareMillimeters};

/// Circle points per quadrant boundary-to-boundary (3 spaces -> 4 lines per corner)
const SPACES_PER_QUADRANT: usize = 3;

/// Input parameters for a square-to-round transition.
///
/// ## JSON Example
///
/// ```json
/// { "width_mm": 600.0, "diameter_mm": 400.0, "height_mm": 300.0, "thickness_mm": 3.0 }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SquareToRoundInput {
    /// Side of the square base (mm)
    pub width_mm: f64,
    /// Diameter of the round top (mm)
    pub diameter_mm: f64,
    /// Vertical height (mm)
    pub height_mm: f64,
    /// Plate thickness (mm)
    pub thickness_mm: f64,
}

impl SquareToRoundInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("width_mm", self.width_mm)?;
        require_positive("diameter_mm", self.diameter_mm)?;
        require_positive("height_mm", self.height_mm)?;
        require_non_negative("thickness_mm", self.thickness_mm)?;
        Ok(())
    }
}

type Point3 = [f64; 3];

fn sub(a: Point3, b: Point3) -> Point3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn triangle_area(a: Point3, b: Point3, c: Point3) -> f64 {
    let u = sub(b, a);
    let v = sub(c, a);
    let cross = [
        u[1] * v[2] - u[2] * v[1],
        u[2] * v[0] - u[0] * v[2],
        u[0] * v[1] - u[1] * v[0],
    ];
    0.5 * (cross[0].powi(2) + cross[1].powi(2) + cross[2].powi(2)).sqrt()
}

/// True-length triangulation of the transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Triangulation {
    /// Plan lengths from one corner to the 4 points of its quadrant (mm)
    pub plan_lengths_mm: Vec<f64>,
    /// True lengths of the same lines (mm)
    pub true_lengths_mm: Vec<f64>,
    /// True length of the seam line at the middle of a side (mm)
    pub seam_true_length_mm: f64,
    /// Sum of all 3D facet areas (mm²)
    pub facet_area_mm2: f64,
}

impl Triangulation {
    /// Build the triangulation for a concentric transition.
    pub fn new(width: f64, diameter: f64, height: f64) -> Self {
        let half = width / 2.0;
        let r = diameter / 2.0;
        let divisions = 4 * SPACES_PER_QUADRANT;

        let circle: Vec<Point3> = (0..divisions)
            .map(|k| {
                let a = (k as f64 * 360.0 / divisions as f64).to_radians();
                [r * a.cos(), r * a.sin(), height]
            })
            .collect();

        // Corner q sits in the quadrant spanning circle points 3q..=3q+3
        let corners: [Point3; 4] = [
            [half, half, 0.0],
            [-half, half, 0.0],
            [-half, -half, 0.0],
            [half, -half, 0.0],
        ];

        let mut facet_area = 0.0;
        for (q, corner) in corners.iter().enumerate() {
            let first = q * SPACES_PER_QUADRANT;
            for k in first..first + SPACES_PER_QUADRANT {
                let a = circle[k % divisions];
                let b = circle[(k + 1) % divisions];
                facet_area += triangle_area(*corner, a, b);
            }
            // Flat triangle between the previous corner and this one
            let previous = corners[(q + 3) % 4];
            facet_area += triangle_area(previous, *corner, circle[first]);
        }

        let plan_lengths: Vec<f64> = (0..=SPACES_PER_QUADRANT)
            .map(|k| {
                let p = circle[k % divisions];
                (p[0] - half).hypot(p[1] - half)
            })
            .collect();
        let true_lengths = plan_lengths.iter().map(|l| l.hypot(height)).collect();

        Triangulation {
            plan_lengths_mm: plan_lengths,
            true_lengths_mm: true_lengths,
            seam_true_length_mm: (half - r).hypot(height),
            facet_area_mm2: facet_area,
        }
    }
}

/// Calculate the transition summary and its triangulation.
pub fn calculate(input: &SquareToRoundInput, material: Material) -> CalcResult<CalculationResult> {
    if let Some(empty) = precheck("square_to_round", input.validate())? {
        return Ok(empty);
    }

    let w = input.width_mm;
    let d = input.diameter_mm;
    let h = input.height_mm;
    let t = input.thickness_mm;
    let density = material.density_kg_dm3();

    let base_area = w * w;
    let top_area = PI * (d / 2.0).powi(2);
    let volume: Liters =
        CubicMillimeters(h / 3.0 * (base_area + top_area + (base_area * top_area).sqrt())).into();

    let mean_perimeter = (4.0 * w + PI * d) / 2.0;
    let mean_slant = h.hypot((w - d) / 2.0);
    let area_mm2 = mean_perimeter * mean_slant;
    let area: SquareMeters = SquareMillimeters(area_mm2).into();
    let mass = CubicMillimeters(area_mm2 * t).mass(density);

    let tri = Triangulation::new(w, d, h);
    let facet_area: SquareMeters = SquareMillimeters(tri.facet_area_mm2).into();

    debug!(
        approx_area = area_mm2,
        facet_area = tri.facet_area_mm2,
        "square-to-round calculated"
    );

    let mut result = CalculationResult::new();
    result
        .metric("Vertical height", format!("{} mm", h))
        .metric("Square base", format!("{} x {} mm", w, w))
        .metric("Round top", format!("Ø {} mm", d))
        .metric("Surface area", format!("{:.2} m²", area.0))
        .metric("Triangulated area", format!("{:.2} m²", facet_area.0))
        .metric("Internal volume", format!("{:.2} L", volume.0))
        .metric("Estimated weight", format!("{:.2} kg", mass.0));

    let true_lengths = tri
        .true_lengths_mm
        .iter()
        .enumerate()
        .map(|(i, l)| format!("L{}: {:.1} mm", i, l))
        .collect::<Vec<_>>()
        .join(", ");

    result
        .step(format!(
            "1. PLAN VIEW:\n   - Select {} plate, {} mm thick.\n   - Draw the plan full size or to scale: a {} x {} mm square with a Ø{} mm circle centred on it.",
            material.display_name(),
            t,
            w,
            w,
            d
        ))
        .step("2. DIVISION AND TRIANGULATION:\n   - Divide the circle into 12 equal parts (3 per quadrant).\n   - Join each circle point to the nearest corner of the square; the quadrant boundary points join both neighbouring corners.\n   - This maps the transition into flat and conical triangles.")
        .step(format!(
            "3. TRUE LENGTHS:\n   - Plan lines are foreshortened. Build a right triangle for each line:\n     • Vertical leg = part height ({} mm)\n     • Horizontal leg = plan length\n     • Hypotenuse = true length on the plate.\n   - True lengths from a corner: {}.",
            h, true_lengths
        ))
        .step(format!(
            "4. DEVELOPMENT ON PLATE:\n   - Start on the seam line at the middle of one side (true length {:.1} mm).\n   - Transfer the true lengths triangle by triangle, swinging arcs with a compass.\n   - Mark the bend lines at the four corners.",
            tri.seam_true_length_mm
        ))
        .step("5. FORMING:\n   - Break lightly along the four corner lines.\n   - Flat triangles stay flat; roll or hand-form the conical corner sections progressively.")
        .step("6. CLOSING:\n   - Bring the edges together and check the base is square and the top round and level.\n   - Weld the seam and add collars or flanges if required.");

    result
        .set("width_mm", w)
        .set("diameter_mm", d)
        .set("height_mm", h)
        .set("surface_area_m2", area.0)
        .set("internal_volume_l", volume.0)
        .set("weight_kg", mass.0)
        .set("plan_lengths_mm", tri.plan_lengths_mm.clone())
        .set("true_lengths_mm", tri.true_lengths_mm.clone())
        .set("seam_true_length_mm", tri.seam_true_length_mm)
        .set("triangulated_area_m2", facet_area.0);

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transition() -> SquareToRoundInput {
        SquareToRoundInput {
            width_mm: 600.0,
            diameter_mm: 400.0,
            height_mm: 300.0,
            thickness_mm: 3.0,
        }
    }

    #[test]
    fn test_approximate_area() {
        let r = calculate(&transition(), Material::Steel).unwrap();
        let expected = (2400.0 + PI * 400.0) / 2.0 * 300.0f64.hypot(100.0) / 1e6;
        assert!((r.number("surface_area_m2").unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_prismoid_volume() {
        let r = calculate(&transition(), Material::Steel).unwrap();
        let ab = 360_000.0;
        let at = PI * 200.0 * 200.0;
        let expected = 100.0 * (ab + at + (ab * at).sqrt()) / 1e6;
        assert!((r.number("internal_volume_l").unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_true_lengths_use_height_as_leg() {
        let tri = Triangulation::new(600.0, 400.0, 300.0);
        assert_eq!(tri.true_lengths_mm.len(), 4);
        for (plan, tl) in tri.plan_lengths_mm.iter().zip(&tri.true_lengths_mm) {
            assert!((tl * tl - (plan * plan + 300.0 * 300.0)).abs() < 1e-6);
        }
        // Quadrant is symmetric about its diagonal
        assert!((tri.plan_lengths_mm[0] - tri.plan_lengths_mm[3]).abs() < 1e-9);
        assert!((tri.plan_lengths_mm[1] - tri.plan_lengths_mm[2]).abs() < 1e-9);
        // Corner (300,300) to point at 0° (200,0)
        assert!((tri.plan_lengths_mm[0] - 100.0f64.hypot(300.0)).abs() < 1e-9);
    }

    #[test]
    fn test_seam_length() {
        let tri = Triangulation::new(600.0, 400.0, 300.0);
        assert!((tri.seam_true_length_mm - 100.0f64.hypot(300.0)).abs() < 1e-9);
    }

    #[test]
    fn test_triangulated_area_is_close_to_approximation() {
        let r = calculate(&transition(), Material::Steel).unwrap();
        let approx = r.number("surface_area_m2").unwrap();
        let facets = r.number("triangulated_area_m2").unwrap();
        assert!(facets > 0.0);
        assert!(((facets - approx) / approx).abs() < 0.15, "{} vs {}", facets, approx);
    }

    #[test]
    fn test_inscribed_circle_has_vertical_seam() {
        // Circle inscribed in the square: the seam line is vertical
        let tri = Triangulation::new(100.0, 100.0, 50.0);
        assert!(tri.facet_area_mm2 > 0.0);
        assert!((tri.seam_true_length_mm - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_diameter_is_empty() {
        let mut input = transition();
        input.diameter_mm = 0.0;
        assert!(calculate(&input, Material::Steel).unwrap().is_empty());
    }
}
