//! # Pipe Branch (Saddle Cut)
//!
//! Cut template for a branch pipe meeting a header pipe at an angle.
//!
//! ## Method
//!
//! The branch circumference is divided into `N` equal parts. At each
//! position φ the depth of the cut is
//!
//! ```text
//! y(φ) = (R - √(R² - (r·sin φ)²)) / sin α  -  r·cos φ / tan α
//! ```
//!
//! where `R` is the header radius, `r` the branch radius and `α` the angle
//! between the two axes. The first term is the saddle of two crossing
//! cylinders, the second is a practical slope correction for laterals.
//! The ordinates are shifted so the shortest point sits on the baseline.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::result::{precheck, CalculationResult, CurvePoint, TheoryNote};
use crate::errors::{require_positive, CalcError, CalcResult};
use crate::geometry::safe_sqrt;
use crate::settings::FabricationSettings;

/// Input parameters for a branch connection.
///
/// ## JSON Example
///
/// ```json
/// { "header_diameter_mm": 200.0, "branch_diameter_mm": 100.0, "angle_deg": 90.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipeBranchInput {
    /// Header (main pipe) outside diameter (mm)
    pub header_diameter_mm: f64,
    /// Branch pipe outside diameter (mm)
    pub branch_diameter_mm: f64,
    /// Angle between header and branch axes (degrees, 0 means unset)
    pub angle_deg: f64,
}

impl Default for PipeBranchInput {
    fn default() -> Self {
        PipeBranchInput {
            header_diameter_mm: 0.0,
            branch_diameter_mm: 0.0,
            angle_deg: 90.0,
        }
    }
}

impl PipeBranchInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("header_diameter_mm", self.header_diameter_mm)?;
        require_positive("branch_diameter_mm", self.branch_diameter_mm)?;

        let angle = self.effective_angle_deg();
        if !(angle > 0.0 && angle < 180.0) {
            return Err(CalcError::impossible_geometry(
                "pipe_branch",
                format!("branch angle {}° must lie strictly between 0° and 180°", angle),
            ));
        }
        if self.branch_diameter_mm > self.header_diameter_mm {
            return Err(CalcError::impossible_geometry(
                "pipe_branch",
                format!(
                    "branch Ø{} mm is larger than header Ø{} mm",
                    self.branch_diameter_mm, self.header_diameter_mm
                ),
            ));
        }
        Ok(())
    }

    /// Branch angle, with an unset (zero) angle read as a square tee
    pub fn effective_angle_deg(&self) -> f64 {
        if self.angle_deg == 0.0 {
            90.0
        } else {
            self.angle_deg
        }
    }

    /// Raw cut depth at position φ (degrees), before normalization
    pub fn raw_ordinate(&self, phi_deg: f64) -> f64 {
        let big_r = self.header_diameter_mm / 2.0;
        let r = self.branch_diameter_mm / 2.0;
        let alpha = self.effective_angle_deg().to_radians();
        let phi = phi_deg.to_radians();

        let saddle = (big_r - safe_sqrt(big_r.powi(2) - (r * phi.sin()).powi(2))) / alpha.sin();
        let slope = r * phi.cos() / alpha.tan();
        saddle - slope
    }

    /// Sample the template: `divisions + 1` points over 0..=360°, minimum at zero.
    pub fn template(&self, divisions: usize) -> Vec<CurvePoint> {
        let raw: Vec<CurvePoint> = (0..=divisions)
            .map(|i| {
                let angle = i as f64 * 360.0 / divisions as f64;
                CurvePoint {
                    angle_deg: angle,
                    height_mm: self.raw_ordinate(angle),
                }
            })
            .collect();

        let min = raw.iter().map(|p| p.height_mm).fold(f64::INFINITY, f64::min);
        raw.into_iter()
            .map(|p| CurvePoint {
                height_mm: p.height_mm - min,
                ..p
            })
            .collect()
    }
}

/// The short method explanation attached to every branch result.
pub fn theory() -> Vec<TheoryNote> {
    vec![
        TheoryNote::new(
            "Cylinder intersection",
            "The saddle is the curve where two cylinders (pipes) intersect. Its shape depends on both diameters and on the connection angle.",
        ),
        TheoryNote::new(
            "Cut ordinates",
            "To mark the cut, the branch is divided into equal parts and the height of the curve at each point is found with trigonometry (sine and cosine).",
        ),
        TheoryNote::new(
            "Template",
            "The development is a wave that can be printed, wrapped around the pipe and used to mark the exact cut.",
        ),
    ]
}

/// Calculate the saddle template for a branch.
pub fn calculate(input: &PipeBranchInput, settings: &FabricationSettings) -> CalcResult<CalculationResult> {
    settings.validate()?;
    if let Some(empty) = precheck("pipe_branch", input.validate())? {
        return Ok(empty);
    }

    let divisions = settings.development_divisions;
    let points = input.template(divisions);
    let circumference = PI * input.branch_diameter_mm;
    let spacing = circumference / divisions as f64;
    let max_height = points.iter().map(|p| p.height_mm).fold(0.0, f64::max);

    debug!(divisions, max_height, "pipe branch calculated");

    let mut result = CalculationResult::new();
    result
        .metric("Header diameter", format!("{} mm", input.header_diameter_mm))
        .metric("Branch diameter", format!("{} mm", input.branch_diameter_mm))
        .metric("Angle", format!("{}°", input.effective_angle_deg()))
        .metric("Development length", format!("{:.1} mm", circumference))
        .metric("Maximum cut height", format!("{:.1} mm", max_height));

    result
        .step(format!(
            "1. LAYOUT:\n   - Draw a straight line as long as the branch circumference ({:.1} mm).",
            circumference
        ))
        .step(format!(
            "2. DIVISION:\n   - Divide the line into {} equal parts ({:.1} mm apart).",
            divisions, spacing
        ))
        .step("3. MARKING THE HEIGHTS:\n   - At each division mark the height given by the diagram or table.")
        .step("4. CUTTING:\n   - Join the points with a smooth curve to obtain the cut template.");

    result
        .set("header_diameter_mm", input.header_diameter_mm)
        .set("branch_diameter_mm", input.branch_diameter_mm)
        .set("angle_deg", input.effective_angle_deg())
        .set("branch_circumference_mm", circumference)
        .set("division_spacing_mm", spacing)
        .set("max_height_mm", max_height)
        .set("points", points);

    for note in theory() {
        result.theory_note(note);
    }

    Ok(result)
}
