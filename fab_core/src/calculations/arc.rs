//! # Arc / Rolling Helper
//!
//! Radius, opening angle and developed length of a rolled arc.
//!
//! Two ways in:
//!
//! - **chord + sagitta** (what you measure on a template): `R = C²/(8h) + h/2`
//! - **radius + chord** (what the drawing gives): `h = R - √(R² - (C/2)²)`
//!
//! The opening angle is `θ = 2·asin(C/2R)`. A sagitta larger than the radius
//! means the arc goes past the half circle, and `θ` becomes `360° - θ`.
//!
//! ## Example
//!
//! ```rust
//! use fab_core::calculations::arc::{calculate, ArcInput};
//!
//! let input = ArcInput::ByChordAndSagitta { chord_mm: 1000.0, sagitta_mm: 100.0 };
//! let result = calculate(&input).unwrap();
//! assert!((result.number("radius_mm").unwrap() - 1300.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::result::{precheck, CalculationResult};
use crate::errors::{require_positive, CalcError, CalcResult};
use crate::geometry::{clamped_asin, radius_from_chord_sagitta, sagitta};

/// How the arc is specified.
///
/// ## JSON Example
///
/// ```json
/// { "mode": "by_chord_and_sagitta", "chord_mm": 1000.0, "sagitta_mm": 100.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ArcInput {
    ByChordAndSagitta {
        #[serde(default)]
        chord_mm: f64,
        #[serde(default)]
        sagitta_mm: f64,
    },
    ByRadiusAndChord {
        #[serde(default)]
        radius_mm: f64,
        #[serde(default)]
        chord_mm: f64,
    },
}

impl Default for ArcInput {
    fn default() -> Self {
        ArcInput::ByChordAndSagitta {
            chord_mm: 0.0,
            sagitta_mm: 0.0,
        }
    }
}

/// A fully resolved arc
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcGeometry {
    pub radius_mm: f64,
    pub chord_mm: f64,
    pub sagitta_mm: f64,
    pub angle_deg: f64,
    pub arc_length_mm: f64,
}

impl ArcInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        match *self {
            ArcInput::ByChordAndSagitta { chord_mm, sagitta_mm } => {
                require_positive("chord_mm", chord_mm)?;
                require_positive("sagitta_mm", sagitta_mm)?;
            }
            ArcInput::ByRadiusAndChord { radius_mm, chord_mm } => {
                require_positive("radius_mm", radius_mm)?;
                require_positive("chord_mm", chord_mm)?;
                if radius_mm < chord_mm / 2.0 {
                    return Err(CalcError::impossible_geometry(
                        "arc",
                        format!(
                            "radius {} mm is shorter than half the chord ({} mm)",
                            radius_mm,
                            chord_mm / 2.0
                        ),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Resolve radius, sagitta, angle and length. Call after `validate()`.
    pub fn resolve(&self) -> CalcResult<ArcGeometry> {
        let (radius, chord, rise) = match *self {
            ArcInput::ByChordAndSagitta { chord_mm, sagitta_mm } => {
                (radius_from_chord_sagitta(chord_mm, sagitta_mm), chord_mm, sagitta_mm)
            }
            ArcInput::ByRadiusAndChord { radius_mm, chord_mm } => {
                let rise = sagitta(radius_mm, chord_mm).ok_or_else(|| {
                    CalcError::impossible_geometry("arc", "chord is longer than the diameter")
                })?;
                (radius_mm, chord_mm, rise)
            }
        };

        let minor = 2.0 * clamped_asin(chord / (2.0 * radius)).to_degrees();
        let angle = if rise > radius { 360.0 - minor } else { minor };

        Ok(ArcGeometry {
            radius_mm: radius,
            chord_mm: chord,
            sagitta_mm: rise,
            angle_deg: angle,
            arc_length_mm: radius * angle.to_radians(),
        })
    }
}

/// Calculate the rolling data for an arc.
pub fn calculate(input: &ArcInput) -> CalcResult<CalculationResult> {
    if let Some(empty) = precheck("arc", input.validate())? {
        return Ok(empty);
    }

    let arc = input.resolve()?;
    debug!(radius = arc.radius_mm, angle = arc.angle_deg, "arc calculated");

    let mut result = CalculationResult::new();
    result
        .metric("Radius (R)", format!("{:.1} mm", arc.radius_mm))
        .metric("Arc length", format!("{:.1} mm", arc.arc_length_mm))
        .metric("Opening angle", format!("{:.1}°", arc.angle_deg))
        .metric("Chord (C)", format!("{} mm", arc.chord_mm))
        .metric("Sagitta (h)", format!("{:.1} mm", arc.sagitta_mm));

    result
        .step(format!(
            "1. RADIUS:\n   - Roll the part to a radius of {:.1} mm.",
            arc.radius_mm
        ))
        .step(format!(
            "2. MATERIAL LENGTH:\n   - Cut the plate {:.1} mm long.",
            arc.arc_length_mm
        ))
        .step(format!(
            "3. CHECK:\n   - After rolling, check the chord measures {} mm and the rise (sagitta) {:.1} mm.",
            arc.chord_mm, arc.sagitta_mm
        ));

    result
        .set("radius_mm", arc.radius_mm)
        .set("arc_length_mm", arc.arc_length_mm)
        .set("angle_deg", arc.angle_deg)
        .set("chord_mm", arc.chord_mm)
        .set("sagitta_mm", arc.sagitta_mm);

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radius_from_chord_and_sagitta() {
        let input = ArcInput::ByChordAndSagitta { chord_mm: 1000.0, sagitta_mm: 100.0 };
        let r = calculate(&input).unwrap();
        assert!((r.number("radius_mm").unwrap() - 1300.0).abs() < 1e-9);
    }

    #[test]
    fn test_sagitta_from_radius_and_chord() {
        let input = ArcInput::ByRadiusAndChord { radius_mm: 1300.0, chord_mm: 1000.0 };
        let r = calculate(&input).unwrap();
        assert!((r.number("sagitta_mm").unwrap() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_angle_and_length() {
        let input = ArcInput::ByChordAndSagitta { chord_mm: 1000.0, sagitta_mm: 100.0 };
        let arc = input.resolve().unwrap();
        let theta = 2.0 * (500.0f64 / 1300.0).asin();
        assert!((arc.angle_deg - theta.to_degrees()).abs() < 1e-9);
        assert!((arc.arc_length_mm - 1300.0 * theta).abs() < 1e-9);
    }

    #[test]
    fn test_half_circle() {
        let input = ArcInput::ByChordAndSagitta { chord_mm: 200.0, sagitta_mm: 100.0 };
        let arc = input.resolve().unwrap();
        assert!((arc.radius_mm - 100.0).abs() < 1e-12);
        assert!((arc.angle_deg - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_major_arc() {
        // Rise 150 on chord 200: radius 108.33, past the half circle
        let input = ArcInput::ByChordAndSagitta { chord_mm: 200.0, sagitta_mm: 150.0 };
        let arc = input.resolve().unwrap();
        assert!(arc.angle_deg > 180.0);
        let minor = 2.0 * (100.0 / arc.radius_mm).asin().to_degrees();
        assert!((arc.angle_deg - (360.0 - minor)).abs() < 1e-9);
    }

    #[test]
    fn test_short_radius_is_impossible() {
        let input = ArcInput::ByRadiusAndChord { radius_mm: 400.0, chord_mm: 1000.0 };
        assert_eq!(calculate(&input).unwrap_err().error_code(), "IMPOSSIBLE_GEOMETRY");
    }

    #[test]
    fn test_missing_values_are_empty() {
        let input = ArcInput::ByChordAndSagitta { chord_mm: 1000.0, sagitta_mm: 0.0 };
        assert!(calculate(&input).unwrap().is_empty());
        assert!(calculate(&ArcInput::default()).unwrap().is_empty());
    }

    #[test]
    fn test_mode_tag() {
        let input: ArcInput =
            serde_json::from_str(r#"{ "mode": "by_radius_and_chord", "radius_mm": 500, "chord_mm": 600 }"#).unwrap();
        assert_eq!(input, ArcInput::ByRadiusAndChord { radius_mm: 500.0, chord_mm: 600.0 });
    }
}
