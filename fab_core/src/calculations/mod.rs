//! # Fabrication Calculations
//!
//! One module per shape family. Each follows the pattern:
//!
//! - `*Input` - dimension record (JSON-serializable, every field defaulted)
//! - `validate()` - says which field is missing or unacceptable
//! - `calculate(input, material[, settings]) -> CalcResult<CalculationResult>`
//!
//! Missing dimensions never fail: the calculator returns an empty
//! [`CalculationResult`]. Unknown fasteners and impossible geometry are
//! returned as errors.
//!
//! ## Available Calculations
//!
//! - [`cylinder`] - rolled shell blank
//! - [`cone`] - cone / frustum development
//! - [`square_to_round`] - transition piece with triangulation
//! - [`elbow`] - segmented (mitred) bend
//! - [`offset`] - pipe dogleg
//! - [`pipe_branch`] - saddle cut template
//! - [`arc`] - rolling radius from chord and sagitta
//! - [`bracket`] - wall bracket with brace check
//! - [`bolts`] - bolt group capacity and torque
//! - [`stairs`] - straight stair layout
//! - [`plate`] - plate weight
//! - [`volumes`] - volume and area of basic solids
//!
//! ## Dispatch
//!
//! ```rust
//! use fab_core::calculations::CalculationRequest;
//! use fab_core::settings::FabricationSettings;
//!
//! let json = r#"{ "material": "steel", "shape": "cylinder",
//!                 "diameter_mm": 1000, "height_mm": 2000, "thickness_mm": 5 }"#;
//! let request = CalculationRequest::from_json(json).unwrap();
//! let result = request.calculate(&FabricationSettings::default()).unwrap();
//! assert!(result.number("blank_width_mm").is_some());
//! ```

pub mod arc;
pub mod bolts;
pub mod bracket;
pub mod catalog;
pub mod cone;
pub mod cylinder;
pub mod elbow;
pub mod offset;
pub mod pipe_branch;
pub mod plate;
pub mod result;
pub mod square_to_round;
pub mod stairs;
pub mod volumes;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::CalcResult;
use crate::materials::Material;
use crate::settings::FabricationSettings;

// Re-export commonly used types
pub use arc::ArcInput;
pub use bolts::{BoltsInput, JointStatus};
pub use bracket::{BracketInput, BracketStatus};
pub use catalog::{ShapeInfo, ShapeKind};
pub use cone::ConeInput;
pub use cylinder::CylinderInput;
pub use elbow::ElbowInput;
pub use offset::OffsetInput;
pub use pipe_branch::PipeBranchInput;
pub use plate::PlateInput;
pub use result::{CalculatedValue, CalculationResult, CurvePoint, Metric, TheoryNote};
pub use square_to_round::SquareToRoundInput;
pub use stairs::StairsInput;
pub use volumes::{Solid, VolumesInput};

/// Dimension record for any shape family, tagged by `"shape"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ShapeInput {
    Cylinder(CylinderInput),
    Cone(ConeInput),
    SquareToRound(SquareToRoundInput),
    Elbow(ElbowInput),
    Offset(OffsetInput),
    PipeBranch(PipeBranchInput),
    Arc(ArcInput),
    Bracket(BracketInput),
    Bolts(BoltsInput),
    Stairs(StairsInput),
    Plate(PlateInput),
    Volumes(VolumesInput),
}

impl ShapeInput {
    pub fn kind(&self) -> ShapeKind {
        match self {
            ShapeInput::Cylinder(_) => ShapeKind::Cylinder,
            ShapeInput::Cone(_) => ShapeKind::Cone,
            ShapeInput::SquareToRound(_) => ShapeKind::SquareToRound,
            ShapeInput::Elbow(_) => ShapeKind::Elbow,
            ShapeInput::Offset(_) => ShapeKind::Offset,
            ShapeInput::PipeBranch(_) => ShapeKind::PipeBranch,
            ShapeInput::Arc(_) => ShapeKind::Arc,
            ShapeInput::Bracket(_) => ShapeKind::Bracket,
            ShapeInput::Bolts(_) => ShapeKind::Bolts,
            ShapeInput::Stairs(_) => ShapeKind::Stairs,
            ShapeInput::Plate(_) => ShapeKind::Plate,
            ShapeInput::Volumes(_) => ShapeKind::Volumes,
        }
    }

    /// Route to the matching calculator.
    pub fn calculate(&self, material: Material, settings: &FabricationSettings) -> CalcResult<CalculationResult> {
        match self {
            ShapeInput::Cylinder(input) => cylinder::calculate(input, material),
            ShapeInput::Cone(input) => cone::calculate(input, material),
            ShapeInput::SquareToRound(input) => square_to_round::calculate(input, material),
            ShapeInput::Elbow(input) => elbow::calculate(input, material, settings),
            ShapeInput::Offset(input) => offset::calculate(input, material),
            ShapeInput::PipeBranch(input) => pipe_branch::calculate(input, settings),
            ShapeInput::Arc(input) => arc::calculate(input),
            ShapeInput::Bracket(input) => bracket::calculate(input, material, settings),
            ShapeInput::Bolts(input) => bolts::calculate(input, settings),
            ShapeInput::Stairs(input) => stairs::calculate(input, material, settings),
            ShapeInput::Plate(input) => plate::calculate(input, material),
            ShapeInput::Volumes(input) => volumes::calculate(input),
        }
    }
}

/// A material selection plus one shape's dimensions.
///
/// ## JSON Example
///
/// ```json
/// {
///   "material": "stainless",
///   "shape": "elbow",
///   "diameter_mm": 300.0,
///   "bend_radius_mm": 450.0,
///   "segments": 4
/// }
/// ```
///
/// When `material` is omitted the settings' default material is used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<Material>,
    #[serde(flatten)]
    pub shape: ShapeInput,
}

impl CalculationRequest {
    pub fn new(material: Material, shape: ShapeInput) -> Self {
        CalculationRequest {
            material: Some(material),
            shape,
        }
    }

    /// Parse a request from JSON.
    pub fn from_json(json: &str) -> CalcResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Material in effect for this request
    pub fn material_or_default(&self, settings: &FabricationSettings) -> Material {
        self.material.unwrap_or(settings.default_material)
    }

    /// Run the calculator, propagating hard errors.
    pub fn calculate(&self, settings: &FabricationSettings) -> CalcResult<CalculationResult> {
        settings.validate()?;
        let material = self.material_or_default(settings);
        debug!(shape = %self.shape.kind(), material = %material, "dispatching calculation");
        self.shape.calculate(material, settings)
    }

    /// Run the calculator and fold hard errors into an error result.
    pub fn evaluate(&self, settings: &FabricationSettings) -> CalculationResult {
        match self.calculate(settings) {
            Ok(result) => result,
            Err(err) => {
                warn!(shape = %self.shape.kind(), code = err.error_code(), %err, "calculation failed");
                CalculationResult::failure(&err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_request_json() {
        let json = r#"{ "material": "aluminum", "shape": "plate",
                        "width_mm": 1000, "length_mm": 1000, "thickness_mm": 2 }"#;
        let request = CalculationRequest::from_json(json).unwrap();
        assert_eq!(request.material, Some(Material::Aluminum));
        assert_eq!(request.shape.kind(), ShapeKind::Plate);

        let r = request.calculate(&FabricationSettings::default()).unwrap();
        assert!((r.number("weight_kg").unwrap() - 5.4).abs() < 1e-12);
    }

    #[test]
    fn test_material_defaults_from_settings() {
        let json = r#"{ "shape": "plate", "width_mm": 1000, "length_mm": 1000, "thickness_mm": 1 }"#;
        let request = CalculationRequest::from_json(json).unwrap();
        assert_eq!(request.material, None);

        let settings = FabricationSettings {
            default_material: Material::Copper,
            ..FabricationSettings::default()
        };
        let r = request.calculate(&settings).unwrap();
        assert!((r.number("weight_kg").unwrap() - 8.96).abs() < 1e-12);
    }

    #[test]
    fn test_nested_tags() {
        let json = r#"{ "shape": "arc", "mode": "by_chord_and_sagitta", "chord_mm": 1000, "sagitta_mm": 100 }"#;
        let request = CalculationRequest::from_json(json).unwrap();
        assert_eq!(request.shape.kind(), ShapeKind::Arc);

        let json = r#"{ "shape": "volumes", "sub_shape": "box", "width_mm": 100, "length_mm": 100, "height_mm": 100 }"#;
        let r = CalculationRequest::from_json(json)
            .unwrap()
            .calculate(&FabricationSettings::default())
            .unwrap();
        assert_eq!(r.number("volume_l"), Some(1.0));
    }

    #[test]
    fn test_unknown_shape_is_serialization_error() {
        let err = CalculationRequest::from_json(r#"{ "shape": "hexagon" }"#).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_evaluate_folds_errors() {
        let request = CalculationRequest::new(
            Material::Steel,
            ShapeInput::Bolts(BoltsInput {
                size: "M13".to_string(),
                ..BoltsInput::default()
            }),
        );
        assert!(request.calculate(&FabricationSettings::default()).is_err());

        let r = request.evaluate(&FabricationSettings::default());
        assert!(r.metric_value("Error").unwrap().contains("M13"));
        assert!(r.steps.is_empty());
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let request = CalculationRequest::new(Material::Steel, ShapeInput::Plate(PlateInput::default()));
        let settings = FabricationSettings {
            development_divisions: 0,
            ..FabricationSettings::default()
        };
        assert_eq!(request.calculate(&settings).unwrap_err().error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_every_kind_dispatches() {
        // Arc needs its mode tag; bolts are complete with defaults
        let dimensioned = ShapeKind::ALL
            .into_iter()
            .filter(|k| !matches!(k, ShapeKind::Arc | ShapeKind::Bolts));

        for kind in dimensioned {
            let json = format!(r#"{{ "shape": "{}" }}"#, kind.id());
            let request = CalculationRequest::from_json(&json).unwrap();
            assert_eq!(request.shape.kind(), kind);
            let r = request.calculate(&FabricationSettings::default()).unwrap();
            assert!(r.is_empty(), "{} produced output without dimensions", kind);
        }
    }
}
