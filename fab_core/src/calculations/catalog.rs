//! # Shape Catalogue
//!
//! Short descriptions of each shape family for listings and help screens.

use serde::{Deserialize, Serialize};

/// Every shape family the dispatcher knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Cylinder,
    Cone,
    SquareToRound,
    Elbow,
    Offset,
    PipeBranch,
    Arc,
    Bracket,
    Bolts,
    Stairs,
    Plate,
    Volumes,
}

/// Descriptive entry for one shape family
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShapeInfo {
    pub title: &'static str,
    pub description: &'static str,
    pub application: &'static str,
    pub key_params: &'static [&'static str],
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 12] = [
        ShapeKind::Cylinder,
        ShapeKind::Cone,
        ShapeKind::SquareToRound,
        ShapeKind::Elbow,
        ShapeKind::Offset,
        ShapeKind::PipeBranch,
        ShapeKind::Arc,
        ShapeKind::Bracket,
        ShapeKind::Bolts,
        ShapeKind::Stairs,
        ShapeKind::Plate,
        ShapeKind::Volumes,
    ];

    /// Tag used in requests (`"shape": "..."`)
    pub fn id(&self) -> &'static str {
        match self {
            ShapeKind::Cylinder => "cylinder",
            ShapeKind::Cone => "cone",
            ShapeKind::SquareToRound => "square_to_round",
            ShapeKind::Elbow => "elbow",
            ShapeKind::Offset => "offset",
            ShapeKind::PipeBranch => "pipe_branch",
            ShapeKind::Arc => "arc",
            ShapeKind::Bracket => "bracket",
            ShapeKind::Bolts => "bolts",
            ShapeKind::Stairs => "stairs",
            ShapeKind::Plate => "plate",
            ShapeKind::Volumes => "volumes",
        }
    }

    /// Whether the calculator's output depends on the selected material
    pub fn uses_material(&self) -> bool {
        !matches!(
            self,
            ShapeKind::PipeBranch | ShapeKind::Arc | ShapeKind::Bolts | ShapeKind::Volumes
        )
    }

    pub fn info(&self) -> ShapeInfo {
        match self {
            ShapeKind::Cylinder => ShapeInfo {
                title: "Cylindrical Tank",
                description: "Straight tubular shell with parallel circular ends. The most common shape in plate work: easy to roll and good under pressure.",
                application: "Liquid and gas storage, pressure vessels, industrial ducting and silos.",
                key_params: &["Internal diameter", "Height", "Plate thickness"],
            },
            ShapeKind::Cone => ShapeInfo {
                title: "Cone / Frustum",
                description: "Shell that tapers from a circular base towards an apex, or to a smaller circle when truncated.",
                application: "Hoppers, pipe reducers, grain silos and cyclone separators.",
                key_params: &["Larger diameter", "Smaller diameter", "Vertical height"],
            },
            ShapeKind::SquareToRound => ShapeInfo {
                title: "Square to Round",
                description: "Transition piece joining a square cross-section to a circular one.",
                application: "Ventilation ducts, fan connections and hoppers.",
                key_params: &["Base side", "Top diameter", "Height"],
            },
            ShapeKind::Elbow => ShapeInfo {
                title: "Segmented Elbow",
                description: "Pipe bend built from several mitred cuts (segments) of straight cylinder.",
                application: "Changes of direction in large-diameter piping where formed bends are not available.",
                key_params: &["Diameter", "Bend radius", "Angle", "Number of segments"],
            },
            ShapeKind::Offset => ShapeInfo {
                title: "Pipe Offset",
                description: "Diagonal piece connecting two parallel, misaligned pipes.",
                application: "Routing around obstacles in water, steam or gas lines.",
                key_params: &["Set", "Run", "Diameter"],
            },
            ShapeKind::PipeBranch => ShapeInfo {
                title: "Pipe Branch (Saddle)",
                description: "Cut template for a branch pipe meeting a header at an angle.",
                application: "Tees, laterals and nozzles on pipes and vessels.",
                key_params: &["Header diameter", "Branch diameter", "Angle"],
            },
            ShapeKind::Arc => ShapeInfo {
                title: "Arc / Rolling",
                description: "Radius, opening angle and developed length of a rolled arc.",
                application: "Setting up plate rolls and checking rolled parts against a template.",
                key_params: &["Chord", "Sagitta or radius"],
            },
            ShapeKind::Bracket => ShapeInfo {
                title: "Wall Bracket",
                description: "Triangular support for shelves and benches, or to stiffen structures.",
                application: "Load supports, structural bracing and bench building.",
                key_params: &["Height", "Base", "Applied load", "Profile"],
            },
            ShapeKind::Bolts => ShapeInfo {
                title: "Bolt Strength",
                description: "Load capacity and tightening torque of structural bolts by property class.",
                application: "Flanged joints, machine mounting and steel structures.",
                key_params: &["Size", "Class", "Quantity", "Load"],
            },
            ShapeKind::Stairs => ShapeInfo {
                title: "Industrial Stair",
                description: "Layout of a straight stair: treads, risers and stringers.",
                application: "Access to platforms, mezzanines and upper levels in plants.",
                key_params: &["Total height", "Available base", "Width"],
            },
            ShapeKind::Plate => ShapeInfo {
                title: "Plate Weight",
                description: "Weight of flat plates in different materials.",
                application: "Quotes, transport planning and structural sizing.",
                key_params: &["Width", "Length", "Thickness", "Material"],
            },
            ShapeKind::Volumes => ShapeInfo {
                title: "Volumes and Areas",
                description: "Quick capacity and surface area of basic solids.",
                application: "Painting and lining estimates, storage capacity.",
                key_params: &["Solid type", "Dimensions"],
            },
        }
    }
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_match_serde_tags() {
        for kind in ShapeKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.id()));
        }
    }

    #[test]
    fn test_every_shape_has_info() {
        for kind in ShapeKind::ALL {
            let info = kind.info();
            assert!(!info.title.is_empty());
            assert!(!info.key_params.is_empty());
        }
    }
}
