//! Metric Fastener Tables (ISO coarse thread)
//!
//! Tensile stress areas and pitches per ISO 898-1 / ISO 724 for the coarse
//! series M6-M36, and minimum yield/tensile strengths per property class.
//!
//! Lookups are strict: an unknown designation is a
//! [`CalcError::FastenerNotFound`], never a substitute.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Thread data for one nominal size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FastenerData {
    /// Nominal (major) diameter in mm
    pub nominal_diameter_mm: f64,
    /// Coarse thread pitch in mm
    pub pitch_mm: f64,
    /// Tensile stress area As in mm²
    pub stress_area_mm2: f64,
}

/// Strength data for one property class
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoltClassData {
    /// Minimum yield strength (MPa)
    pub yield_mpa: f64,
    /// Minimum tensile strength (MPa)
    pub tensile_mpa: f64,
}

/// Sizes in ascending order, for listings
pub const FASTENER_SIZE_DESIGNATIONS: [&str; 9] =
    ["M6", "M8", "M10", "M12", "M16", "M20", "M24", "M30", "M36"];

/// Property classes in ascending strength, for listings
pub const BOLT_CLASS_DESIGNATIONS: [&str; 5] = ["4.6", "5.8", "8.8", "10.9", "12.9"];

const fn size(nominal_diameter_mm: f64, pitch_mm: f64, stress_area_mm2: f64) -> FastenerData {
    FastenerData {
        nominal_diameter_mm,
        pitch_mm,
        stress_area_mm2,
    }
}

static FASTENER_SIZES: Lazy<BTreeMap<&'static str, FastenerData>> = Lazy::new(|| {
    BTreeMap::from([
        ("M6", size(6.0, 1.0, 20.1)),
        ("M8", size(8.0, 1.25, 36.6)),
        ("M10", size(10.0, 1.5, 58.0)),
        ("M12", size(12.0, 1.75, 84.3)),
        ("M16", size(16.0, 2.0, 157.0)),
        ("M20", size(20.0, 2.5, 245.0)),
        ("M24", size(24.0, 3.0, 353.0)),
        ("M30", size(30.0, 3.5, 561.0)),
        ("M36", size(36.0, 4.0, 817.0)),
    ])
});

static BOLT_CLASSES: Lazy<BTreeMap<&'static str, BoltClassData>> = Lazy::new(|| {
    BTreeMap::from([
        ("4.6", BoltClassData { yield_mpa: 240.0, tensile_mpa: 400.0 }),
        ("5.8", BoltClassData { yield_mpa: 400.0, tensile_mpa: 500.0 }),
        ("8.8", BoltClassData { yield_mpa: 640.0, tensile_mpa: 800.0 }),
        ("10.9", BoltClassData { yield_mpa: 900.0, tensile_mpa: 1000.0 }),
        ("12.9", BoltClassData { yield_mpa: 1100.0, tensile_mpa: 1200.0 }),
    ])
});

/// Look up thread data for a size such as `"M12"` (case-insensitive).
pub fn fastener_size(designation: &str) -> CalcResult<&'static FastenerData> {
    let key = designation.trim().to_uppercase();
    FASTENER_SIZES
        .get(key.as_str())
        .ok_or_else(|| CalcError::fastener_not_found(format!("size '{}'", designation)))
}

/// Look up strength data for a property class such as `"8.8"`.
pub fn bolt_class(designation: &str) -> CalcResult<&'static BoltClassData> {
    BOLT_CLASSES
        .get(designation.trim())
        .ok_or_else(|| CalcError::fastener_not_found(format!("class '{}'", designation)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_lookup() {
        let m12 = fastener_size("M12").unwrap();
        assert_eq!(m12.stress_area_mm2, 84.3);
        assert_eq!(m12.pitch_mm, 1.75);
        assert_eq!(fastener_size("m20").unwrap().nominal_diameter_mm, 20.0);
    }

    #[test]
    fn test_class_lookup() {
        let c = bolt_class("10.9").unwrap();
        assert_eq!(c.yield_mpa, 900.0);
        assert_eq!(c.tensile_mpa, 1000.0);
    }

    #[test]
    fn test_unknown_designations_are_errors() {
        assert_eq!(fastener_size("M13").unwrap_err().error_code(), "FASTENER_NOT_FOUND");
        assert!(bolt_class("9.9").is_err());
    }

    #[test]
    fn test_listings_match_tables() {
        for d in FASTENER_SIZE_DESIGNATIONS {
            assert!(fastener_size(d).is_ok());
        }
        for c in BOLT_CLASS_DESIGNATIONS {
            assert!(bolt_class(c).is_ok());
        }
    }
}
