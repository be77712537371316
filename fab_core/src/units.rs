//! # Unit Types
//!
//! Type-safe wrappers for the metric units used on the shop floor. These are
//! plain f64 newtypes that serialize as bare numbers.
//!
//! ## Conventions
//!
//! - Length: millimetres (mm) everywhere in inputs and `calculated` payloads
//! - Area: mm² internally, reported in m²
//! - Volume: mm³ internally, reported in litres (1 L = 1 dm³ = 1 000 000 mm³)
//! - Density: kg/dm³ (numerically equal to g/cm³)
//! - Force: kilogram-force for shop loads, newtons/kilonewtons for checks
//! - Stress: megapascals (MPa = N/mm²)
//!
//! ## Example
//!
//! ```rust
//! use fab_core::units::{CubicMillimeters, Liters, SquareMillimeters, SquareMeters};
//!
//! let capacity: Liters = CubicMillimeters(2_000_000.0).into();
//! assert_eq!(capacity.0, 2.0);
//!
//! let area: SquareMeters = SquareMillimeters(1_500_000.0).into();
//! assert_eq!(area.0, 1.5);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// mm³ in one litre (dm³)
pub const MM3_PER_LITER: f64 = 1_000_000.0;

/// mm² in one square metre
pub const MM2_PER_M2: f64 = 1_000_000.0;

// ============================================================================
// Area / Volume
// ============================================================================

/// Area in square millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquareMillimeters(pub f64);

/// Area in square metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquareMeters(pub f64);

impl From<SquareMillimeters> for SquareMeters {
    fn from(mm2: SquareMillimeters) -> Self {
        SquareMeters(mm2.0 / MM2_PER_M2)
    }
}

/// Volume in cubic millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicMillimeters(pub f64);

/// Volume in litres (dm³)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Liters(pub f64);

impl From<CubicMillimeters> for Liters {
    fn from(mm3: CubicMillimeters) -> Self {
        Liters(mm3.0 / MM3_PER_LITER)
    }
}

impl CubicMillimeters {
    /// Mass of this volume of material at `density_kg_dm3`
    pub fn mass(self, density_kg_dm3: f64) -> Kilograms {
        Kilograms(Liters::from(self).0 * density_kg_dm3)
    }
}

// ============================================================================
// Mass / Force / Stress
// ============================================================================

/// Mass in kilograms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilograms(pub f64);

/// Force in kilogram-force (what the shop calls "a load of N kg")
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KilogramForce(pub f64);

/// Force in newtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Newtons(pub f64);

/// Force in kilonewtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KiloNewtons(pub f64);

impl KilogramForce {
    /// Convert to newtons with the configured gravitational acceleration (m/s²)
    pub fn to_newtons(self, gravity: f64) -> Newtons {
        Newtons(self.0 * gravity)
    }
}

impl From<Newtons> for KiloNewtons {
    fn from(n: Newtons) -> Self {
        KiloNewtons(n.0 / 1000.0)
    }
}

impl From<KiloNewtons> for Newtons {
    fn from(kn: KiloNewtons) -> Self {
        Newtons(kn.0 * 1000.0)
    }
}

/// Stress in megapascals (N/mm²)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Megapascals(pub f64);

impl Megapascals {
    /// Force carried by `area` at this stress
    pub fn force_on(self, area: SquareMillimeters) -> Newtons {
        Newtons(self.0 * area.0)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }
    };
}

impl_arithmetic!(SquareMillimeters);
impl_arithmetic!(SquareMeters);
impl_arithmetic!(CubicMillimeters);
impl_arithmetic!(Liters);
impl_arithmetic!(Kilograms);
impl_arithmetic!(KilogramForce);
impl_arithmetic!(Newtons);
impl_arithmetic!(KiloNewtons);
impl_arithmetic!(Megapascals);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_to_liters() {
        let v = CubicMillimeters(3_500_000.0);
        let l: Liters = v.into();
        assert_eq!(l.0, 3.5);
    }

    #[test]
    fn test_mass_from_volume() {
        // 1 dm³ of steel
        let mass = CubicMillimeters(MM3_PER_LITER).mass(7.85);
        assert!((mass.0 - 7.85).abs() < 1e-12);
    }

    #[test]
    fn test_force_conversions() {
        let n = KilogramForce(100.0).to_newtons(9.81);
        assert!((n.0 - 981.0).abs() < 1e-9);
        let kn: KiloNewtons = n.into();
        assert!((kn.0 - 0.981).abs() < 1e-12);
        assert_eq!(Megapascals(250.0).force_on(SquareMillimeters(10.0)).0, 2500.0);
    }

    #[test]
    fn test_arithmetic() {
        let a = SquareMillimeters(10.0);
        let b = SquareMillimeters(5.0);
        assert_eq!((a + b).0, 15.0);
        assert_eq!((a - b).0, 5.0);
        assert_eq!((a * 2.0).0, 20.0);
        assert_eq!((a / 2.0).0, 5.0);
    }

    #[test]
    fn test_area_to_square_meters() {
        let m2: SquareMeters = SquareMillimeters(2.5 * MM2_PER_M2).into();
        assert_eq!(m2.0, 2.5);
    }

    #[test]
    fn test_serialization() {
        let kg = Kilograms(12.5);
        let json = serde_json::to_string(&kg).unwrap();
        assert_eq!(json, "12.5");

        let roundtrip: Kilograms = serde_json::from_str(&json).unwrap();
        assert_eq!(kg, roundtrip);
    }
}
