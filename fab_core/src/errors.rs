//! # Error Types
//!
//! Structured error types for fab_core. Calculators distinguish three tiers
//! of trouble:
//!
//! 1. **Insufficient input** - a required dimension is missing, zero or
//!    negative. Calculators never surface this as an `Err`; they return
//!    [`CalculationResult::empty`](crate::calculations::CalculationResult::empty)
//!    instead. The variant exists so that `validate()` can say *which* field
//!    is missing.
//! 2. **Invalid lookup** - an unknown fastener size or property class.
//! 3. **Impossible geometry** - inputs that are all present but describe
//!    something that cannot be built (a radius shorter than half its chord).
//!
//! ## Example
//!
//! ```rust
//! use fab_core::errors::{CalcError, CalcResult};
//!
//! fn validate_diameter(diameter_mm: f64) -> CalcResult<()> {
//!     if diameter_mm <= 0.0 {
//!         return Err(CalcError::insufficient_input("diameter_mm", "Diameter must be positive"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_diameter(0.0).unwrap_err().is_insufficient_input());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for fab_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// A required dimension is missing or not positive
    #[error("Insufficient input for '{field}': {reason}")]
    InsufficientInput { field: String, reason: String },

    /// An input value is present but not acceptable
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Fastener size or property class not found in the tables
    #[error("Fastener data not found: {designation}")]
    FastenerNotFound { designation: String },

    /// The inputs describe a part that cannot exist
    #[error("Impossible geometry in {calculation_type}: {reason}")]
    ImpossibleGeometry {
        calculation_type: String,
        reason: String,
    },

    /// Malformed JSON request
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an InsufficientInput error
    pub fn insufficient_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InsufficientInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a FastenerNotFound error
    pub fn fastener_not_found(designation: impl Into<String>) -> Self {
        CalcError::FastenerNotFound {
            designation: designation.into(),
        }
    }

    /// Create an ImpossibleGeometry error
    pub fn impossible_geometry(calculation_type: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::ImpossibleGeometry {
            calculation_type: calculation_type.into(),
            reason: reason.into(),
        }
    }

    /// True for the "user is still filling in the form" tier
    pub fn is_insufficient_input(&self) -> bool {
        matches!(self, CalcError::InsufficientInput { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InsufficientInput { .. } => "INSUFFICIENT_INPUT",
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::FastenerNotFound { .. } => "FASTENER_NOT_FOUND",
            CalcError::ImpossibleGeometry { .. } => "IMPOSSIBLE_GEOMETRY",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: err.to_string(),
        }
    }
}

/// Shorthand used by every `validate()`: require a strictly positive dimension.
pub(crate) fn require_positive(field: &str, value: f64) -> CalcResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(CalcError::insufficient_input(field, "must be a positive number"))
    }
}

/// Require a dimension that may be zero but not negative.
pub(crate) fn require_non_negative(field: &str, value: f64) -> CalcResult<()> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(CalcError::insufficient_input(field, "cannot be negative"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::impossible_geometry("arc", "radius is shorter than half the chord");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
        assert!(json.contains("ImpossibleGeometry"));
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::insufficient_input("d", "x").error_code(), "INSUFFICIENT_INPUT");
        assert_eq!(CalcError::fastener_not_found("M13").error_code(), "FASTENER_NOT_FOUND");
        assert!(!CalcError::fastener_not_found("M13").is_insufficient_input());
    }

    #[test]
    fn test_require_positive() {
        assert!(require_positive("height_mm", 10.0).is_ok());
        assert!(require_positive("height_mm", 0.0).unwrap_err().is_insufficient_input());
        assert!(require_positive("height_mm", -3.0).is_err());
        assert!(require_positive("height_mm", f64::NAN).is_err());
        assert!(require_non_negative("thickness_mm", 0.0).is_ok());
        assert!(require_non_negative("thickness_mm", -1.0).is_err());
    }
}
