//! # Calculation Result
//!
//! The common output contract of every calculator.
//!
//! - `metrics` - ordered, human-readable, unit-annotated values for display
//! - `steps` - ordered fabrication instructions
//! - `calculated` - raw numeric/geometric payload for the drawing
//!   collaborator; never rounded or formatted
//! - `theory` - optional short explanations of the method
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "metrics": [{ "label": "Blank width", "value": "3157.3 mm" }],
//!   "steps": ["LAYOUT: ..."],
//!   "calculated": { "blank_width_mm": 3157.3006, "height_mm": 2000.0 }
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{CalcError, CalcResult};

/// One labelled display value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub label: String,
    pub value: String,
}

/// One sample of a development curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Angular position around the pipe, 0-360°
    pub angle_deg: f64,
    /// Ordinate measured from the development baseline (mm)
    pub height_mm: f64,
}

/// A short titled explanation of the method behind a result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TheoryNote {
    pub title: String,
    pub content: String,
}

impl TheoryNote {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        TheoryNote {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Raw payload value. Serializes without a tag (a number stays a number).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CalculatedValue {
    Number(f64),
    Flag(bool),
    Text(String),
    Series(Vec<f64>),
    Curve(Vec<CurvePoint>),
}

impl From<f64> for CalculatedValue {
    fn from(v: f64) -> Self {
        CalculatedValue::Number(v)
    }
}

impl From<usize> for CalculatedValue {
    fn from(v: usize) -> Self {
        CalculatedValue::Number(v as f64)
    }
}

impl From<bool> for CalculatedValue {
    fn from(v: bool) -> Self {
        CalculatedValue::Flag(v)
    }
}

impl From<String> for CalculatedValue {
    fn from(v: String) -> Self {
        CalculatedValue::Text(v)
    }
}

impl From<&str> for CalculatedValue {
    fn from(v: &str) -> Self {
        CalculatedValue::Text(v.to_string())
    }
}

impl From<Vec<f64>> for CalculatedValue {
    fn from(v: Vec<f64>) -> Self {
        CalculatedValue::Series(v)
    }
}

impl From<Vec<CurvePoint>> for CalculatedValue {
    fn from(v: Vec<CurvePoint>) -> Self {
        CalculatedValue::Curve(v)
    }
}

/// Output of a calculator. Created fresh on every call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub metrics: Vec<Metric>,
    pub steps: Vec<String>,
    pub calculated: BTreeMap<String, CalculatedValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theory: Option<Vec<TheoryNote>>,
}

impl CalculationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// The "insufficient input" result: nothing to show yet.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A result that carries a hard error as its only metric.
    pub fn failure(err: &CalcError) -> Self {
        let mut result = Self::new();
        result.metric("Error", err.to_string());
        result.set("error_code", err.error_code());
        result
    }

    /// True when there is nothing to display
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty() && self.steps.is_empty()
    }

    /// Append a display metric
    pub fn metric(&mut self, label: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.metrics.push(Metric {
            label: label.into(),
            value: value.into(),
        });
        self
    }

    /// Append a fabrication step
    pub fn step(&mut self, text: impl Into<String>) -> &mut Self {
        self.steps.push(text.into());
        self
    }

    /// Store a raw payload value
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<CalculatedValue>) -> &mut Self {
        self.calculated.insert(key.into(), value.into());
        self
    }

    /// Attach a theory note
    pub fn theory_note(&mut self, note: TheoryNote) -> &mut Self {
        self.theory.get_or_insert_with(Vec::new).push(note);
        self
    }

    /// Display value for a metric label
    pub fn metric_value(&self, label: &str) -> Option<&str> {
        self.metrics
            .iter()
            .find(|m| m.label == label)
            .map(|m| m.value.as_str())
    }

    /// Numeric payload value
    pub fn number(&self, key: &str) -> Option<f64> {
        match self.calculated.get(key) {
            Some(CalculatedValue::Number(v)) => Some(*v),
            _ => None,
        }
    }

    /// Boolean payload value
    pub fn flag(&self, key: &str) -> Option<bool> {
        match self.calculated.get(key) {
            Some(CalculatedValue::Flag(v)) => Some(*v),
            _ => None,
        }
    }

    /// Text payload value
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.calculated.get(key) {
            Some(CalculatedValue::Text(v)) => Some(v.as_str()),
            _ => None,
        }
    }

    /// Numeric series payload value
    pub fn series(&self, key: &str) -> Option<&[f64]> {
        match self.calculated.get(key) {
            Some(CalculatedValue::Series(v)) => Some(v.as_slice()),
            _ => None,
        }
    }

    /// Sampled curve payload value
    pub fn curve(&self, key: &str) -> Option<&[CurvePoint]> {
        match self.calculated.get(key) {
            Some(CalculatedValue::Curve(v)) => Some(v.as_slice()),
            _ => None,
        }
    }
}

/// Run an input's validation and turn the insufficient-input tier into an
/// empty result. Other errors propagate.
///
/// Returns `Ok(Some(empty))` when the caller should stop and return it.
pub(crate) fn precheck(
    calculation_type: &'static str,
    validation: CalcResult<()>,
) -> CalcResult<Option<CalculationResult>> {
    match validation {
        Ok(()) => Ok(None),
        Err(err) if err.is_insufficient_input() => {
            debug!(calculation = calculation_type, %err, "input incomplete, returning empty result");
            Ok(Some(CalculationResult::empty()))
        }
        Err(err) => Err(err),
    }
}
