//! # Bolted Joint
//!
//! Tension capacity of a group of identical metric bolts and the tightening
//! torque for a dry joint.
//!
//! ```text
//! per-bolt yield load   = As · fy / 1000          (kN)
//! group capacity        = yield load · count
//! utilization           = 100 · applied / capacity
//! torque                = K · d · F_preload       (N·m)
//! ```
//!
//! `K` (nut factor) and the preload ratio come from [`BoltSettings`].
//!
//! [`BoltSettings`]: crate::settings::BoltSettings

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::result::{precheck, CalculationResult};
use crate::errors::{require_non_negative, CalcError, CalcResult};
use crate::materials::{bolt_class, fastener_size};
use crate::settings::FabricationSettings;
use crate::units::{KiloNewtons, KilogramForce, Megapascals, SquareMillimeters};

/// Utilization above which a joint is flagged, in percent
pub const ALERT_UTILIZATION_PCT: f64 = 80.0;

/// Input parameters for a bolted joint.
///
/// ## JSON Example
///
/// ```json
/// { "size": "M12", "class": "8.8", "count": 4, "load_kg": 2000.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoltsInput {
    /// Nominal size, e.g. "M12"
    pub size: String,
    /// Property class, e.g. "8.8"
    pub class: String,
    /// Number of bolts sharing the load
    pub count: u32,
    /// Total tension load on the group (kg)
    pub load_kg: f64,
}

impl Default for BoltsInput {
    fn default() -> Self {
        BoltsInput {
            size: "M12".to_string(),
            class: "8.8".to_string(),
            count: 1,
            load_kg: 0.0,
        }
    }
}

impl BoltsInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if self.count == 0 {
            return Err(CalcError::insufficient_input("count", "at least one bolt is needed"));
        }
        require_non_negative("load_kg", self.load_kg)?;
        Ok(())
    }
}

/// Status of a bolt group under load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JointStatus {
    /// No load applied
    Unloaded,
    /// Below 80 %
    Safe,
    /// 80 % to 100 % inclusive
    Alert,
    /// Above 100 %
    Overload,
}

impl JointStatus {
    /// Classify a utilization percentage of a loaded joint.
    pub fn from_utilization(pct: f64) -> Self {
        if pct > 100.0 {
            JointStatus::Overload
        } else if pct >= ALERT_UTILIZATION_PCT {
            JointStatus::Alert
        } else {
            JointStatus::Safe
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            JointStatus::Unloaded => "N/A",
            JointStatus::Safe => "Safe",
            JointStatus::Alert => "Alert (high utilization)",
            JointStatus::Overload => "Overload (danger)",
        }
    }
}

/// Calculate a bolted joint.
pub fn calculate(input: &BoltsInput, settings: &FabricationSettings) -> CalcResult<CalculationResult> {
    settings.validate()?;
    if let Some(empty) = precheck("bolts", input.validate())? {
        return Ok(empty);
    }

    let size = fastener_size(&input.size)?;
    let class = bolt_class(&input.class)?;
    let count = input.count as f64;

    let area = SquareMillimeters(size.stress_area_mm2);
    let yield_load: KiloNewtons = Megapascals(class.yield_mpa).force_on(area).into();
    let tensile_load: KiloNewtons = Megapascals(class.tensile_mpa).force_on(area).into();
    let capacity = yield_load * count;

    let applied: KiloNewtons = KilogramForce(input.load_kg).to_newtons(settings.gravity).into();
    let (utilization, status) = if applied.0 > 0.0 {
        let pct = 100.0 * applied.0 / capacity.0;
        (pct, JointStatus::from_utilization(pct))
    } else {
        (0.0, JointStatus::Unloaded)
    };

    let preload = yield_load * settings.bolts.preload_ratio;
    let torque_nm = settings.bolts.nut_factor * (size.nominal_diameter_mm / 1000.0) * preload.0 * 1000.0;

    if status == JointStatus::Overload {
        warn!(utilization, size = %input.size, class = %input.class, "bolt group overloaded");
    }
    debug!(capacity_kn = capacity.0, utilization, torque_nm, "bolted joint calculated");

    let designation = input.size.trim().to_uppercase();
    let class_name = input.class.trim();

    let mut result = CalculationResult::new();
    result
        .metric("Size", format!("{} (pitch {} mm)", designation, size.pitch_mm))
        .metric("Stress area", format!("{} mm²", size.stress_area_mm2))
        .metric("Class", class_name)
        .metric("Bolt count", input.count.to_string())
        .metric("Working load", format!("{:.2} kN/bolt", applied.0 / count))
        .metric("Group capacity (yield)", format!("{:.1} kN", capacity.0))
        .metric("Utilization", format!("{:.1}%", utilization))
        .metric("Status", status.label())
        .metric("Recommended torque (dry)", format!("{:.1} N·m", torque_nm));

    result
        .step(format!(
            "IDENTIFICATION: {} bolt, class {} ({} pieces).",
            designation, class_name, input.count
        ))
        .step(format!(
            "STRENGTH: Each bolt carries {:.1} kN at yield and {:.1} kN at rupture.",
            yield_load.0, tensile_load.0
        ))
        .step(format!(
            "CAPACITY: The group carries up to {:.1} kN (yield).",
            capacity.0
        ))
        .step(format!(
            "ANALYSIS: Applied load {:.2} kN. Utilization {:.1}%. Status: {}.",
            applied.0,
            utilization,
            status.label()
        ))
        .step(format!(
            "ASSEMBLY: Tighten to {:.1} N·m (dry) to reach the correct preload.",
            torque_nm
        ));

    result
        .set("size", designation.as_str())
        .set("class", class_name)
        .set("pitch_mm", size.pitch_mm)
        .set("diameter_mm", size.nominal_diameter_mm)
        .set("stress_area_mm2", size.stress_area_mm2)
        .set("count", input.count as usize)
        .set("yield_load_kn", yield_load.0)
        .set("tensile_load_kn", tensile_load.0)
        .set("capacity_kn", capacity.0)
        .set("applied_kn", applied.0)
        .set("utilization_pct", utilization)
        .set("status", status.label())
        .set("preload_kn", preload.0)
        .set("torque_nm", torque_nm);

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joint() -> BoltsInput {
        BoltsInput {
            size: "M12".to_string(),
            class: "8.8".to_string(),
            count: 4,
            load_kg: 2000.0,
        }
    }

    fn run(input: &BoltsInput) -> CalcResult<CalculationResult> {
        calculate(input, &FabricationSettings::default())
    }

    #[test]
    fn test_status_thresholds() {
        assert_eq!(JointStatus::from_utilization(79.99), JointStatus::Safe);
        assert_eq!(JointStatus::from_utilization(80.0), JointStatus::Alert);
        assert_eq!(JointStatus::from_utilization(100.0), JointStatus::Alert);
        assert_eq!(JointStatus::from_utilization(100.0001), JointStatus::Overload);
    }

    #[test]
    fn test_capacity() {
        let r = run(&joint()).unwrap();
        // 84.3 mm² * 640 MPa = 53.952 kN per bolt
        assert!((r.number("yield_load_kn").unwrap() - 53.952).abs() < 1e-9);
        assert!((r.number("tensile_load_kn").unwrap() - 67.44).abs() < 1e-9);
        assert!((r.number("capacity_kn").unwrap() - 4.0 * 53.952).abs() < 1e-9);
    }

    #[test]
    fn test_utilization() {
        let r = run(&joint()).unwrap();
        let applied = 2000.0 * 9.81 / 1000.0;
        assert!((r.number("applied_kn").unwrap() - applied).abs() < 1e-12);
        let pct = 100.0 * applied / (4.0 * 53.952);
        assert!((r.number("utilization_pct").unwrap() - pct).abs() < 1e-9);
        assert_eq!(r.text("status"), Some("Safe"));
    }

    #[test]
    fn test_torque() {
        let r = run(&joint()).unwrap();
        // 0.2 * 0.012 m * 0.75 * 53952 N
        let expected = 0.2 * 0.012 * 0.75 * 53_952.0;
        assert!((r.number("torque_nm").unwrap() - expected).abs() < 1e-6);
    }

    #[test]
    fn test_overload() {
        let input = BoltsInput { count: 1, load_kg: 10_000.0, ..joint() };
        let r = run(&input).unwrap();
        assert_eq!(r.text("status"), Some("Overload (danger)"));
    }

    #[test]
    fn test_unloaded() {
        let input = BoltsInput { load_kg: 0.0, ..joint() };
        let r = run(&input).unwrap();
        assert_eq!(r.text("status"), Some("N/A"));
        assert_eq!(r.number("utilization_pct"), Some(0.0));
    }

    #[test]
    fn test_unknown_fastener() {
        let input = BoltsInput { size: "M13".to_string(), ..joint() };
        let err = run(&input).unwrap_err();
        assert_eq!(err.error_code(), "FASTENER_NOT_FOUND");

        let input = BoltsInput { class: "9.9".to_string(), ..joint() };
        assert!(matches!(run(&input), Err(CalcError::FastenerNotFound { .. })));
    }

    #[test]
    fn test_zero_count_is_empty() {
        let input = BoltsInput { count: 0, ..joint() };
        assert!(run(&input).unwrap().is_empty());
    }

    #[test]
    fn test_defaults() {
        let input: BoltsInput = serde_json::from_str(r#"{ "load_kg": 100 }"#).unwrap();
        assert_eq!(input.size, "M12");
        assert_eq!(input.class, "8.8");
        assert_eq!(input.count, 1);
    }
}
