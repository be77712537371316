//! # Guarded Geometry Helpers
//!
//! Small trigonometric building blocks shared by the calculators. `asin`
//! clamps its argument into `[-1, 1]` so that floating-point
//! overshoot near 0° or 180° never produces `NaN`.

/// `asin` with the argument clamped into its domain.
pub fn clamped_asin(x: f64) -> f64 {
    x.clamp(-1.0, 1.0).asin()
}

/// Square root that treats tiny negative rounding residue as zero.
pub fn safe_sqrt(x: f64) -> f64 {
    x.max(0.0).sqrt()
}

/// Sagitta of the minor arc of a circle of `radius` subtending `chord`.
///
/// `s = R - √(R² - (c/2)²)`. Returns `None` when the chord is longer than the
/// diameter.
pub fn sagitta(radius: f64, chord: f64) -> Option<f64> {
    let half = chord / 2.0;
    if half > radius {
        return None;
    }
    Some(radius - safe_sqrt(radius * radius - half * half))
}

/// Radius of the circle through a chord with the given rise.
///
/// `R = c²/(8h) + h/2`
pub fn radius_from_chord_sagitta(chord: f64, sagitta: f64) -> f64 {
    chord * chord / (8.0 * sagitta) + sagitta / 2.0
}

/// Chord spanning `angle_deg` on a circle of `radius`.
pub fn chord_for_angle(radius: f64, angle_deg: f64) -> f64 {
    2.0 * radius * (angle_deg.to_radians() / 2.0).sin()
}

/// Sagitta for an arc of `angle_deg` on a circle of `radius`, including major
/// arcs (> 180°) where the rise exceeds the radius.
pub fn sagitta_for_angle(radius: f64, angle_deg: f64) -> f64 {
    let chord = chord_for_angle(radius, angle_deg);
    let minor = sagitta(radius, chord).unwrap_or(radius);
    if angle_deg > 180.0 {
        2.0 * radius - minor
    } else {
        minor
    }
}
