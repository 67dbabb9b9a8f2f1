//! Formatting of canonical feet values for display.
//!
//! Imperial values are shown as feet and inches, rounded to the nearest quarter inch, e.g. `8' 5 1/2"`.
//! Metric values are shown as metres and centimetres, to one decimal place, e.g. `2m 15.9cm`.

use crate::distance::Distance;
use crate::unit_system::{CM_PER_FOOT, CM_PER_METRE, INCHES_PER_FOOT, UnitSystem};

/// Shown in place of a distance that was not provided
pub const PLACEHOLDER: &str = "—";

/// Format an optional distance in the given unit system, absent values are shown as [`PLACEHOLDER`].
pub fn format_distance(value: Option<Distance>, unit_system: UnitSystem) -> String {
    format_feet(value.map(|distance| distance.feet()), unit_system)
}

/// Format an optional raw feet value in the given unit system.
///
/// Absent, negative and non-finite values are shown as [`PLACEHOLDER`].
pub fn format_feet(value: Option<f64>, unit_system: UnitSystem) -> String {
    match value {
        Some(feet) if feet.is_finite() && feet >= 0.0 => match unit_system {
            UnitSystem::Imperial => feet_to_fraction(feet),
            UnitSystem::Metric => cm_to_metres(feet * CM_PER_FOOT),
        },
        _ => PLACEHOLDER.to_string(),
    }
}

/// Format decimal feet as feet and inches, rounded to the nearest quarter inch.
///
/// Examples: `1/4"`, `5"`, `5 1/2"`, `8'`, `8' 1/2"`, `8' 5 1/2"`.
pub fn feet_to_fraction(decimal_feet: f64) -> String {
    if !decimal_feet.is_finite() {
        return PLACEHOLDER.to_string();
    }

    let total_inches = decimal_feet * INCHES_PER_FOOT;
    let rounded_quarters = (total_inches * 4.0).round();
    let rounded_inches = rounded_quarters / 4.0;

    let feet = (rounded_inches / INCHES_PER_FOOT).floor();
    let remaining_inches = rounded_inches - feet * INCHES_PER_FOOT;

    let whole_inches = remaining_inches.floor();
    let quarters = ((remaining_inches - whole_inches) * 4.0).round() as i64;

    let fraction = match quarters {
        1 => Some("1/4"),
        2 => Some("1/2"),
        3 => Some("3/4"),
        _ => None,
    };

    let feet = feet as i64;
    let whole_inches = whole_inches as i64;

    match (feet, whole_inches, fraction) {
        (0, 0, Some(fraction)) => format!("{}\"", fraction),
        (0, inches, None) => format!("{}\"", inches),
        (0, inches, Some(fraction)) => format!("{} {}\"", inches, fraction),
        (feet, 0, None) => format!("{}'", feet),
        (feet, 0, Some(fraction)) => format!("{}' {}\"", feet, fraction),
        (feet, inches, None) => format!("{}' {}\"", feet, inches),
        (feet, inches, Some(fraction)) => format!("{}' {} {}\"", feet, inches, fraction),
    }
}

/// Format centimetres as metres and centimetres, e.g. `45.5cm`, `2m`, `2m 15.9cm`.
///
/// The value is rounded to a tenth of a centimetre before being split so that values such as
/// `199.99` are shown as `2m` rather than `1m 100.0cm`.  Likewise a remainder that rounds to zero is
/// dropped, `200.04` is shown as `2m`, not `2m 0.0cm`.
pub fn cm_to_metres(cm: f64) -> String {
    if !cm.is_finite() {
        return PLACEHOLDER.to_string();
    }

    let cm = (cm * 10.0).round() / 10.0;
    let metres = (cm / CM_PER_METRE).floor();
    let remaining_cm = cm % CM_PER_METRE;

    if metres == 0.0 {
        return format!("{:.1}cm", remaining_cm);
    }

    // compared at display precision
    if (remaining_cm * 10.0).round() == 0.0 {
        return format!("{}m", metres as i64);
    }

    format!("{}m {:.1}cm", metres as i64, remaining_cm)
}
