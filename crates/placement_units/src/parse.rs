//! Parsing of user-entered distances into canonical feet.
//!
//! There are two forms of input:
//! * major/minor pairs, e.g. separate feet and inches fields, see [`parse_major_minor`].
//! * free text, e.g. `8' 10"` or `1m 30cm`, see [`parse_distance`].
//!
//! Blank or invalid input never causes an error, it results in an absent value instead.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::distance::Distance;
use crate::unit_system::{CM_PER_FOOT, CM_PER_METRE, INCHES_PER_FOOT, UnitSystem};

static IMPERIAL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^(?:(?P<feet>\d+(?:\.\d+)?)\s*['′])?\s*(?:(?P<inches>\d+(?:\.\d+)?)?\s*(?:(?P<numerator>\d+)\s*/\s*(?P<denominator>\d+))?\s*["″])?$"#,
    )
    .expect("valid imperial pattern")
});

static METRIC_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:(?P<metres>\d+(?:\.\d+)?)\s*m)?\s*(?:(?P<cm>\d+(?:\.\d+)?)\s*cm)?$")
        .expect("valid metric pattern")
});

static NUMBER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(?:\.\d+)?$").expect("valid number pattern"));

/// Parse a single numeric input value.
///
/// Returns `None` for blank, unparseable, negative or non-finite input.
pub fn parse_numeric_input(value: &str) -> Option<f64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    value
        .parse::<f64>()
        .ok()
        .and_then(valid_component)
}

fn valid_component(value: f64) -> Option<f64> {
    (value.is_finite() && value >= 0.0).then_some(value)
}

/// A value that can be used as one half of a major/minor pair.
///
/// Implemented for text (as entered by a user) and for values that are already numeric.
pub trait ComponentInput {
    fn to_component(&self) -> Option<f64>;
}

impl ComponentInput for str {
    fn to_component(&self) -> Option<f64> {
        parse_numeric_input(self)
    }
}

impl ComponentInput for String {
    fn to_component(&self) -> Option<f64> {
        parse_numeric_input(self)
    }
}

impl ComponentInput for f64 {
    fn to_component(&self) -> Option<f64> {
        valid_component(*self)
    }
}

impl<T: ComponentInput> ComponentInput for Option<T> {
    fn to_component(&self) -> Option<f64> {
        self.as_ref()
            .and_then(ComponentInput::to_component)
    }
}

impl<T: ComponentInput + ?Sized> ComponentInput for &T {
    fn to_component(&self) -> Option<f64> {
        (**self).to_component()
    }
}

/// Parse a major/minor pair, e.g. feet and inches or metres and centimetres, into a distance.
///
/// If both components are blank or invalid the distance is absent.  If only one of them is, it is
/// treated as zero.
pub fn parse_major_minor<M, N>(major: M, minor: N, unit_system: UnitSystem) -> Option<Distance>
where
    M: ComponentInput,
    N: ComponentInput,
{
    match (major.to_component(), minor.to_component()) {
        (None, None) => None,
        (major, minor) => Distance::from_major_minor(major.unwrap_or(0.0), minor.unwrap_or(0.0), unit_system).ok(),
    }
}

/// Parse free text in the given unit system, see [`parse_imperial`] and [`parse_metric`].
pub fn parse_distance(input: &str, unit_system: UnitSystem) -> Option<Distance> {
    match unit_system {
        UnitSystem::Imperial => parse_imperial(input),
        UnitSystem::Metric => parse_metric(input),
    }
}

/// Parse imperial text, e.g. `8' 10"`, `8'10"`, `8'`, `10"`, `5 1/2"`, `8' 5 1/2"`.
///
/// A plain number is interpreted as inches.
pub fn parse_imperial(input: &str) -> Option<Distance> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if NUMBER_PATTERN.is_match(input) {
        let inches = parse_numeric_input(input)?;
        return Distance::from_feet(inches / INCHES_PER_FOOT).ok();
    }

    let captures = IMPERIAL_PATTERN.captures(input)?;
    if !any_group(&captures, &["feet", "inches", "numerator"]) {
        return None;
    }

    let feet = group_value(&captures, "feet").unwrap_or(0.0);
    let inches = group_value(&captures, "inches").unwrap_or(0.0);
    let fraction = match (
        group_value(&captures, "numerator"),
        group_value(&captures, "denominator"),
    ) {
        (Some(_), Some(denominator)) if denominator == 0.0 => return None,
        (Some(numerator), Some(denominator)) => numerator / denominator,
        _ => 0.0,
    };

    Distance::from_major_minor(feet, inches + fraction, UnitSystem::Imperial).ok()
}

/// Parse metric text, e.g. `1m 30cm`, `1m30cm`, `1m`, `30cm`, `2m 15.9cm`.
///
/// A plain number is interpreted as centimetres.
pub fn parse_metric(input: &str) -> Option<Distance> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if NUMBER_PATTERN.is_match(input) {
        let cm = parse_numeric_input(input)?;
        return Distance::from_feet(cm / CM_PER_FOOT).ok();
    }

    let captures = METRIC_PATTERN.captures(input)?;
    if !any_group(&captures, &["metres", "cm"]) {
        return None;
    }

    let metres = group_value(&captures, "metres").unwrap_or(0.0);
    let cm = group_value(&captures, "cm").unwrap_or(0.0);

    Distance::from_feet((metres * CM_PER_METRE + cm) / CM_PER_FOOT).ok()
}

fn any_group(captures: &Captures, names: &[&str]) -> bool {
    names
        .iter()
        .any(|name| captures.name(name).is_some())
}

fn group_value(captures: &Captures, name: &str) -> Option<f64> {
    captures
        .name(name)
        .and_then(|value| parse_numeric_input(value.as_str()))
}
