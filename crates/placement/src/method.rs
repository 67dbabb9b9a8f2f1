use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Methods for deriving a baseline speaker position from the room dimensions.
///
/// The kebab-case identifiers are used in stored records and on the command line.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum PlacementMethod {
    /// Conventional speakers: front wall = width × 0.447, side wall = width × 0.276.
    /// Planar speakers: front wall = ceiling height × 0.618.
    CardasGoldenRatio,
    /// Front wall = length × 0.4, side wall = 6", listening position = length × 0.8
    PlanarEdge,
    /// Front wall = length × 0.3333, listening position = length × 0.66
    RuleOfThirds,
    /// Nearfield listening, the speakers and the listener form an equilateral triangle
    EquilateralTriangle,
    /// Distances entered directly by the user
    Manual,
}

impl PlacementMethod {
    /// The human-readable name, as shown on measurements taken against a baseline
    pub fn display_name(&self) -> &'static str {
        match self {
            PlacementMethod::CardasGoldenRatio => "Cardas Golden Ratio",
            PlacementMethod::PlanarEdge => "Planar Edge Method",
            PlacementMethod::RuleOfThirds => "Rule of 1/3's",
            PlacementMethod::EquilateralTriangle => "Nearfield Listening",
            PlacementMethod::Manual => "Manual",
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SpeakerType {
    #[default]
    Conventional,
    Planar,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rstest::rstest;
    use strum::IntoEnumIterator;

    use super::*;

    #[rstest]
    #[case("cardas-golden-ratio", PlacementMethod::CardasGoldenRatio)]
    #[case("planar-edge", PlacementMethod::PlanarEdge)]
    #[case("rule-of-thirds", PlacementMethod::RuleOfThirds)]
    #[case("equilateral-triangle", PlacementMethod::EquilateralTriangle)]
    #[case("manual", PlacementMethod::Manual)]
    fn identifiers(#[case] identifier: &str, #[case] method: PlacementMethod) {
        assert_eq!(PlacementMethod::from_str(identifier).unwrap(), method);
        assert_eq!(method.to_string(), identifier);
        assert_eq!(
            serde_json::to_string(&method).unwrap(),
            format!("\"{}\"", identifier)
        );
    }

    #[test]
    fn unknown_identifier_is_an_error() {
        assert!(PlacementMethod::from_str("golden-ratio").is_err());
        assert!(SpeakerType::from_str("electrostatic").is_err());
    }

    #[test]
    fn every_method_has_a_display_name() {
        let names: Vec<_> = PlacementMethod::iter()
            .map(|method| method.display_name())
            .collect();

        assert_eq!(names, vec![
            "Cardas Golden Ratio",
            "Planar Edge Method",
            "Rule of 1/3's",
            "Nearfield Listening",
            "Manual",
        ]);
    }
}
