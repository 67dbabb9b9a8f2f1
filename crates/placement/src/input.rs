use std::fmt;

use placement_units::{parse_major_minor, Distance, UnitSystem};
use strum_macros::Display;

/// A distance exactly as the user entered it, as a major/minor pair in a unit system.
///
/// The text is retained so that it can be quoted in formula descriptions.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnteredDistance {
    pub major: String,
    pub minor: String,
    pub unit_system: UnitSystem,
}

impl EnteredDistance {
    pub fn new(major: impl Into<String>, minor: impl Into<String>, unit_system: UnitSystem) -> Self {
        Self {
            major: major.into(),
            minor: minor.into(),
            unit_system,
        }
    }

    /// Whole feet, with no inches
    pub fn feet(feet: impl Into<String>) -> Self {
        Self::new(feet, "", UnitSystem::Imperial)
    }

    /// The parsed distance, `None` when nothing usable was entered
    pub fn distance(&self) -> Option<Distance> {
        parse_major_minor(self.major.as_str(), self.minor.as_str(), self.unit_system)
    }
}

impl fmt::Display for EnteredDistance {
    /// e.g. `12ft 6in`, `12ft`, `6in`, `3m 50cm`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let major = self.major.trim();
        let minor = self.minor.trim();

        match (major.is_empty(), minor.is_empty()) {
            (false, false) => write!(
                f,
                "{}{} {}{}",
                major,
                self.unit_system.major_unit_name(),
                minor,
                self.unit_system.minor_unit_name()
            ),
            (false, true) => write!(f, "{}{}", major, self.unit_system.major_unit_name()),
            (true, false) => write!(f, "{}{}", minor, self.unit_system.minor_unit_name()),
            (true, true) => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct RoomDimensions {
    pub length: Option<EnteredDistance>,
    pub width: Option<EnteredDistance>,
    pub height: Option<EnteredDistance>,
}

/// Distances for the manual method, each is optional
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualPositions {
    pub front_wall: Option<EnteredDistance>,
    pub side_wall: Option<EnteredDistance>,
    pub listening_position: Option<EnteredDistance>,
}

/// Everything a placement method may need, which of the values are required depends on the method.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementInputs {
    pub room: RoomDimensions,
    /// Speaker distance from the side wall, used by the equilateral triangle method
    pub sidewall_distance: Option<EnteredDistance>,
    pub manual: ManualPositions,
}

/// Identifies an input, used to report which inputs a method is missing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "title_case")]
pub enum PlacementInput {
    RoomLength,
    RoomWidth,
    CeilingHeight,
    SidewallDistance,
    FrontWall,
    SideWall,
    ListeningPosition,
}

/// An entered distance along with its parsed value, only exists when the entry was usable
#[derive(Debug, Clone, Copy)]
pub(crate) struct ProvidedDistance<'a> {
    pub entered: &'a EnteredDistance,
    pub distance: Distance,
}

pub(crate) fn provided(entered: &Option<EnteredDistance>) -> Option<ProvidedDistance<'_>> {
    entered.as_ref().and_then(|entered| {
        entered
            .distance()
            .map(|distance| ProvidedDistance {
                entered,
                distance,
            })
    })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(EnteredDistance::new("12", "6", UnitSystem::Imperial), "12ft 6in")]
    #[case(EnteredDistance::feet("12"), "12ft")]
    #[case(EnteredDistance::new("", "6", UnitSystem::Imperial), "6in")]
    #[case(EnteredDistance::new(" 3 ", "50", UnitSystem::Metric), "3m 50cm")]
    #[case(EnteredDistance::new("", "", UnitSystem::Metric), "")]
    fn display_quotes_entered_text(#[case] entered: EnteredDistance, #[case] expected: &str) {
        assert_eq!(entered.to_string(), expected);
    }

    #[test]
    fn blank_entries_are_not_provided() {
        let blank = Some(EnteredDistance::new("", " ", UnitSystem::Imperial));

        assert!(provided(&blank).is_none());
        assert!(provided(&None).is_none());
        assert!(provided(&Some(EnteredDistance::feet("12"))).is_some());
    }

    #[test]
    fn input_names() {
        assert_eq!(PlacementInput::CeilingHeight.to_string(), "Ceiling Height");
        assert_eq!(PlacementInput::SidewallDistance.to_string(), "Sidewall Distance");
    }
}
