use clap::ValueEnum;
use placement::{PlacementMethod, SpeakerType};
use placement_units::UnitSystem;

/// Args decouple of CLI arg handling requirements from the internal data structures

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
#[value(rename_all = "lower")]
pub enum UnitSystemArg {
    Imperial,
    Metric,
}

impl From<UnitSystemArg> for UnitSystem {
    fn from(value: UnitSystemArg) -> Self {
        match value {
            UnitSystemArg::Imperial => Self::Imperial,
            UnitSystemArg::Metric => Self::Metric,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
#[value(rename_all = "kebab-case")]
pub enum PlacementMethodArg {
    CardasGoldenRatio,
    PlanarEdge,
    RuleOfThirds,
    EquilateralTriangle,
    Manual,
}

impl From<PlacementMethodArg> for PlacementMethod {
    fn from(value: PlacementMethodArg) -> Self {
        match value {
            PlacementMethodArg::CardasGoldenRatio => Self::CardasGoldenRatio,
            PlacementMethodArg::PlanarEdge => Self::PlanarEdge,
            PlacementMethodArg::RuleOfThirds => Self::RuleOfThirds,
            PlacementMethodArg::EquilateralTriangle => Self::EquilateralTriangle,
            PlacementMethodArg::Manual => Self::Manual,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[value(rename_all = "lower")]
pub enum SpeakerTypeArg {
    #[default]
    Conventional,
    Planar,
}

impl From<SpeakerTypeArg> for SpeakerType {
    fn from(value: SpeakerTypeArg) -> Self {
        match value {
            SpeakerTypeArg::Conventional => Self::Conventional,
            SpeakerTypeArg::Planar => Self::Planar,
        }
    }
}
