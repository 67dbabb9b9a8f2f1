use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Centimetres in one foot (1 in = 2.54 cm, 1 ft = 12 in)
pub const CM_PER_FOOT: f64 = 30.48;
pub const INCHES_PER_FOOT: f64 = 12.0;
pub const CM_PER_METRE: f64 = 100.0;

/// Represents the unit systems a distance can be entered and displayed in.
///
/// The unit system is purely a presentation concern, distances are always stored in feet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum UnitSystem {
    /// Feet and inches (1 ft = 12 in = 30.48 cm)
    #[default]
    Imperial,
    /// Metres and centimetres (1 m = 100 cm)
    Metric,
}

impl UnitSystem {
    pub const ALL: [UnitSystem; 2] = [UnitSystem::Imperial, UnitSystem::Metric];

    /// Convert a major/minor pair in this unit system to feet
    pub fn to_feet(&self, major: f64, minor: f64) -> f64 {
        match self {
            UnitSystem::Imperial => major + minor / INCHES_PER_FOOT,
            UnitSystem::Metric => (major * CM_PER_METRE + minor) / CM_PER_FOOT,
        }
    }

    /// Convert feet into the minor unit of this unit system (inches or centimetres)
    pub fn minor_from_feet(&self, feet: f64) -> f64 {
        match self {
            UnitSystem::Imperial => feet * INCHES_PER_FOOT,
            UnitSystem::Metric => feet * CM_PER_FOOT,
        }
    }

    /// Get the identifier used in configuration files and on the command line
    pub fn identifier(&self) -> &'static str {
        match self {
            UnitSystem::Imperial => "imperial",
            UnitSystem::Metric => "metric",
        }
    }

    /// Get the abbreviation of the major unit
    pub fn major_unit_name(&self) -> &'static str {
        match self {
            UnitSystem::Imperial => "ft",
            UnitSystem::Metric => "m",
        }
    }

    /// Get the abbreviation of the minor unit
    pub fn minor_unit_name(&self) -> &'static str {
        match self {
            UnitSystem::Imperial => "in",
            UnitSystem::Metric => "cm",
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UnitSystemError {
    #[error("Unknown unit system. identifier: '{0}', expected: 'imperial' or 'metric'")]
    Unknown(String),
}

impl FromStr for UnitSystem {
    type Err = UnitSystemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UnitSystem::ALL
            .into_iter()
            .find(|unit_system| unit_system.identifier() == s)
            .ok_or_else(|| UnitSystemError::Unknown(s.to_string()))
    }
}
