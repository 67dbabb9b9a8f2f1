use std::fmt;

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::unit_system::UnitSystem;

/// A physical distance, stored canonically in feet regardless of the unit system it was entered in.
///
/// Distances are never negative.  An absent distance is represented by `Option::None`, which is
/// distinct from a zero distance.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "f64", into = "f64"))]
pub struct Distance {
    /// Value in feet (internal representation)
    feet: f64,
}

#[derive(Debug, Error, PartialEq)]
pub enum DistanceError {
    #[error("Distance cannot be negative. feet: {0}")]
    Negative(f64),
    #[error("Distance must be a finite number. feet: {0}")]
    NotFinite(f64),
}

impl Distance {
    /// Create a distance from a value in feet
    pub fn from_feet(feet: f64) -> Result<Self, DistanceError> {
        if !feet.is_finite() {
            return Err(DistanceError::NotFinite(feet));
        }
        if feet < 0.0 {
            return Err(DistanceError::Negative(feet));
        }

        Ok(Self {
            // normalizes -0.0
            feet: feet + 0.0,
        })
    }

    /// Create a distance from a major/minor pair, e.g. feet and inches, in a specific unit system
    pub fn from_major_minor(major: f64, minor: f64, unit_system: UnitSystem) -> Result<Self, DistanceError> {
        Self::from_feet(unit_system.to_feet(major, minor))
    }

    /// Create a distance from a Decimal value in feet
    pub fn from_feet_decimal(feet: Decimal) -> Result<Self, DistanceError> {
        Self::from_feet(feet.to_f64().unwrap_or(f64::NAN))
    }

    /// Get the raw value in feet (internal representation)
    pub fn feet(&self) -> f64 {
        self.feet
    }

    /// Get the value in feet as a Decimal, if it can be represented
    pub fn feet_decimal(&self) -> Option<Decimal> {
        Decimal::from_f64(self.feet)
    }

    /// Get the value in the minor unit (inches or centimetres) of a unit system
    pub fn minor_value_in(&self, unit_system: UnitSystem) -> f64 {
        unit_system.minor_from_feet(self.feet)
    }

    /// Scale the distance by a fixed, non-negative, ratio.
    ///
    /// The multiplication is done using Decimal arithmetic so that ratios like `0.447` are applied exactly.
    pub fn scaled_by(&self, ratio: Decimal) -> Result<Self, DistanceError> {
        match self.feet_decimal() {
            Some(feet) => Self::from_feet_decimal(feet * ratio),
            None => Self::from_feet(self.feet * ratio.to_f64().unwrap_or(f64::NAN)),
        }
    }
}

impl TryFrom<f64> for Distance {
    type Error = DistanceError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::from_feet(value)
    }
}

impl From<Distance> for f64 {
    fn from(value: Distance) -> Self {
        value.feet
    }
}

impl fmt::Display for Distance {
    /// Displays the raw value in feet, use `format_distance` for a user-facing representation
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ft", self.feet)
    }
}
