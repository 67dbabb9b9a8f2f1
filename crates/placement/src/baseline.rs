use placement_units::{format_distance, Distance, UnitSystem};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::engine::{compute_baseline, PlacementError};
use crate::input::PlacementInputs;
use crate::method::{PlacementMethod, SpeakerType};

/// A single derived distance of a baseline.
///
/// `value` is formatted in the unit system that was selected when the baseline was computed,
/// `raw_value_in_feet` allows it to be re-formatted in any other unit system later.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementResult {
    pub label: String,
    pub value: String,
    /// Records created before raw values were kept only have the formatted `value`.
    #[serde(default)]
    pub raw_value_in_feet: Option<Distance>,
    pub formula: String,
}

impl PlacementResult {
    pub fn new(label: impl Into<String>, distance: Distance, formula: impl Into<String>, unit_system: UnitSystem) -> Self {
        Self {
            label: label.into(),
            value: format_distance(Some(distance), unit_system),
            raw_value_in_feet: Some(distance),
            formula: formula.into(),
        }
    }

    /// The value formatted in the given unit system, falls back to the stored value when there is no raw value.
    pub fn display_value(&self, unit_system: UnitSystem) -> String {
        match self.raw_value_in_feet {
            Some(distance) => format_distance(Some(distance), unit_system),
            None => self.value.clone(),
        }
    }
}

/// A baseline that has been computed but not yet stored
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBaseline {
    pub calculation_type: PlacementMethod,
    pub method_name: String,
    pub speaker_type: SpeakerType,
    pub values: Vec<PlacementResult>,
}

impl NewBaseline {
    /// Compute the baseline distances for a method, formatting values in the given unit system
    pub fn compute(
        method: PlacementMethod,
        inputs: &PlacementInputs,
        speaker_type: SpeakerType,
        unit_system: UnitSystem,
    ) -> Result<Self, PlacementError> {
        let values = compute_baseline(method, inputs, speaker_type, unit_system)?;

        Ok(Self {
            calculation_type: method,
            method_name: method.display_name().to_string(),
            speaker_type,
            values,
        })
    }
}

/// A stored baseline, the most recent baseline is the active one.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Baseline {
    pub id: Uuid,
    pub calculation_type: PlacementMethod,
    pub method_name: String,
    pub speaker_type: SpeakerType,
    pub values: Vec<PlacementResult>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Baseline {
    pub fn from_new(new: NewBaseline, id: Uuid, created_at: OffsetDateTime) -> Self {
        let NewBaseline {
            calculation_type,
            method_name,
            speaker_type,
            values,
        } = new;

        Self {
            id,
            calculation_type,
            method_name,
            speaker_type,
            values,
            created_at,
        }
    }

    pub fn value(&self, label: &str) -> Option<&PlacementResult> {
        self.values
            .iter()
            .find(|result| result.label == label)
    }
}

/// Order baselines newest first, so that the first one is the active baseline
pub fn sort_newest_first(baselines: &mut [Baseline]) {
    baselines.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
