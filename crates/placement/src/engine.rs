//! Placement formulas.
//!
//! | Method                              | Requires | Front wall    | Side wall     | Listening position    |
//! |-------------------------------------|----------|---------------|---------------|-----------------------|
//! | Cardas golden ratio (conventional)  | W        | W × 0.447     | W × 0.276     |                       |
//! | Cardas golden ratio (planar)        | H        | H × 0.618     |               |                       |
//! | Planar edge                         | L        | L × 0.4       | 6" (fixed)    | L × 0.8               |
//! | Rule of thirds                      | L        | L × 0.3333    |               | L × 0.66              |
//! | Equilateral triangle                | W, Sw    |               | Sw            | (W − 2·Sw) × √3 / 2   |
//! | Manual                              | any      | as entered    | as entered    | as entered            |
//!
//! All values are in feet.

use itertools::Itertools;
use placement_units::{Distance, DistanceError, UnitSystem};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;
use tracing::{debug, trace};

use crate::baseline::PlacementResult;
use crate::input::{provided, EnteredDistance, PlacementInput, PlacementInputs, ProvidedDistance};
use crate::method::{PlacementMethod, SpeakerType};

pub const FRONT_WALL: &str = "Front Wall";
pub const SIDE_WALL: &str = "Side Wall";
pub const LISTENING_POSITION: &str = "Listening Position";

/// A fixed ratio applied to a room dimension.
struct Ratio {
    factor: Decimal,
    /// How the ratio is described in formulas, e.g. `0.447` or `33.33%`
    description: &'static str,
}

const WIDTH_TO_FRONT_WALL: Ratio = Ratio {
    factor: dec!(0.447),
    description: "0.447",
};
const WIDTH_TO_SIDE_WALL: Ratio = Ratio {
    factor: dec!(0.276),
    description: "0.276",
};
const HEIGHT_TO_FRONT_WALL: Ratio = Ratio {
    factor: dec!(0.618),
    description: "0.618",
};
const PLANAR_EDGE_FRONT_WALL: Ratio = Ratio {
    factor: dec!(0.4),
    description: "0.4",
};
const PLANAR_EDGE_LISTENING_POSITION: Ratio = Ratio {
    factor: dec!(0.8),
    description: "0.8",
};
const THIRDS_FRONT_WALL: Ratio = Ratio {
    factor: dec!(0.3333),
    description: "33.33%",
};
const THIRDS_LISTENING_POSITION: Ratio = Ratio {
    factor: dec!(0.66),
    description: "66%",
};

/// Side wall distance used by the planar edge method, 6 inches
const PLANAR_EDGE_SIDE_WALL_FEET: f64 = 0.5;

#[derive(Error, Debug, PartialEq)]
pub enum PlacementError {
    /// Not an input error, the caller should gate on the required inputs.
    #[error("Incomplete inputs. method: {method}, missing: {}", .missing.iter().join(", "))]
    Incomplete {
        method: PlacementMethod,
        missing: Vec<PlacementInput>,
    },

    #[error("Sidewall distance leaves no room between the speakers. width: {width}, sidewall distance: {sidewall_distance}")]
    NonPositiveSeparation {
        width: EnteredDistance,
        sidewall_distance: EnteredDistance,
    },

    #[error("Invalid distance. cause: {0}")]
    InvalidDistance(#[from] DistanceError),
}

impl PlacementError {
    pub fn is_incomplete(&self) -> bool {
        matches!(self, PlacementError::Incomplete { .. })
    }
}

/// Compute the baseline distances for a placement method.
///
/// Values are formatted in `unit_system`, the raw values are always in feet.  When an input the
/// method requires is missing `PlacementError::Incomplete` is returned, listing the missing inputs.
pub fn compute_baseline(
    method: PlacementMethod,
    inputs: &PlacementInputs,
    speaker_type: SpeakerType,
    unit_system: UnitSystem,
) -> Result<Vec<PlacementResult>, PlacementError> {
    trace!(
        "compute_baseline. method: {}, speaker_type: {}, inputs: {:?}",
        method,
        speaker_type,
        inputs
    );

    let room = &inputs.room;

    let results = match (method, speaker_type) {
        (PlacementMethod::CardasGoldenRatio, SpeakerType::Conventional) => {
            let width = require(method, &room.width, PlacementInput::RoomWidth)?;
            vec![
                scaled(FRONT_WALL, "Room Width", &width, &WIDTH_TO_FRONT_WALL, unit_system)?,
                scaled(SIDE_WALL, "Room Width", &width, &WIDTH_TO_SIDE_WALL, unit_system)?,
            ]
        }
        (PlacementMethod::CardasGoldenRatio, SpeakerType::Planar) => {
            let height = require(method, &room.height, PlacementInput::CeilingHeight)?;
            vec![scaled(
                FRONT_WALL,
                "Ceiling Height",
                &height,
                &HEIGHT_TO_FRONT_WALL,
                unit_system,
            )?]
        }
        (PlacementMethod::PlanarEdge, _) => {
            let length = require(method, &room.length, PlacementInput::RoomLength)?;
            vec![
                scaled(FRONT_WALL, "Room Length", &length, &PLANAR_EDGE_FRONT_WALL, unit_system)?,
                PlacementResult::new(
                    SIDE_WALL,
                    Distance::from_feet(PLANAR_EDGE_SIDE_WALL_FEET)?,
                    "Fixed value",
                    unit_system,
                ),
                scaled(
                    LISTENING_POSITION,
                    "Room Length",
                    &length,
                    &PLANAR_EDGE_LISTENING_POSITION,
                    unit_system,
                )?,
            ]
        }
        (PlacementMethod::RuleOfThirds, _) => {
            let length = require(method, &room.length, PlacementInput::RoomLength)?;
            vec![
                scaled(FRONT_WALL, "Room Length", &length, &THIRDS_FRONT_WALL, unit_system)?,
                scaled(
                    LISTENING_POSITION,
                    "Room Length",
                    &length,
                    &THIRDS_LISTENING_POSITION,
                    unit_system,
                )?,
            ]
        }
        (PlacementMethod::EquilateralTriangle, _) => equilateral_triangle(inputs, unit_system)?,
        (PlacementMethod::Manual, _) => manual(inputs, unit_system)?,
    };

    debug!(
        "Computed baseline. method: {}, results: {}",
        method,
        results
            .iter()
            .map(|result| format!("{}={}", result.label, result.value))
            .join(", ")
    );

    Ok(results)
}

fn require<'a>(
    method: PlacementMethod,
    entered: &'a Option<EnteredDistance>,
    input: PlacementInput,
) -> Result<ProvidedDistance<'a>, PlacementError> {
    provided(entered).ok_or_else(|| PlacementError::Incomplete {
        method,
        missing: vec![input],
    })
}

fn scaled(
    label: &str,
    dimension_name: &str,
    dimension: &ProvidedDistance,
    ratio: &Ratio,
    unit_system: UnitSystem,
) -> Result<PlacementResult, PlacementError> {
    let distance = dimension
        .distance
        .scaled_by(ratio.factor)?;

    let formula = format!(
        "{} × {} ({} × {})",
        dimension_name, ratio.description, dimension.entered, ratio.factor
    );

    Ok(PlacementResult::new(label, distance, formula, unit_system))
}

fn equilateral_triangle(inputs: &PlacementInputs, unit_system: UnitSystem) -> Result<Vec<PlacementResult>, PlacementError> {
    let (width, sidewall) = match (provided(&inputs.room.width), provided(&inputs.sidewall_distance)) {
        (Some(width), Some(sidewall)) => (width, sidewall),
        (width, sidewall) => {
            let missing = [
                width
                    .is_none()
                    .then_some(PlacementInput::RoomWidth),
                sidewall
                    .is_none()
                    .then_some(PlacementInput::SidewallDistance),
            ]
            .into_iter()
            .flatten()
            .collect();

            return Err(PlacementError::Incomplete {
                method: PlacementMethod::EquilateralTriangle,
                missing,
            });
        }
    };

    let separation = width.distance.feet() - 2.0 * sidewall.distance.feet();
    if separation <= 0.0 {
        return Err(PlacementError::NonPositiveSeparation {
            width: width.entered.clone(),
            sidewall_distance: sidewall.entered.clone(),
        });
    }

    let listening_position = Distance::from_feet(separation * 3.0_f64.sqrt() / 2.0)?;

    Ok(vec![
        PlacementResult::new(
            SIDE_WALL,
            sidewall.distance,
            format!("Input value ({})", sidewall.entered),
            unit_system,
        ),
        PlacementResult::new(
            LISTENING_POSITION,
            listening_position,
            format!(
                "(Speaker Separation × √3) / 2 (Speaker Separation = {} − 2 × {})",
                width.entered, sidewall.entered
            ),
            unit_system,
        ),
    ])
}

fn manual(inputs: &PlacementInputs, unit_system: UnitSystem) -> Result<Vec<PlacementResult>, PlacementError> {
    let positions = [
        (FRONT_WALL, &inputs.manual.front_wall),
        (SIDE_WALL, &inputs.manual.side_wall),
        (LISTENING_POSITION, &inputs.manual.listening_position),
    ];

    let results: Vec<_> = positions
        .into_iter()
        .filter_map(|(label, entered)| {
            provided(entered).map(|position| {
                PlacementResult::new(
                    label,
                    position.distance,
                    format!("Input value ({})", position.entered),
                    unit_system,
                )
            })
        })
        .collect();

    if results.is_empty() {
        return Err(PlacementError::Incomplete {
            method: PlacementMethod::Manual,
            missing: vec![
                PlacementInput::FrontWall,
                PlacementInput::SideWall,
                PlacementInput::ListeningPosition,
            ],
        });
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::input::{ManualPositions, RoomDimensions};

    fn approx_eq(lhs: f64, rhs: f64, eps: f64) -> bool {
        let difference = (lhs - rhs).abs();
        println!("lhs: {}, rhs: {}, difference: {}", lhs, rhs, difference);
        difference <= eps
    }

    fn room(length: Option<&str>, width: Option<&str>, height: Option<&str>) -> PlacementInputs {
        PlacementInputs {
            room: RoomDimensions {
                length: length.map(EnteredDistance::feet),
                width: width.map(EnteredDistance::feet),
                height: height.map(EnteredDistance::feet),
            },
            ..Default::default()
        }
    }

    fn raw(result: &PlacementResult) -> f64 {
        result
            .raw_value_in_feet
            .unwrap()
            .feet()
    }

    #[test]
    fn golden_ratio_conventional() {
        // given
        let inputs = room(None, Some("12"), None);

        // when
        let results = compute_baseline(
            PlacementMethod::CardasGoldenRatio,
            &inputs,
            SpeakerType::Conventional,
            UnitSystem::Imperial,
        )
        .unwrap();

        // then
        assert_eq!(results.len(), 2);

        assert_eq!(results[0].label, "Front Wall");
        assert!(approx_eq(raw(&results[0]), 5.364, 1e-12));
        assert_eq!(results[0].value, placement_units::feet_to_fraction(5.364));
        assert_eq!(results[0].formula, "Room Width × 0.447 (12ft × 0.447)");

        assert_eq!(results[1].label, "Side Wall");
        assert!(approx_eq(raw(&results[1]), 3.312, 1e-12));
        assert_eq!(results[1].value, "3' 3 3/4\"");
        assert_eq!(results[1].formula, "Room Width × 0.276 (12ft × 0.276)");
    }

    #[test]
    fn golden_ratio_planar_uses_ceiling_height() {
        // given
        let inputs = room(None, Some("12"), Some("9"));

        // when
        let results = compute_baseline(
            PlacementMethod::CardasGoldenRatio,
            &inputs,
            SpeakerType::Planar,
            UnitSystem::Imperial,
        )
        .unwrap();

        // then
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].label, "Front Wall");
        assert!(approx_eq(raw(&results[0]), 5.562, 1e-12));
        assert_eq!(results[0].formula, "Ceiling Height × 0.618 (9ft × 0.618)");
    }

    #[test]
    fn planar_edge() {
        // given
        let inputs = room(Some("20"), None, None);

        // when
        let results =
            compute_baseline(PlacementMethod::PlanarEdge, &inputs, SpeakerType::Planar, UnitSystem::Imperial).unwrap();

        // then
        let summary: Vec<_> = results
            .iter()
            .map(|result| (result.label.as_str(), result.value.as_str(), result.formula.as_str()))
            .collect();
        assert_eq!(summary, vec![
            ("Front Wall", "8'", "Room Length × 0.4 (20ft × 0.4)"),
            ("Side Wall", "6\"", "Fixed value"),
            ("Listening Position", "16'", "Room Length × 0.8 (20ft × 0.8)"),
        ]);
        assert_eq!(raw(&results[1]), 0.5);
    }

    #[test]
    fn rule_of_thirds() {
        // given
        let inputs = room(Some("18"), None, None);

        // when
        let results = compute_baseline(
            PlacementMethod::RuleOfThirds,
            &inputs,
            SpeakerType::Conventional,
            UnitSystem::Imperial,
        )
        .unwrap();

        // then
        assert_eq!(results.len(), 2);
        assert!(approx_eq(raw(&results[0]), 5.9994, 1e-12));
        assert_eq!(results[0].formula, "Room Length × 33.33% (18ft × 0.3333)");
        assert!(approx_eq(raw(&results[1]), 11.88, 1e-12));
        assert_eq!(results[1].formula, "Room Length × 66% (18ft × 0.66)");
    }

    #[test]
    fn equilateral_triangle() {
        // given
        let inputs = PlacementInputs {
            sidewall_distance: Some(EnteredDistance::feet("2")),
            ..room(None, Some("10"), None)
        };

        // when
        let results = compute_baseline(
            PlacementMethod::EquilateralTriangle,
            &inputs,
            SpeakerType::Conventional,
            UnitSystem::Imperial,
        )
        .unwrap();

        // then
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].label, "Side Wall");
        assert_eq!(raw(&results[0]), 2.0);
        assert_eq!(results[0].formula, "Input value (2ft)");

        assert_eq!(results[1].label, "Listening Position");
        assert!(approx_eq(raw(&results[1]), 6.0 * 3.0_f64.sqrt() / 2.0, 1e-12));
        assert!(approx_eq(raw(&results[1]), 5.196, 1e-3));
        assert_eq!(results[1].value, "5' 2 1/4\"");
    }

    #[test]
    fn equilateral_triangle_rejects_sidewall_distance_wider_than_room() {
        // given
        let inputs = PlacementInputs {
            sidewall_distance: Some(EnteredDistance::feet("6")),
            ..room(None, Some("10"), None)
        };

        // when
        let result = compute_baseline(
            PlacementMethod::EquilateralTriangle,
            &inputs,
            SpeakerType::Conventional,
            UnitSystem::Imperial,
        );

        // then
        assert_eq!(
            result,
            Err(PlacementError::NonPositiveSeparation {
                width: EnteredDistance::feet("10"),
                sidewall_distance: EnteredDistance::feet("6"),
            })
        );
    }

    #[test]
    fn manual_passes_entered_values_through() {
        // given
        let inputs = PlacementInputs {
            manual: ManualPositions {
                front_wall: Some(EnteredDistance::new("1", "20", UnitSystem::Metric)),
                side_wall: None,
                listening_position: Some(EnteredDistance::new("", "", UnitSystem::Metric)),
            },
            ..Default::default()
        };

        // when
        let results =
            compute_baseline(PlacementMethod::Manual, &inputs, SpeakerType::Conventional, UnitSystem::Metric).unwrap();

        // then
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].label, "Front Wall");
        assert_eq!(results[0].value, "1m 20.0cm");
        assert_eq!(results[0].formula, "Input value (1m 20cm)");
    }

    #[test]
    fn values_are_formatted_in_selected_unit_system() {
        // given
        let inputs = PlacementInputs {
            room: RoomDimensions {
                length: Some(EnteredDistance::new("5", "", UnitSystem::Metric)),
                ..Default::default()
            },
            ..Default::default()
        };

        // when
        let results =
            compute_baseline(PlacementMethod::PlanarEdge, &inputs, SpeakerType::Planar, UnitSystem::Metric).unwrap();

        // then
        assert_eq!(results[0].value, "2m");
        assert_eq!(results[0].formula, "Room Length × 0.4 (5m × 0.4)");
        assert_eq!(results[1].value, "15.2cm");
        assert_eq!(results[2].value, "4m");
    }

    #[rstest]
    #[case::conventional_golden_ratio(
        PlacementMethod::CardasGoldenRatio,
        SpeakerType::Conventional,
        room(Some("20"), None, Some("9")),
        vec![PlacementInput::RoomWidth]
    )]
    #[case::planar_golden_ratio(
        PlacementMethod::CardasGoldenRatio,
        SpeakerType::Planar,
        room(Some("20"), Some("12"), None),
        vec![PlacementInput::CeilingHeight]
    )]
    #[case::planar_edge(
        PlacementMethod::PlanarEdge,
        SpeakerType::Planar,
        room(None, Some("12"), None),
        vec![PlacementInput::RoomLength]
    )]
    #[case::rule_of_thirds(
        PlacementMethod::RuleOfThirds,
        SpeakerType::Conventional,
        room(Some(""), None, None),
        vec![PlacementInput::RoomLength]
    )]
    #[case::equilateral_triangle(
        PlacementMethod::EquilateralTriangle,
        SpeakerType::Conventional,
        room(None, None, None),
        vec![PlacementInput::RoomWidth, PlacementInput::SidewallDistance]
    )]
    #[case::equilateral_triangle_without_sidewall(
        PlacementMethod::EquilateralTriangle,
        SpeakerType::Conventional,
        room(None, Some("10"), None),
        vec![PlacementInput::SidewallDistance]
    )]
    #[case::manual(
        PlacementMethod::Manual,
        SpeakerType::Conventional,
        room(Some("20"), Some("12"), Some("9")),
        vec![PlacementInput::FrontWall, PlacementInput::SideWall, PlacementInput::ListeningPosition]
    )]
    fn missing_inputs_are_reported_as_incomplete(
        #[case] method: PlacementMethod,
        #[case] speaker_type: SpeakerType,
        #[case] inputs: PlacementInputs,
        #[case] expected_missing: Vec<PlacementInput>,
    ) {
        // when
        let result = compute_baseline(method, &inputs, speaker_type, UnitSystem::Imperial);

        // then
        let error = result.unwrap_err();
        assert!(error.is_incomplete());
        assert_eq!(error, PlacementError::Incomplete {
            method,
            missing: expected_missing,
        });
    }

    #[test]
    fn incomplete_error_message() {
        let error = PlacementError::Incomplete {
            method: PlacementMethod::EquilateralTriangle,
            missing: vec![PlacementInput::RoomWidth, PlacementInput::SidewallDistance],
        };

        assert_eq!(
            error.to_string(),
            "Incomplete inputs. method: equilateral-triangle, missing: Room Width, Sidewall Distance"
        );
    }
}
