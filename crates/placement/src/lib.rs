//! Speaker placement methods, baselines and measurements.
//!
//! A baseline is computed from the room dimensions using one of the [`PlacementMethod`]s, measurements record
//! subjective ratings of placement variants relative to the active baseline.

mod baseline;
mod engine;
mod input;
mod measurement;
mod method;

pub use baseline::{sort_newest_first, Baseline, NewBaseline, PlacementResult};
pub use engine::{compute_baseline, PlacementError, FRONT_WALL, LISTENING_POSITION, SIDE_WALL};
pub use input::{EnteredDistance, ManualPositions, PlacementInput, PlacementInputs, RoomDimensions};
pub use measurement::{
    sort_for_display, Measurement, MeasurementUpdate, NewMeasurement, Rating, RatingError, Ratings,
};
pub use method::{PlacementMethod, SpeakerType};
