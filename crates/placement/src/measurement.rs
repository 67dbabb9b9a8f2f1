use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

use placement_units::Distance;
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

/// A subjective rating relative to the baseline, from -10 (much worse) to 10 (much better).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Rating(i8);

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RatingError {
    #[error("Rating out of range. value: {0}, min: {min}, max: {max}", min = Rating::MIN, max = Rating::MAX)]
    OutOfRange(i64),
}

impl Rating {
    pub const MIN: i8 = -10;
    pub const MAX: i8 = 10;

    pub fn new(value: i64) -> Result<Self, RatingError> {
        match i8::try_from(value) {
            Ok(value) if (Self::MIN..=Self::MAX).contains(&value) => Ok(Self(value)),
            _ => Err(RatingError::OutOfRange(value)),
        }
    }

    pub fn value(&self) -> i8 {
        self.0
    }
}

impl TryFrom<i64> for Rating {
    type Error = RatingError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for i64 {
    fn from(value: Rating) -> Self {
        value.0 as i64
    }
}

impl Display for Rating {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ratings {
    pub bass: Rating,
    pub treble: Rating,
    pub vocals: Rating,
    pub soundstage: Rating,
}

impl Ratings {
    /// The sum of all ratings, positive means better than the baseline
    pub fn score(&self) -> i32 {
        [self.bass, self.treble, self.vocals, self.soundstage]
            .iter()
            .map(|rating| rating.value() as i32)
            .sum()
    }
}

/// A measurement that has been entered but not yet saved
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewMeasurement {
    pub distance_from_front_wall: Option<Distance>,
    pub distance_from_side_wall: Option<Distance>,
    pub listening_position: Option<Distance>,
    pub ratings: Ratings,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measurement {
    pub id: Uuid,
    pub distance_from_front_wall: Option<Distance>,
    pub distance_from_side_wall: Option<Distance>,
    pub listening_position: Option<Distance>,
    pub bass: Rating,
    pub treble: Rating,
    pub vocals: Rating,
    pub soundstage: Rating,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub baseline_method_name: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeasurementUpdate {
    SetFavorite(bool),
    ToggleFavorite,
    /// A blank name removes the name
    Rename(Option<String>),
}

impl Measurement {
    /// New measurements are never favourites.
    pub fn new(
        id: Uuid,
        created_at: OffsetDateTime,
        new: NewMeasurement,
        baseline_method_name: Option<String>,
    ) -> Self {
        let NewMeasurement {
            distance_from_front_wall,
            distance_from_side_wall,
            listening_position,
            ratings,
            name,
        } = new;

        Self {
            id,
            distance_from_front_wall,
            distance_from_side_wall,
            listening_position,
            bass: ratings.bass,
            treble: ratings.treble,
            vocals: ratings.vocals,
            soundstage: ratings.soundstage,
            is_favorite: false,
            name: normalize_name(name),
            baseline_method_name,
            created_at,
        }
    }

    pub fn ratings(&self) -> Ratings {
        Ratings {
            bass: self.bass,
            treble: self.treble,
            vocals: self.vocals,
            soundstage: self.soundstage,
        }
    }

    pub fn score(&self) -> i32 {
        self.ratings().score()
    }

    pub fn apply(&mut self, update: MeasurementUpdate) {
        match update {
            MeasurementUpdate::SetFavorite(is_favorite) => self.is_favorite = is_favorite,
            MeasurementUpdate::ToggleFavorite => self.is_favorite = !self.is_favorite,
            MeasurementUpdate::Rename(name) => self.name = normalize_name(name),
        }
    }
}

fn normalize_name(name: Option<String>) -> Option<String> {
    name.map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
}

/// Favourites first, then newest first within each group
pub fn sort_for_display(measurements: &mut [Measurement]) {
    measurements.sort_by(display_order);
}

fn display_order(a: &Measurement, b: &Measurement) -> Ordering {
    b.is_favorite
        .cmp(&a.is_favorite)
        .then_with(|| b.created_at.cmp(&a.created_at))
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use rstest::rstest;
    use time::macros::datetime;

    use super::*;

    fn rating(value: i64) -> Rating {
        Rating::new(value).unwrap()
    }

    fn measurement(created_at: OffsetDateTime, is_favorite: bool) -> Measurement {
        let mut measurement = Measurement::new(Uuid::new_v4(), created_at, NewMeasurement::default(), None);
        measurement.apply(MeasurementUpdate::SetFavorite(is_favorite));
        measurement
    }

    #[rstest]
    #[case(-10, Ok(-10))]
    #[case(0, Ok(0))]
    #[case(10, Ok(10))]
    #[case(11, Err(RatingError::OutOfRange(11)))]
    #[case(-11, Err(RatingError::OutOfRange(-11)))]
    #[case(1000, Err(RatingError::OutOfRange(1000)))]
    fn rating_range(#[case] value: i64, #[case] expected: Result<i8, RatingError>) {
        assert_eq!(
            Rating::new(value).map(|rating| rating.value()),
            expected
        );
    }

    #[test]
    fn out_of_range_ratings_are_rejected_when_deserializing() {
        let result: Result<Rating, _> = serde_json::from_str("12");

        assert!(result.is_err());
    }

    #[test]
    fn score_is_sum_of_ratings() {
        // given
        let ratings = Ratings {
            bass: rating(3),
            treble: rating(-2),
            vocals: rating(5),
            soundstage: rating(0),
        };

        // then
        assert_eq!(ratings.score(), 6);
    }

    #[test]
    fn new_measurement_is_not_a_favorite() {
        // given
        let new = NewMeasurement {
            distance_from_front_wall: Some(Distance::from_feet(5.5).unwrap()),
            name: Some("  ".to_string()),
            ..Default::default()
        };

        // when
        let measurement = Measurement::new(
            Uuid::nil(),
            datetime!(2025-01-01 00:00 UTC),
            new,
            Some("Cardas Golden Ratio".to_string()),
        );

        // then
        assert!(!measurement.is_favorite);
        assert_eq!(measurement.name, None);
        assert_eq!(
            measurement.baseline_method_name,
            Some("Cardas Golden Ratio".to_string())
        );
    }

    #[test]
    fn updates() {
        // given
        let mut measurement = measurement(datetime!(2025-01-01 00:00 UTC), false);

        // when
        measurement.apply(MeasurementUpdate::ToggleFavorite);
        measurement.apply(MeasurementUpdate::Rename(Some(" Closer to wall ".to_string())));

        // then
        assert!(measurement.is_favorite);
        assert_eq!(measurement.name, Some("Closer to wall".to_string()));

        // when
        measurement.apply(MeasurementUpdate::ToggleFavorite);
        measurement.apply(MeasurementUpdate::Rename(Some("".to_string())));

        // then
        assert!(!measurement.is_favorite);
        assert_eq!(measurement.name, None);
    }

    #[test]
    fn favourites_are_listed_first_then_newest() {
        // given
        let old_favorite = measurement(datetime!(2025-01-01 00:00 UTC), true);
        let old = measurement(datetime!(2025-01-02 00:00 UTC), false);
        let new_favorite = measurement(datetime!(2025-01-03 00:00 UTC), true);
        let new = measurement(datetime!(2025-01-04 00:00 UTC), false);

        let mut measurements = vec![old.clone(), new_favorite.clone(), new.clone(), old_favorite.clone()];

        // when
        sort_for_display(&mut measurements);

        // then
        assert_eq!(measurements, vec![new_favorite, old_favorite, new, old]);
    }

    #[test]
    fn measurement_record_shape() {
        // given
        let new = NewMeasurement {
            distance_from_front_wall: Some(Distance::from_feet(5.5).unwrap()),
            distance_from_side_wall: None,
            listening_position: Some(Distance::from_feet(9.0).unwrap()),
            ratings: Ratings {
                bass: rating(2),
                treble: rating(-1),
                vocals: rating(0),
                soundstage: rating(4),
            },
            name: None,
        };
        let measurement = Measurement::new(Uuid::nil(), datetime!(2025-01-02 03:04:05 UTC), new, None);

        // when
        let json = serde_json::to_string_pretty(&measurement).unwrap();

        // then
        assert_eq!(json, indoc! {r#"
            {
              "id": "00000000-0000-0000-0000-000000000000",
              "distanceFromFrontWall": 5.5,
              "distanceFromSideWall": null,
              "listeningPosition": 9.0,
              "bass": 2,
              "treble": -1,
              "vocals": 0,
              "soundstage": 4,
              "isFavorite": false,
              "name": null,
              "baselineMethodName": null,
              "createdAt": "2025-01-02T03:04:05Z"
            }"#});

        // and
        let round_tripped: Measurement = serde_json::from_str(&json).unwrap();
        assert_eq!(round_tripped, measurement);
    }
}
