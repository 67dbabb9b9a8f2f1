use std::io::Write;

use anyhow::Context;
use csv::QuoteStyle;
use placement::{Baseline, Measurement};
use placement_units::{format_distance, Distance, UnitSystem};
use time::format_description::well_known::Rfc3339;
use tracing::info;

use crate::json;

// in the order of the `MeasurementCsvRecord` fields
const MEASUREMENT_CSV_HEADERS: [&str; 15] = [
    "Created",
    "Name",
    "Favorite",
    "Baseline Method",
    "Front Wall",
    "Front Wall (ft)",
    "Side Wall",
    "Side Wall (ft)",
    "Listening Position",
    "Listening Position (ft)",
    "Bass",
    "Treble",
    "Vocals",
    "Soundstage",
    "Score",
];

#[derive(Debug, serde::Serialize)]
struct MeasurementCsvRecord {
    #[serde(rename = "Created")]
    created: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Favorite")]
    favorite: bool,
    #[serde(rename = "Baseline Method")]
    baseline_method: String,
    #[serde(rename = "Front Wall")]
    front_wall: String,
    #[serde(rename = "Front Wall (ft)")]
    front_wall_feet: Option<f64>,
    #[serde(rename = "Side Wall")]
    side_wall: String,
    #[serde(rename = "Side Wall (ft)")]
    side_wall_feet: Option<f64>,
    #[serde(rename = "Listening Position")]
    listening_position: String,
    #[serde(rename = "Listening Position (ft)")]
    listening_position_feet: Option<f64>,
    #[serde(rename = "Bass")]
    bass: i64,
    #[serde(rename = "Treble")]
    treble: i64,
    #[serde(rename = "Vocals")]
    vocals: i64,
    #[serde(rename = "Soundstage")]
    soundstage: i64,
    #[serde(rename = "Score")]
    score: i32,
}

impl MeasurementCsvRecord {
    fn build(measurement: &Measurement, unit_system: UnitSystem) -> anyhow::Result<Self> {
        let created = measurement
            .created_at
            .format(&Rfc3339)
            .with_context(|| format!("Formatting creation time. id: {}", measurement.id))?;

        let feet = |distance: Option<Distance>| distance.map(|distance| distance.feet());

        Ok(Self {
            created,
            name: measurement
                .name
                .clone()
                .unwrap_or_default(),
            favorite: measurement.is_favorite,
            baseline_method: measurement
                .baseline_method_name
                .clone()
                .unwrap_or_default(),
            front_wall: format_distance(measurement.distance_from_front_wall, unit_system),
            front_wall_feet: feet(measurement.distance_from_front_wall),
            side_wall: format_distance(measurement.distance_from_side_wall, unit_system),
            side_wall_feet: feet(measurement.distance_from_side_wall),
            listening_position: format_distance(measurement.listening_position, unit_system),
            listening_position_feet: feet(measurement.listening_position),
            bass: measurement.bass.into(),
            treble: measurement.treble.into(),
            vocals: measurement.vocals.into(),
            soundstage: measurement.soundstage.into(),
            score: measurement.score(),
        })
    }
}

/// Write the measurements as CSV, distances are formatted in the unit system and also given in raw feet.
///
/// The header row is always written, even when there are no measurements.
pub fn export_measurements_csv<W: Write>(
    writer: W,
    measurements: &[Measurement],
    unit_system: UnitSystem,
) -> anyhow::Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .has_headers(false)
        .from_writer(writer);

    writer
        .write_record(MEASUREMENT_CSV_HEADERS)
        .context("Writing header")?;

    for measurement in measurements {
        let record = MeasurementCsvRecord::build(measurement, unit_system)?;
        writer
            .serialize(record)
            .with_context(|| format!("Writing measurement. id: {}", measurement.id))?;
    }

    writer.flush()?;
    info!("Exported measurements. count: {}", measurements.len());

    Ok(())
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct RecordSet<'a> {
    measurements: &'a [Measurement],
    baselines: &'a [Baseline],
}

/// Write all the records as a single JSON document
pub fn export_json<W: Write>(writer: W, measurements: &[Measurement], baselines: &[Baseline]) -> anyhow::Result<()> {
    let record_set = RecordSet {
        measurements,
        baselines,
    };

    json::write(&record_set, writer).context("Writing records")?;
    info!(
        "Exported records. measurements: {}, baselines: {}",
        measurements.len(),
        baselines.len()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use placement::{MeasurementUpdate, NewMeasurement, Rating, Ratings};
    use time::macros::datetime;
    use uuid::Uuid;

    use super::*;

    fn measurement() -> Measurement {
        let new = NewMeasurement {
            distance_from_front_wall: Some(Distance::from_feet(8.5).unwrap()),
            distance_from_side_wall: None,
            listening_position: Some(Distance::from_feet(10.0).unwrap()),
            ratings: Ratings {
                bass: Rating::new(3).unwrap(),
                treble: Rating::new(-2).unwrap(),
                vocals: Rating::new(1).unwrap(),
                soundstage: Rating::new(0).unwrap(),
            },
            name: Some("Closer, wider".to_string()),
        };
        let mut measurement = Measurement::new(
            Uuid::nil(),
            datetime!(2025-03-04 05:06:07 UTC),
            new,
            Some("Rule of 1/3's".to_string()),
        );
        measurement.apply(MeasurementUpdate::SetFavorite(true));
        measurement
    }

    #[test]
    fn csv_export() {
        // given
        let mut output = vec![];

        // when
        export_measurements_csv(&mut output, &[measurement()], UnitSystem::Imperial).unwrap();

        // then
        let csv = String::from_utf8(output).unwrap();
        assert_eq!(csv, indoc! {r#"
            "Created","Name","Favorite","Baseline Method","Front Wall","Front Wall (ft)","Side Wall","Side Wall (ft)","Listening Position","Listening Position (ft)","Bass","Treble","Vocals","Soundstage","Score"
            "2025-03-04T05:06:07Z","Closer, wider","true","Rule of 1/3's","8' 6""","8.5","—","","10'","10.0","3","-2","1","0","2"
        "#});
    }

    #[test]
    fn csv_export_without_measurements_has_header() {
        // given
        let mut output = vec![];

        // when
        export_measurements_csv(&mut output, &[], UnitSystem::Imperial).unwrap();

        // then
        let csv = String::from_utf8(output).unwrap();
        assert_eq!(csv, indoc! {r#"
            "Created","Name","Favorite","Baseline Method","Front Wall","Front Wall (ft)","Side Wall","Side Wall (ft)","Listening Position","Listening Position (ft)","Bass","Treble","Vocals","Soundstage","Score"
        "#});
    }

    #[test]
    fn csv_export_in_metric() {
        // given
        let mut output = vec![];

        // when
        export_measurements_csv(&mut output, &[measurement()], UnitSystem::Metric).unwrap();

        // then
        let csv = String::from_utf8(output).unwrap();
        let row = csv.lines().nth(1).unwrap();
        assert!(row.contains(r#""2m 59.1cm","8.5""#));
        assert!(row.contains(r#""3m 4.8cm","10.0""#));
    }

    #[test]
    fn json_export() {
        // given
        let mut output = vec![];

        // when
        export_json(&mut output, &[measurement()], &[]).unwrap();

        // then
        let json = String::from_utf8(output).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["measurements"][0]["name"], "Closer, wider");
        assert_eq!(value["measurements"][0]["isFavorite"], true);
        assert_eq!(value["baselines"], serde_json::json!([]));
        assert!(json.ends_with("}\n"));
    }
}
