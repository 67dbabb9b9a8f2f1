use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use placement::{
    Baseline, ManualPositions, Measurement, MeasurementUpdate, NewBaseline, NewMeasurement, PlacementInputs, Ratings,
    RoomDimensions,
};
use placement_units::{format_feet, parse_distance, Distance, UnitSystem, PLACEHOLDER};
use stores::export::{export_json, export_measurements_csv};
use stores::local::JsonFileStore;
use stores::{BaselineStore, LocalStore, MeasurementStore, RecordStore};
use time::format_description::well_known::Rfc3339;
use tracing::info;

use crate::config::Config;
use crate::opts::{BaselineCommand, ConfigCommand, ExportCommand, MeasurementCommand, ModeCommand};

pub(crate) struct Session {
    pub(crate) store: LocalStore<JsonFileStore>,
    pub(crate) data_dir: PathBuf,
    pub(crate) config: Config,
    pub(crate) unit_system: UnitSystem,
}

pub(crate) fn run<W: Write>(session: &mut Session, command: ModeCommand, out: &mut W) -> anyhow::Result<()> {
    match command {
        ModeCommand::Baseline {
            command,
        } => run_baseline(session, command, out),
        ModeCommand::Measurement {
            command,
        } => run_measurement(session, command, out),
        ModeCommand::Export {
            command,
        } => run_export(session, command, out),
        ModeCommand::Format {
            distance,
            feet,
        } => {
            let value = match feet {
                true => distance.trim().parse::<f64>().ok(),
                false => parse_distance(&distance, session.unit_system).map(|distance| distance.feet()),
            };

            let feet = value
                .filter(|feet| feet.is_finite() && *feet >= 0.0)
                .map(|feet| feet.to_string())
                .unwrap_or(PLACEHOLDER.to_string());

            writeln!(out, "feet: {}", feet)?;
            for unit_system in UnitSystem::ALL {
                writeln!(out, "{}: {}", unit_system, format_feet(value, unit_system))?;
            }
            Ok(())
        }
        ModeCommand::Config {
            command,
        } => run_config(session, command, out),
    }
}

fn run_baseline<W: Write>(session: &mut Session, command: BaselineCommand, out: &mut W) -> anyhow::Result<()> {
    let unit_system = session.unit_system;

    match command {
        BaselineCommand::Compute {
            method,
            speaker_type,
            length,
            width,
            height,
            sidewall_distance,
            front_wall,
            side_wall,
            listening_position,
        } => {
            let entered = |arg: Option<cli::parsers::MajorMinorArg>| arg.map(|arg| arg.entered_in(unit_system));

            let inputs = PlacementInputs {
                room: RoomDimensions {
                    length: entered(length),
                    width: entered(width),
                    height: entered(height),
                },
                sidewall_distance: entered(sidewall_distance),
                manual: ManualPositions {
                    front_wall: entered(front_wall),
                    side_wall: entered(side_wall),
                    listening_position: entered(listening_position),
                },
            };

            let new = NewBaseline::compute(method.into(), &inputs, speaker_type.into(), unit_system)?;
            let baseline = session.store.save_baseline(new)?;

            writeln!(out, "Saved baseline. id: {}", baseline.id)?;
            write_baseline(out, &baseline, unit_system)?;
        }
        BaselineCommand::List => {
            let mut baselines = session.store.baselines()?.into_iter();

            match baselines.next() {
                Some(active) => {
                    writeln!(out, "Active baseline:")?;
                    write_baseline(out, &active, unit_system)?;
                }
                None => writeln!(out, "No baseline")?,
            }

            let previous: Vec<_> = baselines.collect();
            if !previous.is_empty() {
                writeln!(out, "Previous baselines:")?;
                for baseline in previous.iter() {
                    write_baseline(out, baseline, unit_system)?;
                }
            }
        }
        BaselineCommand::Delete {
            id,
        } => {
            session.store.delete_baseline(id)?;
            writeln!(out, "Deleted baseline. id: {}", id)?;
        }
        BaselineCommand::Clear => {
            session.store.clear_baselines()?;
            writeln!(out, "Cleared baselines")?;
        }
    }

    Ok(())
}

fn run_measurement<W: Write>(session: &mut Session, command: MeasurementCommand, out: &mut W) -> anyhow::Result<()> {
    let unit_system = session.unit_system;

    match command {
        MeasurementCommand::Add {
            front_wall,
            side_wall,
            listening_position,
            bass,
            treble,
            vocals,
            soundstage,
            name,
        } => {
            let new = NewMeasurement {
                distance_from_front_wall: parse_optional_distance(front_wall, unit_system)?,
                distance_from_side_wall: parse_optional_distance(side_wall, unit_system)?,
                listening_position: parse_optional_distance(listening_position, unit_system)?,
                ratings: Ratings {
                    bass,
                    treble,
                    vocals,
                    soundstage,
                },
                name,
            };

            let measurement = session.store.record_measurement(new)?;

            writeln!(out, "Added measurement. id: {}", measurement.id)?;
            write_measurement(out, &measurement, unit_system)?;
        }
        MeasurementCommand::List => {
            let measurements = session.store.measurements()?;
            if measurements.is_empty() {
                writeln!(out, "No measurements")?;
            }
            for measurement in measurements.iter() {
                write_measurement(out, measurement, unit_system)?;
            }
        }
        MeasurementCommand::Favorite {
            id,
        } => {
            let measurement = session
                .store
                .update_measurement(id, MeasurementUpdate::ToggleFavorite)?;
            write_measurement(out, &measurement, unit_system)?;
        }
        MeasurementCommand::Rename {
            id,
            name,
        } => {
            let measurement = session
                .store
                .update_measurement(id, MeasurementUpdate::Rename(name))?;
            write_measurement(out, &measurement, unit_system)?;
        }
        MeasurementCommand::Delete {
            id,
        } => {
            session.store.delete_measurement(id)?;
            writeln!(out, "Deleted measurement. id: {}", id)?;
        }
        MeasurementCommand::Clear => {
            session.store.clear_measurements()?;
            writeln!(out, "Cleared measurements")?;
        }
    }

    Ok(())
}

fn run_export<W: Write>(session: &mut Session, command: ExportCommand, out: &mut W) -> anyhow::Result<()> {
    let measurements = session.store.measurements()?;

    match command {
        ExportCommand::Csv {
            output,
        } => match output {
            Some(path) => {
                let file = create_file(&path)?;
                export_measurements_csv(file, &measurements, session.unit_system)?;
                info!("Exported CSV. path: {}", path.display());
            }
            None => export_measurements_csv(&mut *out, &measurements, session.unit_system)?,
        },
        ExportCommand::Json {
            output,
        } => {
            let baselines = session.store.baselines()?;
            match output {
                Some(path) => {
                    let file = create_file(&path)?;
                    export_json(file, &measurements, &baselines)?;
                    info!("Exported JSON. path: {}", path.display());
                }
                None => export_json(&mut *out, &measurements, &baselines)?,
            }
        }
    }

    Ok(())
}

fn run_config<W: Write>(session: &mut Session, command: ConfigCommand, out: &mut W) -> anyhow::Result<()> {
    match command {
        ConfigCommand::SetUnit {
            unit,
        } => {
            session.config.unit_system = unit.into();
            session
                .config
                .save(&session.data_dir)?;
            writeln!(out, "unit system: {}", session.config.unit_system)?;
        }
        ConfigCommand::Show => {
            writeln!(out, "unit system: {}", session.config.unit_system)?;
            writeln!(out, "display unit system: {}", session.unit_system)?;
            writeln!(out, "data directory: {}", session.data_dir.display())?;
        }
    }

    Ok(())
}

fn create_file(path: &Path) -> anyhow::Result<File> {
    File::create(path).with_context(|| format!("Creating file. path: {}", path.display()))
}

fn parse_optional_distance(value: Option<String>, unit_system: UnitSystem) -> anyhow::Result<Option<Distance>> {
    match value {
        None => Ok(None),
        Some(value) if value.trim().is_empty() => Ok(None),
        Some(value) => parse_distance(&value, unit_system)
            .map(Some)
            .ok_or_else(|| anyhow!("Invalid distance. value: '{}', unit system: {}", value, unit_system)),
    }
}

fn write_baseline<W: Write>(out: &mut W, baseline: &Baseline, unit_system: UnitSystem) -> anyhow::Result<()> {
    writeln!(
        out,
        "{} ({}) id: {}, created: {}",
        baseline.method_name,
        baseline.speaker_type,
        baseline.id,
        baseline.created_at.format(&Rfc3339)?
    )?;
    for result in baseline.values.iter() {
        writeln!(
            out,
            "    {}: {}, formula: {}",
            result.label,
            result.display_value(unit_system),
            result.formula
        )?;
    }
    Ok(())
}

fn write_measurement<W: Write>(out: &mut W, measurement: &Measurement, unit_system: UnitSystem) -> anyhow::Result<()> {
    let distance = |distance: Option<Distance>| placement_units::format_distance(distance, unit_system);

    writeln!(
        out,
        "{} {} name: {}, baseline: {}, created: {}",
        match measurement.is_favorite {
            true => "*",
            false => "-",
        },
        measurement.id,
        measurement
            .name
            .as_deref()
            .unwrap_or(PLACEHOLDER),
        measurement
            .baseline_method_name
            .as_deref()
            .unwrap_or(PLACEHOLDER),
        measurement.created_at.format(&Rfc3339)?
    )?;
    writeln!(
        out,
        "    front wall: {}, side wall: {}, listening position: {}",
        distance(measurement.distance_from_front_wall),
        distance(measurement.distance_from_side_wall),
        distance(measurement.listening_position),
    )?;
    writeln!(
        out,
        "    bass: {}, treble: {}, vocals: {}, soundstage: {}, score: {}",
        measurement.bass,
        measurement.treble,
        measurement.vocals,
        measurement.soundstage,
        measurement.score()
    )?;
    Ok(())
}
