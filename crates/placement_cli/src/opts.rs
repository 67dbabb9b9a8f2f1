#![deny(missing_docs)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use cli::args::{PlacementMethodArg, SpeakerTypeArg, UnitSystemArg};
use cli::parsers::{rating_parser, MajorMinorArg, MajorMinorParser};
use placement::Rating;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "placement_cli")]
#[command(bin_name = "placement_cli")]
#[command(version, about, long_about = None)]
pub(crate) struct Opts {
    #[command(subcommand)]
    pub(crate) command: ModeCommand,

    /// Directory for records and configuration
    #[arg(long, global = true, default_value = ".", env = "PLACEMENT_DATA_DIR")]
    pub(crate) data_dir: PathBuf,

    /// Unit system for entering and displaying distances, overrides the configured unit system
    #[arg(long, global = true, value_enum)]
    pub(crate) unit: Option<UnitSystemArg>,

    /// Trace log file
    #[arg(long, num_args = 0..=1, default_missing_value = "trace.log")]
    pub(crate) trace: Option<PathBuf>,

    #[command(flatten)]
    pub(crate) verbose: Verbosity<InfoLevel>,
}

#[derive(Debug, Subcommand)]
pub(crate) enum ModeCommand {
    /// Baseline mode
    Baseline {
        #[command(subcommand)]
        command: BaselineCommand,
    },

    /// Measurement mode
    Measurement {
        #[command(subcommand)]
        command: MeasurementCommand,
    },

    /// Export records
    Export {
        #[command(subcommand)]
        command: ExportCommand,
    },

    /// Format a distance in both unit systems
    Format {
        /// A distance, e.g. `8' 5 1/2"` or `2m 15cm`, a plain number is inches or centimetres
        #[arg(allow_hyphen_values = true)]
        distance: String,

        /// Treat the distance as decimal feet
        #[arg(long)]
        feet: bool,
    },

    /// Configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Room dimensions and positions are given as '<MAJOR>[:<MINOR>]', e.g. '12:6' for 12ft 6in, or '3:50' for 3m 50cm.
#[derive(Debug, Subcommand)]
pub(crate) enum BaselineCommand {
    /// Compute a baseline, it becomes the active baseline
    Compute {
        /// Placement method
        #[arg(long, value_enum)]
        method: PlacementMethodArg,

        /// Speaker type
        #[arg(long, value_enum, default_value_t = SpeakerTypeArg::Conventional)]
        speaker_type: SpeakerTypeArg,

        /// Room length
        #[arg(long, value_parser = MajorMinorParser::default(), value_name = "MAJOR[:MINOR]")]
        length: Option<MajorMinorArg>,

        /// Room width
        #[arg(long, value_parser = MajorMinorParser::default(), value_name = "MAJOR[:MINOR]")]
        width: Option<MajorMinorArg>,

        /// Ceiling height
        #[arg(long, value_parser = MajorMinorParser::default(), value_name = "MAJOR[:MINOR]")]
        height: Option<MajorMinorArg>,

        /// Speaker distance from the side wall, for the equilateral triangle method
        #[arg(long, value_parser = MajorMinorParser::default(), value_name = "MAJOR[:MINOR]")]
        sidewall_distance: Option<MajorMinorArg>,

        /// Front wall distance, for the manual method
        #[arg(long, value_parser = MajorMinorParser::default(), value_name = "MAJOR[:MINOR]")]
        front_wall: Option<MajorMinorArg>,

        /// Side wall distance, for the manual method
        #[arg(long, value_parser = MajorMinorParser::default(), value_name = "MAJOR[:MINOR]")]
        side_wall: Option<MajorMinorArg>,

        /// Listening position, for the manual method
        #[arg(long, value_parser = MajorMinorParser::default(), value_name = "MAJOR[:MINOR]")]
        listening_position: Option<MajorMinorArg>,
    },

    /// List the active baseline and the previous baselines
    List,

    /// Delete a baseline
    Delete {
        /// Baseline id
        #[arg(long)]
        id: Uuid,
    },

    /// Delete all baselines
    Clear,
}

/// Distances are free text, e.g. `8' 5 1/2"` or `2m 15cm`, a plain number is inches or centimetres.
#[derive(Debug, Subcommand)]
pub(crate) enum MeasurementCommand {
    /// Add a measurement, taken against the active baseline
    Add {
        /// Distance from the front wall
        #[arg(long)]
        front_wall: Option<String>,

        /// Distance from the side wall
        #[arg(long)]
        side_wall: Option<String>,

        /// Listening position
        #[arg(long)]
        listening_position: Option<String>,

        /// Bass rating, -10 to 10
        #[arg(long, value_parser = rating_parser, allow_negative_numbers = true, default_value = "0")]
        bass: Rating,

        /// Treble rating, -10 to 10
        #[arg(long, value_parser = rating_parser, allow_negative_numbers = true, default_value = "0")]
        treble: Rating,

        /// Vocals rating, -10 to 10
        #[arg(long, value_parser = rating_parser, allow_negative_numbers = true, default_value = "0")]
        vocals: Rating,

        /// Soundstage rating, -10 to 10
        #[arg(long, value_parser = rating_parser, allow_negative_numbers = true, default_value = "0")]
        soundstage: Rating,

        /// Name
        #[arg(long)]
        name: Option<String>,
    },

    /// List measurements, favourites first
    List,

    /// Toggle the favorite flag of a measurement
    Favorite {
        /// Measurement id
        #[arg(long)]
        id: Uuid,
    },

    /// Rename a measurement, omit the name to clear it
    Rename {
        /// Measurement id
        #[arg(long)]
        id: Uuid,

        /// Name
        #[arg(long)]
        name: Option<String>,
    },

    /// Delete a measurement
    Delete {
        /// Measurement id
        #[arg(long)]
        id: Uuid,
    },

    /// Delete all measurements
    Clear,
}

#[derive(Debug, Subcommand)]
pub(crate) enum ExportCommand {
    /// Export measurements as CSV
    Csv {
        /// Output file, defaults to stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Export all records as JSON
    Json {
        /// Output file, defaults to stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Subcommand)]
pub(crate) enum ConfigCommand {
    /// Set the default unit system
    SetUnit {
        /// Unit system
        #[arg(value_enum)]
        unit: UnitSystemArg,
    },

    /// Show the configuration
    Show,
}
