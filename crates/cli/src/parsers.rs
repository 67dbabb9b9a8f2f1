use std::ffi::OsStr;

use clap::builder::TypedValueParser;
use clap::error::ErrorKind;
use clap::{Arg, Command, Error};
use placement::{EnteredDistance, Rating};
use placement_units::{parse_numeric_input, UnitSystem};

/// A major/minor distance pair as given on the command line, e.g. feet and inches.
///
/// The unit system is supplied separately, see [`MajorMinorArg::entered_in`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MajorMinorArg {
    pub major: String,
    pub minor: String,
}

impl MajorMinorArg {
    pub fn entered_in(&self, unit_system: UnitSystem) -> EnteredDistance {
        EnteredDistance::new(self.major.clone(), self.minor.clone(), unit_system)
    }
}

#[derive(Clone, Default)]
pub struct MajorMinorParser {}

impl TypedValueParser for MajorMinorParser {
    type Value = MajorMinorArg;

    /// Parses a value in the format '<MAJOR>[:<MINOR>]', e.g. '12:6' for 12ft 6in, ':6' for 6in, or '3:50' for 3m 50cm.
    fn parse_ref(&self, _cmd: &Command, _arg: Option<&Arg>, value: &OsStr) -> Result<Self::Value, Error> {
        let value = value
            .to_str()
            .ok_or_else(|| Error::raw(ErrorKind::InvalidValue, "Invalid argument encoding"))?;

        major_minor_parser(value).map_err(|message| Error::raw(ErrorKind::InvalidValue, message))
    }
}

pub fn major_minor_parser(s: &str) -> Result<MajorMinorArg, String> {
    let chunks: Vec<_> = s.split(':').collect();
    let (major, minor) = match chunks.as_slice() {
        [major] => (*major, ""),
        [major, minor] => (*major, *minor),
        _ => {
            return Err(format!(
                "Invalid argument. Required format: '<MAJOR>[:<MINOR>]', found: '{}'",
                s
            ))
        }
    };

    let errors: Vec<_> = [("major", major), ("minor", minor)]
        .into_iter()
        .filter(|(_, value)| !value.trim().is_empty() && parse_numeric_input(value).is_none())
        .map(|(name, value)| format!("Invalid {} value: '{}', expected a non-negative number", name, value))
        .collect();

    if !errors.is_empty() {
        return Err(errors.join("; "));
    }

    if major.trim().is_empty() && minor.trim().is_empty() {
        return Err(format!("Invalid argument. A value is required, found: '{}'", s));
    }

    Ok(MajorMinorArg {
        major: major.trim().to_string(),
        minor: minor.trim().to_string(),
    })
}

pub fn rating_parser(s: &str) -> Result<Rating, String> {
    let value: i64 = s
        .trim()
        .parse()
        .map_err(|_| format!("Invalid rating: '{}', expected a whole number", s))?;

    Rating::new(value).map_err(|error| error.to_string())
}
