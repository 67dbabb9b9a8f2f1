use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

pub fn load<T: DeserializeOwned>(file_path: &Path) -> Result<T, std::io::Error> {
    let file = File::open(file_path)?;
    let mut de = serde_json::Deserializer::from_reader(file);
    let t = T::deserialize(&mut de)?;
    Ok(t)
}

/// Pretty printed, 4 space indent and a trailing newline.
pub fn save<T: Serialize>(t: &T, file_path: &Path) -> Result<(), std::io::Error> {
    let file = File::create(file_path)?;
    write(t, file)
}

pub fn write<T: Serialize, W: Write>(t: &T, writer: W) -> Result<(), std::io::Error> {
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(writer, formatter);
    t.serialize(&mut ser)?;

    let mut writer = ser.into_inner();
    writer.write_all(b"\n")?;

    Ok(())
}
