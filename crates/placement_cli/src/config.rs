use std::path::{Path, PathBuf};

use placement_units::UnitSystem;
use thiserror::Error;
use tracing::{debug, info};

const CONFIG_FILE_NAME: &str = "config.json";

#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)] // if we add new fields, give them default values when deserializing old config
pub struct Config {
    pub unit_system: UnitSystem,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            unit_system: UnitSystem::Imperial,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unable to load config. path: {path}, cause: {cause}")]
    UnableToLoad { path: PathBuf, cause: std::io::Error },

    #[error("Unable to save config. path: {path}, cause: {cause}")]
    UnableToSave { path: PathBuf, cause: std::io::Error },
}

impl Config {
    pub fn path(data_dir: &Path) -> PathBuf {
        data_dir.join(CONFIG_FILE_NAME)
    }

    /// The default config is used when there is no config file
    pub fn load_or_default(data_dir: &Path) -> Result<Self, ConfigError> {
        let path = Self::path(data_dir);
        if !path.exists() {
            debug!("No config file, using defaults. path: {}", path.display());
            return Ok(Self::default());
        }

        stores::json::load(&path).map_err(|cause| ConfigError::UnableToLoad {
            path,
            cause,
        })
    }

    pub fn save(&self, data_dir: &Path) -> Result<(), ConfigError> {
        let path = Self::path(data_dir);

        std::fs::create_dir_all(data_dir)
            .and_then(|_| stores::json::save(self, &path))
            .map_err(|cause| ConfigError::UnableToSave {
                path: path.clone(),
                cause,
            })?;
        info!("Saved config. path: {}", path.display());

        Ok(())
    }
}
