//! Local store, records are kept as JSON arrays in a key-value store.

#[cfg(any(test, feature = "testing"))]
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use placement::{
    sort_for_display, sort_newest_first, Baseline, Measurement, MeasurementUpdate, NewBaseline, NewMeasurement,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use time::OffsetDateTime;
use tracing::{debug, info, trace, Level};
use uuid::Uuid;

use crate::{json, BaselineStore, MeasurementStore, StoreError};

pub const MEASUREMENTS_KEY: &str = "distance-measurements";
pub const BASELINES_KEY: &str = "speaker-baseline";
/// Set once the local records have been copied to the remote store.
pub const MIGRATED_KEY: &str = "supabase-migrated";

pub trait KeyValueStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<Value>>;
    fn set(&mut self, key: &str, value: Value) -> anyhow::Result<()>;
    fn remove(&mut self, key: &str) -> anyhow::Result<()>;
}

/// Each key is stored in its own file, `<directory>/<key>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    directory: PathBuf,
}

impl JsonFileStore {
    pub fn new(directory: PathBuf) -> Self {
        Self {
            directory,
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn path(&self, key: &str) -> PathBuf {
        self.directory
            .join(format!("{}.json", key))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<Value>> {
        let path = self.path(key);
        if !path.exists() {
            return Ok(None);
        }

        let value = json::load(&path).with_context(|| format!("Error loading file. path: {}", path.display()))?;
        Ok(Some(value))
    }

    fn set(&mut self, key: &str, value: Value) -> anyhow::Result<()> {
        std::fs::create_dir_all(&self.directory)
            .with_context(|| format!("Error creating directory. path: {}", self.directory.display()))?;

        let path = self.path(key);
        json::save(&value, &path).with_context(|| format!("Error saving file. path: {}", path.display()))?;
        trace!("Saved file. path: {}", path.display());

        Ok(())
    }

    fn remove(&mut self, key: &str) -> anyhow::Result<()> {
        let path = self.path(key);
        if path.exists() {
            std::fs::remove_file(&path).with_context(|| format!("Error removing file. path: {}", path.display()))?;
        }
        Ok(())
    }
}

#[cfg(any(test, feature = "testing"))]
#[derive(Debug, Default, Clone)]
pub struct MemoryKeyValueStore {
    values: BTreeMap<String, Value>,
}

#[cfg(any(test, feature = "testing"))]
impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<Value>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> anyhow::Result<()> {
        self.values
            .insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> anyhow::Result<()> {
        self.values.remove(key);
        Ok(())
    }
}

/// Records are stored oldest first, in the order they were saved.
#[derive(Debug, Clone)]
pub struct LocalStore<S> {
    store: S,
}

impl<S: KeyValueStore> LocalStore<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
        }
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    pub fn is_migrated(&self) -> Result<bool, StoreError> {
        let value = self
            .store
            .get(MIGRATED_KEY)
            .map_err(|reason| StoreError::UnableToLoad {
                key: MIGRATED_KEY.to_string(),
                reason,
            })?;

        Ok(match value {
            Some(Value::Bool(migrated)) => migrated,
            Some(Value::String(migrated)) => migrated == "true",
            _ => false,
        })
    }

    pub fn set_migrated(&mut self) -> Result<(), StoreError> {
        self.store
            .set(MIGRATED_KEY, Value::Bool(true))
            .map_err(|reason| StoreError::UnableToStore {
                key: MIGRATED_KEY.to_string(),
                reason,
            })
    }

    fn load_records<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, StoreError> {
        let unable_to_load = |reason: anyhow::Error| StoreError::UnableToLoad {
            key: key.to_string(),
            reason,
        };

        match self
            .store
            .get(key)
            .map_err(unable_to_load)?
        {
            None => Ok(vec![]),
            Some(value) => serde_json::from_value(value).map_err(|err| unable_to_load(err.into())),
        }
    }

    fn store_records<T: Serialize>(&mut self, key: &str, records: &[T]) -> Result<(), StoreError> {
        let unable_to_store = |reason: anyhow::Error| StoreError::UnableToStore {
            key: key.to_string(),
            reason,
        };

        let value = serde_json::to_value(records).map_err(|err| unable_to_store(err.into()))?;
        self.store
            .set(key, value)
            .map_err(unable_to_store)
    }

    fn remove_records(&mut self, key: &str) -> Result<(), StoreError> {
        self.store
            .remove(key)
            .map_err(|reason| StoreError::UnableToStore {
                key: key.to_string(),
                reason,
            })
    }

    /// Load the records, apply the operation, and store the records, unless the operation fails.
    fn perform_operation<T, F, R>(&mut self, key: &str, f: F) -> Result<R, StoreError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(&mut Vec<T>) -> Result<R, StoreError>,
    {
        let mut records = self.load_records(key)?;
        let result = f(&mut records)?;
        self.store_records(key, &records)?;

        Ok(result)
    }
}

impl<S: KeyValueStore> MeasurementStore for LocalStore<S> {
    fn measurements(&self) -> Result<Vec<Measurement>, StoreError> {
        let mut measurements: Vec<Measurement> = self.load_records(MEASUREMENTS_KEY)?;
        // most recently saved first when creation times are equal
        measurements.reverse();
        sort_for_display(&mut measurements);

        Ok(measurements)
    }

    #[tracing::instrument(level = Level::DEBUG, skip(self))]
    fn save_measurement(
        &mut self,
        new: NewMeasurement,
        baseline_method_name: Option<String>,
    ) -> Result<Measurement, StoreError> {
        let measurement = Measurement::new(Uuid::new_v4(), OffsetDateTime::now_utc(), new, baseline_method_name);

        self.perform_operation(MEASUREMENTS_KEY, |measurements: &mut Vec<Measurement>| {
            measurements.push(measurement.clone());
            Ok(())
        })?;
        info!("Saved measurement. id: {}", measurement.id);

        Ok(measurement)
    }

    #[tracing::instrument(level = Level::DEBUG, skip(self))]
    fn update_measurement(&mut self, id: Uuid, update: MeasurementUpdate) -> Result<Measurement, StoreError> {
        let measurement = self.perform_operation(MEASUREMENTS_KEY, |measurements: &mut Vec<Measurement>| {
            let measurement = measurements
                .iter_mut()
                .find(|measurement| measurement.id == id)
                .ok_or(StoreError::NotFound(id))?;

            measurement.apply(update);
            Ok(measurement.clone())
        })?;
        info!("Updated measurement. id: {}", id);

        Ok(measurement)
    }

    fn delete_measurement(&mut self, id: Uuid) -> Result<(), StoreError> {
        self.perform_operation(MEASUREMENTS_KEY, |measurements: &mut Vec<Measurement>| {
            let count = measurements.len();
            measurements.retain(|measurement| measurement.id != id);
            match measurements.len() == count {
                true => Err(StoreError::NotFound(id)),
                false => Ok(()),
            }
        })?;
        info!("Deleted measurement. id: {}", id);

        Ok(())
    }

    fn clear_measurements(&mut self) -> Result<(), StoreError> {
        self.remove_records(MEASUREMENTS_KEY)?;
        info!("Cleared measurements");
        Ok(())
    }
}

impl<S: KeyValueStore> BaselineStore for LocalStore<S> {
    fn baselines(&self) -> Result<Vec<Baseline>, StoreError> {
        let mut baselines: Vec<Baseline> = self.load_records(BASELINES_KEY)?;
        baselines.reverse();
        sort_newest_first(&mut baselines);

        Ok(baselines)
    }

    #[tracing::instrument(level = Level::DEBUG, skip(self))]
    fn save_baseline(&mut self, new: NewBaseline) -> Result<Baseline, StoreError> {
        let baseline = Baseline::from_new(new, Uuid::new_v4(), OffsetDateTime::now_utc());

        self.perform_operation(BASELINES_KEY, |baselines: &mut Vec<Baseline>| {
            baselines.push(baseline.clone());
            debug!("Baseline count: {}", baselines.len());
            Ok(())
        })?;
        info!(
            "Saved baseline. id: {}, method: {}",
            baseline.id, baseline.calculation_type
        );

        Ok(baseline)
    }

    fn delete_baseline(&mut self, id: Uuid) -> Result<(), StoreError> {
        self.perform_operation(BASELINES_KEY, |baselines: &mut Vec<Baseline>| {
            let count = baselines.len();
            baselines.retain(|baseline| baseline.id != id);
            match baselines.len() == count {
                true => Err(StoreError::NotFound(id)),
                false => Ok(()),
            }
        })?;
        info!("Deleted baseline. id: {}", id);

        Ok(())
    }

    fn clear_baselines(&mut self) -> Result<(), StoreError> {
        self.remove_records(BASELINES_KEY)?;
        info!("Cleared baselines");
        Ok(())
    }
}
