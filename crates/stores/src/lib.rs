//! Stores are for loading/storing measurements and baselines.
//!
//! Store backends:
//! * Local, a key-value store where each key holds a JSON array of records, see [`LocalStore`].
//! * Remote, a hosted database with a row per record, owned by a user, see [`RemoteStore`].
//!
//! Callers pick one, based on whether there is a signed-in user, see [`SelectedStore`].

use placement::{Baseline, Measurement, MeasurementUpdate, NewBaseline, NewMeasurement};
use uuid::Uuid;

mod error;
pub mod export;
pub mod json;
pub mod local;
pub mod migrate;
pub mod remote;
mod select;

pub use error::StoreError;
pub use local::{KeyValueStore, LocalStore};
pub use remote::{RemoteBackend, RemoteStore, UserId};
pub use select::SelectedStore;

pub trait MeasurementStore {
    /// All measurements, favourites first, then newest first.
    fn measurements(&self) -> Result<Vec<Measurement>, StoreError>;

    /// Assigns the id and creation time, new measurements are never favourites.
    fn save_measurement(
        &mut self,
        new: NewMeasurement,
        baseline_method_name: Option<String>,
    ) -> Result<Measurement, StoreError>;

    fn update_measurement(&mut self, id: Uuid, update: MeasurementUpdate) -> Result<Measurement, StoreError>;

    fn delete_measurement(&mut self, id: Uuid) -> Result<(), StoreError>;

    fn clear_measurements(&mut self) -> Result<(), StoreError>;
}

pub trait BaselineStore {
    /// All baselines, newest first.
    fn baselines(&self) -> Result<Vec<Baseline>, StoreError>;

    /// The saved baseline becomes the active baseline.
    fn save_baseline(&mut self, new: NewBaseline) -> Result<Baseline, StoreError>;

    fn delete_baseline(&mut self, id: Uuid) -> Result<(), StoreError>;

    fn clear_baselines(&mut self) -> Result<(), StoreError>;

    /// The most recent baseline
    fn active_baseline(&self) -> Result<Option<Baseline>, StoreError> {
        Ok(self.baselines()?.into_iter().next())
    }

    /// All baselines except the active one, newest first
    fn previous_baselines(&self) -> Result<Vec<Baseline>, StoreError> {
        Ok(self
            .baselines()?
            .into_iter()
            .skip(1)
            .collect())
    }
}

pub trait RecordStore: MeasurementStore + BaselineStore {
    /// Save a measurement, taken against the active baseline, if any.
    fn record_measurement(&mut self, new: NewMeasurement) -> Result<Measurement, StoreError> {
        let baseline_method_name = self
            .active_baseline()?
            .map(|baseline| baseline.method_name);

        self.save_measurement(new, baseline_method_name)
    }
}

impl<T: MeasurementStore + BaselineStore> RecordStore for T {}
