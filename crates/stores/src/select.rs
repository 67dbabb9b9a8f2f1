use placement::{Baseline, Measurement, MeasurementUpdate, NewBaseline, NewMeasurement};
use tracing::info;
use uuid::Uuid;

use crate::local::{KeyValueStore, LocalStore};
use crate::remote::{RemoteBackend, RemoteStore, UserId};
use crate::{BaselineStore, MeasurementStore, StoreError};

/// The store used for the current session, remote when a user is signed in, local otherwise.
pub enum SelectedStore<S, B> {
    Local(LocalStore<S>),
    Remote(RemoteStore<B>),
}

impl<S: KeyValueStore, B: RemoteBackend> SelectedStore<S, B> {
    pub fn select(user_id: Option<UserId>, local: LocalStore<S>, backend: B) -> Self {
        match user_id {
            Some(user_id) => {
                info!("Using remote store. user: {}", user_id);
                SelectedStore::Remote(RemoteStore::new(backend, user_id))
            }
            None => {
                info!("Using local store");
                SelectedStore::Local(local)
            }
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, SelectedStore::Remote(_))
    }
}

impl<S: KeyValueStore, B: RemoteBackend> MeasurementStore for SelectedStore<S, B> {
    fn measurements(&self) -> Result<Vec<Measurement>, StoreError> {
        match self {
            SelectedStore::Local(store) => store.measurements(),
            SelectedStore::Remote(store) => store.measurements(),
        }
    }

    fn save_measurement(
        &mut self,
        new: NewMeasurement,
        baseline_method_name: Option<String>,
    ) -> Result<Measurement, StoreError> {
        match self {
            SelectedStore::Local(store) => store.save_measurement(new, baseline_method_name),
            SelectedStore::Remote(store) => store.save_measurement(new, baseline_method_name),
        }
    }

    fn update_measurement(&mut self, id: Uuid, update: MeasurementUpdate) -> Result<Measurement, StoreError> {
        match self {
            SelectedStore::Local(store) => store.update_measurement(id, update),
            SelectedStore::Remote(store) => store.update_measurement(id, update),
        }
    }

    fn delete_measurement(&mut self, id: Uuid) -> Result<(), StoreError> {
        match self {
            SelectedStore::Local(store) => store.delete_measurement(id),
            SelectedStore::Remote(store) => store.delete_measurement(id),
        }
    }

    fn clear_measurements(&mut self) -> Result<(), StoreError> {
        match self {
            SelectedStore::Local(store) => store.clear_measurements(),
            SelectedStore::Remote(store) => store.clear_measurements(),
        }
    }
}

impl<S: KeyValueStore, B: RemoteBackend> BaselineStore for SelectedStore<S, B> {
    fn baselines(&self) -> Result<Vec<Baseline>, StoreError> {
        match self {
            SelectedStore::Local(store) => store.baselines(),
            SelectedStore::Remote(store) => store.baselines(),
        }
    }

    fn save_baseline(&mut self, new: NewBaseline) -> Result<Baseline, StoreError> {
        match self {
            SelectedStore::Local(store) => store.save_baseline(new),
            SelectedStore::Remote(store) => store.save_baseline(new),
        }
    }

    fn delete_baseline(&mut self, id: Uuid) -> Result<(), StoreError> {
        match self {
            SelectedStore::Local(store) => store.delete_baseline(id),
            SelectedStore::Remote(store) => store.delete_baseline(id),
        }
    }

    fn clear_baselines(&mut self) -> Result<(), StoreError> {
        match self {
            SelectedStore::Local(store) => store.clear_baselines(),
            SelectedStore::Remote(store) => store.clear_baselines(),
        }
    }
}
