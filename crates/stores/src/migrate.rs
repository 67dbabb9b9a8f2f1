use std::collections::HashSet;

use tracing::info;
use uuid::Uuid;

use crate::local::{KeyValueStore, LocalStore};
use crate::remote::{RemoteBackend, RemoteStore};
use crate::{BaselineStore, MeasurementStore, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationOutcome {
    AlreadyMigrated,
    Migrated { measurements: usize, baselines: usize },
}

/// Copy the local records to the remote store, once.
///
/// Records keep their ids and creation times.  The local records are left in place, the local store is
/// flagged as migrated so that subsequent calls do nothing.
///
/// Records whose id is already present remotely are skipped, so a migration that failed part way can be
/// retried.  The counts in the outcome are of the records imported by this call.
pub fn migrate_local_to_remote<S: KeyValueStore, B: RemoteBackend>(
    local: &mut LocalStore<S>,
    remote: &mut RemoteStore<B>,
) -> Result<MigrationOutcome, StoreError> {
    if local.is_migrated()? {
        info!("Local records already migrated");
        return Ok(MigrationOutcome::AlreadyMigrated);
    }

    let measurements = local.measurements()?;
    let baselines = local.baselines()?;

    let remote_measurement_ids: HashSet<Uuid> = remote
        .measurements()?
        .iter()
        .map(|measurement| measurement.id)
        .collect();
    let remote_baseline_ids: HashSet<Uuid> = remote
        .baselines()?
        .iter()
        .map(|baseline| baseline.id)
        .collect();

    let mut imported_measurements = 0;
    for measurement in measurements
        .iter()
        .filter(|measurement| !remote_measurement_ids.contains(&measurement.id))
    {
        remote.import_measurement(measurement)?;
        imported_measurements += 1;
    }
    let mut imported_baselines = 0;
    for baseline in baselines
        .iter()
        .filter(|baseline| !remote_baseline_ids.contains(&baseline.id))
    {
        remote.import_baseline(baseline)?;
        imported_baselines += 1;
    }

    local.set_migrated()?;

    info!(
        "Migrated local records. user: {}, measurements: {}, baselines: {}",
        remote.user_id(),
        imported_measurements,
        imported_baselines
    );

    Ok(MigrationOutcome::Migrated {
        measurements: imported_measurements,
        baselines: imported_baselines,
    })
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use placement::{MeasurementUpdate, NewMeasurement};
    use serde_json::Value;

    use super::*;
    use crate::local::MemoryKeyValueStore;
    use crate::remote::{MemoryBackend, Table, UserId};

    /// Fails inserts once the allowance is used up, `None` allows any number of inserts.
    struct FlakyBackend {
        inner: MemoryBackend,
        remaining_inserts: Option<usize>,
    }

    impl RemoteBackend for FlakyBackend {
        fn select(&self, table: Table, user_id: &UserId) -> anyhow::Result<Vec<Value>> {
            self.inner.select(table, user_id)
        }

        fn insert(&mut self, table: Table, row: Value) -> anyhow::Result<Value> {
            match self.remaining_inserts.as_mut() {
                Some(0) => anyhow::bail!("Connection lost. table: {}", table),
                Some(remaining) => *remaining -= 1,
                None => {}
            }
            self.inner.insert(table, row)
        }

        fn update(&mut self, table: Table, user_id: &UserId, id: Uuid, changes: Value) -> anyhow::Result<Option<Value>> {
            self.inner.update(table, user_id, id, changes)
        }

        fn delete(&mut self, table: Table, user_id: &UserId, id: Uuid) -> anyhow::Result<bool> {
            self.inner.delete(table, user_id, id)
        }

        fn delete_all(&mut self, table: Table, user_id: &UserId) -> anyhow::Result<()> {
            self.inner.delete_all(table, user_id)
        }
    }

    #[test]
    fn migrates_once() {
        // given
        let mut local = LocalStore::new(MemoryKeyValueStore::default());
        let first = local
            .save_measurement(NewMeasurement::default(), None)
            .unwrap();
        let first = local
            .update_measurement(first.id, MeasurementUpdate::ToggleFavorite)
            .unwrap();
        local
            .save_measurement(NewMeasurement::default(), None)
            .unwrap();
        let mut remote = RemoteStore::new(MemoryBackend::default(), UserId::from_str("alice").unwrap());

        // when
        let outcome = migrate_local_to_remote(&mut local, &mut remote).unwrap();

        // then
        assert_eq!(outcome, MigrationOutcome::Migrated {
            measurements: 2,
            baselines: 0
        });
        assert_eq!(remote.measurements().unwrap(), local.measurements().unwrap());
        assert_eq!(remote.measurements().unwrap()[0], first);

        // when
        let outcome = migrate_local_to_remote(&mut local, &mut remote).unwrap();

        // then
        assert_eq!(outcome, MigrationOutcome::AlreadyMigrated);
        assert_eq!(remote.measurements().unwrap().len(), 2);
    }

    #[test]
    fn retry_after_partial_failure_skips_records_already_migrated() {
        // given
        let mut local = LocalStore::new(MemoryKeyValueStore::default());
        for _ in 0..3 {
            local
                .save_measurement(NewMeasurement::default(), None)
                .unwrap();
        }
        let backend = FlakyBackend {
            inner: MemoryBackend::default(),
            remaining_inserts: Some(2),
        };
        let mut remote = RemoteStore::new(backend, UserId::from_str("alice").unwrap());

        // when
        let result = migrate_local_to_remote(&mut local, &mut remote);

        // then
        assert!(result.is_err());
        assert!(!local.is_migrated().unwrap());
        assert_eq!(remote.measurements().unwrap().len(), 2);

        // given
        let mut backend = remote.into_inner();
        backend.remaining_inserts = None;
        let mut remote = RemoteStore::new(backend, UserId::from_str("alice").unwrap());

        // when
        let outcome = migrate_local_to_remote(&mut local, &mut remote).unwrap();

        // then
        assert_eq!(outcome, MigrationOutcome::Migrated {
            measurements: 1,
            baselines: 0
        });
        assert!(local.is_migrated().unwrap());
        let mut remote_ids: Vec<Uuid> = remote
            .measurements()
            .unwrap()
            .iter()
            .map(|measurement| measurement.id)
            .collect();
        let mut local_ids: Vec<Uuid> = local
            .measurements()
            .unwrap()
            .iter()
            .map(|measurement| measurement.id)
            .collect();
        remote_ids.sort();
        local_ids.sort();
        assert_eq!(remote_ids, local_ids);
        assert_eq!(
            remote
                .into_inner()
                .inner
                .rows(Table::Measurements)
                .len(),
            3
        );
    }
}
