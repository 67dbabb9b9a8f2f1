//! Remote store, records are rows in a hosted database, owned by a user.
//!
//! The database client itself is provided by the caller as a [`RemoteBackend`], rows are exchanged as JSON
//! objects with snake_case columns.  Every query is filtered by the owning user.

#[cfg(any(test, feature = "testing"))]
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use placement::{
    sort_for_display, sort_newest_first, Baseline, Measurement, MeasurementUpdate, NewBaseline, NewMeasurement,
    PlacementMethod, PlacementResult, Rating, SpeakerType,
};
use placement_units::Distance;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use time::OffsetDateTime;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{BaselineStore, MeasurementStore, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Table {
    Measurements,
    Baselines,
}

impl Table {
    pub fn name(&self) -> &'static str {
        match self {
            Table::Measurements => "measurements",
            Table::Baselines => "baselines",
        }
    }
}

impl Display for Table {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Identifies the signed-in user that owns remote rows
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for UserId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(UserId(s.to_string()))
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

pub trait RemoteBackend {
    /// Rows owned by the user, in no particular order.
    fn select(&self, table: Table, user_id: &UserId) -> anyhow::Result<Vec<Value>>;

    /// Returns the inserted row
    fn insert(&mut self, table: Table, row: Value) -> anyhow::Result<Value>;

    /// Merge `changes` into the row, returns the updated row or `None` if the user has no row with the id.
    fn update(&mut self, table: Table, user_id: &UserId, id: Uuid, changes: Value) -> anyhow::Result<Option<Value>>;

    /// Returns `false` if the user has no row with the id.
    fn delete(&mut self, table: Table, user_id: &UserId, id: Uuid) -> anyhow::Result<bool>;

    fn delete_all(&mut self, table: Table, user_id: &UserId) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MeasurementRow {
    pub id: Uuid,
    pub user_id: UserId,
    pub distance_from_front_wall: Option<Distance>,
    pub distance_from_side_wall: Option<Distance>,
    pub listening_position: Option<Distance>,
    pub bass: Rating,
    pub treble: Rating,
    pub vocals: Rating,
    pub soundstage: Rating,
    pub is_favorite: bool,
    pub name: Option<String>,
    pub baseline_method_name: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl MeasurementRow {
    pub fn from_measurement(measurement: &Measurement, user_id: &UserId) -> Self {
        Self {
            id: measurement.id,
            user_id: user_id.clone(),
            distance_from_front_wall: measurement.distance_from_front_wall,
            distance_from_side_wall: measurement.distance_from_side_wall,
            listening_position: measurement.listening_position,
            bass: measurement.bass,
            treble: measurement.treble,
            vocals: measurement.vocals,
            soundstage: measurement.soundstage,
            is_favorite: measurement.is_favorite,
            name: measurement.name.clone(),
            baseline_method_name: measurement
                .baseline_method_name
                .clone(),
            created_at: measurement.created_at,
        }
    }
}

impl From<MeasurementRow> for Measurement {
    fn from(row: MeasurementRow) -> Self {
        Measurement {
            id: row.id,
            distance_from_front_wall: row.distance_from_front_wall,
            distance_from_side_wall: row.distance_from_side_wall,
            listening_position: row.listening_position,
            bass: row.bass,
            treble: row.treble,
            vocals: row.vocals,
            soundstage: row.soundstage,
            is_favorite: row.is_favorite,
            name: row.name,
            baseline_method_name: row.baseline_method_name,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BaselineRow {
    pub id: Uuid,
    pub user_id: UserId,
    pub calculation_type: PlacementMethod,
    pub method_name: String,
    pub speaker_type: SpeakerType,
    /// A JSON column, the results keep their camelCase shape
    pub values: Vec<PlacementResult>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl BaselineRow {
    pub fn from_baseline(baseline: &Baseline, user_id: &UserId) -> Self {
        Self {
            id: baseline.id,
            user_id: user_id.clone(),
            calculation_type: baseline.calculation_type,
            method_name: baseline.method_name.clone(),
            speaker_type: baseline.speaker_type,
            values: baseline.values.clone(),
            created_at: baseline.created_at,
        }
    }
}

impl From<BaselineRow> for Baseline {
    fn from(row: BaselineRow) -> Self {
        Baseline {
            id: row.id,
            calculation_type: row.calculation_type,
            method_name: row.method_name,
            speaker_type: row.speaker_type,
            values: row.values,
            created_at: row.created_at,
        }
    }
}

pub struct RemoteStore<B> {
    backend: B,
    user_id: UserId,
}

impl<B: RemoteBackend> RemoteStore<B> {
    pub fn new(backend: B, user_id: UserId) -> Self {
        Self {
            backend,
            user_id,
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn into_inner(self) -> B {
        self.backend
    }

    /// Insert an existing measurement, keeping its id and creation time.
    pub fn import_measurement(&mut self, measurement: &Measurement) -> Result<Measurement, StoreError> {
        let row = MeasurementRow::from_measurement(measurement, &self.user_id);
        let inserted: MeasurementRow = self.insert_row(Table::Measurements, &row)?;
        Ok(inserted.into())
    }

    /// Insert an existing baseline, keeping its id and creation time.
    pub fn import_baseline(&mut self, baseline: &Baseline) -> Result<Baseline, StoreError> {
        let row = BaselineRow::from_baseline(baseline, &self.user_id);
        let inserted: BaselineRow = self.insert_row(Table::Baselines, &row)?;
        Ok(inserted.into())
    }

    fn select_rows<T: DeserializeOwned>(&self, table: Table) -> Result<Vec<T>, StoreError> {
        let rows = self
            .backend
            .select(table, &self.user_id)
            .map_err(|reason| StoreError::Remote {
                table,
                reason,
            })?;
        debug!("Selected rows. table: {}, count: {}", table, rows.len());

        rows.into_iter()
            .map(|row| from_row(table, row))
            .collect()
    }

    fn insert_row<T: Serialize + DeserializeOwned>(&mut self, table: Table, row: &T) -> Result<T, StoreError> {
        let row = serde_json::to_value(row).map_err(|err| StoreError::Remote {
            table,
            reason: err.into(),
        })?;

        let inserted = self
            .backend
            .insert(table, row)
            .map_err(|reason| StoreError::Remote {
                table,
                reason,
            })?;

        from_row(table, inserted)
    }

    fn delete_row(&mut self, table: Table, id: Uuid) -> Result<(), StoreError> {
        let deleted = self
            .backend
            .delete(table, &self.user_id, id)
            .map_err(|reason| StoreError::Remote {
                table,
                reason,
            })?;

        match deleted {
            true => {
                info!("Deleted row. table: {}, id: {}", table, id);
                Ok(())
            }
            false => Err(StoreError::NotFound(id)),
        }
    }

    fn delete_all_rows(&mut self, table: Table) -> Result<(), StoreError> {
        self.backend
            .delete_all(table, &self.user_id)
            .map_err(|reason| StoreError::Remote {
                table,
                reason,
            })?;
        info!("Deleted all rows. table: {}, user: {}", table, self.user_id);
        Ok(())
    }
}

fn from_row<T: DeserializeOwned>(table: Table, row: Value) -> Result<T, StoreError> {
    serde_json::from_value(row).map_err(|err| StoreError::Remote {
        table,
        reason: err.into(),
    })
}

impl<B: RemoteBackend> MeasurementStore for RemoteStore<B> {
    fn measurements(&self) -> Result<Vec<Measurement>, StoreError> {
        let rows: Vec<MeasurementRow> = self.select_rows(Table::Measurements)?;
        let mut measurements: Vec<Measurement> = rows
            .into_iter()
            .map(Measurement::from)
            .collect();
        sort_for_display(&mut measurements);

        Ok(measurements)
    }

    fn save_measurement(
        &mut self,
        new: NewMeasurement,
        baseline_method_name: Option<String>,
    ) -> Result<Measurement, StoreError> {
        let measurement = Measurement::new(Uuid::new_v4(), OffsetDateTime::now_utc(), new, baseline_method_name);
        let measurement = self.import_measurement(&measurement)?;
        info!("Saved measurement. id: {}, user: {}", measurement.id, self.user_id);

        Ok(measurement)
    }

    fn update_measurement(&mut self, id: Uuid, update: MeasurementUpdate) -> Result<Measurement, StoreError> {
        let mut measurement = self
            .measurements()?
            .into_iter()
            .find(|measurement| measurement.id == id)
            .ok_or(StoreError::NotFound(id))?;

        measurement.apply(update);

        let changes = json!({
            "is_favorite": measurement.is_favorite,
            "name": measurement.name,
        });

        let table = Table::Measurements;
        let updated = self
            .backend
            .update(table, &self.user_id, id, changes)
            .map_err(|reason| StoreError::Remote {
                table,
                reason,
            })?
            .ok_or(StoreError::NotFound(id))?;
        info!("Updated measurement. id: {}, user: {}", id, self.user_id);

        let row: MeasurementRow = from_row(table, updated)?;
        Ok(row.into())
    }

    fn delete_measurement(&mut self, id: Uuid) -> Result<(), StoreError> {
        self.delete_row(Table::Measurements, id)
    }

    fn clear_measurements(&mut self) -> Result<(), StoreError> {
        self.delete_all_rows(Table::Measurements)
    }
}

impl<B: RemoteBackend> BaselineStore for RemoteStore<B> {
    fn baselines(&self) -> Result<Vec<Baseline>, StoreError> {
        let rows: Vec<BaselineRow> = self.select_rows(Table::Baselines)?;
        let mut baselines: Vec<Baseline> = rows
            .into_iter()
            .map(Baseline::from)
            .collect();
        sort_newest_first(&mut baselines);

        Ok(baselines)
    }

    fn save_baseline(&mut self, new: NewBaseline) -> Result<Baseline, StoreError> {
        let baseline = Baseline::from_new(new, Uuid::new_v4(), OffsetDateTime::now_utc());
        let baseline = self.import_baseline(&baseline)?;
        info!("Saved baseline. id: {}, user: {}", baseline.id, self.user_id);

        Ok(baseline)
    }

    fn delete_baseline(&mut self, id: Uuid) -> Result<(), StoreError> {
        self.delete_row(Table::Baselines, id)
    }

    fn clear_baselines(&mut self) -> Result<(), StoreError> {
        self.delete_all_rows(Table::Baselines)
    }
}

/// Keeps rows in memory, most recently inserted rows are selected first.
#[cfg(any(test, feature = "testing"))]
#[derive(Debug, Default, Clone)]
pub struct MemoryBackend {
    tables: BTreeMap<Table, Vec<Value>>,
}

#[cfg(any(test, feature = "testing"))]
impl MemoryBackend {
    pub fn rows(&self, table: Table) -> &[Value] {
        self.tables
            .get(&table)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn is_owned_row(row: &Value, user_id: &UserId, id: Option<Uuid>) -> bool {
        let owned = row["user_id"] == Value::String(user_id.to_string());
        match id {
            Some(id) => owned && row["id"] == Value::String(id.to_string()),
            None => owned,
        }
    }
}

#[cfg(any(test, feature = "testing"))]
impl RemoteBackend for MemoryBackend {
    fn select(&self, table: Table, user_id: &UserId) -> anyhow::Result<Vec<Value>> {
        Ok(self
            .rows(table)
            .iter()
            .rev()
            .filter(|row| Self::is_owned_row(row, user_id, None))
            .cloned()
            .collect())
    }

    fn insert(&mut self, table: Table, row: Value) -> anyhow::Result<Value> {
        if !row.is_object() {
            anyhow::bail!("Row must be an object. table: {}", table);
        }
        self.tables
            .entry(table)
            .or_default()
            .push(row.clone());
        Ok(row)
    }

    fn update(&mut self, table: Table, user_id: &UserId, id: Uuid, changes: Value) -> anyhow::Result<Option<Value>> {
        let Some(row) = self
            .tables
            .entry(table)
            .or_default()
            .iter_mut()
            .find(|row| Self::is_owned_row(row, user_id, Some(id)))
        else {
            return Ok(None);
        };

        let (Some(row_object), Value::Object(changes)) = (row.as_object_mut(), changes) else {
            anyhow::bail!("Changes must be an object. table: {}", table);
        };
        row_object.extend(changes);

        Ok(Some(row.clone()))
    }

    fn delete(&mut self, table: Table, user_id: &UserId, id: Uuid) -> anyhow::Result<bool> {
        let rows = self.tables.entry(table).or_default();
        let count = rows.len();
        rows.retain(|row| !Self::is_owned_row(row, user_id, Some(id)));
        Ok(rows.len() != count)
    }

    fn delete_all(&mut self, table: Table, user_id: &UserId) -> anyhow::Result<()> {
        self.tables
            .entry(table)
            .or_default()
            .retain(|row| !Self::is_owned_row(row, user_id, None));
        Ok(())
    }
}
