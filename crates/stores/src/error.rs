use thiserror::Error;
use uuid::Uuid;

use crate::remote::Table;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Record not found. id: {0}")]
    NotFound(Uuid),

    #[error("Unable to load records. key: {key}, error: {reason}")]
    UnableToLoad { key: String, reason: anyhow::Error },

    #[error("Unable to store records. key: {key}, error: {reason}")]
    UnableToStore { key: String, reason: anyhow::Error },

    #[error("Remote store error. table: {table}, error: {reason}")]
    Remote { table: Table, reason: anyhow::Error },
}
