// Low-level storage access traits.
// The canonical collection and the raw captures are
// plain files in production but nothing in the usecases
// depends on that.

use crate::entities::*;
use serde_json::Value;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The stored data could not be parsed: {0}")]
    Corrupt(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

type Result<T> = std::result::Result<T, Error>;

/// The canonical collection of locations.
pub trait LocationRepo {
    /// Loads all stored locations.
    ///
    /// A collection that does not exist yet is empty.
    /// Content that cannot be parsed is reported as [`Error::Corrupt`].
    fn load_locations(&self) -> Result<Vec<Location>>;

    /// Makes a copy of the current collection that is tagged with `suffix`.
    ///
    /// Returns a description of the backup (e.g. its path)
    /// or `None` if there was nothing to back up.
    fn backup_locations(&self, suffix: &str) -> Result<Option<String>>;

    /// Replaces the whole collection.
    fn store_locations(&self, locations: &[Location]) -> Result<()>;
}

/// The audit trail of unmodified upstream responses.
pub trait RawCaptureRepo {
    /// Stores the capture of the query `query_name` on `date`,
    /// replacing an existing capture of the same query and day.
    ///
    /// Returns a description of the stored capture (e.g. its path).
    fn save_raw_capture(&self, date: &str, query_name: &str, capture: &Value) -> Result<String>;
}
