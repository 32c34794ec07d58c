//! Flat-file record store.
//!
//! # Responsibility
//! - Load and save whole collections as ordered record sequences.
//! - Own on-disk durability for every collection file.
//!
//! # Invariants
//! - A missing collection file loads as an empty collection.
//! - Saves replace the whole file via temp-file + rename, so a failed save
//!   leaves the previous file untouched.
//! - Errors carry the collection name and path.

use crate::model::record::{Collection, Record};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod json_file;

pub use json_file::JsonFileStore;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    /// Backing file exists but could not be read or written.
    Io {
        collection: Collection,
        path: PathBuf,
        source: std::io::Error,
    },
    /// Backing file is not a valid JSON array of records.
    Malformed {
        collection: Collection,
        path: PathBuf,
        source: serde_json::Error,
    },
    /// Records could not be encoded.
    Encode {
        collection: Collection,
        source: serde_json::Error,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io {
                collection,
                path,
                source,
            } => write!(
                f,
                "{collection} collection I/O failed at `{}`: {source}",
                path.display()
            ),
            Self::Malformed {
                collection,
                path,
                source,
            } => write!(
                f,
                "{collection} collection at `{}` is malformed: {source}",
                path.display()
            ),
            Self::Encode { collection, source } => {
                write!(f, "failed to encode {collection} collection: {source}")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Malformed { source, .. } => Some(source),
            Self::Encode { source, .. } => Some(source),
        }
    }
}

/// Persistence contract for whole-collection reads and writes.
pub trait RecordStore {
    /// Loads the full collection for `R` in stored order.
    fn load<R: Record>(&self) -> StoreResult<Vec<R>>;

    /// Replaces the full collection for `R`.
    fn save<R: Record>(&self, records: &[R]) -> StoreResult<()>;
}

impl<T: RecordStore + ?Sized> RecordStore for &T {
    fn load<R: Record>(&self) -> StoreResult<Vec<R>> {
        (**self).load()
    }

    fn save<R: Record>(&self, records: &[R]) -> StoreResult<()> {
        (**self).save(records)
    }
}
