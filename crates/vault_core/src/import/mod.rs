//! Bulk monster import from external stat-block files.
//!
//! # Responsibility
//! - Decode loosely typed external entries.
//! - Normalize them into canonical stat strings.
//! - Merge them into the stored collection without duplicating names.
//!
//! # See also
//! - `crate::service::VaultService::import_monsters`

pub mod external;
pub mod merge;
pub mod normalize;

use crate::store::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub use merge::{import_monster_dir, merge_monsters, ImportReport, MonsterSource};

pub type ImportResult<T> = Result<T, ImportError>;

/// Fatal import failures. Individual malformed entries are reported, not raised.
#[derive(Debug)]
pub enum ImportError {
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },
    ReadSource {
        path: PathBuf,
        source: std::io::Error,
    },
    MalformedSource {
        path: PathBuf,
        source: serde_json::Error,
    },
    Store(StoreError),
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReadDir { path, source } => write!(
                f,
                "cannot read monster source directory `{}`: {source}",
                path.display()
            ),
            Self::ReadSource { path, source } => write!(
                f,
                "cannot read monster source file `{}`: {source}",
                path.display()
            ),
            Self::MalformedSource { path, source } => write!(
                f,
                "monster source file `{}` is not valid JSON: {source}",
                path.display()
            ),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ReadDir { source, .. } | Self::ReadSource { source, .. } => Some(source),
            Self::MalformedSource { source, .. } => Some(source),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<StoreError> for ImportError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}
