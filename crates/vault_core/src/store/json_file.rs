//! JSON file implementation of [`RecordStore`].

use crate::model::record::{Collection, Record};
use crate::store::{RecordStore, StoreError, StoreResult};
use log::{debug, info, warn};
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Store keeping one pretty-printed JSON array per collection under `root`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Creates a store rooted at the vault data directory.
    ///
    /// The directory is created lazily on first save.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path of the backing file for `collection`.
    pub fn collection_path(&self, collection: Collection) -> PathBuf {
        self.root.join(collection.file_name())
    }
}

impl RecordStore for JsonFileStore {
    fn load<R: Record>(&self) -> StoreResult<Vec<R>> {
        let collection = R::COLLECTION;
        let path = self.collection_path(collection);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(
                    "event=collection_load module=store status=empty collection={} path={}",
                    collection,
                    path.display()
                );
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(StoreError::Io {
                    collection,
                    path,
                    source,
                })
            }
        };

        let records: Vec<R> =
            serde_json::from_str(&content).map_err(|source| StoreError::Malformed {
                collection,
                path: path.clone(),
                source,
            })?;
        debug!(
            "event=collection_load module=store status=ok collection={} records={}",
            collection,
            records.len()
        );
        Ok(records)
    }

    fn save<R: Record>(&self, records: &[R]) -> StoreResult<()> {
        let collection = R::COLLECTION;
        let path = self.collection_path(collection);
        let mut content = serde_json::to_string_pretty(records)
            .map_err(|source| StoreError::Encode { collection, source })?;
        content.push('\n');

        write_atomic(&path, &content).map_err(|source| StoreError::Io {
            collection,
            path: path.clone(),
            source,
        })?;
        info!(
            "event=collection_save module=store status=ok collection={} records={}",
            collection,
            records.len()
        );
        Ok(())
    }
}

/// Writes `content` to a sibling temp file and renames it over `path`.
fn write_atomic(path: &Path, content: &str) -> std::io::Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir)?;

    let base = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("collection.json");
    let mut counter = 0u32;
    let tmp_path = loop {
        let candidate = dir.join(format!(".{}.tmp-{}-{}", base, std::process::id(), counter));
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&candidate)
        {
            Ok(mut tmp) => {
                if let Err(err) = tmp.write_all(content.as_bytes()).and_then(|_| tmp.sync_all()) {
                    let _ = fs::remove_file(&candidate);
                    return Err(err);
                }
                break candidate;
            }
            Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                counter = counter.saturating_add(1);
            }
            Err(err) => return Err(err),
        }
    };

    if let Err(err) = fs::rename(&tmp_path, path) {
        warn!(
            "event=collection_save module=store status=error stage=rename path={}",
            path.display()
        );
        let _ = fs::remove_file(&tmp_path);
        return Err(err);
    }
    if let Ok(dir_file) = File::open(dir) {
        let _ = dir_file.sync_all();
    }
    Ok(())
}
