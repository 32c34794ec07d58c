//! Merges normalized monster entries into the stored monster collection.
//!
//! # Invariants
//! - Names are unique case-insensitively after a merge; later duplicates are
//!   skipped, never overwritten.
//! - New IDs continue after the largest numeric suffix already stored.
//! - The collection is sorted by lowercased name and saved exactly once.
//! - On any fatal error nothing is written.

use crate::import::external::{ExternalMonster, MonsterSourceFile};
use crate::import::normalize::{monster_name, normalize_monster};
use crate::import::{ImportError, ImportResult};
use crate::model::monster::{Monster, MONSTER_SOURCE_IMPORTED};
use crate::model::record::{Collection, Record};
use crate::repo::id_alloc::format_id;
use crate::store::RecordStore;
use chrono::NaiveDate;
use log::{debug, info, warn};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

const SOURCE_FILE_EXTENSION: &str = "json";

/// One parsed source file, labelled for reporting.
#[derive(Debug, Clone)]
pub struct MonsterSource {
    pub label: String,
    pub file: MonsterSourceFile,
}

/// Entry that could not be decoded into the expected shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedEntry {
    /// Zero-based position inside the source file.
    pub index: usize,
    pub reason: String,
}

/// Per-file outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileImportReport {
    pub label: String,
    pub added: Vec<String>,
    pub skipped: Vec<String>,
    pub rejected: Vec<RejectedEntry>,
}

/// Outcome of one merge run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub files: Vec<FileImportReport>,
    /// Size of the monster collection after the merge.
    pub total_monsters: usize,
}

impl ImportReport {
    pub fn added_count(&self) -> usize {
        self.files.iter().map(|file| file.added.len()).sum()
    }

    pub fn skipped_count(&self) -> usize {
        self.files.iter().map(|file| file.skipped.len()).sum()
    }

    pub fn rejected_count(&self) -> usize {
        self.files.iter().map(|file| file.rejected.len()).sum()
    }
}

/// Largest numeric second `-` segment among existing IDs; unparsable IDs count
/// as zero.
fn max_id_sequence(existing: &[Monster]) -> u64 {
    existing
        .iter()
        .filter_map(|monster| monster.id.split('-').nth(1))
        .filter_map(|segment| segment.parse::<u64>().ok())
        .max()
        .unwrap_or(0)
}

fn decode_entry(value: serde_json::Value) -> Result<ExternalMonster, String> {
    if !value.is_object() {
        return Err("entry is not a JSON object".to_string());
    }
    serde_json::from_value(value).map_err(|err| err.to_string())
}

/// Merges `sources` into `existing` in order and sorts the result by name.
///
/// Pure: performs no I/O, so callers decide when (and whether) to persist.
pub fn merge_monsters(
    existing: &mut Vec<Monster>,
    sources: Vec<MonsterSource>,
    created_on: NaiveDate,
) -> ImportReport {
    let mut known_names: HashSet<String> = existing
        .iter()
        .map(|monster| monster.name.to_lowercase())
        .collect();
    let mut next_sequence = max_id_sequence(existing).saturating_add(1);
    let prefix = Collection::Monsters.id_prefix();
    let mut report = ImportReport::default();

    for source in sources {
        let mut file_report = FileImportReport {
            label: source.label,
            ..FileImportReport::default()
        };

        for (index, value) in source.file.monsters.into_iter().enumerate() {
            let entry = match decode_entry(value) {
                Ok(entry) => entry,
                Err(reason) => {
                    warn!(
                        "event=import_entry_reject module=import status=rejected file={} index={}",
                        file_report.label, index
                    );
                    file_report.rejected.push(RejectedEntry { index, reason });
                    continue;
                }
            };

            let name = monster_name(&entry);
            if !known_names.insert(name.to_lowercase()) {
                debug!(
                    "event=import_entry_skip module=import status=duplicate file={} name={}",
                    file_report.label, name
                );
                file_report.skipped.push(name);
                continue;
            }

            let monster = Monster::create(
                format_id(prefix, next_sequence),
                created_on,
                MONSTER_SOURCE_IMPORTED,
                normalize_monster(&entry),
            );
            next_sequence = next_sequence.saturating_add(1);
            debug!(
                "event=import_entry_add module=import status=ok file={} id={} name={}",
                file_report.label,
                monster.id(),
                name
            );
            file_report.added.push(name);
            existing.push(monster);
        }

        info!(
            "event=import_file module=import status=ok file={} added={} skipped={} rejected={}",
            file_report.label,
            file_report.added.len(),
            file_report.skipped.len(),
            file_report.rejected.len()
        );
        report.files.push(file_report);
    }

    existing.sort_by_cached_key(|monster| monster.name.to_lowercase());
    report.total_monsters = existing.len();
    report
}

/// `*.json` files directly inside `dir`, sorted by file name.
pub fn list_source_files(dir: &Path) -> ImportResult<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|source| ImportError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| ImportError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == SOURCE_FILE_EXTENSION);
        if is_json && path.is_file() {
            files.push(path);
        }
    }
    files.sort_by(|left, right| left.file_name().cmp(&right.file_name()));
    Ok(files)
}

/// Reads and parses one source file.
pub fn read_source_file(path: &Path) -> ImportResult<MonsterSource> {
    let content = fs::read_to_string(path).map_err(|source| ImportError::ReadSource {
        path: path.to_path_buf(),
        source,
    })?;
    let file: MonsterSourceFile =
        serde_json::from_str(&content).map_err(|source| ImportError::MalformedSource {
            path: path.to_path_buf(),
            source,
        })?;
    let label = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(MonsterSource { label, file })
}

/// Imports every source file in `dir` into the monster collection of `store`.
///
/// All sources are parsed before the destination is touched, so a broken
/// source file aborts the run without writing anything.
pub fn import_monster_dir<S: RecordStore>(
    store: &S,
    dir: &Path,
    created_on: NaiveDate,
) -> ImportResult<ImportReport> {
    let sources = list_source_files(dir)?
        .iter()
        .map(|path| read_source_file(path))
        .collect::<ImportResult<Vec<_>>>()?;

    let mut monsters: Vec<Monster> = store.load()?;
    let report = merge_monsters(&mut monsters, sources, created_on);
    store.save(&monsters)?;

    info!(
        "event=import_done module=import status=ok files={} added={} skipped={} rejected={} total={}",
        report.files.len(),
        report.added_count(),
        report.skipped_count(),
        report.rejected_count(),
        report.total_monsters
    );
    Ok(report)
}
