//! Shared record contract for every vault collection.
//!
//! # Responsibility
//! - Name the five collections and their on-disk/ID conventions.
//! - Define the `Record` trait used by store, search and lookups.
//! - Own tag normalization and create-time validation errors.
//!
//! # Invariants
//! - Each collection has exactly one backing file and one ID prefix.
//! - Unknown keys of a stored record survive a load/save cycle via `extra`.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::ser::SerializeMap;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Unmodelled keys captured from stored JSON, written back unchanged.
pub type ExtraFields = serde_json::Map<String, serde_json::Value>;

/// Identifies one of the five vault collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    Items,
    Monsters,
    Shops,
    Characters,
    Quests,
}

impl Collection {
    /// All collections in canonical display order.
    pub const ALL: [Collection; 5] = [
        Collection::Items,
        Collection::Monsters,
        Collection::Shops,
        Collection::Characters,
        Collection::Quests,
    ];

    /// Stable lowercase collection name used in logs and errors.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Items => "items",
            Self::Monsters => "monsters",
            Self::Shops => "shops",
            Self::Characters => "characters",
            Self::Quests => "quests",
        }
    }

    /// Backing file name inside the vault data directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Items => "items.json",
            Self::Monsters => "monsters.json",
            Self::Shops => "shops.json",
            Self::Characters => "characters.json",
            Self::Quests => "quests.json",
        }
    }

    /// Prefix shared by every ID in this collection.
    pub fn id_prefix(self) -> &'static str {
        match self {
            Self::Items => "item-",
            Self::Monsters => "monster-",
            Self::Shops => "shop-",
            Self::Characters => "char-",
            Self::Quests => "quest-",
        }
    }

    /// Parses a collection from its plural name or singular alias.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "items" | "item" => Some(Self::Items),
            "monsters" | "monster" => Some(Self::Monsters),
            "shops" | "shop" => Some(Self::Shops),
            "characters" | "character" | "char" => Some(Self::Characters),
            "quests" | "quest" => Some(Self::Quests),
            _ => None,
        }
    }
}

impl Display for Collection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Common contract for records persisted in a vault collection.
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// Collection this record type is stored in.
    const COLLECTION: Collection;

    /// Collection-unique identifier.
    fn id(&self) -> &str;

    /// Display name; also the dedup key for imported monsters.
    fn name(&self) -> &str;

    /// Text fields contributing to the search haystack, in haystack order.
    fn search_fields(&self) -> Vec<&str>;
}

/// Create-time validation failure. Nothing is written when returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Name is empty after trimming.
    EmptyName { collection: Collection },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName { collection } => {
                write!(f, "{collection} record requires a non-empty name")
            }
        }
    }
}

impl Error for ValidationError {}

/// Trims a required name, rejecting blank input.
pub fn require_name(collection: Collection, name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyName { collection });
    }
    Ok(trimmed.to_string())
}

/// Normalizes tags: trims values, drops blanks and repeated entries.
///
/// Original casing and first-seen order are kept.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut normalized: Vec<String> = Vec::new();
    for tag in tags {
        let trimmed = tag.as_ref().trim();
        if trimmed.is_empty() || normalized.iter().any(|existing| existing == trimmed) {
            continue;
        }
        normalized.push(trimmed.to_string());
    }
    normalized
}

/// Splits comma-separated tag input and normalizes it.
pub fn parse_tag_list(raw: &str) -> Vec<String> {
    normalize_tags(raw.split(','))
}

/// Local calendar date used for `created_on` stamps.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Writes `extra` entries, skipping keys regenerated by the owning record.
pub(crate) fn serialize_extra<M: SerializeMap>(
    map: &mut M,
    extra: &ExtraFields,
    derived_keys: &[&str],
) -> Result<(), M::Error> {
    for (key, value) in extra {
        if derived_keys.contains(&key.as_str()) {
            continue;
        }
        map.serialize_entry(key, value)?;
    }
    Ok(())
}
