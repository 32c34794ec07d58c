//! Vault use-case service.
//!
//! # Responsibility
//! - Provide add, replace, lookup, search and import entry points.
//! - Delegate persistence to a [`RecordStore`].
//!
//! # Invariants
//! - Every call reads current state from the store; nothing is cached.
//! - Validation failures return before any write.
//! - Each mutating call saves exactly one collection once.

use crate::import::{import_monster_dir, ImportReport, ImportResult};
use crate::model::character::{Character, NewCharacter};
use crate::model::item::{Item, NewItem};
use crate::model::monster::{Monster, NewMonster, MONSTER_SOURCE_MANUAL};
use crate::model::quest::{NewQuest, Quest};
use crate::model::record::{
    normalize_tags, require_name, today, Collection, Record, ValidationError,
};
use crate::model::shop::{NewShop, Shop};
use crate::repo::id_alloc::next_record_id;
use crate::repo::lookup::{character_by_shop, find_by_id};
use crate::repo::snapshot::VaultSnapshot;
use crate::repo::views::{
    character_view, quest_view, shop_view, CharacterView, QuestView, ShopView,
};
use crate::search::engine::search;
use crate::search::global::{search_vault, VaultSearchResults};
use crate::service::overview::{quest_overview, QuestOverview};
use crate::store::{RecordStore, StoreError};
use chrono::NaiveDate;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

pub type VaultResult<T> = Result<T, VaultError>;

/// Service-level failure.
#[derive(Debug)]
pub enum VaultError {
    Validation(ValidationError),
    Store(StoreError),
    /// Whole-record replace targeted an ID that is not stored.
    NotFound { collection: Collection, id: String },
}

impl Display for VaultError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::NotFound { collection, id } => {
                write!(f, "{collection} record `{id}` not found")
            }
        }
    }
}

impl Error for VaultError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::NotFound { .. } => None,
        }
    }
}

impl From<ValidationError> for VaultError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for VaultError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Use-case service over one vault store.
pub struct VaultService<S: RecordStore> {
    store: S,
    clock: fn() -> NaiveDate,
}

impl<S: RecordStore> VaultService<S> {
    /// Creates a service stamping new records with the local date.
    pub fn new(store: S) -> Self {
        Self {
            store,
            clock: today,
        }
    }

    /// Creates a service with a custom date source for `created_on` stamps.
    pub fn with_clock(store: S, clock: fn() -> NaiveDate) -> Self {
        Self { store, clock }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Loads one collection in stored order.
    pub fn list<R: Record>(&self) -> VaultResult<Vec<R>> {
        Ok(self.store.load()?)
    }

    /// Looks up one record by ID; a missing record is `Ok(None)`.
    pub fn get<R: Record>(&self, id: &str) -> VaultResult<Option<R>> {
        let records: Vec<R> = self.store.load()?;
        Ok(find_by_id(&records, id).cloned())
    }

    /// Character owning `shop_id`, if any.
    pub fn character_by_shop(&self, shop_id: &str) -> VaultResult<Option<Character>> {
        let characters: Vec<Character> = self.store.load()?;
        Ok(character_by_shop(&characters, shop_id).cloned())
    }

    /// Next free ID in `collection`.
    pub fn next_id(&self, collection: Collection) -> VaultResult<String> {
        Ok(match collection {
            Collection::Items => next_record_id(&self.store.load::<Item>()?),
            Collection::Monsters => next_record_id(&self.store.load::<Monster>()?),
            Collection::Shops => next_record_id(&self.store.load::<Shop>()?),
            Collection::Characters => next_record_id(&self.store.load::<Character>()?),
            Collection::Quests => next_record_id(&self.store.load::<Quest>()?),
        })
    }

    fn append<R: Record>(&self, build: impl FnOnce(String, NaiveDate) -> R) -> VaultResult<R> {
        let mut records: Vec<R> = self.store.load()?;
        let record = build(next_record_id(&records), (self.clock)());
        records.push(record.clone());
        self.store.save(&records)?;
        info!(
            "event=record_add module=service status=ok collection={} id={} total={}",
            R::COLLECTION,
            record.id(),
            records.len()
        );
        Ok(record)
    }

    pub fn add_item(&self, input: NewItem) -> VaultResult<Item> {
        let name = require_name(Collection::Items, &input.name)?;
        let input = NewItem {
            name,
            tags: normalize_tags(&input.tags),
            ..input
        };
        self.append(|id, created_on| Item::create(id, created_on, input))
    }

    /// Adds a hand-entered monster; derived blocks come from the stat fields.
    pub fn add_monster(&self, input: NewMonster) -> VaultResult<Monster> {
        let name = require_name(Collection::Monsters, &input.name)?;
        let input = NewMonster {
            name,
            tags: normalize_tags(&input.tags),
            ..input
        };
        self.append(|id, created_on| {
            Monster::create(id, created_on, MONSTER_SOURCE_MANUAL, input)
        })
    }

    pub fn add_shop(&self, input: NewShop) -> VaultResult<Shop> {
        let name = require_name(Collection::Shops, &input.name)?;
        let input = NewShop {
            name,
            tags: normalize_tags(&input.tags),
            ..input
        };
        self.append(|id, created_on| Shop::create(id, created_on, input))
    }

    pub fn add_character(&self, input: NewCharacter) -> VaultResult<Character> {
        let name = require_name(Collection::Characters, &input.name)?;
        let input = NewCharacter {
            name,
            tags: normalize_tags(&input.tags),
            ..input
        };
        self.append(|id, created_on| Character::create(id, created_on, input))
    }

    pub fn add_quest(&self, input: NewQuest) -> VaultResult<Quest> {
        let name = require_name(Collection::Quests, &input.name)?;
        let input = NewQuest {
            name,
            tags: normalize_tags(&input.tags),
            ..input
        };
        self.append(|id, created_on| Quest::create(id, created_on, input))
    }

    /// Replaces the stored record with the same ID, keeping its position.
    ///
    /// # Errors
    /// - `VaultError::Validation` when the name is blank.
    /// - `VaultError::NotFound` when no stored record has `record.id()`.
    pub fn replace<R: Record>(&self, record: R) -> VaultResult<()> {
        require_name(R::COLLECTION, record.name())?;
        let mut records: Vec<R> = self.store.load()?;
        let Some(slot) = records
            .iter_mut()
            .find(|existing| existing.id() == record.id())
        else {
            return Err(VaultError::NotFound {
                collection: R::COLLECTION,
                id: record.id().to_string(),
            });
        };
        *slot = record;
        self.store.save(&records)?;
        Ok(())
    }

    /// Records of one collection matching `term`, in stored order.
    pub fn search<R: Record>(&self, term: &str) -> VaultResult<Vec<R>> {
        let records: Vec<R> = self.store.load()?;
        Ok(search(&records, term).into_iter().cloned().collect())
    }

    pub fn snapshot(&self) -> VaultResult<VaultSnapshot> {
        Ok(VaultSnapshot::load(&self.store)?)
    }

    /// Searches every collection; see [`search_vault`] for query syntax.
    pub fn search_vault(&self, query: &str) -> VaultResult<VaultSearchResults> {
        Ok(search_vault(&self.snapshot()?, query))
    }

    pub fn shop_view(&self, shop_id: &str) -> VaultResult<Option<ShopView>> {
        let snapshot = self.snapshot()?;
        Ok(find_by_id(&snapshot.shops, shop_id).map(|shop| shop_view(&snapshot, shop)))
    }

    pub fn character_view(&self, character_id: &str) -> VaultResult<Option<CharacterView>> {
        let snapshot = self.snapshot()?;
        Ok(find_by_id(&snapshot.characters, character_id)
            .map(|character| character_view(&snapshot, character)))
    }

    pub fn quest_view(&self, quest_id: &str) -> VaultResult<Option<QuestView>> {
        let snapshot = self.snapshot()?;
        Ok(find_by_id(&snapshot.quests, quest_id).map(|quest| quest_view(&snapshot, quest)))
    }

    pub fn quest_overview(&self) -> VaultResult<QuestOverview> {
        let quests: Vec<Quest> = self.store.load()?;
        Ok(quest_overview(&quests))
    }

    /// Imports every `*.json` source in `source_dir` into the monster collection.
    pub fn import_monsters(&self, source_dir: &Path) -> ImportResult<ImportReport> {
        import_monster_dir(&self.store, source_dir, (self.clock)())
    }
}
