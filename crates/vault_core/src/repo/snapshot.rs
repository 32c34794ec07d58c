//! Point-in-time copy of all five collections.

use crate::model::character::Character;
use crate::model::item::Item;
use crate::model::monster::Monster;
use crate::model::quest::Quest;
use crate::model::record::Collection;
use crate::model::shop::Shop;
use crate::store::{RecordStore, StoreResult};

/// All collections loaded from one store, in stored order.
///
/// Not a cache: a snapshot is never refreshed. Load a new one after writes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VaultSnapshot {
    pub items: Vec<Item>,
    pub monsters: Vec<Monster>,
    pub shops: Vec<Shop>,
    pub characters: Vec<Character>,
    pub quests: Vec<Quest>,
}

/// Record count per collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectionCounts {
    pub items: usize,
    pub monsters: usize,
    pub shops: usize,
    pub characters: usize,
    pub quests: usize,
}

impl CollectionCounts {
    pub fn get(&self, collection: Collection) -> usize {
        match collection {
            Collection::Items => self.items,
            Collection::Monsters => self.monsters,
            Collection::Shops => self.shops,
            Collection::Characters => self.characters,
            Collection::Quests => self.quests,
        }
    }

    pub fn total(&self) -> usize {
        self.items + self.monsters + self.shops + self.characters + self.quests
    }
}

impl VaultSnapshot {
    /// Loads every collection; the first failing collection aborts the load.
    pub fn load<S: RecordStore>(store: &S) -> StoreResult<Self> {
        Ok(Self {
            items: store.load()?,
            monsters: store.load()?,
            shops: store.load()?,
            characters: store.load()?,
            quests: store.load()?,
        })
    }

    pub fn counts(&self) -> CollectionCounts {
        CollectionCounts {
            items: self.items.len(),
            monsters: self.monsters.len(),
            shops: self.shops.len(),
            characters: self.characters.len(),
            quests: self.quests.len(),
        }
    }
}
