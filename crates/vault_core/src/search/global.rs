//! Vault-wide search with optional collection prefix filter.
//!
//! Query syntax: a plain term searches every collection; `item:`, `monster:`,
//! `char:`, `shop:` or `quest:` followed by a term restricts the search to one
//! collection.

use crate::model::character::Character;
use crate::model::item::Item;
use crate::model::monster::Monster;
use crate::model::quest::Quest;
use crate::model::record::{Collection, Record};
use crate::model::shop::Shop;
use crate::repo::snapshot::VaultSnapshot;
use crate::search::engine::search;
use once_cell::sync::Lazy;
use regex::Regex;

static PREFIX_FILTER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(item|monster|char|shop|quest):(.+)$").expect("valid prefix regex")
});

/// Parsed vault-wide query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultQuery {
    /// Restricts matching to one collection when set.
    pub collection: Option<Collection>,
    pub term: String,
}

impl VaultQuery {
    /// Splits an optional `kind:` prefix from the search term.
    pub fn parse(raw: &str) -> Self {
        if let Some(caps) = PREFIX_FILTER_RE.captures(raw) {
            let collection = caps.get(1).and_then(|m| Collection::parse(m.as_str()));
            let term = caps.get(2).map(|m| m.as_str().trim()).unwrap_or("");
            if collection.is_some() && !term.is_empty() {
                return Self {
                    collection,
                    term: term.to_string(),
                };
            }
        }
        Self {
            collection: None,
            term: raw.trim().to_string(),
        }
    }

    fn includes(&self, collection: Collection) -> bool {
        self.collection.map_or(true, |only| only == collection)
    }
}

/// Matches grouped by collection, each in stored order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VaultSearchResults {
    pub items: Vec<Item>,
    pub monsters: Vec<Monster>,
    pub shops: Vec<Shop>,
    pub characters: Vec<Character>,
    pub quests: Vec<Quest>,
}

impl VaultSearchResults {
    pub fn total(&self) -> usize {
        self.items.len()
            + self.monsters.len()
            + self.shops.len()
            + self.characters.len()
            + self.quests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

fn collect_matches<R: Record>(query: &VaultQuery, records: &[R]) -> Vec<R> {
    if !query.includes(R::COLLECTION) {
        return Vec::new();
    }
    search(records, &query.term).into_iter().cloned().collect()
}

/// Searches all collections of `snapshot` using the query syntax above.
pub fn search_vault(snapshot: &VaultSnapshot, raw_query: &str) -> VaultSearchResults {
    let query = VaultQuery::parse(raw_query);
    VaultSearchResults {
        items: collect_matches(&query, &snapshot.items),
        monsters: collect_matches(&query, &snapshot.monsters),
        shops: collect_matches(&query, &snapshot.shops),
        characters: collect_matches(&query, &snapshot.characters),
        quests: collect_matches(&query, &snapshot.quests),
    }
}
