//! Resolved record views for the presentation layer.
//!
//! # Responsibility
//! - Resolve every foreign key of a shop, character or quest against a
//!   snapshot so renderers receive fully-formed data.
//!
//! # Invariants
//! - Dangling references stay visible as [`LinkedRef`] with `name = None`.
//! - Views never recurse through quest trees, so cycles are harmless.

use crate::model::character::Character;
use crate::model::item::Item;
use crate::model::quest::{Quest, QuestStatus};
use crate::model::record::Record;
use crate::model::shop::Shop;
use crate::repo::lookup::{character_by_id, character_by_shop, find_by_id, quest_by_id, shop_by_id};
use crate::repo::snapshot::VaultSnapshot;

/// A foreign key plus the referent's name when it resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedRef {
    pub id: String,
    pub name: Option<String>,
}

impl LinkedRef {
    /// Resolves `id` against `records`.
    pub fn resolve<R: Record>(records: &[R], id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: find_by_id(records, id).map(|record| record.name().to_string()),
        }
    }

    pub fn is_dangling(&self) -> bool {
        self.name.is_none()
    }

    /// `"Name (id)"` when resolved, the raw ID otherwise.
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => format!("{name} ({})", self.id),
            None => self.id.clone(),
        }
    }
}

/// Sub-quest reference including the referent's status when resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubQuestRef {
    pub link: LinkedRef,
    pub status: Option<QuestStatus>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShopView {
    pub shop: Shop,
    /// Character whose `shop_id` points at this shop.
    pub owner_character: Option<Character>,
    pub acquired_here: Vec<LinkedRef>,
    pub stolen_from: Vec<LinkedRef>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CharacterView {
    pub character: Character,
    pub shop: Option<LinkedRef>,
    pub quests: Vec<LinkedRef>,
    pub related_items: Vec<LinkedRef>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuestView {
    pub quest: Quest,
    pub parent: Option<LinkedRef>,
    pub sub_quests: Vec<SubQuestRef>,
    pub related_characters: Vec<LinkedRef>,
    pub related_items: Vec<LinkedRef>,
    pub host: Option<LinkedRef>,
    pub current_holder: Option<LinkedRef>,
    pub core_item: Option<LinkedRef>,
}

fn resolve_all<R: Record>(records: &[R], ids: &[String]) -> Vec<LinkedRef> {
    ids.iter().map(|id| LinkedRef::resolve(records, id)).collect()
}

fn resolve_opt<R: Record>(records: &[R], id: Option<&str>) -> Option<LinkedRef> {
    id.map(|id| LinkedRef::resolve(records, id))
}

pub fn shop_view(snapshot: &VaultSnapshot, shop: &Shop) -> ShopView {
    ShopView {
        shop: shop.clone(),
        owner_character: character_by_shop(&snapshot.characters, &shop.id).cloned(),
        acquired_here: resolve_all::<Item>(&snapshot.items, &shop.acquired_here),
        stolen_from: resolve_all::<Item>(&snapshot.items, &shop.stolen_from),
    }
}

pub fn character_view(snapshot: &VaultSnapshot, character: &Character) -> CharacterView {
    CharacterView {
        character: character.clone(),
        shop: character.shop_id.as_deref().map(|shop_id| LinkedRef {
            id: shop_id.to_string(),
            name: shop_by_id(&snapshot.shops, shop_id).map(|shop| shop.name.clone()),
        }),
        quests: resolve_all(&snapshot.quests, &character.quest_ids),
        related_items: resolve_all(&snapshot.items, &character.related_items),
    }
}

pub fn quest_view(snapshot: &VaultSnapshot, quest: &Quest) -> QuestView {
    let sub_quests = quest
        .sub_quest_ids()
        .iter()
        .map(|sub_id| {
            let sub = quest_by_id(&snapshot.quests, sub_id);
            SubQuestRef {
                link: LinkedRef {
                    id: sub_id.clone(),
                    name: sub.map(|found| found.name.clone()),
                },
                status: sub.map(|found| found.status),
            }
        })
        .collect();

    QuestView {
        quest: quest.clone(),
        parent: resolve_opt(&snapshot.quests, quest.parent_quest.as_deref()),
        sub_quests,
        related_characters: resolve_all(&snapshot.characters, quest.related_character_ids()),
        related_items: resolve_all(&snapshot.items, quest.related_item_ids()),
        host: quest.host.as_deref().map(|id| LinkedRef {
            id: id.to_string(),
            name: character_by_id(&snapshot.characters, id).map(|found| found.name.clone()),
        }),
        current_holder: resolve_opt(&snapshot.characters, quest.current_holder.as_deref()),
        core_item: resolve_opt(&snapshot.items, quest.core_item.as_deref()),
    }
}
