//! Cross-reference lookups over loaded collections.
//!
//! Every lookup is a linear scan by exact string equality and returns `None`
//! for dangling references. Callers render the raw ID in that case.

use crate::model::character::Character;
use crate::model::item::Item;
use crate::model::monster::Monster;
use crate::model::quest::Quest;
use crate::model::record::Record;
use crate::model::shop::Shop;

/// First record whose ID equals `id`.
pub fn find_by_id<'a, R: Record>(records: &'a [R], id: &str) -> Option<&'a R> {
    records.iter().find(|record| record.id() == id)
}

pub fn item_by_id<'a>(items: &'a [Item], item_id: &str) -> Option<&'a Item> {
    find_by_id(items, item_id)
}

pub fn monster_by_id<'a>(monsters: &'a [Monster], monster_id: &str) -> Option<&'a Monster> {
    find_by_id(monsters, monster_id)
}

pub fn shop_by_id<'a>(shops: &'a [Shop], shop_id: &str) -> Option<&'a Shop> {
    find_by_id(shops, shop_id)
}

pub fn character_by_id<'a>(characters: &'a [Character], char_id: &str) -> Option<&'a Character> {
    find_by_id(characters, char_id)
}

pub fn quest_by_id<'a>(quests: &'a [Quest], quest_id: &str) -> Option<&'a Quest> {
    find_by_id(quests, quest_id)
}

/// Character claiming ownership of `shop_id`.
///
/// At most one owner is expected but not enforced; the first match wins.
pub fn character_by_shop<'a>(characters: &'a [Character], shop_id: &str) -> Option<&'a Character> {
    characters
        .iter()
        .find(|character| character.shop_id.as_deref() == Some(shop_id))
}
