//! Item domain model.
//!
//! # Responsibility
//! - Define the canonical item record and its paste-block projection.
//!
//! # Invariants
//! - `paste_block` is derived from `name`, `description` and `rules` on every
//!   serialization; a stored copy is never trusted.

use crate::model::record::{serialize_extra, Collection, ExtraFields, Record};
use chrono::NaiveDate;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

const DERIVED_KEYS: &[&str] = &["paste_block"];

/// Provenance label for items entered through the vault.
pub const ITEM_SOURCE_MANUAL: &str = "Manual";

/// Magic item, mundane gear or trinket owned by the item collection.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub rarity: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub rules: String,
    pub created_on: NaiveDate,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Input for the add-item use case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewItem {
    pub name: String,
    pub category: String,
    pub rarity: String,
    pub description: String,
    pub rules: String,
    pub tags: Vec<String>,
}

impl Item {
    /// Builds a stored item from validated input.
    pub fn create(id: String, created_on: NaiveDate, input: NewItem) -> Self {
        Self {
            id,
            name: input.name,
            category: input.category,
            rarity: input.rarity,
            description: input.description,
            rules: input.rules,
            created_on,
            source: ITEM_SOURCE_MANUAL.to_string(),
            tags: input.tags,
            extra: ExtraFields::new(),
        }
    }

    /// Fixed-format text block for pasting into external tools.
    pub fn paste_block(&self) -> String {
        format!(
            "**{}**\n\n*Description*:\n{}\n\n*Effect*:\n{}",
            self.name, self.description, self.rules
        )
        .trim()
        .to_string()
    }
}

impl Record for Item {
    const COLLECTION: Collection = Collection::Items;

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.name.as_str(),
            self.description.as_str(),
            self.rules.as_str(),
        ];
        fields.extend(self.tags.iter().map(String::as_str));
        fields
    }
}

impl Serialize for Item {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("id", &self.id)?;
        map.serialize_entry("name", &self.name)?;
        map.serialize_entry("category", &self.category)?;
        map.serialize_entry("rarity", &self.rarity)?;
        map.serialize_entry("description", &self.description)?;
        map.serialize_entry("rules", &self.rules)?;
        map.serialize_entry("created_on", &self.created_on)?;
        map.serialize_entry("source", &self.source)?;
        map.serialize_entry("tags", &self.tags)?;
        map.serialize_entry("paste_block", &self.paste_block())?;
        serialize_extra(&mut map, &self.extra, DERIVED_KEYS)?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::{Item, NewItem};
    use chrono::NaiveDate;

    fn sample() -> Item {
        Item::create(
            "item-0001".to_string(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            NewItem {
                name: "Pipe of Embers".to_string(),
                description: "A warm briar pipe.".to_string(),
                rules: "Lights any fire.".to_string(),
                ..NewItem::default()
            },
        )
    }

    #[test]
    fn paste_block_uses_fixed_sections() {
        assert_eq!(
            sample().paste_block(),
            "**Pipe of Embers**\n\n*Description*:\nA warm briar pipe.\n\n*Effect*:\nLights any fire."
        );
    }

    #[test]
    fn paste_block_follows_edits() {
        let mut item = sample();
        item.rules = "Lights any fire twice per day.".to_string();
        assert!(item.paste_block().ends_with("twice per day."));
    }

    #[test]
    fn stale_stored_paste_block_is_replaced_on_save() {
        let value = serde_json::json!({
            "id": "item-0001",
            "name": "Rope",
            "created_on": "2024-03-01",
            "paste_block": "**Old Name**",
            "weight": 5
        });
        let item: Item = serde_json::from_value(value).unwrap();
        let written = serde_json::to_value(&item).unwrap();
        assert_eq!(
            written["paste_block"],
            "**Rope**\n\n*Description*:\n\n\n*Effect*:"
        );
        assert_eq!(written["weight"], 5);
    }
}
