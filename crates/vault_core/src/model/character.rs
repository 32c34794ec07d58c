//! Character (party member / NPC) model.

use crate::model::record::{Collection, ExtraFields, Record};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Suggested character types. `Character::character_type` stays open text.
pub const KNOWN_CHARACTER_TYPES: &[&str] = &[
    "Party Member",
    "Major NPC",
    "Quest NPC",
    "Encampment NPC",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub character_type: String,
    #[serde(default)]
    pub race_class: String,
    #[serde(default)]
    pub appearance: String,
    #[serde(default)]
    pub personality: String,
    #[serde(default)]
    pub motivations: String,
    #[serde(default)]
    pub special_notes: String,
    /// Weak reference to an owned shop; serialized as `null` when absent.
    #[serde(default)]
    pub shop_id: Option<String>,
    #[serde(default)]
    pub quest_ids: Vec<String>,
    #[serde(default)]
    pub related_items: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_on: NaiveDate,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Input for the add-character use case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewCharacter {
    pub name: String,
    pub character_type: String,
    pub race_class: String,
    pub appearance: String,
    pub personality: String,
    pub motivations: String,
    pub special_notes: String,
    /// Blank input is stored as `None`.
    pub shop_id: Option<String>,
    pub tags: Vec<String>,
}

impl Character {
    pub fn create(id: String, created_on: NaiveDate, input: NewCharacter) -> Self {
        let shop_id = input
            .shop_id
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        Self {
            id,
            name: input.name,
            character_type: input.character_type,
            race_class: input.race_class,
            appearance: input.appearance,
            personality: input.personality,
            motivations: input.motivations,
            special_notes: input.special_notes,
            shop_id,
            quest_ids: Vec::new(),
            related_items: Vec::new(),
            tags: input.tags,
            created_on,
            extra: ExtraFields::new(),
        }
    }
}

impl Record for Character {
    const COLLECTION: Collection = Collection::Characters;

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.name.as_str(),
            self.character_type.as_str(),
            self.race_class.as_str(),
            self.appearance.as_str(),
            self.personality.as_str(),
            self.special_notes.as_str(),
        ];
        fields.extend(self.tags.iter().map(String::as_str));
        fields
    }
}
