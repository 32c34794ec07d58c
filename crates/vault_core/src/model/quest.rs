//! Quest model.
//!
//! # Responsibility
//! - Define quest records, objectives and optional campaign-specific fields.
//!
//! # Invariants
//! - `parent_quest` / `sub_quests` form a tree by convention only. Cycles and
//!   self references are tolerated; nothing walks the tree recursively.
//! - `quest_type` is open text; see [`QUEST_TYPE_ORDER`] for browse order.
//! - List fields are `None` when the stored record has no such key, so an
//!   absent key and an empty list both survive a load/save cycle.

use crate::model::record::{Collection, ExtraFields, Record};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Known quest types in browse order. Other types sort after these.
pub const QUEST_TYPE_ORDER: &[&str] = &[
    "Main Quest",
    "Core Quest",
    "Side Quest",
    "Antagonist Arc",
    "Faction Arc",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestStatus {
    #[default]
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Complete")]
    Complete,
}

impl QuestStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "Not Started",
            Self::InProgress => "In Progress",
            Self::Complete => "Complete",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectiveStatus {
    #[default]
    NotStarted,
    InProgress,
    Complete,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Objective {
    pub text: String,
    #[serde(default)]
    pub status: ObjectiveStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestMechanics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extraction_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenge: Option<String>,
    /// Character label → role in the party plan.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party_roles: Option<BTreeMap<String, String>>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quest {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub quest_type: String,
    #[serde(default)]
    pub status: QuestStatus,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub objectives: Vec<Objective>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_quest: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_quests: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_characters: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_items: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biome: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mechanics: Option<QuestMechanics>,
    /// Character ID hosting the quest's core.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    /// Character ID currently holding the core item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_holder: Option<String>,
    /// Item ID at the centre of the quest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub core_item: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stakes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aftermath: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub themes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Hand-authored quests often carry no creation stamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_on: Option<NaiveDate>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Input for the add-quest use case.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewQuest {
    pub name: String,
    pub quest_type: String,
    pub status: QuestStatus,
    pub description: String,
    pub objectives: Vec<Objective>,
    pub parent_quest: Option<String>,
    pub related_characters: Vec<String>,
    pub related_items: Vec<String>,
    pub tags: Vec<String>,
}

impl Quest {
    pub fn create(id: String, created_on: NaiveDate, input: NewQuest) -> Self {
        Self {
            id,
            name: input.name,
            quest_type: input.quest_type,
            status: input.status,
            description: input.description,
            objectives: input.objectives,
            parent_quest: input.parent_quest.filter(|value| !value.trim().is_empty()),
            sub_quests: Some(Vec::new()),
            related_characters: Some(input.related_characters),
            related_items: Some(input.related_items),
            emotion: None,
            biome: None,
            mechanics: None,
            host: None,
            current_holder: None,
            core_item: None,
            stakes: None,
            aftermath: None,
            themes: None,
            tags: Some(input.tags),
            created_on: Some(created_on),
            extra: ExtraFields::new(),
        }
    }

    pub fn sub_quest_ids(&self) -> &[String] {
        self.sub_quests.as_deref().unwrap_or_default()
    }

    pub fn related_character_ids(&self) -> &[String] {
        self.related_characters.as_deref().unwrap_or_default()
    }

    pub fn related_item_ids(&self) -> &[String] {
        self.related_items.as_deref().unwrap_or_default()
    }

    /// Browse rank of this quest's type: known types by position, others last.
    pub fn type_rank(&self) -> usize {
        quest_type_rank(&self.quest_type)
    }

    /// Number of objectives marked complete.
    pub fn completed_objectives(&self) -> usize {
        self.objectives
            .iter()
            .filter(|objective| objective.status == ObjectiveStatus::Complete)
            .count()
    }
}

/// Position of `quest_type` in [`QUEST_TYPE_ORDER`], or its length if unknown.
pub fn quest_type_rank(quest_type: &str) -> usize {
    QUEST_TYPE_ORDER
        .iter()
        .position(|known| *known == quest_type)
        .unwrap_or(QUEST_TYPE_ORDER.len())
}

impl Record for Quest {
    const COLLECTION: Collection = Collection::Quests;

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.name.as_str(),
            self.quest_type.as_str(),
            self.description.as_str(),
            self.emotion.as_deref().unwrap_or(""),
            self.biome.as_deref().unwrap_or(""),
        ];
        fields.extend(self.themes.iter().flatten().map(String::as_str));
        fields.extend(self.tags.iter().flatten().map(String::as_str));
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::{quest_type_rank, ObjectiveStatus, Quest, QuestStatus};

    #[test]
    fn status_uses_display_wire_names() {
        let value = serde_json::json!({
            "id": "quest-main",
            "name": "The Shattered Heart",
            "type": "Main Quest",
            "status": "In Progress",
            "description": "Reforge the heart before the eclipse.",
            "objectives": [
                {"text": "Find the first core", "status": "complete"},
                {"text": "Find the second core", "status": "in_progress", "notes": "Swamp"}
            ],
            "mechanics": {"party_roles": {"Bard": "Distraction"}}
        });
        let quest: Quest = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(quest.status, QuestStatus::InProgress);
        assert_eq!(quest.objectives[1].status, ObjectiveStatus::InProgress);
        assert_eq!(quest.completed_objectives(), 1);
        assert!(quest.created_on.is_none());

        assert_eq!(serde_json::to_value(&quest).unwrap(), value);
    }

    #[test]
    fn absent_and_empty_lists_are_kept_apart() {
        let value = serde_json::json!([
            {"id": "quest-0001", "name": "Bare", "type": "Rumor", "status": "Not Started",
             "description": "", "objectives": []},
            {"id": "quest-0002", "name": "Empty", "type": "Rumor", "status": "Not Started",
             "description": "", "objectives": [], "sub_quests": [], "related_characters": [],
             "related_items": [], "themes": [], "tags": [],
             "mechanics": {"party_roles": {}}}
        ]);
        let quests: Vec<Quest> = serde_json::from_value(value.clone()).unwrap();
        assert!(quests[0].sub_quests.is_none());
        assert!(quests[0].sub_quest_ids().is_empty());
        assert_eq!(quests[1].sub_quests, Some(Vec::new()));
        assert_eq!(serde_json::to_value(&quests).unwrap(), value);
    }

    #[test]
    fn unknown_types_rank_after_known_types() {
        assert_eq!(quest_type_rank("Main Quest"), 0);
        assert_eq!(quest_type_rank("Faction Arc"), 4);
        assert_eq!(quest_type_rank("Heist"), 5);
    }
}
