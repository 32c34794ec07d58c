//! Browse groupings and quest progress summary.

use crate::model::character::Character;
use crate::model::quest::{quest_type_rank, Quest, QuestStatus};
use crate::repo::lookup::quest_by_id;
use std::collections::BTreeMap;

/// Group label for characters without a type.
pub const OTHER_CHARACTER_TYPE: &str = "Other";
const MAIN_QUEST_TYPE: &str = "Main Quest";
const CORE_QUEST_TYPE: &str = "Core Quest";

/// Records sharing one type label.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeGroup<'a, R> {
    pub label: String,
    pub records: Vec<&'a R>,
}

/// Quests grouped by type: known types in browse order, then unknown types in
/// first-seen order. Records keep stored order inside a group.
pub fn group_quests_by_type(quests: &[Quest]) -> Vec<TypeGroup<'_, Quest>> {
    let mut groups: Vec<TypeGroup<'_, Quest>> = Vec::new();
    for quest in quests {
        match groups
            .iter_mut()
            .find(|group| group.label == quest.quest_type)
        {
            Some(group) => group.records.push(quest),
            None => groups.push(TypeGroup {
                label: quest.quest_type.clone(),
                records: vec![quest],
            }),
        }
    }
    groups.sort_by_key(|group| quest_type_rank(&group.label));
    groups
}

/// Characters grouped by type, groups sorted alphabetically.
pub fn group_characters_by_type(characters: &[Character]) -> Vec<TypeGroup<'_, Character>> {
    let mut by_type: BTreeMap<String, Vec<&Character>> = BTreeMap::new();
    for character in characters {
        let label = match character.character_type.trim() {
            "" => OTHER_CHARACTER_TYPE.to_string(),
            other => other.to_string(),
        };
        by_type.entry(label).or_default().push(character);
    }
    by_type
        .into_iter()
        .map(|(label, records)| TypeGroup { label, records })
        .collect()
}

/// Core sub-quest line in the overview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreProgress {
    pub id: String,
    pub name: String,
    pub emotion: Option<String>,
    pub status: QuestStatus,
}

/// Progress of the first main quest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainQuestProgress {
    pub id: String,
    pub name: String,
    pub completed_objectives: usize,
    pub total_objectives: usize,
    pub cores: Vec<CoreProgress>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestOverview {
    pub complete: usize,
    pub in_progress: usize,
    pub not_started: usize,
    pub main_quest: Option<MainQuestProgress>,
}

/// Status counts and main quest progress. Dangling or non-core sub-quest IDs
/// are left out of `cores`.
pub fn quest_overview(quests: &[Quest]) -> QuestOverview {
    let mut overview = QuestOverview::default();
    for quest in quests {
        match quest.status {
            QuestStatus::Complete => overview.complete += 1,
            QuestStatus::InProgress => overview.in_progress += 1,
            QuestStatus::NotStarted => overview.not_started += 1,
        }
    }

    overview.main_quest = quests
        .iter()
        .find(|quest| quest.quest_type == MAIN_QUEST_TYPE)
        .map(|main| MainQuestProgress {
            id: main.id.clone(),
            name: main.name.clone(),
            completed_objectives: main.completed_objectives(),
            total_objectives: main.objectives.len(),
            cores: main
                .sub_quest_ids()
                .iter()
                .filter_map(|sub_id| quest_by_id(quests, sub_id))
                .filter(|sub| sub.quest_type == CORE_QUEST_TYPE)
                .map(|sub| CoreProgress {
                    id: sub.id.clone(),
                    name: sub.name.clone(),
                    emotion: sub.emotion.clone(),
                    status: sub.status,
                })
                .collect(),
        });
    overview
}
