//! Monster domain model.
//!
//! # Responsibility
//! - Define the canonical flat monster record.
//! - Derive `stat_line` and `paste_block` from the stat fields.
//!
//! # Invariants
//! - `stat_line` and `paste_block` are pure functions of the other fields.
//!   Stored copies are ignored on load and regenerated on save, so editing a
//!   stat field can never leave them stale.

use crate::model::record::{serialize_extra, Collection, ExtraFields, Record};
use chrono::NaiveDate;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

const DERIVED_KEYS: &[&str] = &["stat_line", "paste_block"];

/// Provenance label for monsters entered by hand.
pub const MONSTER_SOURCE_MANUAL: &str = "Manual";
/// Provenance label for monsters produced by the importer.
pub const MONSTER_SOURCE_IMPORTED: &str = "OSE";

/// Monster with the canonical flat stat projection.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Monster {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub ac: String,
    #[serde(default)]
    pub hd: String,
    #[serde(default)]
    pub hp: String,
    #[serde(default)]
    pub attacks: String,
    #[serde(default)]
    pub thac0: String,
    #[serde(default)]
    pub movement: String,
    #[serde(default)]
    pub saves: String,
    #[serde(default)]
    pub morale: String,
    #[serde(default)]
    pub alignment: String,
    #[serde(default)]
    pub xp: String,
    #[serde(default)]
    pub number_appearing: String,
    #[serde(default)]
    pub treasure_type: String,
    /// Pre-rendered ability lines; empty when the monster has none.
    #[serde(default)]
    pub special_abilities: String,
    pub created_on: NaiveDate,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Canonical monster fields before identity is assigned.
///
/// Produced by manual entry and by the import normalizer alike.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewMonster {
    pub name: String,
    pub description: String,
    pub ac: String,
    pub hd: String,
    pub hp: String,
    pub attacks: String,
    pub thac0: String,
    pub movement: String,
    pub saves: String,
    pub morale: String,
    pub alignment: String,
    pub xp: String,
    pub number_appearing: String,
    pub treasure_type: String,
    pub special_abilities: String,
    pub tags: Vec<String>,
}

impl Monster {
    /// Builds a stored monster from canonical fields.
    pub fn create(
        id: String,
        created_on: NaiveDate,
        source: impl Into<String>,
        input: NewMonster,
    ) -> Self {
        Self {
            id,
            name: input.name,
            description: input.description,
            ac: input.ac,
            hd: input.hd,
            hp: input.hp,
            attacks: input.attacks,
            thac0: input.thac0,
            movement: input.movement,
            saves: input.saves,
            morale: input.morale,
            alignment: input.alignment,
            xp: input.xp,
            number_appearing: input.number_appearing,
            treasure_type: input.treasure_type,
            special_abilities: input.special_abilities,
            created_on,
            source: source.into(),
            tags: input.tags,
            extra: ExtraFields::new(),
        }
    }

    /// Single-line stat block in fixed field order.
    pub fn stat_line(&self) -> String {
        format!(
            "AC {}, HD {} ({}hp), Att {}, THAC0 {}, MV {}, SV {}, ML {}, AL {}, XP {}, NA {}, TT {}",
            self.ac,
            self.hd,
            self.hp,
            self.attacks,
            self.thac0,
            self.movement,
            self.saves,
            self.morale,
            self.alignment,
            self.xp,
            self.number_appearing,
            self.treasure_type
        )
    }

    /// Name header, description, stat line and (when present) abilities.
    pub fn paste_block(&self) -> String {
        let mut block = format!(
            "**{}**\n\n{}\n\n{}",
            self.name,
            self.description,
            self.stat_line()
        );
        if !self.special_abilities.trim().is_empty() {
            block.push_str("\n\n");
            block.push_str(&self.special_abilities);
        }
        block
    }
}

impl Record for Monster {
    const COLLECTION: Collection = Collection::Monsters;

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.description.as_str()];
        fields.extend(self.tags.iter().map(String::as_str));
        fields
    }
}

impl Serialize for Monster {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("id", &self.id)?;
        map.serialize_entry("name", &self.name)?;
        map.serialize_entry("description", &self.description)?;
        map.serialize_entry("ac", &self.ac)?;
        map.serialize_entry("hd", &self.hd)?;
        map.serialize_entry("hp", &self.hp)?;
        map.serialize_entry("attacks", &self.attacks)?;
        map.serialize_entry("thac0", &self.thac0)?;
        map.serialize_entry("movement", &self.movement)?;
        map.serialize_entry("saves", &self.saves)?;
        map.serialize_entry("morale", &self.morale)?;
        map.serialize_entry("alignment", &self.alignment)?;
        map.serialize_entry("xp", &self.xp)?;
        map.serialize_entry("number_appearing", &self.number_appearing)?;
        map.serialize_entry("treasure_type", &self.treasure_type)?;
        map.serialize_entry("special_abilities", &self.special_abilities)?;
        map.serialize_entry("stat_line", &self.stat_line())?;
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
    use super::{Monster, NewMonster, MONSTER_SOURCE_MANUAL};
    use chrono::NaiveDate;

    fn ghoul() -> Monster {
        Monster::create(
            "monster-0007".to_string(),
            NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
            MONSTER_SOURCE_MANUAL,
            NewMonster {
                name: "Ghoul".to_string(),
                description: "Pallid eater of the dead.".to_string(),
                ac: "6 [13]".to_string(),
                hd: "2*".to_string(),
                hp: "9".to_string(),
                attacks: "2 × claw (1d3 + paralysis)".to_string(),
                thac0: "18 [+1]".to_string(),
                movement: "90' (30')".to_string(),
                saves: "D12 W13 P14 B15 S16 (2)".to_string(),
                morale: "9".to_string(),
                alignment: "Chaotic".to_string(),
                xp: "25".to_string(),
                number_appearing: "1d6 (2d8)".to_string(),
                treasure_type: "B".to_string(),
                special_abilities: String::new(),
                tags: vec!["undead".to_string()],
            },
        )
    }

    #[test]
    fn stat_line_uses_fixed_order() {
        assert_eq!(
            ghoul().stat_line(),
            "AC 6 [13], HD 2* (9hp), Att 2 × claw (1d3 + paralysis), THAC0 18 [+1], \
             MV 90' (30'), SV D12 W13 P14 B15 S16 (2), ML 9, AL Chaotic, XP 25, \
             NA 1d6 (2d8), TT B"
        );
    }

    #[test]
    fn paste_block_omits_empty_abilities_section() {
        let block = ghoul().paste_block();
        assert!(block.starts_with("**Ghoul**\n\nPallid eater of the dead.\n\nAC 6 [13]"));
        assert!(block.ends_with("TT B"));
    }

    #[test]
    fn derived_fields_regenerate_after_stat_edit() {
        let mut monster = ghoul();
        monster.special_abilities = "▶ Paralysing touch".to_string();
        monster.morale = "12".to_string();

        let json = serde_json::to_value(&monster).unwrap();
        assert!(json["stat_line"].as_str().unwrap().contains("ML 12"));
        assert!(json["paste_block"]
            .as_str()
            .unwrap()
            .ends_with("TT B\n\n▶ Paralysing touch"));
    }

    #[test]
    fn stored_derived_fields_are_not_duplicated() {
        let mut json = serde_json::to_value(ghoul()).unwrap();
        json["stat_line"] = serde_json::Value::String("stale".to_string());
        let loaded: Monster = serde_json::from_value(json).unwrap();
        let text = serde_json::to_string(&loaded).unwrap();
        assert_eq!(text.matches("\"stat_line\"").count(), 1);
        assert!(!text.contains("stale"));
    }
}
