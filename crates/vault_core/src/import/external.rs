//! External monster definitions accepted by the importer.
//!
//! Source files hold `{ "monsters": [ ... ] }`. Entries are loosely typed:
//! scalars may be numbers or strings, and several blocks come either as
//! structured objects or as pre-formatted strings. Absent fields fall back to
//! defaults during normalization.

use serde::Deserialize;
use std::fmt::{Display, Formatter};

/// Top-level shape of one source file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MonsterSourceFile {
    /// Raw entries; each is decoded separately so one bad entry is not fatal.
    #[serde(default)]
    pub monsters: Vec<serde_json::Value>,
}

/// Number-or-text value rendered without quotes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    /// Whether the value counts as present (non-zero, non-blank).
    pub fn is_present(&self) -> bool {
        match self {
            Self::Int(value) => *value != 0,
            Self::Float(value) => *value != 0.0,
            Self::Text(value) => !value.trim().is_empty(),
        }
    }

    /// Integer view used for derived speeds; text is parsed when numeric.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            Self::Float(value) => Some(value.floor() as i64),
            Self::Text(value) => value.trim().parse().ok(),
        }
    }
}

impl Display for Scalar {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExternalAttack {
    #[serde(default)]
    pub count: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub damage: Option<Scalar>,
    #[serde(default)]
    pub special: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MovementSpec {
    #[serde(default)]
    pub base: Option<Scalar>,
    #[serde(default)]
    pub encounter: Option<Scalar>,
    #[serde(default)]
    pub fly: Option<Scalar>,
    #[serde(default)]
    pub burrow: Option<Scalar>,
    #[serde(default)]
    pub swim: Option<Scalar>,
}

/// Movement block; anything that is not an object uses default speeds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ExternalMovement {
    Detailed(MovementSpec),
    Other(serde_json::Value),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SaveCategories {
    #[serde(rename = "D", default)]
    pub death: Option<Scalar>,
    #[serde(rename = "W", default)]
    pub wands: Option<Scalar>,
    #[serde(rename = "P", default)]
    pub paralysis: Option<Scalar>,
    #[serde(rename = "B", default)]
    pub breath: Option<Scalar>,
    #[serde(rename = "S", default)]
    pub spells: Option<Scalar>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ExternalSaves {
    Categories(SaveCategories),
    Formatted(Scalar),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AppearingSpec {
    #[serde(default)]
    pub dungeon: Option<Scalar>,
    #[serde(default)]
    pub lair: Option<Scalar>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ExternalAppearing {
    Split(AppearingSpec),
    Formatted(Scalar),
}

/// One monster entry as written by external stat-block sources.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ExternalMonster {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub ac: Option<Scalar>,
    #[serde(default)]
    pub aac: Option<Scalar>,
    #[serde(default)]
    pub hd: Option<Scalar>,
    #[serde(default)]
    pub hp_avg: Option<Scalar>,
    #[serde(default)]
    pub attacks: Vec<ExternalAttack>,
    #[serde(default)]
    pub thac0: Option<Scalar>,
    #[serde(default)]
    pub attack_bonus: Option<Scalar>,
    #[serde(default)]
    pub mv: Option<ExternalMovement>,
    #[serde(default)]
    pub saves: Option<ExternalSaves>,
    #[serde(default)]
    pub save_as: Option<Scalar>,
    #[serde(default)]
    pub morale: Option<Scalar>,
    #[serde(default)]
    pub alignment: Option<String>,
    #[serde(default)]
    pub xp: Option<Scalar>,
    #[serde(default)]
    pub number_appearing: Option<ExternalAppearing>,
    #[serde(default)]
    pub treasure_type: Option<String>,
    #[serde(default)]
    pub special: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}
