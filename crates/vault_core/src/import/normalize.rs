//! Pure conversion from external stat blocks to canonical monster fields.
//!
//! # Invariants
//! - Every absent field renders its documented default.
//! - Output depends only on the input entry; IDs and dates are assigned by
//!   the merge step.

use crate::import::external::{
    ExternalAppearing, ExternalAttack, ExternalMonster, ExternalMovement, ExternalSaves, Scalar,
};
use crate::model::monster::NewMonster;

const DEFAULT_AC: i64 = 9;
const DEFAULT_AAC: i64 = 10;
const DEFAULT_ATTACK_NAME: &str = "attack";
const DEFAULT_DAMAGE: &str = "1d6";
const DEFAULT_BASE_MOVE: i64 = 120;
const DEFAULT_ENCOUNTER_MOVE: i64 = 40;
const DEFAULT_SAVES: [i64; 5] = [14, 15, 16, 17, 18];
const DEFAULT_THAC0: i64 = 19;
const DEFAULT_ATTACK_BONUS: i64 = 0;
const DEFAULT_APPEARING: &str = "1d6";
const DEFAULT_HD: &str = "1";
const DEFAULT_HP: i64 = 4;
const DEFAULT_MORALE: i64 = 7;
const DEFAULT_ALIGNMENT: &str = "Neutral";
const DEFAULT_XP: i64 = 10;
const DEFAULT_TREASURE: &str = "None";
/// Name used when an entry carries none.
pub const UNKNOWN_MONSTER_NAME: &str = "Unknown";
const ABILITY_MARKER: &str = "▶";

fn scalar_or(value: Option<&Scalar>, default: impl Into<Scalar>) -> Scalar {
    value.cloned().unwrap_or_else(|| default.into())
}

fn text_or(value: Option<&str>, default: &str) -> String {
    value.unwrap_or(default).to_string()
}

/// `"<ac> [<aac>]"`.
pub fn format_armor_class(ac: Option<&Scalar>, aac: Option<&Scalar>) -> String {
    format!(
        "{} [{}]",
        scalar_or(ac, DEFAULT_AC),
        scalar_or(aac, DEFAULT_AAC)
    )
}

fn format_attack(attack: &ExternalAttack) -> String {
    let count = attack.count.filter(|count| *count > 1).unwrap_or(1);
    let name = attack.name.as_deref().unwrap_or(DEFAULT_ATTACK_NAME);
    let damage = scalar_or(attack.damage.as_ref(), DEFAULT_DAMAGE);
    let mut rendered = format!("{count} × {name} ({damage})");
    if let Some(special) = attack.special.as_deref().filter(|s| !s.is_empty()) {
        rendered.push_str(" + ");
        rendered.push_str(special);
    }
    rendered
}

/// Attack routines joined by `" or "`; no attacks renders one default attack.
pub fn format_attacks(attacks: &[ExternalAttack]) -> String {
    if attacks.is_empty() {
        return format!("1 × {DEFAULT_ATTACK_NAME} ({DEFAULT_DAMAGE})");
    }
    attacks
        .iter()
        .map(format_attack)
        .collect::<Vec<_>>()
        .join(" or ")
}

/// Base and encounter speed, then fly/burrow/swim when present and non-zero.
pub fn format_movement(movement: Option<&ExternalMovement>) -> String {
    let Some(ExternalMovement::Detailed(spec)) = movement else {
        return format!("{DEFAULT_BASE_MOVE}' ({DEFAULT_ENCOUNTER_MOVE}')");
    };
    let mut rendered = format!(
        "{}' ({}')",
        scalar_or(spec.base.as_ref(), DEFAULT_BASE_MOVE),
        scalar_or(spec.encounter.as_ref(), DEFAULT_ENCOUNTER_MOVE)
    );
    if let Some(fly) = spec.fly.as_ref().filter(|fly| fly.is_present()) {
        let fly_rendered = match fly.as_int() {
            Some(speed) => format!(", fly {fly}' ({}')", speed.div_euclid(3)),
            None => format!(", fly {fly}'"),
        };
        rendered.push_str(&fly_rendered);
    }
    if let Some(burrow) = spec.burrow.as_ref().filter(|burrow| burrow.is_present()) {
        rendered.push_str(&format!(", burrow {burrow}'"));
    }
    if let Some(swim) = spec.swim.as_ref().filter(|swim| swim.is_present()) {
        rendered.push_str(&format!(", swim {swim}'"));
    }
    rendered
}

/// Save categories with the save-as level, or a pre-formatted string verbatim.
pub fn format_saves(saves: Option<&ExternalSaves>, save_as: &Scalar) -> String {
    match saves {
        Some(ExternalSaves::Formatted(text)) => text.to_string(),
        Some(ExternalSaves::Categories(categories)) => format!(
            "D{} W{} P{} B{} S{} ({save_as})",
            scalar_or(categories.death.as_ref(), DEFAULT_SAVES[0]),
            scalar_or(categories.wands.as_ref(), DEFAULT_SAVES[1]),
            scalar_or(categories.paralysis.as_ref(), DEFAULT_SAVES[2]),
            scalar_or(categories.breath.as_ref(), DEFAULT_SAVES[3]),
            scalar_or(categories.spells.as_ref(), DEFAULT_SAVES[4]),
        ),
        None => {
            let [death, wands, paralysis, breath, spells] = DEFAULT_SAVES;
            format!("D{death} W{wands} P{paralysis} B{breath} S{spells} ({save_as})")
        }
    }
}

/// `"<thac0> [+<bonus>]"`.
pub fn format_thac0(thac0: Option<&Scalar>, attack_bonus: Option<&Scalar>) -> String {
    format!(
        "{} [+{}]",
        scalar_or(thac0, DEFAULT_THAC0),
        scalar_or(attack_bonus, DEFAULT_ATTACK_BONUS)
    )
}

/// `"<dungeon> (<lair>)"`, or a pre-formatted string verbatim.
pub fn format_number_appearing(appearing: Option<&ExternalAppearing>) -> String {
    match appearing {
        Some(ExternalAppearing::Formatted(text)) => text.to_string(),
        Some(ExternalAppearing::Split(split)) => format!(
            "{} ({})",
            scalar_or(split.dungeon.as_ref(), DEFAULT_APPEARING),
            scalar_or(split.lair.as_ref(), DEFAULT_APPEARING)
        ),
        None => format!("{DEFAULT_APPEARING} ({DEFAULT_APPEARING})"),
    }
}

/// One marked line per ability; empty list renders an empty string.
pub fn format_special_abilities(special: &[String]) -> String {
    special
        .iter()
        .map(|ability| format!("{ABILITY_MARKER} {ability}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Canonical name for an external entry.
pub fn monster_name(monster: &ExternalMonster) -> String {
    text_or(monster.name.as_deref(), UNKNOWN_MONSTER_NAME)
}

/// Converts an external entry into canonical monster fields.
pub fn normalize_monster(monster: &ExternalMonster) -> NewMonster {
    let hd = scalar_or(monster.hd.as_ref(), DEFAULT_HD);
    let save_as = monster.save_as.clone().unwrap_or_else(|| hd.clone());

    NewMonster {
        name: monster_name(monster),
        description: text_or(monster.description.as_deref(), ""),
        ac: format_armor_class(monster.ac.as_ref(), monster.aac.as_ref()),
        hd: hd.to_string(),
        hp: scalar_or(monster.hp_avg.as_ref(), DEFAULT_HP).to_string(),
        attacks: format_attacks(&monster.attacks),
        thac0: format_thac0(monster.thac0.as_ref(), monster.attack_bonus.as_ref()),
        movement: format_movement(monster.mv.as_ref()),
        saves: format_saves(monster.saves.as_ref(), &save_as),
        morale: scalar_or(monster.morale.as_ref(), DEFAULT_MORALE).to_string(),
        alignment: text_or(monster.alignment.as_deref(), DEFAULT_ALIGNMENT),
        xp: scalar_or(monster.xp.as_ref(), DEFAULT_XP).to_string(),
        number_appearing: format_number_appearing(monster.number_appearing.as_ref()),
        treasure_type: text_or(monster.treasure_type.as_deref(), DEFAULT_TREASURE),
        special_abilities: format_special_abilities(&monster.special),
        tags: monster.tags.clone(),
    }
}
