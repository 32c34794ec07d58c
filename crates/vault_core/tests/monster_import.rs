use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use vault_core::import::import_monster_dir;
use vault_core::{Collection, ImportError, JsonFileStore, Monster, RecordStore};

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 7, 4).unwrap()
}

fn write_source(dir: &Path, file: &str, value: serde_json::Value) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join(file), serde_json::to_string(&value).unwrap()).unwrap();
}

#[test]
fn import_normalizes_merges_and_sorts() {
    let vault = tempfile::tempdir().unwrap();
    let sources = vault.path().join("monsters");
    let store = JsonFileStore::new(vault.path());

    write_source(
        &sources,
        "b_undead.json",
        serde_json::json!({"monsters": [
            {
                "name": "Ghoul",
                "description": "Pale eater of the dead.",
                "ac": 6, "aac": 13, "hd": "2*", "hp_avg": 9,
                "attacks": [
                    {"count": 2, "name": "claw", "damage": "1d3", "special": "paralysis"},
                    {"name": "bite", "damage": "1d3"}
                ],
                "thac0": 18, "attack_bonus": 1,
                "mv": {"base": 90, "encounter": 30},
                "saves": {"D": 12, "W": 13, "P": 14, "B": 15, "S": 16},
                "save_as": "F2",
                "morale": 9, "alignment": "Chaotic", "xp": 25,
                "number_appearing": {"dungeon": "1d6", "lair": "2d8"},
                "treasure_type": "B",
                "special": ["Paralysis: 2d4 turns", "Undead immunities"],
                "tags": ["undead"]
            }
        ]}),
    );
    write_source(
        &sources,
        "a_beasts.json",
        serde_json::json!({"monsters": [
            {"name": "Stirge", "mv": {"base": 10, "encounter": 3, "fly": 180}},
            {"name": "Ape, White"},
            {"name": "stirge"}
        ]}),
    );
    fs::write(sources.join("notes.txt"), "not a source").unwrap();

    let report = import_monster_dir(&store, &sources, date()).unwrap();
    assert_eq!(report.files.len(), 2);
    assert_eq!(report.files[0].label, "a_beasts.json");
    assert_eq!(report.added_count(), 3);
    assert_eq!(report.skipped_count(), 1);

    let monsters: Vec<Monster> = store.load().unwrap();
    let names: Vec<&str> = monsters.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Ape, White", "Ghoul", "Stirge"]);

    let stirge = &monsters[2];
    assert_eq!(stirge.id, "monster-0001");
    assert_eq!(stirge.movement, "10' (3'), fly 180' (60')");

    let ghoul = &monsters[1];
    assert_eq!(ghoul.id, "monster-0003");
    assert_eq!(ghoul.source, "OSE");
    assert_eq!(ghoul.created_on, date());
    assert_eq!(
        ghoul.stat_line(),
        "AC 6 [13], HD 2* (9hp), Att 2 × claw (1d3) + paralysis or 1 × bite (1d3), \
         THAC0 18 [+1], MV 90' (30'), SV D12 W13 P14 B15 S16 (F2), ML 9, AL Chaotic, \
         XP 25, NA 1d6 (2d8), TT B"
    );
    assert!(ghoul
        .paste_block()
        .ends_with("\n\n▶ Paralysis: 2d4 turns\n▶ Undead immunities"));

    let content = fs::read_to_string(store.collection_path(Collection::Monsters)).unwrap();
    let saved: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(saved[1]["stat_line"], serde_json::json!(ghoul.stat_line()));
}

#[test]
fn rerunning_import_adds_nothing() {
    let vault = tempfile::tempdir().unwrap();
    let sources = vault.path().join("monsters");
    let store = JsonFileStore::new(vault.path());
    write_source(
        &sources,
        "goblins.json",
        serde_json::json!({"monsters": [{"name": "Goblin"}, {"name": "Goblin"}]}),
    );

    let first = import_monster_dir(&store, &sources, date()).unwrap();
    assert_eq!(first.added_count(), 1);
    let second = import_monster_dir(&store, &sources, date()).unwrap();
    assert_eq!(second.added_count(), 0);
    assert_eq!(second.skipped_count(), 2);

    let monsters: Vec<Monster> = store.load().unwrap();
    assert_eq!(monsters.len(), 1);
    assert_eq!(monsters[0].id, "monster-0001");
}

#[test]
fn malformed_entries_are_counted_not_fatal() {
    let vault = tempfile::tempdir().unwrap();
    let sources = vault.path().join("monsters");
    let store = JsonFileStore::new(vault.path());
    write_source(
        &sources,
        "mixed.json",
        serde_json::json!({"monsters": [
            "Orc",
            {"name": "Orc", "attacks": "bite"},
            {"name": "Kobold"}
        ]}),
    );

    let report = import_monster_dir(&store, &sources, date()).unwrap();
    assert_eq!(report.added_count(), 1);
    assert_eq!(report.rejected_count(), 2);
    let indexes: Vec<usize> = report.files[0].rejected.iter().map(|r| r.index).collect();
    assert_eq!(indexes, vec![0, 1]);
}

#[test]
fn broken_source_file_aborts_without_writing() {
    let vault = tempfile::tempdir().unwrap();
    let sources = vault.path().join("monsters");
    let store = JsonFileStore::new(vault.path());
    write_source(
        &sources,
        "a_ok.json",
        serde_json::json!({"monsters": [{"name": "Goblin"}]}),
    );
    fs::write(sources.join("b_broken.json"), "{\"monsters\": [").unwrap();

    let error = import_monster_dir(&store, &sources, date()).unwrap_err();
    assert!(matches!(error, ImportError::MalformedSource { .. }));
    assert!(!store.collection_path(Collection::Monsters).exists());
}

#[test]
fn missing_source_directory_is_fatal() {
    let vault = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(vault.path());
    let error = import_monster_dir(&store, &vault.path().join("absent"), date()).unwrap_err();
    assert!(matches!(error, ImportError::ReadDir { .. }));
}
