use chrono::NaiveDate;
use vault_core::model::record::parse_tag_list;
use vault_core::{
    Collection, Item, JsonFileStore, NewCharacter, NewItem, NewMonster, NewQuest, NewShop,
    ValidationError, VaultError, VaultService,
};

fn fixed_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

fn service(dir: &std::path::Path) -> VaultService<JsonFileStore> {
    VaultService::with_clock(JsonFileStore::new(dir), fixed_date)
}

#[test]
fn add_item_assigns_sequential_ids_and_stamps_date() {
    let dir = tempfile::tempdir().unwrap();
    let service = service(dir.path());

    let first = service
        .add_item(NewItem {
            name: "  Flame Tongue ".to_string(),
            tags: parse_tag_list("fire, sword, ,fire"),
            ..NewItem::default()
        })
        .unwrap();
    let second = service
        .add_item(NewItem {
            name: "Rope".to_string(),
            ..NewItem::default()
        })
        .unwrap();

    assert_eq!(first.id, "item-0001");
    assert_eq!(first.name, "Flame Tongue");
    assert_eq!(first.tags, vec!["fire", "sword"]);
    assert_eq!(first.created_on, fixed_date());
    assert_eq!(first.source, "Manual");
    assert_eq!(second.id, "item-0002");
    assert_eq!(service.list::<Item>().unwrap().len(), 2);
}

#[test]
fn blank_name_is_rejected_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let service = service(dir.path());

    let error = service
        .add_shop(NewShop {
            name: "   ".to_string(),
            ..NewShop::default()
        })
        .unwrap_err();
    assert!(matches!(
        error,
        VaultError::Validation(ValidationError::EmptyName {
            collection: Collection::Shops
        })
    ));
    assert!(!service
        .store()
        .collection_path(Collection::Shops)
        .exists());
}

#[test]
fn ids_continue_after_the_highest_existing_suffix() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path());
    std::fs::write(
        store.collection_path(Collection::Characters),
        serde_json::to_string(&serde_json::json!([
            {"id": "char-0004", "name": "Old Tom", "created_on": "2024-01-01"},
            {"id": "char-legacy", "name": "Nameless", "created_on": "2024-01-01"},
            {"id": "char-0002", "name": "Vex", "created_on": "2024-01-01"}
        ]))
        .unwrap(),
    )
    .unwrap();
    let service = VaultService::with_clock(store, fixed_date);

    assert_eq!(service.next_id(Collection::Characters).unwrap(), "char-0005");
    assert_eq!(service.next_id(Collection::Quests).unwrap(), "quest-0001");

    let added = service
        .add_character(NewCharacter {
            name: "Brisa".to_string(),
            shop_id: Some("  ".to_string()),
            ..NewCharacter::default()
        })
        .unwrap();
    assert_eq!(added.id, "char-0005");
    assert_eq!(added.shop_id, None);
}

#[test]
fn manual_monster_derives_stat_line_from_fields() {
    let dir = tempfile::tempdir().unwrap();
    let service = service(dir.path());

    let monster = service
        .add_monster(NewMonster {
            name: "Cave Bear".to_string(),
            description: "Huge and hungry.".to_string(),
            ac: "5 [14]".to_string(),
            hd: "7".to_string(),
            hp: "31".to_string(),
            attacks: "2 × claw (1d8), 1 × bite (2d6)".to_string(),
            thac0: "13 [+6]".to_string(),
            movement: "120' (40')".to_string(),
            saves: "D10 W11 P12 B13 S14 (3)".to_string(),
            morale: "9".to_string(),
            alignment: "Neutral".to_string(),
            xp: "450".to_string(),
            number_appearing: "1d2 (1d2)".to_string(),
            treasure_type: "None".to_string(),
            ..NewMonster::default()
        })
        .unwrap();

    assert_eq!(monster.id, "monster-0001");
    assert_eq!(monster.source, "Manual");
    assert_eq!(
        monster.stat_line(),
        "AC 5 [14], HD 7 (31hp), Att 2 × claw (1d8), 1 × bite (2d6), THAC0 13 [+6], \
         MV 120' (40'), SV D10 W11 P12 B13 S14 (3), ML 9, AL Neutral, XP 450, NA 1d2 (1d2), TT None"
    );
    assert_eq!(
        monster.paste_block(),
        format!("**Cave Bear**\n\nHuge and hungry.\n\n{}", monster.stat_line())
    );
}

#[test]
fn replace_updates_in_place_and_reports_unknown_ids() {
    let dir = tempfile::tempdir().unwrap();
    let service = service(dir.path());
    service
        .add_quest(NewQuest {
            name: "Find the Heart".to_string(),
            quest_type: "Main Quest".to_string(),
            ..NewQuest::default()
        })
        .unwrap();
    let mut quest = service
        .add_quest(NewQuest {
            name: "Rage Core".to_string(),
            quest_type: "Core Quest".to_string(),
            ..NewQuest::default()
        })
        .unwrap();

    quest.emotion = Some("Rage".to_string());
    service.replace(quest.clone()).unwrap();

    let stored = service.get::<vault_core::Quest>("quest-0002").unwrap().unwrap();
    assert_eq!(stored.emotion.as_deref(), Some("Rage"));
    let order: Vec<String> = service
        .list::<vault_core::Quest>()
        .unwrap()
        .into_iter()
        .map(|quest| quest.id)
        .collect();
    assert_eq!(order, vec!["quest-0001", "quest-0002"]);

    quest.id = "quest-0099".to_string();
    let error = service.replace(quest).unwrap_err();
    assert!(matches!(
        error,
        VaultError::NotFound {
            collection: Collection::Quests,
            ref id
        } if id == "quest-0099"
    ));
}

#[test]
fn lookups_return_none_for_unknown_ids() {
    let dir = tempfile::tempdir().unwrap();
    let service = service(dir.path());
    let shop = service
        .add_shop(NewShop {
            name: "Gilded Scale".to_string(),
            ..NewShop::default()
        })
        .unwrap();
    service
        .add_character(NewCharacter {
            name: "Orla".to_string(),
            shop_id: Some(shop.id.clone()),
            ..NewCharacter::default()
        })
        .unwrap();

    assert!(service.get::<Item>("item-0001").unwrap().is_none());
    let owner = service.character_by_shop(&shop.id).unwrap().unwrap();
    assert_eq!(owner.name, "Orla");
    assert!(service.character_by_shop("shop-0042").unwrap().is_none());
}
