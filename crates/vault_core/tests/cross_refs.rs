use vault_core::service::{group_quests_by_type, quest_overview};
use vault_core::{Collection, JsonFileStore, QuestStatus, VaultService};

fn seed_vault(dir: &std::path::Path) -> VaultService<JsonFileStore> {
    let store = JsonFileStore::new(dir);
    let collections = [
        (
            Collection::Items,
            serde_json::json!([
                {"id": "item-0001", "name": "Heart of Embers", "created_on": "2024-01-01"},
                {"id": "item-0002", "name": "Silver Key", "created_on": "2024-01-01"}
            ]),
        ),
        (
            Collection::Shops,
            serde_json::json!([{
                "id": "shop-0001", "name": "Gilded Scale", "owner": "Orla",
                "acquired_here": ["item-0002", "item-0404"],
                "stolen_from": ["item-0001"],
                "created_on": "2024-01-01"
            }]),
        ),
        (
            Collection::Characters,
            serde_json::json!([{
                "id": "char-0001", "name": "Orla", "type": "Merchant",
                "shop_id": "shop-0001",
                "quest_ids": ["quest-0001", "quest-0009"],
                "related_items": ["item-0002"],
                "created_on": "2024-01-01"
            }, {
                "id": "char-0002", "name": "Vex", "type": "Villain",
                "shop_id": "shop-0077",
                "created_on": "2024-01-01"
            }]),
        ),
        (
            Collection::Quests,
            serde_json::json!([
                {
                    "id": "quest-0001", "name": "Rekindle the Heart", "type": "Main Quest",
                    "status": "In Progress",
                    "objectives": [
                        {"text": "Find the cores", "status": "complete"},
                        {"text": "Forge the heart", "status": "not_started"}
                    ],
                    "sub_quests": ["quest-0002", "quest-0003", "quest-0404"],
                    "related_characters": ["char-0001"],
                    "core_item": "item-0001",
                    "host": "char-0002",
                    "current_holder": "char-0404"
                },
                {
                    "id": "quest-0002", "name": "Rage Core", "type": "Core Quest",
                    "status": "Complete", "emotion": "Rage",
                    "parent_quest": "quest-0001"
                },
                {
                    "id": "quest-0003", "name": "Smuggler Run", "type": "Side Quest",
                    "parent_quest": "quest-0001"
                },
                {
                    "id": "quest-0004", "name": "Loop", "type": "Rumor",
                    "parent_quest": "quest-0004", "sub_quests": ["quest-0004"]
                }
            ]),
        ),
    ];
    for (collection, value) in collections {
        std::fs::write(
            store.collection_path(collection),
            serde_json::to_string_pretty(&value).unwrap(),
        )
        .unwrap();
    }
    VaultService::new(store)
}

#[test]
fn shop_view_resolves_owner_and_item_refs() {
    let dir = tempfile::tempdir().unwrap();
    let service = seed_vault(dir.path());

    let view = service.shop_view("shop-0001").unwrap().unwrap();
    assert_eq!(view.owner_character.unwrap().id, "char-0001");
    assert_eq!(view.acquired_here[0].label(), "Silver Key (item-0002)");
    assert!(view.acquired_here[1].is_dangling());
    assert_eq!(view.acquired_here[1].label(), "item-0404");
    assert_eq!(view.stolen_from[0].name.as_deref(), Some("Heart of Embers"));

    assert!(service.shop_view("shop-0404").unwrap().is_none());
}

#[test]
fn character_view_keeps_dangling_shop_reference() {
    let dir = tempfile::tempdir().unwrap();
    let service = seed_vault(dir.path());

    let orla = service.character_view("char-0001").unwrap().unwrap();
    assert_eq!(orla.shop.unwrap().label(), "Gilded Scale (shop-0001)");
    assert_eq!(orla.quests.len(), 2);
    assert!(orla.quests[1].is_dangling());

    let vex = service.character_view("char-0002").unwrap().unwrap();
    let shop = vex.shop.unwrap();
    assert_eq!(shop.id, "shop-0077");
    assert!(shop.is_dangling());
}

#[test]
fn quest_view_resolves_every_reference_kind() {
    let dir = tempfile::tempdir().unwrap();
    let service = seed_vault(dir.path());

    let view = service.quest_view("quest-0001").unwrap().unwrap();
    let statuses: Vec<Option<QuestStatus>> = view.sub_quests.iter().map(|sub| sub.status).collect();
    assert_eq!(
        statuses,
        vec![Some(QuestStatus::Complete), Some(QuestStatus::NotStarted), None]
    );
    assert_eq!(view.related_characters[0].label(), "Orla (char-0001)");
    assert_eq!(view.core_item.unwrap().label(), "Heart of Embers (item-0001)");
    assert_eq!(view.host.unwrap().name.as_deref(), Some("Vex"));
    assert!(view.current_holder.unwrap().is_dangling());
    assert!(view.parent.is_none());

    let looped = service.quest_view("quest-0004").unwrap().unwrap();
    assert_eq!(looped.parent.unwrap().label(), "Loop (quest-0004)");
    assert_eq!(looped.sub_quests[0].link.id, "quest-0004");
}

#[test]
fn quest_browse_and_overview() {
    let dir = tempfile::tempdir().unwrap();
    let service = seed_vault(dir.path());
    let snapshot = service.snapshot().unwrap();

    let labels: Vec<String> = group_quests_by_type(&snapshot.quests)
        .into_iter()
        .map(|group| group.label)
        .collect();
    assert_eq!(labels, vec!["Main Quest", "Core Quest", "Side Quest", "Rumor"]);

    let overview = quest_overview(&snapshot.quests);
    assert_eq!(overview.complete, 1);
    assert_eq!(overview.in_progress, 1);
    assert_eq!(overview.not_started, 2);
    let main = overview.main_quest.unwrap();
    assert_eq!(main.id, "quest-0001");
    assert_eq!((main.completed_objectives, main.total_objectives), (1, 2));
    assert_eq!(main.cores.len(), 1);
    assert_eq!(main.cores[0].emotion.as_deref(), Some("Rage"));

    let counts = snapshot.counts();
    assert_eq!(counts.get(Collection::Quests), 4);
    assert_eq!(counts.get(Collection::Monsters), 0);
    assert_eq!(counts.total(), 9);
}
