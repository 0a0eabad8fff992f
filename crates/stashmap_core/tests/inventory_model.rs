use stashmap_core::db::open_db_in_memory;
use stashmap_core::{
    Inventory, InventoryError, MarkerKey, Position, SqliteInventoryStore, ValidationError,
    CANVAS_HEIGHT, CANVAS_WIDTH,
};
use uuid::Uuid;

fn setup() -> rusqlite::Connection {
    open_db_in_memory().unwrap()
}

fn load(conn: &rusqlite::Connection) -> Inventory<SqliteInventoryStore<'_>> {
    Inventory::load(SqliteInventoryStore::try_new(conn).unwrap()).unwrap()
}

#[test]
fn create_place_then_query_returns_empty_place() {
    let conn = setup();
    let mut inventory = load(&conn);

    let place = inventory.create_place("柜子1", "images/1.jpg").unwrap();

    let loaded = inventory.place(place.id).unwrap();
    assert_eq!(loaded.name, "柜子1");
    assert_eq!(loaded.image, "images/1.jpg");
    assert_eq!(inventory.item_count(place.id).unwrap(), 0);

    let reloaded = load(&conn);
    let places = reloaded.places();
    assert_eq!(places.len(), 1);
    assert_eq!(places[0], &place);
    assert!(reloaded.items_in_place(place.id).unwrap().is_empty());
}

#[test]
fn create_place_requires_name_and_image() {
    let conn = setup();
    let mut inventory = load(&conn);

    let err = inventory.create_place("  ", "images/1.jpg").unwrap_err();
    assert!(matches!(
        err,
        InventoryError::Validation(ValidationError::EmptyPlaceName)
    ));
    let err = inventory.create_place("书房", "").unwrap_err();
    assert!(matches!(
        err,
        InventoryError::Validation(ValidationError::EmptyImage)
    ));
    assert!(inventory.places().is_empty());
}

#[test]
fn create_item_scenario_and_relocate_to_new_place() {
    let conn = setup();
    let mut inventory = load(&conn);

    let cabinet_1 = inventory.create_place("柜子1", "images/1.jpg").unwrap();
    let phone = inventory
        .create_item(cabinet_1.id, "手机", "", 100, 100)
        .unwrap();

    let items = inventory.items_in_place(cabinet_1.id).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "手机");
    assert_eq!(items[0].position, Position::new(100, 100).unwrap());

    let cabinet_2 = inventory.create_place("柜子2", "images/2.jpg").unwrap();
    let moved = inventory
        .relocate_item(phone.id, cabinet_2.id, 50, 60)
        .unwrap();
    assert_eq!(moved.place_id, cabinet_2.id);
    assert_eq!(moved.position, Position::new(50, 60).unwrap());

    assert_eq!(inventory.item_count(cabinet_1.id).unwrap(), 0);
    let items = inventory.items_in_place(cabinet_2.id).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "手机");
    assert_eq!(items[0].position, Position::new(50, 60).unwrap());

    let reloaded = load(&conn);
    assert_eq!(reloaded.item_count(cabinet_1.id).unwrap(), 0);
    assert_eq!(reloaded.item(phone.id).unwrap(), &moved);
}

#[test]
fn create_item_rejects_out_of_canvas_and_unknown_place() {
    let conn = setup();
    let mut inventory = load(&conn);
    let place = inventory.create_place("客厅", "images/3.jpg").unwrap();

    let err = inventory
        .create_item(place.id, "钱包", "", CANVAS_WIDTH, 0)
        .unwrap_err();
    assert!(matches!(
        err,
        InventoryError::Validation(ValidationError::PositionOutOfBounds { .. })
    ));
    let err = inventory
        .create_item(place.id, "钱包", "", 0, CANVAS_HEIGHT + 10)
        .unwrap_err();
    assert!(matches!(err, InventoryError::Validation(_)));

    let err = inventory
        .create_item(place.id, " ", "", 10, 10)
        .unwrap_err();
    assert!(matches!(
        err,
        InventoryError::Validation(ValidationError::EmptyItemName)
    ));

    let missing = Uuid::new_v4();
    let err = inventory
        .create_item(missing, "钱包", "", 10, 10)
        .unwrap_err();
    assert!(matches!(err, InventoryError::PlaceNotFound(id) if id == missing));
    assert!(err.is_not_found());

    assert_eq!(inventory.item_count(place.id).unwrap(), 0);
    assert!(inventory.all_items().is_empty());
}

#[test]
fn update_item_changes_only_details() {
    let conn = setup();
    let mut inventory = load(&conn);
    let place = inventory.create_place("柜子1", "images/1.jpg").unwrap();
    let item = inventory
        .create_item(place.id, "毛巾", "", 100, 200)
        .unwrap();

    let updated = inventory
        .update_item(item.id, " 浴巾 ", "蓝色\n两条")
        .unwrap();
    assert_eq!(updated.name, "浴巾");
    assert_eq!(updated.description, "蓝色\n两条");
    assert_eq!(updated.place_id, place.id);
    assert_eq!(updated.position, item.position);

    let err = inventory.update_item(item.id, "", "x").unwrap_err();
    assert!(matches!(
        err,
        InventoryError::Validation(ValidationError::EmptyItemName)
    ));
    assert_eq!(inventory.item(item.id).unwrap().name, "浴巾");

    let reloaded = load(&conn);
    assert_eq!(reloaded.item(item.id).unwrap(), &updated);
}

#[test]
fn relocate_within_same_place_changes_only_position() {
    let conn = setup();
    let mut inventory = load(&conn);
    let place = inventory.create_place("柜子1", "images/1.jpg").unwrap();
    let first = inventory.create_item(place.id, "手机", "", 100, 100).unwrap();
    let second = inventory.create_item(place.id, "钱包", "", 200, 100).unwrap();

    let moved = inventory.relocate_item(first.id, place.id, 5, 6).unwrap();
    assert_eq!(moved.place_id, place.id);
    assert_eq!(moved.name, first.name);
    assert_eq!(moved.position, Position::new(5, 6).unwrap());

    let ids = inventory
        .items_in_place(place.id)
        .unwrap()
        .iter()
        .map(|item| item.id)
        .collect::<Vec<_>>();
    assert_eq!(ids, vec![first.id, second.id]);
    assert_eq!(inventory.item_count(place.id).unwrap(), 2);

    let reloaded = load(&conn);
    let reloaded_ids = reloaded
        .items_in_place(place.id)
        .unwrap()
        .iter()
        .map(|item| item.id)
        .collect::<Vec<_>>();
    assert_eq!(reloaded_ids, ids);
}

#[test]
fn relocate_across_places_keeps_membership_exclusive() {
    let conn = setup();
    let mut inventory = load(&conn);
    let a = inventory.create_place("柜子1", "images/1.jpg").unwrap();
    let b = inventory.create_place("柜子2", "images/2.jpg").unwrap();
    let lighter = inventory.create_item(a.id, "打火机", "", 100, 300).unwrap();
    let bag = inventory.create_item(b.id, "书包", "", 200, 200).unwrap();

    inventory.relocate_item(lighter.id, b.id, 10, 20).unwrap();

    let in_a = inventory.items_in_place(a.id).unwrap();
    let in_b = inventory.items_in_place(b.id).unwrap();
    assert!(in_a.iter().all(|item| item.id != lighter.id));
    assert_eq!(
        in_b.iter().filter(|item| item.id == lighter.id).count(),
        1
    );
    assert_eq!(
        in_b.iter().map(|item| item.id).collect::<Vec<_>>(),
        vec![bag.id, lighter.id]
    );

    let item = inventory.item(lighter.id).unwrap();
    assert_eq!(item.place_id, b.id);
    assert_eq!((item.position.x(), item.position.y()), (10, 20));

    let reloaded = load(&conn);
    assert_eq!(
        reloaded
            .items_in_place(b.id)
            .unwrap()
            .iter()
            .map(|item| item.id)
            .collect::<Vec<_>>(),
        vec![bag.id, lighter.id]
    );
    assert_eq!(
        reloaded
            .all_items()
            .iter()
            .map(|item| item.id)
            .collect::<Vec<_>>(),
        vec![lighter.id, bag.id]
    );
}

#[test]
fn relocate_validates_before_touching_anything() {
    let conn = setup();
    let mut inventory = load(&conn);
    let a = inventory.create_place("柜子1", "images/1.jpg").unwrap();
    let item = inventory.create_item(a.id, "港币", "", 200, 300).unwrap();

    let err = inventory
        .relocate_item(item.id, a.id, CANVAS_WIDTH, 1)
        .unwrap_err();
    assert!(matches!(err, InventoryError::Validation(_)));

    let missing_place = Uuid::new_v4();
    let err = inventory
        .relocate_item(item.id, missing_place, 1, 1)
        .unwrap_err();
    assert!(matches!(err, InventoryError::PlaceNotFound(id) if id == missing_place));

    let missing_item = Uuid::new_v4();
    let err = inventory
        .relocate_item(missing_item, a.id, 1, 1)
        .unwrap_err();
    assert!(matches!(err, InventoryError::ItemNotFound(id) if id == missing_item));

    assert_eq!(inventory.item(item.id).unwrap(), &item);
    assert_eq!(load(&conn).item(item.id).unwrap(), &item);
}

#[test]
fn delete_item_twice_fails_with_not_found_and_keeps_count() {
    let conn = setup();
    let mut inventory = load(&conn);
    let place = inventory.create_place("柜子1", "images/1.jpg").unwrap();
    let phone = inventory.create_item(place.id, "手机", "", 100, 100).unwrap();
    inventory.create_item(place.id, "毛巾", "", 100, 200).unwrap();

    inventory.delete_item(phone.id).unwrap();
    let count_after_first = inventory.item_count(place.id).unwrap();
    assert_eq!(count_after_first, 1);

    let err = inventory.delete_item(phone.id).unwrap_err();
    assert!(matches!(err, InventoryError::ItemNotFound(id) if id == phone.id));
    assert!(err.is_not_found());
    assert_eq!(inventory.item_count(place.id).unwrap(), count_after_first);
    assert_eq!(load(&conn).item_count(place.id).unwrap(), count_after_first);
}

#[test]
fn delete_place_cascades_to_owned_items() {
    let conn = setup();
    let mut inventory = load(&conn);
    let doomed = inventory.create_place("柜子1", "images/1.jpg").unwrap();
    let kept = inventory.create_place("柜子2", "images/2.jpg").unwrap();
    let gone = inventory.create_item(doomed.id, "手机", "", 1, 1).unwrap();
    let stays = inventory.create_item(kept.id, "钱包", "", 2, 2).unwrap();

    inventory.delete_place(doomed.id).unwrap();

    assert!(inventory.place(doomed.id).is_none());
    assert!(inventory.item(gone.id).is_none());
    assert!(matches!(
        inventory.item_count(doomed.id).unwrap_err(),
        InventoryError::PlaceNotFound(_)
    ));
    assert_eq!(inventory.all_items(), vec![&stays]);

    let reloaded = load(&conn);
    assert_eq!(reloaded.places().len(), 1);
    assert_eq!(reloaded.all_items().len(), 1);

    let err = inventory.delete_place(doomed.id).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn rename_place_keeps_image_and_items() {
    let conn = setup();
    let mut inventory = load(&conn);
    let place = inventory.create_place("柜子1", "images/1.jpg").unwrap();
    inventory.create_item(place.id, "手机", "", 1, 1).unwrap();

    let renamed = inventory.rename_place(place.id, "卧室衣柜").unwrap();
    assert_eq!(renamed.name, "卧室衣柜");
    assert_eq!(renamed.image, "images/1.jpg");
    assert_eq!(inventory.item_count(place.id).unwrap(), 1);
    assert_eq!(load(&conn).place(place.id).unwrap().name, "卧室衣柜");

    assert!(inventory.rename_place(place.id, "").is_err());
}

#[test]
fn overlay_markers_are_keyed_by_place_and_item() {
    let conn = setup();
    let mut inventory = load(&conn);
    let a = inventory.create_place("柜子1", "images/1.jpg").unwrap();
    let b = inventory.create_place("柜子2", "images/2.jpg").unwrap();
    let item = inventory.create_item(a.id, "手机", "", 100, 100).unwrap();

    let before = inventory.overlay(a.id).unwrap();
    assert_eq!(before.len(), 1);
    assert_eq!(
        before[0].key,
        MarkerKey {
            place_id: a.id,
            item_id: item.id
        }
    );
    assert_eq!(before[0].label, "手机");

    inventory.relocate_item(item.id, b.id, 50, 60).unwrap();

    assert!(inventory.overlay(a.id).unwrap().is_empty());
    let after = inventory.overlay(b.id).unwrap();
    assert_eq!(after.len(), 1);
    assert_ne!(after[0].key, before[0].key);
    assert_eq!(after[0].position, Position::new(50, 60).unwrap());
}

#[test]
fn place_summaries_follow_creation_order_with_counts() {
    let conn = setup();
    let mut inventory = load(&conn);
    let a = inventory.create_place("柜子1", "images/1.jpg").unwrap();
    let b = inventory.create_place("柜子2", "images/2.jpg").unwrap();
    inventory.create_item(b.id, "手机", "", 1, 1).unwrap();
    inventory.create_item(b.id, "钱包", "", 2, 2).unwrap();

    let summaries = inventory.place_summaries();
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].place.id, a.id);
    assert_eq!(summaries[0].item_count, 0);
    assert_eq!(summaries[1].place.id, b.id);
    assert_eq!(summaries[1].item_count, 2);
}
