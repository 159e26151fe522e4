#![forbid(unsafe_code)]

use cb_core::model::Placement;
use cb_storage::{
    CardCreateRequest, CardEditRequest, CardMoveRequest, ListCreateRequest, ListMoveRequest,
    SqliteStore, StoreError,
};
use std::path::PathBuf;

fn temp_dir(test_name: &str) -> PathBuf {
    let base = std::env::temp_dir();
    let pid = std::process::id();
    let nonce = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let dir = base.join(format!("cb_storage_{test_name}_{pid}_{nonce}"));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn board_with_list(store: &mut SqliteStore) -> String {
    let board = store.board_create("Board").expect("create board");
    store
        .list_create(ListCreateRequest {
            board_public_id: board.public_id,
            title: "List".to_string(),
            placement: Placement::End,
        })
        .expect("create list")
        .public_id
}

fn add_card(store: &mut SqliteStore, list: &str, title: &str) -> String {
    store
        .card_create(CardCreateRequest {
            list_public_id: list.to_string(),
            title: title.to_string(),
            description: None,
            placement: Placement::End,
        })
        .expect("create card")
        .public_id
}

fn snapshot(store: &mut SqliteStore, list: &str) -> Vec<(String, i64)> {
    store
        .cards_in_list(list)
        .expect("cards in list")
        .into_iter()
        .map(|card| (card.title, card.ordinal))
        .collect()
}

#[test]
fn deleting_a_card_freezes_it_and_closes_the_gap() {
    let storage_dir = temp_dir("deleting_a_card_freezes_it_and_closes_the_gap");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    let list = board_with_list(&mut store);

    add_card(&mut store, &list, "A");
    let b = add_card(&mut store, &list, "B");
    add_card(&mut store, &list, "C");
    add_card(&mut store, &list, "D");

    let deleted = store.card_delete(&b).expect("delete B");
    assert!(deleted.deleted_at_ms.is_some());
    // The frozen row keeps the ordinal it died with.
    assert_eq!(deleted.ordinal, 1);

    assert_eq!(
        snapshot(&mut store, &list),
        [
            ("A".to_string(), 0),
            ("C".to_string(), 1),
            ("D".to_string(), 2)
        ]
    );
}

#[test]
fn deleted_cards_stop_resolving_for_mutations() {
    let storage_dir = temp_dir("deleted_cards_stop_resolving_for_mutations");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    let list = board_with_list(&mut store);

    let a = add_card(&mut store, &list, "A");
    store.card_delete(&a).expect("delete A");

    let err = store
        .card_move(CardMoveRequest {
            public_id: a.clone(),
            list_public_id: None,
            new_ordinal: 0,
        })
        .expect_err("move of a deleted card");
    assert!(matches!(err, StoreError::CardNotFound { .. }));

    let err = store
        .card_edit(CardEditRequest {
            public_id: a.clone(),
            title: Some("Back".to_string()),
            description: None,
        })
        .expect_err("edit of a deleted card");
    assert!(matches!(err, StoreError::CardNotFound { .. }));

    let err = store.card_delete(&a).expect_err("double delete");
    assert!(matches!(err, StoreError::CardNotFound { .. }));
}

#[test]
fn positions_are_reused_but_ids_are_not() {
    let storage_dir = temp_dir("positions_are_reused_but_ids_are_not");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    let list = board_with_list(&mut store);

    let a = add_card(&mut store, &list, "A");
    add_card(&mut store, &list, "B");
    store.card_delete(&a).expect("delete A");

    // B slid into position 0; the next append takes position 1.
    let c = store
        .card_create(CardCreateRequest {
            list_public_id: list.clone(),
            title: "C".to_string(),
            description: None,
            placement: Placement::End,
        })
        .expect("create C");
    assert_eq!(c.ordinal, 1);
    assert_ne!(c.public_id, a);

    assert_eq!(
        snapshot(&mut store, &list),
        [("B".to_string(), 0), ("C".to_string(), 1)]
    );
}

#[test]
fn emptied_list_starts_over_at_zero() {
    let storage_dir = temp_dir("emptied_list_starts_over_at_zero");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    let list = board_with_list(&mut store);

    let a = add_card(&mut store, &list, "A");
    store.card_delete(&a).expect("delete A");
    assert!(store.cards_in_list(&list).expect("cards").is_empty());

    let b = store
        .card_create(CardCreateRequest {
            list_public_id: list.clone(),
            title: "B".to_string(),
            description: None,
            placement: Placement::End,
        })
        .expect("create B");
    assert_eq!(b.ordinal, 0);
}

#[test]
fn lists_of_a_deleted_board_cannot_be_reordered() {
    let storage_dir = temp_dir("lists_of_a_deleted_board_cannot_be_reordered");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    let board = store.board_create("Board").expect("create board");

    let mut lists = Vec::new();
    for title in ["A", "B"] {
        lists.push(
            store
                .list_create(ListCreateRequest {
                    board_public_id: board.public_id.clone(),
                    title: title.to_string(),
                    placement: Placement::End,
                })
                .expect("create list"),
        );
    }
    store.board_delete(&board.public_id).expect("delete board");

    // A stay-in-place move still resolves the surrounding board.
    let err = store
        .list_move(ListMoveRequest {
            public_id: lists[1].public_id.clone(),
            board_public_id: None,
            new_ordinal: 0,
        })
        .expect_err("reorder inside a deleted board");
    assert!(matches!(err, StoreError::BoardNotFound { .. }));
}

#[test]
fn list_delete_freezes_its_position_and_hides_its_cards() {
    let storage_dir = temp_dir("list_delete_freezes_its_position_and_hides_its_cards");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    let board = store.board_create("Board").expect("create board");

    let mut lists = Vec::new();
    for title in ["P", "Q", "R"] {
        lists.push(
            store
                .list_create(ListCreateRequest {
                    board_public_id: board.public_id.clone(),
                    title: title.to_string(),
                    placement: Placement::End,
                })
                .expect("create list"),
        );
    }
    add_card(&mut store, &lists[1].public_id, "Orphan");

    let deleted = store
        .list_delete(&lists[1].public_id)
        .expect("delete list Q");
    assert_eq!(deleted.ordinal, 1);
    assert!(deleted.deleted_at_ms.is_some());

    let survivors: Vec<(String, i64)> = store
        .lists_in_board(&board.public_id)
        .expect("lists in board")
        .into_iter()
        .map(|list| (list.title, list.ordinal))
        .collect();
    assert_eq!(survivors, [("P".to_string(), 0), ("R".to_string(), 1)]);

    // Cards of the dead list stop resolving through list-scoped reads.
    let err = store
        .cards_in_list(&lists[1].public_id)
        .expect_err("cards of a deleted list");
    assert!(matches!(err, StoreError::ListNotFound { .. }));
}
