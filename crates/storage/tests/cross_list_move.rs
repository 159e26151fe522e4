#![forbid(unsafe_code)]

use cb_core::model::Placement;
use cb_storage::{
    CardCreateRequest, CardMoveRequest, ListCreateRequest, SqliteStore, StoreError,
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

fn two_lists(store: &mut SqliteStore) -> (String, String) {
    let board = store.board_create("Board").expect("create board");
    let mut make = |title: &str| {
        store
            .list_create(ListCreateRequest {
                board_public_id: board.public_id.clone(),
                title: title.to_string(),
                placement: Placement::End,
            })
            .expect("create list")
            .public_id
    };
    let source = make("Source");
    let dest = make("Dest");
    (source, dest)
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
fn cross_list_move_closes_source_gap_and_opens_dest_gap() {
    let storage_dir = temp_dir("cross_list_move_closes_source_gap_and_opens_dest_gap");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    let (source, dest) = two_lists(&mut store);

    add_card(&mut store, &source, "A");
    let b = add_card(&mut store, &source, "B");
    add_card(&mut store, &source, "C");
    add_card(&mut store, &dest, "D");

    let moved = store
        .card_move(CardMoveRequest {
            public_id: b.clone(),
            list_public_id: Some(dest.clone()),
            new_ordinal: 0,
        })
        .expect("move B across lists");
    assert_eq!(moved.public_id, b);
    assert_eq!(moved.list_public_id, dest);
    assert_eq!(moved.ordinal, 0);

    assert_eq!(
        snapshot(&mut store, &source),
        [("A".to_string(), 0), ("C".to_string(), 1)]
    );
    assert_eq!(
        snapshot(&mut store, &dest),
        [("B".to_string(), 0), ("D".to_string(), 1)]
    );
}

#[test]
fn cross_list_move_may_append_one_past_the_dest_tail() {
    let storage_dir = temp_dir("cross_list_move_may_append_one_past_the_dest_tail");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    let (source, dest) = two_lists(&mut store);

    let a = add_card(&mut store, &source, "A");
    add_card(&mut store, &dest, "X");
    add_card(&mut store, &dest, "Y");

    let moved = store
        .card_move(CardMoveRequest {
            public_id: a,
            list_public_id: Some(dest.clone()),
            new_ordinal: 2,
        })
        .expect("append into dest");
    assert_eq!(moved.ordinal, 2);

    assert!(snapshot(&mut store, &source).is_empty());
    assert_eq!(
        snapshot(&mut store, &dest),
        [
            ("X".to_string(), 0),
            ("Y".to_string(), 1),
            ("A".to_string(), 2)
        ]
    );
}

#[test]
fn cross_list_move_beyond_append_is_rejected() {
    let storage_dir = temp_dir("cross_list_move_beyond_append_is_rejected");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    let (source, dest) = two_lists(&mut store);

    let a = add_card(&mut store, &source, "A");
    add_card(&mut store, &dest, "X");

    let err = store
        .card_move(CardMoveRequest {
            public_id: a.clone(),
            list_public_id: Some(dest.clone()),
            new_ordinal: 2,
        })
        .expect_err("two past the dest tail");
    assert!(matches!(
        err,
        StoreError::ConflictingPlacement {
            requested: 2,
            live_count: 1
        }
    ));

    // The rejected move left both lists untouched.
    assert_eq!(snapshot(&mut store, &source), [("A".to_string(), 0)]);
    assert_eq!(snapshot(&mut store, &dest), [("X".to_string(), 0)]);
}

#[test]
fn moving_into_a_missing_list_fails_cleanly() {
    let storage_dir = temp_dir("moving_into_a_missing_list_fails_cleanly");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    let (source, _) = two_lists(&mut store);

    let a = add_card(&mut store, &source, "A");

    let err = store
        .card_move(CardMoveRequest {
            public_id: a.clone(),
            list_public_id: Some("LIST-0000FFFF".to_string()),
            new_ordinal: 0,
        })
        .expect_err("dest list does not exist");
    assert!(
        matches!(err, StoreError::ListNotFound { public_id } if public_id == "LIST-0000FFFF")
    );

    assert_eq!(snapshot(&mut store, &source), [("A".to_string(), 0)]);
}
