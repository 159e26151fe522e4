#![forbid(unsafe_code)]

use cb_core::ids::validate_public_id;
use cb_core::model::Placement;
use cb_storage::{ListCreateRequest, SqliteStore, StoreError};
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

#[test]
fn board_create_mints_a_wellformed_public_id() {
    let storage_dir = temp_dir("board_create_mints_a_wellformed_public_id");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");

    let board = store.board_create("  Roadmap  ").expect("create board");
    validate_public_id(&board.public_id).expect("minted id validates");
    assert!(board.public_id.starts_with("BOARD-"));
    assert_eq!(board.title, "Roadmap");
    assert!(board.deleted_at_ms.is_none());
}

#[test]
fn boards_list_in_creation_order() {
    let storage_dir = temp_dir("boards_list_in_creation_order");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");

    for title in ["First", "Second", "Third"] {
        store.board_create(title).expect("create board");
    }

    let boards = store.list_boards().expect("list boards");
    let titles: Vec<&str> = boards.iter().map(|board| board.title.as_str()).collect();
    assert_eq!(titles, ["First", "Second", "Third"]);
}

#[test]
fn board_rename_updates_title_only() {
    let storage_dir = temp_dir("board_rename_updates_title_only");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");

    let board = store.board_create("Old").expect("create board");
    let renamed = store
        .board_rename(&board.public_id, "New")
        .expect("rename board");

    assert_eq!(renamed.public_id, board.public_id);
    assert_eq!(renamed.title, "New");
    assert_eq!(renamed.created_at_ms, board.created_at_ms);

    let fetched = store.board_get(&board.public_id).expect("get board");
    assert_eq!(fetched.title, "New");
}

#[test]
fn board_delete_hides_board_and_its_lists() {
    let storage_dir = temp_dir("board_delete_hides_board_and_its_lists");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");

    let board = store.board_create("Doomed").expect("create board");
    store
        .list_create(ListCreateRequest {
            board_public_id: board.public_id.clone(),
            title: "Backlog".to_string(),
            placement: Placement::End,
        })
        .expect("create list");

    let deleted = store.board_delete(&board.public_id).expect("delete board");
    assert!(deleted.deleted_at_ms.is_some());
    assert!(store.list_boards().expect("list boards").is_empty());

    let err = store
        .board_get(&board.public_id)
        .expect_err("get of a deleted board");
    assert!(matches!(err, StoreError::BoardNotFound { .. }));

    // Board-scoped reads stop resolving once the board is gone.
    let err = store
        .lists_in_board(&board.public_id)
        .expect_err("lists of a deleted board");
    assert!(matches!(err, StoreError::BoardNotFound { public_id } if public_id == board.public_id));

    let err = store
        .board_rename(&board.public_id, "Back")
        .expect_err("rename of a deleted board");
    assert!(matches!(err, StoreError::BoardNotFound { .. }));
}

#[test]
fn malformed_public_ids_are_rejected_up_front() {
    let storage_dir = temp_dir("malformed_public_ids_are_rejected_up_front");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");

    for bad in ["", "BOARD", "board-00000001", "TASK-00000001", "BOARD-12"] {
        let err = store.board_rename(bad, "X").expect_err("malformed id");
        assert!(matches!(err, StoreError::InvalidInput(_)), "id {bad:?}");
    }
}

#[test]
fn blank_titles_are_rejected() {
    let storage_dir = temp_dir("blank_titles_are_rejected");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");

    let err = store.board_create("   ").expect_err("blank board title");
    assert!(matches!(err, StoreError::InvalidInput(_)));

    let board = store.board_create("Roadmap").expect("create board");
    let err = store
        .list_create(ListCreateRequest {
            board_public_id: board.public_id,
            title: "\t".to_string(),
            placement: Placement::End,
        })
        .expect_err("blank list title");
    assert!(matches!(err, StoreError::InvalidInput(_)));
}
