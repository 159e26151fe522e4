#![forbid(unsafe_code)]

mod boards;
mod cards;
mod checklist_items;
mod checklists;
mod error;
mod lists;
mod ordering;
mod support;
mod types;

pub use error::StoreError;
pub use ordering::RepairReport;
pub use types::*;

pub(in crate::store) use ordering::{
    ensure_ordering_clean_tx, move_to_tx, prepare_insert_tx, require_live_parent,
    resolve_live_entity, resolve_live_parent, soft_delete_tx,
};
pub(in crate::store) use support::{mint_public_id_tx, now_ms};

use cb_core::ids::validate_public_id;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DB_FILE_NAME: &str = "corkboard.db";

#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
    storage_dir: PathBuf,
}

impl SqliteStore {
    pub fn open(storage_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let storage_dir = storage_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&storage_dir)?;

        let db_path = storage_dir.join(DB_FILE_NAME);
        let conn = Connection::open(db_path)?;
        conn.busy_timeout(Duration::from_secs(5))?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        support::migrate_sqlite_schema(&conn)?;

        Ok(Self { conn, storage_dir })
    }

    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }
}

pub(in crate::store) fn canonical_public_id(value: &str) -> Result<String, StoreError> {
    let value = value.trim();
    if validate_public_id(value).is_err() {
        return Err(StoreError::InvalidInput("malformed public id"));
    }
    Ok(value.to_string())
}

pub(in crate::store) fn canonical_text(
    value: &str,
    empty_message: &'static str,
) -> Result<String, StoreError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(StoreError::InvalidInput(empty_message));
    }
    Ok(value.to_string())
}
