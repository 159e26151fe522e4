#![forbid(unsafe_code)]

use super::*;
use cb_core::ids::LIST_PREFIX;
use cb_core::model::EntityKind;
use rusqlite::{OptionalExtension, Row, Transaction, params};
use std::collections::BTreeSet;

impl SqliteStore {
    pub fn list_create(&mut self, request: ListCreateRequest) -> Result<ListRow, StoreError> {
        let ListCreateRequest {
            board_public_id,
            title,
            placement,
        } = request;
        let board_public_id = canonical_public_id(&board_public_id)?;
        let title = canonical_text(&title, "list title must not be empty")?;

        let now_ms = now_ms();
        let tx = self.conn.transaction()?;
        let board_id = resolve_live_parent(&tx, EntityKind::List, &board_public_id)?;
        let ordinal = prepare_insert_tx(&tx, EntityKind::List, board_id, placement)?;
        let public_id = mint_public_id_tx(&tx, "list_seq", LIST_PREFIX)?;
        tx.execute(
            r#"
            INSERT INTO lists(public_id, board_id, ordinal, title, created_at_ms, updated_at_ms)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![public_id, board_id, ordinal, title, now_ms, now_ms],
        )?;
        ensure_ordering_clean_tx(&tx, EntityKind::List, &BTreeSet::from([board_id]))?;

        let row = list_row_tx(&tx, &public_id)?;
        tx.commit()?;
        Ok(row)
    }

    /// Repositions a list, optionally onto another board.
    pub fn list_move(&mut self, request: ListMoveRequest) -> Result<ListRow, StoreError> {
        let ListMoveRequest {
            public_id,
            board_public_id,
            new_ordinal,
        } = request;
        let public_id = canonical_public_id(&public_id)?;

        let now_ms = now_ms();
        let tx = self.conn.transaction()?;
        let list = resolve_live_entity(&tx, EntityKind::List, &public_id)?;
        let dest_board_id = match board_public_id.as_deref() {
            Some(dest) => resolve_live_parent(&tx, EntityKind::List, &canonical_public_id(dest)?)?,
            None => require_live_parent(&tx, EntityKind::List, list.parent_id)?,
        };
        let touched = move_to_tx(&tx, EntityKind::List, &list, dest_board_id, new_ordinal, now_ms)?;
        ensure_ordering_clean_tx(&tx, EntityKind::List, &touched)?;

        let row = list_row_tx(&tx, &public_id)?;
        tx.commit()?;
        Ok(row)
    }

    pub fn list_rename(&mut self, public_id: &str, title: &str) -> Result<ListRow, StoreError> {
        let public_id = canonical_public_id(public_id)?;
        let title = canonical_text(title, "list title must not be empty")?;

        let now_ms = now_ms();
        let tx = self.conn.transaction()?;
        let list = resolve_live_entity(&tx, EntityKind::List, &public_id)?;
        tx.execute(
            "UPDATE lists SET title=?2, updated_at_ms=?3 WHERE id=?1",
            params![list.id, title, now_ms],
        )?;

        let row = list_row_tx(&tx, &public_id)?;
        tx.commit()?;
        Ok(row)
    }

    /// Soft-deletes the list and closes the ordinal gap it leaves on its
    /// board. The returned row carries the frozen ordinal.
    pub fn list_delete(&mut self, public_id: &str) -> Result<ListRow, StoreError> {
        let public_id = canonical_public_id(public_id)?;

        let now_ms = now_ms();
        let tx = self.conn.transaction()?;
        let list = resolve_live_entity(&tx, EntityKind::List, &public_id)?;
        soft_delete_tx(&tx, EntityKind::List, &list, now_ms)?;
        ensure_ordering_clean_tx(&tx, EntityKind::List, &BTreeSet::from([list.parent_id]))?;

        let row = list_row_tx(&tx, &public_id)?;
        tx.commit()?;
        Ok(row)
    }

    /// Live lists of a board, in ordinal order.
    pub fn lists_in_board(&self, board_public_id: &str) -> Result<Vec<ListRow>, StoreError> {
        let board_public_id = canonical_public_id(board_public_id)?;

        let board_id = resolve_live_parent(&self.conn, EntityKind::List, &board_public_id)?;
        let mut statement = self.conn.prepare(
            "SELECT l.public_id, b.public_id, l.title, l.ordinal, l.deleted_at_ms, l.created_at_ms, l.updated_at_ms \
             FROM lists l JOIN boards b ON b.id = l.board_id \
             WHERE l.board_id=?1 AND l.deleted_at_ms IS NULL \
             ORDER BY l.ordinal ASC",
        )?;
        let rows = statement
            .query_map(params![board_id], list_row_from_sql)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

fn list_row_from_sql(row: &Row<'_>) -> rusqlite::Result<ListRow> {
    Ok(ListRow {
        public_id: row.get(0)?,
        board_public_id: row.get(1)?,
        title: row.get(2)?,
        ordinal: row.get(3)?,
        deleted_at_ms: row.get(4)?,
        created_at_ms: row.get(5)?,
        updated_at_ms: row.get(6)?,
    })
}

fn list_row_tx(tx: &Transaction<'_>, public_id: &str) -> Result<ListRow, StoreError> {
    let row = tx
        .query_row(
            "SELECT l.public_id, b.public_id, l.title, l.ordinal, l.deleted_at_ms, l.created_at_ms, l.updated_at_ms \
             FROM lists l JOIN boards b ON b.id = l.board_id \
             WHERE l.public_id=?1",
            params![public_id],
            list_row_from_sql,
        )
        .optional()?;
    let Some(row) = row else {
        return Err(StoreError::ListNotFound {
            public_id: public_id.to_string(),
        });
    };
    Ok(row)
}
