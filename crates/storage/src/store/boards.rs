#![forbid(unsafe_code)]

use super::*;
use cb_core::ids::BOARD_PREFIX;
use rusqlite::{OptionalExtension, Row, Transaction, params};

impl SqliteStore {
    pub fn board_create(&mut self, title: &str) -> Result<BoardRow, StoreError> {
        let title = canonical_text(title, "board title must not be empty")?;

        let now_ms = now_ms();
        let tx = self.conn.transaction()?;
        let public_id = mint_public_id_tx(&tx, "board_seq", BOARD_PREFIX)?;
        tx.execute(
            r#"
            INSERT INTO boards(public_id, title, created_at_ms, updated_at_ms)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![public_id, title, now_ms, now_ms],
        )?;

        let row = board_row_tx(&tx, &public_id)?;
        tx.commit()?;
        Ok(row)
    }

    pub fn board_get(&self, public_id: &str) -> Result<BoardRow, StoreError> {
        let public_id = canonical_public_id(public_id)?;

        let row = self
            .conn
            .query_row(
                "SELECT public_id, title, deleted_at_ms, created_at_ms, updated_at_ms \
                 FROM boards WHERE public_id=?1 AND deleted_at_ms IS NULL",
                params![public_id],
                board_row_from_sql,
            )
            .optional()?;
        let Some(row) = row else {
            return Err(StoreError::BoardNotFound { public_id });
        };
        Ok(row)
    }

    pub fn board_rename(&mut self, public_id: &str, title: &str) -> Result<BoardRow, StoreError> {
        let public_id = canonical_public_id(public_id)?;
        let title = canonical_text(title, "board title must not be empty")?;

        let now_ms = now_ms();
        let tx = self.conn.transaction()?;
        let board_id = live_board_id_tx(&tx, &public_id)?;
        tx.execute(
            "UPDATE boards SET title=?2, updated_at_ms=?3 WHERE id=?1",
            params![board_id, title, now_ms],
        )?;

        let row = board_row_tx(&tx, &public_id)?;
        tx.commit()?;
        Ok(row)
    }

    /// Soft-deletes the board. Its lists keep their rows and ordinals but
    /// stop resolving through the board-scoped reads.
    pub fn board_delete(&mut self, public_id: &str) -> Result<BoardRow, StoreError> {
        let public_id = canonical_public_id(public_id)?;

        let now_ms = now_ms();
        let tx = self.conn.transaction()?;
        let board_id = live_board_id_tx(&tx, &public_id)?;
        tx.execute(
            "UPDATE boards SET deleted_at_ms=?2, updated_at_ms=?2 WHERE id=?1",
            params![board_id, now_ms],
        )?;

        let row = board_row_tx(&tx, &public_id)?;
        tx.commit()?;
        Ok(row)
    }

    pub fn list_boards(&self) -> Result<Vec<BoardRow>, StoreError> {
        let mut statement = self.conn.prepare(
            "SELECT public_id, title, deleted_at_ms, created_at_ms, updated_at_ms \
             FROM boards WHERE deleted_at_ms IS NULL ORDER BY id ASC",
        )?;
        let rows = statement
            .query_map([], board_row_from_sql)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

fn board_row_from_sql(row: &Row<'_>) -> rusqlite::Result<BoardRow> {
    Ok(BoardRow {
        public_id: row.get(0)?,
        title: row.get(1)?,
        deleted_at_ms: row.get(2)?,
        created_at_ms: row.get(3)?,
        updated_at_ms: row.get(4)?,
    })
}

fn live_board_id_tx(tx: &Transaction<'_>, public_id: &str) -> Result<i64, StoreError> {
    let id: Option<i64> = tx
        .query_row(
            "SELECT id FROM boards WHERE public_id=?1 AND deleted_at_ms IS NULL",
            params![public_id],
            |row| row.get(0),
        )
        .optional()?;
    let Some(id) = id else {
        return Err(StoreError::BoardNotFound {
            public_id: public_id.to_string(),
        });
    };
    Ok(id)
}

fn board_row_tx(tx: &Transaction<'_>, public_id: &str) -> Result<BoardRow, StoreError> {
    let row = tx
        .query_row(
            "SELECT public_id, title, deleted_at_ms, created_at_ms, updated_at_ms \
             FROM boards WHERE public_id=?1",
            params![public_id],
            board_row_from_sql,
        )
        .optional()?;
    let Some(row) = row else {
        return Err(StoreError::BoardNotFound {
            public_id: public_id.to_string(),
        });
    };
    Ok(row)
}
