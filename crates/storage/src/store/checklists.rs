#![forbid(unsafe_code)]

use super::*;
use cb_core::ids::CHECKLIST_PREFIX;
use cb_core::model::EntityKind;
use rusqlite::{OptionalExtension, Row, Transaction, params};

impl SqliteStore {
    pub fn checklist_create(
        &mut self,
        card_public_id: &str,
        title: &str,
    ) -> Result<ChecklistRow, StoreError> {
        let card_public_id = canonical_public_id(card_public_id)?;
        let title = canonical_text(title, "checklist title must not be empty")?;

        let now_ms = now_ms();
        let tx = self.conn.transaction()?;
        let card = resolve_live_entity(&tx, EntityKind::Card, &card_public_id)?;
        let public_id = mint_public_id_tx(&tx, "checklist_seq", CHECKLIST_PREFIX)?;
        tx.execute(
            r#"
            INSERT INTO checklists(public_id, card_id, title, created_at_ms, updated_at_ms)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![public_id, card.id, title, now_ms, now_ms],
        )?;

        let row = checklist_row_tx(&tx, &public_id)?;
        tx.commit()?;
        Ok(row)
    }

    pub fn checklist_get(&self, public_id: &str) -> Result<ChecklistRow, StoreError> {
        let public_id = canonical_public_id(public_id)?;

        let row = self
            .conn
            .query_row(
                "SELECT k.public_id, c.public_id, k.title, k.deleted_at_ms, k.created_at_ms, k.updated_at_ms \
                 FROM checklists k JOIN cards c ON c.id = k.card_id \
                 WHERE k.public_id=?1 AND k.deleted_at_ms IS NULL",
                params![public_id],
                checklist_row_from_sql,
            )
            .optional()?;
        let Some(row) = row else {
            return Err(StoreError::ChecklistNotFound { public_id });
        };
        Ok(row)
    }

    pub fn checklist_rename(
        &mut self,
        public_id: &str,
        title: &str,
    ) -> Result<ChecklistRow, StoreError> {
        let public_id = canonical_public_id(public_id)?;
        let title = canonical_text(title, "checklist title must not be empty")?;

        let now_ms = now_ms();
        let tx = self.conn.transaction()?;
        let checklist_id = live_checklist_id_tx(&tx, &public_id)?;
        tx.execute(
            "UPDATE checklists SET title=?2, updated_at_ms=?3 WHERE id=?1",
            params![checklist_id, title, now_ms],
        )?;

        let row = checklist_row_tx(&tx, &public_id)?;
        tx.commit()?;
        Ok(row)
    }

    /// Soft-deletes the checklist. Its items keep their rows and ordinals
    /// but stop resolving through the checklist-scoped reads.
    pub fn checklist_delete(&mut self, public_id: &str) -> Result<ChecklistRow, StoreError> {
        let public_id = canonical_public_id(public_id)?;

        let now_ms = now_ms();
        let tx = self.conn.transaction()?;
        let checklist_id = live_checklist_id_tx(&tx, &public_id)?;
        tx.execute(
            "UPDATE checklists SET deleted_at_ms=?2, updated_at_ms=?2 WHERE id=?1",
            params![checklist_id, now_ms],
        )?;

        let row = checklist_row_tx(&tx, &public_id)?;
        tx.commit()?;
        Ok(row)
    }

    /// Live checklists of a card, in creation order.
    pub fn checklists_in_card(
        &self,
        card_public_id: &str,
    ) -> Result<Vec<ChecklistRow>, StoreError> {
        let card_public_id = canonical_public_id(card_public_id)?;

        let card = resolve_live_entity(&self.conn, EntityKind::Card, &card_public_id)?;
        let mut statement = self.conn.prepare(
            "SELECT k.public_id, c.public_id, k.title, k.deleted_at_ms, k.created_at_ms, k.updated_at_ms \
             FROM checklists k JOIN cards c ON c.id = k.card_id \
             WHERE k.card_id=?1 AND k.deleted_at_ms IS NULL \
             ORDER BY k.id ASC",
        )?;
        let rows = statement
            .query_map(params![card.id], checklist_row_from_sql)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

fn checklist_row_from_sql(row: &Row<'_>) -> rusqlite::Result<ChecklistRow> {
    Ok(ChecklistRow {
        public_id: row.get(0)?,
        card_public_id: row.get(1)?,
        title: row.get(2)?,
        deleted_at_ms: row.get(3)?,
        created_at_ms: row.get(4)?,
        updated_at_ms: row.get(5)?,
    })
}

fn live_checklist_id_tx(tx: &Transaction<'_>, public_id: &str) -> Result<i64, StoreError> {
    let id: Option<i64> = tx
        .query_row(
            "SELECT id FROM checklists WHERE public_id=?1 AND deleted_at_ms IS NULL",
            params![public_id],
            |row| row.get(0),
        )
        .optional()?;
    let Some(id) = id else {
        return Err(StoreError::ChecklistNotFound {
            public_id: public_id.to_string(),
        });
    };
    Ok(id)
}

fn checklist_row_tx(tx: &Transaction<'_>, public_id: &str) -> Result<ChecklistRow, StoreError> {
    let row = tx
        .query_row(
            "SELECT k.public_id, c.public_id, k.title, k.deleted_at_ms, k.created_at_ms, k.updated_at_ms \
             FROM checklists k JOIN cards c ON c.id = k.card_id \
             WHERE k.public_id=?1",
            params![public_id],
            checklist_row_from_sql,
        )
        .optional()?;
    let Some(row) = row else {
        return Err(StoreError::ChecklistNotFound {
            public_id: public_id.to_string(),
        });
    };
    Ok(row)
}
