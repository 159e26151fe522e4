#![forbid(unsafe_code)]

use super::*;
use cb_core::ids::CHECKLIST_ITEM_PREFIX;
use cb_core::model::EntityKind;
use rusqlite::{OptionalExtension, Row, Transaction, params};
use std::collections::BTreeSet;

impl SqliteStore {
    pub fn checklist_item_create(
        &mut self,
        request: ChecklistItemCreateRequest,
    ) -> Result<ChecklistItemRow, StoreError> {
        let ChecklistItemCreateRequest {
            checklist_public_id,
            text,
            placement,
        } = request;
        let checklist_public_id = canonical_public_id(&checklist_public_id)?;
        let text = canonical_text(&text, "item text must not be empty")?;

        let now_ms = now_ms();
        let tx = self.conn.transaction()?;
        let checklist_id = resolve_live_parent(&tx, EntityKind::ChecklistItem, &checklist_public_id)?;
        let ordinal = prepare_insert_tx(&tx, EntityKind::ChecklistItem, checklist_id, placement)?;
        let public_id = mint_public_id_tx(&tx, "item_seq", CHECKLIST_ITEM_PREFIX)?;
        // New items start unchecked; the done column defaults to 0.
        tx.execute(
            r#"
            INSERT INTO checklist_items(public_id, checklist_id, ordinal, text, created_at_ms, updated_at_ms)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![public_id, checklist_id, ordinal, text, now_ms, now_ms],
        )?;
        ensure_ordering_clean_tx(&tx, EntityKind::ChecklistItem, &BTreeSet::from([checklist_id]))?;

        let row = checklist_item_row_tx(&tx, &public_id)?;
        tx.commit()?;
        Ok(row)
    }

    /// Repositions an item, optionally into another checklist. Same-checklist
    /// moves run as one ranged statement; cross-checklist moves close the
    /// source gap and open the destination gap inside the same transaction.
    pub fn checklist_item_move(
        &mut self,
        request: ChecklistItemMoveRequest,
    ) -> Result<ChecklistItemRow, StoreError> {
        let ChecklistItemMoveRequest {
            public_id,
            checklist_public_id,
            new_ordinal,
        } = request;
        let public_id = canonical_public_id(&public_id)?;

        let now_ms = now_ms();
        let tx = self.conn.transaction()?;
        let item = resolve_live_entity(&tx, EntityKind::ChecklistItem, &public_id)?;
        let dest_checklist_id = match checklist_public_id.as_deref() {
            Some(dest) => {
                resolve_live_parent(&tx, EntityKind::ChecklistItem, &canonical_public_id(dest)?)?
            }
            None => require_live_parent(&tx, EntityKind::ChecklistItem, item.parent_id)?,
        };
        let touched = move_to_tx(
            &tx,
            EntityKind::ChecklistItem,
            &item,
            dest_checklist_id,
            new_ordinal,
            now_ms,
        )?;
        ensure_ordering_clean_tx(&tx, EntityKind::ChecklistItem, &touched)?;

        let row = checklist_item_row_tx(&tx, &public_id)?;
        tx.commit()?;
        Ok(row)
    }

    pub fn checklist_item_edit(
        &mut self,
        request: ChecklistItemEditRequest,
    ) -> Result<ChecklistItemRow, StoreError> {
        let ChecklistItemEditRequest {
            public_id,
            text,
            done,
        } = request;
        let public_id = canonical_public_id(&public_id)?;
        if text.is_none() && done.is_none() {
            return Err(StoreError::InvalidInput("no fields to edit"));
        }

        let now_ms = now_ms();
        let tx = self.conn.transaction()?;
        let item = resolve_live_entity(&tx, EntityKind::ChecklistItem, &public_id)?;
        if let Some(text) = text {
            let text = canonical_text(&text, "item text must not be empty")?;
            tx.execute(
                "UPDATE checklist_items SET text=?2, updated_at_ms=?3 WHERE id=?1",
                params![item.id, text, now_ms],
            )?;
        }
        if let Some(done) = done {
            tx.execute(
                "UPDATE checklist_items SET done=?2, updated_at_ms=?3 WHERE id=?1",
                params![item.id, done, now_ms],
            )?;
        }

        let row = checklist_item_row_tx(&tx, &public_id)?;
        tx.commit()?;
        Ok(row)
    }

    /// Soft-deletes the item and closes the ordinal gap in its checklist.
    /// The returned row carries the frozen ordinal.
    pub fn checklist_item_delete(
        &mut self,
        public_id: &str,
    ) -> Result<ChecklistItemRow, StoreError> {
        let public_id = canonical_public_id(public_id)?;

        let now_ms = now_ms();
        let tx = self.conn.transaction()?;
        let item = resolve_live_entity(&tx, EntityKind::ChecklistItem, &public_id)?;
        soft_delete_tx(&tx, EntityKind::ChecklistItem, &item, now_ms)?;
        ensure_ordering_clean_tx(&tx, EntityKind::ChecklistItem, &BTreeSet::from([item.parent_id]))?;

        let row = checklist_item_row_tx(&tx, &public_id)?;
        tx.commit()?;
        Ok(row)
    }

    /// Live items of a checklist, in ordinal order.
    pub fn items_in_checklist(
        &self,
        checklist_public_id: &str,
    ) -> Result<Vec<ChecklistItemRow>, StoreError> {
        let checklist_public_id = canonical_public_id(checklist_public_id)?;

        let checklist_id =
            resolve_live_parent(&self.conn, EntityKind::ChecklistItem, &checklist_public_id)?;
        let mut statement = self.conn.prepare(
            "SELECT i.public_id, k.public_id, i.text, i.done, i.ordinal, i.deleted_at_ms, i.created_at_ms, i.updated_at_ms \
             FROM checklist_items i JOIN checklists k ON k.id = i.checklist_id \
             WHERE i.checklist_id=?1 AND i.deleted_at_ms IS NULL \
             ORDER BY i.ordinal ASC",
        )?;
        let rows = statement
            .query_map(params![checklist_id], checklist_item_row_from_sql)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

fn checklist_item_row_from_sql(row: &Row<'_>) -> rusqlite::Result<ChecklistItemRow> {
    Ok(ChecklistItemRow {
        public_id: row.get(0)?,
        checklist_public_id: row.get(1)?,
        text: row.get(2)?,
        done: row.get(3)?,
        ordinal: row.get(4)?,
        deleted_at_ms: row.get(5)?,
        created_at_ms: row.get(6)?,
        updated_at_ms: row.get(7)?,
    })
}

fn checklist_item_row_tx(
    tx: &Transaction<'_>,
    public_id: &str,
) -> Result<ChecklistItemRow, StoreError> {
    let row = tx
        .query_row(
            "SELECT i.public_id, k.public_id, i.text, i.done, i.ordinal, i.deleted_at_ms, i.created_at_ms, i.updated_at_ms \
             FROM checklist_items i JOIN checklists k ON k.id = i.checklist_id \
             WHERE i.public_id=?1",
            params![public_id],
            checklist_item_row_from_sql,
        )
        .optional()?;
    let Some(row) = row else {
        return Err(StoreError::ChecklistItemNotFound {
            public_id: public_id.to_string(),
        });
    };
    Ok(row)
}
