#![forbid(unsafe_code)]

use super::*;
use cb_core::ids::CARD_PREFIX;
use cb_core::model::EntityKind;
use rusqlite::{OptionalExtension, Row, Transaction, params};
use std::collections::BTreeSet;

impl SqliteStore {
    pub fn card_create(&mut self, request: CardCreateRequest) -> Result<CardRow, StoreError> {
        let CardCreateRequest {
            list_public_id,
            title,
            description,
            placement,
        } = request;
        let list_public_id = canonical_public_id(&list_public_id)?;
        let title = canonical_text(&title, "card title must not be empty")?;

        let now_ms = now_ms();
        let tx = self.conn.transaction()?;
        let list_id = resolve_live_parent(&tx, EntityKind::Card, &list_public_id)?;
        let ordinal = prepare_insert_tx(&tx, EntityKind::Card, list_id, placement)?;
        let public_id = mint_public_id_tx(&tx, "card_seq", CARD_PREFIX)?;
        tx.execute(
            r#"
            INSERT INTO cards(public_id, list_id, ordinal, title, description, created_at_ms, updated_at_ms)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![public_id, list_id, ordinal, title, description, now_ms, now_ms],
        )?;
        ensure_ordering_clean_tx(&tx, EntityKind::Card, &BTreeSet::from([list_id]))?;

        let row = card_row_tx(&tx, &public_id)?;
        tx.commit()?;
        Ok(row)
    }

    /// Repositions a card, optionally into another list. Same-list moves
    /// run as one ranged statement; cross-list moves close the source gap
    /// and open the destination gap inside the same transaction.
    pub fn card_move(&mut self, request: CardMoveRequest) -> Result<CardRow, StoreError> {
        let CardMoveRequest {
            public_id,
            list_public_id,
            new_ordinal,
        } = request;
        let public_id = canonical_public_id(&public_id)?;

        let now_ms = now_ms();
        let tx = self.conn.transaction()?;
        let card = resolve_live_entity(&tx, EntityKind::Card, &public_id)?;
        let dest_list_id = match list_public_id.as_deref() {
            Some(dest) => resolve_live_parent(&tx, EntityKind::Card, &canonical_public_id(dest)?)?,
            None => require_live_parent(&tx, EntityKind::Card, card.parent_id)?,
        };
        let touched = move_to_tx(&tx, EntityKind::Card, &card, dest_list_id, new_ordinal, now_ms)?;
        ensure_ordering_clean_tx(&tx, EntityKind::Card, &touched)?;

        let row = card_row_tx(&tx, &public_id)?;
        tx.commit()?;
        Ok(row)
    }

    pub fn card_edit(&mut self, request: CardEditRequest) -> Result<CardRow, StoreError> {
        let CardEditRequest {
            public_id,
            title,
            description,
        } = request;
        let public_id = canonical_public_id(&public_id)?;
        if title.is_none() && description.is_none() {
            return Err(StoreError::InvalidInput("no fields to edit"));
        }

        let now_ms = now_ms();
        let tx = self.conn.transaction()?;
        let card = resolve_live_entity(&tx, EntityKind::Card, &public_id)?;
        if let Some(title) = title {
            let title = canonical_text(&title, "card title must not be empty")?;
            tx.execute(
                "UPDATE cards SET title=?2, updated_at_ms=?3 WHERE id=?1",
                params![card.id, title, now_ms],
            )?;
        }
        if let Some(description) = description {
            tx.execute(
                "UPDATE cards SET description=?2, updated_at_ms=?3 WHERE id=?1",
                params![card.id, description, now_ms],
            )?;
        }

        let row = card_row_tx(&tx, &public_id)?;
        tx.commit()?;
        Ok(row)
    }

    /// Soft-deletes the card and closes the ordinal gap in its list. The
    /// returned row carries the frozen ordinal.
    pub fn card_delete(&mut self, public_id: &str) -> Result<CardRow, StoreError> {
        let public_id = canonical_public_id(public_id)?;

        let now_ms = now_ms();
        let tx = self.conn.transaction()?;
        let card = resolve_live_entity(&tx, EntityKind::Card, &public_id)?;
        soft_delete_tx(&tx, EntityKind::Card, &card, now_ms)?;
        ensure_ordering_clean_tx(&tx, EntityKind::Card, &BTreeSet::from([card.parent_id]))?;

        let row = card_row_tx(&tx, &public_id)?;
        tx.commit()?;
        Ok(row)
    }

    /// Live cards of a list, in ordinal order.
    pub fn cards_in_list(&self, list_public_id: &str) -> Result<Vec<CardRow>, StoreError> {
        let list_public_id = canonical_public_id(list_public_id)?;

        let list_id = resolve_live_parent(&self.conn, EntityKind::Card, &list_public_id)?;
        let mut statement = self.conn.prepare(
            "SELECT c.public_id, l.public_id, c.title, c.description, c.ordinal, c.deleted_at_ms, c.created_at_ms, c.updated_at_ms \
             FROM cards c JOIN lists l ON l.id = c.list_id \
             WHERE c.list_id=?1 AND c.deleted_at_ms IS NULL \
             ORDER BY c.ordinal ASC",
        )?;
        let rows = statement
            .query_map(params![list_id], card_row_from_sql)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

fn card_row_from_sql(row: &Row<'_>) -> rusqlite::Result<CardRow> {
    Ok(CardRow {
        public_id: row.get(0)?,
        list_public_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        ordinal: row.get(4)?,
        deleted_at_ms: row.get(5)?,
        created_at_ms: row.get(6)?,
        updated_at_ms: row.get(7)?,
    })
}

fn card_row_tx(tx: &Transaction<'_>, public_id: &str) -> Result<CardRow, StoreError> {
    let row = tx
        .query_row(
            "SELECT c.public_id, l.public_id, c.title, c.description, c.ordinal, c.deleted_at_ms, c.created_at_ms, c.updated_at_ms \
             FROM cards c JOIN lists l ON l.id = c.list_id \
             WHERE c.public_id=?1",
            params![public_id],
            card_row_from_sql,
        )
        .optional()?;
    let Some(row) = row else {
        return Err(StoreError::CardNotFound {
            public_id: public_id.to_string(),
        });
    };
    Ok(row)
}
