#![forbid(unsafe_code)]

use super::super::StoreError;
use super::{KindSql, kind_sql};
use cb_core::model::EntityKind;
use rusqlite::{Transaction, params};

/// Opens a gap: every live sibling at or past `from_ordinal` moves up one.
pub(in crate::store) fn shift_for_insert_tx(
    tx: &Transaction<'_>,
    kind: EntityKind,
    parent_id: i64,
    from_ordinal: i64,
) -> Result<(), StoreError> {
    let KindSql {
        table,
        parent_column,
        ..
    } = kind_sql(kind);
    let sql = format!(
        "UPDATE {table} SET ordinal = ordinal + 1 \
         WHERE {parent_column}=?1 AND deleted_at_ms IS NULL AND ordinal >= ?2"
    );
    tx.execute(&sql, params![parent_id, from_ordinal])?;
    Ok(())
}

/// Closes the gap a departed row leaves behind.
pub(in crate::store) fn shift_for_delete_tx(
    tx: &Transaction<'_>,
    kind: EntityKind,
    parent_id: i64,
    removed_ordinal: i64,
) -> Result<(), StoreError> {
    let KindSql {
        table,
        parent_column,
        ..
    } = kind_sql(kind);
    let sql = format!(
        "UPDATE {table} SET ordinal = ordinal - 1 \
         WHERE {parent_column}=?1 AND deleted_at_ms IS NULL AND ordinal > ?2"
    );
    tx.execute(&sql, params![parent_id, removed_ordinal])?;
    Ok(())
}

/// Relocates a row within one parent. The shift and the target assignment
/// run as a single ranged statement, so every row is rewritten against the
/// ordinals as they stood before the statement; there is no intermediate
/// state for a concurrent reader to observe.
pub(in crate::store) fn move_same_parent_tx(
    tx: &Transaction<'_>,
    kind: EntityKind,
    parent_id: i64,
    current_ordinal: i64,
    new_ordinal: i64,
) -> Result<(), StoreError> {
    let KindSql {
        table,
        parent_column,
        ..
    } = kind_sql(kind);
    let sql = format!(
        "UPDATE {table} SET ordinal = CASE \
             WHEN ordinal = ?2 THEN ?3 \
             WHEN ?2 < ?3 THEN ordinal - 1 \
             ELSE ordinal + 1 \
         END \
         WHERE {parent_column}=?1 AND deleted_at_ms IS NULL \
           AND ordinal BETWEEN MIN(?2, ?3) AND MAX(?2, ?3)"
    );
    tx.execute(&sql, params![parent_id, current_ordinal, new_ordinal])?;
    Ok(())
}

/// Moves a row into another parent: close the source gap, open the
/// destination gap, then repoint the row by its internal id. The caller
/// resolves the id before any shift runs, since (parent, ordinal) stops
/// identifying the row once the source gap closes.
pub(in crate::store) fn move_cross_parent_tx(
    tx: &Transaction<'_>,
    kind: EntityKind,
    entity_id: i64,
    source_parent_id: i64,
    current_ordinal: i64,
    dest_parent_id: i64,
    new_ordinal: i64,
) -> Result<(), StoreError> {
    shift_for_delete_tx(tx, kind, source_parent_id, current_ordinal)?;
    shift_for_insert_tx(tx, kind, dest_parent_id, new_ordinal)?;

    let KindSql {
        table,
        parent_column,
        ..
    } = kind_sql(kind);
    let sql = format!("UPDATE {table} SET {parent_column}=?2, ordinal=?3 WHERE id=?1");
    tx.execute(&sql, params![entity_id, dest_parent_id, new_ordinal])?;
    Ok(())
}
