#![forbid(unsafe_code)]

use super::super::StoreError;
use super::{KindSql, kind_sql};
use cb_core::model::{EntityKind, Placement};
use rusqlite::{OptionalExtension, Transaction, params};

pub(in crate::store) fn max_live_ordinal_tx(
    tx: &Transaction<'_>,
    kind: EntityKind,
    parent_id: i64,
) -> Result<Option<i64>, StoreError> {
    let KindSql {
        table,
        parent_column,
        ..
    } = kind_sql(kind);
    let sql =
        format!("SELECT MAX(ordinal) FROM {table} WHERE {parent_column}=?1 AND deleted_at_ms IS NULL");
    let max_ordinal: Option<i64> = tx
        .query_row(&sql, params![parent_id], |row| row.get(0))
        .optional()?
        .flatten();
    Ok(max_ordinal)
}

pub(in crate::store) fn live_count_tx(
    tx: &Transaction<'_>,
    kind: EntityKind,
    parent_id: i64,
) -> Result<i64, StoreError> {
    let KindSql {
        table,
        parent_column,
        ..
    } = kind_sql(kind);
    let sql =
        format!("SELECT COUNT(*) FROM {table} WHERE {parent_column}=?1 AND deleted_at_ms IS NULL");
    let count = tx.query_row(&sql, params![parent_id], |row| row.get(0))?;
    Ok(count)
}

/// Derives the ordinal a new row should occupy. Appends re-read
/// `MAX(ordinal)` instead of trusting any cached tail position; explicit
/// placements are returned literally and bounds-checked by the caller.
pub(in crate::store) fn assign_ordinal_on_create_tx(
    tx: &Transaction<'_>,
    kind: EntityKind,
    parent_id: i64,
    placement: Placement,
) -> Result<i64, StoreError> {
    match placement {
        Placement::Start => Ok(0),
        Placement::At(ordinal) => Ok(ordinal),
        Placement::End => {
            let max_ordinal = max_live_ordinal_tx(tx, kind, parent_id)?;
            Ok(max_ordinal.unwrap_or(-1) + 1)
        }
    }
}
