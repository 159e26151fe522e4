#![forbid(unsafe_code)]

use super::super::StoreError;
use super::assign::{assign_ordinal_on_create_tx, live_count_tx};
use super::shift::{
    move_cross_parent_tx, move_same_parent_tx, shift_for_delete_tx, shift_for_insert_tx,
};
use super::{KindSql, kind_sql};
use cb_core::model::{EntityKind, Placement};
use rusqlite::{Connection, OptionalExtension, Transaction, params};
use std::collections::BTreeSet;

/// Internal coordinates of one live orderable row, re-read from storage at
/// operation time. Never derived from caller-supplied state.
#[derive(Clone, Copy, Debug)]
pub(in crate::store) struct OrderableRef {
    pub(in crate::store) id: i64,
    pub(in crate::store) parent_id: i64,
    pub(in crate::store) ordinal: i64,
}

pub(in crate::store) fn resolve_live_entity(
    conn: &Connection,
    kind: EntityKind,
    public_id: &str,
) -> Result<OrderableRef, StoreError> {
    let KindSql {
        table,
        parent_column,
        ..
    } = kind_sql(kind);
    let sql = format!(
        "SELECT id, {parent_column}, ordinal FROM {table} \
         WHERE public_id=?1 AND deleted_at_ms IS NULL"
    );
    let row = conn
        .query_row(&sql, params![public_id], |row| {
            Ok(OrderableRef {
                id: row.get(0)?,
                parent_id: row.get(1)?,
                ordinal: row.get(2)?,
            })
        })
        .optional()?;
    let Some(entity) = row else {
        return Err(entity_not_found(kind, public_id));
    };
    Ok(entity)
}

/// Resolves the live parent container for `kind`: the owning board, list,
/// or checklist respectively.
pub(in crate::store) fn resolve_live_parent(
    conn: &Connection,
    kind: EntityKind,
    parent_public_id: &str,
) -> Result<i64, StoreError> {
    let KindSql { parent_table, .. } = kind_sql(kind);
    let sql = format!("SELECT id FROM {parent_table} WHERE public_id=?1 AND deleted_at_ms IS NULL");
    let id: Option<i64> = conn
        .query_row(&sql, params![parent_public_id], |row| row.get(0))
        .optional()?;
    let Some(id) = id else {
        return Err(parent_not_found(kind, parent_public_id));
    };
    Ok(id)
}

/// Re-checks the container a row already sits in. Containers can be
/// soft-deleted out from under their rows, and a move that stays in place
/// must still refuse to reorder inside a dead one.
pub(in crate::store) fn require_live_parent(
    conn: &Connection,
    kind: EntityKind,
    parent_id: i64,
) -> Result<i64, StoreError> {
    let KindSql { parent_table, .. } = kind_sql(kind);
    // The foreign key guarantees the row exists; only liveness is open.
    let sql = format!("SELECT public_id, deleted_at_ms FROM {parent_table} WHERE id=?1");
    let (public_id, deleted_at_ms): (String, Option<i64>) =
        conn.query_row(&sql, params![parent_id], |row| {
            Ok((row.get(0)?, row.get(1)?))
        })?;
    if deleted_at_ms.is_some() {
        return Err(parent_not_found(kind, &public_id));
    }
    Ok(parent_id)
}

/// Derives the ordinal for a new row and opens the gap it will occupy.
/// An explicit placement past the live tail is rejected rather than
/// clamped, so a bad caller index can never seed a sparse ordering.
pub(in crate::store) fn prepare_insert_tx(
    tx: &Transaction<'_>,
    kind: EntityKind,
    parent_id: i64,
    placement: Placement,
) -> Result<i64, StoreError> {
    if let Placement::At(requested) = placement {
        if requested < 0 {
            return Err(StoreError::InvalidInput(
                "placement index must not be negative",
            ));
        }
        let live_count = live_count_tx(tx, kind, parent_id)?;
        if requested > live_count {
            return Err(StoreError::ConflictingPlacement {
                requested,
                live_count,
            });
        }
    }
    let target = assign_ordinal_on_create_tx(tx, kind, parent_id, placement)?;
    if !matches!(placement, Placement::End) {
        shift_for_insert_tx(tx, kind, parent_id, target)?;
    }
    Ok(target)
}

/// Applies a move and returns the parent scopes whose ordering changed.
pub(in crate::store) fn move_to_tx(
    tx: &Transaction<'_>,
    kind: EntityKind,
    entity: &OrderableRef,
    dest_parent_id: i64,
    new_ordinal: i64,
    now_ms: i64,
) -> Result<BTreeSet<i64>, StoreError> {
    if new_ordinal < 0 {
        return Err(StoreError::InvalidInput("target index must not be negative"));
    }
    let mut touched = BTreeSet::from([entity.parent_id]);
    if dest_parent_id == entity.parent_id {
        // Repositioning among the current siblings: the target must be an
        // existing position.
        let live_count = live_count_tx(tx, kind, entity.parent_id)?;
        if new_ordinal >= live_count {
            return Err(StoreError::ConflictingPlacement {
                requested: new_ordinal,
                live_count,
            });
        }
        if new_ordinal != entity.ordinal {
            move_same_parent_tx(tx, kind, entity.parent_id, entity.ordinal, new_ordinal)?;
        }
    } else {
        // Landing in another parent: one past its tail is a legal append.
        let live_count = live_count_tx(tx, kind, dest_parent_id)?;
        if new_ordinal > live_count {
            return Err(StoreError::ConflictingPlacement {
                requested: new_ordinal,
                live_count,
            });
        }
        move_cross_parent_tx(
            tx,
            kind,
            entity.id,
            entity.parent_id,
            entity.ordinal,
            dest_parent_id,
            new_ordinal,
        )?;
        touched.insert(dest_parent_id);
    }
    touch_row_tx(tx, kind, entity.id, now_ms)?;
    Ok(touched)
}

/// Freezes the row's current ordinal under a deletion stamp, then closes
/// the gap among the survivors. The stamp lands first so the ranged shift
/// skips the dying row.
pub(in crate::store) fn soft_delete_tx(
    tx: &Transaction<'_>,
    kind: EntityKind,
    entity: &OrderableRef,
    now_ms: i64,
) -> Result<(), StoreError> {
    let KindSql { table, .. } = kind_sql(kind);
    let sql = format!("UPDATE {table} SET deleted_at_ms=?2, updated_at_ms=?2 WHERE id=?1");
    tx.execute(&sql, params![entity.id, now_ms])?;
    shift_for_delete_tx(tx, kind, entity.parent_id, entity.ordinal)?;
    Ok(())
}

fn touch_row_tx(
    tx: &Transaction<'_>,
    kind: EntityKind,
    entity_id: i64,
    now_ms: i64,
) -> Result<(), StoreError> {
    let KindSql { table, .. } = kind_sql(kind);
    let sql = format!("UPDATE {table} SET updated_at_ms=?2 WHERE id=?1");
    tx.execute(&sql, params![entity_id, now_ms])?;
    Ok(())
}

fn entity_not_found(kind: EntityKind, public_id: &str) -> StoreError {
    let public_id = public_id.to_string();
    match kind {
        EntityKind::List => StoreError::ListNotFound { public_id },
        EntityKind::Card => StoreError::CardNotFound { public_id },
        EntityKind::ChecklistItem => StoreError::ChecklistItemNotFound { public_id },
    }
}

fn parent_not_found(kind: EntityKind, public_id: &str) -> StoreError {
    let public_id = public_id.to_string();
    match kind {
        EntityKind::List => StoreError::BoardNotFound { public_id },
        EntityKind::Card => StoreError::ListNotFound { public_id },
        EntityKind::ChecklistItem => StoreError::ChecklistNotFound { public_id },
    }
}
