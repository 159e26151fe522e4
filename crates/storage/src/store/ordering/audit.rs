#![forbid(unsafe_code)]

use super::super::StoreError;
use super::{KindSql, kind_sql};
use cb_core::model::EntityKind;
use rusqlite::{OptionalExtension, Transaction, params};
use std::collections::BTreeSet;

/// Outcome of an ordering audit over a set of parent scopes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RepairReport {
    pub ok: bool,
    pub repaired_parents: BTreeSet<i64>,
}

/// Scans each parent for duplicate ordinals among live rows and compacts
/// offenders back to a dense sequence. Detection keys on duplicates; the
/// compaction rewrite also squeezes out any gaps in an offending scope.
fn audit_and_repair_tx(
    tx: &Transaction<'_>,
    kind: EntityKind,
    parent_ids: &BTreeSet<i64>,
) -> Result<RepairReport, StoreError> {
    let mut repaired_parents = BTreeSet::new();
    let mut ok = true;
    for &parent_id in parent_ids {
        if !has_duplicate_ordinals_tx(tx, kind, parent_id)? {
            continue;
        }
        compact_parent_tx(tx, kind, parent_id)?;
        repaired_parents.insert(parent_id);
        if has_duplicate_ordinals_tx(tx, kind, parent_id)? {
            ok = false;
        }
    }
    Ok(RepairReport {
        ok,
        repaired_parents,
    })
}

/// Runs the audit and refuses to let a still-corrupt scope proceed. The
/// caller drops its transaction on the error path, so no mutation of the
/// enclosing operation survives.
pub(in crate::store) fn ensure_ordering_clean_tx(
    tx: &Transaction<'_>,
    kind: EntityKind,
    parent_ids: &BTreeSet<i64>,
) -> Result<RepairReport, StoreError> {
    let report = audit_and_repair_tx(tx, kind, parent_ids)?;
    if !report.ok {
        return Err(StoreError::OrderingCorrupt {
            kind,
            parent_ids: parent_ids.clone(),
        });
    }
    Ok(report)
}

fn has_duplicate_ordinals_tx(
    tx: &Transaction<'_>,
    kind: EntityKind,
    parent_id: i64,
) -> Result<bool, StoreError> {
    let KindSql {
        table,
        parent_column,
        ..
    } = kind_sql(kind);
    let sql = format!(
        "SELECT ordinal FROM {table} \
         WHERE {parent_column}=?1 AND deleted_at_ms IS NULL \
         GROUP BY ordinal HAVING COUNT(*) > 1 LIMIT 1"
    );
    let duplicate: Option<i64> = tx
        .query_row(&sql, params![parent_id], |row| row.get(0))
        .optional()?;
    Ok(duplicate.is_some())
}

/// Reassigns 0..n-1 across the live rows ordered by (ordinal, id); the id
/// tiebreak keeps the repair deterministic when ordinals collide.
fn compact_parent_tx(
    tx: &Transaction<'_>,
    kind: EntityKind,
    parent_id: i64,
) -> Result<(), StoreError> {
    let KindSql {
        table,
        parent_column,
        ..
    } = kind_sql(kind);
    let select = format!(
        "SELECT id, ordinal FROM {table} \
         WHERE {parent_column}=?1 AND deleted_at_ms IS NULL \
         ORDER BY ordinal ASC, id ASC"
    );
    let mut statement = tx.prepare(&select)?;
    let rows = statement
        .query_map(params![parent_id], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let update = format!("UPDATE {table} SET ordinal=?2 WHERE id=?1");
    for (position, (id, ordinal)) in rows.into_iter().enumerate() {
        let position = position as i64;
        if ordinal == position {
            continue;
        }
        tx.execute(&update, params![id, position])?;
    }
    Ok(())
}
