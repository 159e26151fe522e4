#![forbid(unsafe_code)]

mod assign;
mod audit;
mod ops;
mod shift;

pub use audit::RepairReport;

pub(in crate::store) use audit::ensure_ordering_clean_tx;
pub(in crate::store) use ops::{
    move_to_tx, prepare_insert_tx, require_live_parent, resolve_live_entity, resolve_live_parent,
    soft_delete_tx,
};

use super::{SqliteStore, StoreError, canonical_public_id};
use cb_core::model::EntityKind;
use std::collections::BTreeSet;

/// Table bindings for one orderable kind.
pub(in crate::store) struct KindSql {
    pub(in crate::store) table: &'static str,
    pub(in crate::store) parent_column: &'static str,
    pub(in crate::store) parent_table: &'static str,
}

pub(in crate::store) fn kind_sql(kind: EntityKind) -> KindSql {
    match kind {
        EntityKind::List => KindSql {
            table: "lists",
            parent_column: "board_id",
            parent_table: "boards",
        },
        EntityKind::Card => KindSql {
            table: "cards",
            parent_column: "list_id",
            parent_table: "lists",
        },
        EntityKind::ChecklistItem => KindSql {
            table: "checklist_items",
            parent_column: "checklist_id",
            parent_table: "checklists",
        },
    }
}

impl SqliteStore {
    /// Audits one parent scope and repairs duplicate ordinals in place.
    /// Successful repairs commit; a scope that stays corrupt after
    /// compaction rolls back and surfaces as `OrderingCorrupt`.
    pub fn ordering_audit(
        &mut self,
        kind: EntityKind,
        parent_public_id: &str,
    ) -> Result<RepairReport, StoreError> {
        let parent_public_id = canonical_public_id(parent_public_id)?;
        let tx = self.conn.transaction()?;
        let parent_id = resolve_live_parent(&tx, kind, &parent_public_id)?;
        let report = ensure_ordering_clean_tx(&tx, kind, &BTreeSet::from([parent_id]))?;
        tx.commit()?;
        Ok(report)
    }
}
