#![forbid(unsafe_code)]

use cb_core::model::EntityKind;
use std::collections::BTreeSet;

#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Sql(rusqlite::Error),
    InvalidInput(&'static str),
    BoardNotFound {
        public_id: String,
    },
    ListNotFound {
        public_id: String,
    },
    CardNotFound {
        public_id: String,
    },
    ChecklistNotFound {
        public_id: String,
    },
    ChecklistItemNotFound {
        public_id: String,
    },
    ConflictingPlacement {
        requested: i64,
        live_count: i64,
    },
    OrderingCorrupt {
        kind: EntityKind,
        parent_ids: BTreeSet<i64>,
    },
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io: {err}"),
            Self::Sql(err) => write!(f, "sqlite: {err}"),
            Self::InvalidInput(message) => write!(f, "invalid input: {message}"),
            Self::BoardNotFound { public_id } => write!(f, "board not found: {public_id}"),
            Self::ListNotFound { public_id } => write!(f, "list not found: {public_id}"),
            Self::CardNotFound { public_id } => write!(f, "card not found: {public_id}"),
            Self::ChecklistNotFound { public_id } => {
                write!(f, "checklist not found: {public_id}")
            }
            Self::ChecklistItemNotFound { public_id } => {
                write!(f, "checklist item not found: {public_id}")
            }
            Self::ConflictingPlacement {
                requested,
                live_count,
            } => write!(
                f,
                "conflicting placement (requested={requested}, live_count={live_count})"
            ),
            Self::OrderingCorrupt { kind, parent_ids } => write!(
                f,
                "ordering corrupt for kind={} (parents={parent_ids:?})",
                kind.as_str()
            ),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sql(value)
    }
}
