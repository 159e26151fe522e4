#![forbid(unsafe_code)]

use cb_core::model::Placement;

#[derive(Clone, Debug)]
pub struct ChecklistItemRow {
    pub public_id: String,
    pub checklist_public_id: String,
    pub text: String,
    pub done: bool,
    pub ordinal: i64,
    pub deleted_at_ms: Option<i64>,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChecklistItemCreateRequest {
    pub checklist_public_id: String,
    pub text: String,
    pub placement: Placement,
}

/// `checklist_public_id = None` keeps the item in its current checklist.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChecklistItemMoveRequest {
    pub public_id: String,
    pub checklist_public_id: Option<String>,
    pub new_ordinal: i64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChecklistItemEditRequest {
    pub public_id: String,
    pub text: Option<String>,
    pub done: Option<bool>,
}
