#![forbid(unsafe_code)]

use cb_core::model::Placement;

#[derive(Clone, Debug)]
pub struct CardRow {
    pub public_id: String,
    pub list_public_id: String,
    pub title: String,
    pub description: Option<String>,
    pub ordinal: i64,
    pub deleted_at_ms: Option<i64>,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardCreateRequest {
    pub list_public_id: String,
    pub title: String,
    pub description: Option<String>,
    pub placement: Placement,
}

/// `list_public_id = None` keeps the card in its current list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardMoveRequest {
    pub public_id: String,
    pub list_public_id: Option<String>,
    pub new_ordinal: i64,
}

/// Outer `None` leaves the field untouched; `Some(None)` clears the
/// description.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardEditRequest {
    pub public_id: String,
    pub title: Option<String>,
    pub description: Option<Option<String>>,
}
