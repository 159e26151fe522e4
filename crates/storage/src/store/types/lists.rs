#![forbid(unsafe_code)]

use cb_core::model::Placement;

#[derive(Clone, Debug)]
pub struct ListRow {
    pub public_id: String,
    pub board_public_id: String,
    pub title: String,
    pub ordinal: i64,
    pub deleted_at_ms: Option<i64>,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListCreateRequest {
    pub board_public_id: String,
    pub title: String,
    pub placement: Placement,
}

/// `board_public_id = None` keeps the list on its current board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListMoveRequest {
    pub public_id: String,
    pub board_public_id: Option<String>,
    pub new_ordinal: i64,
}
