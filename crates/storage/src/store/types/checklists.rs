#![forbid(unsafe_code)]

#[derive(Clone, Debug)]
pub struct ChecklistRow {
    pub public_id: String,
    pub card_public_id: String,
    pub title: String,
    pub deleted_at_ms: Option<i64>,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}
