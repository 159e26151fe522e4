#![forbid(unsafe_code)]

mod cards;
mod checklist_items;
mod util;

use super::super::super::StoreError;
use rusqlite::Connection;

pub(super) fn apply(conn: &Connection) -> Result<(), StoreError> {
    cards::apply(conn)?;
    checklist_items::apply(conn)?;
    Ok(())
}
