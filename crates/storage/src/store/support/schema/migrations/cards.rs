#![forbid(unsafe_code)]

use super::super::super::super::StoreError;
use super::util::add_column_if_missing;
use rusqlite::Connection;

pub(super) fn apply(conn: &Connection) -> Result<(), StoreError> {
    // Databases created before descriptions existed lack the column.
    add_column_if_missing(conn, "cards", "description", "TEXT")?;
    Ok(())
}
