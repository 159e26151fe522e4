#![forbid(unsafe_code)]

use super::super::super::super::StoreError;
use rusqlite::{Connection, OptionalExtension, params};

pub(super) fn add_column_if_missing(
    conn: &Connection,
    table: &str,
    column: &str,
    decl: &str,
) -> Result<(), StoreError> {
    if column_exists(conn, table, column)? {
        return Ok(());
    }
    let sql = format!("ALTER TABLE {table} ADD COLUMN {column} {decl}");
    conn.execute(&sql, [])?;
    Ok(())
}

fn column_exists(conn: &Connection, table: &str, column: &str) -> Result<bool, StoreError> {
    let sql = format!("SELECT 1 FROM pragma_table_info('{table}') WHERE name=?1");
    let present = conn
        .query_row(&sql, params![column], |_| Ok(()))
        .optional()?
        .is_some();
    Ok(present)
}
