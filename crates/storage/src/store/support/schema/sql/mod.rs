#![forbid(unsafe_code)]

mod boards;
mod cards;
mod core;
mod indexes;
mod pragmas;

pub(super) fn full_schema_sql() -> String {
    let mut sql = String::new();
    sql.push_str(pragmas::SQL);
    sql.push_str(core::SQL);
    sql.push_str(boards::SQL);
    sql.push_str(cards::SQL);
    sql.push_str(indexes::SQL);
    sql
}
