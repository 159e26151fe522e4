#![forbid(unsafe_code)]

mod counters;
mod schema;
mod time;

pub(super) use counters::*;
pub(super) use schema::migrate_sqlite_schema;
pub(super) use time::now_ms;
