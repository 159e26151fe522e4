#![forbid(unsafe_code)]

pub(super) const SQL: &str = r#"

        CREATE TABLE IF NOT EXISTS boards (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          public_id TEXT NOT NULL UNIQUE,
          title TEXT NOT NULL,
          deleted_at_ms INTEGER,
          created_at_ms INTEGER NOT NULL,
          updated_at_ms INTEGER NOT NULL
        );

        -- `ordinal` is the dense zero-based position among the board's live
        -- lists; soft-deleted rows keep their last value and drop out of the
        -- ordering.
        CREATE TABLE IF NOT EXISTS lists (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          public_id TEXT NOT NULL UNIQUE,
          board_id INTEGER NOT NULL REFERENCES boards(id),
          ordinal INTEGER NOT NULL,
          title TEXT NOT NULL,
          deleted_at_ms INTEGER,
          created_at_ms INTEGER NOT NULL,
          updated_at_ms INTEGER NOT NULL
        );
"#;
