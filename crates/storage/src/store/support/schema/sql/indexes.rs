#![forbid(unsafe_code)]

// No unique index on (parent, ordinal): the ranged shift UPDATEs pass
// through transient duplicates inside a statement, and SQLite checks
// uniqueness per row rather than per statement. Density is enforced by
// the audit pass instead.
pub(super) const SQL: &str = r#"

        CREATE INDEX IF NOT EXISTS idx_lists_board_ordinal ON lists(board_id, ordinal);
        CREATE INDEX IF NOT EXISTS idx_cards_list_ordinal ON cards(list_id, ordinal);
        CREATE INDEX IF NOT EXISTS idx_checklists_card ON checklists(card_id, id);
        CREATE INDEX IF NOT EXISTS idx_checklist_items_checklist_ordinal ON checklist_items(checklist_id, ordinal);
"#;
