#![forbid(unsafe_code)]

pub mod ids {
    pub const BOARD_PREFIX: &str = "BOARD";
    pub const LIST_PREFIX: &str = "LIST";
    pub const CARD_PREFIX: &str = "CARD";
    pub const CHECKLIST_PREFIX: &str = "CHK";
    pub const CHECKLIST_ITEM_PREFIX: &str = "ITEM";

    pub const KNOWN_PREFIXES: &[&str] = &[
        BOARD_PREFIX,
        LIST_PREFIX,
        CARD_PREFIX,
        CHECKLIST_PREFIX,
        CHECKLIST_ITEM_PREFIX,
    ];

    const SEQUENCE_LEN: usize = 8;

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum PublicIdError {
        Empty,
        MissingSeparator,
        UnknownPrefix,
        BadSequence,
    }

    /// Public ids look like `CARD-0000001A`: a known prefix, a dash, and an
    /// eight-digit uppercase hex sequence minted by the store.
    pub fn validate_public_id(value: &str) -> Result<(), PublicIdError> {
        if value.is_empty() {
            return Err(PublicIdError::Empty);
        }
        let Some((prefix, sequence)) = value.split_once('-') else {
            return Err(PublicIdError::MissingSeparator);
        };
        if !KNOWN_PREFIXES.contains(&prefix) {
            return Err(PublicIdError::UnknownPrefix);
        }
        if sequence.len() != SEQUENCE_LEN {
            return Err(PublicIdError::BadSequence);
        }
        if !sequence.chars().all(|ch| matches!(ch, '0'..='9' | 'A'..='F')) {
            return Err(PublicIdError::BadSequence);
        }
        Ok(())
    }
}

pub mod model {
    /// The three row kinds that carry a dense per-parent ordinal.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub enum EntityKind {
        List,
        Card,
        ChecklistItem,
    }

    impl EntityKind {
        pub fn as_str(&self) -> &'static str {
            match self {
                EntityKind::List => "list",
                EntityKind::Card => "card",
                EntityKind::ChecklistItem => "checklist_item",
            }
        }

        pub fn id_prefix(&self) -> &'static str {
            match self {
                EntityKind::List => crate::ids::LIST_PREFIX,
                EntityKind::Card => crate::ids::CARD_PREFIX,
                EntityKind::ChecklistItem => crate::ids::CHECKLIST_ITEM_PREFIX,
            }
        }
    }

    /// Where a freshly created row lands among its live siblings.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum Placement {
        Start,
        End,
        At(i64),
    }
}
