#![forbid(unsafe_code)]

mod boards;
mod cards;
mod checklist_items;
mod checklists;
mod lists;

pub use boards::*;
pub use cards::*;
pub use checklist_items::*;
pub use checklists::*;
pub use lists::*;
