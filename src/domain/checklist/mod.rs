//! Exit checklist domain

mod model;
mod repository;

pub use model::{ChecklistEntry, EntryCategory, ExitChecklist, MIN_NOTES_LEN};
pub use repository::ChecklistRepository;
