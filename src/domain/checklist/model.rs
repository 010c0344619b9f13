//! Exit checklist domain entity
//!
//! End-of-stay report with per-category notes. Submission is gated by the
//! completeness validator and is a one-way transition.

use chrono::{DateTime, Utc};

use crate::domain::{DomainError, DomainResult};

/// Minimum trimmed note length for entries in required categories
pub const MIN_NOTES_LEN: usize = 5;

/// Checklist entry category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryCategory {
    Refrigerator,
    Freezer,
    Closet,
    /// Optional free-form category, exempt from the completeness rules
    General,
}

impl EntryCategory {
    /// Categories that must be covered before submission
    pub const REQUIRED: [EntryCategory; 3] = [
        EntryCategory::Refrigerator,
        EntryCategory::Freezer,
        EntryCategory::Closet,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Refrigerator => "refrigerator",
            Self::Freezer => "freezer",
            Self::Closet => "closet",
            Self::General => "general",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "refrigerator" => Self::Refrigerator,
            "freezer" => Self::Freezer,
            "closet" => Self::Closet,
            _ => Self::General,
        }
    }
}

impl std::fmt::Display for EntryCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry in an exit checklist
#[derive(Debug, Clone)]
pub struct ChecklistEntry {
    pub category: EntryCategory,
    pub notes: String,
    /// Photos are optional; only notes are required
    pub photo_url: Option<String>,
    /// 1-based insertion order
    pub position: u32,
    pub created_at: DateTime<Utc>,
}

/// A complete exit checklist submission
#[derive(Debug, Clone)]
pub struct ExitChecklist {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    /// Standalone checklists are allowed; linkage is optional
    pub booking_id: Option<String>,
    pub entries: Vec<ChecklistEntry>,
    pub important_notes: Option<String>,
    pub is_complete: bool,
    pub submitted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ExitChecklist {
    pub fn new(
        user_id: impl Into<String>,
        user_name: impl Into<String>,
        booking_id: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            user_name: user_name.into(),
            booking_id,
            entries: Vec::new(),
            important_notes: None,
            is_complete: false,
            submitted_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Append an entry, assigning the next position
    pub fn add_entry(
        &mut self,
        category: EntryCategory,
        notes: impl Into<String>,
        photo_url: Option<String>,
    ) {
        let position = self.entries.len() as u32 + 1;
        self.entries.push(ChecklistEntry {
            category,
            notes: notes.into(),
            photo_url,
            position,
            created_at: Utc::now(),
        });
        self.touch();
    }

    pub fn entries_in(&self, category: EntryCategory) -> Vec<&ChecklistEntry> {
        self.entries
            .iter()
            .filter(|e| e.category == category)
            .collect()
    }

    /// Completeness rules gating submission.
    ///
    /// Every required category needs at least one entry, and every entry in a
    /// required category needs trimmed notes of [`MIN_NOTES_LEN`] or more
    /// characters. The general category is exempt. An empty checklist is
    /// considered not yet ready and passes, since enforcement happens at
    /// submission time only.
    pub fn validate_completeness(&self) -> DomainResult<()> {
        if self.entries.is_empty() {
            return Ok(());
        }

        for category in EntryCategory::REQUIRED {
            let entries = self.entries_in(category);
            if entries.is_empty() {
                return Err(DomainError::IncompleteCategory {
                    category: category.as_str(),
                    min_notes: MIN_NOTES_LEN,
                });
            }
            if entries.iter().any(|e| e.notes.trim().len() < MIN_NOTES_LEN) {
                return Err(DomainError::IncompleteCategory {
                    category: category.as_str(),
                    min_notes: MIN_NOTES_LEN,
                });
            }
        }
        Ok(())
    }

    /// Submit the checklist. One-way: an already-complete checklist is left
    /// untouched. An empty checklist cannot be submitted.
    pub fn submit(&mut self) -> DomainResult<()> {
        if self.is_complete {
            return Ok(());
        }
        if self.entries.is_empty() {
            return Err(DomainError::IncompleteCategory {
                category: EntryCategory::Refrigerator.as_str(),
                min_notes: MIN_NOTES_LEN,
            });
        }
        self.validate_completeness()?;
        self.is_complete = true;
        self.submitted_at = Some(Utc::now());
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn checklist_with_required(notes: &str) -> ExitChecklist {
        let mut cl = ExitChecklist::new("user-1", "Dana", None);
        cl.add_entry(EntryCategory::Refrigerator, notes, None);
        cl.add_entry(EntryCategory::Freezer, "emptied and defrosted", None);
        cl.add_entry(EntryCategory::Closet, "linens folded", None);
        cl
    }

    #[test]
    fn empty_checklist_is_not_yet_ready_but_valid() {
        let cl = ExitChecklist::new("user-1", "Dana", None);
        assert!(cl.validate_completeness().is_ok());
    }

    #[test]
    fn empty_checklist_cannot_be_submitted() {
        let mut cl = ExitChecklist::new("user-1", "Dana", None);
        assert!(cl.submit().is_err());
        assert!(!cl.is_complete);
    }

    #[test]
    fn missing_closet_names_closet() {
        let mut cl = ExitChecklist::new("user-1", "Dana", None);
        cl.add_entry(EntryCategory::Refrigerator, "shelves wiped", None);
        cl.add_entry(EntryCategory::Freezer, "emptied out", None);

        match cl.validate_completeness() {
            Err(DomainError::IncompleteCategory { category, .. }) => {
                assert_eq!(category, "closet");
            }
            other => panic!("expected IncompleteCategory, got {:?}", other),
        }
    }

    #[test]
    fn short_note_in_required_category_fails() {
        let cl = checklist_with_required("ok");
        match cl.validate_completeness() {
            Err(DomainError::IncompleteCategory { category, .. }) => {
                assert_eq!(category, "refrigerator");
            }
            other => panic!("expected IncompleteCategory, got {:?}", other),
        }
    }

    #[test]
    fn whitespace_does_not_count_toward_notes_length() {
        let cl = checklist_with_required("  ab  ");
        assert!(cl.validate_completeness().is_err());
    }

    #[test]
    fn general_category_is_exempt() {
        let mut cl = checklist_with_required("shelves wiped");
        cl.add_entry(EntryCategory::General, "ok", None); // short is fine here
        assert!(cl.validate_completeness().is_ok());
    }

    #[test]
    fn all_required_covered_submits_without_general() {
        let mut cl = checklist_with_required("shelves wiped");
        assert!(cl.submit().is_ok());
        assert!(cl.is_complete);
        assert!(cl.submitted_at.is_some());
    }

    #[test]
    fn submit_is_one_way_and_idempotent() {
        let mut cl = checklist_with_required("shelves wiped");
        cl.submit().unwrap();
        let stamp = cl.submitted_at;

        cl.submit().unwrap();
        assert_eq!(cl.submitted_at, stamp);
    }

    #[test]
    fn entry_positions_follow_insertion_order() {
        let cl = checklist_with_required("shelves wiped");
        let positions: Vec<u32> = cl.entries.iter().map(|e| e.position).collect();
        assert_eq!(positions, vec![1, 2, 3]);
    }

    #[test]
    fn unknown_category_falls_back_to_general() {
        assert_eq!(EntryCategory::from_str("garage"), EntryCategory::General);
    }
}
