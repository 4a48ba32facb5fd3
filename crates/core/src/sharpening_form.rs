//! Sharpening form state and submission checks.
//!
//! A [`SharpeningDraft`] is what the form holds while the user edits it. It
//! turns into a create or update DTO only after the hard validation rules
//! pass. Soft rules (a pending sharpening on the same saw) are reported by the
//! eligibility check and never block here.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::eligibility::{Eligibility, RejectionReason};
use crate::error::CoreError;
use crate::last_sharpening::LastSharpeningToggle;
use crate::models::sharpening::{BulkExit, NewSharpening, Sharpening, SharpeningUpdate};
use crate::types::DbId;

/// Maximum accepted length of the notes field.
pub const MAX_NOTES_LENGTH: usize = 1000;

// ---------------------------------------------------------------------------
// Draft
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SharpeningDraft {
    pub saw_id: Option<DbId>,
    pub sharpening_type_id: Option<DbId>,
    pub notes: Option<String>,
    pub last_sharpening: LastSharpeningToggle,
}

impl SharpeningDraft {
    /// Pre-fill the form from an existing record for editing.
    pub fn from_record(record: &Sharpening) -> Self {
        Self {
            saw_id: Some(record.saw_id),
            sharpening_type_id: Some(record.sharpening_type_id),
            notes: record.notes.clone(),
            last_sharpening: LastSharpeningToggle::from_flag(record.is_last_sharpening),
        }
    }

    /// Whether submitting will retire the saw.
    pub fn marks_last_sharpening(&self) -> bool {
        self.last_sharpening.value()
    }

    fn clean_notes(&self) -> Result<Option<String>, CoreError> {
        let notes = self
            .notes
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);
        if let Some(n) = &notes {
            if n.chars().count() > MAX_NOTES_LENGTH {
                return Err(CoreError::Validation(format!(
                    "Notes must be at most {MAX_NOTES_LENGTH} characters"
                )));
            }
        }
        Ok(notes)
    }

    /// Apply the hard validation rules and build the create DTO.
    ///
    /// `eligibility` is the latest check result for the selected saw, if one
    /// completed. Only a retired saw blocks; a pending sharpening does not.
    pub fn to_new_sharpening(
        &self,
        eligibility: Option<&Eligibility>,
    ) -> Result<NewSharpening, CoreError> {
        let (Some(saw_id), Some(sharpening_type_id)) = (self.saw_id, self.sharpening_type_id)
        else {
            let missing: Vec<&str> = [
                self.saw_id.is_none().then_some("saw"),
                self.sharpening_type_id.is_none().then_some("sharpening type"),
            ]
            .into_iter()
            .flatten()
            .collect();
            return Err(CoreError::Validation(format!(
                "Required field(s) missing: {}",
                missing.join(", ")
            )));
        };

        if let Some(Eligibility::Rejected { reason }) = eligibility {
            if reason.blocks_submission() {
                return Err(CoreError::Validation(reason.message().to_string()));
            }
        }

        if self.last_sharpening.needs_confirmation() {
            return Err(CoreError::Validation(
                "Confirm or cancel the last sharpening prompt first".into(),
            ));
        }

        Ok(NewSharpening {
            saw_id,
            sharpening_type_id,
            notes: self.clean_notes()?,
            is_last_sharpening: self.last_sharpening.value(),
        })
    }

    /// Build the update DTO for an existing record.
    pub fn to_update(&self) -> Result<SharpeningUpdate, CoreError> {
        let sharpening_type_id = self
            .sharpening_type_id
            .ok_or_else(|| CoreError::Validation("Required field(s) missing: sharpening type".into()))?;

        if self.last_sharpening.needs_confirmation() {
            return Err(CoreError::Validation(
                "Confirm or cancel the last sharpening prompt first".into(),
            ));
        }

        Ok(SharpeningUpdate {
            sharpening_type_id: Some(sharpening_type_id),
            notes: self.clean_notes()?,
            is_last_sharpening: Some(self.last_sharpening.value()),
        })
    }
}

/// Warning text for a non-blocking rejection, if any.
pub fn soft_warning(eligibility: &Eligibility) -> Option<&'static str> {
    match eligibility {
        Eligibility::Rejected { reason } if !reason.blocks_submission() => Some(reason.message()),
        _ => None,
    }
}

/// Whether the rejection reason refers to a still-open record.
pub fn pending_record(eligibility: &Eligibility) -> Option<DbId> {
    match eligibility {
        Eligibility::Rejected {
            reason: RejectionReason::Pending { sharpening_id },
        } => Some(*sharpening_id),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Bulk exit selection
// ---------------------------------------------------------------------------

/// Rows ticked for a bulk exit, plus the user's confirmation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkExitSelection {
    ids: BTreeSet<DbId>,
    confirmed: bool,
}

impl BulkExitSelection {
    pub fn new<I: IntoIterator<Item = DbId>>(ids: I) -> Self {
        Self {
            ids: ids.into_iter().collect(),
            confirmed: false,
        }
    }

    pub fn toggle(&mut self, id: DbId) {
        if !self.ids.remove(&id) {
            self.ids.insert(id);
        }
        self.confirmed = false;
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Prompt text for the confirmation dialog.
    pub fn confirmation_prompt(&self) -> String {
        format!("Register exit for {} sharpening(s)?", self.ids.len())
    }

    pub fn confirm(&mut self) {
        self.confirmed = true;
    }

    /// Build the request body. Requires a non-empty, confirmed selection.
    pub fn to_request(&self) -> Result<BulkExit, CoreError> {
        if self.ids.is_empty() {
            return Err(CoreError::Validation(
                "Select at least one sharpening to register its exit".into(),
            ));
        }
        if !self.confirmed {
            return Err(CoreError::Validation(
                "Bulk exit registration must be confirmed".into(),
            ));
        }
        Ok(BulkExit {
            ids: self.ids.iter().copied().collect(),
        })
    }
}
