//! Sharpening work orders and their two-state lifecycle.
//!
//! A record is `Pending` from intake until its exit is registered, then
//! `Completed`. There is no way back from `Completed`.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_COMPLETED: &str = "completed";

/// All valid status strings.
pub const VALID_STATUSES: &[&str] = &[STATUS_PENDING, STATUS_COMPLETED];

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Lifecycle state of a sharpening record, keyed on the exit timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SharpeningStatus {
    Pending,
    Completed,
}

impl SharpeningStatus {
    pub fn from_str_value(s: &str) -> Result<Self, CoreError> {
        match s {
            STATUS_PENDING => Ok(Self::Pending),
            STATUS_COMPLETED => Ok(Self::Completed),
            _ => Err(CoreError::Validation(format!(
                "Invalid sharpening status '{s}'. Must be one of: {}",
                VALID_STATUSES.join(", ")
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => STATUS_PENDING,
            Self::Completed => STATUS_COMPLETED,
        }
    }
}

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A sharpening row as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sharpening {
    pub id: DbId,
    pub saw_id: DbId,
    pub sharpening_type_id: DbId,
    pub intake_at: Timestamp,
    #[serde(default)]
    pub exit_at: Option<Timestamp>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub is_last_sharpening: bool,
}

impl Sharpening {
    pub fn status(&self) -> SharpeningStatus {
        match self.exit_at {
            None => SharpeningStatus::Pending,
            Some(_) => SharpeningStatus::Completed,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.exit_at.is_none()
    }

    /// Move a pending record to `Completed`, stamping the exit time.
    ///
    /// Completing an already completed record is a conflict; the original
    /// exit timestamp is left untouched.
    pub fn register_exit(&mut self, at: Timestamp) -> Result<(), CoreError> {
        if let Some(exit_at) = self.exit_at {
            return Err(CoreError::Conflict(format!(
                "Sharpening {} already left the shop at {}",
                self.id,
                exit_at.to_rfc3339()
            )));
        }
        if at < self.intake_at {
            return Err(CoreError::Validation(format!(
                "Exit time for sharpening {} precedes its intake time",
                self.id
            )));
        }
        self.exit_at = Some(at);
        Ok(())
    }
}

/// The most recent record by intake time, if any.
///
/// Ties keep the record that appears last in the backend order, which is the
/// insertion order for records created within the same second.
pub fn latest(records: &[Sharpening]) -> Option<&Sharpening> {
    records.iter().max_by_key(|r| r.intake_at)
}

/// Records sorted by intake time, newest first.
pub fn sorted_newest_first(records: &[Sharpening]) -> Vec<&Sharpening> {
    let mut sorted: Vec<&Sharpening> = records.iter().collect();
    sorted.sort_by(|a, b| b.intake_at.cmp(&a.intake_at));
    sorted
}

// ---------------------------------------------------------------------------
// Create DTO
// ---------------------------------------------------------------------------

/// Input for creating a sharpening record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSharpening {
    pub saw_id: DbId,
    pub sharpening_type_id: DbId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub is_last_sharpening: bool,
}

// ---------------------------------------------------------------------------
// Update DTO
// ---------------------------------------------------------------------------

/// Input for editing an existing sharpening record (all fields optional).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SharpeningUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sharpening_type_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_last_sharpening: Option<bool>,
}

/// Request body for the bulk exit endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkExit {
    pub ids: Vec<DbId>,
}

/// Response of the bulk exit endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkExitResult {
    pub updated: usize,
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// A sharpening enriched with the display fields list views need.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharpeningView {
    #[serde(flatten)]
    pub sharpening: Sharpening,
    pub saw_code: String,
    pub sharpening_type_name: String,
    pub branch_id: DbId,
    pub branch_name: String,
    pub client_id: DbId,
    pub client_name: String,
}
