//! Sharpening eligibility rule.
//!
//! Decides, from an already loaded saw and its sharpening history, whether a
//! new sharpening may be opened. The rule is advisory: a rejection is shown
//! as a warning that staff may dismiss, except for retired saws, which the
//! sharpening form refuses to submit.

use serde::{Deserialize, Serialize};

use crate::models::saw::Saw;
use crate::models::sharpening::{self, Sharpening};
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

pub const MSG_ACCEPTED: &str = "Saw is available for sharpening";
pub const MSG_INACTIVE: &str =
    "Saw marked as last sharpening, no further sharpenings allowed";
pub const MSG_PENDING: &str =
    "Saw already has a pending sharpening that has not been collected";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Why a saw cannot take a new sharpening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "reason")]
pub enum RejectionReason {
    /// The saw received its last sharpening and was retired.
    Inactive,
    /// The most recent sharpening has no exit registered yet.
    Pending { sharpening_id: DbId },
}

impl RejectionReason {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Inactive => MSG_INACTIVE,
            Self::Pending { .. } => MSG_PENDING,
        }
    }

    /// Short machine-readable code (`"inactive"` / `"pending"`).
    pub fn code(&self) -> &'static str {
        match self {
            Self::Inactive => "inactive",
            Self::Pending { .. } => "pending",
        }
    }

    /// Whether the rejection prevents submitting the sharpening form.
    ///
    /// A pending sharpening is a dismissible warning; a retired saw is not a
    /// valid target at all.
    pub fn blocks_submission(&self) -> bool {
        matches!(self, Self::Inactive)
    }
}

/// Outcome of the eligibility rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum Eligibility {
    Accepted,
    Rejected { reason: RejectionReason },
}

impl Eligibility {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Accepted => MSG_ACCEPTED,
            Self::Rejected { reason } => reason.message(),
        }
    }
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// Evaluate whether `saw` may receive a new sharpening.
///
/// 1. An inactive saw is rejected regardless of its history.
/// 2. If the most recent record (by intake time) is still pending, reject.
/// 3. Otherwise accept.
pub fn evaluate(saw: &Saw, history: &[Sharpening]) -> Eligibility {
    if !saw.active {
        return Eligibility::Rejected {
            reason: RejectionReason::Inactive,
        };
    }

    match sharpening::latest(history) {
        Some(last) if last.is_pending() => Eligibility::Rejected {
            reason: RejectionReason::Pending {
                sharpening_id: last.id,
            },
        },
        _ => Eligibility::Accepted,
    }
}
