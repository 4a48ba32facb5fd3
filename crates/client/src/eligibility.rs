//! Eligibility check against the live backend.
//!
//! Wraps the pure rule from `afilado_core::eligibility` with the two reads it
//! needs and folds transport failures into a third, inconclusive outcome.

use serde::Serialize;

use afilado_core::eligibility::{self, Eligibility, RejectionReason};
use afilado_core::feedback::Feedback;
use afilado_core::types::DbId;

use crate::api::SawShopApi;

/// Prefix for the inconclusive outcome.
pub const MSG_CHECK_FAILED: &str = "Could not verify whether the saw can be sharpened, proceed with caution";

/// Result of checking a saw before opening a sharpening.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum EligibilityCheck {
    Accepted { message: String },
    /// Business rule objection, shown as a dismissible warning.
    Rejected {
        reason: RejectionReason,
        message: String,
    },
    /// The check could not run; the result is unknown.
    Error { message: String },
}

impl EligibilityCheck {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Accepted { message } | Self::Rejected { message, .. } | Self::Error { message } => {
                message
            }
        }
    }

    /// The rule outcome, when the check completed.
    pub fn eligibility(&self) -> Option<Eligibility> {
        match self {
            Self::Accepted { .. } => Some(Eligibility::Accepted),
            Self::Rejected { reason, .. } => Some(Eligibility::Rejected { reason: *reason }),
            Self::Error { .. } => None,
        }
    }

    pub fn feedback(&self) -> Feedback {
        match self {
            Self::Accepted { message } => Feedback::success(message.clone()),
            Self::Rejected { message, .. } => Feedback::warning(message.clone()),
            Self::Error { message } => Feedback::technical(message.clone()),
        }
    }
}

impl From<Eligibility> for EligibilityCheck {
    fn from(result: Eligibility) -> Self {
        match result {
            Eligibility::Accepted => Self::Accepted {
                message: result.message().to_string(),
            },
            Eligibility::Rejected { reason } => Self::Rejected {
                reason,
                message: reason.message().to_string(),
            },
        }
    }
}

/// Decide whether `saw_id` may receive a new sharpening right now.
///
/// Reads the saw, then (only for active saws) its sharpening history. Never
/// fails: a transport or server error becomes [`EligibilityCheck::Error`].
pub async fn check_eligibility(api: &dyn SawShopApi, saw_id: DbId) -> EligibilityCheck {
    let saw = match api.saw(saw_id).await {
        Ok(saw) => saw,
        Err(e) => {
            tracing::error!(saw_id, error = %e, "Eligibility check could not load saw");
            return EligibilityCheck::Error {
                message: format!("{MSG_CHECK_FAILED}: {e}"),
            };
        }
    };

    // A retired saw is rejected whatever its history says.
    if !saw.active {
        return eligibility::evaluate(&saw, &[]).into();
    }

    let history = match api.sharpenings_for_saw(saw_id).await {
        Ok(history) => history,
        Err(e) => {
            tracing::error!(saw_id, error = %e, "Eligibility check could not load sharpening history");
            return EligibilityCheck::Error {
                message: format!("{MSG_CHECK_FAILED}: {e}"),
            };
        }
    };

    let result = eligibility::evaluate(&saw, &history);
    tracing::debug!(saw_id, history = history.len(), accepted = result.is_accepted(), "Eligibility evaluated");
    result.into()
}
