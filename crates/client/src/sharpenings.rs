//! Sharpening submission and exit registration.
//!
//! Submitting a draft marked as last sharpening is a two-call sequence: the
//! saw is deactivated first, and the sharpening is saved afterwards whatever
//! the deactivation's outcome. A failed deactivation is logged and returned
//! as a warning on the otherwise successful outcome.

use afilado_core::eligibility::Eligibility;
use afilado_core::error::CoreError;
use afilado_core::feedback::Feedback;
use afilado_core::models::saw::SawUpdate;
use afilado_core::models::sharpening::{BulkExitResult, Sharpening};
use afilado_core::sharpening_form::{BulkExitSelection, SharpeningDraft};
use afilado_core::types::DbId;

use crate::api::SawShopApi;
use crate::error::ApiResult;

/// Warning shown when the saw could not be retired.
pub const MSG_DEACTIVATION_FAILED: &str =
    "The sharpening was saved, but the saw could not be marked inactive. Mark it inactive from the saw page.";

/// Outcome of a successful create or update.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome {
    pub sharpening: Sharpening,
    /// `Some(true)` if the saw was retired by this submission, `Some(false)`
    /// if retiring it failed, `None` if the submission did not retire it.
    pub saw_deactivated: Option<bool>,
    /// Non-blocking messages to show alongside the success message.
    pub warnings: Vec<Feedback>,
}

impl SubmitOutcome {
    fn new(sharpening: Sharpening, saw_deactivated: Option<bool>) -> Self {
        let warnings = match saw_deactivated {
            Some(false) => vec![Feedback::warning(MSG_DEACTIVATION_FAILED)],
            _ => Vec::new(),
        };
        Self {
            sharpening,
            saw_deactivated,
            warnings,
        }
    }
}

/// Issue the `{active: false}` update and report whether it succeeded.
async fn retire_saw(api: &dyn SawShopApi, saw_id: DbId) -> bool {
    match api.update_saw(saw_id, &SawUpdate::deactivate()).await {
        Ok(_) => {
            tracing::info!(saw_id, "Saw retired after last sharpening");
            true
        }
        Err(e) => {
            tracing::warn!(saw_id, error = %e, "Failed to retire saw, saving sharpening anyway");
            false
        }
    }
}

/// Validate `draft` and create the sharpening.
///
/// `eligibility` is the outcome of the last completed eligibility check for
/// the selected saw, if any.
pub async fn create_sharpening(
    api: &dyn SawShopApi,
    draft: &SharpeningDraft,
    eligibility: Option<&Eligibility>,
) -> ApiResult<SubmitOutcome> {
    let new = draft.to_new_sharpening(eligibility)?;

    let saw_deactivated = if new.is_last_sharpening {
        Some(retire_saw(api, new.saw_id).await)
    } else {
        None
    };

    let sharpening = api.create_sharpening(&new).await?;
    tracing::info!(
        sharpening_id = sharpening.id,
        saw_id = sharpening.saw_id,
        last = sharpening.is_last_sharpening,
        "Sharpening created"
    );
    Ok(SubmitOutcome::new(sharpening, saw_deactivated))
}

/// Validate `draft` and update the existing record `original`.
///
/// The saw is retired only when the edit turns the last-sharpening flag on.
pub async fn update_sharpening(
    api: &dyn SawShopApi,
    original: &Sharpening,
    draft: &SharpeningDraft,
) -> ApiResult<SubmitOutcome> {
    let update = draft.to_update()?;

    let newly_last = update.is_last_sharpening == Some(true) && !original.is_last_sharpening;
    let saw_deactivated = if newly_last {
        Some(retire_saw(api, original.saw_id).await)
    } else {
        None
    };

    let sharpening = api.update_sharpening(original.id, &update).await?;
    tracing::info!(sharpening_id = sharpening.id, "Sharpening updated");
    Ok(SubmitOutcome::new(sharpening, saw_deactivated))
}

/// Register the exit of one pending sharpening.
pub async fn register_exit(api: &dyn SawShopApi, sharpening_id: DbId) -> ApiResult<Sharpening> {
    let sharpening = api.register_exit(sharpening_id).await?;
    if sharpening.is_pending() {
        return Err(CoreError::Internal(format!(
            "Backend acknowledged exit for sharpening {sharpening_id} without an exit timestamp"
        ))
        .into());
    }
    tracing::info!(sharpening_id, "Sharpening exit registered");
    Ok(sharpening)
}

/// Register the exit of every selected sharpening in one call.
///
/// The selection must be non-empty and confirmed; nothing is sent otherwise.
pub async fn register_exit_bulk(
    api: &dyn SawShopApi,
    selection: &BulkExitSelection,
) -> ApiResult<BulkExitResult> {
    let request = selection.to_request()?;
    let requested = request.ids.len();
    let result = api.register_exit_bulk(&request).await?;
    if result.updated < requested {
        tracing::warn!(requested, updated = result.updated, "Bulk exit updated fewer records than requested");
    } else {
        tracing::info!(updated = result.updated, "Bulk exit registered");
    }
    Ok(result)
}

/// Summary line for a finished bulk exit.
pub fn bulk_exit_feedback(requested: usize, result: &BulkExitResult) -> Feedback {
    if result.updated >= requested {
        Feedback::success(format!("Exit registered for {} sharpening(s)", result.updated))
    } else {
        Feedback::warning(format!(
            "Exit registered for {} of {requested} sharpening(s); the rest were already completed or not found",
            result.updated
        ))
    }
}
