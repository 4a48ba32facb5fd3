//! Saw registration, editing and selection.

use afilado_core::error::CoreError;
use afilado_core::models::saw::{self, NewSaw, Saw};
use afilado_core::saw_registration::{FullSawForm, QuickSawForm, SawEditForm};
use afilado_core::types::DbId;

use crate::api::SawShopApi;
use crate::error::ApiResult;

/// Create `new` after checking that its code is not taken.
///
/// The created saw comes straight from the create response, so callers can
/// navigate to it without waiting.
async fn create_unique(api: &dyn SawShopApi, new: NewSaw) -> ApiResult<Saw> {
    if let Some(existing) = api.saw_by_code(&new.code).await? {
        return Err(CoreError::Conflict(format!(
            "Saw code {} is already registered (saw {})",
            new.code, existing.id
        ))
        .into());
    }

    let saw = api.create_saw(&new).await?;
    tracing::info!(saw_id = saw.id, code = %saw.code, branch_id = saw.branch_id, "Saw registered");
    Ok(saw)
}

pub async fn register_quick(api: &dyn SawShopApi, form: &QuickSawForm) -> ApiResult<Saw> {
    create_unique(api, form.to_new_saw()?).await
}

pub async fn register_full(api: &dyn SawShopApi, form: &FullSawForm) -> ApiResult<Saw> {
    create_unique(api, form.to_new_saw()?).await
}

/// Register and read the saw back, for screens that must show the stored row.
pub async fn register_and_confirm(api: &dyn SawShopApi, form: &FullSawForm) -> ApiResult<Saw> {
    let created = register_full(api, form).await?;
    api.saw(created.id).await
}

/// Apply the edit form to saw `id`.
pub async fn edit_saw(api: &dyn SawShopApi, id: DbId, form: &SawEditForm) -> ApiResult<Saw> {
    let update = form.to_update()?;
    let saw = api.update_saw(id, &update).await?;
    tracing::info!(saw_id = id, "Saw updated");
    Ok(saw)
}

/// Saws of `branch_id` that may be picked for a new sharpening.
pub async fn selectable_saws(api: &dyn SawShopApi, branch_id: DbId) -> ApiResult<Vec<Saw>> {
    let saws = api.saws_by_branch(branch_id).await?;
    Ok(saw::selectable_for_sharpening(&saws)
        .into_iter()
        .cloned()
        .collect())
}
