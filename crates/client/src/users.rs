//! User create/edit submission.

use afilado_core::models::user::User;
use afilado_core::types::DbId;
use afilado_core::user_form::{FormMode, UserForm};

use crate::api::SawShopApi;
use crate::error::ApiResult;

/// Create a user, or update user `id` when given.
pub async fn save_user(api: &dyn SawShopApi, id: Option<DbId>, form: &UserForm) -> ApiResult<User> {
    let user = match id {
        None => {
            let payload = form.to_payload(FormMode::Create)?;
            api.create_user(&payload).await?
        }
        Some(id) => {
            let payload = form.to_payload(FormMode::Edit)?;
            api.update_user(id, &payload).await?
        }
    };
    tracing::info!(user_id = user.id, role = %user.role, "User saved");
    Ok(user)
}
