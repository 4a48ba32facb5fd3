//! User form validation.
//!
//! Field-level rules are declared with `validator`; the rules that depend on
//! other fields (role/client binding) and on the form mode (password on
//! create) are checked by hand afterwards.

use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::error::CoreError;
use crate::models::user::UserPayload;
use crate::roles::Role;
use crate::types::DbId;

/// Whether the form creates a new user or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

/// Raw values as typed into the user form.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[validate(schema(function = "validate_role_binding"))]
pub struct UserForm {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,
    pub role: Option<Role>,
    pub client_id: Option<DbId>,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: Option<String>,
}

/// Client users must point at a client; staff users must not.
fn validate_role_binding(form: &UserForm) -> Result<(), ValidationError> {
    match (form.role, form.client_id) {
        (None, _) => Err(ValidationError::new("role_required").with_message("Role is required".into())),
        (Some(Role::Client), None) => Err(ValidationError::new("client_required")
            .with_message("Client users must be assigned to a client".into())),
        (Some(role), Some(_)) if role.is_staff() => Err(ValidationError::new("client_not_allowed")
            .with_message("Staff users cannot be assigned to a client".into())),
        _ => Ok(()),
    }
}

impl UserForm {
    /// Trim text inputs and turn a blank password into "unchanged".
    fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            role: self.role,
            client_id: self.client_id,
            password: self.password.clone().filter(|p| !p.is_empty()),
        }
    }

    /// Validate the form and build the payload to submit.
    pub fn to_payload(&self, mode: FormMode) -> Result<UserPayload, CoreError> {
        let form = self.normalized();
        form.validate()?;

        if mode == FormMode::Create && form.password.is_none() {
            return Err(CoreError::Validation("Password is required".into()));
        }

        let role = form
            .role
            .ok_or_else(|| CoreError::Validation("Role is required".into()))?;

        Ok(UserPayload {
            name: form.name,
            email: form.email,
            role,
            client_id: form.client_id,
            password: form.password,
        })
    }
}
