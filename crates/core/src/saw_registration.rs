//! Quick and full saw registration forms.
//!
//! Quick registration captures only what is needed to start tracking a
//! blade; full registration adds condition, dimensions and material. Both
//! normalize the code before validating it.

use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::error::CoreError;
use crate::models::saw::{NewSaw, SawUpdate};
use crate::types::DbId;

/// Maximum length of a saw code.
pub const MAX_CODE_LENGTH: usize = 32;
// `validator` length bounds are `u64`; same value as `MAX_CODE_LENGTH`.
const MAX_CODE_LENGTH_U64: u64 = MAX_CODE_LENGTH as u64;

/// Canonical form of a saw code: trimmed and upper-cased.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Codes are made of ASCII letters, digits, `-` and `_`.
fn validate_code_charset(code: &str) -> Result<(), ValidationError> {
    if code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        Ok(())
    } else {
        Err(ValidationError::new("code_charset")
            .with_message("Code may only contain letters, digits, '-' and '_'".into()))
    }
}

// ---------------------------------------------------------------------------
// Quick registration
// ---------------------------------------------------------------------------

/// The three fields of the quick registration dialog. Validated through
/// [`FullSawForm`] so both paths share one rule set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuickSawForm {
    pub code: String,
    pub saw_type_id: Option<DbId>,
    pub branch_id: Option<DbId>,
}

impl QuickSawForm {
    pub fn to_new_saw(&self) -> Result<NewSaw, CoreError> {
        FullSawForm {
            code: self.code.clone(),
            saw_type_id: self.saw_type_id,
            branch_id: self.branch_id,
            ..FullSawForm::default()
        }
        .to_new_saw()
    }
}

// ---------------------------------------------------------------------------
// Full registration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct FullSawForm {
    #[validate(
        length(min = 1, max = MAX_CODE_LENGTH_U64, message = "Code must be between 1 and 32 characters"),
        custom(function = "validate_code_charset")
    )]
    pub code: String,
    #[validate(required(message = "Saw type is required"))]
    pub saw_type_id: Option<DbId>,
    #[validate(required(message = "Branch is required"))]
    pub branch_id: Option<DbId>,
    pub state_id: Option<DbId>,
    #[validate(range(exclusive_min = 0.0, message = "Width must be greater than zero"))]
    pub width_mm: Option<f64>,
    #[validate(range(exclusive_min = 0.0, message = "Length must be greater than zero"))]
    pub length_mm: Option<f64>,
    #[validate(range(exclusive_min = 0.0, message = "Height must be greater than zero"))]
    pub height_mm: Option<f64>,
    pub material: Option<String>,
    pub notes: Option<String>,
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl FullSawForm {
    pub fn to_new_saw(&self) -> Result<NewSaw, CoreError> {
        let form = Self {
            code: normalize_code(&self.code),
            ..self.clone()
        };
        form.validate()?;

        let (Some(saw_type_id), Some(branch_id)) = (form.saw_type_id, form.branch_id) else {
            return Err(CoreError::Validation("Saw type and branch are required".into()));
        };

        Ok(NewSaw {
            code: form.code,
            saw_type_id,
            branch_id,
            state_id: form.state_id,
            width_mm: form.width_mm,
            length_mm: form.length_mm,
            height_mm: form.height_mm,
            material: non_blank(&form.material),
            notes: non_blank(&form.notes),
        })
    }
}

// ---------------------------------------------------------------------------
// Edit
// ---------------------------------------------------------------------------

/// Values from the saw edit form. The branch selector is disabled there, so
/// there is no branch field to submit.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SawEditForm {
    pub saw_type_id: Option<DbId>,
    pub state_id: Option<DbId>,
    #[validate(range(exclusive_min = 0.0, message = "Width must be greater than zero"))]
    pub width_mm: Option<f64>,
    #[validate(range(exclusive_min = 0.0, message = "Length must be greater than zero"))]
    pub length_mm: Option<f64>,
    #[validate(range(exclusive_min = 0.0, message = "Height must be greater than zero"))]
    pub height_mm: Option<f64>,
    pub material: Option<String>,
    pub notes: Option<String>,
}

impl SawEditForm {
    pub fn to_update(&self) -> Result<SawUpdate, CoreError> {
        self.validate()?;
        let update = SawUpdate {
            saw_type_id: self.saw_type_id,
            state_id: self.state_id,
            active: None,
            width_mm: self.width_mm,
            length_mm: self.length_mm,
            height_mm: self.height_mm,
            material: non_blank(&self.material),
            notes: non_blank(&self.notes),
        };
        if update.is_empty() {
            return Err(CoreError::Validation("Nothing to update".into()));
        }
        Ok(update)
    }
}
