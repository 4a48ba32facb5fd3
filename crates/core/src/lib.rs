//! Afilado domain core.
//!
//! Entity types, validation and business rules for the saw-sharpening
//! service. No I/O lives here: callers load data through the API client and
//! pass it in.

pub mod eligibility;
pub mod error;
pub mod feedback;
pub mod filtering;
pub mod last_sharpening;
pub mod models;
pub mod pagination;
pub mod reports;
pub mod roles;
pub mod saw_registration;
pub mod sharpening_form;
pub mod theme;
pub mod types;
pub mod user_form;
