//! User-facing outcome messages.
//!
//! Every failure that reaches a form or page is turned into a [`Feedback`]
//! whose kind decides how it is rendered: business rejections are
//! dismissible warnings, validation failures block submission, technical
//! failures are retryable error banners, and a missing or expired session
//! sends the user back to the sign-in page.

use serde::Serialize;

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackKind {
    Success,
    /// A business rule objected; the user may dismiss it and carry on.
    BusinessRejection,
    /// Input must be corrected before submitting.
    Validation,
    /// Network or server trouble; the action can be retried.
    Technical,
    /// The session is missing or expired; the user must sign in again.
    SignInRequired,
}

/// Shown when the backend or the session context rejects the credentials.
pub const MSG_SIGN_IN_AGAIN: &str = "Your session has expired, please sign in again";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub message: String,
}

impl Feedback {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FeedbackKind::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: FeedbackKind::BusinessRejection,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: FeedbackKind::Validation,
            message: message.into(),
        }
    }

    pub fn technical(message: impl Into<String>) -> Self {
        Self {
            kind: FeedbackKind::Technical,
            message: message.into(),
        }
    }

    pub fn sign_in_required() -> Self {
        Self {
            kind: FeedbackKind::SignInRequired,
            message: MSG_SIGN_IN_AGAIN.to_string(),
        }
    }

    pub fn is_dismissible(&self) -> bool {
        matches!(self.kind, FeedbackKind::Success | FeedbackKind::BusinessRejection)
    }

    pub fn blocks_submission(&self) -> bool {
        matches!(self.kind, FeedbackKind::Validation)
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self.kind, FeedbackKind::Technical)
    }

    pub fn requires_sign_in(&self) -> bool {
        matches!(self.kind, FeedbackKind::SignInRequired)
    }
}

impl From<&CoreError> for Feedback {
    fn from(err: &CoreError) -> Self {
        match err {
            CoreError::Internal(_) => Feedback::technical("An unexpected error occurred, please retry"),
            CoreError::Unauthorized(_) => Feedback::sign_in_required(),
            CoreError::Validation(msg) | CoreError::Conflict(msg) => Feedback::validation(msg.clone()),
            other => Feedback::validation(other.to_string()),
        }
    }
}
