//! The confirm-before-commit "last sharpening" toggle.
//!
//! Turning the toggle on only asks for confirmation. The value becomes `true`
//! once the user confirms, and a declined prompt falls back to `Off`.

use serde::{Deserialize, Serialize};

/// Text shown in the confirmation prompt.
pub const CONFIRMATION_PROMPT: &str = "Marking this as the last sharpening makes the saw inactive. \
It cannot be selected for future sharpenings. Continue?";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LastSharpeningToggle {
    #[default]
    Off,
    /// The user flipped the switch; the prompt is open.
    AwaitingConfirmation,
    Confirmed,
}

impl LastSharpeningToggle {
    /// Start from a stored flag, e.g. when editing an existing record.
    pub fn from_flag(flag: bool) -> Self {
        if flag {
            Self::Confirmed
        } else {
            Self::Off
        }
    }

    /// The flag value submitted with the form.
    pub fn value(&self) -> bool {
        matches!(self, Self::Confirmed)
    }

    /// Whether the confirmation prompt should be shown.
    pub fn needs_confirmation(&self) -> bool {
        matches!(self, Self::AwaitingConfirmation)
    }

    /// The user switched the toggle on. Already confirmed stays confirmed.
    pub fn request_enable(&mut self) {
        if *self == Self::Off {
            *self = Self::AwaitingConfirmation;
        }
    }

    /// The user accepted the prompt. Ignored unless the prompt is open.
    pub fn confirm(&mut self) {
        if *self == Self::AwaitingConfirmation {
            *self = Self::Confirmed;
        }
    }

    /// The user dismissed the prompt.
    pub fn decline(&mut self) {
        if *self == Self::AwaitingConfirmation {
            *self = Self::Off;
        }
    }

    /// The user switched the toggle off.
    pub fn disable(&mut self) {
        *self = Self::Off;
    }
}
