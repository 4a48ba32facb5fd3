//! Light/dark preference.

use serde::{Deserialize, Serialize};

/// Storage key under which the preference is persisted.
pub const THEME_STORAGE_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    /// Parse a persisted value; unknown values yield `None`.
    pub fn from_stored(value: &str) -> Option<Self> {
        match value.trim() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Persisted value if valid, otherwise the system default.
    pub fn resolve(stored: Option<&str>, system_default: Self) -> Self {
        stored.and_then(Self::from_stored).unwrap_or(system_default)
    }
}
