//! Saw blades tracked per branch.
//!
//! A saw is created through quick or full registration, edited through a
//! partial update, and retired exactly once by the last-sharpening flow.

use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A saw row as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Saw {
    pub id: DbId,
    /// Barcode printed on the blade. Unique across the system.
    pub code: String,
    pub saw_type_id: DbId,
    pub branch_id: DbId,
    /// `false` once the saw has received its last sharpening.
    pub active: bool,
    #[serde(default)]
    pub state_id: Option<DbId>,
    #[serde(default)]
    pub width_mm: Option<f64>,
    #[serde(default)]
    pub length_mm: Option<f64>,
    #[serde(default)]
    pub height_mm: Option<f64>,
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    pub registered_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Create DTO
// ---------------------------------------------------------------------------

/// Input for registering a new saw. Produced by the registration forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSaw {
    pub code: String,
    pub saw_type_id: DbId,
    pub branch_id: DbId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width_mm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length_mm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_mm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

// ---------------------------------------------------------------------------
// Update DTO
// ---------------------------------------------------------------------------

/// Partial update for an existing saw (all fields optional).
///
/// There is no branch field: a saw stays with the branch it was
/// registered under.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SawUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saw_type_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width_mm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length_mm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_mm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl SawUpdate {
    /// The `{active: false}` update issued by the last-sharpening flow.
    pub fn deactivate() -> Self {
        Self {
            active: Some(false),
            ..Self::default()
        }
    }

    /// Whether the update carries no changes at all.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// ---------------------------------------------------------------------------
// Selection helpers
// ---------------------------------------------------------------------------

/// Saws that may be offered as the target of a new sharpening.
///
/// Inactive saws are never selectable.
pub fn selectable_for_sharpening(saws: &[Saw]) -> Vec<&Saw> {
    saws.iter().filter(|s| s.active).collect()
}
