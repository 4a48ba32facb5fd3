//! Client companies and their branch locations.
//!
//! These are reference entities: the sharpening logic reads them but never
//! mutates them.

use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A customer company served by the sharpening shop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: DbId,
    pub name: String,
    #[serde(default)]
    pub tax_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    pub active: bool,
    pub created_at: Timestamp,
}

/// A physical location of a client. Every saw belongs to exactly one branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub id: DbId,
    pub client_id: DbId,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub created_at: Timestamp,
}

/// Branches owned by `client_id`, in the order given.
pub fn branches_of(branches: &[Branch], client_id: DbId) -> Vec<&Branch> {
    branches.iter().filter(|b| b.client_id == client_id).collect()
}
