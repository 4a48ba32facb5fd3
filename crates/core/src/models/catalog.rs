//! Catalog lists used to populate form selectors.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// A saw type (blade family) from the saw-type catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SawType {
    pub id: DbId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// A free-text saw condition, e.g. "in use" or "under repair".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SawState {
    pub id: DbId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// A kind of sharpening work (e.g. back, teeth, full service).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharpeningType {
    pub id: DbId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Look up a catalog entry's display name by id.
///
/// Returns `None` when the id is not in the list; list views render a
/// placeholder in that case.
pub fn name_of<'a, T, F>(items: &'a [T], id: DbId, key: F) -> Option<&'a str>
where
    F: Fn(&'a T) -> (DbId, &'a str),
{
    items.iter().map(key).find(|(item_id, _)| *item_id == id).map(|(_, name)| name)
}
