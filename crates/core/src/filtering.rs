//! Client-side list filtering.
//!
//! List pages fetch a whole collection once and narrow it in memory. Text
//! search is a case-insensitive substring match over the row's display
//! fields joined by spaces; every other filter is an independent predicate,
//! and all active predicates must hold. Filtering keeps the input order and
//! always runs on the full collection, before pagination.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::models::client::Client;
use crate::models::saw::Saw;
use crate::models::sharpening::{SharpeningStatus, SharpeningView};
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Text search
// ---------------------------------------------------------------------------

/// Rows that expose display fields to the search box.
pub trait Searchable {
    fn search_fields(&self) -> Vec<&str>;
}

/// Lower-cased, trimmed query, or `None` when the box is blank.
pub fn normalize_query(query: &str) -> Option<String> {
    let q = query.trim();
    if q.is_empty() {
        None
    } else {
        Some(q.to_lowercase())
    }
}

/// Whether `query` occurs in the concatenation of `fields`, ignoring case.
///
/// A blank query matches everything.
pub fn matches_text(query: &str, fields: &[&str]) -> bool {
    match normalize_query(query) {
        None => true,
        Some(q) => fields.join(" ").to_lowercase().contains(&q),
    }
}

impl Searchable for SharpeningView {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.saw_code.as_str(),
            self.sharpening_type_name.as_str(),
            self.client_name.as_str(),
            self.branch_name.as_str(),
        ];
        if let Some(notes) = &self.sharpening.notes {
            fields.push(notes);
        }
        fields
    }
}

impl Searchable for Saw {
    fn search_fields(&self) -> Vec<&str> {
        [Some(self.code.as_str()), self.material.as_deref(), self.notes.as_deref()]
            .into_iter()
            .flatten()
            .collect()
    }
}

impl Searchable for Client {
    fn search_fields(&self) -> Vec<&str> {
        [
            Some(self.name.as_str()),
            self.tax_id.as_deref(),
            self.email.as_deref(),
            self.phone.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

// ---------------------------------------------------------------------------
// Date range
// ---------------------------------------------------------------------------

/// Inclusive calendar-day range. Open ends are unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn contains(&self, at: Timestamp) -> bool {
        let day = at.date_naive();
        self.from.map_or(true, |from| day >= from) && self.to.map_or(true, |to| day <= to)
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// Filter bar of the sharpening list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SharpeningFilter {
    #[serde(default)]
    pub query: String,
    pub client_id: Option<DbId>,
    pub branch_id: Option<DbId>,
    pub sharpening_type_id: Option<DbId>,
    pub status: Option<SharpeningStatus>,
    #[serde(default)]
    pub intake: DateRange,
}

impl SharpeningFilter {
    pub fn matches(&self, row: &SharpeningView) -> bool {
        self.client_id.map_or(true, |id| row.client_id == id)
            && self.branch_id.map_or(true, |id| row.branch_id == id)
            && self
                .sharpening_type_id
                .map_or(true, |id| row.sharpening.sharpening_type_id == id)
            && self.status.map_or(true, |s| row.sharpening.status() == s)
            && self.intake.contains(row.sharpening.intake_at)
            && matches_text(&self.query, &row.search_fields())
    }
}

/// Filter bar of the saw inventory.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SawFilter {
    #[serde(default)]
    pub query: String,
    /// Restrict to these branches, e.g. all branches of one client.
    pub branch_ids: Option<Vec<DbId>>,
    pub saw_type_id: Option<DbId>,
    pub state_id: Option<DbId>,
    pub active: Option<bool>,
}

impl SawFilter {
    pub fn matches(&self, saw: &Saw) -> bool {
        self.branch_ids
            .as_ref()
            .map_or(true, |ids| ids.contains(&saw.branch_id))
            && self.saw_type_id.map_or(true, |id| saw.saw_type_id == id)
            && self.state_id.map_or(true, |id| saw.state_id == Some(id))
            && self.active.map_or(true, |a| saw.active == a)
            && matches_text(&self.query, &saw.search_fields())
    }
}

/// Filter bar of the client list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientFilter {
    #[serde(default)]
    pub query: String,
    pub active: Option<bool>,
}

impl ClientFilter {
    pub fn matches(&self, client: &Client) -> bool {
        self.active.map_or(true, |a| client.active == a)
            && matches_text(&self.query, &client.search_fields())
    }
}

/// Keep the items satisfying `predicate`, in their original order.
pub fn apply<'a, T, P>(items: &'a [T], predicate: P) -> Vec<&'a T>
where
    P: Fn(&T) -> bool,
{
    items.iter().filter(|&item| predicate(item)).collect()
}
